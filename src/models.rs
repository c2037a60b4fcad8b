// models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Poll {
    pub id: i32,
    pub question: String,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

/// The public view of a user: what `/signup` and `/login` return.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
}

/// Full user row, password hash included. Internal only, never serialized.
#[derive(Debug, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

/// Yes/no tallies for one poll, computed by aggregation over `votes`.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct VoteCounts {
    pub yes: i64,
    pub no: i64,
}

impl VoteCounts {
    /// Share of yes votes, in percent. 0.0 for a poll with no votes.
    pub fn percent_yes(&self) -> f64 {
        let total = self.yes + self.no;
        if total == 0 {
            return 0.0;
        }
        self.yes as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserVote {
    pub poll_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeUsernameRequest {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    pub question: String,
    pub user_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct DeletePollRequest {
    pub poll_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct GetVotesRequest {
    pub poll_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub poll_id: i32,
    pub user_id: i32,
    pub vote: bool,
}

#[derive(Debug, Deserialize)]
pub struct GetUsernameRequest {
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct GetUserVotesRequest {
    pub user_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_yes_three_to_one() {
        let counts = VoteCounts { yes: 3, no: 1 };
        assert_eq!(counts.percent_yes(), 75.0);
    }

    #[test]
    fn percent_yes_empty_poll() {
        let counts = VoteCounts { yes: 0, no: 0 };
        assert_eq!(counts.percent_yes(), 0.0);
    }

    #[test]
    fn user_info_has_no_password_field() {
        let user = UserInfo {
            id: 7,
            username: "alice".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "username": "alice"}));
    }

    #[test]
    fn vote_request_parses_boolean_vote() {
        let req: VoteRequest =
            serde_json::from_str(r#"{"poll_id": 1, "user_id": 2, "vote": false}"#).unwrap();
        assert_eq!(req.poll_id, 1);
        assert_eq!(req.user_id, 2);
        assert!(!req.vote);
    }
}
