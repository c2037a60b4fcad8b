// handlers.rs
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::auth::{self, AuthUser};
use crate::error::{AppError, AppResult};
use crate::models::{
    ChangeUsernameRequest, CreatePollRequest, DeletePollRequest, GetUsernameRequest,
    GetUserVotesRequest, GetVotesRequest, LoginRequest, Poll, SignupRequest, UserInfo, UserRecord,
    UserVote, VoteCounts, VoteRequest,
};
use crate::state::AppState;

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello from PollPal backend" }))
}

/// Register a new user with an argon2-hashed password.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let password_hash = auth::hash_password(&req.password)?;

    // No row comes back when the name is already taken.
    let user = sqlx::query_as::<_, UserInfo>(
        "INSERT INTO users (username, password_hash) VALUES ($1, $2)
         ON CONFLICT (username) DO NOTHING
         RETURNING id, username",
    )
    .bind(&req.username)
    .bind(&password_hash)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::Conflict("Username is already taken".to_string()))?;

    Ok(Json(json!({
        "message": "User created successfully",
        "user": user
    })))
}

/// Verify credentials and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = sqlx::query_as::<_, UserRecord>(
        "SELECT id, username, password_hash FROM users WHERE username = $1",
    )
    .bind(&req.username)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    if !auth::verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let token = auth::create_token(user.id, &user.username, &state.jwt_secret)?;

    Ok(Json(json!({
        "message": "Login successful",
        "user": { "id": user.id, "username": user.username },
        "token": token
    })))
}

/// Rename the authenticated user. Duplicate names surface as the unique
/// violation from the single UPDATE, so there is no check-then-act window.
pub async fn change_username(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<ChangeUsernameRequest>,
) -> AppResult<impl IntoResponse> {
    if req.id != user.user_id {
        return Err(AppError::Forbidden(
            "Cannot change another user's name".to_string(),
        ));
    }

    let result = sqlx::query("UPDATE users SET username = $1 WHERE id = $2")
        .bind(&req.username)
        .bind(req.id)
        .execute(&state.pool)
        .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => {
            Err(AppError::NotFound("User not found".to_string()))
        }
        Ok(_) => Ok(Json(json!({ "message": "Username changed successfully" }))),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(AppError::Conflict("Username is already taken".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Create a poll owned by the authenticated user, stamped NOW() by the database.
pub async fn create_poll(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreatePollRequest>,
) -> AppResult<impl IntoResponse> {
    if req.user_id != user.user_id {
        return Err(AppError::Forbidden(
            "Cannot create a poll as another user".to_string(),
        ));
    }

    let poll_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO polls (question, created_by) VALUES ($1, $2) RETURNING id",
    )
    .bind(&req.question)
    .bind(req.user_id)
    .fetch_one(&state.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Poll created successfully",
            "poll_id": poll_id
        })),
    ))
}

/// Fetch all polls. No server-side ordering or filtering.
pub async fn get_polls(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let polls =
        sqlx::query_as::<_, Poll>("SELECT id, question, created_by, created_at FROM polls")
            .fetch_all(&state.pool)
            .await?;

    Ok(Json(polls))
}

/// Delete a poll. Only its creator may; votes cascade with it.
pub async fn delete_poll(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<DeletePollRequest>,
) -> AppResult<impl IntoResponse> {
    let done = sqlx::query("DELETE FROM polls WHERE id = $1 AND created_by = $2")
        .bind(req.poll_id)
        .bind(user.user_id)
        .execute(&state.pool)
        .await?;

    if done.rows_affected() == 0 {
        // Nothing deleted: either the poll is gone or it belongs to someone else.
        let exists = sqlx::query_scalar::<_, i32>("SELECT created_by FROM polls WHERE id = $1")
            .bind(req.poll_id)
            .fetch_optional(&state.pool)
            .await?;
        return match exists {
            Some(_) => Err(AppError::Forbidden(
                "Only the poll creator can delete a poll".to_string(),
            )),
            None => Err(AppError::NotFound("Poll not found".to_string())),
        };
    }

    Ok(Json(json!({ "message": "Poll deleted successfully" })))
}

/// Get yes/no tallies for a poll. Zero counts when no votes exist.
pub async fn get_votes(
    State(state): State<AppState>,
    Json(req): Json<GetVotesRequest>,
) -> AppResult<impl IntoResponse> {
    let counts = sqlx::query_as::<_, VoteCounts>(
        "SELECT COUNT(*) FILTER (WHERE vote) AS yes,
                COUNT(*) FILTER (WHERE NOT vote) AS no
         FROM votes
         WHERE poll_id = $1",
    )
    .bind(req.poll_id)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(counts))
}

/// Cast a yes/no vote as the authenticated user.
pub async fn vote(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    if req.user_id != user.user_id {
        return Err(AppError::Forbidden(
            "Cannot vote as another user".to_string(),
        ));
    }

    // UNIQUE (user_id, poll_id): a repeat vote affects zero rows.
    let result = sqlx::query(
        "INSERT INTO votes (user_id, poll_id, vote) VALUES ($1, $2, $3)
         ON CONFLICT (user_id, poll_id) DO NOTHING",
    )
    .bind(req.user_id)
    .bind(req.poll_id)
    .bind(req.vote)
    .execute(&state.pool)
    .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => {
            Err(AppError::Conflict("Already voted".to_string()))
        }
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(json!({ "message": "Vote submitted successfully" })),
        )),
        Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
            Err(AppError::NotFound("Poll not found".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Look up a username by id.
pub async fn get_username(
    State(state): State<AppState>,
    Json(req): Json<GetUsernameRequest>,
) -> AppResult<impl IntoResponse> {
    let username = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = $1")
        .bind(req.id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({
        "message": "Got username successfully",
        "username": username
    })))
}

/// Poll ids the user has voted on; the client marks those polls as answered.
pub async fn get_user_votes(
    State(state): State<AppState>,
    Json(req): Json<GetUserVotesRequest>,
) -> AppResult<impl IntoResponse> {
    let votes = sqlx::query_as::<_, UserVote>("SELECT poll_id FROM votes WHERE user_id = $1")
        .bind(req.user_id)
        .fetch_all(&state.pool)
        .await?;

    Ok(Json(votes))
}
