use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApiError,
    extractors::ApiJson,
    state::AppState,
    users::{
        dto::{
            DbStatusResponse, LoginRequest, LoginResponse, MessageResponse, PublicUser,
            RegisterRequest, UserListResponse,
        },
        password::{hash_password, verify_dummy, verify_password},
        repo_types::NewUser,
    },
};

const MAX_NAME_CHARS: usize = 100;
const MAX_EMAIL_CHARS: usize = 120;

/// Static stand-in returned on login; nothing issues or validates it.
pub const PLACEHOLDER_TOKEN: &str = "dummy-token";

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/users", get(list_users))
        .route("/api/check-db", get(check_db))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let name = payload.full_name.trim().to_string();
    let email = payload.email.trim().to_string();

    if name.is_empty()
        || email.is_empty()
        || payload.password.is_empty()
        || payload.confirm_password.is_empty()
    {
        warn!("register with missing fields");
        return Err(ApiError::bad_request("All fields are required"));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ApiError::bad_request(format!(
            "Full name must be at most {MAX_NAME_CHARS} characters"
        )));
    }
    if email.chars().count() > MAX_EMAIL_CHARS {
        return Err(ApiError::bad_request(format!(
            "Email must be at most {MAX_EMAIL_CHARS} characters"
        )));
    }
    if payload.password != payload.confirm_password {
        warn!(email = %email, "password confirmation mismatch");
        return Err(ApiError::bad_request("Passwords do not match"));
    }

    if state.users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::bad_request("Email already registered"));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = state
        .users
        .insert(NewUser {
            name,
            email,
            password_hash,
        })
        .await
        .map_err(|e| {
            warn!(error = %e, "insert user failed");
            e
        })?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let Some(user) = state.users.find_by_email(email).await? else {
        verify_dummy(&payload.password);
        warn!(email = %email, "login unknown email");
        return Err(ApiError::bad_request("Invalid credentials"));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::bad_request("Invalid credentials"));
    }

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        token: PLACEHOLDER_TOKEN.into(),
    }))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, ApiError> {
    let users: Vec<PublicUser> = state
        .users
        .list_all()
        .await
        .map_err(|e| {
            error!(error = %e, "list users failed");
            e
        })?
        .into_iter()
        .map(PublicUser::from)
        .collect();

    Ok(Json(UserListResponse {
        total_users: users.len(),
        users,
    }))
}

#[instrument(skip(state))]
pub async fn check_db(State(state): State<AppState>) -> Result<Json<DbStatusResponse>, ApiError> {
    match state.users.count().await {
        Ok(user_count) => Ok(Json(DbStatusResponse {
            status: "Database connected".into(),
            user_count,
        })),
        Err(e) => {
            error!(error = %e, "database check failed");
            Err(ApiError::Internal(e.to_string()))
        }
    }
}
