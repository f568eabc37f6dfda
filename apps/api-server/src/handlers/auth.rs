//! Authentication handlers: register, login, current identity.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use forum_core::domain::User;
use forum_core::ports::{PasswordService, TokenService};
use forum_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = Vec::new();
    if req.email.is_empty() || !req.email.contains('@') {
        errors.push("email: must be a valid email address".to_string());
    }
    if req.password.len() < 8 {
        errors.push("password: must be at least 8 characters".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(req.email, password_hash);
    let saved = state.users.save(user).await?;

    let token = token_service
        .generate_token(saved.id, &saved.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %saved.id, "User registered");

    Ok(HttpResponse::Created().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserResponse {
        id: identity.user_id,
        email: identity.email,
    }))
}
