use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    ChangePasswordRequestDto, LoginRequestDto, SignupRequestDto, TokenResponseDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::features::users::dtos::UserResponseDto;
use crate::shared::types::ApiResponse;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequestDto,
    responses(
        (status = 201, description = "Account created", body = TokenResponseDto),
        (status = 400, description = "Validation error, weak password or email already registered"),
        (status = 403, description = "Admin signup disabled")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignupRequestDto>,
) -> Result<(StatusCode, Json<TokenResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.signup(dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = TokenResponseDto),
        (status = 400, description = "Validation error or invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<TokenResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.login(dto).await?;
    Ok(Json(response))
}

/// Get the stored profile of the caller
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists")
    ),
    tag = "auth",
    security(
        ("token_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<UserResponseDto>> {
    let me = service.me(&user).await?;
    Ok(Json(me))
}

/// Change the caller's own password
#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequestDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Current password incorrect or new password too weak"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("token_auth" = [])
    )
)]
pub async fn change_password(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ChangePasswordRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.change_password(&user, dto).await?;
    Ok(Json(ApiResponse::message("Password updated successfully")))
}
