use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto, UserResponseDto};
use crate::features::users::services::UserService;
use crate::shared::constants::MSG_USER_NOT_FOUND;
use crate::shared::types::ApiResponse;
use crate::shared::validation::parse_record_id;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "users",
    security(
        ("token_auth" = [])
    )
)]
pub async fn list_users(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<UserService>>,
) -> Result<Json<Vec<UserResponseDto>>> {
    let users = service.list(&user).await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserResponseDto),
        (status = 400, description = "Validation error, weak password or email already registered"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "users",
    security(
        ("token_auth" = [])
    )
)]
pub async fn create_user(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = service.create(&user, dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserResponseDto),
        (status = 400, description = "Validation error or email already registered"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("token_auth" = [])
    )
)]
pub async fn update_user(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<UserResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let id =
        parse_record_id(&id).ok_or_else(|| AppError::NotFound(MSG_USER_NOT_FOUND.to_string()))?;
    let updated = service.update(&user, id, dto).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("token_auth" = [])
    )
)]
pub async fn delete_user(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let id =
        parse_record_id(&id).ok_or_else(|| AppError::NotFound(MSG_USER_NOT_FOUND.to_string()))?;
    service.delete(&user, id).await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}
