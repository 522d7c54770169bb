use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::dtos::CreateUserDto;
use crate::features::users::models::Role;

/// Request DTO for self-service registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequestDto {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Defaults to `user`
    #[serde(default)]
    pub role: Option<Role>,

    #[validate(length(max = 128, message = "Department must not exceed 128 characters"))]
    pub department: Option<String>,

    #[validate(length(max = 64, message = "Badge number must not exceed 64 characters"))]
    pub badge_number: Option<String>,
}

impl From<SignupRequestDto> for CreateUserDto {
    fn from(dto: SignupRequestDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            password: dto.password,
            role: dto.role,
            department: dto.department,
            badge_number: dto.badge_number,
        }
    }
}

/// Request DTO for user login
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for changing the caller's own password
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequestDto {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Response DTO for signup and login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponseDto {
    /// Signed session token; send it back in the `x-auth-token` header
    pub token: String,
}
