use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::features::users::models::{Role, User};

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: Option<String>,
    pub badge_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            department: u.department,
            badge_number: u.badge_number,
            created_at: u.created_at,
        }
    }
}

/// Compact reference used when a case embeds its reporter or officers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRefDto {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserRefDto {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

/// Request DTO for creating a user (admin) and for signup
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default)]
    pub role: Option<Role>,

    #[validate(length(max = 128, message = "Department must not exceed 128 characters"))]
    pub department: Option<String>,

    #[validate(length(max = 64, message = "Badge number must not exceed 64 characters"))]
    pub badge_number: Option<String>,
}

// Blank means "keep the stored email", so only a non-blank value is checked.
fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("Please provide a valid email".into()))
    }
}

/// Request DTO for updating a user. Omitted or empty fields keep their value;
/// a non-empty `password` is re-hashed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(max = 128, message = "Name must not exceed 128 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_optional_email"))]
    pub email: Option<String>,

    pub password: Option<String>,

    pub role: Option<Role>,

    #[validate(length(max = 128, message = "Department must not exceed 128 characters"))]
    pub department: Option<String>,

    #[validate(length(max = 64, message = "Badge number must not exceed 64 characters"))]
    pub badge_number: Option<String>,
}

/// Trim `value`, treating blank strings as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
