use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::{Role, User};

/// Identity carried by a verified session token.
///
/// This is passed explicitly into every service call that needs to know who is
/// acting; nothing reads it from ambient request state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub role: Role,
    pub name: String,
    pub email: String,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
