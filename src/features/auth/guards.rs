//! Role-based authorization guards for the application.
//!
//! Two roles exist: `admin` has unrestricted read/write over users and cases,
//! `user` sees only the cases they reported or are assigned to. Services repeat
//! the role check, so a guard is a fast rejection at the HTTP edge rather than
//! the only line of defense.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::MSG_ADMIN_ONLY;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Extracts the caller only if they hold the `admin` role.
///
/// ```ignore
/// pub async fn list_users(RequireAdmin(admin): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(RequireAdmin(user))
        } else {
            Err(AppError::Forbidden(MSG_ADMIN_ONLY.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::Role;
    use axum::{body::Body, extract::Request};
    use uuid::Uuid;

    async fn guard_for(role: Option<Role>) -> Result<RequireAdmin, AppError> {
        let mut request = Request::new(Body::empty());
        if let Some(role) = role {
            request.extensions_mut().insert(AuthenticatedUser {
                id: Uuid::new_v4(),
                role,
                name: "Admin User".to_string(),
                email: "admin@crimetrack.com".to_string(),
            });
        }
        let (mut parts, _) = request.into_parts();
        RequireAdmin::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_require_admin() {
        assert!(guard_for(Some(Role::Admin)).await.is_ok());
        assert!(matches!(
            guard_for(Some(Role::User)).await,
            Err(AppError::Forbidden(msg)) if msg == MSG_ADMIN_ONLY
        ));
        assert!(matches!(
            guard_for(None).await,
            Err(AppError::Unauthorized(_))
        ));
    }
}
