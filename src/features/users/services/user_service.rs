use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::PasswordService;
use crate::features::users::dtos::{non_blank, CreateUserDto, UpdateUserDto, UserResponseDto};
use crate::features::users::models::{NewUser, User, UserChanges};
use crate::features::users::repository::UserRepository;
use crate::shared::constants::{MSG_ADMIN_ONLY, MSG_USER_EXISTS, MSG_USER_NOT_FOUND};
use crate::shared::validation::normalize_email;

/// Service for user account operations
pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<PasswordService>,
}

fn ensure_admin(actor: &AuthenticatedUser) -> Result<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(MSG_ADMIN_ONLY.to_string()))
    }
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Create an account without any role check. Used by signup and by the
    /// admin endpoint once the caller has been authorized.
    pub async fn register(&self, dto: CreateUserDto) -> Result<User> {
        let email = normalize_email(&dto.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(MSG_USER_EXISTS.to_string()));
        }

        let password_hash = self.passwords.hash(&dto.password)?;
        let user = self
            .users
            .insert(NewUser {
                name: dto.name.trim().to_string(),
                email,
                password_hash,
                role: dto.role.unwrap_or_default(),
                department: non_blank(dto.department),
                badge_number: non_blank(dto.badge_number),
            })
            .await?;

        tracing::info!("Registered user {} with role {}", user.id, user.role);
        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(MSG_USER_NOT_FOUND.to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users.find_by_email(&normalize_email(email)).await
    }

    /// Replace the stored password hash for `user`
    pub async fn set_password(&self, user: &mut User, password: &str) -> Result<()> {
        user.password_hash = self.passwords.hash(password)?;
        if !self.users.save(user).await? {
            return Err(AppError::NotFound(MSG_USER_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    /// List all users (admin only)
    pub async fn list(&self, actor: &AuthenticatedUser) -> Result<Vec<UserResponseDto>> {
        ensure_admin(actor)?;
        let users = self.users.list().await?;
        Ok(users.into_iter().map(UserResponseDto::from).collect())
    }

    /// Create a user with any role (admin only)
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        dto: CreateUserDto,
    ) -> Result<UserResponseDto> {
        ensure_admin(actor)?;
        let user = self.register(dto).await?;
        Ok(user.into())
    }

    /// Update a user with replace-if-provided semantics (admin only)
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<UserResponseDto> {
        ensure_admin(actor)?;
        let mut user = self.get(id).await?;

        let email = non_blank(dto.email).map(|e| normalize_email(&e));
        if let Some(email) = &email {
            if *email != user.email && self.users.find_by_email(email).await?.is_some() {
                return Err(AppError::Conflict(MSG_USER_EXISTS.to_string()));
            }
        }

        let password_hash = match non_blank(dto.password) {
            Some(password) => Some(self.passwords.hash(&password)?),
            None => None,
        };

        UserChanges {
            name: non_blank(dto.name),
            email,
            role: dto.role,
            department: non_blank(dto.department),
            badge_number: non_blank(dto.badge_number),
            password_hash,
        }
        .apply(&mut user);

        if !self.users.save(&user).await? {
            return Err(AppError::NotFound(MSG_USER_NOT_FOUND.to_string()));
        }

        tracing::info!("User {} updated by {}", user.id, actor.id);
        Ok(user.into())
    }

    /// Hard-delete a user (admin only). Admins cannot delete their own account.
    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<()> {
        ensure_admin(actor)?;
        if actor.id == id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        if !self.users.delete(id).await? {
            return Err(AppError::NotFound(MSG_USER_NOT_FOUND.to_string()));
        }

        tracing::info!("User {} deleted by {}", id, actor.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::Role;
    use crate::shared::test_helpers::{admin_identity, officer_identity, TestContext};

    fn create_dto(email: &str) -> CreateUserDto {
        CreateUserDto {
            name: "Officer Johnson".to_string(),
            email: email.to_string(),
            password: "officer123".to_string(),
            role: None,
            department: Some("Investigations".to_string()),
            badge_number: Some("OFF-002".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let ctx = TestContext::new();
        let officer = ctx.create_officer("smith@crimetrack.com").await;

        let err = ctx
            .users
            .create(&officer_identity(&officer), create_dto("j@crimetrack.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_create_normalizes_email_and_defaults_role() {
        let ctx = TestContext::new();
        let admin = ctx.create_admin("admin@crimetrack.com").await;

        let created = ctx
            .users
            .create(&admin_identity(&admin), create_dto(" Johnson@CrimeTrack.com "))
            .await
            .unwrap();
        assert_eq!(created.email, "johnson@crimetrack.com");
        assert_eq!(created.role, Role::User);

        let err = ctx
            .users
            .create(&admin_identity(&admin), create_dto("johnson@crimetrack.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == MSG_USER_EXISTS));
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields_and_rehashes_password() {
        let ctx = TestContext::new();
        let admin = ctx.create_admin("admin@crimetrack.com").await;
        let officer = ctx.create_officer("smith@crimetrack.com").await;

        let updated = ctx
            .users
            .update(
                &admin_identity(&admin),
                officer.id,
                UpdateUserDto {
                    role: Some(Role::Admin),
                    password: Some("newpassword".to_string()),
                    name: Some("".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role, Role::Admin);
        assert_eq!(updated.name, officer.name);
        assert_eq!(updated.email, officer.email);

        let stored = ctx.users.get(officer.id).await.unwrap();
        assert!(ctx
            .passwords
            .verify("newpassword", &stored.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_update_rejects_taken_email() {
        let ctx = TestContext::new();
        let admin = ctx.create_admin("admin@crimetrack.com").await;
        let officer = ctx.create_officer("smith@crimetrack.com").await;

        let err = ctx
            .users
            .update(
                &admin_identity(&admin),
                officer.id,
                UpdateUserDto {
                    email: Some("ADMIN@crimetrack.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_semantics() {
        let ctx = TestContext::new();
        let admin = ctx.create_admin("admin@crimetrack.com").await;
        let officer = ctx.create_officer("smith@crimetrack.com").await;
        let actor = admin_identity(&admin);

        assert!(matches!(
            ctx.users.delete(&actor, admin.id).await.unwrap_err(),
            AppError::BadRequest(_)
        ));
        ctx.users.delete(&actor, officer.id).await.unwrap();
        assert!(matches!(
            ctx.users.delete(&actor, officer.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
