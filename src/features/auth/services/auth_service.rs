use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    ChangePasswordRequestDto, LoginRequestDto, SignupRequestDto, TokenResponseDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::{PasswordService, TokenService};
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::models::Role;
use crate::features::users::UserService;

/// Service for authentication operations (signup, login, password change)
pub struct AuthService {
    users: Arc<UserService>,
    passwords: Arc<PasswordService>,
    tokens: Arc<TokenService>,
    allow_admin_signup: bool,
}

impl AuthService {
    pub fn new(
        users: Arc<UserService>,
        passwords: Arc<PasswordService>,
        tokens: Arc<TokenService>,
        allow_admin_signup: bool,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
            allow_admin_signup,
        }
    }

    /// Register a new account and sign a session token for it
    pub async fn signup(&self, dto: SignupRequestDto) -> Result<TokenResponseDto> {
        if dto.role == Some(Role::Admin) && !self.allow_admin_signup {
            return Err(AppError::Forbidden(
                "Admin accounts can only be created by an admin".to_string(),
            ));
        }

        let user = self.users.register(dto.into()).await?;
        let token = self.tokens.issue(&AuthenticatedUser::from(&user))?;
        Ok(TokenResponseDto { token })
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<TokenResponseDto> {
        let invalid = || AppError::BadRequest("Invalid credentials".to_string());

        let user = self
            .users
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(invalid)?;

        if !self.passwords.verify(&dto.password, &user.password_hash)? {
            tracing::info!("Failed login attempt for user {}", user.id);
            return Err(invalid());
        }

        let token = self.tokens.issue(&AuthenticatedUser::from(&user))?;
        Ok(TokenResponseDto { token })
    }

    /// Change the caller's own password after checking the current one
    pub async fn change_password(
        &self,
        actor: &AuthenticatedUser,
        dto: ChangePasswordRequestDto,
    ) -> Result<()> {
        let mut user = self.users.get(actor.id).await?;

        if !self
            .passwords
            .verify(&dto.current_password, &user.password_hash)?
        {
            return Err(AppError::Conflict(
                "Current password is incorrect".to_string(),
            ));
        }

        self.users.set_password(&mut user, &dto.new_password).await?;
        tracing::info!("User {} changed their password", user.id);
        Ok(())
    }

    /// Stored profile of the caller
    pub async fn me(&self, actor: &AuthenticatedUser) -> Result<UserResponseDto> {
        Ok(self.users.get(actor.id).await?.into())
    }
}
