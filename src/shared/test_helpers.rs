use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;

use crate::core::config::AuthConfig;
use crate::core::router::{build_router, AppServices};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::{AuthService, PasswordService, TokenService};
use crate::features::crimes::repository::{CrimeRepository, InMemoryCrimeRepository};
use crate::features::crimes::CrimeService;
use crate::features::users::dtos::CreateUserDto;
use crate::features::users::models::{Role, User};
use crate::features::users::repository::{InMemoryUserRepository, UserRepository};
use crate::features::users::UserService;
use crate::shared::constants::AUTH_TOKEN_HEADER;

/// Password given to every account made through the helpers below
pub const TEST_PASSWORD: &str = "officer123";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-signing-secret".to_string(),
        token_ttl: Duration::from_secs(3600),
        jwt_leeway: Duration::from_secs(0),
        allow_admin_signup: true,
        password_min_length: 6,
    }
}

/// Full service graph over the in-memory stores
pub struct TestContext {
    pub services: AppServices,
    pub users: Arc<UserService>,
    pub passwords: Arc<PasswordService>,
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
    pub crimes: Arc<CrimeService>,
    pub user_repo: Arc<dyn UserRepository>,
    pub crime_repo: Arc<dyn CrimeRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(test_auth_config())
    }

    pub fn with_admin_signup(allow: bool) -> Self {
        Self::with_config(AuthConfig {
            allow_admin_signup: allow,
            ..test_auth_config()
        })
    }

    fn with_config(config: AuthConfig) -> Self {
        let user_repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let crime_repo: Arc<dyn CrimeRepository> = Arc::new(InMemoryCrimeRepository::new());
        let services = AppServices::new(Arc::clone(&user_repo), Arc::clone(&crime_repo), &config);

        Self {
            users: Arc::clone(&services.users),
            passwords: Arc::new(PasswordService::new(config.password_min_length)),
            tokens: Arc::clone(&services.tokens),
            auth: Arc::clone(&services.auth),
            crimes: Arc::clone(&services.crimes),
            services,
            user_repo,
            crime_repo,
        }
    }

    async fn create_user(&self, email: &str, role: Role) -> User {
        let name = email.split('@').next().unwrap_or(email).to_string();
        self.users
            .register(CreateUserDto {
                name,
                email: email.to_string(),
                password: TEST_PASSWORD.to_string(),
                role: Some(role),
                department: None,
                badge_number: None,
            })
            .await
            .unwrap()
    }

    pub async fn create_officer(&self, email: &str) -> User {
        self.create_user(email, Role::User).await
    }

    pub async fn create_admin(&self, email: &str) -> User {
        self.create_user(email, Role::Admin).await
    }

    /// Signed session token for `user`
    pub fn token_for(&self, user: &User) -> String {
        self.tokens.issue(&AuthenticatedUser::from(user)).unwrap()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(build_router(&self.services)).unwrap()
    }
}

pub fn admin_identity(user: &User) -> AuthenticatedUser {
    assert_eq!(user.role, Role::Admin);
    AuthenticatedUser::from(user)
}

pub fn officer_identity(user: &User) -> AuthenticatedUser {
    assert_eq!(user.role, Role::User);
    AuthenticatedUser::from(user)
}

/// `x-auth-token` header pair for axum-test requests
pub fn auth_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(AUTH_TOKEN_HEADER),
        HeaderValue::from_str(token).unwrap(),
    )
}

/// Migrated pool for the Postgres repository tests. Those tests are
/// `#[ignore]`d and run with `cargo test -- --ignored` against `DATABASE_URL`.
pub async fn migrated_pool() -> sqlx::PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for Postgres tests");
    let pool = sqlx::PgPool::connect(&url).await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}
