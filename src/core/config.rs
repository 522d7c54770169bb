use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::shared::constants::DEFAULT_PASSWORD_MIN_LENGTH;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Populate an empty store with the sample accounts and cases on startup
    pub seed_demo_data: bool,
}

/// Which case/identity store backs the service
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Postgres(DatabaseConfig),
    /// Process-local store; contents are lost on restart
    Memory,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub jwt_leeway: Duration,
    pub allow_admin_signup: bool,
    pub password_min_length: usize,
}

// Keep the signing secret out of logs
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"***")
            .field("token_ttl", &self.token_ttl)
            .field("jwt_leeway", &self.jwt_leeway)
            .field("allow_admin_signup", &self.allow_admin_signup)
            .field("password_min_length", &self.password_min_length)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

/// Read `name` from the environment, falling back to `default` when unset
fn parse_env<T>(name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(name: &str, default: bool) -> Result<bool, String> {
    match env::var(name) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(format!("{} must be a boolean", name)),
        },
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_env("PORT", 5000u16)?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let seed_demo_data = parse_bool("SEED_DEMO_DATA", false)?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            seed_demo_data,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let backend = env::var("STORAGE_BACKEND").unwrap_or_else(|_| "postgres".to_string());

        match backend.trim().to_lowercase().as_str() {
            "postgres" => Ok(StorageConfig::Postgres(DatabaseConfig::from_env()?)),
            "memory" => Ok(StorageConfig::Memory),
            other => Err(format!(
                "STORAGE_BACKEND must be 'postgres' or 'memory', got '{}'",
                other
            )),
        }
    }
}

impl DatabaseConfig {
    // Pool defaults sized for a small deployment
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        Ok(Self {
            url,
            max_connections: parse_env("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_env("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_env(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_env("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: parse_env("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }
}

impl AuthConfig {
    const DEFAULT_TOKEN_TTL_SECS: u64 = 86400; // 1 day
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "JWT_SECRET environment variable is required".to_string())?;

        let token_ttl_secs = parse_env("JWT_EXPIRES_IN_SECS", Self::DEFAULT_TOKEN_TTL_SECS)?;
        let jwt_leeway_secs = parse_env("JWT_LEEWAY", Self::DEFAULT_JWT_LEEWAY_SECS)?;

        Ok(Self {
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
            allow_admin_signup: parse_bool("AUTH_ALLOW_ADMIN_SIGNUP", true)?,
            password_min_length: parse_env("PASSWORD_MIN_LENGTH", DEFAULT_PASSWORD_MIN_LENGTH)?,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "CrimeTrack API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Crime case management API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns distinct variable names so parallel runs do not interfere.

    #[test]
    fn test_parse_env_default_and_override() {
        assert_eq!(parse_env("CRIMETRACK_TEST_UNSET_NUMBER", 42u32), Ok(42));

        env::set_var("CRIMETRACK_TEST_NUMBER", " 7 ");
        assert_eq!(parse_env("CRIMETRACK_TEST_NUMBER", 42u32), Ok(7));

        env::set_var("CRIMETRACK_TEST_BAD_NUMBER", "seven");
        assert!(parse_env("CRIMETRACK_TEST_BAD_NUMBER", 42u32).is_err());
    }

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("CRIMETRACK_TEST_UNSET_FLAG", true), Ok(true));

        env::set_var("CRIMETRACK_TEST_FLAG_OFF", "No");
        assert_eq!(parse_bool("CRIMETRACK_TEST_FLAG_OFF", true), Ok(false));

        env::set_var("CRIMETRACK_TEST_FLAG_BAD", "maybe");
        assert!(parse_bool("CRIMETRACK_TEST_FLAG_BAD", true).is_err());
    }

    #[test]
    fn test_swagger_credentials_need_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: "CrimeTrack API".to_string(),
            version: "0.1.0".to_string(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials().as_deref(), Some("admin:secret"));
    }

    #[test]
    fn test_auth_config_debug_hides_secret() {
        let config = AuthConfig {
            jwt_secret: "super-secret".to_string(),
            token_ttl: Duration::from_secs(60),
            jwt_leeway: Duration::ZERO,
            allow_admin_signup: true,
            password_min_length: 6,
        };
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
