/// Header carrying the session token on authenticated requests
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Minimum password length unless overridden by configuration
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 6;

/// Number of cases listed under `recentCrimes` in the statistics overview
pub const RECENT_CRIMES_LIMIT: usize = 5;

// =============================================================================
// MESSAGES
// =============================================================================

pub const MSG_NO_TOKEN: &str = "No token, authorization denied";

pub const MSG_INVALID_TOKEN: &str = "Token is not valid";

pub const MSG_ADMIN_ONLY: &str = "Access denied. Admin only.";

pub const MSG_CRIME_NOT_FOUND: &str = "Crime record not found";

pub const MSG_USER_NOT_FOUND: &str = "User not found";

pub const MSG_CASE_NUMBER_EXISTS: &str = "Case number already exists";

pub const MSG_USER_EXISTS: &str = "User already exists";
