pub mod auth;
pub mod crimes;
pub mod users;
