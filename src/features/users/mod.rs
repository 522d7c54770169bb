//! User account management feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users` | List all users (admin) |
//! | POST | `/api/users` | Create a user with any role (admin) |
//! | PUT | `/api/users/{id}` | Update profile, role or password (admin) |
//! | DELETE | `/api/users/{id}` | Delete a user (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use services::UserService;
