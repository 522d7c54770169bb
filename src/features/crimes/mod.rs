//! Crime case management feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/crimes` | List visible cases, with optional filters |
//! | GET | `/api/crimes/stats/overview` | Dashboard counters (admin) |
//! | GET | `/api/crimes/{id}` | Get a case the caller may see |
//! | POST | `/api/crimes` | Open a case (admin) |
//! | PUT | `/api/crimes/{id}` | Update a case (admin) |
//! | DELETE | `/api/crimes/{id}` | Delete a case (admin) |
//!
//! Admins see every case. Other users see the cases they reported or are
//! assigned to; see [`policy`].

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod repository;
pub mod routes;
pub mod services;

pub use services::CrimeService;
