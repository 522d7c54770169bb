//! Persistence seam for user records.
//!
//! `PgUserRepository` is the production store; `InMemoryUserRepository` backs the
//! `memory` storage mode and the test suite. Both report a duplicate email as
//! `AppError::Conflict`.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::users::models::{NewUser, User};

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, newest first
    async fn list(&self) -> Result<Vec<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Lookup by normalized (lowercase, trimmed) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Users matching any of `ids`; unknown ids are skipped
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>>;

    async fn insert(&self, user: NewUser) -> Result<User>;

    /// Persist every field of `user`. Returns `false` if the record no longer exists.
    async fn save(&self, user: &User) -> Result<bool>;

    /// Hard delete. Returns `false` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn count(&self) -> Result<i64>;
}
