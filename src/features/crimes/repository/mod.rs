//! Persistence seam for crime cases.
//!
//! Both backends enforce case-number uniqueness at write time (a `UNIQUE`
//! constraint in Postgres, the write lock in memory) and report a clash as
//! `AppError::Conflict`, so two concurrent creates cannot both succeed.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::crimes::models::{Crime, CrimeSummary, NewCrime};
use crate::features::crimes::policy::CrimeScope;

pub use memory::InMemoryCrimeRepository;
pub use postgres::PgCrimeRepository;

#[async_trait]
pub trait CrimeRepository: Send + Sync {
    /// Cases within `scope`, most recently reported first
    async fn list(&self, scope: CrimeScope) -> Result<Vec<Crime>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Crime>>;

    async fn find_by_case_number(&self, case_number: &str) -> Result<Option<Crime>>;

    async fn insert(&self, crime: NewCrime) -> Result<Crime>;

    /// Persist every field of `crime`. Returns `false` if the record no longer exists.
    async fn save(&self, crime: &Crime) -> Result<bool>;

    /// Hard delete. Returns `false` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn summary(&self) -> Result<CrimeSummary>;

    /// The `limit` most recently reported cases
    async fn recent(&self, limit: usize) -> Result<Vec<Crime>>;
}
