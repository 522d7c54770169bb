use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::CrimeRepository;
use crate::core::error::{AppError, Result};
use crate::features::crimes::models::{Crime, CrimeStatus, CrimeSummary, NewCrime};
use crate::features::crimes::policy::CrimeScope;
use crate::shared::constants::MSG_CASE_NUMBER_EXISTS;

#[derive(Default)]
pub struct InMemoryCrimeRepository {
    crimes: RwLock<HashMap<Uuid, Crime>>,
}

impl InMemoryCrimeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(crimes: &mut [Crime]) {
    crimes.sort_by(|a, b| {
        b.date_reported
            .cmp(&a.date_reported)
            .then(b.id.cmp(&a.id))
    });
}

#[async_trait]
impl CrimeRepository for InMemoryCrimeRepository {
    async fn list(&self, scope: CrimeScope) -> Result<Vec<Crime>> {
        let mut crimes: Vec<Crime> = self
            .crimes
            .read()
            .values()
            .filter(|c| scope.permits(c))
            .cloned()
            .collect();
        newest_first(&mut crimes);
        Ok(crimes)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Crime>> {
        Ok(self.crimes.read().get(&id).cloned())
    }

    async fn find_by_case_number(&self, case_number: &str) -> Result<Option<Crime>> {
        Ok(self
            .crimes
            .read()
            .values()
            .find(|c| c.case_number == case_number)
            .cloned())
    }

    async fn insert(&self, crime: NewCrime) -> Result<Crime> {
        let mut crimes = self.crimes.write();
        if crimes.values().any(|c| c.case_number == crime.case_number) {
            return Err(AppError::Conflict(MSG_CASE_NUMBER_EXISTS.to_string()));
        }
        let crime = crime.into_crime(Uuid::now_v7(), Utc::now());
        crimes.insert(crime.id, crime.clone());
        Ok(crime)
    }

    async fn save(&self, crime: &Crime) -> Result<bool> {
        let mut crimes = self.crimes.write();
        if crimes
            .values()
            .any(|c| c.id != crime.id && c.case_number == crime.case_number)
        {
            return Err(AppError::Conflict(MSG_CASE_NUMBER_EXISTS.to_string()));
        }
        match crimes.get_mut(&crime.id) {
            Some(stored) => {
                *stored = crime.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.crimes.write().remove(&id).is_some())
    }

    async fn summary(&self) -> Result<CrimeSummary> {
        let crimes = self.crimes.read();
        let count_status =
            |status: CrimeStatus| crimes.values().filter(|c| c.status == status).count() as i64;

        let mut by_type = HashMap::new();
        for crime in crimes.values() {
            *by_type.entry(crime.crime_type).or_insert(0i64) += 1;
        }

        Ok(CrimeSummary {
            total: crimes.len() as i64,
            open: count_status(CrimeStatus::Open),
            under_investigation: count_status(CrimeStatus::UnderInvestigation),
            closed: count_status(CrimeStatus::Closed),
            by_type: by_type.into_iter().collect(),
        })
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Crime>> {
        let mut crimes: Vec<Crime> = self.crimes.read().values().cloned().collect();
        newest_first(&mut crimes);
        crimes.truncate(limit);
        Ok(crimes)
    }
}
