use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::CrimeRepository;
use crate::core::database::unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::crimes::models::{Crime, CrimeSummary, CrimeType, NewCrime};
use crate::features::crimes::policy::CrimeScope;
use crate::shared::constants::MSG_CASE_NUMBER_EXISTS;

const CRIME_COLUMNS: &str = r#"
    id, case_number, title, description, crime_type, location, date_occurred,
    date_reported, status, severity, suspects, evidence, assigned_officers,
    reported_by, last_updated
"#;

pub struct PgCrimeRepository {
    pool: PgPool,
}

impl PgCrimeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if unique_violation(&e).is_some() {
        return AppError::Conflict(MSG_CASE_NUMBER_EXISTS.to_string());
    }
    tracing::error!("Failed to write crime: {:?}", e);
    AppError::Database(e)
}

fn map_read_error(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("Failed to {}: {:?}", context, e);
        AppError::Database(e)
    }
}

#[async_trait]
impl CrimeRepository for PgCrimeRepository {
    async fn list(&self, scope: CrimeScope) -> Result<Vec<Crime>> {
        let query = match scope {
            CrimeScope::All => {
                let sql = format!(
                    "SELECT {} FROM crimes ORDER BY date_reported DESC, id DESC",
                    CRIME_COLUMNS
                );
                sqlx::query_as::<_, Crime>(&sql)
                    .fetch_all(&self.pool)
                    .await
            }
            CrimeScope::VisibleTo(user_id) => {
                let sql = format!(
                    r#"
                    SELECT {} FROM crimes
                    WHERE reported_by = $1 OR $1 = ANY(assigned_officers)
                    ORDER BY date_reported DESC, id DESC
                    "#,
                    CRIME_COLUMNS
                );
                sqlx::query_as::<_, Crime>(&sql)
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await
            }
        };
        query.map_err(map_read_error("list crimes"))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Crime>> {
        let sql = format!("SELECT {} FROM crimes WHERE id = $1", CRIME_COLUMNS);
        sqlx::query_as::<_, Crime>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error("get crime by id"))
    }

    async fn find_by_case_number(&self, case_number: &str) -> Result<Option<Crime>> {
        let sql = format!("SELECT {} FROM crimes WHERE case_number = $1", CRIME_COLUMNS);
        sqlx::query_as::<_, Crime>(&sql)
            .bind(case_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error("get crime by case number"))
    }

    async fn insert(&self, crime: NewCrime) -> Result<Crime> {
        let crime = crime.into_crime(Uuid::now_v7(), Utc::now());
        let sql = format!(
            r#"
            INSERT INTO crimes (
                id, case_number, title, description, crime_type, location, date_occurred,
                date_reported, status, severity, suspects, evidence, assigned_officers,
                reported_by, last_updated
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            CRIME_COLUMNS
        );
        sqlx::query_as::<_, Crime>(&sql)
            .bind(crime.id)
            .bind(&crime.case_number)
            .bind(&crime.title)
            .bind(&crime.description)
            .bind(crime.crime_type)
            .bind(&crime.location)
            .bind(crime.date_occurred)
            .bind(crime.date_reported)
            .bind(crime.status)
            .bind(crime.severity)
            .bind(Json(&crime.suspects))
            .bind(Json(&crime.evidence))
            .bind(&crime.assigned_officers)
            .bind(crime.reported_by)
            .bind(crime.last_updated)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn save(&self, crime: &Crime) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE crimes
            SET case_number = $2, title = $3, description = $4, crime_type = $5,
                location = $6, date_occurred = $7, status = $8, severity = $9,
                suspects = $10, evidence = $11, assigned_officers = $12,
                last_updated = $13
            WHERE id = $1
            "#,
        )
        .bind(crime.id)
        .bind(&crime.case_number)
        .bind(&crime.title)
        .bind(&crime.description)
        .bind(crime.crime_type)
        .bind(&crime.location)
        .bind(crime.date_occurred)
        .bind(crime.status)
        .bind(crime.severity)
        .bind(Json(&crime.suspects))
        .bind(Json(&crime.evidence))
        .bind(&crime.assigned_officers)
        .bind(crime.last_updated)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM crimes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_read_error("delete crime"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn summary(&self) -> Result<CrimeSummary> {
        let (total, open, under_investigation, closed) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                r#"
                SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'Open'),
                    COUNT(*) FILTER (WHERE status = 'Under Investigation'),
                    COUNT(*) FILTER (WHERE status = 'Closed')
                FROM crimes
                "#,
            )
            .fetch_one(&self.pool)
            .await
            .map_err(map_read_error("count crimes"))?;

        let by_type = sqlx::query_as::<_, (CrimeType, i64)>(
            "SELECT crime_type, COUNT(*) FROM crimes GROUP BY crime_type",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_read_error("group crimes by type"))?;

        Ok(CrimeSummary {
            total,
            open,
            under_investigation,
            closed,
            by_type,
        })
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Crime>> {
        let sql = format!(
            "SELECT {} FROM crimes ORDER BY date_reported DESC, id DESC LIMIT $1",
            CRIME_COLUMNS
        );
        sqlx::query_as::<_, Crime>(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error("get recent crimes"))
    }
}
