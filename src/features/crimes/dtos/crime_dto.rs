use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::crimes::models::{
    Crime, CrimeStatus, CrimeType, Evidence, Severity, Suspect,
};
use crate::features::users::dtos::UserRefDto;

pub const MSG_MISSING_REQUIRED: &str =
    "Please provide all required fields: caseNumber, title, crimeType, location";

/// Request DTO for opening a case.
///
/// `caseNumber`, `title`, `crimeType` and `location` are required. The service
/// checks presence so a blank value gets the same message as a missing one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCrimeDto {
    #[validate(length(max = 64, message = "Case number must not exceed 64 characters"))]
    pub case_number: Option<String>,

    #[validate(length(max = 255, message = "Title must not exceed 255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub crime_type: Option<CrimeType>,

    #[validate(length(max = 255, message = "Location must not exceed 255 characters"))]
    pub location: Option<String>,

    /// RFC 3339 timestamp or `YYYY-MM-DD`; defaults to now
    #[serde(
        default,
        deserialize_with = "crate::shared::types::flexible_datetime::deserialize"
    )]
    pub date_occurred: Option<DateTime<Utc>>,

    pub status: Option<CrimeStatus>,

    pub severity: Option<Severity>,

    pub suspects: Option<Vec<Suspect>>,

    pub evidence: Option<Vec<Evidence>>,

    /// User ids
    pub assigned_officers: Option<Vec<Uuid>>,
}

/// Request DTO for updating a case. Omitted, `null` or empty-string fields keep
/// their stored value; list fields replace the stored list when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCrimeDto {
    #[validate(length(max = 64, message = "Case number must not exceed 64 characters"))]
    pub case_number: Option<String>,

    #[validate(length(max = 255, message = "Title must not exceed 255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub crime_type: Option<CrimeType>,

    #[validate(length(max = 255, message = "Location must not exceed 255 characters"))]
    pub location: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::shared::types::flexible_datetime::deserialize"
    )]
    pub date_occurred: Option<DateTime<Utc>>,

    pub status: Option<CrimeStatus>,

    pub severity: Option<Severity>,

    pub suspects: Option<Vec<Suspect>>,

    pub evidence: Option<Vec<Evidence>>,

    pub assigned_officers: Option<Vec<Uuid>>,
}

/// A case with its reporter and officers resolved to `{_id, name, email}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrimeResponseDto {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub case_number: String,
    pub title: String,
    pub description: String,
    pub crime_type: CrimeType,
    pub location: String,
    pub date_occurred: DateTime<Utc>,
    pub date_reported: DateTime<Utc>,
    pub status: CrimeStatus,
    pub severity: Severity,
    pub suspects: Vec<Suspect>,
    pub evidence: Vec<Evidence>,
    pub assigned_officers: Vec<UserRefDto>,
    /// `null` when the reporting account has been deleted
    pub reported_by: Option<UserRefDto>,
    pub last_updated: DateTime<Utc>,
}

impl CrimeResponseDto {
    /// Build the response, resolving user references through `people`.
    /// Ids missing from `people` are dropped.
    pub fn populate(crime: Crime, people: &HashMap<Uuid, UserRefDto>) -> Self {
        Self {
            id: crime.id,
            case_number: crime.case_number,
            title: crime.title,
            description: crime.description,
            crime_type: crime.crime_type,
            location: crime.location,
            date_occurred: crime.date_occurred,
            date_reported: crime.date_reported,
            status: crime.status,
            severity: crime.severity,
            suspects: crime.suspects,
            evidence: crime.evidence,
            assigned_officers: crime
                .assigned_officers
                .iter()
                .filter_map(|id| people.get(id).cloned())
                .collect(),
            reported_by: people.get(&crime.reported_by).cloned(),
            last_updated: crime.last_updated,
        }
    }
}

/// Optional filters for listing cases. They only narrow what the caller may see.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CrimeListQuery {
    /// Case-insensitive match on case number, title or description
    pub search: Option<String>,
    pub crime_type: Option<CrimeType>,
    pub status: Option<CrimeStatus>,
    pub severity: Option<Severity>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    /// Earliest occurrence date, inclusive (YYYY-MM-DD)
    pub date_from: Option<NaiveDate>,
    /// Latest occurrence date, inclusive (YYYY-MM-DD)
    pub date_to: Option<NaiveDate>,
}

impl CrimeListQuery {
    pub fn matches(&self, crime: &Crime) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };

        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !(contains(&crime.case_number, search)
                || contains(&crime.title, search)
                || contains(&crime.description, search))
            {
                return false;
            }
        }
        if let Some(location) = self.location.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !contains(&crime.location, location) {
                return false;
            }
        }
        if self.crime_type.is_some_and(|t| t != crime.crime_type)
            || self.status.is_some_and(|s| s != crime.status)
            || self.severity.is_some_and(|s| s != crime.severity)
        {
            return false;
        }

        let occurred = crime.date_occurred.date_naive();
        if self.date_from.is_some_and(|from| occurred < from)
            || self.date_to.is_some_and(|to| occurred > to)
        {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CrimeTypeCountDto {
    #[serde(rename = "_id")]
    pub crime_type: CrimeType,
    pub count: i64,
}

/// Admin dashboard overview
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrimeStatsDto {
    pub total_crimes: i64,
    pub open_cases: i64,
    pub under_investigation: i64,
    pub closed_cases: i64,
    pub total_users: i64,
    pub crimes_by_type: Vec<CrimeTypeCountDto>,
    pub recent_crimes: Vec<CrimeResponseDto>,
}
