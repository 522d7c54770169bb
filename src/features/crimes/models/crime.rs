use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Crime category matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "crime_type")]
pub enum CrimeType {
    Theft,
    Assault,
    Fraud,
    Burglary,
    Homicide,
    Cybercrime,
    #[serde(rename = "Drug Offense")]
    #[sqlx(rename = "Drug Offense")]
    DrugOffense,
    Vandalism,
    Other,
}

impl CrimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrimeType::Theft => "Theft",
            CrimeType::Assault => "Assault",
            CrimeType::Fraud => "Fraud",
            CrimeType::Burglary => "Burglary",
            CrimeType::Homicide => "Homicide",
            CrimeType::Cybercrime => "Cybercrime",
            CrimeType::DrugOffense => "Drug Offense",
            CrimeType::Vandalism => "Vandalism",
            CrimeType::Other => "Other",
        }
    }
}

/// Case lifecycle status matching database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "crime_status")]
pub enum CrimeStatus {
    #[default]
    Open,
    #[serde(rename = "Under Investigation")]
    #[sqlx(rename = "Under Investigation")]
    UnderInvestigation,
    Closed,
    Suspended,
}

impl CrimeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrimeStatus::Open => "Open",
            CrimeStatus::UnderInvestigation => "Under Investigation",
            CrimeStatus::Closed => "Closed",
            CrimeStatus::Suspended => "Suspended",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Type,
    ToSchema,
)]
#[sqlx(type_name = "crime_severity")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(CrimeType, CrimeStatus, Severity);

/// Person of interest attached to a case. Stored as JSONB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Suspect {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Evidence item attached to a case. Stored as JSONB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::shared::types::flexible_datetime::deserialize"
    )]
    pub collected_date: Option<DateTime<Utc>>,
}

/// Database model for a crime case
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Crime {
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
    #[sqlx(json)]
    pub suspects: Vec<Suspect>,
    #[sqlx(json)]
    pub evidence: Vec<Evidence>,
    pub assigned_officers: Vec<Uuid>,
    pub reported_by: Uuid,
    pub last_updated: DateTime<Utc>,
}

impl Crime {
    /// Whether `user_id` reported this case or is assigned to it
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.reported_by == user_id || self.assigned_officers.contains(&user_id)
    }
}

/// Data for creating a new case. Timestamps are stamped by the store.
#[derive(Debug, Clone)]
pub struct NewCrime {
    pub case_number: String,
    pub title: String,
    pub description: String,
    pub crime_type: CrimeType,
    pub location: String,
    pub date_occurred: Option<DateTime<Utc>>,
    pub status: CrimeStatus,
    pub severity: Severity,
    pub suspects: Vec<Suspect>,
    pub evidence: Vec<Evidence>,
    pub assigned_officers: Vec<Uuid>,
    pub reported_by: Uuid,
}

impl NewCrime {
    /// Build the stored record; `dateOccurred` falls back to the creation time
    pub fn into_crime(self, id: Uuid, now: DateTime<Utc>) -> Crime {
        Crime {
            id,
            case_number: self.case_number,
            title: self.title,
            description: self.description,
            crime_type: self.crime_type,
            location: self.location,
            date_occurred: self.date_occurred.unwrap_or(now),
            date_reported: now,
            status: self.status,
            severity: self.severity,
            suspects: self.suspects,
            evidence: self.evidence,
            assigned_officers: self.assigned_officers,
            reported_by: self.reported_by,
            last_updated: now,
        }
    }
}

/// Field-level changes to a case; `None` keeps the stored value.
/// List fields replace the stored list wholesale, including with an empty list.
#[derive(Debug, Clone, Default)]
pub struct CrimeChanges {
    pub case_number: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub crime_type: Option<CrimeType>,
    pub location: Option<String>,
    pub date_occurred: Option<DateTime<Utc>>,
    pub status: Option<CrimeStatus>,
    pub severity: Option<Severity>,
    pub suspects: Option<Vec<Suspect>>,
    pub evidence: Option<Vec<Evidence>>,
    pub assigned_officers: Option<Vec<Uuid>>,
}

impl CrimeChanges {
    pub fn apply(self, crime: &mut Crime, now: DateTime<Utc>) {
        if let Some(case_number) = self.case_number {
            crime.case_number = case_number;
        }
        if let Some(title) = self.title {
            crime.title = title;
        }
        if let Some(description) = self.description {
            crime.description = description;
        }
        if let Some(crime_type) = self.crime_type {
            crime.crime_type = crime_type;
        }
        if let Some(location) = self.location {
            crime.location = location;
        }
        if let Some(date_occurred) = self.date_occurred {
            crime.date_occurred = date_occurred;
        }
        if let Some(status) = self.status {
            crime.status = status;
        }
        if let Some(severity) = self.severity {
            crime.severity = severity;
        }
        if let Some(suspects) = self.suspects {
            crime.suspects = suspects;
        }
        if let Some(evidence) = self.evidence {
            crime.evidence = evidence;
        }
        if let Some(assigned_officers) = self.assigned_officers {
            crime.assigned_officers = assigned_officers;
        }
        crime.last_updated = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CRIME_TYPES: [CrimeType; 9] = [
        CrimeType::Theft,
        CrimeType::Assault,
        CrimeType::Fraud,
        CrimeType::Burglary,
        CrimeType::Homicide,
        CrimeType::Cybercrime,
        CrimeType::DrugOffense,
        CrimeType::Vandalism,
        CrimeType::Other,
    ];

    fn sample(reported_by: Uuid, assigned: Vec<Uuid>) -> Crime {
        NewCrime {
            case_number: "CR-2024-001".to_string(),
            title: "Residential Burglary".to_string(),
            description: String::new(),
            crime_type: CrimeType::Burglary,
            location: "123 Main Street, Downtown".to_string(),
            date_occurred: None,
            status: CrimeStatus::default(),
            severity: Severity::default(),
            suspects: vec![],
            evidence: vec![],
            assigned_officers: assigned,
            reported_by,
        }
        .into_crime(Uuid::now_v7(), Utc::now())
    }

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(
            serde_json::to_value(CrimeType::DrugOffense).unwrap(),
            "Drug Offense"
        );
        assert_eq!(
            serde_json::to_value(CrimeStatus::UnderInvestigation).unwrap(),
            "Under Investigation"
        );
        assert_eq!(
            serde_json::from_value::<Severity>(serde_json::json!("Critical")).unwrap(),
            Severity::Critical
        );
        assert!(serde_json::from_value::<CrimeStatus>(serde_json::json!("Reopened")).is_err());
        assert!(serde_json::from_value::<CrimeType>(serde_json::json!("theft")).is_err());

        for t in ALL_CRIME_TYPES {
            assert_eq!(serde_json::to_value(t).unwrap(), t.as_str());
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(CrimeStatus::default(), CrimeStatus::Open);
        assert_eq!(Severity::default(), Severity::Medium);

        let crime = sample(Uuid::now_v7(), vec![]);
        assert_eq!(crime.date_occurred, crime.date_reported);
        assert_eq!(crime.last_updated, crime.date_reported);
    }

    #[test]
    fn test_involves() {
        let reporter = Uuid::now_v7();
        let officer = Uuid::now_v7();
        let crime = sample(reporter, vec![officer]);

        assert!(crime.involves(reporter));
        assert!(crime.involves(officer));
        assert!(!crime.involves(Uuid::now_v7()));
    }

    #[test]
    fn test_changes_keep_omitted_fields_and_replace_lists() {
        let officer = Uuid::now_v7();
        let mut crime = sample(Uuid::now_v7(), vec![officer]);
        let before = crime.clone();
        let later = before.last_updated + chrono::Duration::minutes(5);

        CrimeChanges {
            status: Some(CrimeStatus::Closed),
            assigned_officers: Some(vec![]),
            ..Default::default()
        }
        .apply(&mut crime, later);

        assert_eq!(crime.status, CrimeStatus::Closed);
        assert!(crime.assigned_officers.is_empty());
        assert_eq!(crime.title, before.title);
        assert_eq!(crime.case_number, before.case_number);
        assert_eq!(crime.date_reported, before.date_reported);
        assert_eq!(crime.last_updated, later);
    }

    #[test]
    fn test_evidence_accepts_bare_dates_and_type_key() {
        let evidence: Evidence = serde_json::from_value(serde_json::json!({
            "type": "Fingerprints",
            "collectedDate": "2024-10-16"
        }))
        .unwrap();
        assert_eq!(evidence.kind.as_deref(), Some("Fingerprints"));
        assert!(evidence.collected_date.is_some());

        let value = serde_json::to_value(&evidence).unwrap();
        assert_eq!(value["type"], "Fingerprints");
        assert!(value["collectedDate"].is_string());
    }
}
