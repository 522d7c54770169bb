//! Sample accounts and cases for demos and local development.
//!
//! Runs only when `SEED_DEMO_DATA=true` and the user store is empty, so an
//! existing deployment is never touched.

use chrono::{NaiveDate, Utc};

use crate::core::error::Result;
use crate::features::crimes::models::{
    CrimeStatus, CrimeType, Evidence, NewCrime, Severity, Suspect,
};
use crate::features::crimes::repository::CrimeRepository;
use crate::features::users::dtos::CreateUserDto;
use crate::features::users::models::{Role, User};
use crate::features::users::repository::UserRepository;
use crate::features::users::UserService;

struct SampleUser {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
    department: &'static str,
    badge_number: &'static str,
}

const SAMPLE_USERS: [SampleUser; 3] = [
    SampleUser {
        name: "Admin User",
        email: "admin@crimetrack.com",
        password: "admin123",
        role: Role::Admin,
        department: "Administration",
        badge_number: "ADM-001",
    },
    SampleUser {
        name: "Officer Smith",
        email: "smith@crimetrack.com",
        password: "officer123",
        role: Role::User,
        department: "Patrol",
        badge_number: "OFF-001",
    },
    SampleUser {
        name: "Officer Johnson",
        email: "johnson@crimetrack.com",
        password: "officer123",
        role: Role::User,
        department: "Investigations",
        badge_number: "OFF-002",
    },
];

fn suspects(names: &[&str]) -> Vec<Suspect> {
    names
        .iter()
        .map(|name| Suspect {
            name: name.to_string(),
            ..Default::default()
        })
        .collect()
}

fn evidence(items: &[&str]) -> Vec<Evidence> {
    items
        .iter()
        .map(|item| Evidence {
            description: Some(item.to_string()),
            ..Default::default()
        })
        .collect()
}

fn occurred(year: i32, month: u32, day: u32) -> Option<chrono::DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}

/// Insert the sample data if the store has no users yet.
/// Returns `true` when data was written.
pub async fn seed_demo_data(
    users: &UserService,
    user_repo: &dyn UserRepository,
    crimes: &dyn CrimeRepository,
) -> Result<bool> {
    if user_repo.count().await? > 0 {
        tracing::info!("Store already has users, skipping demo data");
        return Ok(false);
    }

    let mut created: Vec<User> = Vec::with_capacity(SAMPLE_USERS.len());
    for sample in &SAMPLE_USERS {
        let user = users
            .register(CreateUserDto {
                name: sample.name.to_string(),
                email: sample.email.to_string(),
                password: sample.password.to_string(),
                role: Some(sample.role),
                department: Some(sample.department.to_string()),
                badge_number: Some(sample.badge_number.to_string()),
            })
            .await?;
        created.push(user);
    }

    let (admin, smith, johnson) = (created[0].id, created[1].id, created[2].id);

    let cases = vec![
        NewCrime {
            case_number: "CR-2024-001".to_string(),
            title: "Residential Burglary".to_string(),
            description: "Break-in at 123 Main Street, valuables stolen including electronics and jewelry.".to_string(),
            crime_type: CrimeType::Burglary,
            location: "123 Main Street, Downtown".to_string(),
            date_occurred: occurred(2024, 10, 15),
            status: CrimeStatus::UnderInvestigation,
            severity: Severity::High,
            suspects: suspects(&["John Doe", "Jane Smith"]),
            evidence: evidence(&["Security footage", "Fingerprints"]),
            assigned_officers: vec![smith],
            reported_by: admin,
        },
        NewCrime {
            case_number: "CR-2024-002".to_string(),
            title: "Theft of Vehicle".to_string(),
            description: "Honda Civic stolen from parking lot. Vehicle was unlocked.".to_string(),
            crime_type: CrimeType::Theft,
            location: "Central Parking Lot".to_string(),
            date_occurred: occurred(2024, 10, 20),
            status: CrimeStatus::Open,
            severity: Severity::Medium,
            suspects: vec![],
            evidence: evidence(&["Witness statements"]),
            assigned_officers: vec![johnson],
            reported_by: smith,
        },
        NewCrime {
            case_number: "CR-2024-003".to_string(),
            title: "Cyber Fraud".to_string(),
            description: "Online banking fraud resulting in $5,000 loss.".to_string(),
            crime_type: CrimeType::Fraud,
            location: "Online".to_string(),
            date_occurred: occurred(2024, 10, 18),
            status: CrimeStatus::Closed,
            severity: Severity::Medium,
            suspects: suspects(&["Unknown hacker"]),
            evidence: evidence(&["Transaction logs", "IP addresses"]),
            assigned_officers: vec![smith],
            reported_by: johnson,
        },
        NewCrime {
            case_number: "CR-2024-004".to_string(),
            title: "Assault Incident".to_string(),
            description: "Physical altercation at local bar, victim sustained minor injuries.".to_string(),
            crime_type: CrimeType::Assault,
            location: "Downtown Bar & Grill".to_string(),
            date_occurred: occurred(2024, 10, 22),
            status: CrimeStatus::UnderInvestigation,
            severity: Severity::High,
            suspects: suspects(&["Suspect A", "Suspect B"]),
            evidence: evidence(&["Medical reports", "Witness testimony"]),
            assigned_officers: vec![johnson],
            reported_by: admin,
        },
        NewCrime {
            case_number: "CR-2024-005".to_string(),
            title: "Drug Possession".to_string(),
            description: "Small quantity of controlled substances found during traffic stop.".to_string(),
            crime_type: CrimeType::DrugOffense,
            location: "Highway 101".to_string(),
            date_occurred: occurred(2024, 10, 25),
            status: CrimeStatus::Open,
            severity: Severity::Low,
            suspects: suspects(&["Driver of vehicle"]),
            evidence: evidence(&["Drug test results", "Physical evidence"]),
            assigned_officers: vec![smith],
            reported_by: smith,
        },
    ];

    let case_count = cases.len();
    for case in cases {
        crimes.insert(case).await?;
    }

    tracing::info!(
        "Seeded {} demo users and {} demo cases",
        created.len(),
        case_count
    );
    Ok(true)
}
