//! Access-control rules for crime cases.
//!
//! Everything here is pure: the service asks for a decision before it touches
//! the store, and listing is narrowed by a [`CrimeScope`] every repository
//! backend knows how to evaluate.

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::crimes::models::Crime;
use crate::shared::constants::MSG_ADMIN_ONLY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrimeAction {
    List,
    Read,
    Create,
    Update,
    Delete,
    Stats,
}

impl CrimeAction {
    fn requires_admin(self) -> bool {
        matches!(
            self,
            CrimeAction::Create | CrimeAction::Update | CrimeAction::Delete | CrimeAction::Stats
        )
    }
}

/// Which cases a caller may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrimeScope {
    All,
    /// Cases the user reported or is assigned to
    VisibleTo(Uuid),
}

impl CrimeScope {
    pub fn for_user(actor: &AuthenticatedUser) -> Self {
        if actor.is_admin() {
            CrimeScope::All
        } else {
            CrimeScope::VisibleTo(actor.id)
        }
    }

    pub fn permits(&self, crime: &Crime) -> bool {
        match self {
            CrimeScope::All => true,
            CrimeScope::VisibleTo(user_id) => crime.involves(*user_id),
        }
    }
}

/// Role check for `action`. Runs before any store access.
pub fn authorize(actor: &AuthenticatedUser, action: CrimeAction) -> Result<()> {
    if action.requires_admin() && !actor.is_admin() {
        return Err(AppError::Forbidden(MSG_ADMIN_ONLY.to_string()));
    }
    Ok(())
}

/// Ownership check for reading a single case
pub fn ensure_can_view(actor: &AuthenticatedUser, crime: &Crime) -> Result<()> {
    if CrimeScope::for_user(actor).permits(crime) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Access denied".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::crimes::models::{CrimeStatus, CrimeType, NewCrime, Severity};
    use crate::features::crimes::repository::{CrimeRepository, InMemoryCrimeRepository};
    use crate::features::users::models::Role;
    use chrono::Utc;
    use proptest::prelude::*;

    fn identity(id: Uuid, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            role,
            name: "Test".to_string(),
            email: format!("{}@crimetrack.com", id.simple()),
        }
    }

    fn new_crime(case_number: String, reported_by: Uuid, assigned: Vec<Uuid>) -> NewCrime {
        NewCrime {
            case_number,
            title: "Case".to_string(),
            description: String::new(),
            crime_type: CrimeType::Other,
            location: "Somewhere".to_string(),
            date_occurred: None,
            status: CrimeStatus::Open,
            severity: Severity::Low,
            suspects: vec![],
            evidence: vec![],
            assigned_officers: assigned,
            reported_by,
        }
    }

    #[test]
    fn test_authorize_by_role() {
        let admin = identity(Uuid::now_v7(), Role::Admin);
        let user = identity(Uuid::now_v7(), Role::User);

        for action in [
            CrimeAction::List,
            CrimeAction::Read,
            CrimeAction::Create,
            CrimeAction::Update,
            CrimeAction::Delete,
            CrimeAction::Stats,
        ] {
            assert!(authorize(&admin, action).is_ok());
            let result = authorize(&user, action);
            if action.requires_admin() {
                assert!(matches!(result, Err(AppError::Forbidden(msg)) if msg == MSG_ADMIN_ONLY));
            } else {
                assert!(result.is_ok());
            }
        }
    }

    #[test]
    fn test_ensure_can_view() {
        let reporter = identity(Uuid::now_v7(), Role::User);
        let officer = identity(Uuid::now_v7(), Role::User);
        let stranger = identity(Uuid::now_v7(), Role::User);
        let admin = identity(Uuid::now_v7(), Role::Admin);
        let crime = new_crime("CR-1".to_string(), reporter.id, vec![officer.id])
            .into_crime(Uuid::now_v7(), Utc::now());

        assert!(ensure_can_view(&reporter, &crime).is_ok());
        assert!(ensure_can_view(&officer, &crime).is_ok());
        assert!(ensure_can_view(&admin, &crime).is_ok());
        assert!(matches!(
            ensure_can_view(&stranger, &crime),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_scope_for_user() {
        let admin = identity(Uuid::now_v7(), Role::Admin);
        let user = identity(Uuid::now_v7(), Role::User);
        assert_eq!(CrimeScope::for_user(&admin), CrimeScope::All);
        assert_eq!(CrimeScope::for_user(&user), CrimeScope::VisibleTo(user.id));
    }

    /// Case fixtures over a small pool of users: (reporter index, assignee indexes)
    fn fixtures() -> impl Strategy<Value = Vec<(usize, Vec<usize>)>> {
        prop::collection::vec(
            (0usize..5, prop::collection::vec(0usize..5, 0..3)),
            0..12,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// A non-admin listing contains exactly the cases they reported or are assigned to.
        #[test]
        fn prop_listing_only_returns_involved_cases(cases in fixtures(), viewer in 0usize..5) {
            let users: Vec<Uuid> = (0..5).map(|_| Uuid::now_v7()).collect();
            let repo = InMemoryCrimeRepository::new();

            let listed = tokio_test::block_on(async {
                for (i, (reporter, assigned)) in cases.iter().enumerate() {
                    let assigned = assigned.iter().map(|a| users[*a]).collect();
                    repo.insert(new_crime(format!("CR-{}", i), users[*reporter], assigned))
                        .await
                        .unwrap();
                }
                repo.list(CrimeScope::VisibleTo(users[viewer])).await.unwrap()
            });

            let expected = cases
                .iter()
                .filter(|(reporter, assigned)| *reporter == viewer || assigned.contains(&viewer))
                .count();

            prop_assert_eq!(listed.len(), expected);
            for crime in &listed {
                prop_assert!(crime.involves(users[viewer]));
            }
        }
    }
}
