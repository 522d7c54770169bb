use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::crimes::dtos::{
    CreateCrimeDto, CrimeListQuery, CrimeResponseDto, CrimeStatsDto, CrimeTypeCountDto,
    UpdateCrimeDto, MSG_MISSING_REQUIRED,
};
use crate::features::crimes::models::{Crime, CrimeChanges, NewCrime};
use crate::features::crimes::policy::{authorize, ensure_can_view, CrimeAction, CrimeScope};
use crate::features::crimes::repository::CrimeRepository;
use crate::features::users::dtos::{non_blank, UserRefDto};
use crate::features::users::repository::UserRepository;
use crate::shared::constants::{MSG_CASE_NUMBER_EXISTS, MSG_CRIME_NOT_FOUND, RECENT_CRIMES_LIMIT};

/// Service for crime case operations. Every call takes the acting identity.
pub struct CrimeService {
    crimes: Arc<dyn CrimeRepository>,
    users: Arc<dyn UserRepository>,
}

impl CrimeService {
    pub fn new(crimes: Arc<dyn CrimeRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { crimes, users }
    }

    /// Cases visible to `actor`, newest first, narrowed by `query`
    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
        query: &CrimeListQuery,
    ) -> Result<Vec<CrimeResponseDto>> {
        authorize(actor, CrimeAction::List)?;

        let crimes: Vec<Crime> = self
            .crimes
            .list(CrimeScope::for_user(actor))
            .await?
            .into_iter()
            .filter(|c| query.matches(c))
            .collect();

        self.populate(crimes).await
    }

    pub async fn get(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<CrimeResponseDto> {
        authorize(actor, CrimeAction::Read)?;

        let crime = self.find(id).await?;
        ensure_can_view(actor, &crime)?;

        self.populate_one(crime).await
    }

    /// Open a case reported by `actor` (admin only)
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        dto: CreateCrimeDto,
    ) -> Result<CrimeResponseDto> {
        authorize(actor, CrimeAction::Create)?;

        let (Some(case_number), Some(title), Some(crime_type), Some(location)) = (
            non_blank(dto.case_number),
            non_blank(dto.title),
            dto.crime_type,
            non_blank(dto.location),
        ) else {
            return Err(AppError::Validation(MSG_MISSING_REQUIRED.to_string()));
        };

        if self.crimes.find_by_case_number(&case_number).await?.is_some() {
            return Err(AppError::Conflict(MSG_CASE_NUMBER_EXISTS.to_string()));
        }

        let assigned_officers = self
            .resolve_officers(dto.assigned_officers.unwrap_or_default())
            .await?;

        let crime = self
            .crimes
            .insert(NewCrime {
                case_number,
                title,
                description: dto.description.unwrap_or_default(),
                crime_type,
                location,
                date_occurred: dto.date_occurred,
                status: dto.status.unwrap_or_default(),
                severity: dto.severity.unwrap_or_default(),
                suspects: dto.suspects.unwrap_or_default(),
                evidence: dto.evidence.unwrap_or_default(),
                assigned_officers,
                reported_by: actor.id,
            })
            .await?;

        tracing::info!(
            "Case {} ({}) opened by {}",
            crime.case_number,
            crime.id,
            actor.id
        );
        self.populate_one(crime).await
    }

    /// Replace-if-provided update (admin only)
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        dto: UpdateCrimeDto,
    ) -> Result<CrimeResponseDto> {
        authorize(actor, CrimeAction::Update)?;

        let mut crime = self.find(id).await?;

        let case_number = non_blank(dto.case_number);
        if let Some(case_number) = &case_number {
            if *case_number != crime.case_number
                && self.crimes.find_by_case_number(case_number).await?.is_some()
            {
                return Err(AppError::Conflict(MSG_CASE_NUMBER_EXISTS.to_string()));
            }
        }

        let assigned_officers = match dto.assigned_officers {
            Some(ids) => Some(self.resolve_officers(ids).await?),
            None => None,
        };

        CrimeChanges {
            case_number,
            title: non_blank(dto.title),
            description: dto.description.filter(|d| !d.is_empty()),
            crime_type: dto.crime_type,
            location: non_blank(dto.location),
            date_occurred: dto.date_occurred,
            status: dto.status,
            severity: dto.severity,
            suspects: dto.suspects,
            evidence: dto.evidence,
            assigned_officers,
        }
        .apply(&mut crime, chrono::Utc::now());

        if !self.crimes.save(&crime).await? {
            return Err(AppError::NotFound(MSG_CRIME_NOT_FOUND.to_string()));
        }

        tracing::info!("Case {} updated by {}", crime.id, actor.id);
        self.populate_one(crime).await
    }

    /// Hard delete (admin only)
    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<()> {
        authorize(actor, CrimeAction::Delete)?;

        if !self.crimes.delete(id).await? {
            return Err(AppError::NotFound(MSG_CRIME_NOT_FOUND.to_string()));
        }

        tracing::info!("Case {} deleted by {}", id, actor.id);
        Ok(())
    }

    /// Store-wide overview (admin only)
    pub async fn stats(&self, actor: &AuthenticatedUser) -> Result<CrimeStatsDto> {
        authorize(actor, CrimeAction::Stats)?;

        let summary = self.crimes.summary().await?;
        let total_users = self.users.count().await?;
        let recent = self.crimes.recent(RECENT_CRIMES_LIMIT).await?;

        Ok(CrimeStatsDto {
            total_crimes: summary.total,
            open_cases: summary.open,
            under_investigation: summary.under_investigation,
            closed_cases: summary.closed,
            total_users,
            crimes_by_type: summary
                .ranked_types()
                .into_iter()
                .map(|(crime_type, count)| CrimeTypeCountDto { crime_type, count })
                .collect(),
            recent_crimes: self.populate(recent).await?,
        })
    }

    async fn find(&self, id: Uuid) -> Result<Crime> {
        self.crimes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(MSG_CRIME_NOT_FOUND.to_string()))
    }

    /// Deduplicate officer ids, keeping first-seen order, and require each to exist
    async fn resolve_officers(&self, ids: Vec<Uuid>) -> Result<Vec<Uuid>> {
        let mut seen = HashSet::new();
        let ids: Vec<Uuid> = ids.into_iter().filter(|id| seen.insert(*id)).collect();

        let found = self.users.find_many(&ids).await?;
        if found.len() != ids.len() {
            let known: HashSet<Uuid> = found.iter().map(|u| u.id).collect();
            let missing = ids.iter().find(|id| !known.contains(id));
            return Err(AppError::BadRequest(match missing {
                Some(id) => format!("Assigned officer {} not found", id),
                None => "Assigned officer not found".to_string(),
            }));
        }
        Ok(ids)
    }

    async fn populate(&self, crimes: Vec<Crime>) -> Result<Vec<CrimeResponseDto>> {
        let mut ids = HashSet::new();
        for crime in &crimes {
            ids.insert(crime.reported_by);
            ids.extend(crime.assigned_officers.iter().copied());
        }
        let ids: Vec<Uuid> = ids.into_iter().collect();

        let people: HashMap<Uuid, UserRefDto> = self
            .users
            .find_many(&ids)
            .await?
            .iter()
            .map(|u| (u.id, UserRefDto::from(u)))
            .collect();

        Ok(crimes
            .into_iter()
            .map(|c| CrimeResponseDto::populate(c, &people))
            .collect())
    }

    async fn populate_one(&self, crime: Crime) -> Result<CrimeResponseDto> {
        let mut populated = self.populate(vec![crime]).await?;
        populated
            .pop()
            .ok_or_else(|| AppError::Internal("populate returned no record".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::crimes::models::{CrimeStatus, CrimeType, Severity, Suspect};
    use crate::shared::test_helpers::{admin_identity, officer_identity, TestContext};

    fn create_dto(case_number: &str, assigned: Vec<Uuid>) -> CreateCrimeDto {
        CreateCrimeDto {
            case_number: Some(case_number.to_string()),
            title: Some("  Residential Burglary ".to_string()),
            description: Some("Break-in at 123 Main Street".to_string()),
            crime_type: Some(CrimeType::Burglary),
            location: Some("123 Main Street, Downtown".to_string()),
            suspects: Some(vec![Suspect {
                name: "John Doe".to_string(),
                ..Default::default()
            }]),
            assigned_officers: Some(assigned),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults_and_populates() {
        let ctx = TestContext::new();
        let admin = ctx.create_admin("admin@crimetrack.com").await;
        let officer = ctx.create_officer("smith@crimetrack.com").await;

        let crime = ctx
            .crimes
            .create(
                &admin_identity(&admin),
                create_dto("CR-2024-001", vec![officer.id, officer.id]),
            )
            .await
            .unwrap();

        assert_eq!(crime.title, "Residential Burglary");
        assert_eq!(crime.status, CrimeStatus::Open);
        assert_eq!(crime.severity, Severity::Medium);
        assert_eq!(crime.date_occurred, crime.date_reported);
        assert_eq!(crime.reported_by.unwrap().id, admin.id);
        assert_eq!(crime.assigned_officers.len(), 1);
        assert_eq!(crime.assigned_officers[0].email, "smith@crimetrack.com");
    }

    #[tokio::test]
    async fn test_create_rejections() {
        let ctx = TestContext::new();
        let admin = admin_identity(&ctx.create_admin("admin@crimetrack.com").await);
        let officer = officer_identity(&ctx.create_officer("smith@crimetrack.com").await);

        assert!(matches!(
            ctx.crimes
                .create(&officer, create_dto("CR-1", vec![]))
                .await
                .unwrap_err(),
            AppError::Forbidden(_)
        ));

        let missing = CreateCrimeDto {
            location: None,
            ..create_dto("CR-1", vec![])
        };
        assert!(matches!(
            ctx.crimes.create(&admin, missing).await.unwrap_err(),
            AppError::Validation(msg) if msg == MSG_MISSING_REQUIRED
        ));

        assert!(matches!(
            ctx.crimes
                .create(&admin, create_dto("CR-1", vec![Uuid::now_v7()]))
                .await
                .unwrap_err(),
            AppError::BadRequest(_)
        ));

        ctx.crimes
            .create(&admin, create_dto("CR-1", vec![]))
            .await
            .unwrap();
        assert!(matches!(
            ctx.crimes
                .create(&admin, create_dto(" CR-1 ", vec![]))
                .await
                .unwrap_err(),
            AppError::Conflict(msg) if msg == MSG_CASE_NUMBER_EXISTS
        ));
        assert_eq!(
            ctx.crimes
                .list(&admin, &CrimeListQuery::default())
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_visibility_for_read_and_list() {
        let ctx = TestContext::new();
        let admin = admin_identity(&ctx.create_admin("admin@crimetrack.com").await);
        let smith = officer_identity(&ctx.create_officer("smith@crimetrack.com").await);
        let johnson = officer_identity(&ctx.create_officer("johnson@crimetrack.com").await);

        let assigned = ctx
            .crimes
            .create(&admin, create_dto("CR-1", vec![smith.id]))
            .await
            .unwrap();
        ctx.crimes
            .create(&admin, create_dto("CR-2", vec![]))
            .await
            .unwrap();

        let smith_list = ctx
            .crimes
            .list(&smith, &CrimeListQuery::default())
            .await
            .unwrap();
        assert_eq!(smith_list.len(), 1);
        assert_eq!(smith_list[0].id, assigned.id);
        assert!(ctx
            .crimes
            .list(&johnson, &CrimeListQuery::default())
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            ctx.crimes
                .list(&admin, &CrimeListQuery::default())
                .await
                .unwrap()
                .len(),
            2
        );

        assert!(ctx.crimes.get(&smith, assigned.id).await.is_ok());
        assert!(matches!(
            ctx.crimes.get(&johnson, assigned.id).await.unwrap_err(),
            AppError::Forbidden(_)
        ));
        assert!(matches!(
            ctx.crimes.get(&admin, Uuid::now_v7()).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_reporter_sees_own_case() {
        let ctx = TestContext::new();
        let admin = ctx.create_admin("admin@crimetrack.com").await;
        let actor = admin_identity(&admin);
        let crime = ctx
            .crimes
            .create(&actor, create_dto("CR-1", vec![]))
            .await
            .unwrap();

        // Demote the reporter; visibility now comes from reportedBy alone.
        let demoted = AuthenticatedUser {
            role: crate::features::users::models::Role::User,
            ..actor
        };
        assert!(ctx.crimes.get(&demoted, crime.id).await.is_ok());
        assert_eq!(
            ctx.crimes
                .list(&demoted, &CrimeListQuery::default())
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_update_semantics() {
        let ctx = TestContext::new();
        let admin = admin_identity(&ctx.create_admin("admin@crimetrack.com").await);
        let smith = ctx.create_officer("smith@crimetrack.com").await;

        let first = ctx
            .crimes
            .create(&admin, create_dto("CR-1", vec![smith.id]))
            .await
            .unwrap();
        ctx.crimes
            .create(&admin, create_dto("CR-2", vec![]))
            .await
            .unwrap();

        let updated = ctx
            .crimes
            .update(
                &admin,
                first.id,
                UpdateCrimeDto {
                    case_number: Some("CR-1".to_string()),
                    title: Some(String::new()),
                    status: Some(CrimeStatus::Closed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, CrimeStatus::Closed);
        assert_eq!(updated.title, first.title);
        assert_eq!(updated.assigned_officers.len(), 1);
        assert!(updated.last_updated >= first.last_updated);

        let cleared = ctx
            .crimes
            .update(
                &admin,
                first.id,
                UpdateCrimeDto {
                    assigned_officers: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.assigned_officers.is_empty());

        assert!(matches!(
            ctx.crimes
                .update(
                    &admin,
                    first.id,
                    UpdateCrimeDto {
                        case_number: Some("CR-2".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap_err(),
            AppError::Conflict(_)
        ));

        assert!(matches!(
            ctx.crimes
                .update(&officer_identity(&smith), first.id, UpdateCrimeDto::default())
                .await
                .unwrap_err(),
            AppError::Forbidden(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_and_deleted_reporter() {
        let ctx = TestContext::new();
        let admin = ctx.create_admin("admin@crimetrack.com").await;
        let other_admin = ctx.create_admin("chief@crimetrack.com").await;
        let actor = admin_identity(&admin);

        let crime = ctx
            .crimes
            .create(&actor, create_dto("CR-1", vec![]))
            .await
            .unwrap();

        ctx.users
            .delete(&admin_identity(&other_admin), admin.id)
            .await
            .unwrap();
        let orphaned = ctx
            .crimes
            .get(&admin_identity(&other_admin), crime.id)
            .await
            .unwrap();
        assert!(orphaned.reported_by.is_none());

        ctx.crimes.delete(&actor, crime.id).await.unwrap();
        assert!(matches!(
            ctx.crimes.delete(&actor, crime.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_stats() {
        let ctx = TestContext::new();
        let admin = admin_identity(&ctx.create_admin("admin@crimetrack.com").await);
        let smith = officer_identity(&ctx.create_officer("smith@crimetrack.com").await);

        for i in 0..6 {
            ctx.crimes
                .create(&admin, create_dto(&format!("CR-{}", i), vec![]))
                .await
                .unwrap();
        }
        ctx.crimes
            .create(
                &admin,
                CreateCrimeDto {
                    crime_type: Some(CrimeType::Fraud),
                    status: Some(CrimeStatus::UnderInvestigation),
                    ..create_dto("CR-F", vec![])
                },
            )
            .await
            .unwrap();

        let stats = ctx.crimes.stats(&admin).await.unwrap();
        assert_eq!(stats.total_crimes, 7);
        assert_eq!(stats.open_cases, 6);
        assert_eq!(stats.under_investigation, 1);
        assert_eq!(stats.closed_cases, 0);
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.crimes_by_type[0].crime_type, CrimeType::Burglary);
        assert_eq!(stats.crimes_by_type[0].count, 6);
        assert_eq!(stats.recent_crimes.len(), RECENT_CRIMES_LIMIT);
        assert!(stats
            .recent_crimes
            .windows(2)
            .all(|w| w[0].date_reported >= w[1].date_reported));

        assert!(matches!(
            ctx.crimes.stats(&smith).await.unwrap_err(),
            AppError::Forbidden(_)
        ));
    }
}
