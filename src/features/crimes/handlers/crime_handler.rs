use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::crimes::dtos::{
    CreateCrimeDto, CrimeListQuery, CrimeResponseDto, CrimeStatsDto, UpdateCrimeDto,
};
use crate::features::crimes::services::CrimeService;
use crate::shared::constants::MSG_CRIME_NOT_FOUND;
use crate::shared::types::ApiResponse;
use crate::shared::validation::parse_record_id;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

// Mutations take `RequireAdmin` ahead of the body extractor: parts extractors
// run first, so a non-admin gets 403 whatever the body holds.

fn crime_id(raw: &str) -> Result<Uuid> {
    parse_record_id(raw).ok_or_else(|| AppError::NotFound(MSG_CRIME_NOT_FOUND.to_string()))
}

/// List cases visible to the caller
#[utoipa::path(
    get,
    path = "/api/crimes",
    params(CrimeListQuery),
    responses(
        (status = 200, description = "Visible cases, most recently reported first", body = Vec<CrimeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "crimes",
    security(
        ("token_auth" = [])
    )
)]
pub async fn list_crimes(
    user: AuthenticatedUser,
    State(service): State<Arc<CrimeService>>,
    Query(query): Query<CrimeListQuery>,
) -> Result<Json<Vec<CrimeResponseDto>>> {
    let crimes = service.list(&user, &query).await?;
    Ok(Json(crimes))
}

/// Dashboard overview
#[utoipa::path(
    get,
    path = "/api/crimes/stats/overview",
    responses(
        (status = 200, description = "Case statistics", body = CrimeStatsDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "crimes",
    security(
        ("token_auth" = [])
    )
)]
pub async fn get_stats(
    user: AuthenticatedUser,
    State(service): State<Arc<CrimeService>>,
) -> Result<Json<CrimeStatsDto>> {
    let stats = service.stats(&user).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/crimes/{id}",
    params(
        ("id" = String, Path, description = "Case ID")
    ),
    responses(
        (status = 200, description = "Case found", body = CrimeResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is neither reporter nor assigned officer"),
        (status = 404, description = "Crime record not found")
    ),
    tag = "crimes",
    security(
        ("token_auth" = [])
    )
)]
pub async fn get_crime(
    user: AuthenticatedUser,
    State(service): State<Arc<CrimeService>>,
    Path(id): Path<String>,
) -> Result<Json<CrimeResponseDto>> {
    let crime = service.get(&user, crime_id(&id)?).await?;
    Ok(Json(crime))
}

#[utoipa::path(
    post,
    path = "/api/crimes",
    request_body = CreateCrimeDto,
    responses(
        (status = 201, description = "Case opened", body = CrimeResponseDto),
        (status = 400, description = "Missing fields, unknown officer or duplicate case number"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "crimes",
    security(
        ("token_auth" = [])
    )
)]
pub async fn create_crime(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CrimeService>>,
    AppJson(dto): AppJson<CreateCrimeDto>,
) -> Result<(StatusCode, Json<CrimeResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let crime = service.create(&user, dto).await?;
    Ok((StatusCode::CREATED, Json(crime)))
}

#[utoipa::path(
    put,
    path = "/api/crimes/{id}",
    params(
        ("id" = String, Path, description = "Case ID")
    ),
    request_body = UpdateCrimeDto,
    responses(
        (status = 200, description = "Case updated", body = CrimeResponseDto),
        (status = 400, description = "Validation error, unknown officer or duplicate case number"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Crime record not found")
    ),
    tag = "crimes",
    security(
        ("token_auth" = [])
    )
)]
pub async fn update_crime(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CrimeService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateCrimeDto>,
) -> Result<Json<CrimeResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let crime = service.update(&user, crime_id(&id)?, dto).await?;
    Ok(Json(crime))
}

#[utoipa::path(
    delete,
    path = "/api/crimes/{id}",
    params(
        ("id" = String, Path, description = "Case ID")
    ),
    responses(
        (status = 200, description = "Case deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Crime record not found")
    ),
    tag = "crimes",
    security(
        ("token_auth" = [])
    )
)]
pub async fn delete_crime(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CrimeService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&user, crime_id(&id)?).await?;
    Ok(Json(ApiResponse::message("Crime record deleted successfully")))
}
