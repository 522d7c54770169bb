use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::crimes::{
    dtos as crimes_dtos, handlers as crimes_handlers, models as crimes_models,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers, models as users_models};
use crate::shared::constants::AUTH_TOKEN_HEADER;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::signup,
        auth::handlers::login,
        auth::handlers::get_me,
        auth::handlers::change_password,
        // Users (admin)
        users_handlers::list_users,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
        // Crimes
        crimes_handlers::list_crimes,
        crimes_handlers::get_stats,
        crimes_handlers::get_crime,
        crimes_handlers::create_crime,
        crimes_handlers::update_crime,
        crimes_handlers::delete_crime,
    ),
    components(
        schemas(
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::SignupRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::ChangePasswordRequestDto,
            auth::dtos::TokenResponseDto,
            // Users
            users_models::Role,
            users_dtos::UserResponseDto,
            users_dtos::UserRefDto,
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            // Crimes
            crimes_models::CrimeType,
            crimes_models::CrimeStatus,
            crimes_models::Severity,
            crimes_models::Suspect,
            crimes_models::Evidence,
            crimes_dtos::CreateCrimeDto,
            crimes_dtos::UpdateCrimeDto,
            crimes_dtos::CrimeResponseDto,
            crimes_dtos::CrimeTypeCountDto,
            crimes_dtos::CrimeStatsDto,
        )
    ),
    tags(
        (name = "auth", description = "Signup, login and the caller's own account"),
        (name = "users", description = "User administration (admin only)"),
        (name = "crimes", description = "Crime case records and statistics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CrimeTrack API",
        version = "0.1.0",
        description = "API documentation for CrimeTrack",
    )
)]
pub struct ApiDoc;

/// Adds the `x-auth-token` header scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(AUTH_TOKEN_HEADER))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
