use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::MSG_NO_TOKEN;

/// JSON body extractor whose failures use the shared error body
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(rejection_to_error)
    }
}

// Type errors (unknown crime type, bad date, wrong shape) are validation
// failures; anything that stops us reading the body at all is a bad request.
fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => AppError::Validation(err.body_text()),
        JsonRejection::JsonSyntaxError(err) => {
            AppError::BadRequest(format!("Malformed JSON body: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::BadRequest("Expected a request with Content-Type: application/json".to_string())
        }
        other => AppError::BadRequest(other.body_text()),
    }
}

/// Identity inserted by `auth_middleware`; absent means the route was reached
/// without a token.
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized(MSG_NO_TOKEN.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::crimes::dtos::CreateCrimeDto;
    use axum::http::header::CONTENT_TYPE;

    fn json_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/crimes")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_unknown_enum_value_is_validation_error() {
        let result =
            AppJson::<CreateCrimeDto>::from_request(json_request(r#"{"severity":"Extreme"}"#), &())
                .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_syntax_error_and_missing_content_type_are_bad_requests() {
        let result =
            AppJson::<CreateCrimeDto>::from_request(json_request(r#"{"title":"#), &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let plain = Request::builder()
            .method("POST")
            .uri("/api/crimes")
            .body(Body::from("{}"))
            .unwrap();
        let result = AppJson::<CreateCrimeDto>::from_request(plain, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_identity_comes_from_extensions() {
        let (mut parts, _) = Request::new(Body::empty()).into_parts();
        let missing = AuthenticatedUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(missing, Err(AppError::Unauthorized(msg)) if msg == MSG_NO_TOKEN));
    }
}
