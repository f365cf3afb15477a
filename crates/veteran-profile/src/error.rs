use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::ConfigError;
use crate::intake::IntakeError;
use crate::personalization::PersonalizationError;
use crate::profile::StoreError;
use crate::telemetry::TelemetryError;
use crate::vocabulary::VocabularyError;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Intake(IntakeError),
    Vocabulary(VocabularyError),
    Personalization(PersonalizationError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Personalization(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Personalization(PersonalizationError::UnknownContext(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Intake(_) | AppError::Vocabulary(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Personalization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Intake(err) => write!(f, "intake error: {}", err),
            AppError::Vocabulary(err) => write!(f, "vocabulary error: {}", err),
            AppError::Personalization(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Intake(err) => Some(err),
            AppError::Vocabulary(err) => Some(err),
            AppError::Personalization(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<IntakeError> for AppError {
    fn from(value: IntakeError) -> Self {
        Self::Intake(value)
    }
}

impl From<VocabularyError> for AppError {
    fn from(value: VocabularyError) -> Self {
        Self::Vocabulary(value)
    }
}

impl From<PersonalizationError> for AppError {
    fn from(value: PersonalizationError) -> Self {
        Self::Personalization(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Personalization(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::UnknownPageContext;

    #[test]
    fn missing_records_map_to_not_found() {
        let error = AppError::from(StoreError::SessionNotFound("abc".to_string()));
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "session `abc` not found");
    }

    #[test]
    fn caller_input_errors_map_to_bad_request() {
        let context = AppError::from(PersonalizationError::from(UnknownPageContext(
            "checkout".to_string(),
        )));
        assert_eq!(context.status(), StatusCode::BAD_REQUEST);

        let intake = AppError::from(IntakeError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing.csv",
        )));
        assert_eq!(intake.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_errors_are_internal() {
        let error = AppError::from(ConfigError::InvalidPort);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
