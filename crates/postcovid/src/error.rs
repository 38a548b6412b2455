use crate::assessment::{AssessmentError, ExportError, FormError};
use crate::config::ConfigError;
use crate::session::{LoginError, SessionStoreError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Assessment(AssessmentError),
    Form(FormError),
    Login(LoginError),
    Session(SessionStoreError),
    Export(ExportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Assessment(err) => write!(f, "assessment error: {}", err),
            AppError::Form(err) => write!(f, "assessment error: {}", err),
            AppError::Login(err) => write!(f, "login failed: {}", err),
            AppError::Session(err) => write!(f, "session error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
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
            AppError::Assessment(err) => Some(err),
            AppError::Form(err) => Some(err),
            AppError::Login(err) => Some(err),
            AppError::Session(err) => Some(err),
            AppError::Export(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Assessment(AssessmentError::Validation(_))
            | AppError::Form(FormError::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Form(FormError::GenerationPending | FormError::NoResults) => {
                StatusCode::CONFLICT
            }
            AppError::Login(_) => StatusCode::UNAUTHORIZED,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Assessment(_)
            | AppError::Form(_)
            | AppError::Session(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

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

impl From<AssessmentError> for AppError {
    fn from(value: AssessmentError) -> Self {
        Self::Assessment(value)
    }
}

impl From<FormError> for AppError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<LoginError> for AppError {
    fn from(value: LoginError) -> Self {
        Self::Login(value)
    }
}

impl From<SessionStoreError> for AppError {
    fn from(value: SessionStoreError) -> Self {
        Self::Session(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{GenerationFailure, ValidationError};

    #[test]
    fn validation_errors_map_to_unprocessable() {
        let response =
            AppError::from(AssessmentError::Validation(ValidationError::InvalidPostcode))
                .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generation_failures_map_to_internal_error() {
        let err = AppError::from(AssessmentError::Generation(
            GenerationFailure::UnknownSymptom("hiccups".to_string()),
        ));
        assert!(err.to_string().contains("hiccups"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn pending_generation_maps_to_conflict() {
        let response = AppError::from(FormError::GenerationPending).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
