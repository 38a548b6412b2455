use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::SymptomCatalog;
use super::domain::RecommendationResource;
use super::error::AssessmentError;
use super::postcode::{format_postcode, is_valid_uk_postcode, normalize_postcode};
use super::recommendations::get_recommendations;
use super::service::{AssessmentRequest, AssessmentService, SymptomSelection};
use super::services::{find_local_services, kent_medway_services};
use crate::session::{CurrentUser, MockAuthenticator, SessionContext};

/// Shared handler dependencies.
pub struct AssessmentApi {
    pub service: AssessmentService,
    pub authenticator: MockAuthenticator,
}

/// Router builder exposing the catalog, the three core operations, and assessment generation.
pub fn assessment_router(api: Arc<AssessmentApi>) -> Router {
    Router::new()
        .route("/api/v1/symptoms", get(symptoms_handler))
        .route("/api/v1/services", get(services_handler))
        .route("/api/v1/services/search", post(service_search_handler))
        .route("/api/v1/postcode/check", post(postcode_check_handler))
        .route("/api/v1/recommendations", post(recommendations_handler))
        .route("/api/v1/assessments", post(assessment_handler))
        .route("/api/v1/session/login", post(login_handler))
        .with_state(api)
}

#[derive(Debug, Deserialize)]
pub struct PostcodeCheckRequest {
    pub postcode: String,
}

#[derive(Debug, Serialize)]
pub struct PostcodeCheckView {
    pub postcode: String,
    pub normalized: String,
    pub formatted: String,
    pub valid_format: bool,
    pub in_region: bool,
    pub policy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SymptomIdsRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceSearchRequest {
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAssessmentRequest {
    #[serde(default)]
    pub symptoms: Vec<SymptomSelection>,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub clinician: Option<CurrentUser>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub(crate) async fn symptoms_handler() -> Response {
    Json(SymptomCatalog::standard().groups()).into_response()
}

pub(crate) async fn services_handler() -> Response {
    Json(kent_medway_services()).into_response()
}

pub(crate) async fn postcode_check_handler(
    State(api): State<Arc<AssessmentApi>>,
    Json(payload): Json<PostcodeCheckRequest>,
) -> Json<PostcodeCheckView> {
    let policy = api.service.region_policy();
    let error = policy.validate(&payload.postcode).err();
    Json(PostcodeCheckView {
        normalized: normalize_postcode(&payload.postcode),
        formatted: format_postcode(&payload.postcode),
        valid_format: is_valid_uk_postcode(payload.postcode.trim()),
        in_region: policy.contains(&payload.postcode),
        policy: policy.label(),
        error: error.map(|err| err.to_string()),
        postcode: payload.postcode,
    })
}

pub(crate) async fn recommendations_handler(
    Json(payload): Json<SymptomIdsRequest>,
) -> Json<Vec<RecommendationResource>> {
    Json(get_recommendations(&payload.symptoms))
}

pub(crate) async fn service_search_handler(Json(payload): Json<ServiceSearchRequest>) -> Response {
    Json(find_local_services(&payload.postcode, &payload.symptoms)).into_response()
}

pub(crate) async fn assessment_handler(
    State(api): State<Arc<AssessmentApi>>,
    Json(payload): Json<CreateAssessmentRequest>,
) -> Response {
    let session = SessionContext {
        current_user: payload.clinician,
    };
    let request = AssessmentRequest {
        symptoms: payload.symptoms,
        postcode: payload.postcode,
        notes: payload.notes,
    };

    match api.service.generate(&session, request).await {
        Ok(assessment) => (StatusCode::CREATED, Json(assessment)).into_response(),
        Err(AssessmentError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn login_handler(
    State(api): State<Arc<AssessmentApi>>,
    Json(payload): Json<LoginRequest>,
) -> Response {
    match api
        .authenticator
        .login(&payload.email, &payload.password)
        .await
    {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
        }
    }
}
