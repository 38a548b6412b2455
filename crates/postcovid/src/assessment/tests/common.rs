use std::sync::Arc;
use std::time::Duration;

use axum::body::to_bytes;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::assessment::{
    AssessmentApi, AssessmentRequest, AssessmentService, PatientAssessment, Severity,
    SymptomSelection,
};
use crate::session::{MockAuthenticator, SessionContext};

pub(super) fn service() -> AssessmentService {
    AssessmentService::immediate()
}

pub(super) fn api() -> Arc<AssessmentApi> {
    Arc::new(AssessmentApi {
        service: service(),
        authenticator: MockAuthenticator::new(Duration::ZERO),
    })
}

pub(super) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 12, 14, 5, 30)
        .single()
        .expect("valid timestamp")
}

pub(super) fn request(ids: &[&str], postcode: &str) -> AssessmentRequest {
    AssessmentRequest {
        symptoms: ids
            .iter()
            .map(|id| SymptomSelection::new(id, None))
            .collect(),
        postcode: postcode.to_string(),
        notes: None,
    }
}

pub(super) fn sample_assessment() -> PatientAssessment {
    let mut req = request(&["breathlessness", "anxiety"], "me7 5ny");
    req.symptoms[0].severity = Some(Severity::Severe);
    req.notes = Some("Reports breathlessness on stairs".to_string());
    service()
        .build(
            &SessionContext::anonymous(),
            &req,
            "ME7 5NY".to_string(),
            fixed_time(),
        )
        .expect("sample assessment builds")
}

pub(super) async fn json_body(response: Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
