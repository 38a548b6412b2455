use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::catalog::SymptomCatalog;
use super::domain::{AssessmentId, PatientAssessment, Severity, Symptom, SymptomId};
use super::error::{AssessmentError, GenerationFailure, ValidationError};
use super::postcode::RegionPolicy;
use super::recommendations::get_recommendations;
use super::services::find_local_services;
use crate::config::AssessmentSettings;
use crate::session::SessionContext;

/// One selected symptom with an optional clinician-assigned severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSelection {
    pub id: SymptomId,
    #[serde(default)]
    pub severity: Option<Severity>,
}

impl SymptomSelection {
    pub fn new(id: &str, severity: Option<Severity>) -> Self {
        Self {
            id: SymptomId::from(id),
            severity,
        }
    }
}

/// Snapshot of the form inputs at the moment generation was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub symptoms: Vec<SymptomSelection>,
    pub postcode: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl AssessmentRequest {
    /// Ids in selection order with repeats removed.
    pub fn symptom_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.symptoms
            .iter()
            .map(|selection| selection.id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// Composes the validator, recommendation engine, and service locator.
#[derive(Debug, Clone)]
pub struct AssessmentService {
    catalog: &'static SymptomCatalog,
    region_policy: RegionPolicy,
    latency: Duration,
}

impl AssessmentService {
    pub fn new(settings: &AssessmentSettings) -> Self {
        Self {
            catalog: SymptomCatalog::standard(),
            region_policy: settings.region_policy,
            latency: settings.generation_latency,
        }
    }

    /// Zero latency, canonical region policy.
    pub fn immediate() -> Self {
        Self::new(&AssessmentSettings {
            generation_latency: Duration::ZERO,
            ..AssessmentSettings::default()
        })
    }

    pub fn region_policy(&self) -> RegionPolicy {
        self.region_policy
    }

    pub fn catalog(&self) -> &'static SymptomCatalog {
        self.catalog
    }

    /// Postcode problems are reported before an empty symptom selection.
    pub fn validate(&self, request: &AssessmentRequest) -> Result<String, ValidationError> {
        let postcode = self.region_policy.validate(&request.postcode)?;
        if request.symptoms.is_empty() {
            return Err(ValidationError::NoSymptomsSelected);
        }
        Ok(postcode)
    }

    /// Validates, waits the configured artificial latency, then computes results.
    pub async fn generate(
        &self,
        session: &SessionContext,
        request: AssessmentRequest,
    ) -> Result<PatientAssessment, AssessmentError> {
        let postcode = self.validate(&request)?;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let assessment = self
            .build(session, &request, postcode, Utc::now())
            .map_err(|err| {
                warn!(error = %err, "assessment generation failed");
                err
            })?;

        info!(
            assessment_id = %assessment.id.0,
            clinician_id = %assessment.clinician_id.0,
            symptoms = assessment.symptoms.len(),
            recommendations = assessment.recommendations.len(),
            services = assessment.local_services.len(),
            "assessment generated"
        );
        Ok(assessment)
    }

    /// Synchronous part of generation; `postcode` must already be validated.
    pub fn build(
        &self,
        session: &SessionContext,
        request: &AssessmentRequest,
        postcode: String,
        now: DateTime<Utc>,
    ) -> Result<PatientAssessment, GenerationFailure> {
        let ids = request.symptom_ids();
        let symptoms = ids
            .iter()
            .map(|id| self.resolve_symptom(request, id))
            .collect::<Result<Vec<_>, _>>()?;

        let recommendations = get_recommendations(&ids);
        let local_services = find_local_services(&request.postcode, &ids);

        let notes = request
            .notes
            .as_ref()
            .filter(|notes| !notes.trim().is_empty())
            .cloned();

        Ok(PatientAssessment {
            id: AssessmentId(format!("assessment-{}", now.timestamp_millis())),
            created_at: now,
            updated_at: now,
            clinician_id: session.clinician_id(),
            symptoms,
            postcode,
            notes,
            recommendations,
            local_services,
        })
    }

    fn resolve_symptom(
        &self,
        request: &AssessmentRequest,
        id: &str,
    ) -> Result<Symptom, GenerationFailure> {
        let definition = self
            .catalog
            .find(id)
            .ok_or_else(|| GenerationFailure::UnknownSymptom(id.to_string()))?;
        let severity = request
            .symptoms
            .iter()
            .find(|selection| selection.id.as_str() == id)
            .and_then(|selection| selection.severity)
            .unwrap_or_default();

        Ok(Symptom {
            severity: Some(severity),
            ..definition.clone()
        })
    }
}
