use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier for a symptom, e.g. `brain-fog`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomId(pub String);

impl SymptomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SymptomId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SymptomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinicianId(pub String);

/// Clinician-assigned severity; unset selections are recorded as moderate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    #[default]
    Moderate,
    Severe,
}

impl Severity {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mild" => Some(Self::Mild),
            "moderate" => Some(Self::Moderate),
            "severe" => Some(Self::Severe),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: SymptomId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

/// Clinical category grouping symptoms in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomGroup {
    pub id: String,
    pub name: String,
    pub symptoms: Vec<Symptom>,
}

/// Labels match the catalog text so exports read the same as the service directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "Specialist Centre")]
    SpecialistCentre,
    #[serde(rename = "Specialist Clinic")]
    SpecialistClinic,
    #[serde(rename = "Mental Health")]
    MentalHealth,
    #[serde(rename = "Rehabilitation")]
    Rehabilitation,
    #[serde(rename = "Community Service")]
    CommunityService,
}

impl ServiceType {
    pub fn label(self) -> &'static str {
        match self {
            Self::SpecialistCentre => "Specialist Centre",
            Self::SpecialistClinic => "Specialist Clinic",
            Self::MentalHealth => "Mental Health",
            Self::Rehabilitation => "Rehabilitation",
            Self::CommunityService => "Community Service",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLocation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub postcode: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Document,
    Website,
    Contact,
    Service,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResource {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub resource_type: ResourceType,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Result of one "Generate Assessment" action. Held in memory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientAssessment {
    pub id: AssessmentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub clinician_id: ClinicianId,
    pub symptoms: Vec<Symptom>,
    pub postcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub recommendations: Vec<RecommendationResource>,
    pub local_services: Vec<ServiceLocation>,
}
