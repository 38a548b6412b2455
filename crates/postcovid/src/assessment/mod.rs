//! Symptom assessment: location validation, recommendation selection, and
//! service lookup over static Kent & Medway tables.

pub mod catalog;
pub mod domain;
pub mod error;
pub mod export;
pub mod form;
pub mod postcode;
pub mod recommendations;
pub mod router;
pub mod service;
pub mod services;

#[cfg(test)]
mod tests;

pub use catalog::SymptomCatalog;
pub use domain::{
    AssessmentId, ClinicianId, PatientAssessment, RecommendationResource, ResourceType,
    ServiceLocation, ServiceType, Severity, Symptom, SymptomGroup, SymptomId,
};
pub use error::{AssessmentError, GenerationFailure, ValidationError};
pub use export::{export_file_name, export_to_dir, render_json, ExportError};
pub use form::{AssessmentForm, FormError, FormPhase};
pub use postcode::{
    format_postcode, is_in_kent_medway, is_kent_medway_place, is_valid_uk_postcode,
    normalize_postcode, RegionPolicy,
};
pub use recommendations::{get_recommendations, SymptomCategory};
pub use router::{assessment_router, AssessmentApi};
pub use service::{AssessmentRequest, AssessmentService, SymptomSelection};
pub use services::{find_local_services, kent_medway_services};
