//! Lifecycle of one assessment form.
//!
//! `Idle -> SymptomsEntered -> Validating -> Invalid | Generating -> ResultsReady`,
//! and `ResultsReady -> Idle` on reset. No other phase can be reset.

use std::collections::BTreeMap;

use super::domain::{PatientAssessment, Severity, SymptomId};
use super::error::{AssessmentError, GenerationFailure, ValidationError};
use super::service::{AssessmentRequest, AssessmentService, SymptomSelection};
use crate::session::SessionContext;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    SymptomsEntered,
    /// Held only for the duration of [`AssessmentForm::begin_generation`];
    /// validation is synchronous, so callers never observe it.
    Validating,
    Invalid(ValidationError),
    Generating,
    ResultsReady,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("an assessment is already being generated")]
    GenerationPending,
    #[error("no generation is in progress")]
    NotGenerating,
    #[error("results are shown; start a new assessment before editing")]
    ResultsLocked,
    #[error("no results to clear; the current assessment is still being edited")]
    NoResults,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Failed to generate assessment results: {0}")]
    GenerationFailed(GenerationFailure),
}

/// Form state for a single clinical encounter.
#[derive(Debug, Clone)]
pub struct AssessmentForm {
    phase: FormPhase,
    selected: Vec<SymptomId>,
    severities: BTreeMap<SymptomId, Severity>,
    postcode: String,
    notes: String,
    assessment: Option<PatientAssessment>,
}

impl Default for AssessmentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentForm {
    pub fn new() -> Self {
        Self {
            phase: FormPhase::Idle,
            selected: Vec::new(),
            severities: BTreeMap::new(),
            postcode: String::new(),
            notes: String::new(),
            assessment: None,
        }
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn selected(&self) -> &[SymptomId] {
        &self.selected
    }

    pub fn severity(&self, id: &str) -> Option<Severity> {
        self.severities.get(&SymptomId::from(id)).copied()
    }

    pub fn postcode(&self) -> &str {
        &self.postcode
    }

    pub fn assessment(&self) -> Option<&PatientAssessment> {
        self.assessment.as_ref()
    }

    /// Inline message for the postcode or symptom field, if the last attempt failed.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match &self.phase {
            FormPhase::Invalid(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.phase == FormPhase::Generating
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        if self.phase == FormPhase::ResultsReady {
            return Err(FormError::ResultsLocked);
        }
        Ok(())
    }

    fn mark_edited(&mut self) {
        if matches!(self.phase, FormPhase::Idle) {
            self.phase = FormPhase::SymptomsEntered;
        }
    }

    /// Adds the symptom if absent, removes it (and its severity) otherwise.
    pub fn toggle_symptom(&mut self, id: &str) -> Result<bool, FormError> {
        self.ensure_editable()?;
        let id = SymptomId::from(id);
        let selected = match self.selected.iter().position(|existing| *existing == id) {
            Some(index) => {
                self.selected.remove(index);
                self.severities.remove(&id);
                false
            }
            None => {
                self.selected.push(id);
                true
            }
        };
        self.mark_edited();
        Ok(selected)
    }

    /// Selects the symptom unless it is already selected. Returns whether it
    /// was newly added.
    pub fn select_symptom(&mut self, id: &str) -> Result<bool, FormError> {
        self.ensure_editable()?;
        if self.selected.iter().any(|existing| existing.as_str() == id) {
            return Ok(false);
        }
        self.toggle_symptom(id)
    }

    /// Ignored for symptoms that are not currently selected.
    pub fn set_severity(&mut self, id: &str, severity: Severity) -> Result<(), FormError> {
        self.ensure_editable()?;
        let id = SymptomId::from(id);
        if self.selected.contains(&id) {
            self.severities.insert(id, severity);
        }
        Ok(())
    }

    pub fn set_postcode(&mut self, postcode: &str) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.postcode = postcode.to_string();
        self.mark_edited();
        Ok(())
    }

    pub fn set_notes(&mut self, notes: &str) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.notes = notes.to_string();
        self.mark_edited();
        Ok(())
    }

    fn snapshot(&self) -> AssessmentRequest {
        AssessmentRequest {
            symptoms: self
                .selected
                .iter()
                .map(|id| SymptomSelection {
                    id: id.clone(),
                    severity: self.severities.get(id).copied(),
                })
                .collect(),
            postcode: self.postcode.clone(),
            notes: Some(self.notes.clone()).filter(|notes| !notes.trim().is_empty()),
        }
    }

    /// Validates the current inputs and, on success, captures them for
    /// generation. Later edits do not reach the returned request.
    pub fn begin_generation(
        &mut self,
        service: &AssessmentService,
    ) -> Result<AssessmentRequest, FormError> {
        match self.phase {
            FormPhase::Generating => return Err(FormError::GenerationPending),
            FormPhase::ResultsReady => return Err(FormError::ResultsLocked),
            _ => {}
        }

        self.phase = FormPhase::Validating;
        let request = self.snapshot();
        if let Err(err) = service.validate(&request) {
            debug!(error = %err, "assessment form failed validation");
            self.phase = FormPhase::Invalid(err.clone());
            return Err(FormError::Invalid(err));
        }

        self.phase = FormPhase::Generating;
        Ok(request)
    }

    /// Records the outcome of the pending generation. Failures return the form
    /// to editing with inputs intact; nothing is retried.
    pub fn finish_generation(
        &mut self,
        outcome: Result<PatientAssessment, AssessmentError>,
    ) -> Result<&PatientAssessment, FormError> {
        if self.phase != FormPhase::Generating {
            return Err(FormError::NotGenerating);
        }

        match outcome {
            Ok(assessment) => {
                self.phase = FormPhase::ResultsReady;
                Ok(self.assessment.insert(assessment))
            }
            Err(AssessmentError::Validation(err)) => {
                self.phase = FormPhase::Invalid(err.clone());
                Err(FormError::Invalid(err))
            }
            Err(AssessmentError::Generation(failure)) => {
                debug!(error = %failure, "assessment generation failed; awaiting resubmission");
                self.phase = FormPhase::SymptomsEntered;
                Err(FormError::GenerationFailed(failure))
            }
        }
    }

    /// Runs validation, generation, and result capture in one step.
    pub async fn submit(
        &mut self,
        service: &AssessmentService,
        session: &SessionContext,
    ) -> Result<&PatientAssessment, FormError> {
        let request = self.begin_generation(service)?;
        let outcome = service.generate(session, request).await;
        self.finish_generation(outcome)
    }

    /// Clears every field and returns to `Idle`. Only results can be cleared.
    pub fn reset(&mut self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::ResultsReady => {
                *self = Self::new();
                Ok(())
            }
            FormPhase::Generating => Err(FormError::GenerationPending),
            _ => Err(FormError::NoResults),
        }
    }
}
