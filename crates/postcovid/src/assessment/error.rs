/// Input problems surfaced next to the offending field. They block generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Postcode is required")]
    PostcodeRequired,
    #[error("Please enter a valid UK postcode")]
    InvalidPostcode,
    #[error("This tool is for Kent & Medway region only")]
    OutsideRegion,
    #[error("Please select at least one symptom to continue")]
    NoSymptomsSelected,
}

impl ValidationError {
    /// Form field the message belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::PostcodeRequired | Self::InvalidPostcode | Self::OutsideRegion => "postcode",
            Self::NoSymptomsSelected => "symptoms",
        }
    }
}

/// Failure while computing results after validation passed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationFailure {
    #[error("symptom '{0}' is not in the catalog")]
    UnknownSymptom(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to generate assessment results: {0}")]
    Generation(#[from] GenerationFailure),
}
