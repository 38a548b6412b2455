use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::PatientAssessment;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize assessment: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("post-covid-assessment-{}.json", at.timestamp_millis())
}

/// Pretty-printed JSON, the same document the download produces.
pub fn render_json(assessment: &PatientAssessment) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(assessment)?)
}

/// Writes the assessment into `dir` and returns the file path.
pub fn export_to_dir(
    assessment: &PatientAssessment,
    dir: &Path,
    at: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    let payload = render_json(assessment)?;
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(export_file_name(at));
    fs::write(&path, payload).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!(assessment_id = %assessment.id.0, path = %path.display(), "assessment exported");
    Ok(path)
}
