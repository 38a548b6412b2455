use metrics_exporter_prometheus::PrometheusHandle;
use postcovid::assessment::Severity;
use postcovid::config::AppConfig;
use postcovid::error::AppError;
use postcovid::telemetry;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Symptom argument in the form `id` or `id:severity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SymptomArg {
    pub(crate) id: String,
    pub(crate) severity: Option<Severity>,
}

pub(crate) fn parse_symptom(raw: &str) -> Result<SymptomArg, String> {
    let raw = raw.trim();
    let (id, severity) = match raw.split_once(':') {
        Some((id, severity)) => {
            let severity = Severity::parse(severity).ok_or_else(|| {
                format!("unknown severity '{severity}' (expected mild, moderate, or severe)")
            })?;
            (id, Some(severity))
        }
        None => (raw, None),
    };

    if id.is_empty() {
        return Err(format!("symptom id missing in '{raw}'"));
    }

    Ok(SymptomArg {
        id: id.to_string(),
        severity,
    })
}

/// Loads configuration and installs stderr logging for one-shot commands.
pub(crate) fn cli_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_cli(&config.telemetry)?;
    Ok(config)
}
