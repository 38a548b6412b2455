use crate::infra::{cli_config, parse_symptom, SymptomArg};
use chrono::Utc;
use clap::Args;
use postcovid::assessment::{
    export_to_dir, render_json, AssessmentForm, AssessmentService, FormError, PatientAssessment,
    SymptomCatalog,
};
use postcovid::error::AppError;
use postcovid::session::{FileSessionStore, SessionContext, SessionStore};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Symptom to include, as `id` or `id:severity` (repeatable)
    #[arg(short, long = "symptom", value_parser = parse_symptom)]
    symptoms: Vec<SymptomArg>,
    /// Patient postcode within Kent & Medway
    #[arg(short, long)]
    postcode: String,
    /// Free-text clinician notes
    #[arg(long)]
    notes: Option<String>,
    /// Write the assessment as JSON into the export directory
    #[arg(long)]
    export: bool,
    /// Override the configured export directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// Print the assessment JSON instead of the summary
    #[arg(long)]
    json: bool,
    /// Skip the simulated generation delay
    #[arg(long)]
    immediate: bool,
}

pub(crate) fn run_symptoms() -> Result<(), AppError> {
    let catalog = SymptomCatalog::standard();
    println!("Symptom catalog ({} symptoms)", catalog.len());
    for group in catalog.groups() {
        println!("\n{}", group.name);
        for symptom in &group.symptoms {
            println!("  - {:<24} {}", symptom.id.as_str(), symptom.name);
        }
    }
    Ok(())
}

pub(crate) async fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let mut config = cli_config()?;
    if args.immediate {
        config.assessment.generation_latency = Duration::ZERO;
    }
    if let Some(dir) = args.export_dir.clone() {
        config.assessment.export_dir = dir;
    }

    let store = FileSessionStore::new(&config.session.store_dir);
    let session = match store.load()? {
        Some(user) => SessionContext::for_user(&user),
        None => SessionContext::anonymous(),
    };

    let service = AssessmentService::new(&config.assessment);
    let mut form = AssessmentForm::new();
    select_symptoms(&mut form, &args.symptoms)?;
    form.set_postcode(&args.postcode)?;
    if let Some(notes) = &args.notes {
        form.set_notes(notes)?;
    }

    info!(
        symptoms = form.selected().len(),
        authenticated = session.is_authenticated(),
        "generating assessment"
    );
    let assessment = form.submit(&service, &session).await?;

    if args.json {
        println!("{}", render_json(assessment)?);
    } else {
        print_summary(assessment);
    }

    if args.export {
        let path = export_to_dir(assessment, &config.assessment.export_dir, Utc::now())?;
        println!("\nExported to {}", path.display());
    }

    Ok(())
}

/// Repeated ids keep their first occurrence, severity included.
fn select_symptoms(form: &mut AssessmentForm, symptoms: &[SymptomArg]) -> Result<(), FormError> {
    for symptom in symptoms {
        if !form.select_symptom(&symptom.id)? {
            continue;
        }
        if let Some(severity) = symptom.severity {
            form.set_severity(&symptom.id, severity)?;
        }
    }
    Ok(())
}

fn print_summary(assessment: &PatientAssessment) {
    println!("Post-COVID assessment {}", assessment.id.0);
    println!(
        "- Created {} by clinician {}",
        assessment.created_at.format("%Y-%m-%d %H:%M UTC"),
        assessment.clinician_id.0
    );
    println!("- Postcode: {}", assessment.postcode);

    println!("\nSymptoms:");
    for symptom in &assessment.symptoms {
        let severity = symptom
            .severity
            .map(|severity| severity.label())
            .unwrap_or("unrated");
        println!("  - {} ({})", symptom.name, severity);
    }

    if let Some(notes) = &assessment.notes {
        println!("\nNotes: {}", notes);
    }

    println!("\nRecommendations:");
    for resource in &assessment.recommendations {
        println!("  - {}", resource.title);
        println!("    {}", resource.description);
        if let Some(url) = &resource.url {
            println!("    {}", url);
        }
    }

    if assessment.local_services.is_empty() {
        println!("\nLocal services: none matched");
    } else {
        println!("\nLocal services:");
        for location in &assessment.local_services {
            let kind = location
                .service_type
                .map(|kind| kind.label())
                .unwrap_or("Service");
            println!("  - {} [{}]", location.name, kind);
            println!("    {}, {}", location.address, location.postcode);
            println!("    Tel: {}", location.phone);
        }
    }
}
