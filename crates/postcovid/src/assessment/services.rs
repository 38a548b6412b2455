use super::domain::{ServiceLocation, ServiceType};
use super::recommendations::SymptomCategory;
use std::sync::OnceLock;
use tracing::debug;

/// Number of catalog entries returned when no symptom filter narrows the list.
pub const FALLBACK_SERVICE_COUNT: usize = 3;

static SERVICE_CATALOG: OnceLock<Vec<ServiceLocation>> = OnceLock::new();

pub fn kent_medway_services() -> &'static [ServiceLocation] {
    SERVICE_CATALOG.get_or_init(standard_services)
}

fn is_respiratory_service(service: &ServiceLocation) -> bool {
    matches!(
        service.service_type,
        Some(ServiceType::SpecialistCentre | ServiceType::SpecialistClinic)
    ) || service
        .service_name
        .as_deref()
        .is_some_and(|name| name.contains("Respiratory"))
}

fn is_mental_health_service(service: &ServiceLocation) -> bool {
    matches!(
        service.service_type,
        Some(ServiceType::MentalHealth | ServiceType::SpecialistCentre)
    )
}

/// Picks services for the selected symptoms.
///
/// `postcode` is accepted for interface parity but does not influence the
/// result: there is no proximity logic, every service is in Kent & Medway.
///
/// Filters compound. Respiratory symptoms narrow the catalog first, and
/// psychological symptoms narrow what is left, so a patient with both only
/// keeps services passing both filters. If the list is still the full catalog
/// afterwards, the first [`FALLBACK_SERVICE_COUNT`] entries are returned.
pub fn find_local_services<S: AsRef<str>>(postcode: &str, selected: &[S]) -> Vec<ServiceLocation> {
    let catalog = kent_medway_services();
    let mut services: Vec<&ServiceLocation> = catalog.iter().collect();

    if SymptomCategory::Respiratory.is_triggered_by(selected) {
        services.retain(|service| is_respiratory_service(service));
        debug!(postcode, remaining = services.len(), "applied respiratory service filter");
    }

    if SymptomCategory::Psychological.is_triggered_by(selected) {
        services.retain(|service| is_mental_health_service(service));
        debug!(postcode, remaining = services.len(), "applied mental health service filter");
    }

    if services.len() == catalog.len() {
        services.truncate(FALLBACK_SERVICE_COUNT);
    }

    services.into_iter().cloned().collect()
}

#[allow(clippy::too_many_arguments)]
fn service(
    id: &str,
    name: &str,
    address: &str,
    postcode: &str,
    phone: &str,
    email: Option<&str>,
    website: Option<&str>,
    description: &str,
    service_name: &str,
    service_type: ServiceType,
) -> ServiceLocation {
    ServiceLocation {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        postcode: postcode.to_string(),
        phone: phone.to_string(),
        email: email.map(str::to_string),
        website: website.map(str::to_string),
        description: Some(description.to_string()),
        service_name: Some(service_name.to_string()),
        service_type: Some(service_type),
    }
}

fn standard_services() -> Vec<ServiceLocation> {
    vec![
        service(
            "1",
            "Kent & Medway Long COVID Assessment Centre",
            "Medway Maritime Hospital, Windmill Road",
            "ME7 5NY",
            "01634 123456",
            Some("longcovid.medway@nhs.net"),
            Some("https://www.medway.nhs.uk/services/long-covid"),
            "Specialist post-COVID assessment and treatment service",
            "Post-COVID Assessment Service",
            ServiceType::SpecialistCentre,
        ),
        service(
            "2",
            "Canterbury Respiratory Clinic",
            "Kent & Canterbury Hospital, Ethelbert Road",
            "CT1 3NG",
            "01227 766877",
            None,
            Some("https://www.ekhuft.nhs.uk/respiratory"),
            "Specialized respiratory assessment and rehabilitation",
            "Respiratory Services",
            ServiceType::SpecialistClinic,
        ),
        service(
            "3",
            "Maidstone Fatigue Management Service",
            "Maidstone Hospital, Hermitage Lane",
            "ME16 9QQ",
            "01622 224100",
            None,
            None,
            "Specialized service for fatigue management and rehabilitation",
            "Fatigue Management Service",
            ServiceType::SpecialistClinic,
        ),
        service(
            "4",
            "Kent & Medway NHS Mental Health Services",
            "Priority House, Hermitage Lane",
            "ME16 9PH",
            "0300 222 0123",
            None,
            Some("https://www.kmpt.nhs.uk"),
            "Mental health services including support for post-COVID psychological symptoms",
            "Mental Health Services",
            ServiceType::MentalHealth,
        ),
        service(
            "5",
            "Darent Valley Hospital Pulmonary Rehabilitation",
            "Darent Valley Hospital, Darenth Wood Road",
            "DA2 8DA",
            "01322 428100",
            None,
            None,
            "Pulmonary rehabilitation program including post-COVID breathlessness",
            "Pulmonary Rehabilitation",
            ServiceType::Rehabilitation,
        ),
        service(
            "6",
            "Tunbridge Wells Community Respiratory Team",
            "Tunbridge Wells Hospital, Tonbridge Road",
            "TN2 4QJ",
            "01892 635884",
            None,
            None,
            "Community-based respiratory support including home visits",
            "Community Respiratory Team",
            ServiceType::CommunityService,
        ),
        service(
            "7",
            "East Kent Cognitive Assessment Service",
            "William Harvey Hospital, Kennington Road",
            "TN24 0LZ",
            "01233 633331",
            None,
            None,
            "Cognitive assessment and support for neurological symptoms",
            "Cognitive Assessment Service",
            ServiceType::SpecialistClinic,
        ),
        service(
            "8",
            "Medway Community Healthcare",
            "MCH House, Bailey Drive, Gillingham Business Park",
            "ME8 0PZ",
            "01634 337500",
            None,
            Some("https://www.medwaycommunityhealthcare.nhs.uk"),
            "Community healthcare services including post-COVID support",
            "Community Healthcare",
            ServiceType::CommunityService,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(services: &[ServiceLocation]) -> Vec<&str> {
        services.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn catalog_has_eight_regional_services() {
        let catalog = kent_medway_services();
        assert_eq!(catalog.len(), 8);
        assert!(catalog
            .iter()
            .all(|s| crate::assessment::postcode::is_in_kent_medway(&s.postcode)));
    }

    #[test]
    fn no_symptoms_falls_back_to_first_three() {
        let none: [&str; 0] = [];
        let services = find_local_services("ME7 5NY", &none);
        assert_eq!(ids(&services), vec!["1", "2", "3"]);
    }

    #[test]
    fn anxiety_keeps_mental_health_and_specialist_centre() {
        let services = find_local_services("CT1 3NG", &["anxiety"]);
        assert_eq!(ids(&services), vec!["1", "4"]);
        assert!(services.iter().all(|s| matches!(
            s.service_type,
            Some(ServiceType::MentalHealth | ServiceType::SpecialistCentre)
        )));
    }

    #[test]
    fn respiratory_keeps_specialists_and_respiratory_named_services() {
        let services = find_local_services("TN2 4QJ", &["cough"]);
        assert_eq!(ids(&services), vec!["1", "2", "3", "6", "7"]);
    }

    #[test]
    fn respiratory_and_psychological_filters_compound() {
        let services = find_local_services("ME16 9PH", &["breathlessness", "depression"]);
        assert_eq!(ids(&services), vec!["1"]);
    }

    #[test]
    fn postcode_does_not_change_results() {
        let selection = ["chest-pain"];
        assert_eq!(
            find_local_services("ME7 5NY", &selection),
            find_local_services("SW1A 1AA", &selection)
        );
    }

    #[test]
    fn non_filter_symptoms_use_fallback() {
        let services = find_local_services("ME16 9QQ", &["fatigue", "brain-fog"]);
        assert_eq!(ids(&services), vec!["1", "2", "3"]);
    }
}
