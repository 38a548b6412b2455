//! End-to-end scenarios through the public assessment API.

use postcovid::assessment::{
    find_local_services, format_postcode, get_recommendations, is_in_kent_medway,
    is_valid_uk_postcode, normalize_postcode, AssessmentForm, AssessmentService, FormPhase,
    ServiceType, SymptomCatalog, SymptomCategory,
};
use postcovid::session::{MemorySessionStore, MockAuthenticator, SessionContext, SessionStore};
use std::time::Duration;

#[test]
fn postcode_helpers_match_documented_examples() {
    assert_eq!(normalize_postcode("me7 5ny"), "ME75NY");
    assert_eq!(format_postcode("me7 5ny"), "ME7 5NY");
    assert!(!is_in_kent_medway("SW1A 1AA"));
    assert!(is_in_kent_medway("CT1 3NG"));
    assert!(!is_valid_uk_postcode(""));
    assert!(!is_in_kent_medway(""));
}

#[test]
fn every_catalog_symptom_produces_a_consistent_recommendation_set() {
    let catalog = SymptomCatalog::standard();
    for symptom in catalog.symptoms() {
        let selection = [symptom.id.as_str()];
        let recommendations = get_recommendations(&selection);
        let last = recommendations.last().expect("universal record present");
        assert_eq!(last.title, "NICE Guidelines for Post-COVID Syndrome");

        let triggered = SymptomCategory::ORDERED
            .iter()
            .any(|category| category.is_triggered_by(&selection));
        assert_eq!(recommendations.len() > 1, triggered, "symptom {}", symptom.id);
    }
}

#[test]
fn anxiety_services_are_mental_health_or_specialist_centres() {
    for postcode in ["ME7 5NY", "CT1 3NG", "", "anything"] {
        let services = find_local_services(postcode, &["anxiety"]);
        assert!(!services.is_empty());
        assert!(services.iter().all(|service| matches!(
            service.service_type,
            Some(ServiceType::MentalHealth | ServiceType::SpecialistCentre)
        )));
    }
}

#[test]
fn empty_selection_returns_first_three_services_in_catalog_order() {
    let none: [&str; 0] = [];
    let services = find_local_services("DA2 8DA", &none);
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Kent & Medway Long COVID Assessment Centre",
            "Canterbury Respiratory Clinic",
            "Maidstone Fatigue Management Service",
        ]
    );
}

#[tokio::test]
async fn fatigue_and_brain_fog_in_maidstone() {
    let service = AssessmentService::immediate();
    let mut form = AssessmentForm::new();
    form.toggle_symptom("fatigue").expect("select fatigue");
    form.toggle_symptom("brain-fog").expect("select brain fog");
    form.set_postcode("me16 9qq").expect("postcode");

    let assessment = form
        .submit(&service, &SessionContext::anonymous())
        .await
        .expect("assessment generated");

    assert_eq!(assessment.postcode, "ME16 9QQ");
    let titles: Vec<&str> = assessment
        .recommendations
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Activity Pacing",
            "Kent & Medway Long COVID Rehabilitation Program",
            "Cognitive Assessment",
            "Sleep Hygiene Guide",
            "NICE Guidelines for Post-COVID Syndrome",
        ]
    );
    let service_ids: Vec<&str> = assessment
        .local_services
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(service_ids, vec!["1", "2", "3"]);
    assert_eq!(form.phase(), &FormPhase::ResultsReady);
}

#[tokio::test]
async fn stored_login_attributes_assessments() {
    let store = MemorySessionStore::default();
    let user = MockAuthenticator::new(Duration::ZERO)
        .login("nurse.jones@nhs.net", "secret")
        .await
        .expect("login");
    store.save(&user).expect("save session");

    let restored = store.load().expect("load").expect("user present");
    let session = SessionContext::for_user(&restored);

    let mut form = AssessmentForm::new();
    form.toggle_symptom("cough").expect("select");
    form.set_postcode("TN2 4QJ").expect("postcode");
    let assessment = form
        .submit(&AssessmentService::immediate(), &session)
        .await
        .expect("assessment generated");

    assert_eq!(assessment.clinician_id.0, "2");
}
