use super::domain::{RecommendationResource, ResourceType};
use serde::Serialize;
use std::sync::OnceLock;

/// Symptom categories that drive recommendation blocks and service filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCategory {
    Respiratory,
    Fatigue,
    Cognitive,
    Psychological,
}

impl SymptomCategory {
    /// Block order used when concatenating recommendations.
    pub const ORDERED: [SymptomCategory; 4] = [
        SymptomCategory::Respiratory,
        SymptomCategory::Fatigue,
        SymptomCategory::Cognitive,
        SymptomCategory::Psychological,
    ];

    /// Only these ids trigger the category; other catalog members of the same group do not.
    pub fn trigger_ids(self) -> &'static [&'static str] {
        match self {
            Self::Respiratory => &["breathlessness", "cough", "chest-pain"],
            Self::Fatigue => &["fatigue", "post-exertional-malaise"],
            Self::Cognitive => &["brain-fog", "headache", "sleep-disturbance"],
            Self::Psychological => &["anxiety", "depression", "ptsd"],
        }
    }

    pub fn is_triggered_by<S: AsRef<str>>(self, selected: &[S]) -> bool {
        let triggers = self.trigger_ids();
        selected
            .iter()
            .any(|id| triggers.contains(&id.as_ref()))
    }

    fn block(self) -> &'static [&'static str] {
        match self {
            Self::Respiratory => &["1", "2"],
            Self::Fatigue => &["3", "4"],
            Self::Cognitive => &["5", "6"],
            Self::Psychological => &["7", "8", "9"],
        }
    }
}

/// Appended to every result regardless of selection.
pub const UNIVERSAL_RECOMMENDATION_ID: &str = "10";

static RECOMMENDATION_POOL: OnceLock<Vec<RecommendationResource>> = OnceLock::new();

pub fn recommendation_pool() -> &'static [RecommendationResource] {
    RECOMMENDATION_POOL.get_or_init(standard_recommendations)
}

/// Categories matched by the selection, in block order.
pub fn matched_categories<S: AsRef<str>>(selected: &[S]) -> Vec<SymptomCategory> {
    SymptomCategory::ORDERED
        .into_iter()
        .filter(|category| category.is_triggered_by(selected))
        .collect()
}

/// Concatenates the fixed block for each matched category, then the universal
/// guideline record. Selection order and severity have no influence.
pub fn get_recommendations<S: AsRef<str>>(selected: &[S]) -> Vec<RecommendationResource> {
    let mut ids: Vec<&str> = matched_categories(selected)
        .into_iter()
        .flat_map(|category| category.block().iter().copied())
        .collect();
    ids.push(UNIVERSAL_RECOMMENDATION_ID);

    let pool = recommendation_pool();
    ids.into_iter()
        .filter_map(|id| pool.iter().find(|resource| resource.id == id))
        .cloned()
        .collect()
}

fn resource(
    id: &str,
    title: &str,
    description: &str,
    url: Option<&str>,
    resource_type: ResourceType,
    tags: &[&str],
) -> RecommendationResource {
    RecommendationResource {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        url: url.map(str::to_string),
        resource_type,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

fn standard_recommendations() -> Vec<RecommendationResource> {
    vec![
        resource(
            "1",
            "Respiratory Assessment",
            "Recommend chest X-ray, spirometry, and oxygen saturation monitoring.",
            None,
            ResourceType::Document,
            &["respiratory", "clinical"],
        ),
        resource(
            "2",
            "Breathlessness Management",
            "Breathing exercises and techniques to manage breathlessness.",
            Some("https://www.blf.org.uk/support-for-you/breathlessness/how-to-manage-breathlessness"),
            ResourceType::Website,
            &["respiratory", "self-management"],
        ),
        resource(
            "3",
            "Activity Pacing",
            "Techniques to manage energy and avoid post-exertional malaise.",
            None,
            ResourceType::Document,
            &["fatigue", "self-management"],
        ),
        resource(
            "4",
            "Kent & Medway Long COVID Rehabilitation Program",
            "Specialized rehabilitation program for post-COVID fatigue.",
            None,
            ResourceType::Service,
            &["fatigue", "rehabilitation"],
        ),
        resource(
            "5",
            "Cognitive Assessment",
            "Detailed cognitive assessment and management strategies.",
            None,
            ResourceType::Document,
            &["cognitive", "clinical"],
        ),
        resource(
            "6",
            "Sleep Hygiene Guide",
            "Techniques to improve sleep quality and duration.",
            Some("https://www.nhs.uk/live-well/sleep-and-tiredness/how-to-get-to-sleep/"),
            ResourceType::Website,
            &["sleep", "self-management"],
        ),
        resource(
            "7",
            "Mental Health Assessment",
            "Psychological assessment and support options.",
            None,
            ResourceType::Document,
            &["mental-health", "clinical"],
        ),
        resource(
            "8",
            "Kent & Medway Mental Health Services",
            "Local mental health support services.",
            None,
            ResourceType::Service,
            &["mental-health", "support"],
        ),
        resource(
            "9",
            "Online CBT Resources",
            "Self-guided cognitive behavioral therapy resources.",
            Some("https://www.nhs.uk/mental-health/self-help/guides-tools-and-activities/mental-wellbeing-audio-guides/"),
            ResourceType::Website,
            &["mental-health", "self-management"],
        ),
        resource(
            "10",
            "NICE Guidelines for Post-COVID Syndrome",
            "National guidelines for managing post-COVID syndrome.",
            Some("https://www.nice.org.uk/guidance/ng188"),
            ResourceType::Website,
            &["guidelines", "clinical"],
        ),
    ]
}
