use super::domain::{Symptom, SymptomGroup, SymptomId};
use std::sync::OnceLock;

static STANDARD_CATALOG: OnceLock<SymptomCatalog> = OnceLock::new();

/// Read-only symptom catalog partitioned by clinical category.
#[derive(Debug)]
pub struct SymptomCatalog {
    groups: Vec<SymptomGroup>,
}

impl SymptomCatalog {
    pub fn standard() -> &'static Self {
        STANDARD_CATALOG.get_or_init(|| Self {
            groups: standard_symptom_groups(),
        })
    }

    pub fn groups(&self) -> &[SymptomGroup] {
        &self.groups
    }

    pub fn find(&self, id: &str) -> Option<&Symptom> {
        self.groups
            .iter()
            .flat_map(|group| group.symptoms.iter())
            .find(|symptom| symptom.id.as_str() == id)
    }

    pub fn group_of(&self, id: &str) -> Option<&SymptomGroup> {
        self.groups
            .iter()
            .find(|group| group.symptoms.iter().any(|symptom| symptom.id.as_str() == id))
    }

    pub fn symptoms(&self) -> impl Iterator<Item = &Symptom> {
        self.groups.iter().flat_map(|group| group.symptoms.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.symptoms.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn symptom(id: &str, name: &str, description: &str) -> Symptom {
    Symptom {
        id: SymptomId::from(id),
        name: name.to_string(),
        description: description.to_string(),
        severity: None,
    }
}

fn group(id: &str, name: &str, symptoms: Vec<Symptom>) -> SymptomGroup {
    SymptomGroup {
        id: id.to_string(),
        name: name.to_string(),
        symptoms,
    }
}

fn standard_symptom_groups() -> Vec<SymptomGroup> {
    vec![
        group(
            "respiratory",
            "Respiratory Symptoms",
            vec![
                symptom(
                    "breathlessness",
                    "Breathlessness",
                    "Shortness of breath or difficulty breathing",
                ),
                symptom(
                    "cough",
                    "Persistent Cough",
                    "Cough lasting more than 8 weeks after infection",
                ),
                symptom("chest-pain", "Chest Pain", "Pain or discomfort in the chest"),
                symptom(
                    "oxygen",
                    "Oxygen Issues",
                    "Low blood oxygen levels or need for supplemental oxygen",
                ),
            ],
        ),
        group(
            "fatigue",
            "Fatigue & Physical",
            vec![
                symptom("fatigue", "Fatigue", "Extreme tiredness not relieved by rest"),
                symptom(
                    "post-exertional-malaise",
                    "Post-Exertional Malaise",
                    "Worsening of symptoms after physical or mental activities",
                ),
                symptom("muscle-pain", "Muscle Pain", "Aches or pains in muscles"),
                symptom("joint-pain", "Joint Pain", "Pain in one or more joints"),
            ],
        ),
        group(
            "cognitive",
            "Cognitive & Neurological",
            vec![
                symptom(
                    "brain-fog",
                    "Brain Fog",
                    "Problems with thinking clearly, concentrating or memory issues",
                ),
                symptom("headache", "Headache", "Ongoing headaches since COVID infection"),
                symptom(
                    "sleep-disturbance",
                    "Sleep Disturbance",
                    "Difficulty falling or staying asleep",
                ),
                symptom(
                    "pins-needles",
                    "Pins and Needles",
                    "Numbness or tingling in extremities",
                ),
                symptom("dizziness", "Dizziness", "Light-headedness or feeling faint"),
            ],
        ),
        group(
            "psychological",
            "Psychological & Emotional",
            vec![
                symptom("anxiety", "Anxiety", "Persistent feelings of anxiety or worry"),
                symptom("depression", "Depression", "Low mood or feelings of hopelessness"),
                symptom(
                    "ptsd",
                    "PTSD",
                    "Post-traumatic stress symptoms related to COVID experience",
                ),
            ],
        ),
        group(
            "cardiovascular",
            "Cardiovascular Symptoms",
            vec![
                symptom(
                    "palpitations",
                    "Palpitations",
                    "Noticeable heartbeats or racing heart",
                ),
                symptom(
                    "postural-symptoms",
                    "Postural Symptoms",
                    "Dizziness or heart rate changes when standing (e.g., POTS)",
                ),
            ],
        ),
        group(
            "gastrointestinal",
            "Gastrointestinal Symptoms",
            vec![
                symptom("abdominal-pain", "Abdominal Pain", "Pain in the stomach or abdomen"),
                symptom("nausea", "Nausea", "Feeling of sickness or urge to vomit"),
                symptom("diarrhea", "Diarrhea", "Loose, watery stools"),
                symptom(
                    "appetite-changes",
                    "Appetite Changes",
                    "Changes in appetite or weight",
                ),
            ],
        ),
        group(
            "ear-nose-throat",
            "ENT & Other Symptoms",
            vec![
                symptom(
                    "loss-smell-taste",
                    "Loss of Smell/Taste",
                    "Reduced or altered sense of smell or taste",
                ),
                symptom("tinnitus", "Tinnitus", "Ringing or buzzing in ears"),
                symptom("sore-throat", "Sore Throat", "Persistent sore throat"),
                symptom("skin-rashes", "Skin Rashes", "Skin rashes or changes"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn symptom_ids_are_unique_across_groups() {
        let catalog = SymptomCatalog::standard();
        let mut seen = HashSet::new();
        for symptom in catalog.symptoms() {
            assert!(
                seen.insert(symptom.id.as_str()),
                "duplicate symptom id {}",
                symptom.id
            );
        }
        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn catalog_covers_seven_clinical_categories() {
        let catalog = SymptomCatalog::standard();
        let ids: Vec<&str> = catalog.groups().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "respiratory",
                "fatigue",
                "cognitive",
                "psychological",
                "cardiovascular",
                "gastrointestinal",
                "ear-nose-throat",
            ]
        );
        assert_eq!(catalog.len(), 26);
    }

    #[test]
    fn lookups_resolve_symptom_and_group() {
        let catalog = SymptomCatalog::standard();
        let brain_fog = catalog.find("brain-fog").expect("brain fog present");
        assert_eq!(brain_fog.name, "Brain Fog");
        assert!(brain_fog.severity.is_none());
        assert_eq!(
            catalog.group_of("tinnitus").map(|g| g.id.as_str()),
            Some("ear-nose-throat")
        );
        assert!(catalog.find("unknown").is_none());
    }
}
