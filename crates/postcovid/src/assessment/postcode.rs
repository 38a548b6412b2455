//! UK postcode checks scoped to the Kent & Medway service region.
//!
//! Two location policies exist. [`RegionPolicy::PostcodeOnly`] is canonical and
//! rejects anything that is not a postcode. [`RegionPolicy::PostcodeOrPlaceName`]
//! additionally accepts a known town name, for clinicians who type the area
//! instead of the postcode; it must be switched on explicitly.

use super::error::ValidationError;
use regex::Regex;
use std::sync::OnceLock;

/// Outward-code prefixes covering Kent & Medway.
pub const KENT_MEDWAY_PREFIXES: [&str; 4] = ["CT", "ME", "TN", "DA"];

/// Place names accepted under [`RegionPolicy::PostcodeOrPlaceName`], lowercase.
pub const KENT_MEDWAY_PLACES: &[&str] = &[
    "kent",
    "medway",
    "canterbury",
    "maidstone",
    "chatham",
    "rochester",
    "gillingham",
    "strood",
    "rainham",
    "dartford",
    "gravesend",
    "swanley",
    "sevenoaks",
    "tonbridge",
    "tunbridge wells",
    "royal tunbridge wells",
    "ashford",
    "folkestone",
    "hythe",
    "dover",
    "deal",
    "sandwich",
    "margate",
    "ramsgate",
    "broadstairs",
    "whitstable",
    "herne bay",
    "faversham",
    "sittingbourne",
    "sheerness",
    "isle of sheppey",
    "edenbridge",
    "westerham",
    "cranbrook",
    "tenterden",
    "new romney",
];

static POSTCODE_SHAPE: OnceLock<Regex> = OnceLock::new();

fn postcode_shape() -> &'static Regex {
    POSTCODE_SHAPE.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z]{1,2}[0-9][A-Z0-9]? ?[0-9][A-Z]{2}$")
            .expect("postcode pattern compiles")
    })
}

/// Shape check only: one or two letters, a digit, an optional alphanumeric,
/// an optional space, a digit, two letters. No existence lookup.
pub fn is_valid_uk_postcode(input: &str) -> bool {
    postcode_shape().is_match(input)
}

pub fn normalize_postcode(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Prefix test against [`KENT_MEDWAY_PREFIXES`] after normalization.
pub fn is_in_kent_medway(input: &str) -> bool {
    let normalized = normalize_postcode(input);
    KENT_MEDWAY_PREFIXES
        .iter()
        .any(|prefix| normalized.starts_with(prefix))
}

pub fn is_kent_medway_place(input: &str) -> bool {
    let folded = input.trim().to_lowercase();
    KENT_MEDWAY_PLACES.iter().any(|place| *place == folded)
}

/// Normalizes, then separates the inward code (last three characters).
pub fn format_postcode(input: &str) -> String {
    let normalized = normalize_postcode(input);
    let chars: Vec<char> = normalized.chars().collect();
    if chars.len() > 3 {
        let split = chars.len() - 3;
        let outward: String = chars[..split].iter().collect();
        let inward: String = chars[split..].iter().collect();
        format!("{outward} {inward}")
    } else {
        normalized
    }
}

/// Which free-text locations count as inside the service region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegionPolicy {
    #[default]
    PostcodeOnly,
    PostcodeOrPlaceName,
}

impl RegionPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postcode-only" | "postcode" | "strict" => Some(Self::PostcodeOnly),
            "postcode-or-place" | "place" | "extended" => Some(Self::PostcodeOrPlaceName),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PostcodeOnly => "postcode-only",
            Self::PostcodeOrPlaceName => "postcode-or-place",
        }
    }

    pub fn contains(self, input: &str) -> bool {
        match self {
            Self::PostcodeOnly => is_in_kent_medway(input),
            Self::PostcodeOrPlaceName => is_in_kent_medway(input) || is_kent_medway_place(input),
        }
    }

    /// Runs the form checks in order (required, shape, region) and returns the
    /// value to store on the assessment.
    pub fn validate(self, input: &str) -> Result<String, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::PostcodeRequired);
        }

        if self == Self::PostcodeOrPlaceName && is_kent_medway_place(trimmed) {
            return Ok(trimmed.to_string());
        }

        if !is_valid_uk_postcode(trimmed) {
            return Err(ValidationError::InvalidPostcode);
        }

        if !is_in_kent_medway(trimmed) {
            return Err(ValidationError::OutsideRegion);
        }

        Ok(format_postcode(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_accepts_common_forms() {
        for postcode in ["ME7 5NY", "me7 5ny", "ME75NY", "CT1 3NG", "SW1A 1AA", "TN24 0LZ", "M1 1AE"] {
            assert!(is_valid_uk_postcode(postcode), "{postcode} should match");
        }
    }

    #[test]
    fn shape_rejects_malformed_input() {
        for input in [
            "",
            " ",
            "ME7  5NY",
            " ME7 5NY",
            "ME7 5NY ",
            "7ME 5NY",
            "ME7 5N",
            "MEE7 5NY",
            "ME7 55Y",
            "Maidstone",
        ] {
            assert!(!is_valid_uk_postcode(input), "{input:?} should not match");
        }
    }

    #[test]
    fn normalize_strips_whitespace_and_uppercases() {
        assert_eq!(normalize_postcode("me7 5ny"), "ME75NY");
        assert_eq!(normalize_postcode(" c t1\t3ng\n"), "CT13NG");
        assert_eq!(normalize_postcode(""), "");
    }

    #[test]
    fn region_prefixes() {
        assert!(is_in_kent_medway("CT1 3NG"));
        assert!(is_in_kent_medway("me16 9qq"));
        assert!(is_in_kent_medway("da2 8da"));
        assert!(is_in_kent_medway("T N2 4QJ"));
        assert!(!is_in_kent_medway("SW1A 1AA"));
        assert!(!is_in_kent_medway(""));
        assert!(!is_in_kent_medway("M1 1AE"));
    }

    #[test]
    fn format_inserts_single_space_before_inward_code() {
        assert_eq!(format_postcode("me7 5ny"), "ME7 5NY");
        assert_eq!(format_postcode("me169qq"), "ME16 9QQ");
        assert_eq!(format_postcode("  tn2   4qj "), "TN2 4QJ");
        assert_eq!(format_postcode("abc"), "ABC");
        assert_eq!(format_postcode(""), "");
    }

    #[test]
    fn format_is_idempotent() {
        for input in ["me7 5ny", "ME16 9QQ", "sw1a1aa", "ab", "abcd", "  x y z w ", "Tunbridge Wells", ""] {
            let once = format_postcode(input);
            assert_eq!(format_postcode(&once), once, "format not idempotent for {input:?}");
        }
    }

    #[test]
    fn strict_policy_rejects_place_names() {
        let policy = RegionPolicy::PostcodeOnly;
        assert!(!policy.contains("Maidstone"));
        assert_eq!(
            policy.validate("Maidstone"),
            Err(ValidationError::InvalidPostcode)
        );
    }

    #[test]
    fn extended_policy_accepts_known_places() {
        let policy = RegionPolicy::PostcodeOrPlaceName;
        assert!(policy.contains("  Royal Tunbridge Wells "));
        assert!(policy.contains("CANTERBURY"));
        assert!(!policy.contains("Brighton"));
        assert_eq!(policy.validate(" Maidstone "), Ok("Maidstone".to_string()));
        assert_eq!(
            policy.validate("Brighton"),
            Err(ValidationError::InvalidPostcode)
        );
        assert!(KENT_MEDWAY_PLACES.len() >= 35);
    }

    #[test]
    fn validate_reports_errors_in_form_order() {
        let policy = RegionPolicy::PostcodeOnly;
        assert_eq!(policy.validate(""), Err(ValidationError::PostcodeRequired));
        assert_eq!(policy.validate("   "), Err(ValidationError::PostcodeRequired));
        assert_eq!(policy.validate("not a postcode"), Err(ValidationError::InvalidPostcode));
        assert_eq!(policy.validate("SW1A 1AA"), Err(ValidationError::OutsideRegion));
        assert_eq!(policy.validate(" me16 9qq "), Ok("ME16 9QQ".to_string()));
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!(RegionPolicy::parse("postcode-only"), Some(RegionPolicy::PostcodeOnly));
        assert_eq!(
            RegionPolicy::parse(" Postcode-Or-Place "),
            Some(RegionPolicy::PostcodeOrPlaceName)
        );
        assert_eq!(RegionPolicy::parse("anywhere"), None);
    }
}
