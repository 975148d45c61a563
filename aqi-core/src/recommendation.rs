//! Health recommendations keyed by AQI category.
//!
//! The local table is used whenever the backend does not supply a list. Some
//! entries have separate wording for people in a sensitive group.

use crate::category::AqiCategory;
use serde::{Deserialize, Serialize};

/// Visual/urgency tag of a recommendation card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Urgent,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Urgent => "urgent",
        }
    }

    /// The tag a whole category leans towards, used when converting advice
    /// that carries no per-entry severity.
    pub fn for_category(category: AqiCategory) -> Self {
        match category {
            AqiCategory::Good => Severity::Success,
            AqiCategory::Satisfactory => Severity::Info,
            AqiCategory::Moderate => Severity::Warning,
            AqiCategory::Poor | AqiCategory::VeryPoor | AqiCategory::Severe => Severity::Urgent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecommendation {
    pub title: String,
    #[serde(alias = "body")]
    pub content: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "type", alias = "severity")]
    pub severity: Severity,
}

/// Wording that may change with the sensitive-group flag.
#[derive(Debug, Clone, Copy)]
pub enum Phrase {
    Fixed(&'static str),
    Sensitive {
        sensitive: &'static str,
        general: &'static str,
    },
}

impl Phrase {
    pub fn resolve(self, sensitive_group: bool) -> &'static str {
        match self {
            Phrase::Fixed(text) => text,
            Phrase::Sensitive { sensitive, general } => {
                if sensitive_group {
                    sensitive
                } else {
                    general
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RecommendationRule {
    pub title: &'static str,
    pub content: Phrase,
    pub icon: &'static str,
    pub severity: Severity,
}

const fn rule(title: &'static str, content: Phrase, icon: &'static str, severity: Severity) -> RecommendationRule {
    RecommendationRule {
        title,
        content,
        icon,
        severity,
    }
}

const GOOD: &[RecommendationRule] = &[
    rule(
        "Enjoy Outdoor Activities",
        Phrase::Fixed("Air quality is excellent. Perfect time for outdoor activities, exercise, and sports."),
        "fa-running",
        Severity::Success,
    ),
    rule(
        "Open Windows",
        Phrase::Fixed("You can safely open windows and doors to let fresh air circulate in your home."),
        "fa-home",
        Severity::Success,
    ),
];

const SATISFACTORY: &[RecommendationRule] = &[
    rule(
        "Generally Safe",
        Phrase::Fixed("Air quality is acceptable for most people. Outdoor activities are generally safe."),
        "fa-check-circle",
        Severity::Success,
    ),
    rule(
        "Monitor Sensitive Individuals",
        Phrase::Sensitive {
            sensitive: "Consider reducing prolonged outdoor activities if you experience symptoms.",
            general: "Sensitive individuals should monitor their health.",
        },
        "fa-heart",
        Severity::Info,
    ),
];

const MODERATE: &[RecommendationRule] = &[
    rule(
        "Limit Outdoor Activities",
        Phrase::Sensitive {
            sensitive: "Avoid prolonged outdoor activities. Consider wearing a mask when outside.",
            general: "Sensitive individuals should limit prolonged outdoor activities.",
        },
        "fa-exclamation-triangle",
        Severity::Warning,
    ),
    rule(
        "Use Air Purifiers",
        Phrase::Fixed("Consider using air purifiers indoors, especially in bedrooms and living areas."),
        "fa-wind",
        Severity::Info,
    ),
    rule(
        "Stay Hydrated",
        Phrase::Fixed("Drink plenty of water to help your body cope with air pollution."),
        "fa-tint",
        Severity::Info,
    ),
];

const POOR: &[RecommendationRule] = &[
    rule(
        "Avoid Outdoor Exercise",
        Phrase::Fixed("Avoid outdoor exercise and activities. Stay indoors as much as possible."),
        "fa-ban",
        Severity::Urgent,
    ),
    rule(
        "Wear N95 Masks",
        Phrase::Fixed("Wear N95 or equivalent masks when you must go outside."),
        "fa-head-side-mask",
        Severity::Urgent,
    ),
    rule(
        "Keep Windows Closed",
        Phrase::Fixed("Keep windows and doors closed. Use air conditioning with clean filters."),
        "fa-window-close",
        Severity::Warning,
    ),
    rule(
        "Monitor Health",
        Phrase::Sensitive {
            sensitive: "Monitor your health closely. Seek medical attention if you experience breathing difficulties.",
            general: "Sensitive individuals should monitor health closely.",
        },
        "fa-heartbeat",
        Severity::Urgent,
    ),
];

const VERY_POOR: &[RecommendationRule] = &[
    rule(
        "Stay Indoors",
        Phrase::Fixed("Stay indoors and avoid all outdoor activities. This is especially important for sensitive groups."),
        "fa-home",
        Severity::Urgent,
    ),
    rule(
        "Use High-Quality Masks",
        Phrase::Fixed("If you must go outside, wear N95 or P100 masks. Avoid cloth masks."),
        "fa-head-side-mask",
        Severity::Urgent,
    ),
    rule(
        "Run Air Purifiers",
        Phrase::Fixed("Run air purifiers continuously. Consider creating a clean air room."),
        "fa-wind",
        Severity::Urgent,
    ),
    rule(
        "Seek Medical Advice",
        Phrase::Sensitive {
            sensitive: "Consider consulting a doctor, especially if you have respiratory conditions.",
            general: "Sensitive individuals should consider medical consultation.",
        },
        "fa-user-md",
        Severity::Urgent,
    ),
];

const SEVERE: &[RecommendationRule] = &[
    rule(
        "Emergency Precautions",
        Phrase::Fixed("This is a health emergency. Stay indoors and avoid all outdoor exposure."),
        "fa-exclamation-circle",
        Severity::Urgent,
    ),
    rule(
        "Seal Your Home",
        Phrase::Fixed("Seal gaps around doors and windows. Use tape if necessary to prevent outdoor air from entering."),
        "fa-shield-alt",
        Severity::Urgent,
    ),
    rule(
        "Medical Attention",
        Phrase::Fixed("Seek immediate medical attention if you experience any breathing difficulties or chest pain."),
        "fa-ambulance",
        Severity::Urgent,
    ),
    rule(
        "Emergency Kit",
        Phrase::Fixed("Keep emergency medications readily available. Have a plan for evacuation if necessary."),
        "fa-first-aid",
        Severity::Urgent,
    ),
];

/// The rules for a category, in display order.
pub fn rules_for(category: AqiCategory) -> &'static [RecommendationRule] {
    match category {
        AqiCategory::Good => GOOD,
        AqiCategory::Satisfactory => SATISFACTORY,
        AqiCategory::Moderate => MODERATE,
        AqiCategory::Poor => POOR,
        AqiCategory::VeryPoor => VERY_POOR,
        AqiCategory::Severe => SEVERE,
    }
}

/// Recommendations from the local table.
pub fn local_recommendations(category: AqiCategory, sensitive_group: bool) -> Vec<HealthRecommendation> {
    rules_for(category)
        .iter()
        .map(|rule| HealthRecommendation {
            title: rule.title.to_string(),
            content: rule.content.resolve(sensitive_group).to_string(),
            icon: rule.icon.to_string(),
            severity: rule.severity,
        })
        .collect()
}

/// Generic tips shown while no AQI value is known yet.
pub fn default_recommendations() -> Vec<HealthRecommendation> {
    vec![
        HealthRecommendation {
            title: "General Health Tips".to_string(),
            content: "Select a city to get personalized health recommendations based on current air quality conditions.".to_string(),
            icon: "fa-info-circle".to_string(),
            severity: Severity::Info,
        },
        HealthRecommendation {
            title: "Stay Healthy".to_string(),
            content: "Monitor air quality regularly. Stay hydrated throughout the day. Maintain good indoor air quality. Consider using air purifiers. Consult healthcare providers for respiratory concerns.".to_string(),
            icon: "fa-leaf".to_string(),
            severity: Severity::Success,
        },
    ]
}

/// Fields of the advice map some backends return instead of a list, with the
/// card title and icon each one becomes.
const ADVICE_FIELDS: [(&str, &str, &str); 5] = [
    ("general_advice", "General Advice", "fa-info-circle"),
    ("outdoor_activities", "Outdoor Activities", "fa-running"),
    ("mask_recommendation", "Mask Recommendation", "fa-head-side-mask"),
    ("indoor_advice", "Indoor Advice", "fa-home"),
    ("health_effects", "Health Effects", "fa-heartbeat"),
];

/// Convert an advice map (`{"general_advice": "...", ...}`) into cards.
/// Empty or missing fields are skipped.
pub fn from_advice_map(
    advice: &serde_json::Map<String, serde_json::Value>,
    category: AqiCategory,
) -> Vec<HealthRecommendation> {
    let severity = Severity::for_category(category);
    ADVICE_FIELDS
        .iter()
        .filter_map(|(key, title, icon)| {
            let text = advice.get(*key)?.as_str()?.trim();
            if text.is_empty() {
                return None;
            }
            Some(HealthRecommendation {
                title: (*title).to_string(),
                content: text.to_string(),
                icon: (*icon).to_string(),
                severity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        let sizes: Vec<usize> = AqiCategory::ALL.iter().map(|c| rules_for(*c).len()).collect();
        assert_eq!(sizes, vec![2, 2, 3, 4, 4, 4]);
    }

    #[test]
    fn test_poor_is_urgent_or_warning() {
        let recs = local_recommendations(AqiCategory::Poor, false);
        assert_eq!(recs.len(), 4);
        assert!(recs
            .iter()
            .all(|r| matches!(r.severity, Severity::Urgent | Severity::Warning)));
    }

    #[test]
    fn test_sensitive_wording_substitution() {
        let general = local_recommendations(AqiCategory::Moderate, false);
        let sensitive = local_recommendations(AqiCategory::Moderate, true);
        assert_eq!(
            general[0].content,
            "Sensitive individuals should limit prolonged outdoor activities."
        );
        assert_eq!(
            sensitive[0].content,
            "Avoid prolonged outdoor activities. Consider wearing a mask when outside."
        );
        // Fixed wording does not change.
        assert_eq!(general[1].content, sensitive[1].content);
    }

    #[test]
    fn test_severity_serializes_as_type() {
        let rec = &local_recommendations(AqiCategory::Good, false)[0];
        let value = serde_json::to_value(rec).unwrap();
        assert_eq!(value["type"], "success");
        let parsed: HealthRecommendation = serde_json::from_value(serde_json::json!({
            "title": "t",
            "body": "b",
            "severity": "urgent",
        }))
        .unwrap();
        assert_eq!(parsed.severity, Severity::Urgent);
        assert_eq!(parsed.content, "b");
        assert!(parsed.icon.is_empty());
    }

    #[test]
    fn test_from_advice_map_skips_empty_fields() {
        let advice = serde_json::json!({
            "general_advice": "Everyone should reduce outdoor activities.",
            "outdoor_activities": "",
            "mask_recommendation": "Wear N95 or equivalent mask outdoors.",
            "color_code": "#FF0000",
        });
        let recs = from_advice_map(advice.as_object().unwrap(), AqiCategory::Poor);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title, "General Advice");
        assert_eq!(recs[1].title, "Mask Recommendation");
        assert!(recs.iter().all(|r| r.severity == Severity::Urgent));
    }
}
