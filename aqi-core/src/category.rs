//! AQI category bands.
//!
//! The six Indian National AQI categories are a total step function over the
//! AQI value. Every component that needs a category, colour, CSS class or
//! descriptive text derives it from [`AQI_BANDS`] so they can never disagree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six ordered AQI categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    Severe,
}

/// Declarative description of a single category band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryBand {
    pub category: AqiCategory,
    /// Inclusive lower bound, informational (the lookup only uses `upper`).
    pub lower: u32,
    /// Inclusive upper bound; `None` for the open-ended top band.
    pub upper: Option<u32>,
    /// Hex colour used for markers, chart points and text.
    pub color: &'static str,
    pub css_class: &'static str,
    pub description: &'static str,
    pub risk_level: &'static str,
    pub activities: &'static [&'static str],
    /// Position of this band's colour in the vertical chart fill gradient (0..=1).
    pub gradient_stop: f64,
}

pub const AQI_BANDS: [CategoryBand; 6] = [
    CategoryBand {
        category: AqiCategory::Good,
        lower: 0,
        upper: Some(50),
        color: "#00e400",
        css_class: "aqi-good",
        description: "Air quality is considered satisfactory, and air pollution poses little or no risk.",
        risk_level: "Low",
        activities: &["Outdoor sports", "Jogging", "Cycling", "Walking", "Gardening"],
        gradient_stop: 0.0,
    },
    CategoryBand {
        category: AqiCategory::Satisfactory,
        lower: 51,
        upper: Some(100),
        color: "#ffff00",
        css_class: "aqi-satisfactory",
        description: "Air quality is acceptable; however, there may be a moderate health concern for a very small number of people.",
        risk_level: "Low",
        activities: &["Light outdoor activities", "Walking", "Gardening"],
        gradient_stop: 0.2,
    },
    CategoryBand {
        category: AqiCategory::Moderate,
        lower: 101,
        upper: Some(200),
        color: "#ff7e00",
        css_class: "aqi-moderate",
        description: "Members of sensitive groups may experience health effects. The general public is not likely to be affected.",
        risk_level: "Medium",
        activities: &["Indoor activities", "Light indoor exercise"],
        gradient_stop: 0.4,
    },
    CategoryBand {
        category: AqiCategory::Poor,
        lower: 201,
        upper: Some(300),
        color: "#ff0000",
        css_class: "aqi-poor",
        description: "Everyone may begin to experience health effects; members of sensitive groups may experience more serious health effects.",
        risk_level: "High",
        activities: &["Indoor activities only", "Avoid outdoor exercise"],
        gradient_stop: 0.6,
    },
    CategoryBand {
        category: AqiCategory::VeryPoor,
        lower: 301,
        upper: Some(400),
        color: "#8f3f97",
        css_class: "aqi-very-poor",
        description: "Health warnings of emergency conditions. The entire population is more likely to be affected.",
        risk_level: "Very High",
        activities: &["Stay indoors", "Minimal outdoor exposure"],
        gradient_stop: 0.8,
    },
    CategoryBand {
        category: AqiCategory::Severe,
        lower: 401,
        upper: None,
        color: "#7e0023",
        css_class: "aqi-severe",
        description: "Health alert: everyone may experience more serious health effects.",
        risk_level: "Hazardous",
        activities: &["Emergency indoor shelter", "No outdoor activities"],
        gradient_stop: 1.0,
    },
];

/// CSS class for category labels that are not recognised.
pub const UNKNOWN_CSS_CLASS: &str = "aqi-unknown";

impl AqiCategory {
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Satisfactory,
        AqiCategory::Moderate,
        AqiCategory::Poor,
        AqiCategory::VeryPoor,
        AqiCategory::Severe,
    ];

    /// Map an AQI value onto its category. Values at a boundary belong to the
    /// lower band (50 is Good, 51 is Satisfactory).
    pub fn from_aqi(aqi: f64) -> Self {
        AQI_BANDS
            .iter()
            .find(|band| match band.upper {
                Some(upper) => aqi <= f64::from(upper),
                None => true,
            })
            .map(|band| band.category)
            .unwrap_or(AqiCategory::Severe)
    }

    /// Parse a display label such as `"Very Poor"`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Satisfactory => "Satisfactory",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
        }
    }

    pub fn band(self) -> &'static CategoryBand {
        // AQI_BANDS is ordered like the enum.
        &AQI_BANDS[self as usize]
    }

    pub fn color(self) -> &'static str {
        self.band().color
    }

    pub fn css_class(self) -> &'static str {
        self.band().css_class
    }

    pub fn description(self) -> &'static str {
        self.band().description
    }

    pub fn risk_level(self) -> &'static str {
        self.band().risk_level
    }

    pub fn activities(self) -> &'static [&'static str] {
        self.band().activities
    }

    /// Human readable range, e.g. `"51-100"` or `"401+"`.
    pub fn range_label(self) -> String {
        let band = self.band();
        match band.upper {
            Some(upper) => format!("{}-{}", band.lower, upper),
            None => format!("{}+", band.lower),
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Colour for a raw AQI value.
pub fn aqi_color(aqi: f64) -> &'static str {
    AqiCategory::from_aqi(aqi).color()
}

/// CSS class for a category label coming from the backend.
pub fn css_class_for_label(label: &str) -> &'static str {
    AqiCategory::from_label(label)
        .map(AqiCategory::css_class)
        .unwrap_or(UNKNOWN_CSS_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(AqiCategory::from_aqi(0.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(50.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(51.0), AqiCategory::Satisfactory);
        assert_eq!(AqiCategory::from_aqi(100.0), AqiCategory::Satisfactory);
        assert_eq!(AqiCategory::from_aqi(101.0), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(200.0), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(201.0), AqiCategory::Poor);
        assert_eq!(AqiCategory::from_aqi(300.0), AqiCategory::Poor);
        assert_eq!(AqiCategory::from_aqi(301.0), AqiCategory::VeryPoor);
        assert_eq!(AqiCategory::from_aqi(400.0), AqiCategory::VeryPoor);
        assert_eq!(AqiCategory::from_aqi(401.0), AqiCategory::Severe);
        assert_eq!(AqiCategory::from_aqi(999.0), AqiCategory::Severe);
    }

    #[test]
    fn test_category_and_color_agree_for_every_integer() {
        for aqi in 0..=600u32 {
            let category = AqiCategory::from_aqi(f64::from(aqi));
            let band = category.band();
            assert!(aqi >= band.lower, "aqi {aqi} below band {category}");
            if let Some(upper) = band.upper {
                assert!(aqi <= upper, "aqi {aqi} above band {category}");
            }
            assert_eq!(aqi_color(f64::from(aqi)), band.color);
        }
    }

    #[test]
    fn test_bands_are_ordered_like_enum() {
        for (index, band) in AQI_BANDS.iter().enumerate() {
            assert_eq!(band.category as usize, index);
        }
        for pair in AQI_BANDS.windows(2) {
            let upper = pair[0].upper.unwrap();
            assert_eq!(upper + 1, pair[1].lower);
        }
    }

    #[test]
    fn test_labels_round_trip() {
        for category in AqiCategory::ALL {
            assert_eq!(AqiCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(AqiCategory::from_label("very poor"), Some(AqiCategory::VeryPoor));
        assert_eq!(AqiCategory::from_label("Hazy"), None);
        assert_eq!(css_class_for_label("Hazy"), UNKNOWN_CSS_CLASS);
        assert_eq!(css_class_for_label("Poor"), "aqi-poor");
    }

    #[test]
    fn test_serde_uses_display_labels() {
        let json = serde_json::to_string(&AqiCategory::VeryPoor).unwrap();
        assert_eq!(json, "\"Very Poor\"");
        let parsed: AqiCategory = serde_json::from_str("\"Severe\"").unwrap();
        assert_eq!(parsed, AqiCategory::Severe);
    }

    #[test]
    fn test_range_labels() {
        assert_eq!(AqiCategory::Satisfactory.range_label(), "51-100");
        assert_eq!(AqiCategory::Severe.range_label(), "401+");
    }
}
