//! Marker, popup and legend descriptions for the station map.

use aqi_core::category::{AqiCategory, AQI_BANDS};
use aqi_core::dates::format_timestamp;
use aqi_core::models::AqiReading;
use serde::Serialize;

pub const MAP_CONTAINER_ID: &str = "aqiMap";
pub const MARKER_RADIUS: u32 = 8;
pub const USER_MARKER_LABEL: &str = "Your Location";

/// A coloured circle marker. `index` points back into the readings slice it
/// was built from so a click can be routed to the right station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub index: usize,
    pub lat: f64,
    pub lng: f64,
    pub color: &'static str,
    pub radius: u32,
    pub popup_html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: String,
}

pub fn legend_entries() -> Vec<LegendEntry> {
    AQI_BANDS
        .iter()
        .map(|band| LegendEntry {
            color: band.color,
            label: format!("{} ({})", band.category.label(), band.category.range_label()),
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn or_unknown(text: &str) -> &str {
    if text.trim().is_empty() {
        "Unknown"
    } else {
        text
    }
}

/// Popup body for one station.
pub fn popup_html(reading: &AqiReading) -> String {
    let aqi = reading.aqi();
    let category = AqiCategory::from_aqi(f64::from(aqi));
    let details: String = reading
        .pollutants()
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .filter(|v| *v != 0.0)
                .map(|v| format!("<div>{}: {} μg/m³</div>", name, v))
        })
        .collect();
    format!(
        concat!(
            "<div class=\"map-popup\">",
            "<div class=\"popup-header\"><h4>{city}, {state}</h4>",
            "<span class=\"popup-station\">{station}</span></div>",
            "<div class=\"popup-aqi\"><span class=\"aqi-value\" style=\"color: {color};\">{aqi}</span>",
            "<span class=\"aqi-category\">{category}</span></div>",
            "<div class=\"popup-details\">{details}</div>",
            "<div class=\"popup-time\">Updated: {updated}</div>",
            "</div>"
        ),
        city = escape_html(or_unknown(&reading.city)),
        state = escape_html(or_unknown(&reading.state)),
        station = escape_html(reading.station.as_deref().unwrap_or("Station")),
        color = category.color(),
        aqi = aqi,
        category = category.label(),
        details = details,
        updated = escape_html(&format_timestamp(reading.last_update.as_deref())),
    )
}

/// Markers for every reading with known coordinates.
pub fn marker_specs(readings: &[AqiReading]) -> Vec<MarkerSpec> {
    readings
        .iter()
        .enumerate()
        .filter_map(|(index, reading)| {
            let position = reading.coordinates()?;
            Some(MarkerSpec {
                index,
                lat: position.lat,
                lng: position.lng,
                color: reading.category().color(),
                radius: MARKER_RADIUS,
                popup_html: popup_html(reading),
            })
        })
        .collect()
}
