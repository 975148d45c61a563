//! Forecast day cards and the summary line.

use aqi_data::stats::ForecastSummary;
use aqi_sections::forecast::ForecastCard;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ForecastCardsProps {
    pub cards: Vec<ForecastCard>,
}

#[component]
pub fn ForecastCards(props: ForecastCardsProps) -> Element {
    rsx! {
        div {
            id: "forecastCards",
            class: "forecast-cards",
            style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px; margin-bottom: 16px;",
            for card in props.cards {
                div {
                    key: "{card.date_label}",
                    class: "forecast-card",
                    style: "padding: 12px; border-radius: 8px; background: #fff; border-top: 4px solid {card.color};",
                    div { class: "forecast-date", style: "font-weight: 600;", "{card.date_label}" }
                    div { class: "forecast-aqi", style: "font-size: 32px; font-weight: 700; color: {card.color};", "{card.aqi}" }
                    div { class: "forecast-category {card.category.css_class()}", "{card.category.label()}" }
                    div { class: "forecast-confidence", style: "font-size: 12px; color: #6b7280;", "Confidence: {card.confidence_percent}%" }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ForecastSummaryBarProps {
    pub summary: ForecastSummary,
}

#[component]
pub fn ForecastSummaryBar(props: ForecastSummaryBarProps) -> Element {
    let summary = props.summary;
    rsx! {
        div {
            class: "forecast-summary",
            style: "display: flex; gap: 24px; margin: 8px 0; color: #374151;",
            span { "Average AQI: " strong { "{summary.average_aqi}" } }
            span { "Most likely: " strong { "{summary.most_common_category.label()}" } }
            span { "Days: " strong { "{summary.total_days}" } }
        }
    }
}
