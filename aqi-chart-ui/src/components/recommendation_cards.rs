//! Health section cards.

use aqi_core::recommendation::HealthRecommendation;
use aqi_sections::health::AqiContext;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct AqiContextCardProps {
    pub context: Option<AqiContext>,
}

/// "Current Air Quality" card above the recommendations.
#[component]
pub fn AqiContextCard(props: AqiContextCardProps) -> Element {
    let Some(context) = props.context else {
        return rsx! {
            div {
                class: "aqi-context",
                p { "Select a city on the dashboard to get recommendations for the current air quality." }
            }
        };
    };
    let category = context.category;

    rsx! {
        div {
            class: "aqi-context",
            style: "padding: 16px; border-radius: 8px; background: #fff; border-left: 6px solid {category.color()}; margin-bottom: 16px;",
            h3 { style: "margin: 0 0 8px 0;", "Current Air Quality" }
            div {
                style: "display: flex; align-items: baseline; gap: 12px;",
                span { style: "font-size: 36px; font-weight: 700; color: {category.color()};", "{context.aqi}" }
                span { class: "aqi-category {category.css_class()}", "{category.label()}" }
            }
            p { style: "margin: 8px 0 0 0;", "{context.description}" }
            if let Some(note) = context.sensitive_note {
                p {
                    class: "sensitive-note",
                    style: "margin: 8px 0 0 0; font-size: 12px; color: #b45309;",
                    i { class: "fas fa-user-shield", style: "margin-right: 4px;" }
                    "{note}"
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct RecommendationCardsProps {
    pub recommendations: Vec<HealthRecommendation>,
}

#[component]
pub fn RecommendationCards(props: RecommendationCardsProps) -> Element {
    rsx! {
        div {
            id: "healthRecommendations",
            class: "recommendations-grid",
            style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 12px;",
            for (i, rec) in props.recommendations.into_iter().enumerate() {
                div {
                    key: "{i}",
                    class: "recommendation-card {rec.severity.as_str()}",
                    style: "padding: 12px; border-radius: 8px; background: #fff;",
                    div {
                        class: "recommendation-header",
                        style: "display: flex; align-items: center; gap: 8px;",
                        i { class: "fas {rec.icon}" }
                        h4 { style: "margin: 0;", "{rec.title}" }
                    }
                    p { style: "margin: 8px 0 0 0;", "{rec.content}" }
                }
            }
        }
    }
}
