//! The current-AQI card on the dashboard.

use aqi_sections::dashboard::CurrentAqiView;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct CurrentAqiCardProps {
    pub view: CurrentAqiView,
}

#[component]
pub fn CurrentAqiCard(props: CurrentAqiCardProps) -> Element {
    let view = props.view;
    let value_style = match view.color {
        Some(color) => format!("color: {};", color),
        None => String::new(),
    };

    rsx! {
        div {
            class: "aqi-card",
            style: "padding: 16px; border-radius: 8px; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,0.1);",
            h2 { id: "currentLocation", style: "margin: 0 0 8px 0;", "{view.location}" }
            div {
                style: "display: flex; align-items: baseline; gap: 12px;",
                span { id: "currentAQI", class: "aqi-value", style: "font-size: 48px; font-weight: 700; {value_style}", "{view.aqi}" }
                span { id: "currentCategory", class: "{view.css_class}", "{view.category}" }
            }
            p { id: "lastUpdate", style: "margin: 8px 0; color: #6b7280; font-size: 12px;", "{view.last_update}" }
            div {
                class: "pollutants-grid",
                style: "display: grid; grid-template-columns: repeat(4, 1fr); gap: 8px;",
                for (name, value) in view.pollutants {
                    div {
                        key: "{name}",
                        class: "pollutant-item",
                        span { class: "pollutant-name", style: "display: block; font-size: 12px; color: #6b7280;", "{name}" }
                        span { class: "pollutant-value", style: "font-weight: 600;", "{value}" }
                    }
                }
            }
        }
    }
}
