//! Panel heading with an icon and an optional note, e.g. "Showing sample data".

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// Font Awesome class of the leading icon
    #[props(default = "fas fa-chart-line".to_string())]
    pub icon: String,
    #[props(default = String::new())]
    pub note: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        header {
            class: "panel-header",
            style: "display: flex; align-items: baseline; gap: 8px; margin-bottom: 8px;",
            i { class: "{props.icon}", style: "color: #4b5563;" }
            h3 { style: "margin: 0; font-size: 16px;", "{props.title}" }
            if !props.note.is_empty() {
                span {
                    class: "sample-note",
                    style: "font-size: 12px; color: #b45309; font-style: italic;",
                    "{props.note}"
                }
            }
        }
    }
}
