//! Canvas container for Chart.js charts, with loading and message overlays.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id of the canvas Chart.js draws into
    pub id: String,
    #[props(default = false)]
    pub loading: bool,
    /// Replaces the chart, e.g. "No trend data available"
    #[props(default)]
    pub message: Option<String>,
    #[props(default = 400)]
    pub min_height: u32,
}

#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "height: {}px; position: relative; width: 100%;",
        props.min_height
    );
    let canvas_display = if props.message.is_some() { "none" } else { "block" };

    rsx! {
        div {
            class: "chart-container",
            style: "{style}",
            if props.loading {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "Loading chart..."
                }
            }
            if let Some(message) = props.message.clone() {
                div {
                    class: "chart-message",
                    style: "display: flex; height: 100%; justify-content: center; align-items: center; color: #6b7280;",
                    "{message}"
                }
            }
            canvas {
                id: "{props.id}",
                style: "display: {canvas_display};",
            }
        }
    }
}
