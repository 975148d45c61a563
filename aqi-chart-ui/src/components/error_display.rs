//! Inline error box for a section whose load failed.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Shows a "Try again" button when set
    #[props(default)]
    pub on_retry: Option<EventHandler<()>>,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            class: "error-message",
            style: "display: flex; align-items: center; justify-content: space-between; padding: 10px 14px; margin: 8px 0; background: #fdecea; color: #b71c1c; border-left: 4px solid #ff0000; border-radius: 4px;",
            span {
                i { class: "fas fa-exclamation-triangle", style: "margin-right: 8px;" }
                "{props.message}"
            }
            if let Some(on_retry) = props.on_retry {
                button {
                    style: "padding: 4px 10px; border: 1px solid #b71c1c; background: transparent; color: #b71c1c; border-radius: 4px; cursor: pointer;",
                    onclick: move |_| on_retry.call(()),
                    "Try again"
                }
            }
        }
    }
}
