//! Error and success toasts.

use crate::state::AppState;
use dioxus::prelude::*;

/// Stack of visible toasts. Clicking one dismisses it.
#[component]
pub fn ToastStack() -> Element {
    let mut state = use_context::<AppState>();
    let toasts = state.toasts.read().clone();

    rsx! {
        div {
            class: "toast-container",
            style: "position: fixed; top: 16px; right: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 3000;",
            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: toast.kind.css_class(),
                    onclick: move |_| state.toasts.write().retain(|t| t.id != toast.id),
                    i { class: toast.kind.icon(), style: "margin-right: 8px;" }
                    span { "{toast.message}" }
                }
            }
        }
    }
}
