//! Loading indicators.

use crate::state::AppState;
use dioxus::prelude::*;

/// Inline loading indicator for a single panel.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            i { class: "fas fa-spinner fa-spin", style: "margin-right: 8px;" }
            "Loading data..."
        }
    }
}

/// Full-page overlay shown while any API call is in flight.
#[component]
pub fn LoadingOverlay() -> Element {
    let state = use_context::<AppState>();
    if !state.is_loading() {
        return rsx! {};
    }
    rsx! {
        div {
            id: "loadingOverlay",
            class: "loading-overlay",
            style: "position: fixed; inset: 0; background: rgba(255, 255, 255, 0.6); display: flex; justify-content: center; align-items: center; z-index: 2000;",
            LoadingSpinner {}
        }
    }
}
