//! Browser side of the AQI dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Chart.js and Leaflet globals via `js_sys::eval()`
//! - `browser`: localStorage, geolocation, timers and downloads behind the controller traits
//! - `notifier`: toasts and the loading overlay as Dioxus signals
//! - `state`: reactive AppState with Dioxus Signals
//! - `components`: reusable RSX components (cards, selectors, containers, etc.)

pub mod browser;
pub mod components;
pub mod js_bridge;
pub mod notifier;
pub mod state;
