//! Core types for the air-quality dashboard.
//!
//! Everything here is free of I/O so it can be shared by the WASM front end,
//! the CLI and native tests alike.

pub mod category;
pub mod dates;
pub mod events;
pub mod geo;
pub mod models;
pub mod preferences;
pub mod recommendation;
pub mod sequence;
