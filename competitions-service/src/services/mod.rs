//! Extraction helpers and AI provider implementations.

pub mod extract;
pub mod providers;

pub use extract::extract_json_array;
