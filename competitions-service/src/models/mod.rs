//! Domain models for the competitions service.

pub mod listing;

pub use listing::Listing;
