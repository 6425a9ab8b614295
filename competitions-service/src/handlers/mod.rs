//! HTTP handlers for the competitions service.

pub mod competitions;

pub use competitions::list_competitions;
