//! Competitions service: asks a hosted language model for writing-competition
//! listings matching a user's preferences and serves the static frontend.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
