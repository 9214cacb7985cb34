//! Screen renderers

pub mod dashboard;
pub mod login;
pub mod setup;
pub mod welcome;
