//! Startdash TUI Library
//!
//! Terminal front end for the startdash home screen: screen rendering,
//! key handling and the platform collaborators that feed the dashboard.

pub mod app;
pub mod cli;
pub mod platform;
pub mod ui;

pub use app::App;
pub use cli::Cli;
