//! Startdash Core - Password gate, lockout policy and session routing
//!
//! This crate provides everything behind the startdash home screen that
//! does not draw pixels: the credential store, the brute-force lockout,
//! the welcome/setup/login/dashboard state machine, and the interfaces
//! the dashboard uses to read system stats, apps and media.

pub mod auth;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod router;
pub mod settings;
pub mod storage;

pub use auth::{
    AuthGate, Clock, CredentialStore, FileCredentialStore, LockoutPersistence, LockoutPolicy,
    LoginOutcome, MemoryCredentialStore, SharedGate, SystemClock, LOCKOUT_MINUTES, MAX_ATTEMPTS,
};
pub use collaborators::{
    AppEntry, AppLister, CollaboratorError, MediaInfo, MediaSession, SystemMonitor, SystemStats,
};
pub use config::{ConfigError, DashConfig};
pub use error::{Error, Result, SetupError, StoreError};
pub use router::{
    DashboardView, LoginView, Screen, ScreenKind, SessionRouter, SetupView, WelcomeView,
};
pub use settings::{FileSettings, MemorySettings, SettingsStore};
