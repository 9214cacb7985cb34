//! Authentication for the dashboard
//!
//! Provides the password gate that stands between the welcome screen and
//! the dashboard.
//!
//! # Security Model
//!
//! - One secret for one fixed account identity
//! - The secret is stored as an Argon2id hash, never in plaintext
//! - Storage faults fail closed and look like a wrong password
//! - Five failures lock the gate for fifteen minutes
//! - The credential is not consulted while locked

mod credential;
mod gate;
mod lockout;

pub use credential::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, ACCOUNT_ID, CREDENTIAL_FILE,
    SERVICE_NAME,
};
pub use gate::{attempts_warning, AuthGate, LockoutReason, LoginOutcome, SharedGate};
pub use lockout::{
    never_locked, Clock, LockoutPersistence, LockoutPolicy, LockoutState, ManualClock,
    SystemClock, LOCKOUT_FILE, LOCKOUT_MINUTES, MAX_ATTEMPTS,
};
