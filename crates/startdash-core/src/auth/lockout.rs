//! Fixed-window lockout policy for brute-force protection
//!
//! Five consecutive failures lock the gate for fifteen minutes. The counter
//! does not decay: it only returns to zero after a successful login, so a
//! failure after an expired lockout immediately re-arms a fresh window.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreError;
use crate::storage::{read_optional, write_private};

/// Failed attempts that trigger a lockout
pub const MAX_ATTEMPTS: u32 = 5;
/// Length of the lockout window in minutes
pub const LOCKOUT_MINUTES: i64 = 15;
/// File name of the persisted lockout state inside the data directory
pub const LOCKOUT_FILE: &str = "lockout.json";

const NANOS_PER_MINUTE: i64 = 60_000_000_000;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Start the clock at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, to: DateTime<Utc>) {
        if let Ok(mut now) = self.now.lock() {
            *now = to;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// "Never locked" sentinel for the lockout expiry
pub fn never_locked() -> DateTime<Utc> {
    DateTime::<Utc>::MIN_UTC
}

/// Counter and expiry tracked by the policy
///
/// `failed_attempts` and `lockout_expiry` are reset together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockoutState {
    /// Consecutive failures since the last success
    pub failed_attempts: u32,
    /// Attempts are rejected while `now < lockout_expiry`
    #[serde(with = "chrono::serde::ts_seconds")]
    pub lockout_expiry: DateTime<Utc>,
}

impl Default for LockoutState {
    fn default() -> Self {
        Self {
            failed_attempts: 0,
            lockout_expiry: never_locked(),
        }
    }
}

/// Lockout policy owned by the authentication gate
pub struct LockoutPolicy {
    state: LockoutState,
    clock: Arc<dyn Clock>,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl LockoutPolicy {
    /// Fresh policy on the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Fresh policy on a custom clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::from_state(LockoutState::default(), clock)
    }

    /// Rebuild a policy from previously saved state
    pub fn from_state(state: LockoutState, clock: Arc<dyn Clock>) -> Self {
        Self { state, clock }
    }

    /// Count a failed attempt, arming the lockout at the threshold
    pub fn record_failed_attempt(&mut self) {
        self.state.failed_attempts = self.state.failed_attempts.saturating_add(1);
        if self.state.failed_attempts >= MAX_ATTEMPTS {
            self.state.lockout_expiry = self.clock.now() + Duration::minutes(LOCKOUT_MINUTES);
        }
    }

    /// Clear the counter and the expiry after a successful login
    pub fn reset_attempts(&mut self) {
        self.state = LockoutState::default();
    }

    /// Whether attempts are currently rejected
    pub fn is_locked_out(&self) -> bool {
        self.clock.now() < self.state.lockout_expiry
    }

    /// Attempts left before the lockout triggers (messaging only)
    pub fn attempts_remaining(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.state.failed_attempts)
    }

    /// Consecutive failures since the last success
    pub fn failed_attempts(&self) -> u32 {
        self.state.failed_attempts
    }

    /// When the current lockout ends (the sentinel if never locked)
    pub fn lockout_expiry(&self) -> DateTime<Utc> {
        self.state.lockout_expiry
    }

    /// Whole minutes until the lockout ends, rounded up; 0 when unlocked
    pub fn minutes_remaining(&self) -> u64 {
        if !self.is_locked_out() {
            return 0;
        }
        let remaining = self.state.lockout_expiry - self.clock.now();
        let minutes = match remaining.num_nanoseconds() {
            Some(nanos) => (nanos + NANOS_PER_MINUTE - 1) / NANOS_PER_MINUTE,
            None => (remaining.num_seconds() + 59) / 60,
        };
        // Still locked, so never report zero
        minutes.max(1) as u64
    }

    /// Snapshot of the counter and expiry
    pub fn state(&self) -> LockoutState {
        self.state
    }

    /// The clock this policy reads
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

/// Optional on-disk home for the lockout state
///
/// Without it a restart clears any lockout.
#[derive(Clone, Debug)]
pub struct LockoutPersistence {
    path: PathBuf,
}

impl LockoutPersistence {
    /// Persist inside `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(LOCKOUT_FILE),
        }
    }

    /// Path of the lockout file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved state, if any
    pub fn load(&self) -> Result<Option<LockoutState>, StoreError> {
        match read_optional(&self.path)? {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    /// Save the current state
    pub fn save(&self, state: &LockoutState) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(state)?;
        write_private(&self.path, &contents)?;
        Ok(())
    }

    /// Build a policy from saved state, starting fresh when none is readable
    pub fn restore(&self, clock: Arc<dyn Clock>) -> LockoutPolicy {
        let state = match self.load() {
            Ok(state) => state.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load lockout state, starting fresh: {}", e);
                LockoutState::default()
            }
        };
        LockoutPolicy::from_state(state, clock)
    }
}
