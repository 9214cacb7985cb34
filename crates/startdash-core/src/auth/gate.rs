//! Authentication gate
//!
//! Combines the credential store and the lockout policy into a single
//! `attempt_login` step. The lockout check always runs first, and while it
//! holds the credential store is never consulted.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use super::credential::CredentialStore;
use super::lockout::{LockoutPersistence, LockoutPolicy, LOCKOUT_MINUTES};

/// Why a login was refused with a lockout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockoutReason {
    /// The gate was already locked when the attempt arrived
    AlreadyLocked,
    /// This attempt was the one that crossed the threshold
    TooManyAttempts,
}

/// Result of a single login attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Password accepted
    Success,
    /// Wrong password, not yet locked
    Failure { attempts_remaining: u32 },
    /// Attempt refused because of a lockout
    LockedOut {
        minutes_remaining: u64,
        reason: LockoutReason,
    },
}

impl LoginOutcome {
    /// Whether the user may proceed
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success)
    }

    /// Inline message for the login screen (`None` on success)
    pub fn message(&self) -> Option<String> {
        match *self {
            LoginOutcome::Success => None,
            LoginOutcome::Failure { attempts_remaining } if attempts_remaining > 0 => Some(format!(
                "Incorrect password. {} attempt{} remaining.",
                attempts_remaining,
                plural(attempts_remaining as u64)
            )),
            LoginOutcome::Failure { .. } => Some("Incorrect password.".to_string()),
            LoginOutcome::LockedOut {
                reason: LockoutReason::TooManyAttempts,
                ..
            } => Some(format!(
                "Too many attempts. Account locked for {} minutes.",
                LOCKOUT_MINUTES
            )),
            LoginOutcome::LockedOut {
                minutes_remaining,
                reason: LockoutReason::AlreadyLocked,
            } => Some(format!(
                "Account locked. Try again in {} minute{}.",
                minutes_remaining,
                plural(minutes_remaining)
            )),
        }
    }
}

/// Warning shown under the password field when few attempts are left
pub fn attempts_warning(attempts_remaining: u32) -> Option<String> {
    if attempts_remaining > 0 && attempts_remaining < 3 {
        Some(format!(
            "{} attempt{} remaining before lockout",
            attempts_remaining,
            plural(attempts_remaining as u64)
        ))
    } else {
        None
    }
}

fn plural(count: u64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Gate deciding whether the user may proceed past the login screen
///
/// Holds no state of its own beyond the lockout policy it owns.
pub struct AuthGate {
    store: Arc<dyn CredentialStore>,
    policy: LockoutPolicy,
    persistence: Option<LockoutPersistence>,
}

impl AuthGate {
    /// Create a gate over `store` with an in-memory policy
    pub fn new(store: Arc<dyn CredentialStore>, policy: LockoutPolicy) -> Self {
        Self {
            store,
            policy,
            persistence: None,
        }
    }

    /// Save the lockout state after every attempt
    pub fn with_persistence(mut self, persistence: LockoutPersistence) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Run one login attempt
    pub fn attempt_login(&mut self, candidate: &str) -> LoginOutcome {
        if self.policy.is_locked_out() {
            let minutes_remaining = self.policy.minutes_remaining();
            warn!(
                "Login refused while locked out ({} minutes remaining)",
                minutes_remaining
            );
            return LoginOutcome::LockedOut {
                minutes_remaining,
                reason: LockoutReason::AlreadyLocked,
            };
        }

        let outcome = if self.store.verify(candidate) {
            self.policy.reset_attempts();
            info!("Login succeeded");
            LoginOutcome::Success
        } else {
            self.policy.record_failed_attempt();
            let attempts_remaining = self.policy.attempts_remaining();

            if self.policy.is_locked_out() {
                warn!(
                    "Login failed, locking for {} minutes after {} attempts",
                    LOCKOUT_MINUTES,
                    self.policy.failed_attempts()
                );
                LoginOutcome::LockedOut {
                    minutes_remaining: LOCKOUT_MINUTES as u64,
                    reason: LockoutReason::TooManyAttempts,
                }
            } else {
                warn!(
                    "Login failed ({} attempts remaining)",
                    attempts_remaining
                );
                LoginOutcome::Failure { attempts_remaining }
            }
        };

        self.persist();
        outcome
    }

    /// The lockout policy
    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    /// The credential store
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    fn persist(&self) {
        if let Some(persistence) = &self.persistence {
            if let Err(e) = persistence.save(&self.policy.state()) {
                warn!("Failed to persist lockout state: {}", e);
            }
        }
    }
}

/// Gate shared across threads
///
/// The mutex makes the lockout check, the credential check and the counter
/// update of one attempt a single unit, so concurrent attempts cannot both
/// slip under the threshold.
#[derive(Clone)]
pub struct SharedGate {
    inner: Arc<Mutex<AuthGate>>,
}

impl SharedGate {
    /// Wrap a gate for sharing
    pub fn new(gate: AuthGate) -> Self {
        Self {
            inner: Arc::new(Mutex::new(gate)),
        }
    }

    /// Run one login attempt under the lock
    pub fn attempt_login(&self, candidate: &str) -> LoginOutcome {
        self.lock().attempt_login(candidate)
    }

    /// Attempts left before lockout
    pub fn attempts_remaining(&self) -> u32 {
        self.lock().policy().attempts_remaining()
    }

    /// The credential store behind the gate
    pub fn store(&self) -> Arc<dyn CredentialStore> {
        self.lock().store().clone()
    }

    /// Whether the gate is currently locked
    pub fn is_locked_out(&self) -> bool {
        self.lock().policy().is_locked_out()
    }

    fn lock(&self) -> MutexGuard<'_, AuthGate> {
        // A panic mid-attempt leaves the policy in a consistent state, so
        // keep using it rather than wedging the login screen.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credential::MemoryCredentialStore;
    use crate::auth::lockout::{ManualClock, MAX_ATTEMPTS};
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::tempdir;

    fn setup(secret: &str) -> (AuthGate, Arc<MemoryCredentialStore>, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap());
        let store = Arc::new(MemoryCredentialStore::with_secret(secret));
        let policy = LockoutPolicy::with_clock(Arc::new(clock.clone()));
        let gate = AuthGate::new(store.clone(), policy);
        (gate, store, clock)
    }

    #[test]
    fn test_success_resets_attempts() {
        let (mut gate, _, _) = setup("correct");

        assert_eq!(
            gate.attempt_login("wrong"),
            LoginOutcome::Failure {
                attempts_remaining: 4
            }
        );
        assert_eq!(gate.attempt_login("correct"), LoginOutcome::Success);
        assert_eq!(gate.policy().attempts_remaining(), MAX_ATTEMPTS);
    }

    #[test]
    fn test_countdown_then_lockout() {
        let (mut gate, _, _) = setup("correct");

        for expected in [4, 3, 2, 1] {
            assert_eq!(
                gate.attempt_login("wrong"),
                LoginOutcome::Failure {
                    attempts_remaining: expected
                }
            );
            assert!(!gate.policy().is_locked_out());
        }

        assert_eq!(
            gate.attempt_login("wrong"),
            LoginOutcome::LockedOut {
                minutes_remaining: 15,
                reason: LockoutReason::TooManyAttempts
            }
        );
        assert!(gate.policy().is_locked_out());
    }

    #[test]
    fn test_locked_gate_skips_credential_check() {
        let (mut gate, store, clock) = setup("correct");
        for _ in 0..MAX_ATTEMPTS {
            gate.attempt_login("wrong");
        }
        let calls_before = store.verify_calls();

        clock.advance(Duration::minutes(3));
        let outcome = gate.attempt_login("correct");

        assert_eq!(
            outcome,
            LoginOutcome::LockedOut {
                minutes_remaining: 12,
                reason: LockoutReason::AlreadyLocked
            }
        );
        assert_eq!(store.verify_calls(), calls_before);
    }

    #[test]
    fn test_final_instant_of_lockout_reports_one_minute() {
        let (mut gate, _, clock) = setup("correct");
        for _ in 0..MAX_ATTEMPTS {
            gate.attempt_login("wrong");
        }

        clock.advance(Duration::minutes(15) - Duration::microseconds(500));
        let outcome = gate.attempt_login("correct");

        assert_eq!(
            outcome,
            LoginOutcome::LockedOut {
                minutes_remaining: 1,
                reason: LockoutReason::AlreadyLocked
            }
        );
        assert_eq!(
            outcome.message().as_deref(),
            Some("Account locked. Try again in 1 minute.")
        );
    }

    #[test]
    fn test_unlocks_after_window() {
        let (mut gate, _, clock) = setup("correct");
        for _ in 0..MAX_ATTEMPTS {
            gate.attempt_login("wrong");
        }

        clock.advance(Duration::minutes(15));
        assert_eq!(gate.attempt_login("correct"), LoginOutcome::Success);
        assert!(!gate.policy().is_locked_out());
    }

    #[test]
    fn test_unavailable_store_counts_as_failure() {
        let (mut gate, store, _) = setup("correct");
        store.set_unavailable(true);

        assert_eq!(
            gate.attempt_login("correct"),
            LoginOutcome::Failure {
                attempts_remaining: 4
            }
        );
    }

    #[test]
    fn test_persistence_saved_after_attempt() {
        let dir = tempdir().unwrap();
        let (gate, _, clock) = setup("correct");
        let persistence = LockoutPersistence::new(dir.path());
        let mut gate = gate.with_persistence(persistence.clone());

        gate.attempt_login("wrong");
        gate.attempt_login("wrong");

        let saved = persistence.load().unwrap().unwrap();
        assert_eq!(saved.failed_attempts, 2);

        let restored = persistence.restore(Arc::new(clock.clone()));
        assert_eq!(restored.attempts_remaining(), 3);
    }

    #[test]
    fn test_messages() {
        assert_eq!(LoginOutcome::Success.message(), None);
        assert_eq!(
            LoginOutcome::Failure {
                attempts_remaining: 1
            }
            .message()
            .unwrap(),
            "Incorrect password. 1 attempt remaining."
        );
        assert_eq!(
            LoginOutcome::Failure {
                attempts_remaining: 3
            }
            .message()
            .unwrap(),
            "Incorrect password. 3 attempts remaining."
        );
        assert_eq!(
            LoginOutcome::LockedOut {
                minutes_remaining: 15,
                reason: LockoutReason::TooManyAttempts
            }
            .message()
            .unwrap(),
            "Too many attempts. Account locked for 15 minutes."
        );
        assert_eq!(
            LoginOutcome::LockedOut {
                minutes_remaining: 1,
                reason: LockoutReason::AlreadyLocked
            }
            .message()
            .unwrap(),
            "Account locked. Try again in 1 minute."
        );
    }

    #[test]
    fn test_attempts_warning_window() {
        assert_eq!(attempts_warning(5), None);
        assert_eq!(attempts_warning(3), None);
        assert_eq!(
            attempts_warning(2).unwrap(),
            "2 attempts remaining before lockout"
        );
        assert_eq!(
            attempts_warning(1).unwrap(),
            "1 attempt remaining before lockout"
        );
        assert_eq!(attempts_warning(0), None);
    }

    #[test]
    fn test_shared_gate_concurrent_attempts_lock_once() {
        let (gate, store, _) = setup("correct");
        let shared = SharedGate::new(gate);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || shared.attempt_login("wrong"))
            })
            .collect();
        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let too_many = outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o,
                    LoginOutcome::LockedOut {
                        reason: LockoutReason::TooManyAttempts,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(too_many, 1);
        assert_eq!(store.verify_calls(), MAX_ATTEMPTS as usize);
        assert!(shared.is_locked_out());
    }
}
