//! Single-secret credential storage
//!
//! The dashboard protects one local account. The secret is stored under a
//! fixed service name and account identity, and replacing it is always a
//! delete followed by an add so the backing store never holds a stale entry.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::error::StoreError;
use crate::storage::{default_data_dir, read_optional, remove_if_exists, write_private};

/// Service name the secret is filed under
pub const SERVICE_NAME: &str = "com.startdash.auth";
/// Fixed account identity (single-user device)
pub const ACCOUNT_ID: &str = "PrimaryAccount";
/// File name of the credential record inside the data directory
pub const CREDENTIAL_FILE: &str = "credential.json";

/// Storage for the dashboard password
///
/// `is_set` and `verify` are fail-closed: a missing record and an unreadable
/// backing store both yield `false`, so callers cannot tell a storage fault
/// apart from a wrong password.
pub trait CredentialStore: Send + Sync {
    /// Whether a secret has been stored for the fixed account
    fn is_set(&self) -> bool;

    /// Replace the stored secret (delete, then add)
    fn set_secret(&self, new_secret: &str) -> Result<(), StoreError>;

    /// Whether `candidate` matches the stored secret exactly
    fn verify(&self, candidate: &str) -> bool;
}

/// On-disk credential record
#[derive(Serialize, Deserialize)]
struct CredentialRecord {
    /// Service the record belongs to
    service: String,
    /// Account identity
    account: String,
    /// Argon2id PHC string of the secret
    hash: String,
    /// Version for future migrations
    version: u32,
}

impl CredentialRecord {
    fn belongs_to_primary_account(&self) -> bool {
        self.service == SERVICE_NAME && self.account == ACCOUNT_ID
    }
}

/// Credential store backed by a private JSON file in the data directory
///
/// The secret itself is never written; the record holds an Argon2id hash and
/// verification checks the exact candidate bytes against it.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store the record inside `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(CREDENTIAL_FILE),
        }
    }

    /// Store the record in the platform data directory
    pub fn in_default_location() -> Self {
        Self::new(default_data_dir())
    }

    /// Path of the credential record
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<CredentialRecord>, StoreError> {
        let Some(contents) = read_optional(&self.path)? else {
            return Ok(None);
        };

        let record: CredentialRecord = serde_json::from_str(&contents).map_err(|e| {
            StoreError::Serialization(format!("Failed to parse credential record: {}", e))
        })?;

        if !record.belongs_to_primary_account() {
            debug!(
                "Ignoring credential record for {}/{}",
                record.service, record.account
            );
            return Ok(None);
        }

        Ok(Some(record))
    }

    fn delete(&self) -> Result<(), StoreError> {
        remove_if_exists(&self.path)?;
        Ok(())
    }

    fn add(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(record)?;
        write_private(&self.path, &contents)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn is_set(&self) -> bool {
        match self.load() {
            Ok(record) => record.is_some(),
            Err(e) => {
                warn!("Credential store unreadable, treating as unset: {}", e);
                false
            }
        }
    }

    fn set_secret(&self, new_secret: &str) -> Result<(), StoreError> {
        let hash = hash_secret(new_secret)?;

        self.delete()?;
        self.add(&CredentialRecord {
            service: SERVICE_NAME.to_string(),
            account: ACCOUNT_ID.to_string(),
            hash,
            version: 1,
        })?;

        info!("Stored new credential for {}", ACCOUNT_ID);
        Ok(())
    }

    fn verify(&self, candidate: &str) -> bool {
        let record = match self.load() {
            Ok(Some(record)) => record,
            Ok(None) => return false,
            Err(e) => {
                warn!("Credential store unreadable during verify: {}", e);
                return false;
            }
        };

        let parsed_hash = match PasswordHash::new(&record.hash) {
            Ok(hash) => hash,
            Err(e) => {
                warn!("Stored credential hash is invalid: {}", e);
                return false;
            }
        };

        let candidate_bytes = Zeroizing::new(candidate.as_bytes().to_vec());
        Argon2::default()
            .verify_password(&candidate_bytes, &parsed_hash)
            .is_ok()
    }
}

/// Hash a secret into an Argon2id PHC string
fn hash_secret(secret: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let secret_bytes = Zeroizing::new(secret.as_bytes().to_vec());

    Argon2::default()
        .hash_password(&secret_bytes, &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Hash(e.to_string()))
}

/// In-process credential store
///
/// Used for ephemeral sessions and tests. Counts `verify` calls and can be
/// switched into an "unavailable" mode to exercise the fail-closed path.
#[derive(Default)]
pub struct MemoryCredentialStore {
    secret: Mutex<Option<Zeroizing<String>>>,
    verify_calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `secret`
    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret: Mutex::new(Some(Zeroizing::new(secret.to_string()))),
            ..Self::default()
        }
    }

    /// Number of times `verify` has been called
    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    /// Simulate the backing store becoming unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn is_unavailable(&self) -> bool {
        self.unavailable.load(Ordering::SeqCst)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn is_set(&self) -> bool {
        if self.is_unavailable() {
            return false;
        }
        self.secret.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    fn set_secret(&self, new_secret: &str) -> Result<(), StoreError> {
        if self.is_unavailable() {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }

        let mut slot = self
            .secret
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Failed to lock store: {}", e)))?;
        // Drop the old value first so it is zeroized before the new one lands
        slot.take();
        *slot = Some(Zeroizing::new(new_secret.to_string()));
        Ok(())
    }

    fn verify(&self, candidate: &str) -> bool {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        if self.is_unavailable() {
            return false;
        }

        match self.secret.lock() {
            Ok(slot) => slot
                .as_ref()
                .map(|stored| stored.as_bytes() == candidate.as_bytes())
                .unwrap_or(false),
            Err(_) => false,
        }
    }
}
