//! Wiring of the core services and platform collaborators

use std::sync::Arc;
use std::time::Duration;

use startdash_core::auth::{
    AuthGate, Clock, CredentialStore, FileCredentialStore, LockoutPersistence, LockoutPolicy,
    MemoryCredentialStore, SharedGate, SystemClock,
};
use startdash_core::collaborators::{AppLister, IdleMediaSession, MediaSession, SystemMonitor};
use startdash_core::config::DashConfig;
use startdash_core::router::SessionRouter;
use startdash_core::settings::{FileSettings, MemorySettings, SettingsStore};
use tracing::info;

use crate::platform::{DesktopEntryLister, PlayerctlMedia, SysinfoMonitor};

/// Everything the app needs, built once at startup
pub struct Services {
    pub gate: SharedGate,
    pub settings: Arc<dyn SettingsStore>,
    pub clock: Arc<dyn Clock>,
    pub lister: Arc<dyn AppLister>,
    pub monitor: Box<dyn SystemMonitor>,
    pub media: Arc<dyn MediaSession>,
    pub welcome_delay: Duration,
    pub stats_interval: Duration,
}

impl Services {
    /// Build services for a configuration
    ///
    /// `ephemeral` keeps the credential and settings in memory so nothing
    /// is written to the data directory. Must run inside a tokio runtime.
    pub fn from_config(config: &DashConfig, ephemeral: bool) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let (store, settings): (Arc<dyn CredentialStore>, Arc<dyn SettingsStore>) = if ephemeral {
            info!("Ephemeral session, credentials stay in memory");
            (
                Arc::new(MemoryCredentialStore::new()),
                Arc::new(MemorySettings::new()),
            )
        } else {
            (
                Arc::new(FileCredentialStore::new(&config.data_dir)),
                Arc::new(FileSettings::new(&config.data_dir)),
            )
        };

        let gate = if config.persist_lockout && !ephemeral {
            let persistence = LockoutPersistence::new(&config.data_dir);
            let policy = persistence.restore(clock.clone());
            AuthGate::new(store.clone(), policy).with_persistence(persistence)
        } else {
            AuthGate::new(store.clone(), LockoutPolicy::with_clock(clock.clone()))
        };

        let media: Arc<dyn MediaSession> = if cfg!(target_os = "linux") {
            Arc::new(PlayerctlMedia::spawn(config.media_interval()))
        } else {
            Arc::new(IdleMediaSession::new())
        };

        Self {
            gate: SharedGate::new(gate),
            settings,
            clock,
            lister: Arc::new(DesktopEntryLister::new()),
            monitor: Box::new(SysinfoMonitor::new()),
            media,
            welcome_delay: config.welcome_delay(),
            stats_interval: config.stats_interval(),
        }
    }

    /// Start a session router over these services
    pub fn router(&self) -> SessionRouter {
        SessionRouter::new(self.gate.clone(), self.settings.clone(), self.clock.clone())
        .with_welcome_delay(self.welcome_delay)
    }
}
