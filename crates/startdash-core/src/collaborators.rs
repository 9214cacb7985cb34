//! Interfaces to the data sources the dashboard displays
//!
//! System statistics, installed applications and now-playing media are
//! provided by platform code. The core only defines what it consumes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

/// Sentinel for a statistic the platform cannot report
pub const UNAVAILABLE: f64 = -1.0;

/// Errors raised by collaborators
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Failed to launch {name}: {reason}")]
    LaunchFailed { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Snapshot of machine load
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    /// CPU use, 0-100 %
    pub cpu_usage: f64,
    /// Memory use, 0-100 %
    pub memory_usage: f64,
    /// Disk use, 0-100 %, or -1 if unavailable
    pub disk_usage: f64,
    /// Battery charge, 0-100 %, or -1 for desktops/unavailable
    pub battery_level: f64,
    /// Whether the battery is charging
    pub is_charging: bool,
}

impl Default for SystemStats {
    fn default() -> Self {
        Self {
            cpu_usage: 0.0,
            memory_usage: 0.0,
            disk_usage: UNAVAILABLE,
            battery_level: UNAVAILABLE,
            is_charging: false,
        }
    }
}

impl SystemStats {
    /// Disk use if the platform reported it
    pub fn disk(&self) -> Option<f64> {
        available(self.disk_usage)
    }

    /// Battery charge if the machine has a battery
    pub fn battery(&self) -> Option<f64> {
        available(self.battery_level)
    }
}

fn available(value: f64) -> Option<f64> {
    (value >= 0.0).then_some(value)
}

/// Polled source of system statistics
pub trait SystemMonitor: Send {
    fn stats(&mut self) -> SystemStats;
}

/// An installed application
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppEntry {
    /// Stable identity for list selection
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Platform launch handle (desktop file id, bundle path, executable)
    pub launch_identifier: String,
    /// Encoded icon, when available
    pub icon: Option<Vec<u8>>,
}

impl AppEntry {
    /// Create an entry without an icon
    pub fn new(name: impl Into<String>, launch_identifier: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            launch_identifier: launch_identifier.into(),
            icon: None,
        }
    }
}

/// Order apps by name (case-insensitive) and drop duplicate names
pub fn normalize_listing(mut apps: Vec<AppEntry>) -> Vec<AppEntry> {
    apps.sort_by_key(|app| app.name.to_lowercase());
    apps.dedup_by(|a, b| a.name.eq_ignore_ascii_case(&b.name));
    apps
}

/// Source of installed applications
#[async_trait]
pub trait AppLister: Send + Sync {
    /// List installed apps in display order
    async fn list_installed_apps(&self) -> Vec<AppEntry>;

    /// Launch an app
    fn launch(&self, app: &AppEntry) -> Result<(), CollaboratorError>;
}

/// What the media player is doing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaInfo {
    pub title: String,
    pub artist: String,
    pub album_art: Option<Vec<u8>>,
    pub is_playing: bool,
}

impl MediaInfo {
    /// Placeholder shown when no media session is active
    pub fn nothing_playing() -> Self {
        Self {
            title: "Nothing Playing".to_string(),
            artist: "Start some music".to_string(),
            album_art: None,
            is_playing: false,
        }
    }
}

impl Default for MediaInfo {
    fn default() -> Self {
        Self::nothing_playing()
    }
}

/// Now-playing source
///
/// Changes are delivered over a `watch` channel rather than callbacks.
pub trait MediaSession: Send + Sync {
    /// Latest known media state
    fn current(&self) -> MediaInfo;

    /// Receive every subsequent change
    fn subscribe(&self) -> watch::Receiver<MediaInfo>;
}

/// Media session for platforms without a player integration
pub struct IdleMediaSession {
    sender: watch::Sender<MediaInfo>,
}

impl Default for IdleMediaSession {
    fn default() -> Self {
        Self::new()
    }
}

impl IdleMediaSession {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(MediaInfo::nothing_playing());
        Self { sender }
    }
}

impl MediaSession for IdleMediaSession {
    fn current(&self) -> MediaInfo {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<MediaInfo> {
        self.sender.subscribe()
    }
}
