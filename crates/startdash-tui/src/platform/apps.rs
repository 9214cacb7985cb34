//! Installed application discovery
//!
//! On Linux apps come from freedesktop `.desktop` files in the XDG data
//! directories and launch through `gtk-launch`. On macOS they are the
//! `*.app` bundles in `/Applications` and launch through `open`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use async_trait::async_trait;
use startdash_core::collaborators::{normalize_listing, AppEntry, AppLister, CollaboratorError};
use tracing::{debug, info, warn};

/// A parsed `[Desktop Entry]` group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: String,
}

/// Parse the display name out of a `.desktop` file
///
/// Returns `None` for non-application entries and entries marked
/// `NoDisplay` or `Hidden`.
pub fn parse_desktop_entry(contents: &str) -> Option<DesktopEntry> {
    let mut in_entry = false;
    let mut name = None;
    let mut kind = None;

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            in_entry = line == "[Desktop Entry]";
            continue;
        }
        if !in_entry {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "Name" => name = Some(value.to_string()),
            "Type" => kind = Some(value.to_string()),
            "NoDisplay" | "Hidden" if value.eq_ignore_ascii_case("true") => return None,
            _ => {}
        }
    }

    if kind.as_deref() != Some("Application") {
        return None;
    }
    let name = name.filter(|n| !n.is_empty())?;

    Some(DesktopEntry { name })
}

/// Directories searched for applications on this platform
pub fn default_search_dirs() -> Vec<PathBuf> {
    if cfg!(target_os = "macos") {
        let mut bundles = vec![PathBuf::from("/Applications")];
        if let Some(home) = dirs::home_dir() {
            bundles.push(home.join("Applications"));
        }
        return bundles;
    }

    let mut search = Vec::new();
    match std::env::var("XDG_DATA_HOME") {
        Ok(data_home) => search.push(PathBuf::from(data_home).join("applications")),
        Err(_) => {
            if let Some(data_dir) = dirs::data_dir() {
                search.push(data_dir.join("applications"));
            }
        }
    }

    let data_dirs = std::env::var("XDG_DATA_DIRS")
        .unwrap_or_else(|_| "/usr/local/share:/usr/share".to_string());
    search.extend(
        data_dirs
            .split(':')
            .filter(|d| !d.is_empty())
            .map(|d| PathBuf::from(d).join("applications")),
    );
    search
}

/// Lists `.desktop` entries or `.app` bundles
pub struct DesktopEntryLister {
    search_dirs: Vec<PathBuf>,
}

impl Default for DesktopEntryLister {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopEntryLister {
    pub fn new() -> Self {
        Self::with_dirs(default_search_dirs())
    }

    pub fn with_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }
}

/// Walk the search directories; earlier directories shadow later ones
fn scan(search_dirs: &[PathBuf]) -> Vec<AppEntry> {
    let mut seen = HashSet::new();
    let mut apps = Vec::new();

    for dir in search_dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };

        for path in entries.flatten().map(|e| e.path()) {
            let Some(app) = read_app(&path) else {
                continue;
            };
            if seen.insert(app.launch_identifier.clone()) {
                apps.push(app);
            }
        }
    }

    apps
}

fn read_app(path: &Path) -> Option<AppEntry> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("desktop") => {
            let contents = fs::read_to_string(path).ok()?;
            let entry = parse_desktop_entry(&contents)?;
            let id = path.file_name()?.to_str()?.to_string();
            Some(AppEntry::new(entry.name, id))
        }
        Some("app") => {
            let name = path.file_stem()?.to_str()?.to_string();
            Some(AppEntry::new(name, path.to_string_lossy()))
        }
        _ => None,
    }
}

#[async_trait]
impl AppLister for DesktopEntryLister {
    async fn list_installed_apps(&self) -> Vec<AppEntry> {
        let dirs = self.search_dirs.clone();
        match tokio::task::spawn_blocking(move || scan(&dirs)).await {
            Ok(apps) => {
                let apps = normalize_listing(apps);
                debug!("Found {} installed apps", apps.len());
                apps
            }
            Err(e) => {
                warn!("App scan failed: {}", e);
                Vec::new()
            }
        }
    }

    fn launch(&self, app: &AppEntry) -> Result<(), CollaboratorError> {
        let mut command = if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(&app.launch_identifier);
            c
        } else {
            let mut c = Command::new("gtk-launch");
            c.arg(app.launch_identifier.trim_end_matches(".desktop"));
            c
        };

        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CollaboratorError::LaunchFailed {
                name: app.name.clone(),
                reason: e.to_string(),
            })?;

        info!("Launched {}", app.name);
        Ok(())
    }
}
