//! Now-playing information from MPRIS players via `playerctl`

use std::sync::Arc;
use std::time::Duration;

use startdash_core::collaborators::{MediaInfo, MediaSession};
use tokio::process::Command;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Fields requested from `playerctl metadata`, tab separated
const METADATA_FORMAT: &str = "{{status}}\t{{artist}}\t{{title}}";

/// Media session that polls `playerctl`
///
/// The poll task stops when this value is dropped.
pub struct PlayerctlMedia {
    sender: Arc<watch::Sender<MediaInfo>>,
    poller: JoinHandle<()>,
}

impl PlayerctlMedia {
    /// Start polling on the current tokio runtime
    pub fn spawn(interval: Duration) -> Self {
        let (sender, _) = watch::channel(MediaInfo::nothing_playing());
        let sender = Arc::new(sender);

        let task_sender = sender.clone();
        let poller = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let info = query_player().await;
                task_sender.send_if_modified(|current| {
                    if *current == info {
                        return false;
                    }
                    *current = info;
                    true
                });
            }
        });

        Self { sender, poller }
    }
}

impl Drop for PlayerctlMedia {
    fn drop(&mut self) {
        self.poller.abort();
    }
}

impl MediaSession for PlayerctlMedia {
    fn current(&self) -> MediaInfo {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<MediaInfo> {
        self.sender.subscribe()
    }
}

async fn query_player() -> MediaInfo {
    let output = Command::new("playerctl")
        .args(["metadata", "--format", METADATA_FORMAT])
        .kill_on_drop(true)
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            parse_metadata(&String::from_utf8_lossy(&output.stdout))
        }
        Ok(_) => MediaInfo::nothing_playing(),
        Err(e) => {
            debug!("playerctl unavailable: {}", e);
            MediaInfo::nothing_playing()
        }
    }
}

/// Parse one `status<TAB>artist<TAB>title` line
pub fn parse_metadata(output: &str) -> MediaInfo {
    let Some(line) = output.lines().find(|l| !l.trim().is_empty()) else {
        return MediaInfo::nothing_playing();
    };

    let mut fields = line.splitn(3, '\t').map(str::trim);
    let status = fields.next().unwrap_or_default();
    let artist = fields.next().unwrap_or_default();
    let title = fields.next().unwrap_or_default();

    if status.eq_ignore_ascii_case("stopped") {
        return MediaInfo::nothing_playing();
    }

    MediaInfo {
        title: or_unknown(title, "Unknown Title"),
        artist: or_unknown(artist, "Unknown Artist"),
        album_art: None,
        is_playing: status.eq_ignore_ascii_case("playing"),
    }
}

fn or_unknown(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
