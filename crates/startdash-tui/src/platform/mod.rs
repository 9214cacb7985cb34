//! Platform implementations of the dashboard collaborators

pub mod apps;
pub mod media;
pub mod monitor;

pub use apps::DesktopEntryLister;
pub use media::PlayerctlMedia;
pub use monitor::SysinfoMonitor;
