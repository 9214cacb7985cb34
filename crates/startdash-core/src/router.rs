//! Session bootstrap and screen routing
//!
//! The session runs Welcome, then Setup or Login, then Dashboard. Whether
//! Setup or Login follows the welcome screen is decided once, when the
//! welcome screen exits, by asking the credential store whether a password
//! exists. There is no way back from Dashboard and no path between Setup and
//! Login.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Local, TimeZone, Timelike, Utc};
use tracing::{debug, info, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::auth::{attempts_warning, Clock, CredentialStore, LoginOutcome, SharedGate};
use crate::collaborators::{AppEntry, MediaInfo, SystemStats};
use crate::error::SetupError;
use crate::settings::{SettingsStore, KEY_USER_NAME};

/// How long the welcome screen stays up by default
pub const WELCOME_DELAY: StdDuration = StdDuration::from_millis(1500);

/// Shown when a login attempt dies before reporting back
pub const LOGIN_INTERRUPTED: &str = "Login could not be completed. Try again.";

/// Greeting for a local hour of the day
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning.",
        12..=16 => "Good afternoon.",
        17..=20 => "Good evening.",
        _ => "Good night.",
    }
}

/// Validate the setup form
///
/// The name is trimmed before the emptiness check; the password is compared
/// exactly as typed.
pub fn validate_setup(name: &str, password: &str, confirmation: &str) -> Result<(), SetupError> {
    if name.trim().is_empty() {
        return Err(SetupError::EmptyName);
    }
    if password.is_empty() {
        return Err(SetupError::EmptyPassword);
    }
    if password != confirmation {
        return Err(SetupError::PasswordMismatch);
    }
    Ok(())
}

/// Which screen is showing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    Welcome,
    Setup,
    Login,
    Dashboard,
}

/// Welcome screen
#[derive(Clone, Debug)]
pub struct WelcomeView {
    pub greeting: String,
    pub shown_at: DateTime<Utc>,
}

impl WelcomeView {
    pub fn new(now: DateTime<Utc>) -> Self {
        let hour = now.with_timezone(&Local).hour();
        Self {
            greeting: greeting_for_hour(hour).to_string(),
            shown_at: now,
        }
    }
}

/// First-run setup form
#[derive(Default)]
pub struct SetupView {
    pub name: String,
    pub password: Zeroizing<String>,
    pub confirmation: Zeroizing<String>,
    pub error_message: Option<String>,
}

impl SetupView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Password prompt
pub struct LoginView {
    pub password: Zeroizing<String>,
    pub error_message: Option<String>,
    pub attempts_remaining: u32,
    /// An attempt is in flight; further submits are ignored
    pub pending: bool,
}

impl LoginView {
    pub fn new(attempts_remaining: u32) -> Self {
        Self {
            password: Zeroizing::new(String::new()),
            error_message: None,
            attempts_remaining,
            pending: false,
        }
    }

    /// Low-attempts warning, if one applies
    pub fn attempts_warning(&self) -> Option<String> {
        attempts_warning(self.attempts_remaining)
    }
}

/// Post-login dashboard
#[derive(Clone, Debug)]
pub struct DashboardView {
    pub user_name: String,
    pub current_time: String,
    pub current_date: String,
    pub stats: SystemStats,
    pub now_playing: MediaInfo,
    pub apps: Vec<AppEntry>,
    pub selected_app: usize,
    fetch_requested: bool,
}

impl DashboardView {
    pub fn new(user_name: impl Into<String>, apps: Vec<AppEntry>) -> Self {
        Self {
            user_name: user_name.into(),
            current_time: String::new(),
            current_date: String::new(),
            stats: SystemStats::default(),
            now_playing: MediaInfo::nothing_playing(),
            apps,
            selected_app: 0,
            fetch_requested: false,
        }
    }

    /// Whether the front end should start its own app listing
    pub fn needs_app_fetch(&self) -> bool {
        self.apps.is_empty() && !self.fetch_requested
    }

    /// Record that a listing is on its way
    pub fn mark_fetch_requested(&mut self) {
        self.fetch_requested = true;
    }

    /// Fill the app list; a populated list is never replaced
    pub fn set_apps(&mut self, apps: Vec<AppEntry>) -> bool {
        if !self.apps.is_empty() {
            return false;
        }
        self.apps = apps;
        self.selected_app = 0;
        true
    }

    /// Update the clock strings
    pub fn refresh_clock<Tz: TimeZone>(&mut self, now: &DateTime<Tz>)
    where
        Tz::Offset: Display,
    {
        self.current_time = now.format("%H:%M:%S").to_string();
        self.current_date = now.format("%A, %B %-d, %Y").to_string();
    }

    pub fn update_stats(&mut self, stats: SystemStats) {
        self.stats = stats;
    }

    pub fn update_media(&mut self, media: MediaInfo) {
        self.now_playing = media;
    }

    pub fn select_next(&mut self) {
        if self.selected_app + 1 < self.apps.len() {
            self.selected_app += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_app = self.selected_app.saturating_sub(1);
    }

    pub fn selected_app(&self) -> Option<&AppEntry> {
        self.apps.get(self.selected_app)
    }
}

/// The active screen and the data it renders
pub enum Screen {
    Welcome(WelcomeView),
    Setup(SetupView),
    Login(LoginView),
    Dashboard(DashboardView),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Welcome(_) => ScreenKind::Welcome,
            Screen::Setup(_) => ScreenKind::Setup,
            Screen::Login(_) => ScreenKind::Login,
            Screen::Dashboard(_) => ScreenKind::Dashboard,
        }
    }

    /// Title for headers
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Welcome(_) => "Welcome",
            Screen::Setup(_) => "Setup",
            Screen::Login(_) => "Unlock",
            Screen::Dashboard(_) => "Dashboard",
        }
    }
}

/// Drives the session from the welcome screen to the dashboard
pub struct SessionRouter {
    screen: Screen,
    store: Arc<dyn CredentialStore>,
    gate: SharedGate,
    settings: Arc<dyn SettingsStore>,
    clock: Arc<dyn Clock>,
    welcome_delay: Duration,
    welcome_resolved: bool,
    cached_apps: Option<Vec<AppEntry>>,
}

impl SessionRouter {
    /// Start a session on the welcome screen
    ///
    /// The credential store is the one behind `gate`, so the welcome exit
    /// and login attempts always consult the same secret.
    pub fn new(gate: SharedGate, settings: Arc<dyn SettingsStore>, clock: Arc<dyn Clock>) -> Self {
        let welcome = WelcomeView::new(clock.now());
        Self {
            screen: Screen::Welcome(welcome),
            store: gate.store(),
            gate,
            settings,
            clock,
            welcome_delay: to_chrono(WELCOME_DELAY),
            welcome_resolved: false,
            cached_apps: None,
        }
    }

    /// Override how long the welcome screen stays up
    pub fn with_welcome_delay(mut self, delay: StdDuration) -> Self {
        self.welcome_delay = to_chrono(delay);
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn gate(&self) -> &SharedGate {
        &self.gate
    }

    pub fn setup_view_mut(&mut self) -> Option<&mut SetupView> {
        match &mut self.screen {
            Screen::Setup(view) => Some(view),
            _ => None,
        }
    }

    pub fn login_view_mut(&mut self) -> Option<&mut LoginView> {
        match &mut self.screen {
            Screen::Login(view) => Some(view),
            _ => None,
        }
    }

    pub fn dashboard(&self) -> Option<&DashboardView> {
        match &self.screen {
            Screen::Dashboard(view) => Some(view),
            _ => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut DashboardView> {
        match &mut self.screen {
            Screen::Dashboard(view) => Some(view),
            _ => None,
        }
    }

    /// Advance time-driven state; returns true when the screen changed
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();

        let welcome_due = matches!(
            &self.screen,
            Screen::Welcome(view) if now - view.shown_at >= self.welcome_delay
        );
        if welcome_due {
            return self.finish_welcome();
        }

        if let Screen::Dashboard(view) = &mut self.screen {
            view.refresh_clock(&now.with_timezone(&Local));
        }
        false
    }

    /// Leave the welcome screen for Setup or Login
    ///
    /// Runs at most once per session.
    pub fn finish_welcome(&mut self) -> bool {
        if self.welcome_resolved || self.kind() != ScreenKind::Welcome {
            return false;
        }
        self.welcome_resolved = true;

        self.screen = if self.store.is_set() {
            info!("Password found, showing login");
            Screen::Login(LoginView::new(self.gate.attempts_remaining()))
        } else {
            info!("No password set, showing setup");
            Screen::Setup(SetupView::new(self.known_user_name()))
        };
        true
    }

    /// Submit the setup form and, if accepted, open the dashboard
    pub fn submit_setup(&mut self) -> Result<(), SetupError> {
        let Screen::Setup(view) = &mut self.screen else {
            return Err(SetupError::NotActive);
        };

        if let Err(e) = validate_setup(&view.name, &view.password, &view.confirmation) {
            view.error_message = Some(e.to_string());
            return Err(e);
        }

        if let Err(e) = self.store.set_secret(&view.password) {
            warn!("Failed to store password during setup: {}", e);
            let err = SetupError::Storage(e);
            view.error_message = Some(err.to_string());
            return Err(err);
        }

        let name = view.name.trim().to_string();
        view.password.zeroize();
        view.confirmation.zeroize();

        if let Err(e) = self.settings.set_string(KEY_USER_NAME, &name) {
            warn!("Failed to save user name: {}", e);
        }

        info!("Setup complete");
        self.enter_dashboard();
        Ok(())
    }

    /// Copy out the typed password for an attempt and mark it in flight
    ///
    /// Returns `None` when not on the login screen or an attempt is pending.
    pub fn take_login_candidate(&mut self) -> Option<Zeroizing<String>> {
        let view = self.login_view_mut()?;
        if view.pending {
            return None;
        }
        view.pending = true;
        view.error_message = None;
        Some(Zeroizing::new(view.password.as_str().to_string()))
    }

    /// Apply the outcome of an attempt; returns true when the dashboard opened
    pub fn apply_login_outcome(&mut self, outcome: LoginOutcome) -> bool {
        let attempts_remaining = self.gate.attempts_remaining();
        let Some(view) = self.login_view_mut() else {
            return false;
        };
        view.pending = false;

        if outcome.is_success() {
            view.password.zeroize();
            self.enter_dashboard();
            return true;
        }

        view.error_message = outcome.message();
        view.attempts_remaining = attempts_remaining;
        false
    }

    /// Clear an in-flight attempt that never produced an outcome
    ///
    /// The lockout counter is untouched; the user can simply retry.
    pub fn abort_login_attempt(&mut self) {
        if let Some(view) = self.login_view_mut() {
            if view.pending {
                view.pending = false;
                view.error_message = Some(LOGIN_INTERRUPTED.to_string());
            }
        }
    }

    /// Run a login attempt on the calling thread
    pub fn submit_login(&mut self) -> Option<LoginOutcome> {
        let candidate = self.take_login_candidate()?;
        let outcome = self.gate.attempt_login(&candidate);
        self.apply_login_outcome(outcome);
        Some(outcome)
    }

    /// Receive a background app listing
    ///
    /// The first listing is cached for the dashboard; if the dashboard is
    /// already showing with an empty list, it is filled in place.
    pub fn on_apps_loaded(&mut self, apps: Vec<AppEntry>) {
        debug!("Received {} apps", apps.len());
        if let Screen::Dashboard(view) = &mut self.screen {
            view.set_apps(apps.clone());
        }
        if self.cached_apps.is_none() {
            self.cached_apps = Some(apps);
        }
    }

    fn enter_dashboard(&mut self) {
        let apps = self.cached_apps.clone().unwrap_or_default();
        let mut view = DashboardView::new(self.known_user_name(), apps);
        view.refresh_clock(&self.clock.now().with_timezone(&Local));
        self.screen = Screen::Dashboard(view);
    }

    fn known_user_name(&self) -> String {
        let stored = self.settings.get_string(KEY_USER_NAME, "");
        if !stored.is_empty() {
            return stored;
        }
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_default()
    }
}

fn to_chrono(duration: StdDuration) -> Duration {
    // Out-of-range delays just mean "a very long time"
    Duration::from_std(duration).unwrap_or_else(|_| Duration::days(365))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthGate, LockoutPolicy, ManualClock, MemoryCredentialStore};
    use crate::settings::MemorySettings;
    use chrono::FixedOffset;
    use rstest::rstest;

    struct Harness {
        router: SessionRouter,
        store: Arc<MemoryCredentialStore>,
        settings: Arc<MemorySettings>,
        clock: ManualClock,
    }

    fn harness(store: MemoryCredentialStore) -> Harness {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap());
        let store = Arc::new(store);
        let settings = Arc::new(MemorySettings::new());
        let policy = LockoutPolicy::with_clock(Arc::new(clock.clone()));
        let gate = SharedGate::new(AuthGate::new(store.clone(), policy));
        let router = SessionRouter::new(gate, settings.clone(), Arc::new(clock.clone()));
        Harness {
            router,
            store,
            settings,
            clock,
        }
    }

    fn fill_setup(router: &mut SessionRouter, name: &str, password: &str, confirmation: &str) {
        let view = router.setup_view_mut().unwrap();
        view.name = name.to_string();
        view.password = Zeroizing::new(password.to_string());
        view.confirmation = Zeroizing::new(confirmation.to_string());
    }

    fn type_password(router: &mut SessionRouter, password: &str) {
        router.login_view_mut().unwrap().password = Zeroizing::new(password.to_string());
    }

    #[rstest]
    #[case(0, "Good night.")]
    #[case(4, "Good night.")]
    #[case(5, "Good morning.")]
    #[case(11, "Good morning.")]
    #[case(12, "Good afternoon.")]
    #[case(16, "Good afternoon.")]
    #[case(17, "Good evening.")]
    #[case(20, "Good evening.")]
    #[case(21, "Good night.")]
    #[case(23, "Good night.")]
    fn test_greeting_for_hour(#[case] hour: u32, #[case] expected: &str) {
        assert_eq!(greeting_for_hour(hour), expected);
    }

    #[rstest]
    #[case("", "pw", "pw", "Name cannot be empty")]
    #[case("   ", "pw", "pw", "Name cannot be empty")]
    #[case("Ada", "", "", "Password cannot be empty")]
    #[case("Ada", "pw", "pW", "Passwords do not match")]
    fn test_validate_setup_rejects(
        #[case] name: &str,
        #[case] password: &str,
        #[case] confirmation: &str,
        #[case] message: &str,
    ) {
        let err = validate_setup(name, password, confirmation).unwrap_err();
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn test_starts_on_welcome() {
        let h = harness(MemoryCredentialStore::new());
        assert_eq!(h.router.kind(), ScreenKind::Welcome);
    }

    #[test]
    fn test_welcome_waits_for_delay() {
        let mut h = harness(MemoryCredentialStore::new());

        h.clock.advance(Duration::milliseconds(1499));
        assert!(!h.router.tick());
        assert_eq!(h.router.kind(), ScreenKind::Welcome);

        h.clock.advance(Duration::milliseconds(1));
        assert!(h.router.tick());
        assert_eq!(h.router.kind(), ScreenKind::Setup);
    }

    #[rstest]
    #[case(false, ScreenKind::Setup)]
    #[case(true, ScreenKind::Login)]
    fn test_welcome_exit_follows_store(#[case] password_set: bool, #[case] expected: ScreenKind) {
        let store = if password_set {
            MemoryCredentialStore::with_secret("pw")
        } else {
            MemoryCredentialStore::new()
        };
        let mut h = harness(store);

        assert!(h.router.finish_welcome());
        assert_eq!(h.router.kind(), expected);
        assert!(!h.router.finish_welcome());
        assert_eq!(h.router.kind(), expected);
    }

    #[test]
    fn test_setup_validation_stays_on_setup() {
        let mut h = harness(MemoryCredentialStore::new());
        h.router.finish_welcome();
        fill_setup(&mut h.router, "Ada", "secret", "secrets");

        assert!(matches!(
            h.router.submit_setup(),
            Err(SetupError::PasswordMismatch)
        ));
        assert_eq!(h.router.kind(), ScreenKind::Setup);
        assert_eq!(
            h.router.setup_view_mut().unwrap().error_message.as_deref(),
            Some("Passwords do not match")
        );
        assert!(!h.store.is_set());
        assert_eq!(h.router.gate().attempts_remaining(), 5);
    }

    #[test]
    fn test_setup_success_opens_dashboard() {
        let mut h = harness(MemoryCredentialStore::new());
        h.router.finish_welcome();
        fill_setup(&mut h.router, "  Ada  ", "secret", "secret");

        h.router.submit_setup().unwrap();

        assert_eq!(h.router.kind(), ScreenKind::Dashboard);
        assert!(h.store.verify("secret"));
        assert_eq!(h.settings.get_string(KEY_USER_NAME, ""), "Ada");
        assert_eq!(h.router.dashboard().unwrap().user_name, "Ada");
    }

    #[test]
    fn test_setup_storage_failure_is_reported() {
        let mut h = harness(MemoryCredentialStore::new());
        h.router.finish_welcome();
        fill_setup(&mut h.router, "Ada", "secret", "secret");
        h.store.set_unavailable(true);

        assert!(matches!(
            h.router.submit_setup(),
            Err(SetupError::Storage(_))
        ));
        assert_eq!(h.router.kind(), ScreenKind::Setup);
    }

    #[test]
    fn test_submit_setup_requires_setup_screen() {
        let mut h = harness(MemoryCredentialStore::with_secret("pw"));
        assert!(matches!(h.router.submit_setup(), Err(SetupError::NotActive)));
        h.router.finish_welcome();
        assert!(matches!(h.router.submit_setup(), Err(SetupError::NotActive)));
    }

    #[test]
    fn test_login_failure_then_success() {
        let mut h = harness(MemoryCredentialStore::with_secret("pw"));
        h.router.finish_welcome();

        type_password(&mut h.router, "nope");
        assert_eq!(
            h.router.submit_login(),
            Some(LoginOutcome::Failure {
                attempts_remaining: 4
            })
        );
        {
            let view = h.router.login_view_mut().unwrap();
            assert_eq!(
                view.error_message.as_deref(),
                Some("Incorrect password. 4 attempts remaining.")
            );
            assert_eq!(view.attempts_remaining, 4);
            assert_eq!(view.attempts_warning(), None);
            assert_eq!(view.password.as_str(), "nope");
        }

        type_password(&mut h.router, "pw");
        assert_eq!(h.router.submit_login(), Some(LoginOutcome::Success));
        assert_eq!(h.router.kind(), ScreenKind::Dashboard);
        assert_eq!(h.router.gate().attempts_remaining(), 5);
    }

    #[test]
    fn test_login_lockout_messages() {
        let mut h = harness(MemoryCredentialStore::with_secret("pw"));
        h.router.finish_welcome();
        type_password(&mut h.router, "nope");

        for _ in 0..4 {
            h.router.submit_login();
        }
        assert_eq!(
            h.router.login_view_mut().unwrap().attempts_warning().as_deref(),
            Some("1 attempt remaining before lockout")
        );

        h.router.submit_login();
        assert_eq!(
            h.router.login_view_mut().unwrap().error_message.as_deref(),
            Some("Too many attempts. Account locked for 15 minutes.")
        );

        type_password(&mut h.router, "pw");
        h.clock.advance(Duration::minutes(5));
        assert!(matches!(
            h.router.submit_login(),
            Some(LoginOutcome::LockedOut { .. })
        ));
        assert_eq!(h.router.kind(), ScreenKind::Login);
        assert_eq!(
            h.router.login_view_mut().unwrap().error_message.as_deref(),
            Some("Account locked. Try again in 10 minutes.")
        );
    }

    #[test]
    fn test_pending_attempt_blocks_second_submit() {
        let mut h = harness(MemoryCredentialStore::with_secret("pw"));
        h.router.finish_welcome();
        type_password(&mut h.router, "pw");

        let candidate = h.router.take_login_candidate().unwrap();
        assert_eq!(candidate.as_str(), "pw");
        assert!(h.router.take_login_candidate().is_none());

        let outcome = h.router.gate().attempt_login(&candidate);
        assert!(h.router.apply_login_outcome(outcome));
        assert_eq!(h.router.kind(), ScreenKind::Dashboard);
    }

    #[test]
    fn test_aborted_attempt_clears_pending() {
        let mut h = harness(MemoryCredentialStore::with_secret("pw"));
        h.router.finish_welcome();
        type_password(&mut h.router, "pw");

        h.router.take_login_candidate().unwrap();
        h.router.abort_login_attempt();

        let view = h.router.login_view_mut().unwrap();
        assert!(!view.pending);
        assert_eq!(view.error_message.as_deref(), Some(LOGIN_INTERRUPTED));
        assert_eq!(view.attempts_remaining, 5);
        assert_eq!(view.password.as_str(), "pw");
        assert!(h.router.take_login_candidate().is_some());
    }

    #[test]
    fn test_router_reads_store_behind_gate() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap());
        let store = Arc::new(MemoryCredentialStore::new());
        let policy = LockoutPolicy::with_clock(Arc::new(clock.clone()));
        let gate = SharedGate::new(AuthGate::new(store.clone(), policy));
        let mut router =
            SessionRouter::new(gate, Arc::new(MemorySettings::new()), Arc::new(clock.clone()));

        store.set_secret("late").unwrap();
        router.finish_welcome();
        assert_eq!(router.kind(), ScreenKind::Login);
        type_password(&mut router, "late");
        assert_eq!(router.submit_login(), Some(LoginOutcome::Success));
    }

    #[test]
    fn test_submit_login_ignored_off_login_screen() {
        let mut h = harness(MemoryCredentialStore::new());
        assert!(h.router.submit_login().is_none());
        h.router.finish_welcome();
        assert!(h.router.submit_login().is_none());
        assert_eq!(h.store.verify_calls(), 0);
    }

    #[test]
    fn test_prefetched_apps_reach_dashboard() {
        let mut h = harness(MemoryCredentialStore::with_secret("pw"));
        h.router
            .on_apps_loaded(vec![AppEntry::new("Files", "files.desktop")]);
        h.router.finish_welcome();
        type_password(&mut h.router, "pw");
        h.router.submit_login();

        let view = h.router.dashboard().unwrap();
        assert_eq!(view.apps.len(), 1);
        assert!(!view.needs_app_fetch());
    }

    #[test]
    fn test_late_apps_fill_empty_dashboard_only() {
        let mut h = harness(MemoryCredentialStore::with_secret("pw"));
        h.router.finish_welcome();
        type_password(&mut h.router, "pw");
        h.router.submit_login();

        let view = h.router.dashboard_mut().unwrap();
        assert!(view.needs_app_fetch());
        view.mark_fetch_requested();
        assert!(!view.needs_app_fetch());

        h.router
            .on_apps_loaded(vec![AppEntry::new("Files", "files.desktop")]);
        h.router
            .on_apps_loaded(vec![AppEntry::new("Other", "other.desktop")]);

        let apps = &h.router.dashboard().unwrap().apps;
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "Files");
    }

    #[test]
    fn test_dashboard_clock_format() {
        let mut view = DashboardView::new("Ada", Vec::new());
        let offset = FixedOffset::east_opt(0).unwrap();
        let now = offset.with_ymd_and_hms(2026, 3, 1, 7, 5, 9).unwrap();

        view.refresh_clock(&now);
        assert_eq!(view.current_time, "07:05:09");
        assert_eq!(view.current_date, "Sunday, March 1, 2026");
    }

    #[test]
    fn test_dashboard_selection_bounds() {
        let mut view = DashboardView::new(
            "Ada",
            vec![AppEntry::new("A", "a"), AppEntry::new("B", "b")],
        );

        view.select_previous();
        assert_eq!(view.selected_app().unwrap().name, "A");
        view.select_next();
        view.select_next();
        assert_eq!(view.selected_app().unwrap().name, "B");
    }
}
