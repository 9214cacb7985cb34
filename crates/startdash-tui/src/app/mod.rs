//! Application state and event handling

mod events;
mod services;

pub use events::{Event, EventHandler};
pub use services::Services;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use startdash_core::auth::LoginOutcome;
use startdash_core::collaborators::{AppLister, MediaSession, SystemMonitor};
use startdash_core::error::SetupError;
use startdash_core::router::{ScreenKind, SessionRouter};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info, warn};

use crate::ui::{self, Theme};

/// Application result type
pub type AppResult<T> = anyhow::Result<T>;

/// Redraw and clock cadence
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// Longest name or password the forms accept
const MAX_INPUT_LEN: usize = 128;

/// Focused field on the setup form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupField {
    #[default]
    Name,
    Password,
    Confirmation,
}

impl SetupField {
    pub fn next(self) -> Self {
        match self {
            SetupField::Name => SetupField::Password,
            SetupField::Password => SetupField::Confirmation,
            SetupField::Confirmation => SetupField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            SetupField::Name => SetupField::Confirmation,
            SetupField::Password => SetupField::Name,
            SetupField::Confirmation => SetupField::Password,
        }
    }
}

/// Main application struct
pub struct App {
    /// Screen routing and view state
    pub router: SessionRouter,

    /// Visual theme
    pub theme: Theme,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Focused setup field
    pub setup_focus: SetupField,

    /// Transient dashboard message (launch results)
    pub status_message: Option<String>,

    sender: UnboundedSender<Event>,
    lister: Arc<dyn AppLister>,
    monitor: Option<Box<dyn SystemMonitor>>,
    media: Arc<dyn MediaSession>,
    stats_interval: Duration,
    apps_in_flight: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(services: Services, sender: UnboundedSender<Event>) -> Self {
        let router = services.router();
        Self {
            router,
            theme: Theme::default(),
            should_quit: false,
            setup_focus: SetupField::default(),
            status_message: None,
            sender,
            lister: services.lister,
            monitor: Some(services.monitor),
            media: services.media,
            stats_interval: services.stats_interval,
            apps_in_flight: false,
        }
    }

    /// Kick off work that can run during the welcome screen
    pub fn start(&mut self) {
        self.spawn_app_listing();
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut EventHandler,
    ) -> AppResult<()> {
        self.start();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            match events.next().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }

        Ok(())
    }

    /// Apply one event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick => {
                self.router.tick();
            }
            Event::LoginFinished(outcome) => {
                self.router.apply_login_outcome(outcome);
            }
            Event::LoginAborted => self.router.abort_login_attempt(),
            Event::AppsLoaded(apps) => {
                self.apps_in_flight = false;
                self.router.on_apps_loaded(apps);
            }
            Event::Stats(stats) => {
                if let Some(view) = self.router.dashboard_mut() {
                    view.update_stats(stats);
                }
            }
            Event::Media(media) => {
                if let Some(view) = self.router.dashboard_mut() {
                    view.update_media(media);
                }
            }
        }

        self.sync_dashboard();
    }

    /// Handle key press events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.router.kind() {
            ScreenKind::Welcome => self.handle_welcome_key(key.code),
            ScreenKind::Setup => self.handle_setup_key(key.code),
            ScreenKind::Login => self.handle_login_key(key.code),
            ScreenKind::Dashboard => self.handle_dashboard_key(key.code),
        }
    }

    /// The welcome screen leaves on its own timer; keys can only quit
    fn handle_welcome_key(&mut self, key: KeyCode) {
        if key == KeyCode::Esc {
            self.should_quit = true;
        }
    }

    fn handle_setup_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.setup_focus = self.setup_focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.setup_focus = self.setup_focus.previous(),
            KeyCode::Enter if self.setup_focus != SetupField::Confirmation => {
                self.setup_focus = self.setup_focus.next();
            }
            KeyCode::Enter => self.submit_setup(),
            KeyCode::Backspace => {
                let focus = self.setup_focus;
                if let Some(view) = self.router.setup_view_mut() {
                    match focus {
                        SetupField::Name => view.name.pop(),
                        SetupField::Password => view.password.pop(),
                        SetupField::Confirmation => view.confirmation.pop(),
                    };
                }
            }
            KeyCode::Char(c) => {
                let focus = self.setup_focus;
                if let Some(view) = self.router.setup_view_mut() {
                    let field = match focus {
                        SetupField::Name => &mut view.name,
                        SetupField::Password => &mut *view.password,
                        SetupField::Confirmation => &mut *view.confirmation,
                    };
                    if field.chars().count() < MAX_INPUT_LEN {
                        field.push(c);
                    }
                }
            }
            _ => {}
        }
    }

    fn submit_setup(&mut self) {
        match self.router.submit_setup() {
            Ok(()) => {}
            Err(SetupError::EmptyName) => self.setup_focus = SetupField::Name,
            Err(SetupError::EmptyPassword) => self.setup_focus = SetupField::Password,
            Err(SetupError::PasswordMismatch) => self.setup_focus = SetupField::Confirmation,
            Err(e) => warn!("Setup failed: {}", e),
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.spawn_login(),
            KeyCode::Backspace => {
                if let Some(view) = self.router.login_view_mut() {
                    if !view.pending {
                        view.password.pop();
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(view) = self.router.login_view_mut() {
                    if !view.pending && view.password.chars().count() < MAX_INPUT_LEN {
                        view.password.push(c);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(view) = self.router.dashboard_mut() {
                    view.select_previous();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(view) = self.router.dashboard_mut() {
                    view.select_next();
                }
            }
            KeyCode::Enter => self.launch_selected(),
            _ => {}
        }
    }

    fn launch_selected(&mut self) {
        let Some(app) = self
            .router
            .dashboard()
            .and_then(|view| view.selected_app().cloned())
        else {
            return;
        };

        self.status_message = Some(match self.lister.launch(&app) {
            Ok(()) => format!("Launched {}", app.name),
            Err(e) => {
                warn!("{}", e);
                e.to_string()
            }
        });
    }

    /// Run the attempt off the UI thread; Argon2 verification is slow
    fn spawn_login(&mut self) {
        let Some(candidate) = self.router.take_login_candidate() else {
            return;
        };

        let gate = self.router.gate().clone();
        spawn_attempt(self.sender.clone(), move || gate.attempt_login(&candidate));
    }

    fn spawn_app_listing(&mut self) {
        if self.apps_in_flight {
            return;
        }
        self.apps_in_flight = true;

        let lister = self.lister.clone();
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let apps = lister.list_installed_apps().await;
            let _ = sender.send(Event::AppsLoaded(apps));
        });
    }

    /// Start dashboard feeds and any missing app listing
    fn sync_dashboard(&mut self) {
        let Some(view) = self.router.dashboard_mut() else {
            return;
        };
        let needs_apps = view.needs_app_fetch();
        if needs_apps {
            view.mark_fetch_requested();
        }

        if needs_apps {
            self.spawn_app_listing();
        }
        if let Some(monitor) = self.monitor.take() {
            info!("Dashboard opened, starting feeds");
            self.spawn_feeds(monitor);
        }
    }

    fn spawn_feeds(&self, mut monitor: Box<dyn SystemMonitor>) {
        let sender = self.sender.clone();
        let interval = self.stats_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if sender.send(Event::Stats(monitor.stats())).is_err() {
                    break;
                }
            }
        });

        let sender = self.sender.clone();
        let mut receiver = self.media.subscribe();
        let _ = sender.send(Event::Media(self.media.current()));
        tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                let info = receiver.borrow_and_update().clone();
                if sender.send(Event::Media(info)).is_err() {
                    break;
                }
            }
        });
    }
}

/// Run `attempt` on the blocking pool and always report back
///
/// A panicking attempt still sends `LoginAborted` so the login screen
/// does not stay pending.
fn spawn_attempt<F>(sender: UnboundedSender<Event>, attempt: F)
where
    F: FnOnce() -> LoginOutcome + Send + 'static,
{
    let handle = tokio::task::spawn_blocking(attempt);
    tokio::spawn(async move {
        let event = match handle.await {
            Ok(outcome) => Event::LoginFinished(outcome),
            Err(e) => {
                error!("Login attempt did not complete: {}", e);
                Event::LoginAborted
            }
        };
        let _ = sender.send(event);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use startdash_core::auth::{
        AuthGate, Clock, CredentialStore, LockoutPolicy, ManualClock, MemoryCredentialStore,
        SharedGate,
    };
    use startdash_core::collaborators::{
        AppEntry, CollaboratorError, IdleMediaSession, MediaInfo, SystemStats,
    };
    use startdash_core::router::{Screen, LOGIN_INTERRUPTED};
    use startdash_core::settings::MemorySettings;

    struct FixedApps(Vec<AppEntry>);

    #[async_trait]
    impl AppLister for FixedApps {
        async fn list_installed_apps(&self) -> Vec<AppEntry> {
            self.0.clone()
        }

        fn launch(&self, app: &AppEntry) -> Result<(), CollaboratorError> {
            Err(CollaboratorError::LaunchFailed {
                name: app.name.clone(),
                reason: "not in tests".to_string(),
            })
        }
    }

    struct FixedMonitor;

    impl SystemMonitor for FixedMonitor {
        fn stats(&mut self) -> SystemStats {
            SystemStats {
                cpu_usage: 12.0,
                ..SystemStats::default()
            }
        }
    }

    fn test_app(store: MemoryCredentialStore) -> (App, EventHandler, ManualClock) {
        let clock = ManualClock::new(chrono::Utc::now());
        let clock_dyn: Arc<dyn Clock> = Arc::new(clock.clone());
        let store: Arc<dyn CredentialStore> = Arc::new(store);
        let gate = SharedGate::new(AuthGate::new(
            store,
            LockoutPolicy::with_clock(clock_dyn.clone()),
        ));

        let services = Services {
            gate,
            settings: Arc::new(MemorySettings::new()),
            clock: clock_dyn,
            lister: Arc::new(FixedApps(vec![AppEntry::new("Files", "files.desktop")])),
            monitor: Box::new(FixedMonitor),
            media: Arc::new(IdleMediaSession::new()),
            welcome_delay: Duration::from_millis(1500),
            stats_interval: Duration::from_secs(60),
        };

        let events = EventHandler::new();
        let app = App::new(services, events.sender());
        (app, events, clock)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn pass_welcome(app: &mut App, clock: &ManualClock) {
        clock.advance(chrono::Duration::milliseconds(1500));
        app.handle_event(Event::Tick);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    async fn pump_until<F: Fn(&App) -> bool>(app: &mut App, events: &mut EventHandler, done: F) {
        while !done(app) {
            match tokio::time::timeout(Duration::from_secs(10), events.next()).await {
                Ok(Some(event)) => app.handle_event(event),
                _ => panic!("event stream stalled"),
            }
        }
    }

    #[tokio::test]
    async fn test_tick_leaves_welcome_after_delay() {
        let (mut app, _events, clock) = test_app(MemoryCredentialStore::new());

        app.handle_event(Event::Tick);
        assert_eq!(app.router.kind(), ScreenKind::Welcome);

        clock.advance(chrono::Duration::milliseconds(1500));
        app.handle_event(Event::Tick);
        assert_eq!(app.router.kind(), ScreenKind::Setup);
    }

    #[tokio::test]
    async fn test_enter_does_not_skip_welcome() {
        let (mut app, _events, _clock) = test_app(MemoryCredentialStore::new());

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' '));
        app.handle_event(Event::Tick);
        assert_eq!(app.router.kind(), ScreenKind::Welcome);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_setup_form_flow() {
        let (mut app, mut events, clock) = test_app(MemoryCredentialStore::new());
        pass_welcome(&mut app, &clock);
        assert_eq!(app.router.kind(), ScreenKind::Setup);

        // Clear any prefilled name
        for _ in 0..64 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "px");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.router.kind(), ScreenKind::Setup);
        assert_eq!(app.setup_focus, SetupField::Confirmation);

        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "w");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.router.kind(), ScreenKind::Dashboard);

        pump_until(&mut app, &mut events, |app| {
            app.router
                .dashboard()
                .map(|view| !view.apps.is_empty() && view.stats.cpu_usage == 12.0)
                .unwrap_or(false)
        })
        .await;
        assert_eq!(
            app.router.dashboard().unwrap().now_playing,
            MediaInfo::nothing_playing()
        );
    }

    #[tokio::test]
    async fn test_login_runs_in_background() {
        let (mut app, mut events, clock) = test_app(MemoryCredentialStore::with_secret("pw"));
        pass_welcome(&mut app, &clock);
        assert_eq!(app.router.kind(), ScreenKind::Login);

        type_text(&mut app, "nope");
        press(&mut app, KeyCode::Enter);
        assert!(app.router.login_view_mut().unwrap().pending);

        // Typing is ignored while the attempt is in flight
        type_text(&mut app, "zzz");
        pump_until(&mut app, &mut events, |app| {
            !matches!(app.router.screen(), Screen::Login(view) if view.pending)
        })
        .await;

        let view = app.router.login_view_mut().unwrap();
        assert_eq!(view.attempts_remaining, 4);
        assert_eq!(view.password.as_str(), "nope");

        for _ in 0..4 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);
        pump_until(&mut app, &mut events, |app| {
            app.router.kind() == ScreenKind::Dashboard
        })
        .await;
    }

    #[tokio::test]
    async fn test_crashed_attempt_unblocks_login() {
        let (mut app, mut events, clock) = test_app(MemoryCredentialStore::with_secret("pw"));
        pass_welcome(&mut app, &clock);
        type_text(&mut app, "pw");

        app.router.take_login_candidate().unwrap();
        spawn_attempt(app.sender.clone(), || panic!("verifier crashed"));
        pump_until(&mut app, &mut events, |app| {
            !matches!(app.router.screen(), Screen::Login(view) if view.pending)
        })
        .await;

        let view = app.router.login_view_mut().unwrap();
        assert_eq!(view.error_message.as_deref(), Some(LOGIN_INTERRUPTED));
        assert_eq!(view.attempts_remaining, 5);

        press(&mut app, KeyCode::Enter);
        pump_until(&mut app, &mut events, |app| {
            app.router.kind() == ScreenKind::Dashboard
        })
        .await;
    }

    #[tokio::test]
    async fn test_dashboard_launch_failure_is_reported() {
        let (mut app, mut events, clock) = test_app(MemoryCredentialStore::with_secret("pw"));
        pass_welcome(&mut app, &clock);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);
        pump_until(&mut app, &mut events, |app| {
            app.router
                .dashboard()
                .map(|view| !view.apps.is_empty())
                .unwrap_or(false)
        })
        .await;

        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Failed to launch Files: not in tests")
        );

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_any_screen() {
        let (mut app, _events, clock) = test_app(MemoryCredentialStore::new());
        pass_welcome(&mut app, &clock);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.handle_event(Event::Key(key));
        assert!(app.should_quit);
    }
}
