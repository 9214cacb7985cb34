//! UI rendering

pub mod layout;
pub mod screens;
mod theme;

pub use theme::Theme;

use ratatui::prelude::*;
use ratatui::widgets::Block;
use startdash_core::router::Screen;

use crate::app::App;

/// Main render function - delegates to appropriate screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    match app.router.screen() {
        Screen::Welcome(view) => screens::welcome::render(frame, area, view, theme),
        Screen::Setup(view) => screens::setup::render(frame, area, view, app.setup_focus, theme),
        Screen::Login(view) => screens::login::render(frame, area, view, theme),
        Screen::Dashboard(view) => {
            screens::dashboard::render(frame, area, view, app.status_message.as_deref(), theme)
        }
    }
}
