//! First-run setup form

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use startdash_core::router::SetupView;

use crate::app::SetupField;
use crate::ui::layout::{centered_rect_fixed, masked, plain, render_input};
use crate::ui::Theme;

/// Draw the setup screen
pub fn render(frame: &mut Frame, area: Rect, view: &SetupView, focus: SetupField, theme: &Theme) {
    let dialog = centered_rect_fixed(56, 20, area);

    let block = Block::default()
        .title(" Welcome to Startdash ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Instructions
            Constraint::Length(3), // Name
            Constraint::Length(3), // Password
            Constraint::Length(3), // Confirmation
            Constraint::Length(2), // Error message
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let instructions = Paragraph::new("Choose a password to protect your dashboard")
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(instructions, chunks[0]);

    let name_focused = focus == SetupField::Name;
    render_input(
        frame,
        chunks[1],
        "Your name",
        plain(&view.name, name_focused, theme),
        name_focused,
        theme,
    );

    let password_focused = focus == SetupField::Password;
    render_input(
        frame,
        chunks[2],
        "Password",
        masked(&view.password, password_focused, theme),
        password_focused,
        theme,
    );

    let confirm_focused = focus == SetupField::Confirmation;
    render_input(
        frame,
        chunks[3],
        "Confirm password",
        masked(&view.confirmation, confirm_focused, theme),
        confirm_focused,
        theme,
    );

    if let Some(error) = &view.error_message {
        let error_widget = Paragraph::new(error.as_str())
            .style(theme.danger())
            .alignment(Alignment::Center);
        frame.render_widget(error_widget, chunks[4]);
    }

    let help = Paragraph::new("[Tab] Next field  [Enter] Continue  [Esc] Quit")
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[6]);
}
