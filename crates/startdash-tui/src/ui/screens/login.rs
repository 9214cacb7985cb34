//! Password prompt

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use startdash_core::router::LoginView;

use crate::ui::layout::{centered_rect_fixed, masked, render_input};
use crate::ui::Theme;

/// Draw the login screen
pub fn render(frame: &mut Frame, area: Rect, view: &LoginView, theme: &Theme) {
    let dialog = centered_rect_fixed(52, 14, area);

    let block = Block::default()
        .title(" Authentication Required ")
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
            Constraint::Length(3), // Password
            Constraint::Length(2), // Error message
            Constraint::Length(1), // Attempts warning
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let instructions = Paragraph::new("Enter your password to unlock")
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(instructions, chunks[0]);

    render_input(
        frame,
        chunks[1],
        "Password",
        masked(&view.password, !view.pending, theme),
        !view.pending,
        theme,
    );

    if view.pending {
        let checking = Paragraph::new("Checking\u{2026}")
            .style(theme.text_muted())
            .alignment(Alignment::Center);
        frame.render_widget(checking, chunks[2]);
    } else if let Some(error) = &view.error_message {
        let error_widget = Paragraph::new(error.as_str())
            .style(theme.danger())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(error_widget, chunks[2]);
    }

    if let Some(warning) = view.attempts_warning() {
        let warning_widget = Paragraph::new(format!("\u{26A0} {}", warning))
            .style(theme.warning())
            .alignment(Alignment::Center);
        frame.render_widget(warning_widget, chunks[3]);
    }

    let help = Paragraph::new("[Enter] Unlock    [Esc] Quit")
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::draw_to_string;
    use zeroize::Zeroizing;

    fn draw(view: &LoginView) -> String {
        let theme = Theme::default();
        draw_to_string(60, 16, |frame| {
            let area = frame.area();
            render(frame, area, view, &theme)
        })
    }

    #[test]
    fn test_login_shows_low_attempts_warning() {
        let mut view = LoginView::new(2);
        view.password = Zeroizing::new("secret".to_string());
        view.error_message = Some("Incorrect password.".to_string());

        let screen = draw(&view);
        assert!(screen.contains("Incorrect password."));
        assert!(screen.contains("2 attempts remaining before lockout"));
        assert!(!screen.contains("secret"));
    }

    #[test]
    fn test_login_hides_warning_with_attempts_to_spare() {
        let screen = draw(&LoginView::new(5));
        assert!(!screen.contains("before lockout"));
    }
}
