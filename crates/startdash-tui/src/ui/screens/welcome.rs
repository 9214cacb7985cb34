//! Welcome screen with the time-of-day greeting

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use startdash_core::router::WelcomeView;

use crate::ui::layout::centered_rect_fixed;
use crate::ui::Theme;

/// Draw the welcome screen
pub fn render(frame: &mut Frame, area: Rect, view: &WelcomeView, theme: &Theme) {
    let dialog = centered_rect_fixed(area.width.min(60), 5, area);

    let lines = vec![
        Line::from(Span::styled(
            format!("{} STARTDASH", '\u{25C6}'),
            theme.title(),
        )),
        Line::default(),
        Line::from(Span::styled(view.greeting.as_str(), theme.headline())),
    ];
    let greeting = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(greeting, dialog);

    let prompt = "[Esc] Quit";
    let prompt_y = area.y + area.height.saturating_sub(2);
    let prompt_widget = Paragraph::new(prompt)
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(prompt_widget, Rect::new(area.x, prompt_y, area.width, 1));

    let version = format!("v{}", env!("CARGO_PKG_VERSION"));
    let version_y = area.y + area.height.saturating_sub(1);
    let version_widget = Paragraph::new(version)
        .style(theme.text_muted())
        .alignment(Alignment::Right);
    frame.render_widget(version_widget, Rect::new(area.x, version_y, area.width, 1));
}
