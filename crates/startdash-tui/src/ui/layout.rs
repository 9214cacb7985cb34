//! Layout helpers for consistent screen structure

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Theme;

/// Standard screen layout with header, content, and footer
pub struct ScreenLayout {
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    /// Create a standard layout from the total area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(8),    // Content
                Constraint::Length(2), // Footer
            ])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
            footer: chunks[2],
        }
    }
}

/// Create a fixed-size centered box
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Render the header bar with the screen title and wall clock
pub fn render_header(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border())
        .style(Style::default().bg(theme.background));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16),
            Constraint::Min(10),
            Constraint::Length(10),
        ])
        .split(inner);

    let logo = Paragraph::new(format!(" {} STARTDASH", '\u{25C6}')).style(theme.title());
    frame.render_widget(logo, chunks[0]);

    let crumb = Paragraph::new(title)
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(crumb, chunks[1]);

    let time = chrono::Local::now().format("%H:%M").to_string();
    let time_widget = Paragraph::new(time)
        .style(theme.text_muted())
        .alignment(Alignment::Right);
    frame.render_widget(time_widget, chunks[2]);
}

/// Render a standard footer with key hints
pub fn render_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hint_spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(format!("[{}]", key), theme.title()),
                Span::styled(format!(" {}  ", action), theme.text_muted()),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    frame.render_widget(footer, inner);
}

/// Create a section block with title
pub fn section_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border())
}

/// Render a labelled single-line input box
pub fn render_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Line<'_>,
    focused: bool,
    theme: &Theme,
) {
    let border = if focused {
        theme.border_focused()
    } else {
        theme.border()
    };
    let block = Block::default()
        .title(format!(" {} ", label))
        .title_style(theme.text_secondary())
        .borders(Borders::ALL)
        .border_style(border);

    let input = Paragraph::new(value)
        .style(theme.input(focused))
        .block(block);
    frame.render_widget(input, area);
}

/// Masked rendering of a secret: one dot per character
pub fn masked(secret: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "\u{2022}".repeat(secret.chars().count()),
        theme.mask(),
    )];
    if focused {
        spans.push(Span::styled("_", theme.text_muted()));
    }
    Line::from(spans)
}

/// Plain rendering of an input value with a cursor when focused
pub fn plain(value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled(value.to_string(), theme.text())];
    if focused {
        spans.push(Span::styled("_", theme.text_muted()));
    }
    Line::from(spans)
}
