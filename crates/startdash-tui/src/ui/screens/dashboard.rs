//! Dashboard: clock, system stats, now playing and the app launcher

use ratatui::prelude::*;
use ratatui::widgets::{Gauge, List, ListItem, ListState, Paragraph};
use startdash_core::collaborators::{MediaInfo, SystemStats};
use startdash_core::router::DashboardView;

use crate::ui::layout::{render_footer, render_header, section_block, ScreenLayout};
use crate::ui::Theme;

/// Draw the dashboard
pub fn render(
    frame: &mut Frame,
    area: Rect,
    view: &DashboardView,
    status: Option<&str>,
    theme: &Theme,
) {
    let layout = ScreenLayout::new(area);

    let title = if view.user_name.is_empty() {
        "Dashboard".to_string()
    } else {
        format!("Hello, {}", view.user_name)
    };
    render_header(frame, layout.header, &title, theme);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Clock and media
            Constraint::Length(6), // Stats
            Constraint::Min(3),    // Apps
            Constraint::Length(1), // Status message
        ])
        .split(layout.content);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_clock(frame, top[0], view, theme);
    render_media(frame, top[1], &view.now_playing, theme);
    render_stats(frame, rows[1], &view.stats, theme);
    render_apps(frame, rows[2], view, theme);

    if let Some(status) = status {
        let status_widget = Paragraph::new(status)
            .style(theme.text_secondary())
            .alignment(Alignment::Center);
        frame.render_widget(status_widget, rows[3]);
    }

    render_footer(
        frame,
        layout.footer,
        &[("\u{2191}\u{2193}", "Select"), ("Enter", "Launch"), ("q", "Quit")],
        theme,
    );
}

fn render_clock(frame: &mut Frame, area: Rect, view: &DashboardView, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(view.current_time.as_str(), theme.headline())),
        Line::from(Span::styled(view.current_date.as_str(), theme.text_secondary())),
    ];
    let clock = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(section_block("Time", theme));
    frame.render_widget(clock, area);
}

fn render_media(frame: &mut Frame, area: Rect, media: &MediaInfo, theme: &Theme) {
    let icon = if media.is_playing { "\u{25B6}" } else { "\u{23F8}" };
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", icon), theme.title()),
            Span::styled(media.title.as_str(), theme.headline()),
        ]),
        Line::from(Span::styled(media.artist.as_str(), theme.text_secondary())),
    ];
    let now_playing = Paragraph::new(lines).block(section_block("Now Playing", theme));
    frame.render_widget(now_playing, area);
}

fn render_stats(frame: &mut Frame, area: Rect, stats: &SystemStats, theme: &Theme) {
    let block = section_block("System", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 4])
        .split(inner);

    render_gauge(frame, rows[0], "CPU", Some(stats.cpu_usage), "", theme);
    render_gauge(frame, rows[1], "Memory", Some(stats.memory_usage), "", theme);
    render_gauge(frame, rows[2], "Disk", stats.disk(), "", theme);

    let charging = if stats.is_charging { " charging" } else { "" };
    render_gauge(frame, rows[3], "Battery", stats.battery(), charging, theme);
}

fn render_gauge(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<f64>,
    suffix: &str,
    theme: &Theme,
) {
    let Some(percent) = value else {
        let unavailable = Paragraph::new(format!("{:<8} n/a", label)).style(theme.text_muted());
        frame.render_widget(unavailable, area);
        return;
    };

    let percent = percent.clamp(0.0, 100.0);
    let gauge = Gauge::default()
        .gauge_style(theme.gauge(percent))
        .ratio(percent / 100.0)
        .label(format!("{} {:.0}%{}", label, percent, suffix));
    frame.render_widget(gauge, area);
}

fn render_apps(frame: &mut Frame, area: Rect, view: &DashboardView, theme: &Theme) {
    let block = section_block("Apps", theme);

    if view.apps.is_empty() {
        let empty = Paragraph::new("Looking for installed apps\u{2026}")
            .style(theme.text_muted())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view
        .apps
        .iter()
        .enumerate()
        .map(|(i, app)| {
            ListItem::new(format!("  {}  ", app.name))
                .style(theme.menu_item(i == view.selected_app))
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(view.selected_app));
    let list = List::new(items).block(block);
    frame.render_stateful_widget(list, area, &mut state);
}
