//! Visual theme and color palette

use ratatui::style::{Color, Modifier, Style};

/// Startdash color palette
pub struct Theme {
    // Branding
    pub accent: Color,
    pub accent_soft: Color,
    pub background: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub selection: Color,

    // Gauges
    pub gauge_filled: Color,
    pub gauge_empty: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(0, 188, 212),       // #00BCD4
            accent_soft: Color::Rgb(128, 222, 234), // #80DEEA
            background: Color::Rgb(24, 26, 31),     // #181A1F

            success: Color::Rgb(76, 175, 80), // #4CAF50
            warning: Color::Rgb(255, 152, 0), // #FF9800
            danger: Color::Rgb(244, 67, 54),  // #F44336

            border: Color::Rgb(66, 66, 66),            // #424242
            border_focused: Color::Rgb(0, 188, 212),   // #00BCD4
            text_primary: Color::Rgb(250, 250, 250),   // #FAFAFA
            text_secondary: Color::Rgb(189, 189, 189), // #BDBDBD
            text_muted: Color::Rgb(117, 117, 117),     // #757575
            selection: Color::Rgb(45, 50, 58),         // #2D323A

            gauge_filled: Color::Rgb(0, 188, 212),
            gauge_empty: Color::Rgb(66, 66, 66),
        }
    }
}

impl Theme {
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Large greeting and clock text
    pub fn headline(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Get danger style
    pub fn danger(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    /// Get menu item style
    pub fn menu_item(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .bg(self.selection)
                .fg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text_primary)
        }
    }

    /// Get input field style
    pub fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.text_primary).bg(self.background)
        } else {
            Style::default().fg(self.text_secondary).bg(self.background)
        }
    }

    /// Masked password characters
    pub fn mask(&self) -> Style {
        Style::default()
            .fg(self.accent_soft)
            .add_modifier(Modifier::BOLD)
    }

    /// Gauge colors, shifting to warning/danger as usage climbs
    pub fn gauge(&self, percent: f64) -> Style {
        let fg = if percent >= 90.0 {
            self.danger
        } else if percent >= 75.0 {
            self.warning
        } else {
            self.gauge_filled
        };
        Style::default().fg(fg).bg(self.gauge_empty)
    }
}
