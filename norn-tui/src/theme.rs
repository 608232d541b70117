//! Color theme for the norn swarm monitor.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI.
///
/// Holds every color the monitor uses so widgets never hardcode palette
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Quality badge colors
    pub excellent: Color,
    pub good: Color,
    pub poor: Color,
    pub failed: Color,
    pub stuck: Color,
    pub neutral: Color,

    // UI element colors
    pub border: Color,
    pub selection: Color,
    pub muted: Color,

    // Text styles
    pub bold: Style,
    pub dim: Style,
}

/// Creates the default norn theme.
///
/// A dark surface with a violet accent for pipeline chrome:
/// - Emerald (#34d399) for aligned and excellent
/// - Amber (#facc15) for slight drift and poor
/// - Red (#f87171) for high drift and failed
pub fn norn_default() -> Theme {
    let fg = Color::Rgb(229, 231, 235); // #e5e7eb

    Theme {
        name: "norn".into(),

        bg: Color::Rgb(17, 17, 21), // #111115
        fg,
        accent: Color::Rgb(167, 139, 250), // #a78bfa
        success: Color::Rgb(52, 211, 153), // #34d399
        warning: Color::Rgb(250, 204, 21), // #facc15
        error: Color::Rgb(248, 113, 113),  // #f87171

        excellent: Color::Rgb(52, 211, 153), // #34d399
        good: Color::Rgb(96, 165, 250),      // #60a5fa
        poor: Color::Rgb(250, 204, 21),      // #facc15
        failed: Color::Rgb(248, 113, 113),   // #f87171
        stuck: Color::Rgb(251, 146, 60),     // #fb923c
        neutral: Color::Rgb(156, 163, 175),  // #9ca3af

        border: Color::Rgb(55, 55, 65),    // #373741
        selection: Color::Rgb(38, 32, 60), // #26203c
        muted: Color::Rgb(107, 114, 128),  // #6b7280

        bold: Style::default().fg(fg).add_modifier(Modifier::BOLD),
        dim: Style::default()
            .fg(Color::Rgb(107, 114, 128))
            .add_modifier(Modifier::DIM),
    }
}
