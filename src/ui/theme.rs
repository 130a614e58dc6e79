use ratatui::style::{Color, Modifier, Style};
use std::path::PathBuf;
use tracing::warn;

use crate::core::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Persisted name to mode. Absent or unrecognized names mean light.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("dark") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_text_style: Style,
    pub pending_style: Style,

    // Chrome
    pub title_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            assistant_text_style: Style::default().fg(Color::Black),
            pending_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),

            title_style: Style::default().fg(Color::DarkGray),
            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),
            input_text_style: Style::default().fg(Color::Black),
        }
    }

    pub fn dark() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_text_style: Style::default().fg(Color::White),
            pending_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            title_style: Style::default().fg(Color::Gray),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}

/// Owns the binary light/dark display state: applies it, persists it, and
/// words the toggle control's label.
pub struct ThemeController {
    mode: ThemeMode,
    theme: Theme,
    config_path: PathBuf,
}

impl ThemeController {
    /// Read the persisted theme (absent means light) and apply it before the
    /// first frame.
    pub fn initialize(config_path: PathBuf) -> Self {
        let config = Config::load_from_path(&config_path).unwrap_or_else(|e| {
            warn!("could not read config for theme: {e}");
            Config::default()
        });
        let mode = ThemeMode::from_name(config.theme.as_deref());
        Self {
            mode,
            theme: Theme::for_mode(mode),
            config_path,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Label for the toggle control. Always names the opposite mode: the
    /// label advertises the action, not the current state.
    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            ThemeMode::Light => "Dark mode",
            ThemeMode::Dark => "Light mode",
        }
    }

    /// Flip the mode, apply the matching style set, and persist the choice.
    /// Persistence is best-effort; the flip itself always takes effect.
    pub fn toggle(&mut self) {
        self.mode = self.mode.flipped();
        self.theme = Theme::for_mode(self.mode);

        let mut config = Config::load_from_path(&self.config_path).unwrap_or_default();
        config.theme = Some(self.mode.as_str().to_string());
        if let Err(e) = config.save_to_path(&self.config_path) {
            warn!("could not persist theme preference: {e}");
        }
    }
}
