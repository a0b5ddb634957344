//! Color theme for the board.
//!
//! Colors are configured as a table of symbolic keys to `#RRGGBB` strings
//! under `[theme]` in the board configuration.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use ratatui::style::{Color, Style};
use tracing::warn;

/// A symbolic color name accepted in the `[theme]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeKey {
    /// Slot button background.
    Button,
    /// Slot button label.
    ButtonText,
    Command,
    Description,
    /// Slot numbers, hotkey hints and help text.
    Label,
    /// Page number and page description.
    Page,
    Border,
    Background,
    /// Selected slot and error popups.
    Accent,
}

impl ThemeKey {
    pub const ALL: [Self; 9] = [
        Self::Button,
        Self::ButtonText,
        Self::Command,
        Self::Description,
        Self::Label,
        Self::Page,
        Self::Border,
        Self::Background,
        Self::Accent,
    ];

    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::ButtonText => "button_text",
            Self::Command => "command",
            Self::Description => "description",
            Self::Label => "label",
            Self::Page => "page",
            Self::Border => "border",
            Self::Background => "background",
            Self::Accent => "accent",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Built-in color: blue buttons with white text, green text on black.
    pub fn default_color(self) -> Color {
        match self {
            Self::Button => Color::Rgb(11, 16, 150),
            Self::ButtonText | Self::Border => Color::Rgb(255, 255, 255),
            Self::Command | Self::Description | Self::Label | Self::Page => Color::Rgb(22, 181, 4),
            Self::Background => Color::Rgb(0, 0, 0),
            Self::Accent => Color::Rgb(195, 25, 21),
        }
    }
}

/// Board color theme: one color per [`ThemeKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardTheme {
    colors: BTreeMap<ThemeKey, Color>,
}

impl Default for BoardTheme {
    fn default() -> Self {
        Self { colors: ThemeKey::ALL.into_iter().map(|key| (key, key.default_color())).collect() }
    }
}

impl BoardTheme {
    /// Parse hex color string to RGB Color.
    ///
    /// Accepts formats: "#RRGGBB" or "RRGGBB"
    pub fn parse_hex_color(hex: &str) -> Result<Color> {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return Err(anyhow::anyhow!("Invalid hex color length: {}", hex));
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .with_context(|| format!("Invalid red component in hex color: {}", hex))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .with_context(|| format!("Invalid green component in hex color: {}", hex))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .with_context(|| format!("Invalid blue component in hex color: {}", hex))?;

        Ok(Color::Rgb(r, g, b))
    }

    /// Default theme with the configured colors applied.
    ///
    /// Unknown keys and malformed values are skipped with a warning.
    pub fn from_map(colors: &BTreeMap<String, String>) -> Self {
        let mut theme = Self::default();
        for (name, value) in colors {
            let Some(key) = ThemeKey::from_name(name) else {
                warn!(key = %name, "Unknown theme key");
                continue;
            };
            match Self::parse_hex_color(value) {
                Ok(color) => theme.set(key, color),
                Err(e) => warn!(key = %name, error = %e, "Ignoring theme color"),
            }
        }
        theme
    }

    pub fn get(&self, key: ThemeKey) -> Color {
        self.colors.get(&key).copied().unwrap_or_else(|| key.default_color())
    }

    pub fn set(&mut self, key: ThemeKey, color: Color) {
        self.colors.insert(key, color);
    }

    /// Color for a configuration name such as `"button_text"`.
    pub fn lookup(&self, name: &str) -> Option<Color> {
        ThemeKey::from_name(name).map(|key| self.get(key))
    }

    /// Foreground style in the color of `key`.
    pub fn fg(&self, key: ThemeKey) -> Style {
        Style::default().fg(self.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(BoardTheme::parse_hex_color("#0B1096").unwrap(), Color::Rgb(11, 16, 150));
        assert_eq!(BoardTheme::parse_hex_color("ffffff").unwrap(), Color::Rgb(255, 255, 255));
        assert!(BoardTheme::parse_hex_color("#12345").is_err());
        assert!(BoardTheme::parse_hex_color("#GG0000").is_err());
        assert!(BoardTheme::parse_hex_color("#ééé").is_err());
    }

    #[test]
    fn test_from_map_applies_known_keys() {
        let mut colors = BTreeMap::new();
        colors.insert("button".to_string(), "#102030".to_string());
        colors.insert("border".to_string(), "not-a-color".to_string());
        colors.insert("sparkle".to_string(), "#FFFFFF".to_string());

        let theme = BoardTheme::from_map(&colors);

        assert_eq!(theme.get(ThemeKey::Button), Color::Rgb(16, 32, 48));
        assert_eq!(theme.get(ThemeKey::Border), ThemeKey::Border.default_color());
        assert_eq!(theme.lookup("sparkle"), None);
    }

    #[test]
    fn test_names_round_trip() {
        let theme = BoardTheme::default();
        for key in ThemeKey::ALL {
            assert_eq!(ThemeKey::from_name(key.name()), Some(key));
            assert_eq!(theme.lookup(key.name()), Some(key.default_color()));
        }
    }
}
