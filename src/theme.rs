//! Colours for the selector
//! Optionally read from a kitty.conf-style file (`key #rrggbb` per line)

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,       // Focused borders, key hints (color2)
    pub checked: Color,      // Checked boxes (color10)
    pub danger: Color,       // Discard prompt (color1)
    pub success: Color,      // Confirm hint
    pub warning: Color,      // Status messages (color4)
    pub text: Color,         // Primary text (foreground)
    pub text_dim: Color,     // Disabled rows, placeholders (color8)
    pub bg_selected: Color,  // Cursor row background
    pub inactive: Color,     // Unfocused borders, disabled buttons
    pub header: Color,       // Help section headers
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired fallback
        Self {
            accent: Color::Rgb(250, 179, 135),
            checked: Color::Rgb(166, 218, 149),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            warning: Color::Rgb(249, 226, 175),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(243, 139, 168),
        }
    }
}

impl Theme {
    /// Load theme from a colour file, falling back to the built-in palette
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match fs::read_to_string(path) {
            Ok(content) => {
                let colors = Self::parse_kitty_conf(&content);
                if colors.is_empty() {
                    tracing::warn!("No colours found in {}", path.display());
                    Self::default()
                } else {
                    Self::from_colors(&colors)
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read theme {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn from_colors(colors: &HashMap<String, Color>) -> Self {
        let fallback = Self::default();
        let pick = |keys: &[&str], default: Color| {
            keys.iter()
                .find_map(|k| colors.get(*k))
                .copied()
                .unwrap_or(default)
        };

        let accent = pick(&["color2", "color10"], fallback.accent);
        let danger = pick(&["color1", "color9"], fallback.danger);

        Self {
            accent,
            checked: pick(&["color10", "color2"], fallback.checked),
            danger,
            success: accent,
            warning: pick(&["color4", "color12"], fallback.warning),
            text: pick(&["foreground"], fallback.text),
            text_dim: pick(&["color8"], fallback.text_dim),
            bg_selected: pick(&["selection_background", "color0"], fallback.bg_selected),
            inactive: pick(&["inactive_border_color", "color8"], fallback.inactive),
            header: danger,
        }
    }

    /// Parse kitty.conf format: `key value` or `key #hexcolor`
    fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(char::is_whitespace) {
                if let Some(color) = Self::parse_hex_color(value) {
                    colors.insert(key.trim().to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}
