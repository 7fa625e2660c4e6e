//! Parrot/neon theme tokens for the Econgadget TUI
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, selected menu item)
//! - **Warning**: Neon orange (status warnings)
//! - **Negative**: Hot pink (errors)
//! - **Muted**: Steel blue (hints, axes)
//!
//! Series and term colors come from the chart palette and are converted here.

use econgadget_core::overlay::Rgb;
use ratatui::style::{Color, Style};

/// Parrot/neon theme for the Econgadget TUI
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Hot pink (errors)
    pub negative: Color,
    /// Neon orange (warnings)
    pub warning: Color,
    /// Steel blue (muted text, axes)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
    /// Light gray (secondary text)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    /// Create the default Parrot/neon theme
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Palette color as a terminal color.
    pub fn series_color(&self, rgb: Rgb) -> Color {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }

    /// `rgb` at opacity `alpha` over `under`. Non-RGB `under` colors are
    /// treated as the theme background.
    pub fn shade(&self, rgb: Rgb, alpha: f32, under: Color) -> Color {
        let (br, bg, bb) = match under {
            Color::Rgb(r, g, b) => (r, g, b),
            _ => match self.background {
                Color::Rgb(r, g, b) => (r, g, b),
                _ => (0, 0, 0),
            },
        };
        let a = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        Color::Rgb(mix(rgb.0, br), mix(rgb.1, bg), mix(rgb.2, bb))
    }
}

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const MUTED: Color = Color::Rgb(100, 149, 237);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn warning() -> Style {
    Style::default().fg(Theme::default().warning)
}

pub fn negative() -> Style {
    Style::default().fg(Theme::default().negative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::Rgb(18, 18, 20));
        assert_eq!(theme.accent, ACCENT);
    }

    #[test]
    fn test_shade_blends_over_background() {
        let theme = Theme::default();
        let red = Rgb(255, 0, 0);
        assert_eq!(theme.shade(red, 1.0, Color::Reset), Color::Rgb(255, 0, 0));
        assert_eq!(theme.shade(red, 0.0, Color::Reset), theme.background);
        assert_eq!(
            theme.shade(red, 0.2, Color::Rgb(0, 0, 0)),
            Color::Rgb(51, 0, 0)
        );
    }
}
