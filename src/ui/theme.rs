//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Terminal background the card fade blends toward.
const BACKGROUND: (u8, u8, u8) = (24, 24, 24);

/// Central theme. Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── cards ──────────────────────────────────────────────────

    /// RGB for a card identifier: a CSS-style colour name or `#rrggbb`.
    /// Unknown names render grey.
    pub fn card_rgb(name: &str) -> (u8, u8, u8) {
        if let Some(hex) = name.strip_prefix('#') {
            if let Some(rgb) = parse_hex(hex) {
                return rgb;
            }
        }
        match name.to_ascii_lowercase().as_str() {
            "red" => (220, 50, 47),
            "orange" => (255, 140, 0),
            "yellow" => (235, 200, 40),
            "green" => (46, 160, 67),
            "blue" => (38, 110, 220),
            "indigo" => (75, 0, 130),
            "purple" => (128, 0, 128),
            "pink" => (255, 105, 180),
            "cyan" => (0, 170, 190),
            "teal" => (0, 128, 128),
            "white" => (235, 235, 235),
            "black" => (10, 10, 10),
            _ => (128, 128, 128),
        }
    }

    pub fn card_color(name: &str) -> Color {
        let (r, g, b) = Self::card_rgb(name);
        Color::Rgb(r, g, b)
    }

    /// `top` drawn at `opacity` over whatever colour is already there.
    pub fn blend(top: (u8, u8, u8), under: Color, opacity: f64) -> Color {
        let under = match under {
            Color::Rgb(r, g, b) => (r, g, b),
            _ => BACKGROUND,
        };
        let a = opacity.clamp(0.0, 1.0);
        let mix = |t: u8, u: u8| (f64::from(u) + (f64::from(t) - f64::from(u)) * a).round() as u8;
        Color::Rgb(mix(top.0, under.0), mix(top.1, under.1), mix(top.2, under.2))
    }

    pub fn card_text_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn swipe_label_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn auto_label_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn deck_list_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
