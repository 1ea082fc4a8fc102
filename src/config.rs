//! User configuration: interaction tuning, terminal geometry and decks.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/card-carousel/config.toml` (default
//! `~/.config/card-carousel/config.toml`).  Unknown keys and malformed values
//! are skipped; numbers are clamped into usable ranges.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::core::CarouselConfig;

// ───────────────────────────────────────── settings ──────────

/// Interaction and rendering settings shared by every deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Inactivity window before auto-advance.
    pub auto_advance_ms: u64,
    /// Release speed (px/ms) that flips to the next card.
    pub flip_velocity: f64,
    /// Fraction of the card width a slow drag must cover.
    pub commit_fraction: f64,
    /// Settle animation length.
    pub animation_ms: u64,
    /// Pixel width of one terminal cell; mouse columns are scaled by it.
    pub cell_width_px: f64,
    /// Pixel height of one terminal cell; card heights are divided by it.
    pub cell_height_px: f64,
    /// Frame interval of the render loop.
    pub frame_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_advance_ms: 3000,
            flip_velocity: 0.45,
            commit_fraction: 0.5,
            animation_ms: 500,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
            frame_ms: 16,
        }
    }
}

impl Settings {
    /// Load settings from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        Self::default()
    }

    /// Persist current settings to disk, returning the path written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    /// Pull every value back into its usable range.
    pub fn clamp(&mut self) {
        self.auto_advance_ms = self.auto_advance_ms.clamp(500, 60_000);
        self.flip_velocity = clamp_f64(self.flip_velocity, 0.05, 10.0, 0.45);
        self.commit_fraction = clamp_f64(self.commit_fraction, 0.1, 1.0, 0.5);
        self.animation_ms = self.animation_ms.clamp(50, 5000);
        self.cell_width_px = clamp_f64(self.cell_width_px, 2.0, 64.0, 8.0);
        self.cell_height_px = clamp_f64(self.cell_height_px, 4.0, 128.0, 16.0);
        self.frame_ms = self.frame_ms.clamp(4, 100);
    }

    /// Engine configuration for one deck.
    pub fn carousel_config(&self, deck: &DeckSpec) -> CarouselConfig {
        CarouselConfig {
            card_width: deck.card_width,
            card_height: deck.card_height,
            auto_advance: Duration::from_millis(self.auto_advance_ms),
            flip_velocity: self.flip_velocity,
            commit_fraction: self.commit_fraction,
            animation: Duration::from_millis(self.animation_ms),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    fn parse_config(s: &str) -> Self {
        let mut settings = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');

            match key.trim() {
                "auto_advance_ms" => parse_into(value, &mut settings.auto_advance_ms),
                "flip_velocity" => parse_into(value, &mut settings.flip_velocity),
                "commit_fraction" => parse_into(value, &mut settings.commit_fraction),
                "animation_ms" => parse_into(value, &mut settings.animation_ms),
                "cell_width_px" => parse_into(value, &mut settings.cell_width_px),
                "cell_height_px" => parse_into(value, &mut settings.cell_height_px),
                "frame_ms" => parse_into(value, &mut settings.frame_ms),
                other => tracing::debug!("ignoring unknown config key {other:?}"),
            }
        }

        settings.clamp();
        settings
    }

    fn serialise(&self) -> String {
        [
            "# card-carousel configuration".to_string(),
            String::new(),
            "# Interaction".to_string(),
            format!("auto_advance_ms = {}", self.auto_advance_ms),
            format!("flip_velocity = {}", self.flip_velocity),
            format!("commit_fraction = {}", self.commit_fraction),
            format!("animation_ms = {}", self.animation_ms),
            String::new(),
            "# Terminal geometry".to_string(),
            format!("cell_width_px = {}", self.cell_width_px),
            format!("cell_height_px = {}", self.cell_height_px),
            format!("frame_ms = {}", self.frame_ms),
            String::new(),
        ]
        .join("\n")
    }
}

fn parse_into<V: FromStr>(value: &str, slot: &mut V) {
    if let Ok(v) = value.parse() {
        *slot = v;
    }
}

fn clamp_f64(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/card-carousel/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("card-carousel").join("config.toml")
}

// ───────────────────────────────────────── decks ─────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckSpecError {
    #[error("deck has no cards")]
    Empty,
    #[error("card size {0:?} is not WIDTHxHEIGHT")]
    BadSize(String),
    #[error("card width must be positive")]
    ZeroWidth,
}

/// One carousel on screen: `NAMES[:WIDTHxHEIGHT]`, e.g.
/// `red,orange,green,blue:280x60`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckSpec {
    pub cards: Vec<String>,
    pub card_width: f64,
    pub card_height: f64,
}

impl DeckSpec {
    /// The two demo decks shown when none are given.
    pub fn defaults() -> Vec<DeckSpec> {
        vec![
            DeckSpec {
                cards: ["red", "orange", "green", "blue"].map(String::from).to_vec(),
                card_width: 280.0,
                card_height: 60.0,
            },
            DeckSpec {
                cards: ["indigo", "purple"].map(String::from).to_vec(),
                card_width: 200.0,
                card_height: 120.0,
            },
        ]
    }
}

impl FromStr for DeckSpec {
    type Err = DeckSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (names, size) = match s.rsplit_once(':') {
            Some((names, size)) => (names, Some(size)),
            None => (s, None),
        };

        let cards: Vec<String> = names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        if cards.is_empty() {
            return Err(DeckSpecError::Empty);
        }

        let (card_width, card_height) = match size {
            None => (280.0, 60.0),
            Some(size) => {
                let bad = || DeckSpecError::BadSize(size.to_string());
                let (w, h) = size.trim().split_once(['x', 'X']).ok_or_else(bad)?;
                let w: u32 = w.trim().parse().map_err(|_| bad())?;
                let h: u32 = h.trim().parse().map_err(|_| bad())?;
                (f64::from(w), f64::from(h))
            }
        };
        if card_width <= 0.0 {
            return Err(DeckSpecError::ZeroWidth);
        }

        Ok(DeckSpec {
            cards,
            card_width,
            card_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DeckSpec, DeckSpecError, Settings};
    use std::time::Duration;

    #[test]
    fn parses_known_keys_and_skips_junk() {
        let settings = Settings::parse_config(
            "# comment\n[carousel]\nauto_advance_ms = 4500\nflip_velocity = 0.6\n\
             animation_ms = oops\nmystery = 1\nframe_ms=\"20\"\n",
        );
        assert_eq!(settings.auto_advance_ms, 4500);
        assert_eq!(settings.flip_velocity, 0.6);
        assert_eq!(settings.animation_ms, 500);
        assert_eq!(settings.frame_ms, 20);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let settings = Settings::parse_config(
            "auto_advance_ms = 1\ncommit_fraction = 7\ncell_width_px = NaN\n",
        );
        assert_eq!(settings.auto_advance_ms, 500);
        assert_eq!(settings.commit_fraction, 1.0);
        assert_eq!(settings.cell_width_px, 8.0);
    }

    #[test]
    fn serialised_settings_parse_back() {
        let mut settings = Settings::default();
        settings.flip_velocity = 0.7;
        settings.cell_height_px = 20.0;
        assert_eq!(Settings::parse_config(&settings.serialise()), settings);
    }

    #[test]
    fn deck_config_carries_sizes_and_timing() {
        let deck: DeckSpec = "indigo,purple:200x120".parse().expect("valid deck");
        let config = Settings::default().carousel_config(&deck);
        assert_eq!(config.card_width, 200.0);
        assert_eq!(config.card_height, 120.0);
        assert_eq!(config.auto_advance, Duration::from_millis(3000));
        assert_eq!(config.animation, Duration::from_millis(500));
    }

    #[test]
    fn deck_spec_parsing() {
        let deck: DeckSpec = " red , orange,green ".parse().expect("valid deck");
        assert_eq!(deck.cards, vec!["red", "orange", "green"]);
        assert_eq!((deck.card_width, deck.card_height), (280.0, 60.0));

        assert_eq!(",,".parse::<DeckSpec>(), Err(DeckSpecError::Empty));
        assert_eq!(
            "red:wide".parse::<DeckSpec>(),
            Err(DeckSpecError::BadSize("wide".into()))
        );
        assert_eq!("red:0x10".parse::<DeckSpec>(), Err(DeckSpecError::ZeroWidth));
    }
}
