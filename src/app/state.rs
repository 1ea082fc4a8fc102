//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::{DeckSpec, Settings};
use crate::core::{Carousel, CarouselError};
use crate::ui::layout::{card_rows, AppLayout};

use super::input::InputAdapter;

/// Top-level application state.
pub struct AppState {
    /// One carousel per deck, top to bottom.
    pub decks: Vec<Carousel<String>>,
    /// Interaction and geometry settings.
    pub settings: Settings,
    /// Mouse → gesture normalisation and the gesture clock.
    pub input: InputAdapter,
    /// Deck that received the current press; moves and the release go to it
    /// even when the pointer wanders off its band.
    pub active_deck: Option<usize>,
    /// Last pointer x (px), used to release a drag when focus is lost.
    pub last_x: f64,
    /// Last click notification, shown in the status bar.
    pub status_message: Option<String>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Full terminal area from the last draw or resize.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(decks: &[DeckSpec], settings: Settings, origin: Instant) -> Result<Self, CarouselError> {
        let input = InputAdapter::new(settings.cell_width_px, origin);
        let now = input.timestamp(origin);
        let decks = decks
            .iter()
            .map(|deck| Carousel::new(deck.cards.clone(), settings.carousel_config(deck), now))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            decks,
            settings,
            input,
            active_deck: None,
            last_x: 0.0,
            status_message: None,
            should_quit: false,
            terminal_area: Rect::default(),
        })
    }

    /// Card height of every deck in terminal rows.
    pub fn card_rows(&self) -> Vec<u16> {
        self.decks
            .iter()
            .map(|deck| card_rows(deck.config().card_height, self.settings.cell_height_px))
            .collect()
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area, &self.card_rows())
    }
}
