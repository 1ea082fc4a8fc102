//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Rows a card of `height_px` occupies, never less than one.
pub fn card_rows(height_px: f64, cell_height_px: f64) -> u16 {
    let rows = (height_px / cell_height_px).ceil();
    if rows.is_finite() && rows >= 1.0 {
        rows.min(f64::from(u16::MAX)) as u16
    } else {
        1
    }
}

/// The card band inside a deck region (between the status line and the
/// card list).
pub fn card_band(deck_area: Rect) -> Rect {
    Rect {
        y: deck_area.y.saturating_add(1),
        height: deck_area.height.saturating_sub(2),
        ..deck_area
    }
}

/// Screen layout: one region per deck, stacked, and a bottom status bar.
pub struct AppLayout {
    pub deck_areas: Vec<Rect>,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.  `card_rows` holds
    /// each deck's card height in rows.
    pub fn from_area(area: Rect, card_rows: &[u16]) -> Self {
        let mut constraints = Vec::with_capacity(card_rows.len() * 2 + 2);
        for &rows in card_rows {
            constraints.push(Constraint::Length(rows.saturating_add(2))); // status + cards + list
            constraints.push(Constraint::Length(1)); // gap
        }
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1)); // status bar

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        Self {
            deck_areas: (0..card_rows.len()).map(|i| chunks[i * 2]).collect(),
            status_area: chunks[chunks.len() - 1],
        }
    }

    /// Index of the deck whose card band contains the cell, if any.
    pub fn deck_at(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.deck_areas
            .iter()
            .position(|&area| card_band(area).contains(pos))
    }
}
