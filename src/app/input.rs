//! Normalises crossterm mouse events into engine gesture events.
//!
//! Terminal mice report cells, not pixels, so columns are scaled by the
//! configured cell width.  Timestamps are measured from a fixed origin taken
//! when the app starts.

use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::core::{GestureEvent, PointerSource};

#[derive(Debug, Clone)]
pub struct InputAdapter {
    cell_width_px: f64,
    origin: Instant,
}

impl InputAdapter {
    pub fn new(cell_width_px: f64, origin: Instant) -> Self {
        Self {
            cell_width_px,
            origin,
        }
    }

    /// Engine timestamp for a wall-clock instant.
    pub fn timestamp(&self, at: Instant) -> Duration {
        at.saturating_duration_since(self.origin)
    }

    /// Horizontal position (px) of the centre of `column`.
    pub fn x(&self, column: u16) -> f64 {
        (f64::from(column) + 0.5) * self.cell_width_px
    }

    pub fn cell_width_px(&self) -> f64 {
        self.cell_width_px
    }

    /// `None` for anything that is not part of a horizontal press/drag/release.
    pub fn normalize(&self, mouse: &MouseEvent, at: Instant) -> Option<GestureEvent> {
        let x = self.x(mouse.column);
        let at = self.timestamp(at);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(GestureEvent::Start {
                x,
                at,
                source: PointerSource::Primary,
            }),
            MouseEventKind::Down(_) => Some(GestureEvent::Start {
                x,
                at,
                source: PointerSource::Secondary,
            }),
            MouseEventKind::Drag(MouseButton::Left) => Some(GestureEvent::Move { x }),
            MouseEventKind::Up(MouseButton::Left) => Some(GestureEvent::End { x, at }),
            _ => None,
        }
    }
}
