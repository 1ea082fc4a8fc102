//! Gesture tracking: press / move / release → drag delta and release velocity.
//!
//! Hosts normalise whatever their input layer delivers (mouse buttons, touch
//! points) into [`GestureEvent`] before handing it to the engine.  Positions
//! are horizontal distances in the same unit as the card width; timestamps
//! come from a monotonic clock.

use std::time::Duration;

/// Which pointer produced a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    /// Primary mouse button.
    Primary,
    /// Right / middle / any other mouse button.  Never starts a gesture.
    Secondary,
    /// A touch point.
    Touch,
}

impl PointerSource {
    fn can_drag(self) -> bool {
        !matches!(self, PointerSource::Secondary)
    }
}

/// Canonical gesture input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start {
        x: f64,
        at: Duration,
        source: PointerSource,
    },
    Move {
        x: f64,
    },
    End {
        x: f64,
        at: Duration,
    },
}

/// One press-to-release cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub start_x: f64,
    pub start_time: Duration,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Press and release at the same spot.
    Tap,
    /// Net horizontal travel, in distance units, and velocity in units/ms.
    Drag { distance: f64, velocity: f64 },
}

/// Converts raw press/move/release into deltas.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    session: Option<GestureSession>,
    last_delta: f64,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session.  Returns `false` (and changes nothing) for a
    /// secondary-button press or a stray second press while one is active.
    pub fn on_start(&mut self, x: f64, at: Duration, source: PointerSource) -> bool {
        if !source.can_drag() {
            tracing::trace!("ignoring press from {source:?}");
            return false;
        }
        if self.session.is_some() {
            tracing::trace!("ignoring press while a gesture is already active");
            return false;
        }
        self.session = Some(GestureSession {
            start_x: x,
            start_time: at,
        });
        self.last_delta = 0.0;
        true
    }

    /// Delta from the press position, or `None` with no active session.
    pub fn on_move(&mut self, x: f64) -> Option<f64> {
        let session = self.session.as_ref()?;
        self.last_delta = x - session.start_x;
        Some(self.last_delta)
    }

    /// Close the session and report the release.  A second call without an
    /// intervening press returns `None`.
    pub fn on_end(&mut self, x: f64, at: Duration) -> Option<Release> {
        let session = self.session.take()?;
        let distance = x - session.start_x;
        self.last_delta = distance;
        if distance == 0.0 {
            return Some(Release::Tap);
        }
        let elapsed_ms = at.saturating_sub(session.start_time).as_secs_f64() * 1000.0;
        Some(Release::Drag {
            distance,
            velocity: release_velocity(distance, elapsed_ms),
        })
    }

    /// Drop the session without reporting a release.
    pub fn abort(&mut self) {
        self.session = None;
        self.last_delta = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Delta reported by the most recent move or release.
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }
}

/// `distance / elapsed`, with an instantaneous release treated as an
/// infinitely fast flick in the direction of travel.
fn release_velocity(distance: f64, elapsed_ms: f64) -> f64 {
    if distance == 0.0 {
        0.0
    } else if elapsed_ms <= 0.0 {
        f64::INFINITY.copysign(distance)
    } else {
        distance / elapsed_ms
    }
}
