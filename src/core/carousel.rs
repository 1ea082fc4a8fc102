//! The carousel state machine.
//!
//! [`Carousel`] owns the current index, the visual offset, the gesture
//! tracker, the animation driver and the auto-advance timer.  It never reads
//! a clock itself: every entry point takes the host's monotonic `now`, and
//! the host calls [`Carousel::tick`] once per frame.
//!
//! ```text
//!   Idle ──press──▶ Dragging ──release──▶ Resolving ──done──▶ Idle
//!    │                  ▲                     │
//!    └──timer fires─────┼────────────────────▶┘
//!                       └──press (pre-empts the run)
//! ```

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use super::animation::{AnimationDriver, Frame};
use super::gesture::{GestureEvent, GestureTracker, PointerSource, Release};
use super::policy::{TransitionDecision, TransitionPolicy};
use super::timer::AutoAdvanceTimer;

// ───────────────────────────────────────── configuration ─────

/// Construction-time settings for one carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Width of a card in distance units.  Positions and offsets share it.
    pub card_width: f64,
    /// Presentational only; carried through to the view.
    pub card_height: f64,
    /// Inactivity window before the next card is shown automatically.
    pub auto_advance: Duration,
    /// Release speed (units/ms) that commits regardless of distance.
    pub flip_velocity: f64,
    /// Fraction of `card_width` a slow drag must cover to commit.
    pub commit_fraction: f64,
    /// Length of the settle animation.
    pub animation: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            card_width: 280.0,
            card_height: 60.0,
            auto_advance: Duration::from_millis(3000),
            flip_velocity: 0.45,
            commit_fraction: 0.5,
            animation: Duration::from_millis(500),
        }
    }
}

impl CarouselConfig {
    pub fn policy(&self) -> TransitionPolicy {
        TransitionPolicy {
            flip_velocity: self.flip_velocity,
            commit_fraction: self.commit_fraction,
        }
    }

    fn validate(&self) -> Result<(), CarouselError> {
        let invalid = |reason: &str| Err(CarouselError::InvalidConfiguration(reason.to_string()));
        if !(self.card_width.is_finite() && self.card_width > 0.0) {
            return invalid("card width must be a positive number");
        }
        if !(self.card_height.is_finite() && self.card_height >= 0.0) {
            return invalid("card height must not be negative");
        }
        if !(self.flip_velocity.is_finite() && self.flip_velocity > 0.0) {
            return invalid("flip velocity must be a positive number");
        }
        if !(self.commit_fraction > 0.0 && self.commit_fraction <= 1.0) {
            return invalid("commit fraction must be in (0, 1]");
        }
        if self.animation.is_zero() {
            return invalid("animation duration must be non-zero");
        }
        if self.auto_advance.is_zero() {
            return invalid("auto-advance delay must be non-zero");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarouselError {
    #[error("invalid carousel configuration: {0}")]
    InvalidConfiguration(String),
}

// ───────────────────────────────────────── state ─────────────

/// Coarse interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    /// A gesture session is active; offset follows the pointer 1:1.
    Dragging,
    /// A settle animation is moving the offset toward its target.
    Resolving,
}

/// What to commit when a settle animation lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settle {
    Return,
    Advance { auto: bool },
}

/// Short label for the interaction the user is seeing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Auto,
    Left,
    Right,
}

impl StatusLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::Auto => "auto",
            StatusLabel::Left => "left",
            StatusLabel::Right => "right",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notifications for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselEvent<T> {
    /// Press and release without travel on a resting card.
    Click { card: T },
    /// A transition committed; `index` is the new current card.
    Advanced { index: usize, auto: bool },
    /// A cancelled drag finished snapping back.
    Returned,
}

/// Read-only snapshot handed to the renderer.
#[derive(Debug)]
pub struct CarouselView<'a, T> {
    pub cards: &'a [T],
    pub current_index: usize,
    pub next_index: usize,
    pub offset: f64,
    /// `min(|offset| / card_width, 1)`.
    pub progress: f64,
    pub status: StatusLabel,
    pub dragging: bool,
    pub card_width: f64,
    pub card_height: f64,
}

impl<'a, T> CarouselView<'a, T> {
    pub fn current_card(&self) -> &'a T {
        &self.cards[self.current_index]
    }

    pub fn next_card(&self) -> &'a T {
        &self.cards[self.next_index]
    }
}

// ───────────────────────────────────────── carousel ──────────

#[derive(Debug)]
pub struct Carousel<T> {
    cards: Vec<T>,
    config: CarouselConfig,
    policy: TransitionPolicy,
    current_index: usize,
    offset: f64,
    /// Offset adopted from a pre-empted animation; the drag adds to it.
    drag_baseline: f64,
    mode: Mode,
    tracker: GestureTracker,
    driver: AnimationDriver<Settle>,
    timer: AutoAdvanceTimer,
    disposed: bool,
}

impl<T: Clone> Carousel<T> {
    /// Build a carousel resting on the first card, with the auto-advance
    /// timer armed from `now`.
    pub fn new(cards: Vec<T>, config: CarouselConfig, now: Duration) -> Result<Self, CarouselError> {
        if cards.is_empty() {
            return Err(CarouselError::InvalidConfiguration(
                "a carousel needs at least one card".to_string(),
            ));
        }
        config.validate()?;

        let mut timer = AutoAdvanceTimer::new(config.auto_advance);
        timer.arm(now);
        Ok(Self {
            cards,
            policy: config.policy(),
            driver: AnimationDriver::new(config.animation),
            config,
            current_index: 0,
            offset: 0.0,
            drag_baseline: 0.0,
            mode: Mode::Idle,
            tracker: GestureTracker::new(),
            timer,
            disposed: false,
        })
    }

    /// Dispatch a normalised gesture event.
    pub fn handle(&mut self, event: GestureEvent) -> Option<CarouselEvent<T>> {
        match event {
            GestureEvent::Start { x, at, source } => {
                self.gesture_start(x, at, source);
                None
            }
            GestureEvent::Move { x } => {
                self.gesture_move(x);
                None
            }
            GestureEvent::End { x, at } => self.gesture_end(x, at),
        }
    }

    /// Press.  Pre-empts a settle animation in flight: the card is caught
    /// where it currently is and its pending commit is dropped.
    pub fn gesture_start(&mut self, x: f64, at: Duration, source: PointerSource) {
        if self.disposed || !self.tracker.on_start(x, at, source) {
            return;
        }
        self.timer.cancel();
        if let Some(run) = self.driver.cancel() {
            tracing::debug!(
                "press caught card at offset {:.1} (was settling to {:.1})",
                self.offset,
                run.to_offset()
            );
        }
        self.drag_baseline = self.offset;
        self.mode = Mode::Dragging;
    }

    pub fn gesture_move(&mut self, x: f64) {
        if self.mode != Mode::Dragging {
            return;
        }
        if let Some(delta) = self.tracker.on_move(x) {
            self.offset = self.drag_baseline + delta;
        }
    }

    /// Release.  Decides the target synchronously and starts the settle
    /// animation; a tap on a resting card yields a click instead.
    pub fn gesture_end(&mut self, x: f64, at: Duration) -> Option<CarouselEvent<T>> {
        if self.mode != Mode::Dragging {
            return None;
        }
        let release = self.tracker.on_end(x, at)?;
        let (distance, velocity) = match release {
            Release::Tap if self.drag_baseline == 0.0 => {
                self.offset = 0.0;
                self.mode = Mode::Idle;
                self.timer.arm(at);
                let card = self.current_card().clone();
                return Some(CarouselEvent::Click { card });
            }
            Release::Tap => (self.drag_baseline, 0.0),
            Release::Drag { distance, velocity } => (self.drag_baseline + distance, velocity),
        };
        self.offset = distance;

        let decision = self.policy.decide(distance, velocity, self.config.card_width);
        tracing::debug!(
            "release: distance={distance:.1} velocity={velocity:.3} -> {decision:?}"
        );
        match decision {
            TransitionDecision::Advance(direction) => self.settle(
                direction.sign() * self.config.card_width,
                Settle::Advance { auto: false },
                at,
            ),
            TransitionDecision::Cancel => self.settle(0.0, Settle::Return, at),
        }
    }

    /// Drive one frame: advance the settle animation, or fire the
    /// auto-advance timer when resting.
    pub fn tick(&mut self, now: Duration) -> Option<CarouselEvent<T>> {
        if self.disposed {
            return None;
        }
        match self.mode {
            Mode::Dragging => None,
            Mode::Idle => {
                if !self.timer.fire_due(now) {
                    return None;
                }
                tracing::debug!("auto-advance from card {}", self.current_index);
                self.settle(self.config.card_width, Settle::Advance { auto: true }, now)
            }
            Mode::Resolving => match self.driver.frame(now) {
                Some(Frame::Running { value }) => {
                    self.offset = value;
                    None
                }
                Some(Frame::Finished { value, on_complete }) => {
                    self.offset = value;
                    Some(self.finish(on_complete, now))
                }
                None => Some(self.finish(Settle::Return, now)),
            },
        }
    }

    /// Cancel the pending timer and animation frame.  Every later call is a
    /// no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.timer.cancel();
        self.driver.cancel();
        self.tracker.abort();
        self.mode = Mode::Idle;
        self.disposed = true;
        tracing::debug!("carousel disposed on card {}", self.current_index);
    }

    fn settle(&mut self, target: f64, settle: Settle, now: Duration) -> Option<CarouselEvent<T>> {
        self.mode = Mode::Resolving;
        let done = self.driver.run(self.offset, target, now, settle)?;
        Some(self.finish(done, now))
    }

    fn finish(&mut self, settle: Settle, now: Duration) -> CarouselEvent<T> {
        self.offset = 0.0;
        self.drag_baseline = 0.0;
        self.mode = Mode::Idle;
        self.timer.arm(now);
        match settle {
            Settle::Return => CarouselEvent::Returned,
            Settle::Advance { auto } => {
                self.current_index = self.next_index();
                tracing::debug!("advanced to card {} (auto={auto})", self.current_index);
                CarouselEvent::Advanced {
                    index: self.current_index,
                    auto,
                }
            }
        }
    }
}

impl<T> Carousel<T> {
    pub fn cards(&self) -> &[T] {
        &self.cards
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn next_index(&self) -> usize {
        (self.current_index + 1) % self.cards.len()
    }

    pub fn current_card(&self) -> &T {
        &self.cards[self.current_index]
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn progress(&self) -> f64 {
        (self.offset.abs() / self.config.card_width).min(1.0)
    }

    pub fn status_label(&self) -> StatusLabel {
        match self.mode {
            Mode::Dragging if self.offset < 0.0 => StatusLabel::Left,
            Mode::Dragging => StatusLabel::Right,
            Mode::Idle | Mode::Resolving => StatusLabel::Auto,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.mode == Mode::Dragging
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_running()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// When the auto-advance timer will fire, if armed.
    pub fn auto_advance_deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    pub fn view(&self) -> CarouselView<'_, T> {
        CarouselView {
            cards: &self.cards,
            current_index: self.current_index,
            next_index: self.next_index(),
            offset: self.offset,
            progress: self.progress(),
            status: self.status_label(),
            dragging: self.is_dragging(),
            card_width: self.config.card_width,
            card_height: self.config.card_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Carousel, CarouselConfig, CarouselError, CarouselEvent, Mode, StatusLabel};
    use crate::core::gesture::PointerSource;
    use std::time::Duration;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn colors() -> Carousel<&'static str> {
        Carousel::new(vec!["red", "orange", "green"], CarouselConfig::default(), ms(0))
            .expect("valid carousel")
    }

    /// Tick at 16 ms intervals until idle, returning the last event seen.
    fn settle(carousel: &mut Carousel<&'static str>, from: u64) -> (u64, Option<CarouselEvent<&'static str>>) {
        let mut now = from;
        let mut last = None;
        while carousel.mode() == Mode::Resolving {
            now += 16;
            if let Some(event) = carousel.tick(ms(now)) {
                last = Some(event);
            }
            assert!(carousel.progress() >= 0.0 && carousel.progress() <= 1.0);
        }
        (now, last)
    }

    #[test]
    fn empty_cards_are_rejected() {
        let err = Carousel::<&str>::new(Vec::new(), CarouselConfig::default(), ms(0)).unwrap_err();
        assert!(matches!(err, CarouselError::InvalidConfiguration(_)));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let configs = [
            CarouselConfig {
                card_width: 0.0,
                ..CarouselConfig::default()
            },
            CarouselConfig {
                card_width: f64::NAN,
                ..CarouselConfig::default()
            },
            CarouselConfig {
                commit_fraction: 1.5,
                ..CarouselConfig::default()
            },
            CarouselConfig {
                flip_velocity: -1.0,
                ..CarouselConfig::default()
            },
            CarouselConfig {
                animation: Duration::ZERO,
                ..CarouselConfig::default()
            },
        ];
        for config in configs {
            assert!(Carousel::new(vec!["a"], config, ms(0)).is_err());
        }
    }

    #[test]
    fn drag_tracks_pointer_and_labels_direction() {
        let mut c = colors();
        c.gesture_start(100.0, ms(10), PointerSource::Primary);
        assert_eq!(c.status_label(), StatusLabel::Right);
        c.gesture_move(40.0);
        assert_eq!(c.offset(), -60.0);
        assert_eq!(c.status_label(), StatusLabel::Left);
        assert!(c.is_dragging());
        assert!(!c.is_animating());
        assert!((c.progress() - 60.0 / 280.0).abs() < 1e-12);
    }

    #[test]
    fn short_slow_drag_snaps_back() {
        let mut c = colors();
        c.gesture_start(100.0, ms(0), PointerSource::Primary);
        c.gesture_move(160.0);
        assert_eq!(c.gesture_end(160.0, ms(1000)), None);
        assert_eq!(c.mode(), Mode::Resolving);
        assert_eq!(c.status_label(), StatusLabel::Auto);

        let (_, last) = settle(&mut c, 1000);
        assert_eq!(last, Some(CarouselEvent::Returned));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn long_drag_advances() {
        let mut c = colors();
        c.gesture_start(0.0, ms(0), PointerSource::Touch);
        c.gesture_move(200.0);
        c.gesture_end(200.0, ms(1000));
        let (_, last) = settle(&mut c, 1000);
        assert_eq!(last, Some(CarouselEvent::Advanced { index: 1, auto: false }));
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn backward_flick_still_moves_to_next_card() {
        let mut c = colors();
        c.gesture_start(100.0, ms(0), PointerSource::Primary);
        c.gesture_move(50.0);
        c.gesture_end(50.0, ms(100));
        let run_target = c.driver.active().map(|run| run.to_offset());
        assert_eq!(run_target, Some(-280.0));
        settle(&mut c, 100);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn tap_emits_click_without_moving() {
        let mut c = colors();
        c.gesture_start(70.0, ms(0), PointerSource::Primary);
        assert_eq!(
            c.gesture_end(70.0, ms(80)),
            Some(CarouselEvent::Click { card: "red" })
        );
        assert_eq!(c.mode(), Mode::Idle);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.offset(), 0.0);
        assert_eq!(c.auto_advance_deadline(), Some(ms(3080)));
    }

    #[test]
    fn auto_advance_fires_after_inactivity_and_rearms() {
        let mut c = colors();
        assert_eq!(c.tick(ms(2999)), None);
        assert_eq!(c.tick(ms(3000)), None);
        assert_eq!(c.mode(), Mode::Resolving);
        assert!(!c.timer.is_armed());

        c.tick(ms(3250));
        assert!(c.offset() > 0.0 && c.offset() < 280.0);
        let (end, last) = settle(&mut c, 3250);
        assert_eq!(last, Some(CarouselEvent::Advanced { index: 1, auto: true }));
        assert_eq!(c.offset(), 0.0);
        assert_eq!(c.auto_advance_deadline(), Some(ms(end + 3000)));
    }

    #[test]
    fn press_cancels_auto_advance() {
        let mut c = colors();
        c.gesture_start(0.0, ms(2000), PointerSource::Primary);
        assert_eq!(c.tick(ms(10_000)), None);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.auto_advance_deadline(), None);
    }

    #[test]
    fn press_during_settle_catches_the_card() {
        let mut c = colors();
        c.gesture_start(0.0, ms(0), PointerSource::Primary);
        c.gesture_move(200.0);
        c.gesture_end(200.0, ms(1000));
        c.tick(ms(1100));
        let caught = c.offset();
        assert!(caught > 200.0 && caught < 280.0);

        c.gesture_start(10.0, ms(1120), PointerSource::Primary);
        assert!(!c.is_animating());
        assert_eq!(c.offset(), caught);
        c.gesture_move(5.0);
        assert_eq!(c.offset(), caught - 5.0);

        // The pre-empted commit never lands.
        assert_eq!(c.tick(ms(5000)), None);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn tap_on_moving_card_resolves_instead_of_clicking() {
        let mut c = colors();
        c.gesture_start(0.0, ms(0), PointerSource::Primary);
        c.gesture_move(200.0);
        c.gesture_end(200.0, ms(1000));
        c.tick(ms(1100));

        c.gesture_start(10.0, ms(1120), PointerSource::Primary);
        assert_eq!(c.gesture_end(10.0, ms(1200)), None);
        assert_eq!(c.mode(), Mode::Resolving);
        let (_, last) = settle(&mut c, 1200);
        assert_eq!(last, Some(CarouselEvent::Advanced { index: 1, auto: false }));
    }

    #[test]
    fn stray_events_are_ignored() {
        let mut c = colors();
        c.gesture_move(50.0);
        assert_eq!(c.gesture_end(50.0, ms(10)), None);
        assert_eq!(c.offset(), 0.0);

        c.gesture_start(0.0, ms(20), PointerSource::Secondary);
        assert_eq!(c.mode(), Mode::Idle);
        assert!(c.auto_advance_deadline().is_some());
    }

    #[test]
    fn index_wraps_around() {
        let mut c = Carousel::new(vec!["indigo", "purple"], CarouselConfig::default(), ms(0))
            .expect("valid carousel");
        let mut now = 0;
        for expected in [1, 0, 1] {
            c.gesture_start(0.0, ms(now), PointerSource::Primary);
            c.gesture_end(300.0, ms(now + 100));
            now = settle(&mut c, now + 100).0;
            assert_eq!(c.current_index(), expected);
        }
    }

    #[test]
    fn dispose_stops_everything() {
        let mut c = colors();
        c.gesture_start(0.0, ms(0), PointerSource::Primary);
        c.gesture_end(250.0, ms(100));
        assert!(c.is_animating());
        c.dispose();
        assert!(!c.is_animating());
        assert_eq!(c.auto_advance_deadline(), None);
        assert_eq!(c.tick(ms(10_000)), None);
        c.gesture_start(0.0, ms(10_001), PointerSource::Primary);
        assert!(!c.is_dragging());
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn view_exposes_next_card() {
        let c = colors();
        let view = c.view();
        assert_eq!(*view.current_card(), "red");
        assert_eq!(*view.next_card(), "orange");
        assert_eq!(view.status, StatusLabel::Auto);
        assert_eq!(view.progress, 0.0);
    }
}
