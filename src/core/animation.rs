//! Time-based offset animation with cubic ease-out.
//!
//! An [`AnimationRun`] captures its own `from`/`to` and start timestamp when
//! it is created, so nothing outside the run is read while it plays.  The
//! [`AnimationDriver`] holds at most one run; starting a new one drops the
//! old run (and with it the old completion payload) before the new run
//! produces its first frame.

use std::time::Duration;

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// A single animation from one offset to another.
///
/// `C` is the completion payload handed back exactly once, when the run
/// reaches its target.
#[derive(Debug, Clone)]
pub struct AnimationRun<C> {
    from: f64,
    to: f64,
    started_at: Duration,
    duration: Duration,
    on_complete: C,
}

impl<C> AnimationRun<C> {
    pub fn from_offset(&self) -> f64 {
        self.from
    }

    pub fn to_offset(&self) -> f64 {
        self.to
    }

    /// Normalised progress in `[0, 1]` at time `now`.
    fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).min(1.0)
    }

    /// Eased value at time `now`.
    fn sample(&self, now: Duration) -> (f64, f64) {
        let progress = self.progress(now);
        let eased = ease_out_cubic(progress);
        (self.from + (self.to - self.from) * eased, progress)
    }
}

/// What a single animation frame produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame<C> {
    /// Still moving; write `value` to the offset.
    Running { value: f64 },
    /// Reached the target.  `value` is exactly the run's `to`.
    Finished { value: f64, on_complete: C },
}

/// Owns the (at most one) active animation run.
#[derive(Debug, Clone)]
pub struct AnimationDriver<C> {
    run: Option<AnimationRun<C>>,
    duration: Duration,
}

impl<C> AnimationDriver<C> {
    pub fn new(duration: Duration) -> Self {
        Self {
            run: None,
            duration,
        }
    }

    /// Start animating `from → to`, superseding any run in flight.
    ///
    /// When `from == to` there is nothing to animate: no frame is scheduled
    /// and the completion payload is returned straight away.
    pub fn run(&mut self, from: f64, to: f64, now: Duration, on_complete: C) -> Option<C> {
        if self.cancel().is_some() {
            tracing::debug!("animation superseded by a new run to {to}");
        }
        if from == to {
            return Some(on_complete);
        }
        self.run = Some(AnimationRun {
            from,
            to,
            started_at: now,
            duration: self.duration,
            on_complete,
        });
        None
    }

    /// Drop the pending run, returning it so the caller can inspect where it
    /// was headed.  Its completion payload is never delivered.
    pub fn cancel(&mut self) -> Option<AnimationRun<C>> {
        self.run.take()
    }

    /// Advance one frame.  Returns `None` when nothing is animating.
    pub fn frame(&mut self, now: Duration) -> Option<Frame<C>> {
        let (value, progress) = self.run.as_ref()?.sample(now);
        if progress < 1.0 {
            return Some(Frame::Running { value });
        }
        let run = self.run.take()?;
        Some(Frame::Finished {
            value: run.to,
            on_complete: run.on_complete,
        })
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn active(&self) -> Option<&AnimationRun<C>> {
        self.run.as_ref()
    }
}
