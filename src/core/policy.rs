//! Release decision: advance or snap back.

/// Direction the card leaves in.  Only affects the animation target; the
/// index always moves to the next card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Positive offset, card slides right.
    Forward,
    /// Negative offset, card slides left.
    Backward,
}

impl Direction {
    fn of(distance: f64) -> Option<Self> {
        if distance > 0.0 {
            Some(Direction::Forward)
        } else if distance < 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }

    /// `+1.0` or `-1.0`.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDecision {
    Advance(Direction),
    Cancel,
}

/// Thresholds for [`TransitionPolicy::decide`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPolicy {
    /// Release speed (units/ms) above which any drag commits.
    pub flip_velocity: f64,
    /// Fraction of the card width a slow drag must cover to commit.
    pub commit_fraction: f64,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self {
            flip_velocity: 0.45,
            commit_fraction: 0.5,
        }
    }
}

impl TransitionPolicy {
    /// Velocity is checked first so a short fast flick wins over the
    /// distance rule.  Direction always follows the sign of the distance.
    pub fn decide(&self, distance: f64, velocity: f64, card_width: f64) -> TransitionDecision {
        let Some(direction) = Direction::of(distance) else {
            return TransitionDecision::Cancel;
        };
        let flipped = velocity != 0.0 && velocity.abs() > self.flip_velocity;
        let dragged_far = distance.abs() > card_width * self.commit_fraction;
        if flipped || dragged_far {
            TransitionDecision::Advance(direction)
        } else {
            TransitionDecision::Cancel
        }
    }
}
