//! Flip detection
//!
//! Two policies decide when the card counts as flipped:
//! - `Threshold`: the flag follows the Y rotation. Crossing into the
//!   back-facing half toggles it, then a cool-down blocks further toggles so
//!   jitter on the boundary cannot make it oscillate.
//! - `DoubleClick`: an explicit gesture plays a half-turn; the flag toggles
//!   once the animation reaches π.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::card3d::types::{FlipPolicy, InteractionConfig};

/// Normalise an angle into [0, 2π).
///
/// 0 and 2π both land on 0 (the front), including values that round up to
/// 2π after the remainder.
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU || wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Whether a normalised Y rotation shows the back of the card.
pub fn is_back_facing(normalized: f32) -> bool {
    normalized > FRAC_PI_2 && normalized < 3.0 * FRAC_PI_2
}

/// Reported when the flip flag changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipChange {
    pub facing_back: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlipState {
    policy: FlipPolicy,
    facing_back: bool,
    animating: bool,
    /// Animation progress in [0, π]
    progress: f32,
    cooldown: f32,
}

impl FlipState {
    pub fn new(policy: FlipPolicy) -> Self {
        Self {
            policy,
            facing_back: false,
            animating: false,
            progress: 0.0,
            cooldown: 0.0,
        }
    }

    pub fn policy(&self) -> FlipPolicy {
        self.policy
    }

    pub fn facing_back(&self) -> bool {
        self.facing_back
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn cooling_down(&self) -> bool {
        self.cooldown > 0.0
    }

    /// Start the half-turn animation. Ignored while one is running or when
    /// flips follow the rotation instead.
    pub fn request_flip(&mut self) -> bool {
        if self.policy != FlipPolicy::DoubleClick || self.animating {
            return false;
        }
        self.animating = true;
        self.progress = 0.0;
        true
    }

    /// Advance one frame. `rotation_y` is the card's raw Y rotation.
    pub fn step(&mut self, rotation_y: f32, dt: f32, config: &InteractionConfig) -> Option<FlipChange> {
        match self.policy {
            FlipPolicy::Threshold => self.step_threshold(rotation_y, dt, config),
            FlipPolicy::DoubleClick => self.step_animation(config),
        }
    }

    fn step_threshold(&mut self, rotation_y: f32, dt: f32, config: &InteractionConfig) -> Option<FlipChange> {
        self.cooldown = (self.cooldown - dt.max(0.0)).max(0.0);
        let back = is_back_facing(normalize_angle(rotation_y));
        if back == self.facing_back || self.cooling_down() {
            return None;
        }
        self.facing_back = back;
        self.cooldown = config.flip_cooldown_secs;
        Some(FlipChange { facing_back: back })
    }

    fn step_animation(&mut self, config: &InteractionConfig) -> Option<FlipChange> {
        if !self.animating {
            return None;
        }
        self.progress = (self.progress + config.flip_step).min(PI);
        if self.progress < PI {
            return None;
        }
        self.animating = false;
        self.progress = 0.0;
        self.facing_back = !self.facing_back;
        Some(FlipChange {
            facing_back: self.facing_back,
        })
    }

    /// Extra Y rotation contributed by the flip itself.
    pub fn y_offset(&self) -> f32 {
        match self.policy {
            FlipPolicy::Threshold => 0.0,
            FlipPolicy::DoubleClick => {
                let base = if self.facing_back { PI } else { 0.0 };
                base + self.progress
            }
        }
    }

    /// Whether the front face should be drawn. Faces are back to back, so
    /// outside a flip animation culling alone decides what is seen.
    pub fn front_visible(&self) -> bool {
        if !self.animating {
            return true;
        }
        let past_half = self.progress > FRAC_PI_2;
        self.facing_back == past_half
    }

    pub fn back_visible(&self) -> bool {
        if !self.animating {
            return true;
        }
        !self.front_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_wrap_boundary() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(-0.0), 0.0);
        assert_eq!(normalize_angle(TAU), 0.0);
        assert_eq!(normalize_angle(-TAU), 0.0);
        assert!((normalize_angle(-0.001) - normalize_angle(TAU - 0.001)).abs() < 1e-5);
        assert!((normalize_angle(3.0 * TAU + 1.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_tiny_negative_stays_in_range() {
        let n = normalize_angle(-1e-9);
        assert!((0.0..TAU).contains(&n));
        assert!(!is_back_facing(n));
    }

    #[test]
    fn test_back_facing_half_range() {
        assert!(!is_back_facing(0.0));
        assert!(!is_back_facing(FRAC_PI_2));
        assert!(is_back_facing(FRAC_PI_2 + 0.01));
        assert!(is_back_facing(PI));
        assert!(!is_back_facing(3.0 * FRAC_PI_2));
        assert!(!is_back_facing(TAU - 0.01));
    }

    #[test]
    fn test_threshold_ignores_gestures() {
        let mut flip = FlipState::new(FlipPolicy::Threshold);
        assert!(!flip.request_flip());
        assert!(!flip.is_animating());
    }

    #[test]
    fn test_animation_hides_front_after_half_turn() {
        let config = InteractionConfig::default();
        let mut flip = FlipState::new(FlipPolicy::DoubleClick);
        assert!(flip.request_flip());
        assert!(flip.front_visible());

        while flip.progress() <= FRAC_PI_2 {
            assert!(flip.step(0.0, 1.0 / 60.0, &config).is_none());
        }
        assert!(!flip.front_visible());
        assert!(flip.back_visible());
    }
}
