//! Card Interaction State
//!
//! Contains the per-card state machine driven by pointer input and the
//! per-frame update: drag rotation, momentum decay, zoom, breathing scale and
//! flip detection. Nothing here touches the ECS apart from deriving
//! `Component`, so the whole machine can be exercised frame by frame in tests.

use bevy::prelude::*;

use super::flip::{normalize_angle, FlipChange, FlipState};
use crate::card3d::types::{FlipPolicy, InteractionConfig};

/// Pointer phase of the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerPhase {
    Idle,
    Dragging { last: Vec2 },
}

/// Continuous orientation of the card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Euler angles (x, y, z), radians
    pub rotation: Vec3,
    /// Breathing scale times zoom, as last computed by `update`
    pub scale: f32,
    pub zoom: f32,
    /// Residual angular velocity (x, y), radians per frame
    pub momentum: Vec2,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            scale: 1.0,
            zoom: 1.0,
            momentum: Vec2::ZERO,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct CardInteraction {
    config: InteractionConfig,
    phase: PointerPhase,
    orientation: Orientation,
    flip: FlipState,
    elapsed: f32,
    last_press: Option<f32>,
}

impl CardInteraction {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            flip: FlipState::new(config.flip_policy),
            config,
            phase: PointerPhase::Idle,
            orientation: Orientation::default(),
            elapsed: 0.0,
            last_press: None,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, PointerPhase::Dragging { .. })
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn rotation(&self) -> Vec3 {
        self.orientation.rotation
    }

    pub fn momentum(&self) -> Vec2 {
        self.orientation.momentum
    }

    pub fn zoom(&self) -> f32 {
        self.orientation.zoom
    }

    pub fn scale(&self) -> f32 {
        self.orientation.scale
    }

    pub fn flip(&self) -> &FlipState {
        &self.flip
    }

    pub fn facing_back(&self) -> bool {
        self.flip.facing_back()
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    /// Pointer pressed on the card. Grabbing stops any residual spin.
    pub fn pointer_down(&mut self, position: Vec2) {
        self.phase = PointerPhase::Dragging { last: position };
        self.orientation.momentum = Vec2::ZERO;

        let now = self.elapsed;
        let is_double = self
            .last_press
            .is_some_and(|previous| now - previous <= self.config.double_click_secs);
        if is_double && self.config.flip_policy == FlipPolicy::DoubleClick {
            self.flip.request_flip();
            self.last_press = None;
        } else {
            self.last_press = Some(now);
        }
    }

    /// Pointer moved. Ignored unless a drag is in progress.
    pub fn pointer_move(&mut self, position: Vec2) -> bool {
        let PointerPhase::Dragging { last } = self.phase else {
            return false;
        };
        if !position.is_finite() {
            return false;
        }

        let delta = (position - last) * self.config.sensitivity;
        // Vertical movement tilts around X, horizontal movement spins around Y.
        let step = Vec2::new(delta.y, delta.x);
        self.orientation.rotation.x += step.x;
        self.orientation.rotation.y += step.y;
        self.orientation.momentum = step;
        self.clamp_tilt();
        self.phase = PointerPhase::Dragging { last: position };
        true
    }

    /// Route one frame of mouse input to the card and report what it
    /// consumed. A press grabs the card only over the card and away from UI
    /// buttons; the wheel zooms only while hovering. A cursor that has not
    /// moved since the last sample is not a move.
    pub fn route_pointer(&mut self, frame: &PointerFrame) -> CardPointerCapture {
        let hovering = frame.over_card && !frame.over_ui;
        let mut captured = false;

        if let Some(position) = frame.cursor {
            if frame.pressed && hovering {
                self.pointer_down(position);
                captured = true;
            }
        }

        if let PointerPhase::Dragging { last } = self.phase {
            match frame.cursor {
                Some(position) if position != last => {
                    self.pointer_move(position);
                }
                Some(_) => {}
                // Cursor left the window
                None => self.pointer_leave(),
            }
            if frame.released {
                self.pointer_up();
            }
            captured = true;
        }

        if hovering {
            for &delta in &frame.wheel {
                self.wheel(delta);
                captured = true;
            }
        }

        CardPointerCapture {
            captured,
            hovering,
        }
    }

    /// Pointer released. A release without a press is a no-op.
    pub fn pointer_up(&mut self) {
        self.phase = PointerPhase::Idle;
    }

    /// Pointer left the surface; ends the drag like a release.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Explicit flip gesture (double click / double tap).
    pub fn request_flip(&mut self) -> bool {
        self.flip.request_flip()
    }

    /// Wheel input already converted to zoom units.
    pub fn wheel(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.orientation.zoom =
            (self.orientation.zoom + delta).clamp(self.config.zoom_min, self.config.zoom_max);
    }

    // ------------------------------------------------------------------
    // Frame update
    // ------------------------------------------------------------------

    /// Advance one rendered frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Option<FlipChange> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;

        if self.phase == PointerPhase::Idle {
            self.decay_momentum();
        }

        self.orientation.scale = self.breathing_scale() * self.orientation.zoom;
        self.flip.step(self.orientation.rotation.y, dt, &self.config)
    }

    fn decay_momentum(&mut self) {
        let momentum = &mut self.orientation.momentum;
        if *momentum == Vec2::ZERO {
            return;
        }
        *momentum *= self.config.momentum_decay;
        if momentum.length() < self.config.momentum_epsilon {
            *momentum = Vec2::ZERO;
            return;
        }
        let step = *momentum;
        self.orientation.rotation.x += step.x;
        self.orientation.rotation.y += step.y;
        self.clamp_tilt();
    }

    fn clamp_tilt(&mut self) {
        let limit = self.config.polar_limit;
        self.orientation.rotation.x = self.orientation.rotation.x.clamp(-limit, limit);
    }

    /// Idle "pulse", independent of interaction.
    pub fn breathing_scale(&self) -> f32 {
        1.0 + self.config.breathing_amplitude * (self.elapsed * self.config.breathing_speed).sin()
    }

    // ------------------------------------------------------------------
    // Render output
    // ------------------------------------------------------------------

    /// Rotation handed to the renderer: tilt clamped, spin normalised.
    pub fn render_rotation(&self) -> Vec3 {
        let rotation = self.orientation.rotation;
        let limit = self.config.polar_limit;
        Vec3::new(
            rotation.x.clamp(-limit, limit),
            normalize_angle(rotation.y + self.flip.y_offset()),
            0.0,
        )
    }

    pub fn render_quat(&self) -> Quat {
        let rotation = self.render_rotation();
        Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
    }

    pub fn render_scale(&self) -> f32 {
        let scale = self.orientation.scale;
        let min = (1.0 - self.config.breathing_amplitude.abs()) * self.config.zoom_min;
        let max = (1.0 + self.config.breathing_amplitude.abs()) * self.config.zoom_max;
        if scale.is_finite() {
            scale.clamp(min, max)
        } else {
            1.0
        }
    }

    pub fn front_visible(&self) -> bool {
        self.flip.front_visible()
    }

    pub fn back_visible(&self) -> bool {
        self.flip.back_visible()
    }
}

impl Default for CardInteraction {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

/// Mouse input sampled for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerFrame {
    /// Cursor in window coordinates; `None` once it leaves the window
    pub cursor: Option<Vec2>,
    pub pressed: bool,
    pub released: bool,
    /// Cursor ray hits the card
    pub over_card: bool,
    /// A UI button is under the cursor
    pub over_ui: bool,
    /// Wheel deltas already converted to zoom units
    pub wheel: Vec<f32>,
}

/// Pointer input claimed by the card this frame. Other pointer consumers
/// skip input that the card has captured.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct CardPointerCapture {
    pub captured: bool,
    pub hovering: bool,
}

/// Distance along the ray to the first hit of an origin-centred box, in the
/// box's local space. Slab test; rays starting inside the box hit at 0.
pub fn ray_hits_box(origin: Vec3, direction: Vec3, half_extents: Vec3) -> Option<f32> {
    if !origin.is_finite() || !direction.is_finite() || direction == Vec3::ZERO {
        return None;
    }

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let h = half_extents[axis];
        if d.abs() < f32::EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let t0 = (-h - o) / d;
        let t1 = (h - o) / d;
        t_min = t_min.max(t0.min(t1));
        t_max = t_max.min(t0.max(t1));
    }

    if t_max < t_min.max(0.0) {
        None
    } else {
        Some(t_min.max(0.0))
    }
}
