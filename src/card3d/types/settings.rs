//! Viewer settings types and persistence
//!
//! Every tunable of the viewer lives here: interaction feel, the scene
//! description handed to the renderer, and which card body is built.
//! Settings are read from an optional JSON file; missing fields fall back
//! to the defaults below.

use bevy::log::info;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fs;
use std::path::Path;

use super::error::CardError;

// ============================================================================
// Interaction
// ============================================================================

/// How a flip of the card is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FlipPolicy {
    /// The flag follows the Y rotation crossing into the back-facing half.
    #[default]
    #[serde(rename = "threshold")]
    Threshold,
    /// A double click plays a half-turn animation.
    #[serde(rename = "double-click")]
    DoubleClick,
}

impl FlipPolicy {
    pub fn parse(s: &str) -> Option<FlipPolicy> {
        match s.to_lowercase().as_str() {
            "threshold" => Some(FlipPolicy::Threshold),
            "double-click" | "doubleclick" | "double_click" => Some(FlipPolicy::DoubleClick),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Radians of rotation per pixel of pointer movement
    pub sensitivity: f32,
    /// Momentum multiplier applied every idle frame
    pub momentum_decay: f32,
    /// Momentum below this length snaps to zero
    pub momentum_epsilon: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Zoom change per wheel line
    pub zoom_per_line: f32,
    /// Zoom change per wheel pixel (touchpads)
    pub zoom_per_pixel: f32,
    pub breathing_amplitude: f32,
    pub breathing_speed: f32,
    /// Limit on the X (tilt) rotation in either direction
    pub polar_limit: f32,
    pub flip_policy: FlipPolicy,
    pub flip_cooldown_secs: f32,
    /// Radians the flip animation advances per frame
    pub flip_step: f32,
    pub double_click_secs: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.01,
            momentum_decay: 0.95,
            momentum_epsilon: 1e-4,
            zoom_min: 0.7,
            zoom_max: 1.5,
            zoom_per_line: 0.1,
            zoom_per_pixel: 0.001,
            breathing_amplitude: 0.012,
            breathing_speed: 1.2,
            polar_limit: PI / 3.0,
            flip_policy: FlipPolicy::Threshold,
            flip_cooldown_secs: 0.5,
            flip_step: 0.12,
            double_click_secs: 0.3,
        }
    }
}

impl InteractionConfig {
    pub fn validate(&self) -> Result<(), CardError> {
        if !(self.zoom_min > 0.0 && self.zoom_min <= self.zoom_max) {
            return Err(CardError::InvalidConfig(format!(
                "zoom range {}..{} is empty",
                self.zoom_min, self.zoom_max
            )));
        }
        if !(0.0..1.0).contains(&self.momentum_decay) {
            return Err(CardError::InvalidConfig(format!(
                "momentum decay {} must be in 0..1",
                self.momentum_decay
            )));
        }
        if !(self.sensitivity > 0.0) {
            return Err(CardError::InvalidConfig(format!(
                "sensitivity {} must be positive",
                self.sensitivity
            )));
        }
        if !(self.momentum_epsilon > 0.0) {
            return Err(CardError::InvalidConfig(format!(
                "momentum epsilon {} must be positive",
                self.momentum_epsilon
            )));
        }
        if !(self.flip_cooldown_secs >= 0.0) {
            return Err(CardError::InvalidConfig(format!(
                "flip cool-down {} must not be negative",
                self.flip_cooldown_secs
            )));
        }
        if self.flip_step <= 0.0 {
            return Err(CardError::InvalidConfig(
                "flip step must be positive".to_string(),
            ));
        }
        if self.polar_limit < 0.0 {
            return Err(CardError::InvalidConfig(
                "polar limit must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Scene
// ============================================================================

/// Directional light, three.js style: shines from `position` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLightSetting {
    pub position: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera_position: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    /// Allowed device pixel ratio, [min, max]
    pub dpr_range: [f32; 2],
    pub ambient_intensity: f32,
    pub directional_lights: Vec<DirectionalLightSetting>,
    pub background: [f32; 3],
}

/// Lux per unit of three.js light intensity
pub const LUX_PER_INTENSITY: f32 = 4000.0;
/// Ambient brightness per unit of three.js ambient intensity
pub const AMBIENT_BRIGHTNESS_PER_INTENSITY: f32 = 500.0;

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_position: [0.0, 0.0, 0.3],
            fov_degrees: 32.0,
            near: 0.01,
            dpr_range: [1.0, 2.0],
            ambient_intensity: 0.7,
            directional_lights: vec![
                DirectionalLightSetting {
                    position: [0.2, 0.6, 1.0],
                    intensity: 1.5,
                },
                DirectionalLightSetting {
                    position: [-0.7, -0.3, 0.7],
                    intensity: 0.9,
                },
                DirectionalLightSetting {
                    position: [0.0, 0.7, -1.0],
                    intensity: 0.8,
                },
            ],
            background: [0.09, 0.06, 0.08],
        }
    }
}

impl SceneConfig {
    /// Clamp a window's device pixel ratio into the configured range.
    pub fn clamp_dpr(&self, dpr: f32) -> f32 {
        let [min, max] = self.dpr_range;
        dpr.clamp(min, max)
    }
}

// ============================================================================
// Card body
// ============================================================================

/// Which body mesh is built for the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CardBodyStyle {
    #[default]
    #[serde(rename = "rounded")]
    RoundedExtrusion,
    #[serde(rename = "box")]
    Box,
}

// ============================================================================
// Viewer settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct ViewerSettings {
    pub interaction: InteractionConfig,
    pub scene: SceneConfig,
    pub body_style: CardBodyStyle,
    /// Segments per rounded corner
    pub corner_segments: u32,
}

pub const DEFAULT_CORNER_SEGMENTS: u32 = 8;

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            interaction: InteractionConfig::default(),
            scene: SceneConfig::default(),
            body_style: CardBodyStyle::default(),
            corner_segments: DEFAULT_CORNER_SEGMENTS,
        }
    }
}

impl ViewerSettings {
    pub fn from_json(text: &str) -> Result<Self, CardError> {
        let settings: ViewerSettings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CardError> {
        if self.corner_segments == 0 {
            return Err(CardError::InvalidConfig(
                "corner_segments must be at least 1".to_string(),
            ));
        }
        let [dpr_min, dpr_max] = self.scene.dpr_range;
        if !(dpr_min > 0.0 && dpr_min <= dpr_max) {
            return Err(CardError::InvalidConfig(format!(
                "device pixel ratio range {}..{} is empty",
                dpr_min, dpr_max
            )));
        }
        self.interaction.validate()
    }

    /// Load settings from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, CardError> {
        let text = fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        info!("Loaded viewer settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings = ViewerSettings::from_json("{}").expect("empty object parses");
        assert_eq!(settings.interaction, InteractionConfig::default());
        assert_eq!(settings.scene, SceneConfig::default());
        assert_eq!(settings.corner_segments, DEFAULT_CORNER_SEGMENTS);
    }

    #[test]
    fn test_zero_corner_segments_is_rejected() {
        let result = ViewerSettings::from_json(r#"{ "corner_segments": 0 }"#);
        assert!(matches!(result, Err(CardError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_interaction_section() {
        let settings = ViewerSettings::from_json(
            r#"{ "interaction": { "flip_policy": "double-click", "sensitivity": 0.02 } }"#,
        )
        .expect("partial settings parse");
        assert_eq!(settings.interaction.flip_policy, FlipPolicy::DoubleClick);
        assert_eq!(settings.interaction.sensitivity, 0.02);
        assert_eq!(settings.interaction.zoom_max, 1.5);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = ViewerSettings::default();
        settings.body_style = CardBodyStyle::Box;
        let text = settings.to_json().expect("serializes");
        let parsed = ViewerSettings::from_json(&text).expect("parses back");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_inverted_zoom_range_is_rejected() {
        let result =
            ViewerSettings::from_json(r#"{ "interaction": { "zoom_min": 2.0, "zoom_max": 1.0 } }"#);
        assert!(matches!(result, Err(CardError::InvalidConfig(_))));
    }

    #[test]
    fn test_momentum_and_cooldown_bounds_are_enforced() {
        for json in [
            r#"{ "interaction": { "momentum_epsilon": 0.0 } }"#,
            r#"{ "interaction": { "momentum_epsilon": -1e-4 } }"#,
            r#"{ "interaction": { "sensitivity": 0.0 } }"#,
            r#"{ "interaction": { "sensitivity": -0.01 } }"#,
            r#"{ "interaction": { "flip_cooldown_secs": -0.5 } }"#,
        ] {
            assert!(
                matches!(ViewerSettings::from_json(json), Err(CardError::InvalidConfig(_))),
                "accepted {}",
                json
            );
        }
        assert!(ViewerSettings::from_json(r#"{ "interaction": { "flip_cooldown_secs": 0.0 } }"#).is_ok());
    }

    #[test]
    fn test_flip_policy_parse() {
        assert_eq!(FlipPolicy::parse("Threshold"), Some(FlipPolicy::Threshold));
        assert_eq!(FlipPolicy::parse("double-click"), Some(FlipPolicy::DoubleClick));
        assert_eq!(FlipPolicy::parse("spin"), None);
    }

    #[test]
    fn test_dpr_clamp() {
        let scene = SceneConfig::default();
        assert_eq!(scene.clamp_dpr(0.5), 1.0);
        assert_eq!(scene.clamp_dpr(1.5), 1.5);
        assert_eq!(scene.clamp_dpr(3.0), 2.0);
    }
}
