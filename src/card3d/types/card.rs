//! Card-related types and components
//!
//! This module contains the physical card dimensions and the marker
//! components attached to the spawned card entities.

use bevy::prelude::*;

use super::error::CardError;

/// Physical proportions of a trading card, in metres.
///
/// The defaults are a standard 63 x 88 mm card with a thin paper body.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CardSpec {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub corner_radius: f32,
    /// How much smaller the printed faces are than the body, per axis.
    pub face_inset: f32,
    /// Distance of the front face beyond the body's front surface.
    pub front_offset: f32,
    /// Distance of the back face beyond the body's back surface.
    pub back_offset: f32,
}

/// 63:88
pub const CARD_ASPECT_RATIO: f32 = 63.0 / 88.0;

impl Default for CardSpec {
    fn default() -> Self {
        Self {
            width: 0.063,
            height: 0.088,
            depth: 0.0005,
            corner_radius: 0.002,
            face_inset: 0.0005,
            front_offset: 0.00027,
            back_offset: 0.00005,
        }
    }
}

impl CardSpec {
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    pub fn face_size(&self) -> Vec2 {
        Vec2::new(self.width - self.face_inset, self.height - self.face_inset)
    }

    /// Z position of the front face plane.
    pub fn front_face_z(&self) -> f32 {
        self.depth / 2.0 + self.front_offset
    }

    /// Z position of the back face plane.
    pub fn back_face_z(&self) -> f32 {
        -self.depth / 2.0 - self.back_offset
    }

    /// Half extents of the box enclosing body and both faces.
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(
            self.width / 2.0,
            self.height / 2.0,
            self.front_face_z().max(-self.back_face_z()),
        )
    }

    pub fn validate(&self) -> Result<(), CardError> {
        let dims = [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(CardError::InvalidCard(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let max_radius = self.width.min(self.height) / 2.0;
        if !(0.0..=max_radius).contains(&self.corner_radius) {
            return Err(CardError::InvalidCard(format!(
                "corner radius {} must be within 0..={}",
                self.corner_radius, max_radius
            )));
        }

        if self.face_inset < 0.0 || self.face_inset >= self.width.min(self.height) {
            return Err(CardError::InvalidCard(format!(
                "face inset {} leaves no printable face",
                self.face_inset
            )));
        }

        Ok(())
    }
}

/// Root of the spawned card; carries the interaction state and the transform
/// that rotation and scale are applied to.
#[derive(Component)]
pub struct CardRoot;

/// Which printed side a face mesh shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Front,
    Back,
}

#[derive(Component)]
pub struct CardFace {
    pub side: CardSide,
}

/// Marker for the paper body between the faces.
#[derive(Component)]
pub struct CardBody;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_card_keeps_trading_card_ratio() {
        let spec = CardSpec::default();
        assert!((spec.aspect_ratio() - CARD_ASPECT_RATIO).abs() < 1e-3);
        assert!((spec.aspect_ratio() - 0.716).abs() < 1e-3);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_faces_sit_outside_the_body() {
        let spec = CardSpec::default();
        assert!(spec.front_face_z() > spec.depth / 2.0);
        assert!(spec.back_face_z() < -spec.depth / 2.0);
        assert_eq!(spec.half_extents().z, spec.front_face_z());
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        let spec = CardSpec {
            width: 0.0,
            ..CardSpec::default()
        };
        assert!(spec.validate().is_err());

        let spec = CardSpec {
            corner_radius: 1.0,
            ..CardSpec::default()
        };
        assert!(spec.validate().is_err());
    }
}
