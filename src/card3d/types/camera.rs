//! Camera-related types and components
//!
//! This module contains the main camera marker component.

use bevy::prelude::*;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;
