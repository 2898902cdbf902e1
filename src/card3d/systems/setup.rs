//! Scene setup systems
//!
//! Spawns the camera and the fixed lights described by [`SceneConfig`], and
//! keeps the window's pixel ratio inside the configured range.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::card3d::types::*;

/// Startup system: camera, ambient and directional lights, clear colour.
pub fn setup_scene(mut commands: Commands, settings: Res<ViewerSettings>) {
    let scene = &settings.scene;

    let [r, g, b] = scene.background;
    commands.insert_resource(ClearColor(Color::srgb(r, g, b)));

    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: scene.fov_degrees.to_radians(),
            near: scene.near,
            ..default()
        }),
        Transform::from_translation(Vec3::from_array(scene.camera_position))
            .looking_at(Vec3::ZERO, Vec3::Y),
        AmbientLight {
            color: Color::WHITE,
            brightness: scene.ambient_intensity * AMBIENT_BRIGHTNESS_PER_INTENSITY,
            ..default()
        },
        MainCamera,
    ));

    for light in &scene.directional_lights {
        commands.spawn((
            DirectionalLight {
                illuminance: light.intensity * LUX_PER_INTENSITY,
                ..default()
            },
            Transform::from_translation(Vec3::from_array(light.position))
                .looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }

    info!(
        "Scene ready: fov {}°, {} directional lights",
        scene.fov_degrees,
        scene.directional_lights.len()
    );
}

/// Keep the primary window's device pixel ratio within `dpr_range`.
pub fn clamp_device_pixel_ratio(
    settings: Res<ViewerSettings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    let native = window.resolution.base_scale_factor();
    let clamped = settings.scene.clamp_dpr(native);
    let wanted = if (clamped - native).abs() < f32::EPSILON {
        None
    } else {
        Some(clamped)
    };

    if window.resolution.scale_factor_override() != wanted {
        window.resolution.set_scale_factor_override(wanted);
    }
}
