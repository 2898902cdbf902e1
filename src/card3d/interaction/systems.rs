//! Card Interaction Systems
//!
//! Contains systems for routing mouse input to the card, advancing the
//! interaction state once per frame, and reporting flip changes.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::state::*;
use crate::card3d::types::*;

/// Route mouse buttons, cursor motion and the wheel to the card.
///
/// A press only grabs the card when the cursor ray hits the card's box and no
/// UI button is under the cursor. Consumed input is recorded in
/// [`CardPointerCapture`].
pub fn card_pointer_input(
    mouse: Res<ButtonInput<MouseButton>>,
    mut wheel: MessageReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    buttons: Query<&Interaction, With<Button>>,
    spec: Res<CardSpec>,
    mut capture: ResMut<CardPointerCapture>,
    mut cards: Query<(&GlobalTransform, &mut CardInteraction, &Visibility), With<CardRoot>>,
) {
    *capture = CardPointerCapture::default();

    let Ok((card_transform, mut card, visibility)) = cards.single_mut() else {
        wheel.clear();
        return;
    };
    if *visibility == Visibility::Hidden {
        wheel.clear();
        return;
    }

    let Ok(window) = windows.single() else {
        wheel.clear();
        return;
    };
    let cursor = window.cursor_position();
    let over_card = match (cursor, camera_query.single()) {
        (Some(cursor), Ok((camera, camera_transform))) => {
            cursor_hits_card(camera, camera_transform, card_transform, cursor, spec.half_extents())
        }
        _ => false,
    };

    let config = *card.config();
    let frame = PointerFrame {
        cursor,
        pressed: mouse.just_pressed(MouseButton::Left),
        released: mouse.just_released(MouseButton::Left),
        over_card,
        over_ui: buttons
            .iter()
            .any(|interaction| *interaction != Interaction::None),
        wheel: wheel
            .read()
            .map(|event| match event.unit {
                MouseScrollUnit::Line => event.y * config.zoom_per_line,
                MouseScrollUnit::Pixel => event.y * config.zoom_per_pixel,
            })
            .collect(),
    };
    *capture = card.route_pointer(&frame);
}

fn cursor_hits_card(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    card_transform: &GlobalTransform,
    cursor: Vec2,
    half_extents: Vec3,
) -> bool {
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return false;
    };

    // Into the card's local space, where its box is axis aligned.
    let to_local = card_transform.affine().inverse();
    let origin = to_local.transform_point3(ray.origin);
    let direction = to_local.transform_vector3(*ray.direction);
    ray_hits_box(origin, direction, half_extents).is_some()
}

/// Advance the card one frame and apply the result to its transform and
/// face visibility.
pub fn advance_card_interaction(
    time: Res<Time>,
    mut cards: Query<(&mut CardInteraction, &mut Transform, &Children), With<CardRoot>>,
    mut faces: Query<(&CardFace, &mut Visibility)>,
    mut flips: MessageWriter<CardFlipChanged>,
) {
    for (mut card, mut transform, children) in cards.iter_mut() {
        if let Some(change) = card.update(time.delta_secs()) {
            flips.write(CardFlipChanged {
                flipped: change.facing_back,
            });
        }

        transform.rotation = card.render_quat();
        transform.scale = Vec3::splat(card.render_scale());

        let mut card_faces = faces.iter_many_mut(children.iter());
        while let Some((face, mut visibility)) = card_faces.fetch_next() {
            let visible = match face.side {
                CardSide::Front => card.front_visible(),
                CardSide::Back => card.back_visible(),
            };
            let wanted = if visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
            if *visibility != wanted {
                *visibility = wanted;
            }
        }
    }
}

/// Apply flip changes to the session (`onFlipChanged`).
pub fn apply_flip_changes(
    mut flips: MessageReader<CardFlipChanged>,
    mut session: ResMut<CardSession>,
) {
    for change in flips.read() {
        info!(
            "Card flipped to its {}",
            if change.flipped { "back" } else { "front" }
        );
        *session = session.apply(SessionAction::SetFlipped(change.flipped));
    }
}
