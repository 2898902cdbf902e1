//! Tests for dragging, momentum, zoom and flipping the card

use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use cardview3d::card3d::interaction::{normalize_angle, CardInteraction};
use cardview3d::card3d::types::{CardSession, FlipPolicy, InteractionConfig, SessionAction};

const FRAME: f32 = 1.0 / 60.0;

fn double_click_card() -> CardInteraction {
    CardInteraction::new(InteractionConfig {
        flip_policy: FlipPolicy::DoubleClick,
        ..InteractionConfig::default()
    })
}

#[test]
fn test_drag_rotation_is_sum_of_scaled_deltas() {
    let mut card = CardInteraction::default();
    let path = [
        Vec2::new(100.0, 100.0),
        Vec2::new(112.0, 97.0),
        Vec2::new(130.0, 95.0),
        Vec2::new(125.0, 104.0),
        Vec2::new(160.0, 110.0),
        Vec2::new(90.0, 101.0),
    ];

    card.pointer_down(path[0]);
    let mut expected = Vec2::ZERO;
    for pair in path.windows(2) {
        let delta = (pair[1] - pair[0]) * 0.01;
        expected += Vec2::new(delta.y, delta.x);
        assert!(card.pointer_move(pair[1]));
        card.update(FRAME);
    }
    card.pointer_up();

    let rotation = card.rotation();
    assert!((rotation.x - expected.x).abs() < 1e-4, "x {} vs {}", rotation.x, expected.x);
    assert!((rotation.y - expected.y).abs() < 1e-4, "y {} vs {}", rotation.y, expected.y);
}

#[test]
fn test_momentum_decays_strictly_to_exact_zero() {
    let mut card = CardInteraction::default();
    card.pointer_down(Vec2::ZERO);
    card.pointer_move(Vec2::new(30.0, 0.0));
    card.pointer_up();

    let mut previous = card.momentum().length();
    let mut frames = 0;
    while card.momentum() != Vec2::ZERO {
        card.update(FRAME);
        let current = card.momentum().length();
        assert!(current < previous, "momentum grew at frame {}", frames);
        previous = current;
        frames += 1;
        assert!(frames <= 200, "momentum never settled");
    }

    let rotation = card.rotation();
    for _ in 0..60 {
        card.update(FRAME);
    }
    assert_eq!(card.momentum(), Vec2::ZERO);
    assert_eq!(card.rotation(), rotation);
}

#[test]
fn test_zoom_always_within_bounds() {
    let mut card = CardInteraction::default();
    let inputs = [5.0, 0.3, -0.1, -40.0, 0.05, 1e9, -1e9, 0.0, f32::INFINITY, 0.2];
    for delta in inputs {
        card.wheel(delta);
        assert!((0.7..=1.5).contains(&card.zoom()), "zoom {}", card.zoom());
        card.update(FRAME);
        assert!(card.render_scale().is_finite());
    }
}

#[test]
fn test_threshold_flip_ignores_jitter_during_cool_down() {
    let mut card = CardInteraction::default();
    card.pointer_down(Vec2::ZERO);

    let mut flips = 0;
    // 159px is just past a quarter turn, 156px just short of it.
    for frame in 0..24 {
        let x = if frame % 2 == 0 { 159.0 } else { 156.0 };
        card.pointer_move(Vec2::new(x, 0.0));
        if card.update(FRAME).is_some() {
            flips += 1;
        }
    }

    assert_eq!(flips, 1);
    assert!(card.facing_back());
}

#[test]
fn test_threshold_flip_once_per_crossing() {
    let mut card = CardInteraction::default();
    card.pointer_down(Vec2::ZERO);

    let mut changes = Vec::new();
    for px in 1..=300 {
        card.pointer_move(Vec2::new(px as f32, 0.0));
        if let Some(change) = card.update(FRAME) {
            changes.push(change.facing_back);
        }
    }

    assert_eq!(changes, vec![true]);
}

#[test]
fn test_double_click_flip_ignores_gestures_while_animating() {
    let mut card = double_click_card();
    assert!(card.request_flip());

    let mut changes = 0;
    let mut frames = 0;
    while card.flip().is_animating() {
        if frames == 5 {
            assert!(!card.request_flip());
        }
        if card.update(FRAME).is_some() {
            changes += 1;
        }
        frames += 1;
        assert!(frames < 100);
    }

    assert_eq!(changes, 1);
    assert_eq!(frames, (PI / 0.12).ceil() as usize);
    assert!(card.facing_back());
    assert!((card.render_rotation().y - PI).abs() < 1e-5);
}

#[test]
fn test_front_hidden_after_half_of_flip_animation() {
    let mut card = double_click_card();
    card.request_flip();
    while card.flip().progress() <= FRAC_PI_2 {
        assert!(card.front_visible());
        card.update(FRAME);
    }
    assert!(!card.front_visible());
    assert!(card.back_visible());
}

#[test]
fn test_normalization_is_continuous_at_wrap() {
    let a = normalize_angle(-0.001);
    let b = normalize_angle(TAU - 0.001);
    assert!((a - b).abs() < 1e-5);
    assert_eq!(normalize_angle(0.0), normalize_angle(TAU));
    assert_eq!(normalize_angle(TAU), 0.0);
}

#[test]
fn test_drag_past_half_turn_shows_back() {
    let mut card = CardInteraction::default();
    let mut session = CardSession::default();
    card.pointer_down(Vec2::ZERO);

    let mut flips = 0;
    for step in 1..=33 {
        card.pointer_move(Vec2::new(step as f32 * 10.0, 0.0));
        if let Some(change) = card.update(FRAME) {
            flips += 1;
            session = session.apply(SessionAction::SetFlipped(change.facing_back));
        }
    }

    assert!(card.rotation().y > PI);
    assert_eq!(flips, 1);
    assert!(card.facing_back());
    assert!(session.flipped());

    // The back face looks down -Z in card space; it now points at the camera.
    let orientation = card.render_quat();
    assert!((orientation * Vec3::NEG_Z).z > 0.0);
    assert!((orientation * Vec3::Z).z < 0.0);
}

#[test]
fn test_pointer_up_without_down_is_harmless() {
    let mut card = CardInteraction::default();
    card.pointer_up();
    card.pointer_leave();
    assert!(!card.pointer_move(Vec2::new(10.0, 10.0)));
    assert!(!card.is_dragging());
    assert_eq!(card.rotation(), Vec3::ZERO);
}

#[test]
fn test_leaving_the_surface_keeps_momentum() {
    let mut card = CardInteraction::default();
    card.pointer_down(Vec2::ZERO);
    card.pointer_move(Vec2::new(0.0, 10.0));
    card.pointer_leave();
    assert!(!card.is_dragging());
    assert!(card.momentum().x > 0.0);
}
