//! Systems module for card3d
//!
//! This module contains the Bevy systems for the card viewer, organized
//! into submodules by screen:
//!
//! - `setup`: Scene initialization (camera, lights, pixel ratio)
//! - `loading_screen`: Staged loading screen and thumbnail preloading
//! - `character_select`: Character picker
//! - `card_view`: Card spawning, texture readiness and "Change Card"
//!
//! The card's own input and per-frame update live in `card3d::interaction`.

mod card_view;
mod character_select;
mod loading_screen;
mod setup;

// Re-export all public systems
pub use card_view::{
    despawn_card_view, handle_change_card, spawn_card_view, update_change_card_hover,
    watch_card_textures,
};
pub use character_select::{
    despawn_character_select, handle_character_buttons, spawn_character_select,
    update_character_buttons,
};
pub use loading_screen::{despawn_loading_screen, spawn_loading_screen, tick_loading_screen};
pub use setup::{clamp_device_pixel_ratio, setup_scene};
