pub mod interaction;
pub mod meshes;
pub mod systems;
pub mod types;

pub use interaction::*;
pub use meshes::*;
pub use systems::*;
pub use types::*;

use bevy::prelude::*;

/// Screens, card interaction and scene setup of the viewer.
///
/// Expects a [`CharacterCatalog`] resource; [`ViewerSettings`] and
/// [`CardSession`] fall back to their defaults when not inserted beforehand.
pub struct CardViewerPlugin;

impl Plugin for CardViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<Screen>()
            .add_message::<CardFlipChanged>()
            .init_resource::<ViewerSettings>()
            .init_resource::<CardSession>()
            .init_resource::<CardSpec>()
            .init_resource::<CardPointerCapture>()
            .add_systems(Startup, setup_scene)
            .add_systems(Update, clamp_device_pixel_ratio)
            // Loading
            .add_systems(OnEnter(Screen::Loading), spawn_loading_screen)
            .add_systems(
                Update,
                tick_loading_screen.run_if(in_state(Screen::Loading)),
            )
            .add_systems(OnExit(Screen::Loading), despawn_loading_screen)
            // Character select
            .add_systems(OnEnter(Screen::CharacterSelect), spawn_character_select)
            .add_systems(
                Update,
                (handle_character_buttons, update_character_buttons)
                    .chain()
                    .run_if(in_state(Screen::CharacterSelect)),
            )
            .add_systems(OnExit(Screen::CharacterSelect), despawn_character_select)
            // Card view
            .add_systems(OnEnter(Screen::CardView), spawn_card_view)
            .add_systems(
                Update,
                (
                    watch_card_textures,
                    card_pointer_input,
                    advance_card_interaction,
                    apply_flip_changes,
                    handle_change_card,
                    update_change_card_hover,
                )
                    .chain()
                    .run_if(in_state(Screen::CardView)),
            )
            .add_systems(OnExit(Screen::CardView), despawn_card_view);
    }
}
