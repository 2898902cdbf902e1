//! Loading screen systems
//!
//! The loading screen stays up while the select screen's thumbnails load,
//! cycling through its stage captions, then fades out and hands over to the
//! screen the session routes to.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::card3d::types::*;

const LOADER_BACKGROUND_ALPHA: f32 = 0.9;
const ACCENT_RED: Color = Color::srgb(0.725, 0.11, 0.11);

/// Spawn the loading screen and start loading the thumbnails.
pub fn spawn_loading_screen(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    catalog: Res<CharacterCatalog>,
) {
    let handles: Vec<Handle<Image>> = catalog
        .thumbnails()
        .map(|path| asset_server.load(path.to_string()))
        .collect();
    info!("Loading {} character thumbnails", handles.len());
    commands.insert_resource(PreloadedThumbnails { handles });

    let progress = LoaderProgress::default();
    let caption = progress.stage_text();
    commands.insert_resource(progress);

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(Color::BLACK.with_alpha(LOADER_BACKGROUND_ALPHA)),
            GlobalZIndex(50),
            LoadingScreenRoot,
        ))
        .with_children(|parent| {
            // Little card emblem
            parent.spawn((
                Node {
                    width: Val::Px(36.0),
                    height: Val::Px(48.0),
                    margin: UiRect::bottom(Val::Px(32.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(ACCENT_RED),
                Outline::new(Val::Px(4.0), Val::Px(6.0), Color::WHITE),
            ));

            parent.spawn((
                Text::new(caption),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                LoadingStageText,
            ));
        });
}

/// Whether any preloaded thumbnail is still on its way.
fn thumbnails_pending(asset_server: &AssetServer, thumbnails: &PreloadedThumbnails) -> bool {
    thumbnails.handles.iter().any(|handle| {
        !matches!(
            asset_server.get_load_state(handle.id()),
            Some(LoadState::Loaded) | Some(LoadState::Failed(_))
        )
    })
}

/// Advance the loader stages and fade, then leave for the routed screen.
pub fn tick_loading_screen(
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    thumbnails: Res<PreloadedThumbnails>,
    session: Res<CardSession>,
    mut progress: ResMut<LoaderProgress>,
    mut roots: Query<&mut BackgroundColor, With<LoadingScreenRoot>>,
    mut captions: Query<(&mut Text, &mut TextColor), With<LoadingStageText>>,
    mut next_state: ResMut<NextState<Screen>>,
) {
    let loading = thumbnails_pending(&asset_server, &thumbnails);

    match progress.tick(time.delta_secs(), loading) {
        LoaderEvent::StageAdvanced(stage) => {
            debug!("Loader stage {}", stage);
            for (mut text, _) in captions.iter_mut() {
                **text = progress.stage_text().to_string();
            }
        }
        LoaderEvent::FadeStarted => {
            for handle in &thumbnails.handles {
                if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle.id()) {
                    warn!("Thumbnail failed to load: {}", err);
                }
            }
        }
        LoaderEvent::Finished => {
            let route = session.route();
            info!("Loading finished, showing {:?}", route);
            next_state.set(route);
        }
        LoaderEvent::None => {}
    }

    let opacity = progress.opacity();
    for mut background in roots.iter_mut() {
        background.0 = Color::BLACK.with_alpha(LOADER_BACKGROUND_ALPHA * opacity);
    }
    for (_, mut color) in captions.iter_mut() {
        color.0 = Color::WHITE.with_alpha(opacity);
    }
}

/// Tear the loading screen down. Removing the progress resource drops any
/// stage or fade delay that had not fired yet.
pub fn despawn_loading_screen(
    mut commands: Commands,
    roots: Query<Entity, With<LoadingScreenRoot>>,
) {
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<LoaderProgress>();
}
