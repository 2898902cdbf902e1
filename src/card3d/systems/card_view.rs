//! Card view systems
//!
//! Spawns the card for the selected character together with its overlay,
//! reveals it once every texture has loaded, and handles "Change Card".

use bevy::prelude::*;
use std::f32::consts::PI;

use crate::card3d::interaction::{CardInteraction, CardPointerCapture};
use crate::card3d::meshes::{create_card_body, create_card_face};
use crate::card3d::types::*;

const BODY_COLOR: Color = Color::srgb(0.973, 0.973, 0.973);
const BUTTON_TEXT: Color = Color::srgb(0.82, 0.84, 0.86);
const BUTTON_TEXT_HOVER: Color = Color::WHITE;

/// Enter the card view: build the card for the selected character.
pub fn spawn_card_view(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    catalog: Res<CharacterCatalog>,
    settings: Res<ViewerSettings>,
    spec: Res<CardSpec>,
    mut session: ResMut<CardSession>,
    mut next_state: ResMut<NextState<Screen>>,
) {
    let Some(id) = session.selected().cloned() else {
        warn!("Card view entered without a selected character");
        next_state.set(Screen::CharacterSelect);
        return;
    };

    let spawned = spawn_card(
        &mut commands,
        &asset_server,
        &mut meshes,
        &mut materials,
        &catalog,
        &settings,
        &spec,
        &id,
    );
    if let Err(err) = spawned {
        error!("Cannot show card for {}: {}", id, err);
        *session = session.apply(SessionAction::LoadFailed(err.to_string()));
        next_state.set(Screen::CharacterSelect);
        return;
    }

    spawn_card_overlay(&mut commands);
}

#[allow(clippy::too_many_arguments)]
fn spawn_card(
    commands: &mut Commands,
    asset_server: &AssetServer,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    catalog: &CharacterCatalog,
    settings: &ViewerSettings,
    spec: &CardSpec,
    id: &CharacterId,
) -> Result<(), CardError> {
    let paths = TexturePaths::resolve(catalog, id)?;
    let body_mesh = create_card_body(spec, settings.body_style, settings.corner_segments)?;
    let front_mesh = create_card_face(spec, TextureSampling::for_slot(TextureSlot::Front))?;
    let back_mesh = create_card_face(spec, TextureSampling::for_slot(TextureSlot::Back))?;

    info!("Loading card textures for {}", id);
    let textures = TextureSet::load(asset_server, paths);

    let front_material = materials.add(face_material(&textures, CardSide::Front));
    let back_material = materials.add(face_material(&textures, CardSide::Back));
    let body_material = materials.add(body_material(&textures));

    commands
        .spawn((
            CardRoot,
            CardViewEntity,
            CardInteraction::new(settings.interaction),
            Transform::default(),
            // Shown once the textures are in
            Visibility::Hidden,
            textures,
        ))
        .with_children(|card| {
            card.spawn((
                Mesh3d(meshes.add(front_mesh)),
                MeshMaterial3d(front_material),
                Transform::from_xyz(0.0, 0.0, spec.front_face_z()),
                Visibility::Inherited,
                CardFace {
                    side: CardSide::Front,
                },
            ));

            card.spawn((
                Mesh3d(meshes.add(back_mesh)),
                MeshMaterial3d(back_material),
                Transform::from_xyz(0.0, 0.0, spec.back_face_z())
                    .with_rotation(Quat::from_rotation_y(PI)),
                Visibility::Inherited,
                CardFace {
                    side: CardSide::Back,
                },
            ));

            card.spawn((
                Mesh3d(meshes.add(body_mesh)),
                MeshMaterial3d(body_material),
                Transform::default(),
                CardBody,
            ));
        });

    Ok(())
}

/// Printed face: artwork over the shared paper maps. The back is lacquered.
fn face_material(textures: &TextureSet, side: CardSide) -> StandardMaterial {
    let paper = StandardMaterial {
        normal_map_texture: Some(textures.normal.clone()),
        metallic_roughness_texture: Some(textures.roughness.clone()),
        occlusion_texture: Some(textures.occlusion.clone()),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    };

    match side {
        CardSide::Front => StandardMaterial {
            base_color_texture: Some(textures.front.clone()),
            ..paper
        },
        CardSide::Back => StandardMaterial {
            base_color_texture: Some(textures.back.clone()),
            clearcoat: 0.8,
            clearcoat_perceptual_roughness: 0.2,
            // Scaled by the paper map's blue channel, which also carries
            // roughness: the lacquer reads less metallic where the paper is smooth.
            metallic: 0.1,
            reflectance: 0.5,
            ..paper
        },
    }
}

/// Neutral paper edge, drawn behind the faces.
fn body_material(textures: &TextureSet) -> StandardMaterial {
    StandardMaterial {
        base_color: BODY_COLOR,
        normal_map_texture: Some(textures.normal.clone()),
        metallic_roughness_texture: Some(textures.roughness.clone()),
        occlusion_texture: Some(textures.occlusion.clone()),
        double_sided: true,
        cull_mode: None,
        depth_bias: -1.0,
        ..default()
    }
}

fn spawn_card_overlay(commands: &mut Commands) {
    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(16.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            GlobalZIndex(10),
            ChangeCardButton,
            CardViewEntity,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new("< Change Card"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(BUTTON_TEXT),
            ));
        });

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            ..default()
        },
        CardLoadingText,
        CardViewEntity,
        children![(
            Text::new(LOADING_STAGES[0]),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextColor(Color::WHITE),
        )],
    ));
}

/// Reveal the card once its textures are loaded; bail out to the select
/// screen when one of them fails.
pub fn watch_card_textures(
    asset_server: Res<AssetServer>,
    mut cards: Query<(&TextureSet, &mut Visibility), With<CardRoot>>,
    mut overlays: Query<&mut Visibility, (With<CardLoadingText>, Without<CardRoot>)>,
    mut session: ResMut<CardSession>,
    mut next_state: ResMut<NextState<Screen>>,
) {
    for (textures, mut visibility) in cards.iter_mut() {
        if *visibility != Visibility::Hidden {
            continue;
        }

        match textures.poll(&asset_server) {
            TextureSetStatus::Pending => {}
            TextureSetStatus::Ready => {
                info!("Card textures ready");
                *visibility = Visibility::Inherited;
                for mut overlay in overlays.iter_mut() {
                    *overlay = Visibility::Hidden;
                }
            }
            TextureSetStatus::Failed(err) => {
                error!("{}", err);
                *session = session.apply(SessionAction::LoadFailed(err.to_string()));
                next_state.set(Screen::CharacterSelect);
            }
        }
    }
}

/// "Change Card" button or Escape: forget the selection and go back.
pub fn handle_change_card(
    keyboard: Res<ButtonInput<KeyCode>>,
    capture: Res<CardPointerCapture>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<ChangeCardButton>)>,
    mut session: ResMut<CardSession>,
    mut next_state: ResMut<NextState<Screen>>,
) {
    let clicked = !capture.captured
        && buttons
            .iter()
            .any(|interaction| *interaction == Interaction::Pressed);
    if !clicked && !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    info!("Changing card");
    *session = session.apply(SessionAction::ChangeCard);
    next_state.set(session.route());
}

/// Hover feedback on the "Change Card" button.
pub fn update_change_card_hover(
    buttons: Query<(&Interaction, &Children), (Changed<Interaction>, With<ChangeCardButton>)>,
    mut texts: Query<&mut TextColor>,
) {
    for (interaction, children) in buttons.iter() {
        let color = if *interaction == Interaction::None {
            BUTTON_TEXT
        } else {
            BUTTON_TEXT_HOVER
        };
        let mut labels = texts.iter_many_mut(children.iter());
        while let Some(mut label) = labels.fetch_next() {
            label.0 = color;
        }
    }
}

/// Leave the card view. Despawning the card drops any running flip
/// cool-down or animation with it.
pub fn despawn_card_view(
    mut commands: Commands,
    entities: Query<Entity, With<CardViewEntity>>,
    mut capture: ResMut<CardPointerCapture>,
) {
    for entity in entities.iter() {
        commands.entity(entity).despawn();
    }
    *capture = CardPointerCapture::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder_textures() -> TextureSet {
        let catalog = CharacterCatalog::bundled().expect("bundled catalog parses");
        let id = catalog.characters[0].id.clone();
        TextureSet {
            paths: TexturePaths::resolve(&catalog, &id).expect("character resolves"),
            front: Handle::default(),
            back: Handle::default(),
            normal: Handle::default(),
            roughness: Handle::default(),
            occlusion: Handle::default(),
        }
    }

    #[test]
    fn test_only_the_back_is_lacquered() {
        let textures = placeholder_textures();
        let front = face_material(&textures, CardSide::Front);
        let back = face_material(&textures, CardSide::Back);

        assert_eq!(front.metallic, 0.0);
        assert_eq!(front.clearcoat, 0.0);
        assert_eq!(back.metallic, 0.1);
        assert_eq!(back.clearcoat, 0.8);
        assert_eq!(back.clearcoat_perceptual_roughness, 0.2);
        assert_eq!(back.reflectance, 0.5);
        assert!(back.metallic_roughness_texture.is_some());
    }

    #[test]
    fn test_body_sorts_behind_the_faces() {
        let body = body_material(&placeholder_textures());
        assert!(body.double_sided);
        assert!(body.cull_mode.is_none());
        assert!(body.depth_bias < 0.0);
    }
}
