//! Character select screen systems
//!
//! One button per catalog entry, showing its thumbnail. Hovering a button
//! rings it and shows "Click to Select"; pressing it selects the character
//! and opens the card view.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use crate::card3d::types::*;

const SCREEN_BACKGROUND: Color = Color::srgb(0.09, 0.09, 0.09);
const RING_SELECTED: Color = Color::srgb(0.725, 0.11, 0.11);
const RING_HOVERED: Color = Color::srgb(0.973, 0.443, 0.443);
const CAPTION_BACKGROUND: Color = Color::srgba(0.725, 0.11, 0.11, 0.8);
const ERROR_TEXT: Color = Color::srgb(0.973, 0.443, 0.443);

const BUTTON_WIDTH: f32 = 260.0;
const BUTTON_HEIGHT: f32 = 360.0;

pub fn spawn_character_select(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    catalog: Res<CharacterCatalog>,
    session: Res<CardSession>,
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(SCREEN_BACKGROUND),
            CharacterSelectRoot,
        ))
        .with_children(|parent| {
            if let Some(reason) = session.last_error() {
                parent.spawn((
                    Text::new(format!("Could not show that card: {}", reason)),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(ERROR_TEXT),
                    LoadErrorText,
                ));
            }

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(24.0),
                    ..default()
                })
                .with_children(|row| {
                    for entry in &catalog.characters {
                        spawn_character_button(row, &asset_server, entry);
                    }
                });
        });
}

fn spawn_character_button(
    row: &mut ChildSpawnerCommands,
    asset_server: &AssetServer,
    entry: &CharacterEntry,
) {
    row.spawn((
        Button,
        Node {
            width: Val::Px(BUTTON_WIDTH),
            height: Val::Px(BUTTON_HEIGHT),
            margin: UiRect::bottom(Val::Px(32.0)),
            overflow: Overflow::clip(),
            ..default()
        },
        Outline::new(Val::Px(0.0), Val::Px(0.0), Color::NONE),
        CharacterButton {
            id: entry.id.clone(),
        },
    ))
    .with_children(|button| {
        button.spawn((
            ImageNode::new(asset_server.load(entry.thumbnail.clone())),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
        ));

        button
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    right: Val::Px(0.0),
                    bottom: Val::Px(0.0),
                    justify_content: JustifyContent::Center,
                    padding: UiRect::axes(Val::Px(0.0), Val::Px(24.0)),
                    ..default()
                },
                BackgroundColor(CAPTION_BACKGROUND),
                Visibility::Hidden,
                CharacterButtonCaption {
                    id: entry.id.clone(),
                },
            ))
            .with_children(|caption| {
                caption.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });
    });
}

/// `onSelectCharacter`: a pressed button selects its character.
pub fn handle_character_buttons(
    buttons: Query<(&Interaction, &CharacterButton), Changed<Interaction>>,
    mut session: ResMut<CardSession>,
    mut next_state: ResMut<NextState<Screen>>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        info!("Selected character {}", button.id);
        *session = session.apply(SessionAction::SelectCharacter(button.id.clone()));
        next_state.set(session.route());
        return;
    }
}

/// Rings and captions follow hover and the current selection.
pub fn update_character_buttons(
    session: Res<CardSession>,
    mut buttons: Query<(&Interaction, &CharacterButton, &mut Outline)>,
    mut captions: Query<(&CharacterButtonCaption, &Children, &mut Visibility)>,
    mut texts: Query<&mut Text>,
) {
    let selected = session.selected();
    let mut hovered: Option<CharacterId> = None;

    for (interaction, button, mut outline) in buttons.iter_mut() {
        let is_hovered = *interaction != Interaction::None;
        let is_selected = selected == Some(&button.id);
        if is_hovered {
            hovered = Some(button.id.clone());
        }

        let (width, color) = if is_selected {
            (4.0, RING_SELECTED)
        } else if is_hovered {
            (2.0, RING_HOVERED)
        } else {
            (0.0, Color::NONE)
        };
        if outline.width != Val::Px(width) {
            outline.width = Val::Px(width);
            outline.color = color;
        }
    }

    for (caption, children, mut visibility) in captions.iter_mut() {
        let is_hovered = hovered.as_ref() == Some(&caption.id);
        let is_selected = selected == Some(&caption.id);
        let label = select_caption(is_hovered, is_selected);

        let wanted = if label.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }

        let Some(label) = label else {
            continue;
        };
        let mut caption_texts = texts.iter_many_mut(children.iter());
        while let Some(mut text) = caption_texts.fetch_next() {
            if text.as_str() != label {
                **text = label.to_string();
            }
        }
    }
}

pub fn despawn_character_select(
    mut commands: Commands,
    roots: Query<Entity, With<CharacterSelectRoot>>,
) {
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
}
