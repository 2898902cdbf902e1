//! Card texture types
//!
//! Resolves a character to its texture files, applies the sampling rules
//! every card texture shares, and tracks the load state of the handles.

use bevy::asset::LoadState;
use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use std::fmt;

use super::characters::{CharacterCatalog, CharacterId};
use super::error::CardError;

/// Named texture slot on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Front,
    Back,
    Normal,
    Roughness,
    Occlusion,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 5] = [
        TextureSlot::Front,
        TextureSlot::Back,
        TextureSlot::Normal,
        TextureSlot::Roughness,
        TextureSlot::Occlusion,
    ];

    /// Colour slots hold artwork; the rest hold data (paper maps).
    pub fn is_color(&self) -> bool {
        matches!(self, TextureSlot::Front | TextureSlot::Back)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextureSlot::Front => "front",
            TextureSlot::Back => "back",
            TextureSlot::Normal => "normal",
            TextureSlot::Roughness => "roughness",
            TextureSlot::Occlusion => "occlusion",
        }
    }
}

impl fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sampling rules applied to every texture of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSampling {
    /// Textures are authored top-down, so they are never flipped on load.
    pub flip_y: bool,
    pub address_mode: ImageAddressMode,
    pub srgb: bool,
}

impl TextureSampling {
    pub fn for_slot(slot: TextureSlot) -> Self {
        Self {
            flip_y: false,
            address_mode: ImageAddressMode::ClampToEdge,
            srgb: slot.is_color(),
        }
    }

    pub fn sampler(&self) -> ImageSampler {
        let mut descriptor = ImageSamplerDescriptor::linear();
        descriptor.address_mode_u = self.address_mode;
        descriptor.address_mode_v = self.address_mode;
        descriptor.address_mode_w = self.address_mode;
        ImageSampler::Descriptor(descriptor)
    }

    /// Texture coordinate for a point given in face space (0..1, origin at
    /// the bottom-left of the face).
    pub fn uv(&self, u: f32, v_up: f32) -> [f32; 2] {
        if self.flip_y {
            [u, v_up]
        } else {
            [u, 1.0 - v_up]
        }
    }

    /// Handedness of the tangent frame matching `uv`.
    pub fn tangent_sign(&self) -> f32 {
        if self.flip_y {
            -1.0
        } else {
            1.0
        }
    }
}

/// File paths for every slot of one character's card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexturePaths {
    pub front: String,
    pub back: String,
    pub normal: String,
    pub roughness: String,
    pub occlusion: String,
}

impl TexturePaths {
    pub fn resolve(catalog: &CharacterCatalog, id: &CharacterId) -> Result<Self, CardError> {
        let entry = catalog
            .get(id)
            .ok_or_else(|| CardError::UnknownCharacter(id.to_string()))?;

        Ok(Self {
            front: entry.front.clone(),
            back: catalog.card_back.clone(),
            normal: catalog.paper.normal.clone(),
            roughness: catalog.paper.roughness.clone(),
            occlusion: catalog.paper.occlusion.clone(),
        })
    }

    pub fn get(&self, slot: TextureSlot) -> &str {
        match slot {
            TextureSlot::Front => &self.front,
            TextureSlot::Back => &self.back,
            TextureSlot::Normal => &self.normal,
            TextureSlot::Roughness => &self.roughness,
            TextureSlot::Occlusion => &self.occlusion,
        }
    }
}

/// Overall state of a texture set's loads
#[derive(Debug)]
pub enum TextureSetStatus {
    Pending,
    Ready,
    Failed(CardError),
}

/// Loaded (or loading) textures for the card currently on screen.
#[derive(Component, Clone)]
pub struct TextureSet {
    pub paths: TexturePaths,
    pub front: Handle<Image>,
    pub back: Handle<Image>,
    pub normal: Handle<Image>,
    pub roughness: Handle<Image>,
    pub occlusion: Handle<Image>,
}

impl TextureSet {
    /// Start loading every slot with the card sampling rules applied.
    pub fn load(asset_server: &AssetServer, paths: TexturePaths) -> Self {
        let load = |slot: TextureSlot| -> Handle<Image> {
            let sampling = TextureSampling::for_slot(slot);
            asset_server.load_with_settings(
                paths.get(slot).to_string(),
                move |settings: &mut ImageLoaderSettings| {
                    settings.is_srgb = sampling.srgb;
                    settings.sampler = sampling.sampler();
                },
            )
        };

        Self {
            front: load(TextureSlot::Front),
            back: load(TextureSlot::Back),
            normal: load(TextureSlot::Normal),
            roughness: load(TextureSlot::Roughness),
            occlusion: load(TextureSlot::Occlusion),
            paths,
        }
    }

    pub fn handle(&self, slot: TextureSlot) -> &Handle<Image> {
        match slot {
            TextureSlot::Front => &self.front,
            TextureSlot::Back => &self.back,
            TextureSlot::Normal => &self.normal,
            TextureSlot::Roughness => &self.roughness,
            TextureSlot::Occlusion => &self.occlusion,
        }
    }

    /// Check the loads; the first failed slot wins.
    pub fn poll(&self, asset_server: &AssetServer) -> TextureSetStatus {
        let mut pending = false;
        for slot in TextureSlot::ALL {
            match asset_server.get_load_state(self.handle(slot).id()) {
                Some(LoadState::Loaded) => {}
                Some(LoadState::Failed(err)) => {
                    return TextureSetStatus::Failed(CardError::TextureLoad {
                        slot,
                        path: self.paths.get(slot).to_string(),
                        reason: err.to_string(),
                    });
                }
                _ => pending = true,
            }
        }

        if pending {
            TextureSetStatus::Pending
        } else {
            TextureSetStatus::Ready
        }
    }
}
