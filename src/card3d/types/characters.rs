//! Character catalog types
//!
//! The catalog lists every selectable character together with the artwork
//! that belongs to it, plus the card back and paper maps all cards share.
//! It is loaded from the bundled RON asset (see `assets/characters.ron`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::CardError;

/// Identifier of a selectable character (the thumbnail file name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub id: CharacterId,
    /// Name shown on the select screen
    pub name: String,
    /// Image used on the select screen
    pub thumbnail: String,
    /// Card frame with character art
    pub front: String,
}

/// Paper maps shared by every card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperMaps {
    pub normal: String,
    pub roughness: String,
    pub occlusion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct CharacterCatalog {
    pub card_back: String,
    pub paper: PaperMaps,
    pub characters: Vec<CharacterEntry>,
}

impl CharacterCatalog {
    /// Parse a catalog from RON text.
    pub fn from_ron(text: &str) -> Result<Self, CardError> {
        let catalog: CharacterCatalog = ron::from_str(text)?;
        if catalog.characters.is_empty() {
            return Err(CardError::InvalidConfig(
                "character catalog has no characters".to_string(),
            ));
        }
        Ok(catalog)
    }

    /// Load the catalog bundled with the binary.
    pub fn bundled() -> Result<Self, CardError> {
        let text = include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/assets/characters.ron"
        ));
        Self::from_ron(text)
    }

    pub fn get(&self, id: &CharacterId) -> Option<&CharacterEntry> {
        self.characters.iter().find(|entry| &entry.id == id)
    }

    pub fn contains(&self, id: &CharacterId) -> bool {
        self.get(id).is_some()
    }

    pub fn thumbnails(&self) -> impl Iterator<Item = &str> {
        self.characters.iter().map(|entry| entry.thumbnail.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_lists_both_characters() {
        let catalog = CharacterCatalog::bundled().expect("bundled catalog parses");
        assert_eq!(catalog.characters.len(), 2);
        assert!(catalog.contains(&CharacterId::new("Bitter_Reprisalv2.jpg")));
        assert!(catalog.contains(&CharacterId::new("Clairvoyant_Dreams.jpg")));
        assert_eq!(catalog.card_back, "cardback JYNX.png");
    }

    #[test]
    fn test_lookup_unknown_character() {
        let catalog = CharacterCatalog::bundled().expect("bundled catalog parses");
        assert!(catalog.get(&CharacterId::new("Nobody.jpg")).is_none());
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let text = r#"(
            card_back: "back.png",
            paper: (normal: "n.jpg", roughness: "r.jpg", occlusion: "o.jpg"),
            characters: [],
        )"#;
        assert!(matches!(
            CharacterCatalog::from_ron(text),
            Err(CardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_catalog_reports_parse_error() {
        assert!(matches!(
            CharacterCatalog::from_ron("(card_back: 3"),
            Err(CardError::Catalog(_))
        ));
    }
}
