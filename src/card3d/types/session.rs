//! Session and screen-flow types
//!
//! `CardSession` is the selection state shared by every screen. It is never
//! mutated in place: systems build the next value with [`CardSession::apply`]
//! and store it back, so every change goes through one place.

use bevy::prelude::*;

use super::characters::CharacterId;

/// The screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, States, Hash)]
pub enum Screen {
    #[default]
    Loading,
    CharacterSelect,
    CardView,
}

/// Changes the screens can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// A character was picked on the select screen
    SelectCharacter(CharacterId),
    /// The card view reports which face is towards the viewer
    SetFlipped(bool),
    /// "Change Card": forget the selection
    ChangeCard,
    /// The selected card could not be shown
    LoadFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Resource)]
pub struct CardSession {
    selected: Option<CharacterId>,
    flipped: bool,
    last_error: Option<String>,
}

impl CardSession {
    pub fn with_selection(id: CharacterId) -> Self {
        Self::default().apply(SessionAction::SelectCharacter(id))
    }

    pub fn selected(&self) -> Option<&CharacterId> {
        self.selected.as_ref()
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Build the session that results from `action`.
    pub fn apply(&self, action: SessionAction) -> CardSession {
        match action {
            SessionAction::SelectCharacter(id) => CardSession {
                selected: Some(id),
                flipped: false,
                last_error: None,
            },
            SessionAction::SetFlipped(flipped) => CardSession {
                flipped,
                ..self.clone()
            },
            SessionAction::ChangeCard => CardSession {
                selected: None,
                flipped: false,
                last_error: self.last_error.clone(),
            },
            SessionAction::LoadFailed(reason) => CardSession {
                selected: None,
                flipped: false,
                last_error: Some(reason),
            },
        }
    }

    /// Screen to show for this session once loading is over.
    pub fn route(&self) -> Screen {
        if self.selected.is_some() {
            Screen::CardView
        } else {
            Screen::CharacterSelect
        }
    }
}

/// Written whenever the card view's flip flag changes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFlipChanged {
    pub flipped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_routes_to_select() {
        let session = CardSession::default();
        assert!(session.selected().is_none());
        assert!(!session.flipped());
        assert_eq!(session.route(), Screen::CharacterSelect);
    }

    #[test]
    fn test_select_routes_to_card_view() {
        let session =
            CardSession::default().apply(SessionAction::SelectCharacter(CharacterId::new("a")));
        assert_eq!(session.selected(), Some(&CharacterId::new("a")));
        assert_eq!(session.route(), Screen::CardView);
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let before = CardSession::with_selection(CharacterId::new("a"));
        let after = before.apply(SessionAction::SetFlipped(true));
        assert!(!before.flipped());
        assert!(after.flipped());
        assert_eq!(after.selected(), before.selected());
    }

    #[test]
    fn test_load_failure_clears_selection_and_keeps_reason() {
        let session = CardSession::with_selection(CharacterId::new("a"))
            .apply(SessionAction::SetFlipped(true))
            .apply(SessionAction::LoadFailed("missing front".to_string()));
        assert!(session.selected().is_none());
        assert!(!session.flipped());
        assert_eq!(session.last_error(), Some("missing front"));
        assert_eq!(session.route(), Screen::CharacterSelect);

        let session = session.apply(SessionAction::SelectCharacter(CharacterId::new("b")));
        assert!(session.last_error().is_none());
    }
}
