//! UI-related types and components
//!
//! Markers for the loading screen, the character select screen and the
//! card view overlay, plus the loading screen's stage timing.

use bevy::prelude::*;

use super::characters::CharacterId;

// ============================================================================
// Loading Screen
// ============================================================================

pub const LOADING_STAGES: [&str; 3] = [
    "Summoning your card...",
    "Applying curses...",
    "Ready for battle!",
];

/// Base delay before a stage advances, in seconds
const STAGE_BASE_SECS: f32 = 1.2;
/// Extra delay per stage already shown
const STAGE_STEP_SECS: f32 = 0.6;
/// Pause after loading finishes before the fade starts
const SETTLE_SECS: f32 = 0.6;
const FADE_SECS: f32 = 0.7;

/// What happened during one loader tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderEvent {
    None,
    StageAdvanced(usize),
    FadeStarted,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LoaderPhase {
    Loading,
    Settling,
    Fading,
    Done,
}

/// Stage progression of the loading screen.
///
/// Lives in a resource that is removed when the loading screen goes away,
/// which cancels every pending delay with it.
#[derive(Resource, Debug, Clone)]
pub struct LoaderProgress {
    stage: usize,
    stage_elapsed: f32,
    phase: LoaderPhase,
    phase_elapsed: f32,
}

impl Default for LoaderProgress {
    fn default() -> Self {
        Self {
            stage: 0,
            stage_elapsed: 0.0,
            phase: LoaderPhase::Loading,
            phase_elapsed: 0.0,
        }
    }
}

impl LoaderProgress {
    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn stage_text(&self) -> &'static str {
        LOADING_STAGES[self.stage]
    }

    pub fn is_finished(&self) -> bool {
        self.phase == LoaderPhase::Done
    }

    /// Screen opacity, 1.0 until the fade starts.
    pub fn opacity(&self) -> f32 {
        match self.phase {
            LoaderPhase::Loading | LoaderPhase::Settling => 1.0,
            LoaderPhase::Fading => (1.0 - self.phase_elapsed / FADE_SECS).clamp(0.0, 1.0),
            LoaderPhase::Done => 0.0,
        }
    }

    fn stage_delay(stage: usize) -> f32 {
        STAGE_BASE_SECS + stage as f32 * STAGE_STEP_SECS
    }

    /// Advance by `dt` seconds; `loading` is whether assets are still pending.
    pub fn tick(&mut self, dt: f32, loading: bool) -> LoaderEvent {
        match self.phase {
            LoaderPhase::Loading => {
                if !loading {
                    self.phase = LoaderPhase::Settling;
                    self.phase_elapsed = 0.0;
                    return LoaderEvent::None;
                }
                if self.stage + 1 < LOADING_STAGES.len() {
                    self.stage_elapsed += dt;
                    if self.stage_elapsed >= Self::stage_delay(self.stage) {
                        self.stage += 1;
                        self.stage_elapsed = 0.0;
                        return LoaderEvent::StageAdvanced(self.stage);
                    }
                }
                LoaderEvent::None
            }
            LoaderPhase::Settling => {
                self.phase_elapsed += dt;
                if self.phase_elapsed >= SETTLE_SECS {
                    self.phase = LoaderPhase::Fading;
                    self.phase_elapsed = 0.0;
                    return LoaderEvent::FadeStarted;
                }
                LoaderEvent::None
            }
            LoaderPhase::Fading => {
                self.phase_elapsed += dt;
                if self.phase_elapsed >= FADE_SECS {
                    self.phase = LoaderPhase::Done;
                    return LoaderEvent::Finished;
                }
                LoaderEvent::None
            }
            LoaderPhase::Done => LoaderEvent::None,
        }
    }
}

/// Marker for the loading screen root
#[derive(Component)]
pub struct LoadingScreenRoot;

/// Marker for the loading stage caption
#[derive(Component)]
pub struct LoadingStageText;

/// Thumbnails requested while the loading screen is up
#[derive(Resource, Default)]
pub struct PreloadedThumbnails {
    pub handles: Vec<Handle<Image>>,
}

// ============================================================================
// Character Select Screen
// ============================================================================

/// Marker for the character select screen root
#[derive(Component)]
pub struct CharacterSelectRoot;

/// A selectable character card button
#[derive(Component)]
pub struct CharacterButton {
    pub id: CharacterId,
}

/// Caption over a character button ("Click to Select" / "Selected!")
#[derive(Component)]
pub struct CharacterButtonCaption {
    pub id: CharacterId,
}

/// Caption over a character button, if one should be shown.
pub fn select_caption(hovered: bool, selected: bool) -> Option<&'static str> {
    if selected {
        Some("Selected!")
    } else if hovered {
        Some("Click to Select")
    } else {
        None
    }
}

/// Text showing why the previous card could not be shown
#[derive(Component)]
pub struct LoadErrorText;

// ============================================================================
// Card View Overlay
// ============================================================================

/// Everything spawned for the card view; despawned when leaving it
#[derive(Component)]
pub struct CardViewEntity;

/// "Change Card" button
#[derive(Component)]
pub struct ChangeCardButton;

/// Caption shown while the card textures load
#[derive(Component)]
pub struct CardLoadingText;

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn run(progress: &mut LoaderProgress, secs: f32, loading: bool) -> Vec<LoaderEvent> {
        let frames = (secs / FRAME).round() as usize;
        (0..frames)
            .map(|_| progress.tick(FRAME, loading))
            .filter(|event| *event != LoaderEvent::None)
            .collect()
    }

    #[test]
    fn test_stages_advance_while_loading() {
        let mut progress = LoaderProgress::default();
        assert_eq!(progress.stage_text(), "Summoning your card...");

        assert!(run(&mut progress, 1.1, true).is_empty());
        assert_eq!(run(&mut progress, 0.2, true), vec![LoaderEvent::StageAdvanced(1)]);
        // Second stage waits 1.8s.
        assert!(run(&mut progress, 1.5, true).is_empty());
        assert_eq!(run(&mut progress, 0.5, true), vec![LoaderEvent::StageAdvanced(2)]);
        // Last stage holds.
        assert!(run(&mut progress, 10.0, true).is_empty());
        assert_eq!(progress.stage_text(), "Ready for battle!");
    }

    #[test]
    fn test_finishes_after_settle_and_fade() {
        let mut progress = LoaderProgress::default();
        progress.tick(FRAME, false);
        assert!(run(&mut progress, 0.5, false).is_empty());
        assert_eq!(progress.opacity(), 1.0);
        assert_eq!(run(&mut progress, 0.2, false), vec![LoaderEvent::FadeStarted]);
        assert_eq!(run(&mut progress, 0.8, false), vec![LoaderEvent::Finished]);
        assert!(progress.is_finished());
        assert_eq!(progress.opacity(), 0.0);
        assert_eq!(progress.tick(FRAME, false), LoaderEvent::None);
    }

    #[test]
    fn test_select_caption() {
        assert_eq!(select_caption(false, false), None);
        assert_eq!(select_caption(true, false), Some("Click to Select"));
        assert_eq!(select_caption(true, true), Some("Selected!"));
        assert_eq!(select_caption(false, true), Some("Selected!"));
    }
}
