//! Type definitions for the 3D card viewer
//!
//! This module is organized into submodules:
//! - `card` - Card dimensions and card entity components
//! - `characters` - Character catalog
//! - `textures` - Texture slots, sampling rules and texture sets
//! - `session` - Selection state and screen flow
//! - `settings` - Viewer settings and persistence
//! - `ui` - Loading, select and overlay UI components
//! - `camera` - Camera-related components
//! - `error` - Error type

pub mod camera;
pub mod card;
pub mod characters;
pub mod error;
pub mod session;
pub mod settings;
pub mod textures;
pub mod ui;

// Re-export all public types for convenient access
pub use camera::*;
pub use card::*;
pub use characters::*;
pub use error::*;
pub use session::*;
pub use settings::*;
pub use textures::*;
pub use ui::*;
