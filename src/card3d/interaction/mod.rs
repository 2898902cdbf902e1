//! Card Interaction Module
//!
//! This module handles direct manipulation of the card: dragging rotates it,
//! releasing leaves it spinning with decaying momentum, the wheel zooms, and
//! turning it past the halfway point (or double clicking, depending on the
//! flip policy) flips it.

mod flip;
mod state;
mod systems;

pub use flip::*;
pub use state::*;
pub use systems::*;
