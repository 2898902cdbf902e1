//! cardview3d - interactive 3D trading card viewer built on Bevy.

pub mod card3d;
