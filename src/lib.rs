//! Platformer character movement: an engine-agnostic controller
//! ([`controller`]) and the Bevy/Rapier host that drives it.

pub mod config;
pub mod controller;
pub mod core;
pub mod input;
pub mod player;
#[cfg(feature = "visual_debug")]
pub mod visual_debug;
pub mod world;
