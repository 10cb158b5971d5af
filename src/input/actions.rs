use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

/// Input context for the controlled character.
#[derive(Component)]
pub struct PlayerInput;

/// Horizontal steering axis in `[-1, 1]`.
#[derive(Debug, InputAction)]
#[action_output(f32)]
pub struct Move;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Jump;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Run;
