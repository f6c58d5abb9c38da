//! Terminal rendering: the game scene and shared widget helpers.

pub mod game_common;
pub mod game_scene;
