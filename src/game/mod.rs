//! Core game state and per-frame update logic.
//!
//! The cat chases the pointer while scratcher pairs scroll in from the
//! right; touching one costs a heart. `types` holds the state, `logic`
//! holds the tick pipeline.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
