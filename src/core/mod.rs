//! Core simulation: state, configuration and the per-tick engine.

#![allow(unused_imports)]

pub mod combat_math;
pub mod config;
pub mod constants;
pub mod engine;
pub mod feedback;
pub mod game_state;
pub mod intents;
pub mod session;
pub mod tick;

pub use config::*;
pub use engine::*;
pub use feedback::*;
pub use game_state::*;
pub use intents::*;
pub use session::*;
pub use tick::*;
