//! Combat system types and logic.

#![allow(unused_imports)]

pub mod logic;
pub mod types;
pub mod waves;

pub use logic::*;
pub use types::*;
pub use waves::*;
