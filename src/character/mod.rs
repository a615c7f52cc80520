//! Hero stats, leveling and meta-progression.

#![allow(unused_imports)]

pub mod derived_stats;
pub mod leveling;
pub mod prestige;

pub use derived_stats::*;
pub use leveling::*;
pub use prestige::*;
