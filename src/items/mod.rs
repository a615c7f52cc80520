//! Item containers and the shop.

pub mod equipment;
pub mod shop;

pub use equipment::*;
pub use shop::*;
