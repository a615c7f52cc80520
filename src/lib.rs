//! Manaburn - Idle Wave Combat Engine
//!
//! Simulation core for an idle combat game: a single hero fights generated
//! waves, buys and crafts items, levels skills, and carries prestige across
//! rebirths. Hosts drive [`core::Engine::tick`] (or a [`core::Session`]),
//! submit [`core::Intent`]s, and render from [`core::Engine::snapshot`].

pub mod catalog;
pub mod character;
pub mod combat;
pub mod core;
pub mod error;
pub mod items;
pub mod save_manager;
