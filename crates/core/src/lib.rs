//! Spell rewards for a wave-survival game. Keep this crate free of IO and platform concerns.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod events;
pub mod inventory;
pub mod resolver;
pub mod reward;
pub mod rng;
pub mod spell;
pub mod state;

pub use builder::*;
pub use catalog::*;
pub use config::*;
pub use events::*;
pub use inventory::*;
pub use resolver::*;
pub use reward::*;
pub use rng::*;
pub use spell::*;
pub use state::*;
