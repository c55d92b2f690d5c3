//! Core building blocks: players and deterministic randomness.
//!
//! ## Key Types
//!
//! - `Player`: deck/hand/discard/active-effect container with draw rules
//! - `GameRng`: seeded, serializable RNG behind every shuffle and roll

pub mod ids;
pub mod player;
pub mod rng;

pub use ids::{MatchId, UserId};
pub use player::{DrawOutcome, Hand, Player, HAND_LIMIT};
pub use rng::{GameRng, GameRngState};
