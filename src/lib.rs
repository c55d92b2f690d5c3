//! # grid-clash
//!
//! Battle engine for a two-player grid-capture card game.
//!
//! Two players, one Light and one Dark, fight for control of a 3x5 grid.
//! Character cards carry four elemental scores and duel their neighbors
//! when placed; the direction of the duel decides which element is
//! compared, and losing characters flip to the placing player. When the
//! grid fills, whoever controls more characters wins. Around the engine
//! sit an Elo-derived rating system and a rating-windowed matchmaking
//! queue.
//!
//! ## Design Principles
//!
//! 1. **Deterministic Core**: All randomness flows through a seeded
//!    [`GameRng`]; the same seed and move sequence always produce the
//!    same game.
//!
//! 2. **Total Move Handling**: Every move attempt yields either the new
//!    state or an unchanged game plus a typed rejection. Nothing panics
//!    on client input.
//!
//! 3. **Data-Shaped Boundary**: The engine speaks plain serializable
//!    values ([`MoveRequest`], [`MoveResponse`], game-state values) and
//!    knows nothing about transports or storage.
//!
//! ## Modules
//!
//! - `cards`: Card model (character, action, effect) and deck building
//! - `core`: Ids, per-player piles, deterministic RNG
//! - `game`: The 3x5 grid, turn state machine, and boundary protocol
//! - `rating`: Elo-derived rating updates with K-factor tiers
//! - `matchmaking`: Rating-windowed pairing queue
//! - `errors`: Typed rejection and state errors

pub mod cards;
pub mod core;
pub mod errors;
pub mod game;
pub mod matchmaking;
pub mod rating;

pub use crate::cards::{
    build_deck, Card, CardKind, EffectType, Element, ElementScores, Faction, DECK_SIZE,
};

pub use crate::core::{
    DrawOutcome, GameRng, GameRngState, Hand, MatchId, Player, UserId, HAND_LIMIT,
};

pub use crate::errors::{GameError, PlayError, StateError};

pub use crate::game::{
    Captures, CardRef, FinalScore, FinalScores, Game, GameOutcome, GameStatus, Grid, MatchOutcome,
    MoveRequest, MoveResponse, CELLS, COLS, COMPUTER_PLAYER, ROWS, STARTING_HAND,
};

pub use crate::matchmaking::{MatchmakingQueue, Pairing, RATING_WINDOW};

pub use crate::rating::{
    settle_match, update_ratings, RatingProfile, RATING_FLOOR, STARTING_RATING,
};
