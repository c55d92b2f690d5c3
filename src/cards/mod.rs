//! Card model and deck building.
//!
//! ## Key Types
//!
//! - `Card`: a card's shape plus its mutable battle state
//! - `CardKind`: the closed sum of character/action/effect payloads
//! - `Element`, `ElementScores`: the four duel strengths
//! - `Faction`: deck archetype driving starting element ranges
//!
//! [`build_deck`] produces the randomized 20-card character deck a player
//! starts with.

pub mod card;
pub mod deck;

pub use card::{Card, CardKind, EffectType, Element, ElementScores, Faction, HIDDEN_CARD_TAG};
pub use deck::{build_deck, DECK_SIZE};
