//! The engine's data-shaped boundary.
//!
//! Nothing here knows about transports or storage. The contract is three
//! plain values:
//!
//! - a **game-state value** ([`Game::to_state_value`] /
//!   [`Game::from_state_value`]) that round-trips exactly and tolerates
//!   the hidden-card placeholders a privacy filter inserts into hands
//! - a **move request/response** pair ([`Game::apply_move`])
//! - a **match outcome event** ([`Game::outcome`]) emitted once per
//!   finished game

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::state::{FinalScores, Game, GameOutcome};
use crate::cards::HIDDEN_CARD_TAG;
use crate::core::MatchId;
use crate::errors::StateError;

/// Card-identifying subset of a serialized card.
///
/// Clients may send the whole card value; everything beyond the name is
/// ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRef {
    pub name: String,
}

/// A client's attempt to play a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub card: CardRef,
    pub row: usize,
    pub col: usize,
    pub acting_player: String,
}

/// Declarative result of a move attempt.
///
/// Failures carry the human-readable rejection reason and leave the game
/// untouched; successes carry the new game-state value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub success: bool,
    pub message: String,
    pub state: Option<Value>,
}

/// Emitted once per finished game, for whatever persists ratings and
/// match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub match_id: MatchId,
    pub winner: GameOutcome,
    pub final_scores: FinalScores,
}

impl Game {
    /// Serialize the whole game to a plain structured value.
    ///
    /// This is the sole persistence contract: both players' piles, the
    /// grid, the turn marker, winner, scores, and the RNG stream position.
    pub fn to_state_value(&self) -> Result<Value, StateError> {
        serde_json::to_value(self).map_err(|e| StateError::MalformedState(e.to_string()))
    }

    /// Reconstruct a game from a state value.
    ///
    /// Hand entries tagged [`HIDDEN_CARD_TAG`] (inserted by a privacy
    /// filter before the value reached a client) are skipped. Anything
    /// else malformed fails without partially applying.
    pub fn from_state_value(mut value: Value) -> Result<Game, StateError> {
        for side in ["player1", "player2"] {
            let hand = value
                .get_mut(side)
                .and_then(|p| p.get_mut("hand"))
                .and_then(Value::as_array_mut);
            if let Some(hand) = hand {
                hand.retain(|card| {
                    card.get("type").and_then(Value::as_str) != Some(HIDDEN_CARD_TAG)
                });
            }
        }

        serde_json::from_value(value).map_err(|e| StateError::MalformedState(e.to_string()))
    }

    /// Apply a move request, producing a declarative response.
    ///
    /// Total: every input yields either the new state or an unchanged
    /// game plus the rejection reason.
    pub fn apply_move(&mut self, request: &MoveRequest) -> MoveResponse {
        let played = self.play_card(
            &request.card.name,
            request.row,
            request.col,
            &request.acting_player,
        );

        match played {
            Ok(_) => match self.to_state_value() {
                Ok(state) => MoveResponse {
                    success: true,
                    message: "card played".to_string(),
                    state: Some(state),
                },
                Err(err) => MoveResponse {
                    success: false,
                    message: err.to_string(),
                    state: None,
                },
            },
            Err(err) => MoveResponse {
                success: false,
                message: err.to_string(),
                state: None,
            },
        }
    }

    /// The match outcome event, once the game is finished.
    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        Some(MatchOutcome {
            match_id: self.match_id,
            winner: self.winner.clone()?,
            final_scores: self.final_scores.clone()?,
        })
    }
}
