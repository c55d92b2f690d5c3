//! The game state machine: turn flow, play validation, win detection.
//!
//! ## Lifecycle
//!
//! A game is created with two player names (or one name against the
//! computer), deals each side a five-character starting hand, then accepts
//! `play_card`/`end_turn` until the grid holds all 15 cards. Win detection
//! records the winner and final scores and freezes the game: every later
//! mutation is rejected with [`PlayError::GameOver`].
//!
//! The engine knows nothing about sessions or storage. The caller loads a
//! state value, applies exactly one mutation, and persists the result
//! (read-modify-write per match id).

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::grid::{Captures, Grid, COLS, ROWS};
use crate::cards::{build_deck, Card, CardKind, EffectType, Faction};
use crate::core::{DrawOutcome, GameRng, MatchId, Player};
use crate::errors::{GameError, PlayError, StateError};

/// Name reserved for the deterministic computer opponent.
pub const COMPUTER_PLAYER: &str = "Computer";

/// Starting hand size dealt to each player.
pub const STARTING_HAND: usize = 5;

/// Where a game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// Terminal; further mutation is rejected.
    Finished,
}

/// How a finished game ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner(String),
    Tie,
}

/// One player's captured-card count at game end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub name: String,
    pub cards: u32,
}

/// Both players' final scores, recorded by win detection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScores {
    pub player1: FinalScore,
    pub player2: FinalScore,
}

/// A two-player grid-capture battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub match_id: MatchId,
    pub player1: Player,
    pub player2: Player,
    pub grid: Grid,
    /// Name of the player whose turn it is.
    pub current_turn: String,
    pub winner: Option<GameOutcome>,
    pub final_scores: Option<FinalScores>,
    pub(crate) rng: GameRng,
}

impl Game {
    /// Create a game between two named players and deal starting hands.
    ///
    /// Player 1 gets a Light deck and the first turn, player 2 a Dark
    /// deck. Panics if the names collide; the engine tells the two sides
    /// apart by name alone.
    #[must_use]
    pub fn new(
        match_id: MatchId,
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        seed: u64,
    ) -> Self {
        let player1_name = player1_name.into();
        let player2_name = player2_name.into();
        assert!(
            player1_name != player2_name,
            "player names must be distinct within a game"
        );

        let mut rng = GameRng::new(seed);
        let mut player1 = Player::new(player1_name, build_deck(Faction::Light, &mut rng));
        let mut player2 = Player::new(player2_name, build_deck(Faction::Dark, &mut rng));

        player1.draw_starting_hand(STARTING_HAND, 0, &mut rng);
        player2.draw_starting_hand(STARTING_HAND, 0, &mut rng);

        let current_turn = player1.name.clone();
        Self {
            match_id,
            player1,
            player2,
            grid: Grid::new(),
            current_turn,
            winner: None,
            final_scores: None,
            rng,
        }
    }

    /// Create a game against the computer opponent.
    #[must_use]
    pub fn vs_computer(match_id: MatchId, player_name: impl Into<String>, seed: u64) -> Self {
        Self::new(match_id, player_name, COMPUTER_PLAYER, seed)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.winner.is_some() {
            GameStatus::Finished
        } else {
            GameStatus::InProgress
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status() == GameStatus::Finished
    }

    /// Does either seat belong to the computer placeholder?
    #[must_use]
    pub fn involves_computer(&self) -> bool {
        self.player1.name == COMPUTER_PLAYER || self.player2.name == COMPUTER_PLAYER
    }

    /// Look up a player by name.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&Player> {
        if self.player1.name == name {
            Some(&self.player1)
        } else if self.player2.name == name {
            Some(&self.player2)
        } else {
            None
        }
    }

    /// Total cards across both players' piles and the grid.
    ///
    /// Constant for the lifetime of a game; see the conservation tests.
    #[must_use]
    pub fn total_card_count(&self) -> usize {
        self.player1.card_count() + self.player2.card_count() + self.grid.filled_count()
    }

    /// Play the named hand card for `acting_player`.
    ///
    /// Character cards are placed at (row, col), take ownership, and run
    /// capture resolution; the flipped cells are returned. Action and
    /// effect cards need a character played earlier this turn and ignore
    /// row/col. Every rejection leaves the game unchanged.
    pub fn play_card(
        &mut self,
        card_name: &str,
        row: usize,
        col: usize,
        acting_player: &str,
    ) -> Result<Captures, PlayError> {
        if self.is_finished() {
            return Err(PlayError::GameOver);
        }
        if acting_player != self.current_turn {
            return Err(PlayError::NotYourTurn);
        }

        let acting_is_p1 = acting_player == self.player1.name;
        let (hand_idx, is_character, has_played_character) = {
            let player = if acting_is_p1 { &self.player1 } else { &self.player2 };
            let Some(idx) = player.hand.iter().position(|c| c.name == card_name) else {
                return Err(PlayError::CardNotInHand);
            };
            (idx, player.hand[idx].is_character(), player.has_played_character)
        };

        if is_character {
            if !Grid::in_bounds(row, col) {
                return Err(PlayError::OutOfBounds { row, col });
            }
            if self.grid.get(row, col).is_some() {
                return Err(PlayError::CellOccupied);
            }

            let player = if acting_is_p1 { &mut self.player1 } else { &mut self.player2 };
            let mut card = player.hand.remove(hand_idx);
            card.owner = Some(self.current_turn.clone());
            player.has_played_character = true;
            self.grid.place(row, col, card);
            Ok(self.grid.resolve_captures(row, col))
        } else {
            if !has_played_character {
                return Err(PlayError::MustPlayCharacterFirst);
            }

            let card = {
                let player = if acting_is_p1 { &mut self.player1 } else { &mut self.player2 };
                let card = player.hand.remove(hand_idx);
                player.has_played_special = true;
                card
            };
            self.apply_special_card(card, acting_is_p1);
            Ok(Captures::new())
        }
    }

    /// Apply an action or effect card for the acting player.
    ///
    /// Spent action cards end up in the discard pile so no card is ever
    /// destroyed; a new effect card displaces the previous one there too.
    fn apply_special_card(&mut self, card: Card, acting_is_p1: bool) {
        match &card.kind {
            CardKind::Action { effect_type: EffectType::Boost, value } => {
                let owner = if acting_is_p1 {
                    self.player1.name.clone()
                } else {
                    self.player2.name.clone()
                };
                let value = *value;
                for grid_card in self.grid.iter_mut() {
                    if grid_card.owner.as_deref() != Some(owner.as_str()) {
                        continue;
                    }
                    if let CardKind::Character { elements, .. } = &mut grid_card.kind {
                        elements.boost_all(value);
                    }
                }
                let player = if acting_is_p1 { &mut self.player1 } else { &mut self.player2 };
                player.discard_pile.push(card);
            }
            CardKind::Action { effect_type: EffectType::ExtraDraw, value } => {
                let value = *value;
                let player = if acting_is_p1 { &mut self.player1 } else { &mut self.player2 };
                for _ in 0..value {
                    let _ = player.draw(&mut self.rng);
                }
                player.discard_pile.push(card);
            }
            CardKind::Effect { .. } => {
                // The bonus payload is stored, not applied; resolution
                // reads only character elements.
                let player = if acting_is_p1 { &mut self.player1 } else { &mut self.player2 };
                if let Some(previous) = player.active_effect.take() {
                    player.discard_pile.push(previous);
                }
                player.active_effect = Some(card);
            }
            CardKind::Character { .. } => {
                unreachable!("character cards are placed on the grid, not applied")
            }
        }
    }

    /// End the current player's turn.
    ///
    /// Clears their per-turn flags and draws them a card, then either
    /// concludes the game (full grid) or passes the turn, running the
    /// computer's move immediately when it is next.
    pub fn end_turn(&mut self) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(PlayError::GameOver.into());
        }

        let ending_is_p1 = self.current_turn == self.player1.name;
        let player = if ending_is_p1 { &mut self.player1 } else { &mut self.player2 };
        player.reset_turn_flags();
        if player.draw(&mut self.rng) == DrawOutcome::EmptyDeck {
            debug!(player = %player.name, "no cards left to draw");
        }

        if self.grid.is_full() {
            self.check_winner()?;
            return Ok(());
        }

        self.current_turn = if ending_is_p1 {
            self.player2.name.clone()
        } else {
            self.player1.name.clone()
        };

        if self.current_turn == COMPUTER_PLAYER {
            self.play_computer_turn()?;
        }
        Ok(())
    }

    /// Fixed computer policy: first hand character into the first empty
    /// cell, scanning row-major, then end the turn. No search, no
    /// evaluation.
    fn play_computer_turn(&mut self) -> Result<(), GameError> {
        let computer = if self.player1.name == COMPUTER_PLAYER {
            &self.player1
        } else {
            &self.player2
        };

        if !computer.has_played_character {
            let first_character = computer
                .hand
                .iter()
                .find(|c| c.is_character())
                .map(|c| c.name.clone());
            if let Some(name) = first_character {
                if let Some((row, col)) = self.first_empty_cell() {
                    self.play_card(&name, row, col, COMPUTER_PLAYER)
                        .map_err(GameError::from)?;
                }
            }
        }

        self.end_turn()
    }

    fn first_empty_cell(&self) -> Option<(usize, usize)> {
        (0..ROWS)
            .flat_map(|r| (0..COLS).map(move |c| (r, c)))
            .find(|&(r, c)| self.grid.get(r, c).is_none())
    }

    /// Decide the winner of a full grid and record final scores.
    ///
    /// Owner counts that do not cover every character card on the grid
    /// mean the state is corrupt; the game refuses to conclude.
    fn check_winner(&mut self) -> Result<(), StateError> {
        let p1_cards = self.grid.owner_count(&self.player1.name);
        let p2_cards = self.grid.owner_count(&self.player2.name);
        let characters = self
            .grid
            .iter()
            .filter(|(_, _, card)| card.is_character())
            .count() as u32;

        if p1_cards + p2_cards != characters {
            error!(
                p1_cards,
                p2_cards, characters, "grid owner counts do not cover the character cards"
            );
            return Err(StateError::InvariantViolation(format!(
                "grid owner counts {p1_cards}+{p2_cards} do not cover {characters} character cards"
            )));
        }

        self.winner = Some(if p1_cards > p2_cards {
            GameOutcome::Winner(self.player1.name.clone())
        } else if p2_cards > p1_cards {
            GameOutcome::Winner(self.player2.name.clone())
        } else {
            GameOutcome::Tie
        });
        self.final_scores = Some(FinalScores {
            player1: FinalScore { name: self.player1.name.clone(), cards: p1_cards },
            player2: FinalScore { name: self.player2.name.clone(), cards: p2_cards },
        });

        info!(match_id = %self.match_id, winner = ?self.winner, "game finished");
        Ok(())
    }
}
