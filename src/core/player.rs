//! Per-player card containers and draw semantics.
//!
//! A card belongs to exactly one of deck, hand, discard pile, active
//! effect, or a grid cell at any time. The operations here move cards
//! between the player-side containers; the grid side lives in
//! [`crate::game`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::rng::GameRng;

/// Maximum hand size; draws beyond it overflow into the discard pile.
pub const HAND_LIMIT: usize = 10;

/// A player's hand. Bounded by [`HAND_LIMIT`], so it never spills to the heap.
pub type Hand = SmallVec<[Card; HAND_LIMIT]>;

/// What happened to a drawn card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum DrawOutcome {
    /// The card went to the hand.
    Drawn,
    /// Hand was full; the card went to the discard pile instead.
    /// A normal outcome, not an error.
    HandFull,
    /// Deck and discard pile were both empty; nothing changed.
    EmptyDeck,
}

/// One player's side of the battle: name, card piles, and per-turn flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Ordered; the front is the next draw.
    pub deck: Vec<Card>,
    pub hand: Hand,
    pub discard_pile: Vec<Card>,
    /// At most one effect card is active; a new one displaces the old
    /// into the discard pile.
    pub active_effect: Option<Card>,
    /// Reset when the turn ends.
    pub has_played_character: bool,
    pub has_played_special: bool,
}

impl Player {
    /// Create a player with a starting deck and an empty hand.
    #[must_use]
    pub fn new(name: impl Into<String>, deck: Vec<Card>) -> Self {
        Self {
            name: name.into(),
            deck,
            hand: Hand::new(),
            discard_pile: Vec::new(),
            active_effect: None,
            has_played_character: false,
            has_played_special: false,
        }
    }

    /// Draw the front card of the deck.
    ///
    /// An empty deck is refilled from the shuffled discard pile first.
    /// A full hand redirects the drawn card to the discard pile.
    pub fn draw(&mut self, rng: &mut GameRng) -> DrawOutcome {
        if self.deck.is_empty() {
            if self.discard_pile.is_empty() {
                return DrawOutcome::EmptyDeck;
            }
            self.deck = std::mem::take(&mut self.discard_pile);
            rng.shuffle(&mut self.deck);
        }

        let card = self.deck.remove(0);
        if self.hand.len() < HAND_LIMIT {
            self.hand.push(card);
            DrawOutcome::Drawn
        } else {
            self.discard_pile.push(card);
            DrawOutcome::HandFull
        }
    }

    /// Deal the starting hand: `character_count` character cards moved
    /// from deck to hand, remainder reshuffled.
    ///
    /// If the deck holds too few character cards it is reshuffled and
    /// refiltered once (trivially satisfied by today's character-only
    /// decks). `_action_count` is reserved for future deck compositions
    /// and is always 0 in the current game.
    pub fn draw_starting_hand(
        &mut self,
        character_count: usize,
        _action_count: usize,
        rng: &mut GameRng,
    ) {
        let mut indices = self.character_indices();
        if indices.len() < character_count {
            rng.shuffle(&mut self.deck);
            indices = self.character_indices();
        }

        // Remove back-to-front so earlier indices stay valid, then restore
        // deck order in the hand.
        let chosen: Vec<usize> = indices.into_iter().take(character_count).collect();
        let mut drawn: Vec<Card> = chosen
            .into_iter()
            .rev()
            .map(|i| self.deck.remove(i))
            .collect();
        drawn.reverse();
        self.hand.extend(drawn);

        rng.shuffle(&mut self.deck);
    }

    fn character_indices(&self) -> Vec<usize> {
        self.deck
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_character())
            .map(|(i, _)| i)
            .collect()
    }

    /// Remove the first hand card with this name, if present.
    pub fn take_from_hand(&mut self, name: &str) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.name == name)?;
        Some(self.hand.remove(pos))
    }

    /// Clear the per-turn flags at end of turn.
    pub fn reset_turn_flags(&mut self) {
        self.has_played_character = false;
        self.has_played_special = false;
    }

    /// Total cards held across deck, hand, discard, and active effect.
    ///
    /// Together with the player's grid cards this is conserved by every
    /// engine operation.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.hand.len()
            + self.discard_pile.len()
            + usize::from(self.active_effect.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{build_deck, Card, ElementScores, Faction, DECK_SIZE};

    fn character(name: &str) -> Card {
        Card::character(name, Faction::Light, ElementScores::new(1, 1, 1, 1))
    }

    fn player_with_deck(n: usize) -> Player {
        let deck = (0..n).map(|i| character(&format!("C{i}"))).collect();
        Player::new("alice", deck)
    }

    #[test]
    fn test_draw_moves_front_card_to_hand() {
        let mut rng = GameRng::new(42);
        let mut player = player_with_deck(3);

        assert_eq!(player.draw(&mut rng), DrawOutcome::Drawn);
        assert_eq!(player.hand.len(), 1);
        assert_eq!(player.hand[0].name, "C0");
        assert_eq!(player.deck.len(), 2);
    }

    #[test]
    fn test_draw_into_full_hand_goes_to_discard() {
        let mut rng = GameRng::new(42);
        let mut player = player_with_deck(HAND_LIMIT + 1);

        for _ in 0..HAND_LIMIT {
            assert_eq!(player.draw(&mut rng), DrawOutcome::Drawn);
        }
        assert_eq!(player.hand.len(), HAND_LIMIT);

        assert_eq!(player.draw(&mut rng), DrawOutcome::HandFull);
        assert_eq!(player.hand.len(), HAND_LIMIT);
        assert_eq!(player.discard_pile.len(), 1);
    }

    #[test]
    fn test_draw_recycles_discard_pile() {
        let mut rng = GameRng::new(42);
        let mut player = Player::new("alice", Vec::new());
        player.discard_pile.push(character("Buried"));

        assert_eq!(player.draw(&mut rng), DrawOutcome::Drawn);
        assert_eq!(player.hand[0].name, "Buried");
        assert!(player.deck.is_empty());
        assert!(player.discard_pile.is_empty());
    }

    #[test]
    fn test_draw_from_nothing_changes_nothing() {
        let mut rng = GameRng::new(42);
        let mut player = Player::new("alice", Vec::new());

        assert_eq!(player.draw(&mut rng), DrawOutcome::EmptyDeck);
        assert_eq!(player.card_count(), 0);
    }

    #[test]
    fn test_starting_hand_is_characters_only() {
        let mut rng = GameRng::new(42);
        let deck = build_deck(Faction::Dark, &mut rng);
        let mut player = Player::new("bob", deck);

        player.draw_starting_hand(5, 0, &mut rng);

        assert_eq!(player.hand.len(), 5);
        assert!(player.hand.iter().all(|c| c.is_character()));
        assert_eq!(player.deck.len(), DECK_SIZE - 5);
        assert_eq!(player.card_count(), DECK_SIZE);
    }

    #[test]
    fn test_take_from_hand() {
        let mut rng = GameRng::new(42);
        let mut player = player_with_deck(3);
        let _ = player.draw(&mut rng);
        let _ = player.draw(&mut rng);

        let taken = player.take_from_hand("C1").expect("card should be in hand");
        assert_eq!(taken.name, "C1");
        assert_eq!(player.hand.len(), 1);
        assert!(player.take_from_hand("C1").is_none());
    }

    #[test]
    fn test_reset_turn_flags() {
        let mut player = player_with_deck(0);
        player.has_played_character = true;
        player.has_played_special = true;

        player.reset_turn_flags();

        assert!(!player.has_played_character);
        assert!(!player.has_played_special);
    }
}
