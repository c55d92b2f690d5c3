//! Deck builder: randomized faction starting decks.
//!
//! Decks are character-only by design; action and effect cards enter play
//! through other channels (rewards, future expansions).

use super::card::{Card, ElementScores, Faction};
use crate::core::GameRng;

/// Cards in a freshly built deck.
pub const DECK_SIZE: usize = 20;

/// Inclusive roll range for a favored element.
const FAVORED: (i32, i32) = (2, 5);
/// Inclusive roll range for an unfavored element.
const UNFAVORED: (i32, i32) = (1, 4);

/// Build a shuffled starting deck of [`DECK_SIZE`] character cards.
///
/// Light favors fire and air, Dark favors water and earth; each element
/// score is rolled independently from the faction's range for it.
#[must_use]
pub fn build_deck(faction: Faction, rng: &mut GameRng) -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);

    for i in 1..=DECK_SIZE {
        let name = format!("{faction} Creature {i}");
        deck.push(Card::character(name, faction, roll_elements(faction, rng)));
    }

    rng.shuffle(&mut deck);
    deck
}

fn roll_elements(faction: Faction, rng: &mut GameRng) -> ElementScores {
    let roll = |rng: &mut GameRng, (lo, hi): (i32, i32)| rng.gen_range(lo..hi + 1);

    match faction {
        Faction::Light => ElementScores::new(
            roll(rng, FAVORED),   // fire
            roll(rng, UNFAVORED), // water
            roll(rng, FAVORED),   // air
            roll(rng, UNFAVORED), // earth
        ),
        Faction::Dark => ElementScores::new(
            roll(rng, UNFAVORED),
            roll(rng, FAVORED),
            roll(rng, UNFAVORED),
            roll(rng, FAVORED),
        ),
    }
}
