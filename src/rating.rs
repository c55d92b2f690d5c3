//! Elo-derived skill rating updates.
//!
//! [`update_ratings`] is pure: given the two ratings and each player's
//! games-played count it returns the zero-sum (winner, loser) deltas.
//! [`settle_match`] takes a finished game and applies the deltas to both
//! profiles, clamps to the floor, and bumps the counters. Matches against
//! the computer never touch ratings.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::game::{Game, GameOutcome};

/// Ratings never drop below this.
pub const RATING_FLOOR: i32 = 1;

/// Rating assigned to a brand-new player.
pub const STARTING_RATING: i32 = 1000;

/// A player's persistent rating record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingProfile {
    pub rating: i32,
    pub games_played: u32,
    pub games_won: u32,
}

impl Default for RatingProfile {
    fn default() -> Self {
        Self {
            rating: STARTING_RATING,
            games_played: 0,
            games_won: 0,
        }
    }
}

/// K-factor tier: new players move fast, veterans slowly.
fn k_factor(games_played: u32) -> f64 {
    if games_played < 10 {
        40.0
    } else if games_played < 30 {
        32.0
    } else {
        24.0
    }
}

/// Compute the zero-sum rating deltas for a decisive result.
///
/// The effective K is the lower of the two players' tiers, scaled up for
/// a gap over 400 points and down for a gap under 100. An upset (the
/// winner was rated lower) earns a bonus of a tenth of the gap, capped
/// at 15 points.
#[must_use]
pub fn update_ratings(
    winner_rating: i32,
    loser_rating: i32,
    winner_games: u32,
    loser_games: u32,
) -> (i32, i32) {
    let base_k = k_factor(winner_games).min(k_factor(loser_games));

    let expected = 1.0 / (1.0 + 10f64.powf(f64::from(loser_rating - winner_rating) / 400.0));

    let gap = (winner_rating - loser_rating).abs();
    let k = if gap > 400 {
        base_k * 1.5
    } else if gap < 100 {
        base_k * 0.8
    } else {
        base_k
    };

    let mut delta = (k * (1.0 - expected)).round() as i32;
    if winner_rating < loser_rating {
        let bonus = (f64::from(gap) * 0.1).round() as i32;
        delta += bonus.min(15);
    }

    (delta, -delta)
}

/// Apply a decisive result to both profiles.
pub fn settle(winner: &mut RatingProfile, loser: &mut RatingProfile) {
    let (winner_delta, loser_delta) = update_ratings(
        winner.rating,
        loser.rating,
        winner.games_played,
        loser.games_played,
    );

    winner.rating = (winner.rating + winner_delta).max(RATING_FLOOR);
    loser.rating = (loser.rating + loser_delta).max(RATING_FLOOR);
    winner.games_played += 1;
    loser.games_played += 1;
    winner.games_won += 1;
}

/// Settle a finished match into the two players' rating profiles.
///
/// `profile1`/`profile2` correspond to the game's player 1 and player 2.
/// Computer matches are skipped entirely; ties increment games-played
/// only. Returns whether the profiles were updated.
pub fn settle_match(
    game: &Game,
    profile1: &mut RatingProfile,
    profile2: &mut RatingProfile,
) -> bool {
    if game.involves_computer() {
        return false;
    }
    let Some(outcome) = &game.winner else {
        return false;
    };

    match outcome {
        GameOutcome::Tie => {
            profile1.games_played += 1;
            profile2.games_played += 1;
        }
        GameOutcome::Winner(name) if *name == game.player1.name => settle(profile1, profile2),
        GameOutcome::Winner(_) => settle(profile2, profile1),
    }

    info!(match_id = %game.match_id, "ratings settled");
    true
}
