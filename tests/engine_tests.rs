//! End-to-end flows through the public API.
//!
//! These tests exercise the whole pipeline the way an application would:
//! matchmaking produces a pairing, a game runs to completion through the
//! move protocol, and the outcome settles into rating profiles.

use grid_clash::{
    Game, GameOutcome, MatchId, MatchmakingQueue, MoveRequest, RatingProfile, UserId,
    CELLS, COMPUTER_PLAYER, STARTING_RATING,
};

/// Row-major first empty cell, the simplest legal placement policy.
fn first_empty(game: &Game) -> (usize, usize) {
    for row in 0..3 {
        for col in 0..5 {
            if game.grid.get(row, col).is_none() {
                return (row, col);
            }
        }
    }
    panic!("grid is full");
}

/// Drive a two-player game to completion with alternating placements.
fn run_to_completion(game: &mut Game) {
    while !game.is_finished() {
        let acting = game.current_turn.clone();
        let (row, col) = first_empty(game);
        let card = game
            .player(&acting)
            .expect("current player exists")
            .hand
            .iter()
            .find(|c| c.is_character())
            .map(|c| c.name.clone())
            .expect("character available");
        game.play_card(&card, row, col, &acting).unwrap();
        game.end_turn().unwrap();
    }
}

#[test]
fn test_queue_to_settled_ratings_pipeline() {
    let queue = MatchmakingQueue::new();
    queue.enqueue(UserId(1), 1000);
    queue.enqueue(UserId(2), 1080);

    let pairing = queue.find_match().expect("close ratings pair up");
    assert_eq!(queue.pairing(pairing.match_id), Some((UserId(1), UserId(2))));

    let mut game = Game::new(pairing.match_id, "alice", "bob", 42);
    run_to_completion(&mut game);

    let outcome = game.outcome().expect("finished game has an outcome");
    assert_eq!(outcome.match_id, pairing.match_id);
    assert_eq!(
        outcome.final_scores.player1.cards + outcome.final_scores.player2.cards,
        CELLS as u32
    );

    let mut p1 = RatingProfile::default();
    let mut p2 = RatingProfile::default();
    assert!(grid_clash::settle_match(&game, &mut p1, &mut p2));

    assert_eq!(p1.games_played, 1);
    assert_eq!(p2.games_played, 1);
    match &outcome.winner {
        GameOutcome::Winner(name) if name == "alice" => {
            assert!(p1.rating > STARTING_RATING);
            assert!(p2.rating < STARTING_RATING);
            assert_eq!(p1.games_won, 1);
        }
        GameOutcome::Winner(_) => {
            assert!(p2.rating > STARTING_RATING);
            assert!(p1.rating < STARTING_RATING);
            assert_eq!(p2.games_won, 1);
        }
        GameOutcome::Tie => {
            assert_eq!(p1.rating, STARTING_RATING);
            assert_eq!(p2.rating, STARTING_RATING);
        }
    }
    // Zero-sum: the total rating pool is unchanged.
    assert_eq!(p1.rating + p2.rating, 2 * STARTING_RATING);
}

#[test]
fn test_move_protocol_drives_a_full_game() {
    let mut game = Game::new(MatchId(7), "alice", "bob", 7);

    while !game.is_finished() {
        let acting = game.current_turn.clone();
        let (row, col) = first_empty(&game);
        let name = game
            .player(&acting)
            .unwrap()
            .hand
            .iter()
            .find(|c| c.is_character())
            .map(|c| c.name.clone())
            .unwrap();

        let response = game.apply_move(&MoveRequest {
            card: grid_clash::CardRef { name },
            row,
            col,
            acting_player: acting.clone(),
        });
        assert!(response.success, "{}", response.message);
        game.end_turn().unwrap();
    }

    assert_eq!(game.grid.filled_count(), CELLS);
    assert!(game.outcome().is_some());
}

#[test]
fn test_computer_match_runs_to_completion() {
    let mut game = Game::vs_computer(MatchId(3), "alice", 11);

    while !game.is_finished() {
        assert_eq!(game.current_turn, "alice");
        let (row, col) = first_empty(&game);
        let card = game
            .player1
            .hand
            .iter()
            .find(|c| c.is_character())
            .map(|c| c.name.clone())
            .expect("character available");
        game.play_card(&card, row, col, "alice").unwrap();
        game.end_turn().unwrap();
    }

    assert!(game.involves_computer());
    assert_eq!(game.player2.name, COMPUTER_PLAYER);
    assert!(game.outcome().is_some());

    // Computer games never touch ratings.
    let mut p1 = RatingProfile::default();
    let mut p2 = RatingProfile::default();
    assert!(!grid_clash::settle_match(&game, &mut p1, &mut p2));
    assert_eq!(p1, RatingProfile::default());
}

#[test]
fn test_same_seed_same_game() {
    let mut first = Game::new(MatchId(1), "alice", "bob", 99);
    let mut second = Game::new(MatchId(1), "alice", "bob", 99);
    assert_eq!(first, second);

    run_to_completion(&mut first);
    run_to_completion(&mut second);
    assert_eq!(first, second);
    assert_eq!(first.winner, second.winner);
}

#[test]
fn test_card_conservation_survives_persistence_round_trips() {
    let mut game = Game::new(MatchId(5), "alice", "bob", 5);

    for _ in 0..6 {
        let acting = game.current_turn.clone();
        let (row, col) = first_empty(&game);
        let card = game
            .player(&acting)
            .unwrap()
            .hand
            .iter()
            .find(|c| c.is_character())
            .map(|c| c.name.clone())
            .unwrap();
        game.play_card(&card, row, col, &acting).unwrap();
        game.end_turn().unwrap();

        // Persist and reload between every move, as the application does.
        let value = game.to_state_value().unwrap();
        game = Game::from_state_value(value).unwrap();
        assert_eq!(game.total_card_count(), 40);
    }
}
