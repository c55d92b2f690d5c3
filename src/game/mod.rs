//! Battle grid and game state machine.
//!
//! ## Key Types
//!
//! - `Grid`: the 3x5 board with adjacency-capture resolution
//! - `Game`: two players, the grid, and the turn state machine
//! - `MoveRequest`/`MoveResponse`/`MatchOutcome`: the data-shaped
//!   boundary with the surrounding application

pub mod grid;
pub mod protocol;
pub mod state;

pub use grid::{Captures, Grid, CELLS, COLS, ROWS};
pub use protocol::{CardRef, MatchOutcome, MoveRequest, MoveResponse};
pub use state::{
    FinalScore, FinalScores, Game, GameOutcome, GameStatus, COMPUTER_PLAYER, STARTING_HAND,
};
