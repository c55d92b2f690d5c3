//! Error taxonomy for the battle engine.
//!
//! Three families:
//!
//! - [`PlayError`]: declarative move rejections. The game state is left
//!   unchanged and the caller decides whether to retry.
//! - [`StateError`]: malformed serialized state or a broken internal
//!   invariant. The engine refuses to proceed rather than partially apply.
//! - [`GameError`]: umbrella for operations that can fail either way.

use thiserror::Error;

/// Why an attempted move was rejected.
///
/// Every variant is a normal, recoverable outcome: the game state is
/// untouched and the message is suitable for showing to the player.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("not your turn")]
    NotYourTurn,

    #[error("card not found in hand")]
    CardNotInHand,

    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell is occupied")]
    CellOccupied,

    #[error("must play a character card first")]
    MustPlayCharacterFirst,

    #[error("the game is already over")]
    GameOver,
}

/// Corrupt or inconsistent game state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    /// A serialized card had an unknown discriminant or missing fields.
    #[error("malformed card data: {0}")]
    MalformedCard(String),

    /// A serialized game state could not be reconstructed.
    #[error("malformed game state: {0}")]
    MalformedState(String),

    /// An internal invariant does not hold (a defect, not a user error).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Umbrella error for engine operations that can fail as either a move
/// rejection or a state defect.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Play(#[from] PlayError),

    #[error(transparent)]
    State(#[from] StateError),
}
