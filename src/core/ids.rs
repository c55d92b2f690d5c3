//! Identifiers shared across the engine boundary.
//!
//! Match ids are threaded explicitly from matchmaking through the game to
//! the outcome event, so a finished game never has to be located by
//! comparing state blobs.

use serde::{Deserialize, Serialize};

/// Identifier of a user known to the surrounding application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user {}", self.0)
    }
}

/// Identifier correlating a game with its match record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "match {}", self.0)
    }
}
