//! Matchmaking: pairing waiting players by rating proximity.
//!
//! [`MatchmakingQueue`] is an explicit service object, constructed once
//! per process and injected into the connection layer rather than held
//! in a global. Each operation takes the internal lock exactly once, so
//! concurrent find-match requests cannot pair the same player twice.
//!
//! Pairing is greedy nearest-available, not globally optimal: the 200
//! point window bounds mismatch severity, and first-found keeps latency
//! low for a live queue.

use std::sync::Mutex;
use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::core::{MatchId, UserId};

/// Maximum rating difference between paired players.
pub const RATING_WINDOW: i32 = 200;

/// A produced pairing, for the caller to notify both parties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pairing {
    pub match_id: MatchId,
    pub player1: UserId,
    pub player2: UserId,
}

#[derive(Clone, Debug)]
struct QueueEntry {
    user: UserId,
    rating: i32,
    enqueued_at: Instant,
    /// Arrival order; breaks rating ties the way enqueue time would,
    /// without depending on clock resolution.
    seq: u64,
}

#[derive(Debug, Default)]
struct QueueInner {
    queue: Vec<QueueEntry>,
    pairings: FxHashMap<MatchId, (UserId, UserId)>,
    next_seq: u64,
    next_match: u64,
}

/// The shared matchmaking queue.
#[derive(Debug, Default)]
pub struct MatchmakingQueue {
    inner: Mutex<QueueInner>,
}

impl MatchmakingQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, QueueInner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Add a player to the queue.
    ///
    /// A player already waiting is re-enqueued fresh: the stale entry is
    /// replaced, not duplicated.
    pub fn enqueue(&self, user: UserId, rating: i32) {
        let mut inner = self.lock();
        inner.queue.retain(|entry| entry.user != user);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.queue.push(QueueEntry {
            user,
            rating,
            enqueued_at: Instant::now(),
            seq,
        });
        debug!(%user, rating, "player enqueued");
    }

    /// Remove a player's entries (disconnect or cancel).
    pub fn dequeue(&self, user: UserId) {
        let mut inner = self.lock();
        inner.queue.retain(|entry| entry.user != user);
    }

    /// Number of players currently waiting.
    #[must_use]
    pub fn waiting(&self) -> usize {
        self.lock().queue.len()
    }

    /// How long a queued player has been waiting, if queued.
    #[must_use]
    pub fn waiting_since(&self, user: UserId) -> Option<Instant> {
        self.lock()
            .queue
            .iter()
            .find(|entry| entry.user == user)
            .map(|entry| entry.enqueued_at)
    }

    /// Pair the first two waiting players within [`RATING_WINDOW`].
    ///
    /// The queue is sorted by (rating, arrival) and scanned over all
    /// pairs (i, j), i < j, in that order; the first pair inside the
    /// window is removed and recorded under a fresh match id. Returns
    /// `None` with the queue untouched when no pair qualifies.
    pub fn find_match(&self) -> Option<Pairing> {
        let mut inner = self.lock();
        if inner.queue.len() < 2 {
            return None;
        }

        inner.queue.sort_by_key(|entry| (entry.rating, entry.seq));

        let (i, j) = find_first_pair(&inner.queue)?;

        // Remove the later index first so the earlier one stays valid.
        let second = inner.queue.remove(j);
        let first = inner.queue.remove(i);

        inner.next_match += 1;
        let match_id = MatchId(inner.next_match);
        inner.pairings.insert(match_id, (first.user, second.user));

        info!(
            %match_id,
            player1 = %first.user,
            player2 = %second.user,
            "match found"
        );
        Some(Pairing {
            match_id,
            player1: first.user,
            player2: second.user,
        })
    }

    /// Look up a previously produced pairing.
    #[must_use]
    pub fn pairing(&self, match_id: MatchId) -> Option<(UserId, UserId)> {
        self.lock().pairings.get(&match_id).copied()
    }
}

fn find_first_pair(queue: &[QueueEntry]) -> Option<(usize, usize)> {
    for i in 0..queue.len() {
        for j in i + 1..queue.len() {
            if (queue[i].rating - queue[j].rating).abs() <= RATING_WINDOW {
                return Some((i, j));
            }
        }
    }
    None
}
