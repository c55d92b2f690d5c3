//! The 3x5 battle grid and adjacency-capture resolution.
//!
//! A cell, once filled, is never cleared: captures flip a card's `owner`,
//! not its occupancy.
//!
//! ## Duel table
//!
//! Each direction compares one fixed element pair between the placed card
//! and its neighbor:
//!
//! - above: Fire vs Fire
//! - below: Water vs Water
//! - left:  Earth vs Earth
//! - right: Air vs Air
//!
//! Ties favor the placing player, and a flipped neighbor does not
//! re-trigger duels (single pass, no cascades).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardKind, Element};

pub const ROWS: usize = 3;
pub const COLS: usize = 5;
/// Total cells; a full grid triggers win detection.
pub const CELLS: usize = ROWS * COLS;

/// Direction deltas and the element duelled in that direction.
const DUEL_TABLE: [(isize, isize, Element); 4] = [
    (-1, 0, Element::Fire),
    (1, 0, Element::Water),
    (0, -1, Element::Earth),
    (0, 1, Element::Air),
];

/// Cells flipped by one placement (at most one per neighbor).
pub type Captures = SmallVec<[(usize, usize); 4]>;

/// The battle grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Option<Card>; COLS]; ROWS],
}

impl Grid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < ROWS && col < COLS
    }

    /// Card at (row, col); `None` for empty or out-of-bounds cells.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Card> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Put a card into a cell. The caller has already validated bounds
    /// and occupancy.
    pub fn place(&mut self, row: usize, col: usize, card: Card) {
        self.cells[row][col] = Some(card);
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled_count() == CELLS
    }

    /// Iterate occupied cells as (row, col, card).
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Card)> {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.as_ref().map(|card| (r, c, card)))
        })
    }

    /// Iterate occupied cells mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cells.iter_mut().flatten().filter_map(Option::as_mut)
    }

    /// Count grid character cards owned by `name`.
    #[must_use]
    pub fn owner_count(&self, name: &str) -> u32 {
        self.iter()
            .filter(|(_, _, card)| card.is_character() && card.owner.as_deref() == Some(name))
            .count() as u32
    }

    /// Run the adjacency duels for a card just placed at (row, col).
    ///
    /// Every opponent-owned character neighbor whose duel element is less
    /// than or equal to the placed card's flips to the placing player and
    /// has its capture flag cleared. Returns the flipped cells.
    pub fn resolve_captures(&mut self, row: usize, col: usize) -> Captures {
        let mut captured = Captures::new();

        let Some(placed) = self.get(row, col) else {
            return captured;
        };
        let CardKind::Character { elements, .. } = placed.kind else {
            return captured;
        };
        let Some(placing_owner) = placed.owner.clone() else {
            return captured;
        };

        for (dr, dc, element) in DUEL_TABLE {
            let Some(nr) = row.checked_add_signed(dr) else { continue };
            let Some(nc) = col.checked_add_signed(dc) else { continue };
            if !Self::in_bounds(nr, nc) {
                continue;
            }

            let Some(neighbor) = self.cells[nr][nc].as_mut() else {
                continue;
            };
            let CardKind::Character { elements: their_elements, .. } = &neighbor.kind else {
                continue;
            };
            if neighbor.owner.as_deref() == Some(placing_owner.as_str()) {
                continue;
            }

            // Greater than or equal: ties go to the placing player.
            if elements.get(element) >= their_elements.get(element) {
                neighbor.owner = Some(placing_owner.clone());
                neighbor.is_captured = false;
                captured.push((nr, nc));
            }
        }

        captured
    }
}
