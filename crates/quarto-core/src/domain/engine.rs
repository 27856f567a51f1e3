//! The rule-engine capability consumed by the server.
//!
//! The connection handler never knows *how* a move is chosen or a win is
//! detected.  It only needs the two operations on [`GameEngine`]:
//!
//! - [`GameEngine::is_winning`] – is the snapshot already decided?
//! - [`GameEngine::play_with`]  – place a given piece and report where it
//!   went, which piece the opponent gets next, and whether the move wins.
//!
//! Any implementation can be plugged in behind an `Arc<dyn GameEngine>`,
//! including test doubles that return canned moves.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::game::{cell_position, Game};

/// Value of [`Move::next_piece`] when no piece is left for the opponent.
pub const NO_NEXT_PIECE: u8 = 0xFF;

/// Errors an engine may report from [`GameEngine::play_with`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The requested stash slot is out of range or already empty.
    #[error("stash slot {0} does not hold an available piece")]
    PieceUnavailable(u8),

    /// The board has no empty cell to place the piece on.
    #[error("board is full; no cell left for the piece")]
    BoardFull,
}

/// A placement chosen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Board row of the placed piece (0–3).
    pub row: u8,
    /// Board column of the placed piece (0–3).
    pub col: u8,
    /// Stash index handed to the opponent, or [`NO_NEXT_PIECE`].
    pub next_piece: u8,
}

impl Move {
    /// Creates a move from explicit coordinates.
    pub fn new(row: u8, col: u8, next_piece: u8) -> Self {
        Self {
            row,
            col,
            next_piece,
        }
    }

    /// Creates a move onto a row-major cell index.
    pub fn at_cell(cell: usize, next_piece: u8) -> Self {
        let (row, col) = cell_position(cell);
        Self::new(row, col, next_piece)
    }

    /// Projects the move into the three trailing bytes of a response frame.
    pub fn to_repr(self) -> (u8, u8, u8) {
        (self.row, self.col, self.next_piece)
    }
}

/// Outcome of [`GameEngine::play_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    /// Where the piece went and what the opponent plays next.
    pub placement: Move,
    /// `true` if this placement completes a winning line.
    pub winning: bool,
}

/// A Quarto rule engine.
///
/// Implementations must be `Send + Sync` because one engine instance is
/// shared read-only by every connection task.
pub trait GameEngine: Send + Sync {
    /// Returns `true` if the board in `game` already satisfies the win
    /// condition, before anything is placed.
    fn is_winning(&self, game: &Game) -> bool;

    /// Places the piece in stash slot `index` and reports the result.
    ///
    /// `game` is not modified; the engine works on its own copy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the snapshot does not allow the placement
    /// (the slot is empty, or the board is full).
    fn play_with(&self, game: &Game, index: u8) -> Result<Play, EngineError>;
}

// ── Tests ─────────────────────────────────────────────────────────────────────
