//! Board, stash, and the game snapshot that travels in every request.
//!
//! The server is stateless: each request carries the complete [`Game`], and
//! the snapshot is dropped as soon as the response has been written.
//!
//! Cells are addressed either by `(row, col)` or by a row-major cell index
//! `row * 4 + col`.  Stash slots are addressed by index, and a slot index is
//! also the piece's identifier in the wire protocol.

use serde::{Deserialize, Serialize};

use crate::domain::piece::{Piece, PIECE_COUNT};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 4;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Converts a row-major cell index into `(row, col)`.
pub fn cell_position(cell: usize) -> (u8, u8) {
    ((cell / BOARD_SIZE) as u8, (cell % BOARD_SIZE) as u8)
}

// ── Board ─────────────────────────────────────────────────────────────────────

/// The 4×4 playing surface, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Piece; CELL_COUNT],
}

impl Board {
    /// Creates a board with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [Piece::EMPTY; CELL_COUNT],
        }
    }

    /// Reinterprets 16 wire bytes as a board.
    pub fn from_bytes(bytes: [u8; CELL_COUNT]) -> Self {
        Self {
            cells: bytes.map(Piece::from_byte),
        }
    }

    /// Returns the 16 wire bytes for this board.
    pub fn to_bytes(&self) -> [u8; CELL_COUNT] {
        self.cells.map(Piece::to_byte)
    }

    /// Returns the piece at row-major cell index `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= 16`.
    pub fn cell(&self, cell: usize) -> Piece {
        self.cells[cell]
    }

    /// Puts `piece` on row-major cell index `cell`, overwriting what was there.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= 16`.
    pub fn place(&mut self, cell: usize, piece: Piece) {
        self.cells[cell] = piece;
    }

    /// Iterates over the row-major indices of empty cells.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.is_empty())
            .map(|(cell, _)| cell)
    }

    /// Returns `true` when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|piece| !piece.is_empty())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

// ── Stash ─────────────────────────────────────────────────────────────────────

/// The pool of pieces not yet placed on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stash {
    slots: [Piece; PIECE_COUNT],
}

impl Stash {
    /// Creates the starting stash where slot `i` holds piece `i`.
    pub fn full() -> Self {
        let mut slots = [Piece::EMPTY; PIECE_COUNT];
        for (index, slot) in slots.iter_mut().enumerate() {
            *slot = Piece::from_byte(index as u8);
        }
        Self { slots }
    }

    /// Reinterprets 16 wire bytes as a stash.
    pub fn from_bytes(bytes: [u8; PIECE_COUNT]) -> Self {
        Self {
            slots: bytes.map(Piece::from_byte),
        }
    }

    /// Returns the 16 wire bytes for this stash.
    pub fn to_bytes(&self) -> [u8; PIECE_COUNT] {
        self.slots.map(Piece::to_byte)
    }

    /// Returns the slot at `index`, or `None` when `index >= 16`.
    pub fn get(&self, index: u8) -> Option<Piece> {
        self.slots.get(index as usize).copied()
    }

    /// Returns `true` when `index` is in range and its slot holds a piece.
    pub fn is_available(&self, index: u8) -> bool {
        self.get(index).is_some_and(|piece| !piece.is_empty())
    }

    /// Removes and returns the piece at `index`, leaving the slot empty.
    ///
    /// Returns `None` if the slot is out of range or already empty.
    pub fn take(&mut self, index: u8) -> Option<Piece> {
        let slot = self.slots.get_mut(index as usize)?;
        if slot.is_empty() {
            return None;
        }
        Some(std::mem::replace(slot, Piece::EMPTY))
    }

    /// Iterates over the indices of slots that still hold a piece.
    pub fn available_indices(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, piece)| !piece.is_empty())
            .map(|(index, _)| index as u8)
    }

    /// Returns `true` when every slot has been played.
    pub fn is_exhausted(&self) -> bool {
        self.slots.iter().all(|piece| piece.is_empty())
    }
}

impl Default for Stash {
    fn default() -> Self {
        Self::full()
    }
}

// ── Game ──────────────────────────────────────────────────────────────────────

/// A complete game snapshot: what is on the board and what is left to play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub board: Board,
    pub stash: Stash,
}

impl Game {
    /// Creates the starting position: empty board, full stash.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the piece in stash slot `index` onto `cell`.
    ///
    /// Returns the placed piece, or `None` (leaving the game untouched) when
    /// the slot is unavailable.
    pub fn place_from_stash(&mut self, index: u8, cell: usize) -> Option<Piece> {
        let piece = self.stash.take(index)?;
        self.board.place(cell, piece);
        Some(piece)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
