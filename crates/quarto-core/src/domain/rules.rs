//! Reference Quarto rule engine.
//!
//! # Win condition
//!
//! A line (one of the 4 rows, 4 columns, or 2 diagonals) wins when all four
//! of its cells hold real pieces that share at least one attribute value:
//! either every piece has the attribute bit set, or every piece has it clear.
//!
//! # Move selection
//!
//! [`QuartoEngine::play_with`] picks, in order of preference:
//!
//! 1. A cell where the given piece completes a winning line.
//! 2. If the piece was the last in the stash, the first empty cell with no
//!    next piece.
//! 3. A cell plus a next piece such that the opponent cannot win with that
//!    piece anywhere on the resulting board.
//! 4. The first empty cell and the first available piece.
//!
//! Cells are scanned row-major and pieces in stash order, so the engine is
//! fully deterministic.

use tracing::trace;

use crate::domain::engine::{EngineError, GameEngine, Move, Play, NO_NEXT_PIECE};
use crate::domain::game::{Board, Game};
use crate::domain::piece::Piece;

/// Every line on the board as row-major cell indices.
const LINES: [[usize; 4]; 10] = [
    // Rows
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [12, 13, 14, 15],
    // Columns
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
    // Diagonals
    [0, 5, 10, 15],
    [3, 6, 9, 12],
];

/// The four attributes a line can share.
const ATTRIBUTES: [u8; 4] = [Piece::TALL, Piece::DARK, Piece::SQUARE, Piece::HOLLOW];

/// Returns `true` if the four cells of `line` form a winning line.
fn line_wins(board: &Board, line: &[usize; 4]) -> bool {
    let pieces = line.map(|cell| board.cell(cell));
    if pieces.iter().any(|piece| piece.attributes().is_none()) {
        return false;
    }
    ATTRIBUTES.iter().any(|&attribute| {
        let carrying = pieces.iter().filter(|piece| piece.has(attribute)).count();
        carrying == 0 || carrying == pieces.len()
    })
}

/// Returns `true` if any line on the board wins.
pub fn has_winning_line(board: &Board) -> bool {
    LINES.iter().any(|line| line_wins(board, line))
}

/// Returns `true` if some line passing through `cell` wins.
fn completes_line(board: &Board, cell: usize) -> bool {
    LINES
        .iter()
        .filter(|line| line.contains(&cell))
        .any(|line| line_wins(board, line))
}

/// Returns the first empty cell where placing `piece` wins, if any.
pub fn winning_cell(board: &Board, piece: Piece) -> Option<usize> {
    board.empty_cells().find(|&cell| {
        let mut trial = board.clone();
        trial.place(cell, piece);
        completes_line(&trial, cell)
    })
}

/// The reference rule engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuartoEngine;

impl QuartoEngine {
    pub fn new() -> Self {
        Self
    }
}

impl GameEngine for QuartoEngine {
    fn is_winning(&self, game: &Game) -> bool {
        has_winning_line(&game.board)
    }

    fn play_with(&self, game: &Game, index: u8) -> Result<Play, EngineError> {
        if !game.stash.is_available(index) {
            return Err(EngineError::PieceUnavailable(index));
        }
        if game.board.is_full() {
            return Err(EngineError::BoardFull);
        }

        // Every legal placement of the piece, in row-major cell order.
        let placements: Vec<(usize, Game)> = game
            .board
            .empty_cells()
            .filter_map(|cell| {
                let mut after = game.clone();
                after.place_from_stash(index, cell).map(|_| (cell, after))
            })
            .collect();
        let Some((first_cell, first_after)) = placements.first() else {
            return Err(EngineError::BoardFull);
        };

        if let Some((cell, _)) = placements
            .iter()
            .find(|(cell, after)| completes_line(&after.board, *cell))
        {
            trace!(index, cell, "engine found a winning placement");
            return Ok(Play {
                placement: Move::at_cell(*cell, NO_NEXT_PIECE),
                winning: true,
            });
        }

        if first_after.stash.is_exhausted() {
            trace!(index, cell = first_cell, "last piece placed");
            return Ok(Play {
                placement: Move::at_cell(*first_cell, NO_NEXT_PIECE),
                winning: false,
            });
        }

        for (cell, after) in &placements {
            let safe_next = after.stash.available_indices().find(|&next| {
                after
                    .stash
                    .get(next)
                    .map(|candidate| winning_cell(&after.board, candidate).is_none())
                    .unwrap_or(false)
            });
            if let Some(next) = safe_next {
                trace!(index, cell, next, "engine chose a safe placement");
                return Ok(Play {
                    placement: Move::at_cell(*cell, next),
                    winning: false,
                });
            }
        }

        let next = first_after
            .stash
            .available_indices()
            .next()
            .unwrap_or(NO_NEXT_PIECE);
        trace!(index, cell = first_cell, next, "engine fell back to first free cell");
        Ok(Play {
            placement: Move::at_cell(*first_cell, next),
            winning: false,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
