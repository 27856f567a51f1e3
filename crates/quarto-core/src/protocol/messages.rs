//! Request and response types for the Quarto move protocol.
//!
//! One TCP connection carries exactly one request and at most one response.
//!
//! ```text
//! Request (33 bytes):
//!   [board:16][stash:16][index:1]
//!
//! Response (1 or 4 bytes):
//!   [tag=0x00]                      no move, game already decided
//!   [tag=0x01][row][col][next]      move made, game continues
//!   [tag=0x02][row][col][next]      move made, this move wins
//! ```
//!
//! There is no error frame.  A request whose piece index does not reference an
//! available stash slot is answered by closing the connection without writing
//! anything.

use serde::{Deserialize, Serialize};

use crate::domain::engine::{Move, Play};
use crate::domain::game::{Game, CELL_COUNT};
use crate::domain::piece::{Piece, PIECE_COUNT};

// ── Protocol constants ────────────────────────────────────────────────────────

/// Exact size of a request frame in bytes.
pub const REQUEST_FRAME_SIZE: usize = CELL_COUNT + PIECE_COUNT + 1;

/// Byte offset of the board cells within a request frame.
pub const BOARD_OFFSET: usize = 0;

/// Byte offset of the stash slots within a request frame.
pub const STASH_OFFSET: usize = BOARD_OFFSET + CELL_COUNT;

/// Byte offset of the piece index within a request frame.
pub const INDEX_OFFSET: usize = STASH_OFFSET + PIECE_COUNT;

/// Size of a response frame that carries a move.
pub const MOVE_RESPONSE_SIZE: usize = 4;

/// Size of the bare [`Response::NoMove`] frame.
pub const NO_MOVE_RESPONSE_SIZE: usize = 1;

// ── Response tags ─────────────────────────────────────────────────────────────

/// First byte of every response frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ResponseTag {
    NoMove = 0x00,
    MoveMade = 0x01,
    WinningMove = 0x02,
}

impl TryFrom<u8> for ResponseTag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0x00 => Ok(ResponseTag::NoMove),
            0x01 => Ok(ResponseTag::MoveMade),
            0x02 => Ok(ResponseTag::WinningMove),
            _ => Err(()),
        }
    }
}

// ── Request ───────────────────────────────────────────────────────────────────

/// A complete game snapshot plus the stash index of the piece to place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub game: Game,
    pub index: u8,
}

impl Request {
    pub fn new(game: Game, index: u8) -> Self {
        Self { game, index }
    }

    /// Returns the stash slot the request refers to, or `None` if `index` is
    /// out of range.
    pub fn piece(&self) -> Option<Piece> {
        self.game.stash.get(self.index)
    }

    /// A request is well formed only if its index references a stash slot that
    /// still holds a piece.
    pub fn is_valid(&self) -> bool {
        self.piece().is_some_and(|piece| !piece.is_empty())
    }
}

// ── Response ──────────────────────────────────────────────────────────────────

/// Outcome reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// The game was already decided; nothing was placed.
    NoMove,
    /// The piece was placed and the game continues.
    MoveMade(Move),
    /// The piece was placed and completed a winning line.
    WinningMove(Move),
}

impl Response {
    /// Returns the status tag that leads this response on the wire.
    pub fn tag(&self) -> ResponseTag {
        match self {
            Response::NoMove => ResponseTag::NoMove,
            Response::MoveMade(_) => ResponseTag::MoveMade,
            Response::WinningMove(_) => ResponseTag::WinningMove,
        }
    }

    /// Returns the number of bytes this response occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        match self {
            Response::NoMove => NO_MOVE_RESPONSE_SIZE,
            Response::MoveMade(_) | Response::WinningMove(_) => MOVE_RESPONSE_SIZE,
        }
    }

    /// Returns the placement carried by this response, if any.
    pub fn placement(&self) -> Option<Move> {
        match self {
            Response::NoMove => None,
            Response::MoveMade(mv) | Response::WinningMove(mv) => Some(*mv),
        }
    }
}

impl From<Play> for Response {
    fn from(play: Play) -> Self {
        if play.winning {
            Response::WinningMove(play.placement)
        } else {
            Response::MoveMade(play.placement)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
