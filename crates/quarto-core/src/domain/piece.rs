//! Quarto pieces.
//!
//! A piece is one byte on the wire.  The low four bits encode its attributes,
//! so the 16 valid pieces are exactly the bytes `0x00..=0x0F`.  The reserved
//! byte `0xFF` is the "empty" sentinel used for unoccupied board cells and
//! stash slots that have already been played.
//!
//! ```text
//! bit 3    bit 2    bit 1   bit 0
//! HOLLOW   SQUARE   DARK    TALL
//! ```

use serde::{Deserialize, Serialize};

/// Number of distinct pieces in a Quarto set.
pub const PIECE_COUNT: usize = 16;

/// A single board cell or stash slot value.
///
/// Any byte is representable so that decoding a frame never fails; use
/// [`Piece::attributes`] to find out whether the byte names a real piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece(u8);

impl Piece {
    /// The "no piece here" sentinel.
    pub const EMPTY: Piece = Piece(0xFF);

    pub const TALL: u8 = 0b0001;
    pub const DARK: u8 = 0b0010;
    pub const SQUARE: u8 = 0b0100;
    pub const HOLLOW: u8 = 0b1000;

    /// Mask covering all four attribute bits.
    pub const ATTRIBUTE_MASK: u8 = 0b1111;

    /// Wraps a raw wire byte.
    pub const fn from_byte(byte: u8) -> Self {
        Piece(byte)
    }

    /// Returns the raw wire byte.
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Returns `true` for the empty sentinel.
    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }

    /// Returns the attribute bits, or `None` if this byte is the sentinel or
    /// any other value outside `0x00..=0x0F`.
    pub fn attributes(self) -> Option<u8> {
        if self.0 & !Self::ATTRIBUTE_MASK == 0 {
            Some(self.0)
        } else {
            None
        }
    }

    /// Returns `true` if this is a real piece carrying `attribute`.
    pub fn has(self, attribute: u8) -> bool {
        self.attributes()
            .map(|bits| bits & attribute == attribute)
            .unwrap_or(false)
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<u8> for Piece {
    fn from(byte: u8) -> Self {
        Piece(byte)
    }
}

impl From<Piece> for u8 {
    fn from(piece: Piece) -> Self {
        piece.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
