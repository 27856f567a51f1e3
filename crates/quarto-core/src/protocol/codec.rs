//! Binary codec for the Quarto move protocol.
//!
//! Wire format:
//! ```text
//! Request:  [board:16][stash:16][index:1]              33 bytes, fixed
//! Response: [tag:1]                                    tag 0x00
//!           [tag:1][row:1][col:1][next:1]              tag 0x01 / 0x02
//! ```
//! Every field is a single byte, so there is no endianness to negotiate and no
//! length prefix.  Decoding a request is a field-by-field projection: any
//! 33-byte frame decodes, and re-encoding it yields the same 33 bytes.

use thiserror::Error;

use crate::domain::engine::Move;
use crate::domain::game::{Board, Game, Stash, CELL_COUNT};
use crate::domain::piece::PIECE_COUNT;
use crate::protocol::messages::{
    Request, Response, ResponseTag, INDEX_OFFSET, MOVE_RESPONSE_SIZE, NO_MOVE_RESPONSE_SIZE,
    REQUEST_FRAME_SIZE, STASH_OFFSET,
};

/// Errors that can occur while decoding a frame.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// A request frame must be exactly [`REQUEST_FRAME_SIZE`] bytes long.
    #[error("invalid request length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The byte slice is shorter than the frame its tag announces.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The leading tag byte of a response is not a recognized value.
    #[error("unknown response tag: 0x{0:02X}")]
    UnknownTag(u8),

    /// Bytes follow a complete response frame.
    #[error("trailing bytes after response: expected {expected} bytes, got {actual}")]
    TrailingBytes { expected: usize, actual: usize },
}

// ── Requests ──────────────────────────────────────────────────────────────────

impl Request {
    /// Reinterprets a complete request frame.  Never fails.
    pub fn from_frame(frame: &[u8; REQUEST_FRAME_SIZE]) -> Self {
        let mut board = [0u8; CELL_COUNT];
        let mut stash = [0u8; PIECE_COUNT];
        board.copy_from_slice(&frame[..STASH_OFFSET]);
        stash.copy_from_slice(&frame[STASH_OFFSET..INDEX_OFFSET]);
        Self {
            game: Game {
                board: Board::from_bytes(board),
                stash: Stash::from_bytes(stash),
            },
            index: frame[INDEX_OFFSET],
        }
    }

    /// Produces the request frame for this request.
    pub fn to_frame(&self) -> [u8; REQUEST_FRAME_SIZE] {
        let mut frame = [0u8; REQUEST_FRAME_SIZE];
        frame[..STASH_OFFSET].copy_from_slice(&self.game.board.to_bytes());
        frame[STASH_OFFSET..INDEX_OFFSET].copy_from_slice(&self.game.stash.to_bytes());
        frame[INDEX_OFFSET] = self.index;
        frame
    }
}

/// Decodes a request from a byte slice that must be exactly 33 bytes long.
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidLength`] for any other length.  A short
/// slice is never zero-filled.
///
/// # Examples
///
/// ```rust
/// use quarto_core::protocol::codec::{decode_request, encode_request};
/// use quarto_core::{Game, Request};
///
/// let request = Request::new(Game::new(), 3);
/// let bytes = encode_request(&request);
/// assert_eq!(decode_request(&bytes).unwrap(), request);
/// ```
pub fn decode_request(bytes: &[u8]) -> Result<Request, ProtocolError> {
    let frame: &[u8; REQUEST_FRAME_SIZE] =
        bytes.try_into().map_err(|_| ProtocolError::InvalidLength {
            expected: REQUEST_FRAME_SIZE,
            actual: bytes.len(),
        })?;
    Ok(Request::from_frame(frame))
}

/// Encodes a request into its 33-byte frame.
pub fn encode_request(request: &Request) -> [u8; REQUEST_FRAME_SIZE] {
    request.to_frame()
}

// ── Responses ─────────────────────────────────────────────────────────────────

/// Encodes a response into its 1- or 4-byte frame.
///
/// # Examples
///
/// ```rust
/// use quarto_core::protocol::codec::encode_response;
/// use quarto_core::{Move, Response};
///
/// assert_eq!(encode_response(&Response::NoMove), vec![0x00]);
/// assert_eq!(
///     encode_response(&Response::WinningMove(Move::new(1, 2, 3))),
///     vec![0x02, 1, 2, 3]
/// );
/// ```
pub fn encode_response(response: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(response.encoded_len());
    buf.push(response.tag() as u8);
    if let Some(placement) = response.placement() {
        let (row, col, next) = placement.to_repr();
        buf.extend_from_slice(&[row, col, next]);
    }
    buf
}

/// Decodes a complete response frame, as a client would.
///
/// # Errors
///
/// Returns [`ProtocolError`] for an empty slice, an unknown tag, a truncated
/// move frame, or bytes beyond the end of the frame.
pub fn decode_response(bytes: &[u8]) -> Result<Response, ProtocolError> {
    let Some(&tag_byte) = bytes.first() else {
        return Err(ProtocolError::InsufficientData {
            needed: 1,
            available: 0,
        });
    };
    let tag = ResponseTag::try_from(tag_byte).map_err(|_| ProtocolError::UnknownTag(tag_byte))?;

    let expected = match tag {
        ResponseTag::NoMove => NO_MOVE_RESPONSE_SIZE,
        ResponseTag::MoveMade | ResponseTag::WinningMove => MOVE_RESPONSE_SIZE,
    };
    if bytes.len() < expected {
        return Err(ProtocolError::InsufficientData {
            needed: expected,
            available: bytes.len(),
        });
    }
    if bytes.len() > expected {
        return Err(ProtocolError::TrailingBytes {
            expected,
            actual: bytes.len(),
        });
    }

    Ok(match tag {
        ResponseTag::NoMove => Response::NoMove,
        ResponseTag::MoveMade => Response::MoveMade(Move::new(bytes[1], bytes[2], bytes[3])),
        ResponseTag::WinningMove => {
            Response::WinningMove(Move::new(bytes[1], bytes[2], bytes[3]))
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
