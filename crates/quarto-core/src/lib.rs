//! # quarto-core
//!
//! Shared library for the Quarto move server containing the game model, the
//! rule-engine abstraction with a reference engine, and the fixed-frame wire
//! codec.
//!
//! It has zero dependencies on sockets or an async runtime, so everything in
//! here can be tested without a network.
//!
//! # Architecture overview
//!
//! Quarto is a two-player game on a 4×4 board with 16 distinct pieces.  Each
//! piece has four binary attributes (tall/short, dark/light, square/round,
//! hollow/solid).  A player wins by completing a row, column, or diagonal of
//! four pieces that share at least one attribute.  The twist: your opponent
//! chooses the piece you must place next.
//!
//! - **`domain`** – The game model (`Piece`, `Board`, `Stash`, `Game`), the
//!   [`GameEngine`] trait the server dispatches to, and [`QuartoEngine`], the
//!   reference implementation of the rules.
//!
//! - **`protocol`** – How bytes travel over the network.  A request is a
//!   fixed 33-byte frame (board, stash, piece index); a response is a 1- or
//!   4-byte frame led by a status tag.

pub mod domain;
pub mod protocol;

pub use domain::engine::{EngineError, GameEngine, Move, Play, NO_NEXT_PIECE};
pub use domain::game::{Board, Game, Stash};
pub use domain::piece::Piece;
pub use domain::rules::QuartoEngine;
pub use protocol::codec::{
    decode_request, decode_response, encode_request, encode_response, ProtocolError,
};
pub use protocol::messages::{Request, Response, ResponseTag, REQUEST_FRAME_SIZE};
