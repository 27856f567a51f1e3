//! Integration tests for the quarto-core protocol codec.
//!
//! These tests drive the public API the way the server does: decode a request
//! frame, ask the reference engine for a move, and encode the reply.

use quarto_core::{
    decode_request, decode_response, encode_request, encode_response, Board, Game, GameEngine,
    Move, ProtocolError, QuartoEngine, Request, Response, Stash, NO_NEXT_PIECE,
    REQUEST_FRAME_SIZE,
};

/// Builds a frame from a board layout and a piece index, removing every
/// placed piece from the stash.
fn frame_for(board: [u8; 16], index: u8) -> [u8; REQUEST_FRAME_SIZE] {
    let mut stash = Stash::full().to_bytes();
    for byte in board {
        if (byte as usize) < stash.len() {
            stash[byte as usize] = 0xFF;
        }
    }
    let mut frame = [0u8; REQUEST_FRAME_SIZE];
    frame[..16].copy_from_slice(&board);
    frame[16..32].copy_from_slice(&stash);
    frame[32] = index;
    frame
}

/// Runs one request through the reference engine as the server would.
fn respond(frame: &[u8]) -> Option<Response> {
    let request = decode_request(frame).expect("frame must decode");
    if !request.is_valid() {
        return None;
    }
    let engine = QuartoEngine::new();
    if engine.is_winning(&request.game) {
        return Some(Response::NoMove);
    }
    let play = engine
        .play_with(&request.game, request.index)
        .expect("valid request must be playable");
    Some(Response::from(play))
}

#[test]
fn test_opening_request_produces_move_made() {
    // Arrange
    let frame = frame_for([0xFF; 16], 0);

    // Act
    let response = respond(&frame).expect("request is valid");
    let bytes = encode_response(&response);

    // Assert
    assert_eq!(bytes, vec![0x01, 0, 0, 1]);
    assert_eq!(decode_response(&bytes), Ok(response));
}

#[test]
fn test_completing_a_row_produces_winning_move() {
    // Arrange: row 0 holds three dark pieces.
    let mut board = [0xFF; 16];
    board[0] = 0x02;
    board[1] = 0x03;
    board[2] = 0x06;
    let frame = frame_for(board, 0x0A);

    // Act
    let bytes = encode_response(&respond(&frame).unwrap());

    // Assert
    assert_eq!(bytes, vec![0x02, 0, 3, NO_NEXT_PIECE]);
}

#[test]
fn test_already_won_board_produces_single_zero_byte() {
    let mut board = [0xFF; 16];
    board[12..16].copy_from_slice(&[0x08, 0x09, 0x0A, 0x0B]);
    let frame = frame_for(board, 0);

    assert_eq!(encode_response(&respond(&frame).unwrap()), vec![0x00]);
}

#[test]
fn test_index_of_played_piece_is_rejected() {
    let mut board = [0xFF; 16];
    board[6] = 0x04;
    let frame = frame_for(board, 0x04);

    assert_eq!(respond(&frame), None);
}

#[test]
fn test_index_out_of_range_is_rejected() {
    let frame = frame_for([0xFF; 16], 16);
    assert_eq!(respond(&frame), None);
}

#[test]
fn test_request_encode_decode_preserves_snapshot() {
    let mut board = [0xFF; 16];
    board[9] = 0x0E;
    let request = Request::new(
        Game {
            board: Board::from_bytes(board),
            stash: Stash::full(),
        },
        3,
    );

    let decoded = decode_request(&encode_request(&request)).unwrap();

    assert_eq!(decoded, request);
}

#[test]
fn test_truncated_request_is_not_zero_filled() {
    let frame = frame_for([0xFF; 16], 0);
    assert_eq!(
        decode_request(&frame[..32]),
        Err(ProtocolError::InvalidLength {
            expected: REQUEST_FRAME_SIZE,
            actual: 32
        })
    );
}

#[test]
fn test_move_response_bytes_follow_row_col_next_order() {
    let bytes = encode_response(&Response::MoveMade(Move::new(2, 1, 7)));
    assert_eq!(bytes[1..], [2, 1, 7]);
}
