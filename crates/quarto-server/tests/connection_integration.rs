//! Integration tests for the move server over real TCP sockets.
//!
//! # Purpose
//!
//! These tests start the accept loop on an ephemeral loopback port with the
//! reference engine and talk to it the way a client would: connect, write 33
//! bytes, read until the server closes.  They verify:
//!
//! - The three response shapes (`0x00`, `0x01 …`, `0x02 …`).
//! - The silent reject: an unavailable piece index yields zero bytes and a
//!   closed connection.
//! - The read deadline: a client that stalls mid-frame is disconnected with
//!   zero bytes written.
//! - Independence: concurrent clients each get their own answer.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use quarto_core::{
    decode_response, encode_request, encode_response, Board, Game, GameEngine, Move,
    QuartoEngine, Request, Response, Stash,
};
use quarto_server::application::EvaluateMoveUseCase;
use quarto_server::domain::ServerConfig;
use quarto_server::infrastructure::network::serve;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

/// A running server plus the flag that stops it.
struct TestServer {
    addr: SocketAddr,
    running: Arc<AtomicBool>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

async fn start_server(read_timeout: Duration) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let running = Arc::new(AtomicBool::new(true));
    let config = ServerConfig {
        bind_addr: addr,
        read_timeout,
        write_timeout: Duration::from_secs(5),
    };
    let use_case = EvaluateMoveUseCase::new(Arc::new(QuartoEngine::new()));
    tokio::spawn(serve(listener, config, use_case, Arc::clone(&running)));
    TestServer { addr, running }
}

/// Sends `bytes` and collects everything the server writes before closing.
async fn exchange(addr: SocketAddr, bytes: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(bytes).await.unwrap();
    let mut reply = Vec::new();
    timeout(Duration::from_secs(5), stream.read_to_end(&mut reply))
        .await
        .expect("server must close the connection")
        .unwrap();
    reply
}

/// Builds a game from a board layout, removing placed pieces from the stash.
fn game_with_board(cells: [u8; 16]) -> Game {
    let mut stash = Stash::full();
    for byte in cells {
        if byte != 0xFF {
            stash.take(byte);
        }
    }
    Game {
        board: Board::from_bytes(cells),
        stash,
    }
}

fn frame(game: Game, index: u8) -> [u8; 33] {
    encode_request(&Request::new(game, index))
}

// ── Responses ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_opening_move_returns_move_made() {
    // Arrange
    let server = start_server(Duration::from_secs(10)).await;

    // Act
    let reply = exchange(server.addr, &frame(Game::new(), 0)).await;

    // Assert
    assert_eq!(reply, vec![0x01, 0, 0, 1]);
    assert_eq!(
        decode_response(&reply),
        Ok(Response::MoveMade(Move::new(0, 0, 1)))
    );
}

#[tokio::test]
async fn test_completing_a_column_returns_winning_move() {
    // Arrange: column 2 holds three solid pieces; 0x03 completes it.
    let server = start_server(Duration::from_secs(10)).await;
    let mut cells = [0xFF; 16];
    cells[2] = 0x00;
    cells[6] = 0x05;
    cells[10] = 0x06;

    // Act
    let reply = exchange(server.addr, &frame(game_with_board(cells), 0x03)).await;

    // Assert
    assert_eq!(reply, vec![0x02, 3, 2, 0xFF]);
}

#[tokio::test]
async fn test_decided_game_returns_single_zero_byte() {
    let server = start_server(Duration::from_secs(10)).await;
    let mut cells = [0xFF; 16];
    cells[8..12].copy_from_slice(&[0x0C, 0x0D, 0x0E, 0x0F]);

    let reply = exchange(server.addr, &frame(game_with_board(cells), 1)).await;

    assert_eq!(reply, vec![0x00]);
}

// ── Silent closes ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unavailable_piece_closes_without_bytes() {
    // Arrange
    let server = start_server(Duration::from_secs(10)).await;
    let mut game = Game::new();
    game.stash.take(4);

    // Act
    let reply = exchange(server.addr, &frame(game, 4)).await;

    // Assert
    assert!(reply.is_empty());
}

#[tokio::test]
async fn test_out_of_range_index_closes_without_bytes() {
    let server = start_server(Duration::from_secs(10)).await;

    let reply = exchange(server.addr, &frame(Game::new(), 0x20)).await;

    assert!(reply.is_empty());
}

#[tokio::test]
async fn test_stalled_client_is_disconnected_after_read_deadline() {
    // Arrange: a short deadline, and a client that sends only part of a frame.
    let server = start_server(Duration::from_millis(200)).await;
    let request = frame(Game::new(), 0);
    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream.write_all(&request[..10]).await.unwrap();

    // Act
    let mut reply = Vec::new();
    let read = timeout(Duration::from_secs(5), stream.read_to_end(&mut reply)).await;

    // Assert: the server closed the socket without writing anything.
    assert!(read.is_ok(), "server must close a stalled connection");
    assert!(reply.is_empty());
}

#[tokio::test]
async fn test_client_closing_early_gets_no_response() {
    let server = start_server(Duration::from_secs(10)).await;
    let request = frame(Game::new(), 0);
    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream.write_all(&request[..16]).await.unwrap();
    stream.shutdown().await.unwrap();

    let mut reply = Vec::new();
    timeout(Duration::from_secs(5), stream.read_to_end(&mut reply))
        .await
        .expect("server must close after early EOF")
        .unwrap();

    assert!(reply.is_empty());
}

// ── Concurrency ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_concurrent_clients_receive_independent_responses() {
    // Arrange: client k has the first k cells of row 0 filled, so every client
    // expects a different placement.  A reply delivered to the wrong socket
    // would not match.
    let server = start_server(Duration::from_secs(10)).await;
    let row_pieces = [0x00, 0x0F, 0x03];
    let requests: Vec<Game> = (0..=row_pieces.len())
        .map(|filled| {
            let mut cells = [0xFF; 16];
            cells[..filled].copy_from_slice(&row_pieces[..filled]);
            game_with_board(cells)
        })
        .collect();
    let expected: Vec<Vec<u8>> = requests
        .iter()
        .map(|game| {
            let play = QuartoEngine.play_with(game, 0x05).unwrap();
            encode_response(&Response::from(play))
        })
        .collect();
    let distinct: HashSet<&Vec<u8>> = expected.iter().collect();
    assert_eq!(distinct.len(), expected.len());

    // Act
    let tasks: Vec<_> = requests
        .into_iter()
        .map(|game| {
            let addr = server.addr;
            tokio::spawn(async move { exchange(addr, &frame(game, 0x05)).await })
        })
        .collect();

    // Assert
    for (client, (task, want)) in tasks.into_iter().zip(&expected).enumerate() {
        let reply = task.await.unwrap();
        assert_eq!(&reply, want, "client {client}");
    }
}

#[tokio::test]
async fn test_stalled_client_does_not_block_others() {
    // Arrange: one client connects and sends nothing.
    let server = start_server(Duration::from_secs(10)).await;
    let _idle = TcpStream::connect(server.addr).await.unwrap();

    // Act
    let reply = timeout(
        Duration::from_secs(2),
        exchange(server.addr, &frame(Game::new(), 0)),
    )
    .await;

    // Assert
    assert_eq!(reply.unwrap(), vec![0x01, 0, 0, 1]);
}
