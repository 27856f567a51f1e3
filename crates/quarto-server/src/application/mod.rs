//! Application layer use cases for the move server.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure game rules) and the infrastructure (sockets, files, timers).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil one goal (here: "answer one
//!   move request").
//! - **Depend on abstractions** (the `GameEngine` trait) rather than a
//!   concrete engine, so tests can substitute a stub.
//! - **Contain no network I/O and no file system access**.
//!
//! # Sub-modules
//!
//! - **`evaluate_move`** – Validates a decoded request and turns the engine's
//!   answer into a response, or into a silent reject.

pub mod evaluate_move;

pub use evaluate_move::{EvaluateMoveUseCase, Verdict};
