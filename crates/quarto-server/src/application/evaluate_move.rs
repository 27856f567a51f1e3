//! EvaluateMoveUseCase: answers a single decoded move request.
//!
//! The connection handler owns the bytes and the deadlines; this use case owns
//! the decision.  Given a [`Request`] it does exactly one of three things:
//!
//! ```text
//! Stash[index] unavailable  → Verdict::Reject            (close, write nothing)
//! board already winning     → Verdict::Respond(NoMove)
//! otherwise                 → Verdict::Respond(MoveMade | WinningMove)
//! ```
//!
//! # Architecture
//!
//! The engine is injected as an `Arc<dyn GameEngine>`, so this module never
//! names a concrete rule set and is fully unit-testable with a mock engine.

use std::sync::Arc;

use quarto_core::{EngineError, GameEngine, Request, Response};
use tracing::trace;

/// Outcome of evaluating one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The piece index does not reference an available piece.  The caller
    /// must close the connection without writing any bytes.
    Reject,
    /// Write this response, then close.
    Respond(Response),
}

/// Validates requests and dispatches them to the rule engine.
///
/// Cloning is cheap: all clones share the same engine.
#[derive(Clone)]
pub struct EvaluateMoveUseCase {
    engine: Arc<dyn GameEngine>,
}

impl EvaluateMoveUseCase {
    /// Creates a use case backed by `engine`.
    pub fn new(engine: Arc<dyn GameEngine>) -> Self {
        Self { engine }
    }

    /// Evaluates `request` against the engine.
    ///
    /// The win check runs on the board exactly as received, before anything is
    /// placed.  Validation runs before either engine call, so the engine is
    /// never asked to play an unavailable piece.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the engine cannot carry out the placement on
    /// an inconsistent snapshot (for example a full board with pieces still in
    /// the stash).
    pub fn execute(&self, request: &Request) -> Result<Verdict, EngineError> {
        if !request.is_valid() {
            trace!(index = request.index, "piece index is not available");
            return Ok(Verdict::Reject);
        }

        if self.engine.is_winning(&request.game) {
            return Ok(Verdict::Respond(Response::NoMove));
        }

        let play = self.engine.play_with(&request.game, request.index)?;
        Ok(Verdict::Respond(Response::from(play)))
    }
}

impl std::fmt::Debug for EvaluateMoveUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluateMoveUseCase").finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
