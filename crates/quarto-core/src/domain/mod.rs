//! Domain entities for the Quarto move server.
//!
//! This module contains pure game logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain**.  Domain code contains the core rules of
//! the application and never imports networking, storage, or runtime crates.
//! Outer layers (the server's application and infrastructure code) depend on
//! the domain, but the domain never depends on them.
//!
//! Here the domain is split into:
//!
//! - [`piece`]  – a single piece and its four attributes.
//! - [`game`]   – the board, the stash of unplaced pieces, and the game pair.
//! - [`engine`] – the capability the server needs from a rule engine.
//! - [`rules`]  – the reference engine that actually plays Quarto.

pub mod engine;
pub mod game;
pub mod piece;
pub mod rules;
