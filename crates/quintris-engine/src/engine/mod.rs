//! Game engine logic and state management.
//!
//! This module provides the high-level game logic that orchestrates the core data
//! structures to implement the placement puzzle:
//!
//! - [`GameSession`] - Whole-game state machine driven by cell activations
//! - [`GameProgress`] - Score, level, lives, and multiplier bookkeeping
//! - [`PieceQueue`] - Two-slot piece lookahead with uniform random spawns
//! - [`QueueSeed`] - Seed for deterministic piece generation
//! - [`Line`] / [`ClearReport`] - Line-clear detection and its result
//!
//! # Game Flow
//!
//! A typical game progresses as follows:
//!
//! 1. Create a [`GameSession`] (optionally seeded) and call [`GameSession::start`]
//! 2. The player rotates or swaps the queued pieces, then activates a cell
//! 3. The activated cell's value increments, the queue advances, completed
//!    lines clear, and progress updates
//! 4. Collaborators drain [`GameSession::take_events`] to react (redraw, audio)
//! 5. Repeat until the last life is lost
//!
//! # Example
//!
//! ```
//! use quintris_engine::GameSession;
//!
//! let mut session = GameSession::new(5, 5);
//! session.start();
//!
//! // Fill the top row to clear one line
//! for column in 0..5 {
//!     session.cell_activated(column, 0)?;
//! }
//!
//! assert_eq!(session.score(), 50);
//! assert_eq!(session.level(), 0);
//! # Ok::<(), quintris_engine::CellActivationError>(())
//! ```

pub use self::{line_clear::*, piece_queue::*, progress::*, session::*};

mod line_clear;
mod piece_queue;
mod progress;
mod session;
