//! # duel-arena
//!
//! A single-process game loop driver for simple real-time games.
//!
//! ## Overview
//!
//! The `duel-arena` library owns a game engine and drives it from one control loop:
//! input collaborators send commands over a channel, a fixed-interval timer ticks
//! the engine, and the caller receives at most one state snapshot per frame to render.
//! The engine itself is never shared, so it needs no locking.
//!
//! ## Example
//!
//! ```rust,no_run
//! use duel_arena::{Arena, ArenaCommand, ArenaConfig, GameEngine, Result, StepResult};
//!
//! struct Counter(u64);
//!
//! impl GameEngine for Counter {
//!     type Action = u64;
//!     type State = u64;
//!     fn process_action(&mut self, action: u64) -> Result<u64> {
//!         self.0 += action;
//!         Ok(self.0)
//!     }
//!     fn tick(&mut self) -> u64 { self.0 }
//!     fn toggle_pause(&mut self) -> u64 { self.0 }
//!     fn reset(&mut self) -> u64 { self.0 = 0; self.0 }
//!     fn current_state(&self) -> u64 { self.0 }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut arena = Arena::new(ArenaConfig::default(), Counter(0))?;
//!     arena.sender().send(ArenaCommand::GameAction(2)).ok();
//!     arena.sender().send(ArenaCommand::Stop).ok();
//!     loop {
//!         match arena.step().await? {
//!             StepResult::GameState(value) => println!("{value}"),
//!             StepResult::Timeout => {}
//!             StepResult::Stop => break,
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod arena;
pub mod config;
pub mod engine;
pub mod error;

// Re-exports for convenience
pub use arena::{Arena, ArenaCommand, StepResult};
pub use config::ArenaConfig;
pub use engine::GameEngine;
pub use error::{ArenaError, Result};
