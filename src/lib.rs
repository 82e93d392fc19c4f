//! # 8-Puzzle Solver Library
//!
//! This library provides the board model for the 3x3 sliding tile puzzle and
//! a search engine that finds move sequences turning a start board into a
//! goal board.
//!
//! It is used by three binaries:
//! - `ai_solver`: Solves a puzzle given on the command line, in a file, or
//!   generated from a seeded scramble, and prints the moves.
//! - `heuristic_evaluator`: Compares strategies and heuristics over a batch
//!   of seeded scrambles.
//! - `human_player`: Lets a person slide tiles interactively, with hints.
//!
//! ## Modules
//! - `engine`: The board (`Board`), moves (`Move`), move generation, parity,
//!   and an interactive session type (`Game`).
//! - `heuristics`: Distance-to-goal estimates for best-first search.
//! - `solver`: Depth-first, breadth-first and best-first search (`Solver`).
//! - `tree`: The node arena searches grow, and path reconstruction.
//! - `observer`: The per-expansion progress and cancellation interface.
//! - `utils`: Parsing boards and puzzles from text.
//! - `error`: The crate's error type.
//! - `logging`: The stderr logger the binaries install.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod logging;
pub mod observer;
pub mod solver;
pub mod tree;
pub mod utils;

pub use error::{Error, Result};
