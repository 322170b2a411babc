//! Maze game core: perfect-maze generation and player movement.
//!
//! The [`engine::MazeEngine`] owns the grid, the player and the finish cell;
//! frontends (the bundled terminal one, or anything else) render from its
//! read-only queries and drive it through `move_player`, `generate` and
//! `resize`.

pub mod engine;

pub use engine::{Cell, Direction, MazeEngine, MoveResult, Pos, MAX_SIZE, MIN_SIZE};
