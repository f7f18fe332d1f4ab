//! Chess board state and the movement rules of the pieces.
//!
//! [`board::Board`] holds the placement of the pieces and the side to move,
//! [`rules`] decides whether a piece can move to a square on that board.

pub mod board;
pub mod core;
pub mod layout;
pub mod ray;
pub mod rules;
