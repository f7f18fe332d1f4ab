//! Straight lines on the board. Sliding pieces (and pawns advancing two
//! squares) can not jump over other pieces, so every square between the origin
//! and the destination of such move has to be empty. The destination itself is
//! not part of the path: it may hold a piece that is about to be captured.

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{Square, BOARD_WIDTH};

/// The longest line (A1-H8 diagonal, or any full file or rank) has six squares
/// between its ends.
pub const MAX_BETWEEN: usize = BOARD_WIDTH as usize - 2;

/// Unit step (file, rank) leading from one square to another along a file,
/// rank or diagonal. Returns `None` if the squares are not on a common line or
/// are the same square.
///
/// ```
/// use arbiter::chess::core::Square;
/// use arbiter::chess::ray::direction;
///
/// assert_eq!(direction(Square::A1, Square::A8), Some((0, 1)));
/// assert_eq!(direction(Square::H8, Square::B2), Some((-1, -1)));
/// assert_eq!(direction(Square::B1, Square::C3), None);
/// assert_eq!(direction(Square::E4, Square::E4), None);
/// ```
#[must_use]
pub fn direction(from: Square, to: Square) -> Option<(i8, i8)> {
    let file_delta = to.file() as i8 - from.file() as i8;
    let rank_delta = to.rank() as i8 - from.rank() as i8;
    let orthogonal = (file_delta == 0) != (rank_delta == 0);
    let diagonal = file_delta != 0 && file_delta.abs() == rank_delta.abs();
    (orthogonal || diagonal).then_some((file_delta.signum(), rank_delta.signum()))
}

/// Squares strictly between `from` and `to`, starting next to `from`. Empty if
/// the squares are adjacent or do not share a line.
#[must_use]
pub fn between(from: Square, to: Square) -> ArrayVec<Square, MAX_BETWEEN> {
    let mut squares = ArrayVec::new();
    let Some((file_step, rank_step)) = direction(from, to) else {
        return squares;
    };
    let mut next = from.offset(file_step, rank_step);
    while let Some(square) = next {
        if square == to {
            break;
        }
        squares.push(square);
        next = square.offset(file_step, rank_step);
    }
    squares
}

/// The occupied square closest to `from` on the way to `to`, if any.
#[must_use]
pub fn first_blocker(board: &Board, from: Square, to: Square) -> Option<Square> {
    between(from, to)
        .into_iter()
        .find(|&square| board.at(square).is_some())
}
