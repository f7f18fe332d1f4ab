//! Movement rules of the standard chess pieces.
//!
//! The validator answers a single question: can this piece go from its square
//! to the destination square on the current board? It knows about piece
//! movement patterns, pieces blocking the way of sliding pieces and captures,
//! but nothing about checks, castling, en passant or promotions: a move that
//! leaves the own king attacked is still legal here.
//!
//! All functions are pure predicates over a [`Board`] snapshot: nothing is
//! mutated, and degenerate inputs resolve to "illegal" instead of errors.

use tracing::{debug, trace};

use crate::chess::board::{Board, PieceId};
use crate::chess::core::{Piece, PieceKind, Player, Rank, Square};
use crate::chess::ray;

bitflags::bitflags! {
    /// Shapes that a displacement between two squares matches. Pawn-specific
    /// shapes are relative to the moving player: "forward" is up the board for
    /// White and down the board for Black.
    ///
    /// | Shape | Δfile | Δrank (forward) |
    /// | ----- | ----- | --------------- |
    /// | Orthogonal | 0 or any | any or 0, not both 0 |
    /// | Diagonal | ±n | ±n, n ≠ 0 |
    /// | Knight jump | ±1 or ±2 | ±2 or ±1 |
    /// | King step | -1..=1 | -1..=1, not both 0 |
    /// | Push | 0 | +1 |
    /// | Double push | 0 | +2 |
    /// | Pawn capture | ±1 | +1 |
    ///
    /// A single displacement often matches several shapes: one square forward
    /// is an orthogonal line, a king step and a pawn push at once.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Geometry: u8 {
        /// Along a file or a rank.
        const ORTHOGONAL = 0b0000_0001;
        /// Along a diagonal.
        const DIAGONAL = 0b0000_0010;
        /// The L-shaped knight move.
        const KNIGHT_JUMP = 0b0000_0100;
        /// To any of the 8 neighbouring squares.
        const KING_STEP = 0b0000_1000;
        /// One square forward.
        const PUSH = 0b0001_0000;
        /// Two squares forward.
        const DOUBLE_PUSH = 0b0010_0000;
        /// One square forward-left or forward-right.
        const PAWN_CAPTURE = 0b0100_0000;

        /// Lines bishops, rooks and queens can use.
        const LINE = Self::ORTHOGONAL.bits() | Self::DIAGONAL.bits();
    }
}

impl Geometry {
    /// Classifies the displacement from `origin` to `destination` made by a
    /// piece of `mover`.
    ///
    /// ```
    /// use arbiter::chess::core::{Player, Square};
    /// use arbiter::chess::rules::Geometry;
    ///
    /// let push = Geometry::classify(Square::E2, Square::E3, Player::White);
    /// assert!(push.contains(Geometry::PUSH | Geometry::ORTHOGONAL | Geometry::KING_STEP));
    /// // The same displacement is a step backwards for Black.
    /// let retreat = Geometry::classify(Square::E2, Square::E3, Player::Black);
    /// assert!(!retreat.contains(Geometry::PUSH));
    /// assert!(Geometry::classify(Square::E2, Square::E2, Player::White).is_empty());
    /// ```
    #[must_use]
    pub fn classify(origin: Square, destination: Square, mover: Player) -> Self {
        let file_delta = destination.file() as i8 - origin.file() as i8;
        let rank_delta = destination.rank() as i8 - origin.rank() as i8;
        let forward = rank_delta * mover.push_direction();
        let (file_distance, rank_distance) = (file_delta.abs(), rank_delta.abs());
        let mut geometry = Self::empty();
        geometry.set(Self::ORTHOGONAL, (file_delta == 0) != (rank_delta == 0));
        geometry.set(
            Self::DIAGONAL,
            file_distance != 0 && file_distance == rank_distance,
        );
        geometry.set(
            Self::KNIGHT_JUMP,
            matches!((file_distance, rank_distance), (1, 2) | (2, 1)),
        );
        geometry.set(Self::KING_STEP, file_distance.max(rank_distance) == 1);
        geometry.set(Self::PUSH, file_delta == 0 && forward == 1);
        geometry.set(Self::DOUBLE_PUSH, file_delta == 0 && forward == 2);
        geometry.set(Self::PAWN_CAPTURE, file_distance == 1 && forward == 1);
        geometry
    }
}

/// Decides whether `piece` standing on `origin` can move to `destination`.
///
/// A missing piece or destination (e.g. nothing is selected yet) is never a
/// legal move. A piece can never move onto a square occupied by a piece of the
/// same color. Otherwise:
///
/// - Pawns advance one square forward onto an empty square, two squares from
///   their starting rank if both squares are empty, and capture one square
///   diagonally forward (only when there is something to capture).
/// - Knights jump in an L shape, kings step to a neighbouring square; neither
///   is blocked by other pieces.
/// - Bishops move diagonally, rooks along files and ranks, queens both ways;
///   every square between the origin and the destination has to be empty.
///
/// `origin` is taken at face value: the board is not consulted to check that
/// the piece actually stands there.
///
/// ```
/// use arbiter::chess::board::Board;
/// use arbiter::chess::core::Square;
/// use arbiter::chess::rules::is_legal_move;
///
/// let board = Board::starting();
/// let pawn = board.occupant(Square::E2);
/// assert!(is_legal_move(&board, pawn, Square::E2, Some(Square::E4)));
/// assert!(!is_legal_move(&board, pawn, Square::E2, Some(Square::E5)));
/// assert!(!is_legal_move(&board, pawn, Square::E2, None));
/// assert!(!is_legal_move(&board, None, Square::E2, Some(Square::E4)));
/// ```
#[must_use]
pub fn is_legal_move(
    board: &Board,
    piece: Option<Piece>,
    origin: Square,
    destination: Option<Square>,
) -> bool {
    let (Some(piece), Some(destination)) = (piece, destination) else {
        return false;
    };
    let target = board.occupant(destination);
    if let Some(target) = target {
        if target.owner == piece.owner {
            debug!(%piece, %origin, %destination, %target, "destination is taken by own piece");
            return false;
        }
    }
    let geometry = Geometry::classify(origin, destination, piece.owner);
    let pattern_matches = match piece.kind {
        PieceKind::Pawn => {
            if geometry.contains(Geometry::PUSH) {
                target.is_none()
            } else if geometry.contains(Geometry::DOUBLE_PUSH) {
                target.is_none()
                    && origin.rank() == Rank::pawns_starting(piece.owner)
                    && is_path_clear(board, origin, destination)
            } else if geometry.contains(Geometry::PAWN_CAPTURE) {
                // Own pieces are ruled out above.
                target.is_some()
            } else {
                false
            }
        },
        PieceKind::Knight => geometry.contains(Geometry::KNIGHT_JUMP),
        PieceKind::King => geometry.contains(Geometry::KING_STEP),
        PieceKind::Bishop => geometry.contains(Geometry::DIAGONAL),
        PieceKind::Rook => geometry.contains(Geometry::ORTHOGONAL),
        PieceKind::Queen => geometry.intersects(Geometry::LINE),
    };
    let legal = pattern_matches
        && (!piece.kind.is_sliding() || is_path_clear(board, origin, destination));
    if legal {
        trace!(%piece, %origin, %destination, "legal move");
    } else {
        debug!(%piece, %origin, %destination, ?geometry, "illegal move");
    }
    legal
}

/// Same as [`is_legal_move`] for a piece on the board: its origin is the square
/// it currently stands on. Captured pieces and handles unknown to the board can
/// not move.
#[must_use]
pub fn is_legal(board: &Board, piece: PieceId, destination: Square) -> bool {
    match board.square_of(piece) {
        Some(origin) => is_legal_move(board, board.piece(piece), origin, Some(destination)),
        None => false,
    }
}

/// All squares the piece can legally move to, in A1..H8 order. Can be used to
/// highlight the options after a piece is selected.
///
/// ```
/// use arbiter::chess::board::Board;
/// use arbiter::chess::core::Square;
/// use arbiter::chess::rules::legal_destinations;
///
/// let board = Board::starting();
/// let knight = board.at(Square::G1).unwrap();
/// assert_eq!(legal_destinations(&board, knight), vec![Square::F3, Square::H3]);
/// ```
#[must_use]
pub fn legal_destinations(board: &Board, piece: PieceId) -> Vec<Square> {
    Square::iter()
        .filter(|&destination| is_legal(board, piece, destination))
        .collect()
}

fn is_path_clear(board: &Board, origin: Square, destination: Square) -> bool {
    match ray::first_blocker(board, origin, destination) {
        Some(blocker) => {
            debug!(%origin, %destination, %blocker, "path is obstructed");
            false
        },
        None => true,
    }
}
