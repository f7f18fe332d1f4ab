//! Square-centric board state: every square knows which piece occupies it and
//! every piece knows which square it stands on.
//!
//! Pieces are stored in a roster owned by the [`Board`] and referred to by
//! [`PieceId`] handles. A handle stays valid for the whole game: the presentation
//! layer can keep a handle for a piece it renders and ask the board where that
//! piece is now (or whether it was captured). The two directions of the
//! piece-square relationship are only ever changed together, in
//! [`Board::new`] and [`Board::apply_move`].

use std::fmt::{self, Write};

use anyhow::bail;
use arrayvec::ArrayVec;
use tracing::trace;

use crate::chess::core::{File, Piece, Player, Rank, Square, BOARD_SIZE};
use crate::chess::layout::Layout;

/// Each piece needs its own square, so the roster can never outgrow the board.
const MAX_PIECES: usize = BOARD_SIZE as usize;

/// Handle of a piece placed on a [`Board`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(u8);

impl PieceId {
    /// Position of the piece in the board's roster.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct RosterEntry {
    piece: Piece,
    /// `None` once the piece is captured.
    square: Option<Square>,
}

/// Current state of the game: placement of all pieces and the player to move.
///
/// The board is a single snapshot without history. It is only mutated by
/// [`Board::apply_move`] which expects the move to be validated beforehand
/// (see [`crate::chess::rules`]).
///
/// ```
/// use arbiter::chess::board::Board;
/// use arbiter::chess::core::{Player, Square};
///
/// let mut board = Board::starting();
/// let pawn = board.at(Square::E2).unwrap();
/// assert_eq!(board.apply_move(pawn, Square::E4), None);
/// assert_eq!(board.at(Square::E4), Some(pawn));
/// assert_eq!(board.at(Square::E2), None);
/// assert_eq!(board.side_to_move(), Player::Black);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<PieceId>; BOARD_SIZE as usize],
    roster: ArrayVec<RosterEntry, MAX_PIECES>,
    side_to_move: Player,
}

impl Board {
    /// Places every piece of the layout on its square, all other squares stay
    /// empty. The layout also decides who moves first.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout puts more than one piece on a square.
    pub fn new(layout: &Layout) -> anyhow::Result<Self> {
        let mut board = Self::empty();
        board.side_to_move = layout.side_to_move();
        for placement in layout.placements() {
            if let Some(existing) = board.occupant(placement.square) {
                bail!(
                    "layout puts both {existing} and {} on {}",
                    placement.piece,
                    placement.square
                );
            }
            // Squares are distinct at this point, so the roster has room.
            let id = PieceId(u8::try_from(board.roster.len())?);
            board.roster.push(RosterEntry {
                piece: placement.piece,
                square: Some(placement.square),
            });
            board.cells[placement.square.index()] = Some(id);
        }
        debug_assert!(board.is_consistent());
        Ok(board)
    }

    /// The starting position of the standard chess variant, White to move.
    #[must_use]
    pub fn starting() -> Self {
        Self::new(&Layout::standard()).expect("standard layout has no conflicting placements")
    }

    /// Board without any pieces, White to move.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [None; BOARD_SIZE as usize],
            roster: ArrayVec::new(),
            side_to_move: Player::White,
        }
    }

    /// Handle of the piece standing on the square, if any.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<PieceId> {
        self.cells[square.index()]
    }

    /// The piece standing on the square, if any.
    #[must_use]
    pub fn occupant(&self, square: Square) -> Option<Piece> {
        self.at(square).and_then(|id| self.piece(id))
    }

    /// Color and kind of the piece. Captured pieces are still known to the
    /// board; `None` is only returned for handles of a different board.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<Piece> {
        self.roster.get(id.index()).map(|entry| entry.piece)
    }

    /// Square the piece stands on or `None` if it was captured.
    #[must_use]
    pub fn square_of(&self, id: PieceId) -> Option<Square> {
        self.roster.get(id.index()).and_then(|entry| entry.square)
    }

    /// Iterates over the pieces on the board in square order (A1..H8).
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, Piece, Square)> + '_ {
        Square::iter().filter_map(|square| {
            let id = self.at(square)?;
            Some((id, self.piece(id)?, square))
        })
    }

    /// The player whose input is currently accepted.
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Relocates a piece to the destination square, removing the piece that
    /// stood there (if any), and passes the turn to the opponent. Returns the
    /// captured piece.
    ///
    /// The move is expected to be validated by the caller: the only checks
    /// performed here guard the consistency of the board.
    ///
    /// # Panics
    ///
    /// Panics if the piece is not on the board, if the move does not change its
    /// square or if the destination holds a piece of the same color.
    pub fn apply_move(&mut self, piece: PieceId, destination: Square) -> Option<PieceId> {
        let Some(entry) = self.roster.get(piece.index()).copied() else {
            panic!("can not move unknown piece {piece}");
        };
        let Some(origin) = entry.square else {
            panic!("can not move captured piece {piece} ({})", entry.piece);
        };
        assert_eq!(
            self.cells[origin.index()],
            Some(piece),
            "{origin} does not hold the moving piece {piece}"
        );
        assert_ne!(
            origin, destination,
            "{} on {origin} has to leave its square",
            entry.piece
        );
        let captured = self.cells[destination.index()];
        if let Some(captured) = captured {
            let victim = &mut self.roster[captured.index()];
            assert_ne!(
                victim.piece.owner, entry.piece.owner,
                "{} on {origin} can not capture {} on {destination}",
                entry.piece, victim.piece
            );
            victim.square = None;
        }
        self.cells[origin.index()] = None;
        self.cells[destination.index()] = Some(piece);
        self.roster[piece.index()].square = Some(destination);
        self.side_to_move = self.side_to_move.opponent();
        trace!(%piece, %origin, %destination, ?captured, "applied move");
        debug_assert!(self.is_consistent());
        captured
    }

    /// Checks that pieces and squares refer to each other: every occupied
    /// square is the one its piece believes to stand on and vice versa.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let squares_agree = Square::iter().all(|square| match self.at(square) {
            Some(id) => self.square_of(id) == Some(square),
            None => true,
        });
        let roster_agrees = self.roster.iter().enumerate().all(|(index, entry)| {
            entry
                .square
                .map_or(true, |square| self.at(square).map(PieceId::index) == Some(index))
        });
        squares_agree && roster_agrees
    }
}

impl fmt::Display for Board {
    /// Prints piece placement in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            let mut empty_squares = 0i32;
            for file in File::ALL {
                if let Some(piece) = self.occupant(Square::new(file, rank)) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for file in File::ALL {
                match self.occupant(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != File::H {
                    f.write_str(SQUARE_SEPARATOR)?;
                }
            }
            f.write_str(LINE_SEPARATOR)?;
        }
        write!(f, "Player to move: {:?}", self.side_to_move)
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::PieceKind;
    use crate::chess::layout::Placement;

    fn setup(input: &str) -> Board {
        let layout = Layout::try_from(input);
        assert!(layout.is_ok(), "input: {input}");
        let board = Board::new(&layout.unwrap());
        assert!(board.is_ok(), "input: {input}");
        board.unwrap()
    }

    #[test]
    fn starting_board() {
        let board = Board::starting();
        assert_eq!(
            board.to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.side_to_move(), Player::White);
        assert!(board.is_consistent());
    }

    #[test]
    fn placement_roundtrip() {
        for placement in [
            "2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4",
            "r3k3/5p2/2p5/p7/P3r3/2N2n2/1PP2P2/2K2B2",
            "8/8/8/8/2P5/3k4/8/KB6",
            "8/8/8/8/8/8/8/8",
        ] {
            assert_eq!(setup(placement).to_string(), placement);
        }
    }

    #[test]
    fn queries() {
        let board = setup("4k3/8/8/8/3P4/8/8/R3K3 b");
        assert_eq!(board.side_to_move(), Player::Black);
        let rook = board.at(Square::A1).unwrap();
        assert_eq!(
            board.piece(rook),
            Some(Piece::new(Player::White, PieceKind::Rook))
        );
        assert_eq!(board.square_of(rook), Some(Square::A1));
        assert_eq!(
            board.occupant(Square::E8),
            Some(Piece::new(Player::Black, PieceKind::King))
        );
        assert_eq!(board.occupant(Square::E4), None);
        assert_eq!(board.piece(PieceId(42)), None);
        assert_eq!(board.square_of(PieceId(42)), None);
        assert_eq!(
            board
                .pieces()
                .map(|(_, _, square)| square)
                .collect::<Vec<_>>(),
            vec![Square::A1, Square::E1, Square::D4, Square::E8]
        );
    }

    #[test]
    fn duplicate_placement() {
        let layout: Layout = [
            Placement::new(Player::White, PieceKind::Rook, Square::A1),
            Placement::new(Player::Black, PieceKind::Knight, Square::A1),
        ]
        .into_iter()
        .collect();
        let error = Board::new(&layout).unwrap_err();
        assert_eq!(error.to_string(), "layout puts both R and n on a1");
    }

    #[test]
    fn capture() {
        let mut board = setup("4k3/8/8/8/8/8/8/r3K2R w");
        let white_rook = board.at(Square::H1).unwrap();
        let black_rook = board.at(Square::A1).unwrap();
        assert_eq!(board.apply_move(white_rook, Square::A1), Some(black_rook));
        assert_eq!(board.at(Square::A1), Some(white_rook));
        assert_eq!(board.at(Square::H1), None);
        assert_eq!(board.square_of(black_rook), None);
        assert_eq!(
            board.piece(black_rook),
            Some(Piece::new(Player::Black, PieceKind::Rook))
        );
        assert_eq!(board.pieces().count(), 3);
        assert_eq!(board.to_string(), "4k3/8/8/8/8/8/8/R3K3");
        assert!(board.is_consistent());
    }

    #[test]
    fn turn_alternates() {
        let mut board = Board::starting();
        let moves = [
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::G1, Square::F3),
            (Square::B8, Square::C6),
        ];
        let mut expected = Player::White;
        for (from, to) in moves {
            assert_eq!(board.side_to_move(), expected);
            let piece = board.at(from).unwrap();
            assert_eq!(board.apply_move(piece, to), None);
            expected = expected.opponent();
        }
        assert_eq!(board.side_to_move(), Player::White);
    }

    #[test]
    fn debug_dump() {
        let board = setup("4k3/8/8/8/8/8/8/4K3");
        assert_eq!(
            format!("{board:?}"),
            ". . . . k . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . K . . .\n\
             Player to move: White"
        );
    }

    #[test]
    #[should_panic(expected = "can not move captured piece")]
    fn move_captured_piece() {
        let mut board = setup("4k3/8/8/8/8/8/8/r3K2R w");
        let white_rook = board.at(Square::H1).unwrap();
        let black_rook = board.at(Square::A1).unwrap();
        assert_eq!(board.apply_move(white_rook, Square::A1), Some(black_rook));
        let _ = board.apply_move(black_rook, Square::A2);
    }

    #[test]
    #[should_panic(expected = "can not capture")]
    fn capture_own_piece() {
        let mut board = setup("4k3/8/8/8/8/8/8/R3K3 w");
        let rook = board.at(Square::A1).unwrap();
        let _ = board.apply_move(rook, Square::E1);
    }

    #[test]
    #[should_panic(expected = "has to leave its square")]
    fn null_move() {
        let mut board = setup("4k3/8/8/8/8/8/8/R3K3 w");
        let rook = board.at(Square::A1).unwrap();
        let _ = board.apply_move(rook, Square::A1);
    }

    #[test]
    #[should_panic(expected = "unknown piece")]
    fn unknown_piece() {
        let mut board = Board::empty();
        let _ = board.apply_move(PieceId(0), Square::A1);
    }
}
