//! Headless input handling: turns pointer events coming from the presentation
//! layer (hovering over a square, pressing on a square) into piece selection,
//! move previews and moves applied to the board.
//!
//! The session is the only place where moves are applied: every move goes
//! through [`rules::is_legal`] first and the board is only mutated if the
//! validator accepted exactly that piece and destination.

use tracing::{debug, info};

use crate::chess::board::{Board, PieceId};
use crate::chess::core::{Player, Square};
use crate::chess::rules;

/// Pointer input over the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The pointer is over the square.
    Hover(Square),
    /// The square was clicked or tapped.
    Press(Square),
}

/// Reaction of the [`Session`] to the input, to be rendered by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do, e.g. hovering while no piece is selected.
    Ignored,
    /// Input arrived while the controlled side is waiting for the opponent.
    OutOfTurn,
    /// The piece is now selected.
    Selected {
        #[allow(missing_docs)]
        piece: PieceId,
        #[allow(missing_docs)]
        square: Square,
    },
    /// Preview of moving the selected piece to the square.
    Highlighted {
        #[allow(missing_docs)]
        square: Square,
        #[allow(missing_docs)]
        legal: bool,
    },
    /// The move was applied and the turn passed to the opponent.
    Moved {
        #[allow(missing_docs)]
        piece: PieceId,
        #[allow(missing_docs)]
        from: Square,
        #[allow(missing_docs)]
        to: Square,
        /// The piece that stood on the destination.
        captured: Option<PieceId>,
    },
    /// The submitted move is not legal, the board is unchanged.
    Rejected {
        #[allow(missing_docs)]
        piece: PieceId,
        #[allow(missing_docs)]
        destination: Square,
    },
}

/// A game in progress together with the selection state of the user.
///
/// ```
/// use arbiter::chess::board::Board;
/// use arbiter::chess::core::Square;
/// use arbiter::session::{Event, Outcome, Session};
///
/// let mut session = Session::new(Board::starting());
/// let pawn = session.board().at(Square::E2).unwrap();
/// assert_eq!(
///     session.handle(Event::Press(Square::E2)),
///     Outcome::Selected { piece: pawn, square: Square::E2 }
/// );
/// assert_eq!(
///     session.handle(Event::Hover(Square::E5)),
///     Outcome::Highlighted { square: Square::E5, legal: false }
/// );
/// assert!(matches!(session.handle(Event::Press(Square::E4)), Outcome::Moved { .. }));
/// assert_eq!(session.selected(), None);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    player: Option<Player>,
    selected: Option<PieceId>,
}

impl Session {
    /// Accepts input for both sides (hot-seat game).
    #[must_use]
    pub const fn new(board: Board) -> Self {
        Self {
            board,
            player: None,
            selected: None,
        }
    }

    /// Accepts input only while it is `player`'s turn.
    #[must_use]
    pub const fn with_player(board: Board, player: Player) -> Self {
        Self {
            board,
            player: Some(player),
            selected: None,
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The side this session accepts input for, `None` for both sides.
    #[must_use]
    pub const fn player(&self) -> Option<Player> {
        self.player
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    /// Drops the current selection, if any.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Reacts to the pointer event.
    ///
    /// Pressing on a piece of the side to move selects it. With a piece
    /// selected, hovering previews the move and pressing on another square
    /// tries to move there: illegal attempts keep the selection.
    pub fn handle(&mut self, event: Event) -> Outcome {
        if !self.accepts_input() {
            return Outcome::OutOfTurn;
        }
        match event {
            Event::Hover(square) => match self.selected {
                Some(piece) => Outcome::Highlighted {
                    square,
                    legal: rules::is_legal(&self.board, piece, square),
                },
                None => Outcome::Ignored,
            },
            Event::Press(square) => {
                if let Some(piece) = self.selectable(square) {
                    self.selected = Some(piece);
                    debug!(%piece, %square, "selected piece");
                    return Outcome::Selected { piece, square };
                }
                let Some(piece) = self.selected else {
                    return Outcome::Ignored;
                };
                match self.submit(piece, square) {
                    Outcome::Rejected { destination, .. } => Outcome::Highlighted {
                        square: destination,
                        legal: false,
                    },
                    outcome => outcome,
                }
            },
        }
    }

    /// Moves the piece to the candidate square if it is the piece owner's turn
    /// and the move is legal. Successful moves clear the selection.
    pub fn submit(&mut self, piece: PieceId, candidate: Square) -> Outcome {
        if !self.accepts_input() {
            return Outcome::OutOfTurn;
        }
        let Some(owner) = self.board.piece(piece).map(|piece| piece.owner) else {
            return Outcome::Rejected {
                piece,
                destination: candidate,
            };
        };
        if owner != self.board.side_to_move() {
            return Outcome::OutOfTurn;
        }
        let (Some(from), true) = (
            self.board.square_of(piece),
            rules::is_legal(&self.board, piece, candidate),
        ) else {
            return Outcome::Rejected {
                piece,
                destination: candidate,
            };
        };
        let captured = self.board.apply_move(piece, candidate);
        self.selected = None;
        info!(%piece, %from, to = %candidate, ?captured, "moved");
        Outcome::Moved {
            piece,
            from,
            to: candidate,
            captured,
        }
    }

    fn accepts_input(&self) -> bool {
        self.player
            .map_or(true, |player| player == self.board.side_to_move())
    }

    /// A piece that belongs to the side to move.
    fn selectable(&self, square: Square) -> Option<PieceId> {
        let id = self.board.at(square)?;
        let piece = self.board.piece(id)?;
        (piece.owner == self.board.side_to_move()).then_some(id)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::layout::Layout;

    #[test]
    fn select_and_move() {
        let mut session = Session::new(Board::starting());
        assert_eq!(session.handle(Event::Hover(Square::E4)), Outcome::Ignored);
        assert_eq!(session.handle(Event::Press(Square::E4)), Outcome::Ignored);
        // Black pieces can not be selected on White's turn.
        assert_eq!(session.handle(Event::Press(Square::E7)), Outcome::Ignored);

        let knight = session.board().at(Square::G1).unwrap();
        assert_eq!(
            session.handle(Event::Press(Square::G1)),
            Outcome::Selected {
                piece: knight,
                square: Square::G1
            }
        );
        assert_eq!(
            session.handle(Event::Hover(Square::F3)),
            Outcome::Highlighted {
                square: Square::F3,
                legal: true
            }
        );
        assert_eq!(
            session.handle(Event::Press(Square::G3)),
            Outcome::Highlighted {
                square: Square::G3,
                legal: false
            }
        );
        assert_eq!(session.selected(), Some(knight));
        assert_eq!(
            session.handle(Event::Press(Square::F3)),
            Outcome::Moved {
                piece: knight,
                from: Square::G1,
                to: Square::F3,
                captured: None
            }
        );
        assert_eq!(session.selected(), None);
        assert_eq!(session.board().side_to_move(), Player::Black);
    }

    #[test]
    fn reselect() {
        let mut session = Session::new(Board::starting());
        let pawn = session.board().at(Square::A2).unwrap();
        let knight = session.board().at(Square::B1).unwrap();
        assert!(matches!(
            session.handle(Event::Press(Square::A2)),
            Outcome::Selected { .. }
        ));
        // Pressing on another own piece switches the selection instead of
        // trying to capture it.
        assert_eq!(
            session.handle(Event::Press(Square::B1)),
            Outcome::Selected {
                piece: knight,
                square: Square::B1
            }
        );
        assert_ne!(session.selected(), Some(pawn));
        session.deselect();
        assert_eq!(session.selected(), None);
        assert_eq!(session.handle(Event::Hover(Square::C3)), Outcome::Ignored);
    }

    #[test]
    fn controlled_side() {
        let mut session = Session::with_player(Board::starting(), Player::Black);
        assert_eq!(session.player(), Some(Player::Black));
        assert_eq!(session.handle(Event::Press(Square::E7)), Outcome::OutOfTurn);
        assert_eq!(session.handle(Event::Hover(Square::E5)), Outcome::OutOfTurn);
        let pawn = session.board().at(Square::E2).unwrap();
        assert_eq!(session.submit(pawn, Square::E4), Outcome::OutOfTurn);
        assert_eq!(session.board(), &Board::starting());
    }

    #[test]
    fn submit() {
        let board = Board::new(&Layout::try_from("4k3/8/8/3p4/4P3/8/8/4K3").unwrap()).unwrap();
        let mut session = Session::new(board);
        let white_pawn = session.board().at(Square::E4).unwrap();
        let black_pawn = session.board().at(Square::D5).unwrap();
        assert_eq!(session.submit(black_pawn, Square::D4), Outcome::OutOfTurn);
        assert_eq!(
            session.submit(white_pawn, Square::F5),
            Outcome::Rejected {
                piece: white_pawn,
                destination: Square::F5
            }
        );
        assert_eq!(
            session.submit(white_pawn, Square::D5),
            Outcome::Moved {
                piece: white_pawn,
                from: Square::E4,
                to: Square::D5,
                captured: Some(black_pawn)
            }
        );
        assert_eq!(session.board().square_of(black_pawn), None);
        assert_eq!(session.board().to_string(), "4k3/8/8/3P4/8/8/8/4K3");
        // Captured pieces can not be moved anymore even on their turn.
        assert_eq!(
            session.submit(black_pawn, Square::D4),
            Outcome::Rejected {
                piece: black_pawn,
                destination: Square::D4
            }
        );
    }
}
