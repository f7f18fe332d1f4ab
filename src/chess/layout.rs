//! Initial piece layouts used to seed a [`crate::chess::board::Board`].
//!
//! A layout is a plain list of placements and the player who moves first. It
//! is deliberately not validated on its own: conflicting placements (two
//! pieces on one square) are only rejected when the board is built from the
//! layout.
//!
//! Layouts can be written in the piece placement part of [Forsyth-Edwards
//! Notation] (FEN), optionally followed by the side to move:
//!
//! ```
//! use arbiter::chess::core::Player;
//! use arbiter::chess::layout::Layout;
//!
//! let layout = Layout::try_from("8/8/8/8/8/8/8/R3K3 b").unwrap();
//! assert_eq!(layout.placements().len(), 2);
//! assert_eq!(layout.side_to_move(), Player::Black);
//! ```
//!
//! [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation

use anyhow::{bail, Context};

use crate::chess::core::{File, Piece, PieceKind, Player, Rank, Square, BOARD_WIDTH};

/// Piece order on the backrank in the standard starting position.
const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A single piece and the square it starts on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    #[allow(missing_docs)]
    pub piece: Piece,
    #[allow(missing_docs)]
    pub square: Square,
}

impl Placement {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(owner: Player, kind: PieceKind, square: Square) -> Self {
        Self {
            piece: Piece::new(owner, kind),
            square,
        }
    }
}

/// Starting layout of a game: which pieces stand where and who moves first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    placements: Vec<Placement>,
    side_to_move: Player,
}

impl Layout {
    /// No pieces, White to move.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            placements: Vec::new(),
            side_to_move: Player::White,
        }
    }

    /// The starting position of the standard chess variant.
    ///
    /// ```
    /// use arbiter::chess::layout::Layout;
    ///
    /// assert_eq!(Layout::standard().placements().len(), 32);
    /// ```
    #[must_use]
    pub fn standard() -> Self {
        let mut layout = Self::empty();
        for player in [Player::White, Player::Black] {
            for (file, kind) in File::ALL.into_iter().zip(BACKRANK) {
                layout.push(Placement::new(
                    player,
                    kind,
                    Square::new(file, Rank::backrank(player)),
                ));
            }
            for file in File::ALL {
                layout.push(Placement::new(
                    player,
                    PieceKind::Pawn,
                    Square::new(file, Rank::pawns_starting(player)),
                ));
            }
        }
        layout
    }

    /// Changes the player who moves first.
    #[must_use]
    pub fn with_side_to_move(mut self, player: Player) -> Self {
        self.side_to_move = player;
        self
    }

    /// Appends a placement. Conflicts with earlier placements are not checked
    /// here.
    pub fn push(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Parses FEN piece placement optionally followed by the side to move
    /// (White if omitted).
    ///
    /// NOTE: This expects properly-formatted inputs: no extra symbols or
    /// additional whitespace. Use [`Layout::try_from`] for cleaning up the
    /// input if it is coming from untrusted source.
    ///
    /// # Errors
    ///
    /// Returns an error if the placement does not have exactly 8 ranks of 8
    /// files, contains unknown piece symbols or the side to move is neither
    /// `w` nor `b`.
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split(' ');
        let mut result = Self::empty();
        let pieces_placement = match parts.next() {
            Some(placement) => placement,
            None => bail!("incorrect layout: missing pieces placement"),
        };
        let mut rank_id = BOARD_WIDTH;
        for rank_fen in pieces_placement.split('/') {
            if rank_id == 0 {
                bail!("incorrect layout: expected 8 ranks, got {pieces_placement}");
            }
            rank_id -= 1;
            let rank = Rank::try_from(rank_id)?;
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                if file >= BOARD_WIDTH {
                    bail!("incorrect layout: rank {rank_fen} exceeds {BOARD_WIDTH} files");
                }
                if let Some(increment) = symbol.to_digit(10) {
                    if increment == 0 {
                        bail!("increment can not be 0");
                    }
                    file = u8::try_from(increment)
                        .ok()
                        .and_then(|increment| file.checked_add(increment))
                        .with_context(|| format!("increment {increment} is too large"))?;
                    continue;
                }
                let piece = Piece::try_from(symbol)
                    .with_context(|| format!("incorrect layout: rank {rank_fen}"))?;
                result.push(Placement {
                    piece,
                    square: Square::new(File::try_from(file)?, rank),
                });
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!(
                    "incorrect layout: rank size should be exactly {BOARD_WIDTH}, got \
                     {rank_fen} of length {file}"
                );
            }
        }
        if rank_id != 0 {
            bail!("incorrect layout: there should be 8 ranks, got {pieces_placement}");
        }
        result.side_to_move = match parts.next() {
            Some(value) => value.try_into()?,
            None => return Ok(result),
        };
        match parts.next() {
            None => Ok(result),
            Some(_) => bail!("trailing symbols are not allowed after the side to move"),
        }
    }
}

impl TryFrom<&str> for Layout {
    type Error = anyhow::Error;

    /// Trims the input and strips the optional `fen ` prefix before parsing it
    /// with [`Layout::from_fen`].
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        match input.strip_prefix("fen ") {
            Some(stripped) => Self::from_fen(stripped.trim_start()),
            None => Self::from_fen(input),
        }
    }
}

impl FromIterator<Placement> for Layout {
    fn from_iter<T: IntoIterator<Item = Placement>>(placements: T) -> Self {
        Self {
            placements: placements.into_iter().collect(),
            side_to_move: Player::White,
        }
    }
}
