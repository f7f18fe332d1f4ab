//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::mem;

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// A candidate move: whatever stands on `from` goes to `to`. The move itself
/// carries no piece information and is not necessarily legal: it is a request
/// that [`crate::chess::rules`] decides on.
///
/// The text representation is the coordinate notation used by UCI, e.g.
/// `e2e4`.
///
/// ```
/// use arbiter::chess::core::{Move, Square};
///
/// let candidate = Move::from_uci("g1f3").unwrap();
/// assert_eq!(candidate.from(), Square::G1);
/// assert_eq!(candidate.to(), Square::F3);
/// assert_eq!(candidate.to_string(), "g1f3");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Origin of the move.
    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Destination of the move.
    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Parses a move in coordinate notation (`<from><to>`, e.g. `e2e4`).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly two valid squares.
    pub fn from_uci(input: &str) -> anyhow::Result<Self> {
        if !input.is_ascii() || input.len() != 4 {
            bail!("move should be 4 ASCII chars (e.g. e2e4), got '{input}'");
        }
        let (from, to) = input.split_at(2);
        Ok(Self::new(from.try_into()?, to.try_into()?))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Board squares (cells): from left to right, from bottom to the top:
///
/// ```
/// use arbiter::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use arbiter::chess::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        unsafe { mem::transmute(file as u8 + (rank as u8) * BOARD_WIDTH) }
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        unsafe { mem::transmute(self as u8 % BOARD_WIDTH) }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        unsafe { mem::transmute(self as u8 / BOARD_WIDTH) }
    }

    /// Position of the square in A1..H8 order, suitable for indexing
    /// [`BOARD_SIZE`]-long arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the square shifted by the given number of files and ranks or
    /// `None` if the result falls off the board.
    ///
    /// ```
    /// use arbiter::chess::core::Square;
    ///
    /// assert_eq!(Square::E2.offset(0, 2), Some(Square::E4));
    /// assert_eq!(Square::B1.offset(1, 2), Some(Square::C3));
    /// assert_eq!(Square::H8.offset(1, 0), None);
    /// assert_eq!(Square::A1.offset(0, -1), None);
    /// ```
    #[must_use]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = u8::try_from((self.file() as i8).checked_add(file_delta)?).ok()?;
        let rank = u8::try_from((self.rank() as i8).checked_add(rank_delta)?).ok()?;
        Some(Self::new(
            File::try_from(file).ok()?,
            Rank::try_from(rank).ok()?,
        ))
    }

    /// Iterates over all squares in A1..H8 order.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..BOARD_SIZE).map(|index| unsafe { mem::transmute::<u8, Self>(index) })
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        // Exclusive range patterns are not allowed:
        // https://github.com/rust-lang/rust/issues/37854
        const MAX_INDEX: u8 = BOARD_SIZE - 1;
        match square_index {
            0..=MAX_INDEX => Ok(unsafe { mem::transmute::<u8, Self>(square_index) }),
            _ => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files from [`File::A`] to [`File::H`].
    pub const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(Self::ALL[usize::from(file as u8 - b'a')]),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match column {
            0..=7 => Ok(Self::ALL[usize::from(column)]),
            _ => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    /// All ranks from [`Rank::One`] to [`Rank::Eight`].
    pub const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    /// The rank pawns of the given player start on. Only from there can a pawn
    /// advance two squares at once.
    #[must_use]
    pub const fn pawns_starting(player: Player) -> Self {
        match player {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }

    /// The rank pieces (other than pawns) of the given player start on.
    #[must_use]
    pub const fn backrank(player: Player) -> Self {
        match player {
            Player::White => Self::One,
            Player::Black => Self::Eight,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(Self::ALL[usize::from(rank as u8 - b'1')]),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match row {
            0..=7 => Ok(Self::ALL[usize::from(row)]),
            _ => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank delta of a single step "forward" from the player's perspective:
    /// pawns of White move up the board, pawns of Black move down.
    #[must_use]
    pub const fn push_direction(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Human-readable lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Bishops, rooks and queens move along lines and can not jump over other
    /// pieces.
    #[must_use]
    pub const fn is_sliding(self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Queen)
    }
}

impl TryFrom<char> for PieceKind {
    type Error = anyhow::Error;

    /// Parses a lowercase algebraic symbol.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol {
            'k' => Ok(Self::King),
            'q' => Ok(Self::Queen),
            'r' => Ok(Self::Rook),
            'b' => Ok(Self::Bishop),
            'n' => Ok(Self::Knight),
            'p' => Ok(Self::Pawn),
            _ => bail!("piece kind symbol should be within \"kqrbnp\", got '{symbol}'"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    /// Parses a FEN piece symbol: uppercase for White, lowercase for Black.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        match PieceKind::try_from(symbol.to_ascii_lowercase()) {
            Ok(kind) => Ok(Self { owner, kind }),
            Err(_) => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        f.write_char(match self.owner {
            // White player: uppercase symbols.
            Player::White => symbol.to_ascii_uppercase(),
            // Black player: lowercase symbols.
            Player::Black => symbol,
        })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn square_coordinates() {
        assert_eq!(Square::new(File::D, Rank::Two), Square::D2);
        assert_eq!(Square::G7.file(), File::G);
        assert_eq!(Square::G7.rank(), Rank::Seven);
        assert_eq!(Square::H8.index(), 63);
        assert_eq!(Square::iter().count(), usize::from(BOARD_SIZE));
        assert_eq!(Square::iter().next(), Some(Square::A1));
        assert_eq!(Square::iter().next_back(), Some(Square::H8));
    }

    #[test]
    fn square_offsets() {
        assert_eq!(Square::D4.offset(1, 1), Some(Square::E5));
        assert_eq!(Square::D4.offset(-3, -3), Some(Square::A1));
        assert_eq!(Square::D4.offset(-4, 0), None);
        assert_eq!(Square::D4.offset(0, 5), None);
        assert_eq!(Square::H1.offset(1, 1), None);
    }

    #[test]
    fn parse_squares() {
        assert_eq!(Square::try_from("a1").unwrap(), Square::A1);
        assert_eq!(Square::try_from("e4").unwrap(), Square::E4);
        assert_eq!(Square::try_from("h8").unwrap(), Square::H8);
        assert_eq!(Square::E4.to_string(), "e4");
        assert!(Square::try_from("i1").is_err());
        assert!(Square::try_from("a9").is_err());
        assert!(Square::try_from("a").is_err());
        assert!(Square::try_from("a11").is_err());
        assert!(Square::try_from("").is_err());
        assert!(Square::try_from(64u8).is_err());
        assert_eq!(Square::try_from(28u8).unwrap(), Square::E4);
    }

    #[test]
    fn parse_moves() {
        assert_eq!(
            Move::from_uci("e2e4").unwrap(),
            Move::new(Square::E2, Square::E4)
        );
        assert!(Move::from_uci("e2e").is_err());
        assert!(Move::from_uci("e2e4q").is_err());
        assert!(Move::from_uci("e2z4").is_err());
        // Don't crash on multi-byte symbols.
        assert!(Move::from_uci("e2é").is_err());
    }

    #[test]
    fn piece_symbols() {
        let white_knight = Piece::try_from('N').unwrap();
        assert_eq!(white_knight, Piece::new(Player::White, PieceKind::Knight));
        assert_eq!(white_knight.to_string(), "N");
        let black_queen = Piece::try_from('q').unwrap();
        assert_eq!(black_queen, Piece::new(Player::Black, PieceKind::Queen));
        assert_eq!(black_queen.to_string(), "q");
        assert!(Piece::try_from('x').is_err());
        assert!(Piece::try_from('H').is_err());
        assert!(Piece::try_from('1').is_err());
    }

    #[test]
    fn players() {
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::try_from("b").unwrap(), Player::Black);
        assert!(Player::try_from("white").is_err());
        assert_eq!(Player::White.to_string(), "w");
        assert_eq!(Rank::pawns_starting(Player::Black), Rank::Seven);
    }
}
