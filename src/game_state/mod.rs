//! Value types shared by the engine and the presentation layer.
//!
//! Coordinates, square sets and colors come from `shakmaty`; the piece set is
//! narrowed to the four kinds Racing Kings uses.

use std::fmt;

use shakmaty::Role;

mod square;

pub use shakmaty::{Bitboard, Color, File, Rank, Square};
pub use square::{SquareParseError, parse_square, step};

/// Capitalized side name for prompts ("White", "Black").
#[inline]
pub const fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Piece kinds present in Racing Kings. There are no pawns or queens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Bishop,
    Knight,
    Rook,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn role(self) -> Role {
        match self {
            PieceKind::Bishop => Role::Bishop,
            PieceKind::Knight => Role::Knight,
            PieceKind::Rook => Role::Rook,
            PieceKind::King => Role::King,
        }
    }

    /// `None` for pawns and queens.
    #[inline]
    pub const fn from_role(role: Role) -> Option<Self> {
        match role {
            Role::Bishop => Some(PieceKind::Bishop),
            Role::Knight => Some(PieceKind::Knight),
            Role::Rook => Some(PieceKind::Rook),
            Role::King => Some(PieceKind::King),
            Role::Pawn | Role::Queen => None,
        }
    }
}

/// A colored piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }
}

impl From<Piece> for shakmaty::Piece {
    fn from(piece: Piece) -> Self {
        shakmaty::Piece {
            color: piece.color,
            role: piece.kind.role(),
        }
    }
}

/// Fails with the original piece when it is a pawn or a queen.
impl TryFrom<shakmaty::Piece> for Piece {
    type Error = shakmaty::Piece;

    fn try_from(piece: shakmaty::Piece) -> Result<Self, Self::Error> {
        PieceKind::from_role(piece.role)
            .map(|kind| Piece::new(kind, piece.color))
            .ok_or(piece)
    }
}

/// Outcome of the race so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Unfinished,
    WhiteWon,
    BlackWon,
    Tie,
}

impl GameStatus {
    /// True once no further moves are accepted.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Unfinished)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Unfinished => write!(f, "Game in progress"),
            GameStatus::WhiteWon => write!(f, "White won!"),
            GameStatus::BlackWon => write!(f, "Black won!"),
            GameStatus::Tie => write!(f, "Tie!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_side_names() {
        assert_eq!(side_name(Color::White), "White");
        assert_eq!(side_name(!Color::White), "Black");
    }

    #[test_case('K', PieceKind::King, Color::White)]
    #[test_case('r', PieceKind::Rook, Color::Black)]
    #[test_case('B', PieceKind::Bishop, Color::White)]
    #[test_case('n', PieceKind::Knight, Color::Black)]
    fn test_piece_conversions(letter: char, kind: PieceKind, color: Color) {
        let piece = Piece::new(kind, color);
        let external = shakmaty::Piece::from_char(letter).expect("valid piece letter");

        assert_eq!(shakmaty::Piece::from(piece), external);
        assert_eq!(Piece::try_from(external), Ok(piece));
    }

    #[test_case('Q')]
    #[test_case('p')]
    fn test_pawns_and_queens_rejected(letter: char) {
        let external = shakmaty::Piece::from_char(letter).expect("valid piece letter");
        assert_eq!(Piece::try_from(external), Err(external));
    }

    #[test]
    fn test_only_unfinished_is_open() {
        assert!(!GameStatus::Unfinished.is_terminal());
        assert!(GameStatus::WhiteWon.is_terminal());
        assert!(GameStatus::BlackWon.is_terminal());
        assert!(GameStatus::Tie.is_terminal());
    }
}
