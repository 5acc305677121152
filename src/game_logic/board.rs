use crate::game_state::{Piece, Square};

const SQUARE_COUNT: usize = Square::ALL.len();

/// Index of a piece in the engine's piece registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What stands on an occupied square: which registered piece, and what it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub id: PieceId,
    pub piece: Piece,
}

/// The 8×8 grid. At most one occupant per square.
///
/// The board does no legality checking; the engine is the only writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Occupant>; SQUARE_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [None; SQUARE_COUNT],
        }
    }

    #[inline]
    pub fn occupant_at(&self, square: Square) -> Option<Occupant> {
        self.squares[square as usize]
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.occupant_at(square).map(|occupant| occupant.piece)
    }

    /// Overwrites a square, returning whatever stood there before.
    #[inline]
    pub fn place(&mut self, square: Square, occupant: Option<Occupant>) -> Option<Occupant> {
        std::mem::replace(&mut self.squares[square as usize], occupant)
    }

    /// Occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL
            .into_iter()
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Piece placement in FEN style, rank 8 first (e.g. `8/8/8/8/8/8/RBN2nbr/KBN2nbk`).
    pub fn placement(&self) -> String {
        let mut board = shakmaty::Board::empty();
        for (square, piece) in self.pieces() {
            board.set_piece_at(square, piece.into());
        }
        board.to_string()
    }
}
