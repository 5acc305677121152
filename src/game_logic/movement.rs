//! Controlled-square generation for each piece kind.

use super::Board;
use crate::game_state::{Bitboard, Color, Piece, PieceKind, Square, step};

/// Unit directions for the rook.
pub const ROOK_DIRS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Unit directions for the bishop.
pub const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub const KING_DELTAS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Squares the piece standing on `from` could move to on the given board.
///
/// Sliders include the first occupied square of a ray only when it holds an
/// opposing piece. Leapers include every in-bounds target not held by their
/// own side.
pub fn controlled_squares(piece: Piece, from: Square, board: &Board) -> Bitboard {
    match piece.kind {
        PieceKind::Bishop => slide(piece.color, from, &BISHOP_DIRS, board),
        PieceKind::Rook => slide(piece.color, from, &ROOK_DIRS, board),
        PieceKind::Knight => leap(piece.color, from, &KNIGHT_DELTAS, board),
        PieceKind::King => leap(piece.color, from, &KING_DELTAS, board),
    }
}

fn slide(color: Color, from: Square, dirs: &[(i32, i32)], board: &Board) -> Bitboard {
    let mut controlled = Bitboard::EMPTY;
    for &(df, dr) in dirs {
        let mut current = from;
        while let Some(next) = step(current, df, dr) {
            match board.piece_at(next) {
                None => {
                    controlled.add(next);
                    current = next;
                }
                Some(blocker) => {
                    if blocker.color != color {
                        controlled.add(next);
                    }
                    break;
                }
            }
        }
    }
    controlled
}

fn leap(color: Color, from: Square, deltas: &[(i32, i32)], board: &Board) -> Bitboard {
    deltas
        .iter()
        .filter_map(|&(df, dr)| step(from, df, dr))
        .filter(|&target| board.piece_at(target).is_none_or(|other| other.color != color))
        .collect()
}
