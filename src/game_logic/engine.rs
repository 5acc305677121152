use log::{debug, trace};
use thiserror::Error;

use super::movement::controlled_squares;
use super::{Board, Occupant, PieceId};
use crate::game_state::{
    Bitboard, Color, GameStatus, Piece, PieceKind, Rank, Square, parse_square, side_name,
};

/// Starting position: kings, rooks, bishops and knights on the first two ranks.
pub const STARTING_LAYOUT: [(Square, Piece); 12] = [
    (Square::A1, Piece::new(PieceKind::King, Color::White)),
    (Square::A2, Piece::new(PieceKind::Rook, Color::White)),
    (Square::B1, Piece::new(PieceKind::Bishop, Color::White)),
    (Square::B2, Piece::new(PieceKind::Bishop, Color::White)),
    (Square::C1, Piece::new(PieceKind::Knight, Color::White)),
    (Square::C2, Piece::new(PieceKind::Knight, Color::White)),
    (Square::F1, Piece::new(PieceKind::Knight, Color::Black)),
    (Square::F2, Piece::new(PieceKind::Knight, Color::Black)),
    (Square::G1, Piece::new(PieceKind::Bishop, Color::Black)),
    (Square::G2, Piece::new(PieceKind::Bishop, Color::Black)),
    (Square::H1, Piece::new(PieceKind::King, Color::Black)),
    (Square::H2, Piece::new(PieceKind::Rook, Color::Black)),
];

/// Why a move was refused. Checks run in declaration order; the first
/// failing one is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("'{0}' is not a square on the board")]
    OffBoard(String),
    #[error("no piece on {0}")]
    EmptySquare(Square),
    #[error("it is {0:?}'s turn")]
    WrongTurn(Color),
    #[error("the piece on {from} cannot reach {to}")]
    Unreachable { from: Square, to: Square },
    #[error("the game is over: {0}")]
    GameOver(GameStatus),
    #[error("moving {from} to {to} would leave a king attacked")]
    ExposesKing { from: Square, to: Square },
}

/// Why a position could not be set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("malformed placement: {0}")]
    Placement(String),
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),
    #[error("two pieces placed on {0}")]
    DuplicateSquare(Square),
    #[error("{color:?} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },
    #[error("a king starts under attack")]
    KingAttacked,
}

/// A move the engine accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    /// Status after the move.
    pub status: GameStatus,
}

/// Registry entry for one piece. `controlled` is a cache and is only
/// trustworthy right after `refresh_controlled`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PieceState {
    piece: Piece,
    square: Square,
    controlled: Bitboard,
}

/// State needed to undo a tentative move exactly.
struct Tentative {
    mover: Occupant,
    from: Square,
    to: Square,
    captured: Option<(Occupant, usize)>,
}

/// Racing Kings rules engine: owns the board, turn order and game status.
#[derive(Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    pieces: Vec<PieceState>,
    /// Live pieces, in registry order until captures and rollbacks move them.
    remaining: Vec<PieceId>,
    turn: Color,
    status: GameStatus,
    white_king: Square,
    black_king: Square,
}

impl GameEngine {
    /// A new game from the starting position, White to move.
    pub fn new() -> Self {
        Self::build(&STARTING_LAYOUT, Color::White)
    }

    /// Sets up an arbitrary position.
    pub fn from_layout(layout: &[(Square, Piece)], turn: Color) -> Result<Self, SetupError> {
        let mut seen = Bitboard::EMPTY;
        for &(square, _) in layout {
            if seen.contains(square) {
                return Err(SetupError::DuplicateSquare(square));
            }
            seen.add(square);
        }

        for color in [Color::White, Color::Black] {
            let count = layout
                .iter()
                .filter(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
                .count();
            if count != 1 {
                return Err(SetupError::KingCount { color, count });
            }
        }

        let engine = Self::build(layout, turn);
        if engine.any_king_attacked() {
            return Err(SetupError::KingAttacked);
        }
        Ok(engine)
    }

    /// Sets up a position from FEN-style piece placement, rank 8 first.
    ///
    /// ```
    /// # use racing_kings::game_logic::GameEngine;
    /// # use racing_kings::game_state::Color;
    /// let engine = GameEngine::from_placement("8/8/8/8/8/8/RBN2nbr/KBN2nbk", Color::White).unwrap();
    /// assert_eq!(engine.board().placement(), GameEngine::new().board().placement());
    /// ```
    pub fn from_placement(placement: &str, turn: Color) -> Result<Self, SetupError> {
        let board = shakmaty::Board::from_ascii_board_fen(placement.trim().as_bytes())
            .map_err(|e| SetupError::Placement(e.to_string()))?;

        let layout = board
            .occupied()
            .into_iter()
            .filter_map(|square| board.piece_at(square).map(|piece| (square, piece)))
            .map(|(square, piece)| {
                Piece::try_from(piece)
                    .map(|piece| (square, piece))
                    .map_err(|other| SetupError::InvalidPiece(other.char()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_layout(&layout, turn)
    }

    /// Builds the engine without validating the layout.
    fn build(layout: &[(Square, Piece)], turn: Color) -> Self {
        let mut board = Board::empty();
        let mut pieces = Vec::with_capacity(layout.len());
        let mut white_king = Square::A1;
        let mut black_king = Square::H1;

        for (i, &(square, piece)) in layout.iter().enumerate() {
            let id = PieceId(i as u8);
            board.place(square, Some(Occupant { id, piece }));
            pieces.push(PieceState {
                piece,
                square,
                controlled: Bitboard::EMPTY,
            });
            if piece.kind == PieceKind::King {
                match piece.color {
                    Color::White => white_king = square,
                    Color::Black => black_king = square,
                }
            }
        }

        let mut engine = Self {
            board,
            remaining: (0..pieces.len()).map(|i| PieceId(i as u8)).collect(),
            pieces,
            turn,
            status: GameStatus::Unfinished,
            white_king,
            black_king,
        };
        engine.refresh_controlled();
        engine.status = engine.evaluate_status();
        engine
    }

    /// Attempts a move given two square labels such as `"a2"` and `"a4"`.
    ///
    /// Returns `true` and applies the move if it is legal; otherwise returns
    /// `false` and leaves the engine untouched.
    pub fn attempt_move(&mut self, start: &str, end: &str) -> bool {
        let result = parse_label(start)
            .and_then(|from| parse_label(end).map(|to| (from, to)))
            .and_then(|(from, to)| self.try_move(from, to));
        match result {
            Ok(_) => true,
            Err(err) => {
                trace!("rejected {start}-{end}: {err}");
                false
            }
        }
    }

    /// Attempts a move and reports why it was refused.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
        let mover = self
            .board
            .occupant_at(from)
            .ok_or(MoveError::EmptySquare(from))?;
        if mover.piece.color != self.turn {
            return Err(MoveError::WrongTurn(self.turn));
        }
        if !self.state(mover.id).controlled.contains(to) {
            return Err(MoveError::Unreachable { from, to });
        }
        if self.status.is_terminal() {
            return Err(MoveError::GameOver(self.status));
        }

        let tentative = self.execute(mover, from, to);
        if self.any_king_attacked() {
            self.rollback(tentative);
            trace!("rolled back {from}-{to}: a king would be attacked");
            return Err(MoveError::ExposesKing { from, to });
        }

        let captured = tentative.captured.map(|(occupant, _)| occupant.piece);
        if let Some(piece) = captured {
            debug!("{:?} {:?} captured on {to}", piece.color, piece.kind);
        }

        self.turn = !self.turn;
        let previous = self.status;
        self.status = self.evaluate_status();
        debug!(
            "{:?} {:?} {from}-{to}, {} to move",
            mover.piece.color,
            mover.piece.kind,
            side_name(self.turn)
        );
        if self.status != previous {
            debug!("status changed: {previous:?} -> {:?}", self.status);
        }

        Ok(MoveRecord {
            piece: mover.piece,
            from,
            to,
            captured,
            status: self.status,
        })
    }

    /// Moves the piece and recomputes every controlled-square cache.
    fn execute(&mut self, mover: Occupant, from: Square, to: Square) -> Tentative {
        let captured = self.board.place(to, Some(mover)).and_then(|victim| {
            let slot = self.remaining.iter().position(|&id| id == victim.id)?;
            self.remaining.remove(slot);
            Some((victim, slot))
        });
        self.board.place(from, None);
        self.relocate(mover, to);
        self.refresh_controlled();

        Tentative {
            mover,
            from,
            to,
            captured,
        }
    }

    /// Undoes [`GameEngine::execute`] exactly, including `remaining` order.
    fn rollback(&mut self, tentative: Tentative) {
        let Tentative {
            mover,
            from,
            to,
            captured,
        } = tentative;

        let restored = captured.map(|(victim, slot)| {
            self.remaining.insert(slot, victim.id);
            victim
        });
        self.board.place(to, restored);
        self.board.place(from, Some(mover));
        self.relocate(mover, from);
        self.refresh_controlled();
    }

    fn relocate(&mut self, occupant: Occupant, square: Square) {
        self.pieces[occupant.id.index()].square = square;
        if occupant.piece.kind == PieceKind::King {
            match occupant.piece.color {
                Color::White => self.white_king = square,
                Color::Black => self.black_king = square,
            }
        }
    }

    /// Recomputes controlled squares for every remaining piece.
    fn refresh_controlled(&mut self) {
        for &id in &self.remaining {
            let state = &self.pieces[id.index()];
            let controlled = controlled_squares(state.piece, state.square, &self.board);
            self.pieces[id.index()].controlled = controlled;
        }
    }

    /// True if any remaining piece controls either king's square.
    fn any_king_attacked(&self) -> bool {
        self.remaining.iter().any(|&id| {
            let controlled = self.state(id).controlled;
            controlled.contains(self.white_king) || controlled.contains(self.black_king)
        })
    }

    /// White only wins once Black has had its reply, i.e. when it is White's
    /// turn again with the white king on rank 8 and the black king short of it.
    fn evaluate_status(&self) -> GameStatus {
        let white_home = self.white_king.rank() == Rank::Eighth;
        let black_home = self.black_king.rank() == Rank::Eighth;
        match (white_home, black_home) {
            (true, true) => GameStatus::Tie,
            (false, true) => GameStatus::BlackWon,
            (true, false) if self.turn == Color::White => GameStatus::WhiteWon,
            _ => GameStatus::Unfinished,
        }
    }

    #[inline]
    fn state(&self, id: PieceId) -> &PieceState {
        &self.pieces[id.index()]
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Cached controlled squares of the piece on `square`.
    pub fn controlled_squares(&self, square: Square) -> Option<Bitboard> {
        self.board
            .occupant_at(square)
            .map(|occupant| self.state(occupant.id).controlled)
    }

    /// Live pieces with their squares, in registry order.
    pub fn remaining_pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.remaining.iter().map(|&id| {
            let state = self.state(id);
            (state.square, state.piece)
        })
    }

    /// Controlled squares of the piece on `from` that a move would be accepted to.
    ///
    /// Empty if the square is empty, the piece is not on move or the game is over.
    pub fn legal_destinations(&self, from: Square) -> Bitboard {
        let Some(controlled) = self.controlled_squares(from) else {
            return Bitboard::EMPTY;
        };
        controlled
            .into_iter()
            .filter(|&to| {
                let mut probe = self.clone();
                probe.try_move(from, to).is_ok()
            })
            .collect()
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> Vec<(Square, Square)> {
        self.remaining_pieces()
            .filter(|(_, piece)| piece.color == self.turn)
            .flat_map(|(from, _)| {
                self.legal_destinations(from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }
}

fn parse_label(label: &str) -> Result<Square, MoveError> {
    parse_square(label).map_err(|_| MoveError::OffBoard(label.to_string()))
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("placement", &self.board.placement())
            .field("turn", &side_name(self.turn))
            .field("status", &self.status)
            .finish()
    }
}
