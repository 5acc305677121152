use crate::game_logic::GameEngine;
use crate::game_state::Square;

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// The selected piece stands here
    Origin,
    /// The selected piece may move here
    Destination,
    /// Moving here captures an opponent piece
    Capture,
}

/// Squares to highlight for the current selection.
///
/// `BoardFeedback` is computed by [`compute_feedback`] and consumed by a
/// [`BoardDisplay`](crate::BoardDisplay), which decides how each variant
/// looks (terminal colors, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Square, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Square, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Square) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Square, SquareFeedback)>> for BoardFeedback {
    fn from(squares: Vec<(Square, SquareFeedback)>) -> Self {
        Self { squares }
    }
}

/// Highlights where the piece on `from` may legally go.
///
/// Nothing is highlighted when `from` is empty, holds a piece of the side not
/// on move, or the game is over.
pub fn compute_feedback(engine: &GameEngine, from: Square) -> BoardFeedback {
    let destinations = engine.legal_destinations(from);
    if destinations.is_empty() {
        return BoardFeedback::new();
    }

    std::iter::once((from, SquareFeedback::Origin))
        .chain(destinations.into_iter().map(|to| classify(engine, to)))
        .collect::<Vec<_>>()
        .into()
}

/// Classify a destination as either a capture or a quiet move
fn classify(engine: &GameEngine, to: Square) -> (Square, SquareFeedback) {
    if engine.piece_at(to).is_some() {
        (to, SquareFeedback::Capture)
    } else {
        (to, SquareFeedback::Destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Color;

    fn sq(label: &str) -> Square {
        label.parse().expect("valid square")
    }

    #[test]
    fn test_no_feedback_for_empty_square() {
        let engine = GameEngine::new();
        let feedback = compute_feedback(&engine, sq("e4"));
        assert!(feedback.is_empty());
    }

    #[test]
    fn test_no_feedback_for_boxed_in_piece() {
        let engine = GameEngine::new();
        assert!(compute_feedback(&engine, sq("a1")).is_empty());
    }

    #[test]
    fn test_no_feedback_for_side_not_on_move() {
        let engine = GameEngine::new();
        assert!(compute_feedback(&engine, sq("h2")).is_empty());
    }

    #[test]
    fn test_show_destinations_for_rook() {
        let engine = GameEngine::new();
        let feedback = compute_feedback(&engine, sq("a2"));

        assert_eq!(feedback.get(sq("a2")), Some(SquareFeedback::Origin));
        assert_eq!(feedback.get(sq("a3")), Some(SquareFeedback::Destination));
        assert_eq!(feedback.get(sq("a8")), Some(SquareFeedback::Destination));
        assert_eq!(feedback.get(sq("b3")), None);
        assert_eq!(feedback.squares().len(), 7);
    }

    #[test]
    fn test_show_capture() {
        let engine = GameEngine::from_placement("8/8/8/8/8/8/n3R3/4K2k", Color::White)
            .expect("valid placement");
        let feedback = compute_feedback(&engine, sq("e2"));

        assert_eq!(feedback.get(sq("a2")), Some(SquareFeedback::Capture));
        assert_eq!(feedback.get(sq("e8")), Some(SquareFeedback::Destination));
    }

    #[test]
    fn test_exposing_moves_not_highlighted() {
        let engine = GameEngine::from_placement("7b/8/8/8/8/8/1B6/K6k", Color::White)
            .expect("valid placement");
        let feedback = compute_feedback(&engine, sq("b2"));

        assert_eq!(feedback.get(sq("c1")), None);
        assert_eq!(feedback.get(sq("a3")), None);
        assert_eq!(feedback.get(sq("h8")), Some(SquareFeedback::Capture));
    }
}
