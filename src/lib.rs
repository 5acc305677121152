use crate::feedback::BoardFeedback;
use crate::game_logic::Board;
use crate::visualization::Theme;

pub mod feedback;
pub mod game_logic;
pub mod game_state;
pub mod visualization;

/// Trait for drawing the board for the player.
///
/// Abstracts over terminal rendering and test doubles, providing a uniform
/// interface for the output side of a session.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Switch glyph sets for the given terminal background.
    fn set_theme(&mut self, _theme: Theme) {}

    /// Draw every square of `board`, highlighting the squares named in `feedback`.
    fn show(&mut self, board: &Board, feedback: &BoardFeedback) -> Result<(), Self::Error>;
}
