use std::io::{self, Write};

use super::Theme;
use crate::BoardDisplay;
use crate::feedback::{BoardFeedback, SquareFeedback};
use crate::game_logic::Board;
use crate::game_state::{Color, File, Piece, PieceKind, Rank, Square};

/// Glyph for an empty square.
pub const EMPTY_GLYPH: char = '\u{2610}';

/// Terminal-based board display.
///
/// Renders the board as an 8×8 grid of chess glyphs, rank 8 at the top.
/// Squares named in the [`BoardFeedback`] get an ANSI background color.
#[derive(Debug)]
pub struct TerminalDisplay<W> {
    writer: W,
    theme: Theme,
}

impl TerminalDisplay<io::Stdout> {
    /// Display on standard output.
    pub fn stdout(theme: Theme) -> Self {
        Self::new(io::stdout(), theme)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(writer: W, theme: Theme) -> Self {
        Self { writer, theme }
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl<W: Write> BoardDisplay for TerminalDisplay<W> {
    type Error = DisplayError;

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn show(&mut self, board: &Board, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render_board(&mut self.writer, board, feedback, self.theme)
    }
}

/// Render the board to any writer. Extracted for testability.
fn render_board(
    w: &mut impl Write,
    board: &Board,
    feedback: &BoardFeedback,
    theme: Theme,
) -> Result<(), DisplayError> {
    for rank in Rank::ALL.iter().rev() {
        write!(w, "{} ", rank.char())?;
        for file in File::ALL {
            let square = Square::from_coords(file, *rank);
            let glyph = board
                .piece_at(square)
                .map_or(EMPTY_GLYPH, |piece| glyph(piece, theme));
            match highlight(feedback.get(square)) {
                Some(ansi) => write!(w, "{ansi}{glyph}\x1b[0m ")?,
                None => write!(w, "{glyph} ")?,
            }
        }
        writeln!(w)?;
        writeln!(w)?;
    }
    writeln!(w, "  a b c d e f g h")?;
    w.flush()?;
    Ok(())
}

/// Outline glyphs when the piece color matches the terminal background,
/// filled glyphs otherwise.
pub fn glyph(piece: Piece, theme: Theme) -> char {
    let outline = matches!(
        (piece.color, theme),
        (Color::White, Theme::Light) | (Color::Black, Theme::Dark)
    );
    match (piece.kind, outline) {
        (PieceKind::Bishop, true) => '\u{2657}',
        (PieceKind::Bishop, false) => '\u{265D}',
        (PieceKind::Knight, true) => '\u{2658}',
        (PieceKind::Knight, false) => '\u{265E}',
        (PieceKind::Rook, true) => '\u{2656}',
        (PieceKind::Rook, false) => '\u{265C}',
        (PieceKind::King, true) => '\u{2654}',
        (PieceKind::King, false) => '\u{265A}',
    }
}

/// Map a feedback variant to an ANSI background.
fn highlight(feedback: Option<SquareFeedback>) -> Option<&'static str> {
    match feedback? {
        SquareFeedback::Origin => Some("\x1b[42m"),
        SquareFeedback::Destination => Some("\x1b[44m"),
        SquareFeedback::Capture => Some("\x1b[41m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::GameEngine;
    use test_case::test_case;

    fn render_to_string(board: &Board, feedback: &BoardFeedback, theme: Theme) -> String {
        let mut display = TerminalDisplay::new(Vec::new(), theme);
        display
            .show(board, feedback)
            .expect("rendering to buffer should succeed");
        String::from_utf8(display.into_inner()).expect("output should be valid UTF-8")
    }

    fn sq(label: &str) -> Square {
        label.parse().expect("valid square")
    }

    #[test]
    fn show_starting_position_light() {
        let engine = GameEngine::new();
        let output = render_to_string(engine.board(), &BoardFeedback::new(), Theme::Light);
        let lines: Vec<&str> = output.lines().filter(|line| !line.is_empty()).collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8 ☐ ☐ ☐ ☐ ☐ ☐ ☐ ☐ ");
        assert_eq!(lines[6], "2 ♖ ♗ ♘ ☐ ☐ ♞ ♝ ♜ ");
        assert_eq!(lines[7], "1 ♔ ♗ ♘ ☐ ☐ ♞ ♝ ♚ ");
        assert_eq!(lines[8], "  a b c d e f g h");
    }

    #[test]
    fn show_ranks_separated_by_blank_lines() {
        let engine = GameEngine::new();
        let output = render_to_string(engine.board(), &BoardFeedback::new(), Theme::Dark);

        assert!(output.starts_with("8 "));
        assert!(output.contains("\n\n7 "));
        assert!(output.ends_with("\n  a b c d e f g h\n"));
    }

    #[test_case(Color::White, Theme::Light, '♔')]
    #[test_case(Color::White, Theme::Dark, '♚')]
    #[test_case(Color::Black, Theme::Light, '♚')]
    #[test_case(Color::Black, Theme::Dark, '♔')]
    fn glyph_depends_on_theme(color: Color, theme: Theme, expected: char) {
        assert_eq!(glyph(Piece::new(PieceKind::King, color), theme), expected);
    }

    #[test]
    fn show_feedback_uses_backgrounds() {
        let engine = GameEngine::new();
        let feedback = BoardFeedback::from(vec![
            (sq("a2"), SquareFeedback::Origin),
            (sq("a3"), SquareFeedback::Destination),
        ]);

        let output = render_to_string(engine.board(), &feedback, Theme::Light);

        assert!(output.contains("\x1b[42m♖\x1b[0m"));
        assert!(output.contains("\x1b[44m☐\x1b[0m"));
        assert!(!output.contains("\x1b[41m"));
    }

    #[test]
    fn empty_feedback_has_no_ansi_codes() {
        let engine = GameEngine::new();
        let output = render_to_string(engine.board(), &BoardFeedback::new(), Theme::Dark);

        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn set_theme_switches_glyphs() {
        let engine = GameEngine::new();
        let mut display = TerminalDisplay::new(Vec::new(), Theme::Light);
        display.set_theme(Theme::Dark);

        display
            .show(engine.board(), &BoardFeedback::new())
            .expect("rendering to buffer should succeed");
        let output = String::from_utf8(display.into_inner()).expect("valid UTF-8");
        assert!(output.contains("1 ♚ ♝ ♞ ☐ ☐ ♘ ♗ ♔ "));
    }
}
