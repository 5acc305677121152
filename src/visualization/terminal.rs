use std::io::{self, BufRead, Write};

use log::{info, warn};
use thiserror::Error;

use super::Theme;
use crate::BoardDisplay;
use crate::feedback::{BoardFeedback, compute_feedback};
use crate::game_logic::GameEngine;
use crate::game_state::{GameStatus, parse_square, side_name};

/// Error that ends a session early.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("display failed: {0}")]
    Display(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Why a game loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameEnd {
    Finished(GameStatus),
    Quit,
}

/// Prompt-driven Racing Kings session: reads square labels from `input`,
/// writes prompts to `output` and draws the board on a [`BoardDisplay`].
///
/// Each game runs on a fresh [`GameEngine`]; a rematch builds another one.
/// End of input ends the session.
pub struct Session<R, W, D> {
    input: R,
    output: W,
    display: D,
    theme: Option<Theme>,
    new_game: fn() -> GameEngine,
}

impl<R: BufRead, W: Write, D: BoardDisplay> Session<R, W, D> {
    pub fn new(input: R, output: W, display: D) -> Self {
        Self {
            input,
            output,
            display,
            theme: None,
            new_game: GameEngine::new,
        }
    }

    /// Skip the theme prompt.
    pub fn with_theme(mut self, theme: Option<Theme>) -> Self {
        self.theme = theme;
        self
    }

    /// Choose how each game's engine is built (defaults to the starting position).
    pub fn with_new_game(mut self, new_game: fn() -> GameEngine) -> Self {
        self.new_game = new_game;
        self
    }

    pub fn into_display(self) -> D {
        self.display
    }

    /// Runs games until the player declines a rematch, quits, or input ends.
    pub fn run(&mut self) -> Result<(), SessionError> {
        let theme = match self.theme {
            Some(theme) => theme,
            None => match self.prompt_theme()? {
                Some(theme) => theme,
                None => return Ok(()),
            },
        };
        self.display.set_theme(theme);
        info!("session started with {theme} theme");

        loop {
            let engine = (self.new_game)();
            match self.play(engine)? {
                GameEnd::Quit => return Ok(()),
                GameEnd::Finished(status) => {
                    info!("game over: {status:?}");
                    writeln!(self.output, "{status}")?;
                }
            }

            if !self.prompt_rematch()? {
                writeln!(self.output, "Thanks for playing!")?;
                return Ok(());
            }
            info!("rematch");
        }
    }

    fn play(&mut self, mut engine: GameEngine) -> Result<GameEnd, SessionError> {
        writeln!(self.output, "Welcome to Racing Kings!")?;
        writeln!(self.output)?;
        self.show(&engine, &BoardFeedback::new())?;

        while !engine.status().is_terminal() {
            writeln!(self.output)?;
            writeln!(self.output, "{} to move.", side_name(engine.turn()))?;

            let Some(start) = self.read_line("Enter start square of move: ")? else {
                return Ok(GameEnd::Quit);
            };
            if start.eq_ignore_ascii_case("quit") {
                return Ok(GameEnd::Quit);
            }
            if let Some(label) = start.strip_prefix("hint") {
                self.hint(&engine, label.trim())?;
                continue;
            }

            let Some(end) = self.read_line("Enter end square of move: ")? else {
                return Ok(GameEnd::Quit);
            };

            if engine.attempt_move(&start, &end) {
                self.show(&engine, &BoardFeedback::new())?;
            } else {
                writeln!(self.output)?;
                writeln!(self.output, "Illegal move! Please make a different move.")?;
            }
        }

        Ok(GameEnd::Finished(engine.status()))
    }

    /// Draws the legal destinations of the piece on `label`.
    fn hint(&mut self, engine: &GameEngine, label: &str) -> Result<(), SessionError> {
        match parse_square(label) {
            Ok(square) => {
                let feedback = compute_feedback(engine, square);
                if feedback.is_empty() {
                    writeln!(self.output, "No legal moves from {square}.")?;
                }
                self.show(engine, &feedback)
            }
            Err(e) => {
                writeln!(self.output, "Invalid square: {e}")?;
                Ok(())
            }
        }
    }

    fn show(&mut self, engine: &GameEngine, feedback: &BoardFeedback) -> Result<(), SessionError> {
        self.display
            .show(engine.board(), feedback)
            .map_err(|e| SessionError::Display(Box::new(e)))
    }

    fn prompt_theme(&mut self) -> Result<Option<Theme>, SessionError> {
        loop {
            let Some(answer) = self.read_line("Select your terminal theme (dark/light): ")? else {
                return Ok(None);
            };
            if let Ok(theme) = answer.parse() {
                return Ok(Some(theme));
            }
        }
    }

    fn prompt_rematch(&mut self) -> Result<bool, SessionError> {
        loop {
            let Some(answer) = self.read_line("Would you like to play another game? (y/n) ")? else {
                return Ok(false);
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => {}
            }
        }
    }

    /// Prints `prompt` and reads one trimmed line, or `None` at end of input.
    /// Lines that are not valid UTF-8 are skipped and the prompt repeated.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, SessionError> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = Vec::new();
            if self.input.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            match String::from_utf8(line) {
                Ok(line) => return Ok(Some(line.trim().to_string())),
                Err(e) => warn!("ignoring unreadable input: {e}"),
            }
        }
    }
}
