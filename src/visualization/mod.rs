mod display;
mod terminal;
mod theme;

pub use display::{DisplayError, EMPTY_GLYPH, TerminalDisplay, glyph};
pub use terminal::{Session, SessionError};
pub use theme::{THEME_ENV, Theme, ThemeParseError};
