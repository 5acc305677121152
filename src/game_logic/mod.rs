mod board;
mod engine;
pub mod movement;

pub use board::{Board, Occupant, PieceId};
pub use engine::{GameEngine, MoveError, MoveRecord, STARTING_LAYOUT, SetupError};
