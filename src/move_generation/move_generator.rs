use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::{Color, Piece, Position, Square};
use crate::moves::move_descriptions::Move;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

/// Misuse of the move pipeline. Every variant is raised before the position
/// is touched, so the caller still holds the state it passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    EmptyOrigin(Square),
    WrongTurn { square: Square, color: Color },
    PieceMismatch {
        square: Square,
        expected: Piece,
        found: Option<Piece>,
    },
    IllegalDestination { origin: Square, destination: u16 },
    EmptyHistory,
    InvalidState(String),
}

impl fmt::Display for MoveGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveGenerationError::EmptyOrigin(square) => {
                write!(f, "no piece on origin square {square}")
            }
            MoveGenerationError::WrongTurn { square, color } => {
                write!(f, "piece on {square} belongs to {color:?}, which is not to move")
            }
            MoveGenerationError::PieceMismatch {
                square,
                expected,
                found,
            } => write!(
                f,
                "expected {expected:?} on square {square}, found {found:?}"
            ),
            MoveGenerationError::IllegalDestination {
                origin,
                destination,
            } => write!(f, "destination code {destination} is not legal from square {origin}"),
            MoveGenerationError::EmptyHistory => write!(f, "no move to undo"),
            MoveGenerationError::InvalidState(msg) => write!(f, "invalid game state: {msg}"),
        }
    }
}

impl Error for MoveGenerationError {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub is_capture: bool,
    pub is_en_passant: bool,
    pub is_castle: bool,
    pub is_promotion: bool,
    pub gives_check: bool,
    pub is_checkmate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedMove {
    pub mv: Move,
    pub annotations: MoveAnnotations,
}

/// Legal move listing for the side to move.
///
/// Implementations may apply and undo moves on `position` while they work but
/// must hand it back unchanged.
pub trait MoveGenerator {
    fn generate_legal_moves(&self, position: &mut Position) -> MoveGenResult<Vec<GeneratedMove>>;
}
