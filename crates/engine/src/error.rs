use crate::types::Move;

/// Failures reported by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("game is over")]
    GameOver,

    #[error("no moves to undo")]
    NothingToUndo,
}
