pub mod bitboard;
pub mod board;
pub mod error;
pub mod logger;
pub mod perft;
pub mod types;
pub mod zobrist;

pub use bitboard::*;
pub use board::*;
pub use error::EngineError;
pub use logger::ChessLogger;
pub use perft::*;
pub use types::*;
