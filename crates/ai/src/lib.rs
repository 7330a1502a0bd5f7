pub mod evaluation;
pub mod logger_extensions;
pub mod ordering;
pub mod rules;
pub mod search;
pub mod types;

pub use evaluation::*;
pub use logger_extensions::AILoggerExtensions;
pub use ordering::*;
pub use rules::{MoveGuard, RulesEngine};
pub use search::*;
pub use types::*;
