use crate::{GameStatus, Move};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Buffered, human readable record of a game and, optionally, of the
/// engine's search. Lines are mirrored to the `log` facade at debug level.
#[derive(Debug)]
pub struct ChessLogger {
    pub log_buffer: String,
    pub advanced_logging: bool,
    game_start_time: Instant,
    move_count: u32,
    indent_level: usize,
}

impl ChessLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(64 * 1024),
            advanced_logging: false,
            game_start_time: Instant::now(),
            move_count: 0,
            indent_level: 0,
        };

        logger.log("🎯 === Chess Game Log Started ===");
        logger.log(&format!("📅 Date: {}", chrono::Local::now().format("%m/%d/%Y %H:%M:%S")));
        logger
    }

    pub fn should_log_advanced(&self) -> bool {
        self.advanced_logging
    }

    pub fn enable_advanced_logging(&mut self) {
        self.advanced_logging = true;
        self.log("🔬 Advanced logging enabled - search trace active");
    }

    pub fn disable_advanced_logging(&mut self) {
        self.advanced_logging = false;
        self.log("📊 Advanced logging disabled");
    }

    pub fn log(&mut self, message: &str) {
        log::debug!(target: "chess", "{}", message);
        self.log_buffer.push_str(message);
        self.log_buffer.push('\n');
    }

    pub fn log_with_indent(&mut self, message: &str) {
        let indent = "  ".repeat(self.indent_level);
        self.log(&format!("{}{}", indent, message));
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn reset_indent(&mut self) {
        self.indent_level = 0;
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn log_human_move(&mut self, mv: Move, time_ms: u64) {
        self.move_count += 1;
        self.log(&format!("{}. {} (Human move - {}ms)", self.move_count, mv, time_ms));
    }

    pub fn log_ai_move(&mut self, mv: Move, time_ms: u64, eval: i32, nodes: u64) {
        self.move_count += 1;
        self.log(&format!(
            "{}. {} (AI move - {}ms, {} nodes) Eval: {:+} {}",
            self.move_count,
            mv,
            time_ms,
            nodes,
            eval,
            if eval > 0 { "📈" } else if eval < 0 { "📉" } else { "⚖️" }
        ));
    }

    pub fn log_new_game(&mut self, fen: &str) {
        self.move_count = 0;
        self.reset_indent();
        self.log(&format!("🆕 New game: {}", fen));
    }

    pub fn log_game_over(&mut self, status: GameStatus) {
        let elapsed = self.game_start_time.elapsed().as_secs();
        self.log(&format!(
            "🏁 Game over after {} moves ({}s): {}",
            self.move_count, elapsed, status
        ));
    }

    pub fn log_game_aborted(&mut self, reason: &str) {
        self.log(&format!("🛑 Game finished abruptly - {}", reason));
    }

    /// Write the buffer to `<dir>/<timestamp>.txt` and return the path.
    pub fn save_to_file(&mut self, dir: &Path, reason: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let now = chrono::Local::now();
        let path = dir.join(format!("{}.txt", now.format("%m_%d_%Y_%H_%M_%S")));

        self.log(&format!("💾 Saving log: {}", reason));

        let mut file = File::create(&path)?;
        file.write_all(self.log_buffer.as_bytes())?;
        Ok(path)
    }
}

impl Default for ChessLogger {
    fn default() -> Self {
        Self::new()
    }
}
