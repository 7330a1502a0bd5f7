use crate::ordering::MoveOrderingKey;
use crate::types::Score;
use engine::{ChessLogger, Move};

/// Search trace lines. Everything here is a no-op unless advanced logging is on.
pub trait AILoggerExtensions {
    fn log_search_start(&mut self, depth: u32, maximizing: bool, evaluation: Score);
    fn log_depth_enter(&mut self, ply: u32, alpha: Score, beta: Score, maximizing: bool);
    fn log_depth_exit(&mut self, ply: u32, final_score: Score, best_move: Option<Move>);
    fn log_move_ordering_at_depth(&mut self, ply: u32, ordered: &[(Move, MoveOrderingKey)]);
    fn log_move_exploration_start(&mut self, mv: Move, move_num: usize, total_moves: usize, alpha: Score, beta: Score);
    fn log_move_exploration_result(&mut self, mv: Move, score: Score, improved: bool);
    fn log_cutoff(&mut self, mv: Move, alpha: Score, beta: Score, skipped: usize);
    fn log_leaf_evaluation(&mut self, ply: u32, eval_score: Score, terminal: bool);
    fn log_search_complete(&mut self, best_move: Option<Move>, evaluation: Score, nodes: u64);
}

impl AILoggerExtensions for ChessLogger {
    fn log_search_start(&mut self, depth: u32, maximizing: bool, evaluation: Score) {
        if self.should_log_advanced() {
            self.reset_indent();
            let side = if maximizing { "White (max)" } else { "Black (min)" };
            self.log(&format!("🚀 Starting search at depth {} for {} | static eval {:+}", depth, side, evaluation));
        }
    }

    fn log_depth_enter(&mut self, ply: u32, alpha: Score, beta: Score, maximizing: bool) {
        if self.should_log_advanced() {
            let role = if maximizing { "MAX" } else { "MIN" };
            let root = if ply == 0 { " (ROOT)" } else { "" };
            self.log_with_indent(&format!(
                "🔍 ply {} {}{} | α={}, β={}",
                ply, role, root, bound(alpha), bound(beta)
            ));
            self.increase_indent();
        }
    }

    fn log_depth_exit(&mut self, ply: u32, final_score: Score, best_move: Option<Move>) {
        if self.should_log_advanced() {
            self.decrease_indent();
            let best = best_move.map(|mv| mv.to_string()).unwrap_or_else(|| "-".to_string());
            self.log_with_indent(&format!("🏁 ply {} → {} (best {})", ply, bound(final_score), best));
        }
    }

    fn log_move_ordering_at_depth(&mut self, ply: u32, ordered: &[(Move, MoveOrderingKey)]) {
        if self.should_log_advanced() {
            self.log_with_indent(&format!("🎯 {} moves ordered at ply {}:", ordered.len(), ply));
            self.increase_indent();
            for (i, (mv, key)) in ordered.iter().enumerate() {
                let mut tags = String::new();
                if key.gives_check {
                    tags.push_str(" [CHECK]");
                }
                if key.captured_type > 0 {
                    tags.push_str(" [CAPTURE]");
                }
                self.log_with_indent(&format!("{:2}. {}{} bonus={}", i + 1, mv, tags, key.tactical_bonus));
            }
            self.decrease_indent();
        }
    }

    fn log_move_exploration_start(&mut self, mv: Move, move_num: usize, total_moves: usize, alpha: Score, beta: Score) {
        if self.should_log_advanced() {
            self.log_with_indent(&format!(
                "🔄 [{}/{}] {} (α={}, β={})",
                move_num, total_moves, mv, bound(alpha), bound(beta)
            ));
        }
    }

    fn log_move_exploration_result(&mut self, mv: Move, score: Score, improved: bool) {
        if self.should_log_advanced() {
            let status = if improved { "📈 NEW BEST" } else { "📊" };
            self.log_with_indent(&format!("✅ {} → {} {}", mv, score, status));
        }
    }

    fn log_cutoff(&mut self, mv: Move, alpha: Score, beta: Score, skipped: usize) {
        if self.should_log_advanced() {
            self.log_with_indent(&format!(
                "✂️ CUTOFF after {} (α={} ≥ β={}), {} moves skipped",
                mv, bound(alpha), bound(beta), skipped
            ));
        }
    }

    fn log_leaf_evaluation(&mut self, ply: u32, eval_score: Score, terminal: bool) {
        if self.should_log_advanced() {
            let kind = if terminal { "TERMINAL" } else { "LEAF" };
            self.log_with_indent(&format!("🍃 {} (ply {}) → {}", kind, ply, eval_score));
        }
    }

    fn log_search_complete(&mut self, best_move: Option<Move>, evaluation: Score, nodes: u64) {
        if self.should_log_advanced() {
            self.reset_indent();
            let best = best_move.map(|mv| mv.to_string()).unwrap_or_else(|| "None".to_string());
            self.log(&format!(
                "🏆 Search completed. Best move: {}, Evaluation: {:+}, Nodes: {}",
                best, evaluation, nodes
            ));
        }
    }
}

fn bound(score: Score) -> String {
    match score {
        s if s >= crate::types::SCORE_INFINITY => "+∞".to_string(),
        s if s <= -crate::types::SCORE_INFINITY => "-∞".to_string(),
        s => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SCORE_INFINITY;

    #[test]
    fn quiet_unless_advanced() {
        let mut logger = ChessLogger::new();
        let before = logger.log_buffer.len();
        logger.log_search_start(3, true, 0);
        logger.log_leaf_evaluation(3, 1, false);
        assert_eq!(logger.log_buffer.len(), before);

        logger.enable_advanced_logging();
        logger.log_search_start(3, true, 0);
        logger.log_depth_enter(0, -SCORE_INFINITY, SCORE_INFINITY, true);
        logger.log_leaf_evaluation(1, 5, true);
        assert!(logger.log_buffer.contains("Starting search at depth 3"));
        assert!(logger.log_buffer.contains("α=-∞, β=+∞"));
        assert!(logger.log_buffer.contains("TERMINAL (ply 1) → 5"));
    }
}
