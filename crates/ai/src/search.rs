use crate::evaluation::evaluate_position;
use crate::logger_extensions::AILoggerExtensions;
use crate::ordering::order_moves;
use crate::rules::{MoveGuard, RulesEngine};
use crate::types::*;
use engine::{ChessLogger, Move};

/// Fixed-depth minimax with alpha-beta pruning over material.
///
/// The engine owns its game log so search traces land next to the moves
/// that produced them.
pub struct SearchEngine {
    pub nodes_searched: u64,
    config: SearchConfig,
    logger: ChessLogger,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        let mut logger = ChessLogger::new();
        if config.advanced_logging {
            logger.enable_advanced_logging();
        }
        Self {
            nodes_searched: 0,
            config,
            logger,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.config.depth = depth;
    }

    pub fn set_advanced_logging(&mut self, enabled: bool) {
        if enabled == self.config.advanced_logging {
            return;
        }
        self.config.advanced_logging = enabled;
        if enabled {
            self.logger.enable_advanced_logging();
        } else {
            self.logger.disable_advanced_logging();
        }
    }

    pub fn logger(&self) -> &ChessLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut ChessLogger {
        &mut self.logger
    }

    /// Replace the game log, keeping the current trace setting.
    pub fn reset_logger(&mut self) {
        self.logger = ChessLogger::new();
        if self.config.advanced_logging {
            self.logger.enable_advanced_logging();
        }
    }

    /// Minimax value of `position` searched `depth` plies deep inside the
    /// `(alpha, beta)` window, with the best root move when one exists.
    ///
    /// Scores are from White's point of view; `maximizing` says whose turn the
    /// root is. `position` is handed back exactly as it was received.
    pub fn search<R: RulesEngine + ?Sized>(
        &mut self,
        position: &mut R,
        depth: u32,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> (Score, Option<Move>) {
        self.alphabeta(position, DepthBudget::new(depth), alpha, beta, maximizing)
    }

    /// Full-window search for the side to move, with statistics.
    pub fn search_root<R: RulesEngine + ?Sized>(&mut self, position: &mut R, depth: u32) -> SearchResult {
        self.nodes_searched = 0;
        let maximizing = position.white_to_move();

        let static_eval = evaluate_position(&*position);
        self.logger.log_search_start(depth, maximizing, static_eval);

        let (evaluation, best_move) = self.search(position, depth, -SCORE_INFINITY, SCORE_INFINITY, maximizing);

        self.logger.log_search_complete(best_move, evaluation, self.nodes_searched);
        log::debug!(
            "depth {} search: best {:?} eval {} nodes {}",
            depth,
            best_move.map(|mv| mv.to_string()),
            evaluation,
            self.nodes_searched
        );

        SearchResult {
            best_move,
            evaluation,
            depth,
            nodes_searched: self.nodes_searched,
        }
    }

    /// Best move for the side to move, or `None` when there is nothing to play.
    pub fn choose_move<R: RulesEngine + ?Sized>(&mut self, position: &mut R, depth: u32) -> Option<Move> {
        self.search_root(position, depth).best_move
    }

    fn alphabeta<R: RulesEngine + ?Sized>(
        &mut self,
        position: &mut R,
        budget: DepthBudget,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> (Score, Option<Move>) {
        self.nodes_searched += 1;

        if budget.is_exhausted() || position.is_game_over() {
            let eval = evaluate_position(&*position);
            self.logger.log_leaf_evaluation(budget.ply(), eval, !budget.is_exhausted());
            return (eval, None);
        }

        let moves = position.legal_moves();
        if moves.is_empty() {
            let eval = evaluate_position(&*position);
            self.logger.log_leaf_evaluation(budget.ply(), eval, true);
            return (eval, None);
        }

        let ordered = order_moves(&*position, moves);
        self.logger.log_depth_enter(budget.ply(), alpha, beta, maximizing);
        self.logger.log_move_ordering_at_depth(budget.ply(), &ordered);

        let mut best_score = if maximizing { -SCORE_INFINITY } else { SCORE_INFINITY };
        let mut best_move = None;
        let total = ordered.len();

        for (i, &(mv, _)) in ordered.iter().enumerate() {
            self.logger.log_move_exploration_start(mv, i + 1, total, alpha, beta);

            let (score, _) = {
                let mut child = MoveGuard::push(position, mv);
                self.alphabeta(&mut *child, budget.child(), alpha, beta, !maximizing)
            };

            let improved = if maximizing { score > best_score } else { score < best_score };
            if improved {
                best_score = score;
                if budget.is_root() {
                    best_move = Some(mv);
                }
            }
            self.logger.log_move_exploration_result(mv, score, improved);

            if maximizing {
                alpha = alpha.max(best_score);
            } else {
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                self.logger.log_cutoff(mv, alpha, beta, total - i - 1);
                break;
            }
        }

        self.logger.log_depth_exit(budget.ply(), best_score, best_move);
        (best_score, best_move)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot `choose_move` with a fresh engine.
pub fn choose_move<R: RulesEngine + ?Sized>(position: &mut R, depth: u32) -> Option<Move> {
    SearchEngine::new().choose_move(position, depth)
}
