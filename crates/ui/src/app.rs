use ai::{SearchConfig, SearchEngine, SearchResult};
use egui::{Color32, Rect, Sense, Vec2};
use engine::{color_name, is_empty, is_piece_color, piece_color, piece_type, Board, GameStatus, Move, Square};
use engine::{BISHOP, BLACK, KING, KNIGHT, PAWN, QUEEN, ROOK, WHITE};
use std::path::PathBuf;
use std::time::Instant;

pub struct GameSettings {
    pub human_color: u8,
    pub start_fen: String,
    pub search: SearchConfig,
    pub log_dir: PathBuf,
}

pub struct ChessApp {
    board: Board,
    search_engine: SearchEngine,
    settings: GameSettings,
    selected_square: Option<Square>,
    legal_moves: Vec<Square>,
    last_search: Option<SearchResult>,
    // Set when the AI should move on the next frame, so the human move is drawn first
    ai_pending: bool,
    game_over_logged: bool,
    turn_started: Instant,
    message: String,
}

impl ChessApp {
    /// `settings.start_fen` must already be a valid FEN.
    pub fn new(board: Board, settings: GameSettings) -> Self {
        let search_engine = SearchEngine::with_config(settings.search);
        let mut app = Self {
            board,
            search_engine,
            settings,
            selected_square: None,
            legal_moves: Vec::new(),
            last_search: None,
            ai_pending: false,
            game_over_logged: false,
            turn_started: Instant::now(),
            message: String::new(),
        };
        app.start_game();
        app
    }

    fn start_game(&mut self) {
        self.search_engine.reset_logger();
        self.search_engine.logger_mut().log_new_game(&self.board.to_fen());
        log::info!(
            "new game, human plays {} at depth {}",
            color_name(self.settings.human_color),
            self.search_engine.config().depth
        );
        self.selected_square = None;
        self.legal_moves.clear();
        self.last_search = None;
        self.game_over_logged = false;
        self.turn_started = Instant::now();
        self.message.clear();
        self.ai_pending = self.board.current_turn != self.settings.human_color;
    }

    fn new_game(&mut self) {
        if !self.game_over_logged && !self.board.move_history.is_empty() {
            self.search_engine.logger_mut().log_game_aborted("new game requested");
        }
        match Board::from_fen(&self.settings.start_fen) {
            Ok(board) => self.board = board,
            Err(err) => {
                log::warn!("falling back to the standard start: {}", err);
                self.board = Board::new();
            }
        }
        self.start_game();
    }

    fn save_log(&mut self, reason: &str) {
        let dir = self.settings.log_dir.clone();
        match self.search_engine.logger_mut().save_to_file(&dir, reason) {
            Ok(path) => {
                log::info!("game log written to {}", path.display());
                self.message = format!("💾 Log saved to {}", path.display());
            }
            Err(err) => {
                log::error!("could not save game log: {}", err);
                self.message = format!("❌ Could not save log: {}", err);
            }
        }
    }

    fn is_human_turn(&self) -> bool {
        self.board.current_turn == self.settings.human_color
    }

    fn play_ai_move(&mut self) {
        self.ai_pending = false;
        if self.board.is_game_over() || self.is_human_turn() {
            return;
        }

        let start = Instant::now();
        let depth = self.search_engine.config().depth;
        let result = self.search_engine.search_root(&mut self.board, depth);
        let elapsed = start.elapsed().as_millis() as u64;

        match result.best_move {
            Some(mv) => match self.board.try_make_move(mv) {
                Ok(_) => {
                    self.search_engine
                        .logger_mut()
                        .log_ai_move(mv, elapsed, result.evaluation, result.nodes_searched);
                }
                Err(err) => log::error!("search returned an unplayable move {}: {}", mv, err),
            },
            None => log::warn!("search found no move in {}", self.board.to_fen()),
        }
        self.last_search = Some(result);
        self.turn_started = Instant::now();
    }

    fn play_human_move(&mut self, mv: Move) {
        match self.board.try_make_move(mv) {
            Ok(_) => {
                let elapsed = self.turn_started.elapsed().as_millis() as u64;
                self.search_engine.logger_mut().log_human_move(mv, elapsed);
                self.ai_pending = true;
            }
            Err(err) => self.message = format!("❌ {}", err),
        }
        self.selected_square = None;
        self.legal_moves.clear();
    }

    fn check_game_over(&mut self) {
        if self.game_over_logged {
            return;
        }
        let status = self.board.game_status();
        if status.is_terminal() {
            self.game_over_logged = true;
            self.search_engine.logger_mut().log_game_over(status);
            log::info!("game over: {}", status);
            self.save_log("game over");
        }
    }

    fn status_line(&self) -> String {
        match self.board.game_status() {
            GameStatus::InProgress => format!("{} to move", color_name(self.board.current_turn)),
            status => status.to_string(),
        }
    }
}

impl eframe::App for ChessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ai_pending {
            self.play_ai_move();
        }
        self.check_game_over();

        egui::SidePanel::right("status").min_width(220.0).show(ctx, |ui| {
            ui.heading("Game");
            ui.label(self.status_line());
            ui.label(format!("You play {}", color_name(self.settings.human_color)));

            let mut depth = self.search_engine.config().depth;
            if ui.add(egui::Slider::new(&mut depth, 1..=6).text("Search depth")).changed() {
                self.search_engine.set_depth(depth);
            }
            let mut trace = self.search_engine.config().advanced_logging;
            if ui.checkbox(&mut trace, "Trace search in log").changed() {
                self.search_engine.set_advanced_logging(trace);
            }
            ui.separator();

            match &self.last_search {
                Some(result) => {
                    let best = result.best_move.map(|mv| mv.to_string()).unwrap_or_else(|| "-".to_string());
                    ui.label(format!("AI move: {}", best));
                    ui.label(format!("Evaluation: {:+}", result.evaluation));
                    ui.label(format!("Nodes: {}", result.nodes_searched));
                }
                None => {
                    ui.label("AI has not moved yet");
                }
            }
            ui.separator();

            if ui.button("New game").clicked() {
                self.new_game();
            }
            if ui.button("Save log").clicked() {
                self.save_log("saved from the menu");
            }
            if !self.message.is_empty() {
                ui.separator();
                ui.label(&self.message);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available_size = ui.available_size();
            let board_size = available_size.x.min(available_size.y) - 20.0;
            let square_size = board_size / 8.0;

            let board_rect = Rect::from_min_size(ui.cursor().min, Vec2::splat(board_size));
            let response = ui.allocate_rect(board_rect, Sense::click());

            if response.clicked() && self.is_human_turn() && !self.board.is_game_over() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let relative_pos = pos - board_rect.min;
                    if let Some(clicked) = Square::from_coords(relative_pos.x, relative_pos.y, square_size) {
                        self.handle_square_click(self.orient(clicked));
                    }
                }
            }

            self.draw_board(ui, board_rect, square_size);
        });

        if self.ai_pending {
            ctx.request_repaint();
        }
    }
}

impl ChessApp {
    /// Screen square to board square; Black sees the board from the other side.
    fn orient(&self, square: Square) -> Square {
        if self.settings.human_color == BLACK {
            Square::new(7 - square.file(), 7 - square.rank())
        } else {
            square
        }
    }

    fn handle_square_click(&mut self, clicked: Square) {
        if let Some(selected) = self.selected_square {
            if self.legal_moves.contains(&clicked) {
                self.play_human_move(self.human_move(selected, clicked));
                return;
            }
            if selected == clicked {
                self.selected_square = None;
                self.legal_moves.clear();
                return;
            }
        }

        if is_piece_color(self.board.get_piece(clicked), self.settings.human_color) {
            self.selected_square = Some(clicked);
            self.legal_moves = self.board.get_legal_moves(clicked);
        } else {
            self.selected_square = None;
            self.legal_moves.clear();
        }
    }

    // Pawns reaching the last rank always become queens
    fn human_move(&self, from: Square, to: Square) -> Move {
        let last_rank = if self.settings.human_color == WHITE { 7 } else { 0 };
        if piece_type(self.board.get_piece(from)) == PAWN && to.rank() == last_rank {
            Move::new_promotion(from, to, QUEEN)
        } else {
            Move::new(from, to)
        }
    }

    fn draw_board(&self, ui: &mut egui::Ui, board_rect: Rect, square_size: f32) {
        let painter = ui.painter();
        let last_move = self.board.last_move().map(|record| record.mv);

        for row in 0..8u8 {
            for column in 0..8u8 {
                let square = self.orient(Square::new(column, 7 - row));
                let is_light = (square.file() + square.rank()) % 2 == 1;

                let square_rect = Rect::from_min_size(
                    board_rect.min + Vec2::new(column as f32 * square_size, row as f32 * square_size),
                    Vec2::splat(square_size),
                );

                let base_color = if is_light {
                    Color32::from_rgb(240, 217, 181)
                } else {
                    Color32::from_rgb(181, 136, 99)
                };
                let square_color = if Some(square) == self.selected_square {
                    Color32::from_rgb(255, 255, 0)
                } else if last_move.is_some_and(|mv| mv.from == square || mv.to == square) {
                    Color32::from_rgb(205, 210, 106)
                } else {
                    base_color
                };

                painter.rect_filled(square_rect, 0.0, square_color);

                if self.legal_moves.contains(&square) {
                    let center = square_rect.center();
                    let hint = Color32::from_rgba_premultiplied(128, 128, 128, 179);
                    if !is_empty(self.board.get_piece(square)) {
                        painter.circle_filled(center, square_size * 0.4, hint);
                        painter.circle_filled(center, square_size * 0.25, square_color);
                    } else {
                        painter.circle_filled(center, square_size * 0.15, hint);
                    }
                }

                let piece = self.board.get_piece(square);
                if !is_empty(piece) {
                    draw_piece(painter, piece, square_rect);
                }
            }
        }

        painter.rect_stroke(board_rect, 0.0, egui::Stroke::new(2.0, Color32::BLACK));
    }
}

fn draw_piece(painter: &egui::Painter, piece: u8, square_rect: Rect) {
    let glyph = match (piece_type(piece), piece_color(piece)) {
        (KING, WHITE) => "♔",
        (QUEEN, WHITE) => "♕",
        (ROOK, WHITE) => "♖",
        (BISHOP, WHITE) => "♗",
        (KNIGHT, WHITE) => "♘",
        (PAWN, WHITE) => "♙",
        (KING, BLACK) => "♚",
        (QUEEN, BLACK) => "♛",
        (ROOK, BLACK) => "♜",
        (BISHOP, BLACK) => "♝",
        (KNIGHT, BLACK) => "♞",
        (PAWN, BLACK) => "♟",
        _ => "?",
    };

    painter.text(
        square_rect.center(),
        egui::Align2::CENTER_CENTER,
        glyph,
        egui::FontId::proportional(square_rect.width() * 0.8),
        Color32::BLACK,
    );
}
