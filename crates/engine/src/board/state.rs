use super::validation::castling_rook_squares;
use super::Board;
use crate::bitboard::{count_bits, DARK_SQUARES, LIGHT_SQUARES};
use crate::error::EngineError;
use crate::types::*;

impl Board {
    /// Validate and play a move.
    pub fn try_make_move(&mut self, mv: Move) -> Result<GameMove, EngineError> {
        if self.is_game_over() {
            return Err(EngineError::GameOver);
        }
        if !self.is_valid_move(mv) {
            return Err(EngineError::IllegalMove(mv));
        }
        Ok(self.make_move(mv))
    }

    /// Play a move already known to be legal.
    pub fn make_move(&mut self, mv: Move) -> GameMove {
        let moving_piece = self.get_piece(mv.from);
        let color = piece_color(moving_piece);

        let is_castling = self.is_castling_move(mv);
        let is_en_passant = self.is_en_passant_move(mv);
        let captured_square = if is_en_passant {
            Square::new(mv.to.file(), mv.from.rank())
        } else {
            mv.to
        };
        let captured_piece = self.get_piece(captured_square);

        let game_move = GameMove {
            mv,
            moved_piece: moving_piece,
            captured_piece,
            captured_square,
            is_castling,
            is_en_passant,
            previous_castling_rights: self.castling_rights,
            previous_en_passant_target: self.en_passant_target,
            previous_half_move_clock: self.half_move_clock,
            previous_full_move_number: self.full_move_number,
        };

        if is_en_passant {
            self.set_piece(captured_square, EMPTY);
        }
        if is_castling {
            let (rook_from, rook_to) = castling_rook_squares(mv.to);
            let rook = self.get_piece(rook_from);
            self.set_piece(rook_from, EMPTY);
            self.set_piece(rook_to, rook);
        }
        let placed = match mv.promotion {
            Some(promotion) => make_piece(promotion, color),
            None => moving_piece,
        };
        self.set_piece(mv.from, EMPTY);
        self.set_piece(mv.to, placed);

        self.update_castling_rights(mv, moving_piece, captured_piece);

        // Only a double pawn push leaves an en passant target
        self.en_passant_target = None;
        if piece_type(moving_piece) == PAWN && (mv.from.rank() as i8 - mv.to.rank() as i8).abs() == 2 {
            self.en_passant_target = Some(Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2));
        }

        if piece_type(moving_piece) == PAWN || !is_empty(captured_piece) {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }
        if color == BLACK {
            self.full_move_number += 1;
        }

        self.current_turn = opposite_color(self.current_turn);
        self.move_history.push(game_move);
        self.push_position_key();

        game_move
    }

    fn update_castling_rights(&mut self, mv: Move, moving_piece: Piece, captured_piece: Piece) {
        if piece_type(moving_piece) == KING {
            let color_rights = if piece_color(moving_piece) == WHITE {
                WHITE_KINGSIDE | WHITE_QUEENSIDE
            } else {
                BLACK_KINGSIDE | BLACK_QUEENSIDE
            };
            remove_castling_right(&mut self.castling_rights, color_rights);
        }

        // A rook leaving its corner, or being captured there, loses that side
        for (square, piece) in [(mv.from, moving_piece), (mv.to, captured_piece)] {
            if piece_type(piece) != ROOK {
                continue;
            }
            match (square.file(), square.rank()) {
                (0, 0) => remove_castling_right(&mut self.castling_rights, WHITE_QUEENSIDE),
                (7, 0) => remove_castling_right(&mut self.castling_rights, WHITE_KINGSIDE),
                (0, 7) => remove_castling_right(&mut self.castling_rights, BLACK_QUEENSIDE),
                (7, 7) => remove_castling_right(&mut self.castling_rights, BLACK_KINGSIDE),
                _ => {}
            }
        }
    }

    /// Undo the last move made
    pub fn undo_move(&mut self) -> Result<GameMove, EngineError> {
        let last_move = self.move_history.pop().ok_or(EngineError::NothingToUndo)?;
        let mv = last_move.mv;

        self.set_piece(mv.to, EMPTY);
        self.set_piece(last_move.captured_square, last_move.captured_piece);
        self.set_piece(mv.from, last_move.moved_piece);

        if last_move.is_castling {
            let (rook_from, rook_to) = castling_rook_squares(mv.to);
            let rook = self.get_piece(rook_to);
            self.set_piece(rook_to, EMPTY);
            self.set_piece(rook_from, rook);
        }

        self.castling_rights = last_move.previous_castling_rights;
        self.en_passant_target = last_move.previous_en_passant_target;
        self.half_move_clock = last_move.previous_half_move_clock;
        self.full_move_number = last_move.previous_full_move_number;
        self.current_turn = opposite_color(self.current_turn);
        self.pop_position_key();

        Ok(last_move)
    }

    pub fn last_move(&self) -> Option<&GameMove> {
        self.move_history.last()
    }

    /// Status of the side to move.
    pub fn game_status(&self) -> GameStatus {
        let in_check = self.is_in_check();

        if !self.can_player_move() {
            return if in_check {
                GameStatus::Checkmate(self.current_turn)
            } else {
                GameStatus::Stalemate
            };
        }

        if self.is_insufficient_material() {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        if self.half_move_clock >= 150 {
            return GameStatus::Draw(DrawReason::SeventyFiveMoves);
        }
        if self.repetition_count() >= 5 {
            return GameStatus::Draw(DrawReason::FivefoldRepetition);
        }

        if in_check {
            GameStatus::Check(self.current_turn)
        } else {
            GameStatus::InProgress
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_status().is_terminal()
    }

    /// How many times the current position has occurred, including now.
    pub fn repetition_count(&self) -> usize {
        let current = self.position_key();
        self.position_keys().iter().filter(|&&key| key == current).count()
    }

    /// Neither side can possibly deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        for color in [WHITE, BLACK] {
            for kind in [PAWN, ROOK, QUEEN] {
                if self.pieces(kind, color) != 0 {
                    return false;
                }
            }
        }

        let knights = self.pieces(KNIGHT, WHITE) | self.pieces(KNIGHT, BLACK);
        let bishops = self.pieces(BISHOP, WHITE) | self.pieces(BISHOP, BLACK);
        let minors = count_bits(knights) + count_bits(bishops);

        if minors <= 1 {
            return true;
        }
        // Bishops only, all on one square color
        knights == 0 && ((bishops & LIGHT_SQUARES) == 0 || (bishops & DARK_SQUARES) == 0)
    }
}
