use super::validation::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use super::Board;
use crate::bitboard::{get_king_attacks, get_knight_attacks, iterate_bits, squares_of};
use crate::types::*;

impl Board {
    /// Generate all legal moves for the current player
    pub fn get_all_legal_moves(&self) -> Vec<Move> {
        let mut moves = self.generate_pseudo_legal_moves();
        moves.retain(|&mv| self.leaves_king_safe(mv));
        moves
    }

    /// Destination squares the piece on `square` can legally reach.
    pub fn get_legal_moves(&self, square: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = self
            .get_all_legal_moves()
            .into_iter()
            .filter(|mv| mv.from == square)
            .map(|mv| mv.to)
            .collect();
        // Promotions produce four moves per target
        targets.dedup();
        targets
    }

    /// Moves that obey piece movement but may leave the king in check.
    pub fn generate_pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        let color = self.current_turn;

        for from in squares_of(self.bitboards.get_all_pieces(color)) {
            match piece_type(self.get_piece(from)) {
                PAWN => self.push_pawn_moves(from, color, &mut moves),
                KNIGHT => self.push_step_moves(from, get_knight_attacks(from.0), color, &mut moves),
                BISHOP => self.push_sliding_moves(from, &BISHOP_DIRECTIONS, color, &mut moves),
                ROOK => self.push_sliding_moves(from, &ROOK_DIRECTIONS, color, &mut moves),
                QUEEN => {
                    self.push_sliding_moves(from, &ROOK_DIRECTIONS, color, &mut moves);
                    self.push_sliding_moves(from, &BISHOP_DIRECTIONS, color, &mut moves);
                }
                KING => {
                    self.push_step_moves(from, get_king_attacks(from.0), color, &mut moves);
                    self.push_castling_moves(from, color, &mut moves);
                }
                _ => {}
            }
        }

        moves
    }

    fn push_pawn_moves(&self, from: Square, color: u8, moves: &mut Vec<Move>) {
        let (direction, starting_rank, promotion_rank) = if color == WHITE { (1, 1, 7) } else { (-1, 6, 0) };

        let mut push = |to: Square| {
            if to.rank() == promotion_rank {
                for promotion in PROMOTION_PIECES {
                    moves.push(Move::new_promotion(from, to, promotion));
                }
            } else {
                moves.push(Move::new(from, to));
            }
        };

        if let Some(forward) = from.offset(0, direction) {
            if is_empty(self.get_piece(forward)) {
                push(forward);
                if from.rank() == starting_rank {
                    if let Some(double) = forward.offset(0, direction) {
                        if is_empty(self.get_piece(double)) {
                            push(double);
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            if let Some(target) = from.offset(df, direction) {
                let target_piece = self.get_piece(target);
                if is_piece_color(target_piece, opposite_color(color)) {
                    push(target);
                } else if Some(target) == self.en_passant_target && is_empty(target_piece) {
                    let victim = self.get_piece(Square::new(target.file(), from.rank()));
                    if victim == make_piece(PAWN, opposite_color(color)) {
                        push(target);
                    }
                }
            }
        }
    }

    fn push_step_moves(&self, from: Square, attacks: u64, color: u8, moves: &mut Vec<Move>) {
        let targets = attacks & !self.bitboards.get_all_pieces(color);
        for index in iterate_bits(targets) {
            moves.push(Move::new(from, Square(index)));
        }
    }

    fn push_sliding_moves(&self, from: Square, directions: &[(i8, i8)], color: u8, moves: &mut Vec<Move>) {
        for &(df, dr) in directions {
            let mut current = from;
            while let Some(target) = current.offset(df, dr) {
                let target_piece = self.get_piece(target);
                if is_empty(target_piece) {
                    moves.push(Move::new(from, target));
                } else {
                    if piece_color(target_piece) != color {
                        moves.push(Move::new(from, target));
                    }
                    break;
                }
                current = target;
            }
        }
    }

    fn push_castling_moves(&self, from: Square, color: u8, moves: &mut Vec<Move>) {
        let home_rank = if color == WHITE { 0 } else { 7 };
        if from != Square::new(4, home_rank) {
            return;
        }
        let rights = get_castling_rights_for_color(self.castling_rights, color);
        if rights == 0 {
            return;
        }
        let enemy = opposite_color(color);
        if self.is_under_threat(from, enemy) {
            return;
        }

        let (kingside, queenside) = if color == WHITE {
            (WHITE_KINGSIDE, WHITE_QUEENSIDE)
        } else {
            (BLACK_KINGSIDE, BLACK_QUEENSIDE)
        };
        let rook = make_piece(ROOK, color);
        let empty = |files: &[u8]| files.iter().all(|&file| is_empty(self.get_piece(Square::new(file, home_rank))));
        let safe = |files: &[u8]| files.iter().all(|&file| !self.is_under_threat(Square::new(file, home_rank), enemy));

        if has_castling_right(rights, kingside)
            && self.get_piece(Square::new(7, home_rank)) == rook
            && empty(&[5, 6])
            && safe(&[5, 6])
        {
            moves.push(Move::new(from, Square::new(6, home_rank)));
        }

        if has_castling_right(rights, queenside)
            && self.get_piece(Square::new(0, home_rank)) == rook
            && empty(&[1, 2, 3])
            && safe(&[2, 3])
        {
            moves.push(Move::new(from, Square::new(2, home_rank)));
        }
    }
}
