use super::Board;
use crate::bitboard::{get_king_attacks, get_knight_attacks, iterate_bits};
use crate::types::*;

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Is `square` attacked by any piece of `by_color` on the given mailbox?
///
/// Works on a bare square array so legality checks can probe a hypothetical
/// placement without touching the board.
pub(crate) fn square_attacked(squares: &[Piece; 64], square: Square, by_color: u8) -> bool {
    let holds = |index: u8, piece_type: u8| squares[index as usize] == make_piece(piece_type, by_color);

    // A pawn attacks diagonally forward, so look one rank behind from the attacker's side
    let pawn_rank_step = if by_color == WHITE { -1 } else { 1 };
    for df in [-1, 1] {
        if let Some(from) = square.offset(df, pawn_rank_step) {
            if holds(from.0, PAWN) {
                return true;
            }
        }
    }

    if iterate_bits(get_knight_attacks(square.0)).any(|index| holds(index, KNIGHT)) {
        return true;
    }

    if iterate_bits(get_king_attacks(square.0)).any(|index| holds(index, KING)) {
        return true;
    }

    slider_attacks(squares, square, by_color, &ROOK_DIRECTIONS, ROOK)
        || slider_attacks(squares, square, by_color, &BISHOP_DIRECTIONS, BISHOP)
}

fn slider_attacks(
    squares: &[Piece; 64],
    square: Square,
    by_color: u8,
    directions: &[(i8, i8)],
    slider: u8,
) -> bool {
    for &(df, dr) in directions {
        let mut current = square;
        while let Some(next) = current.offset(df, dr) {
            let piece = squares[next.0 as usize];
            if !is_empty(piece) {
                if piece_color(piece) == by_color
                    && (piece_type(piece) == slider || piece_type(piece) == QUEEN)
                {
                    return true;
                }
                break;
            }
            current = next;
        }
    }
    false
}

pub(crate) fn find_king_on(squares: &[Piece; 64], color: u8) -> Option<Square> {
    let king = make_piece(KING, color);
    squares
        .iter()
        .position(|&piece| piece == king)
        .map(|index| Square(index as u8))
}

impl Board {
    /// Check if a move is legal in the current position
    pub fn is_valid_move(&self, mv: Move) -> bool {
        let from_piece = self.get_piece(mv.from);

        if !is_piece_color(from_piece, self.current_turn) {
            return false;
        }

        self.get_all_legal_moves().contains(&mv)
    }

    pub fn is_under_threat(&self, square: Square, by_color: u8) -> bool {
        square_attacked(&self.squares, square, by_color)
    }

    /// Is the side to move in check?
    pub fn is_in_check(&self) -> bool {
        self.is_color_in_check(self.current_turn)
    }

    pub fn is_color_in_check(&self, color: u8) -> bool {
        match self.find_king(color) {
            Some(king) => self.is_under_threat(king, opposite_color(color)),
            None => false,
        }
    }

    /// Would playing `mv` put the opponent in check?
    pub fn gives_check(&self, mv: Move) -> bool {
        let mover = piece_color(self.get_piece(mv.from));
        let mut squares = self.squares;
        self.displace(&mut squares, mv);
        match find_king_on(&squares, opposite_color(mover)) {
            Some(king) => square_attacked(&squares, king, mover),
            None => false,
        }
    }

    /// Does `mv` leave the mover's own king out of check?
    pub(crate) fn leaves_king_safe(&self, mv: Move) -> bool {
        let mover = piece_color(self.get_piece(mv.from));
        let mut squares = self.squares;
        self.displace(&mut squares, mv);
        match find_king_on(&squares, mover) {
            Some(king) => !square_attacked(&squares, king, opposite_color(mover)),
            None => true,
        }
    }

    pub(crate) fn is_en_passant_move(&self, mv: Move) -> bool {
        let piece = self.get_piece(mv.from);
        piece_type(piece) == PAWN
            && Some(mv.to) == self.en_passant_target
            && mv.from.file() != mv.to.file()
            && is_empty(self.get_piece(mv.to))
    }

    pub(crate) fn is_castling_move(&self, mv: Move) -> bool {
        piece_type(self.get_piece(mv.from)) == KING
            && (mv.from.file() as i8 - mv.to.file() as i8).abs() == 2
    }

    /// Apply the piece movement of `mv` to a copy of the mailbox.
    pub(crate) fn displace(&self, squares: &mut [Piece; 64], mv: Move) {
        let moving = squares[mv.from.0 as usize];

        if self.is_en_passant_move(mv) {
            squares[Square::new(mv.to.file(), mv.from.rank()).0 as usize] = EMPTY;
        }

        if self.is_castling_move(mv) {
            let (rook_from, rook_to) = castling_rook_squares(mv.to);
            squares[rook_to.0 as usize] = squares[rook_from.0 as usize];
            squares[rook_from.0 as usize] = EMPTY;
        }

        squares[mv.to.0 as usize] = match mv.promotion {
            Some(promotion) => make_piece(promotion, piece_color(moving)),
            None => moving,
        };
        squares[mv.from.0 as usize] = EMPTY;
    }
}

/// Rook origin and destination for the king landing on `king_to` when castling.
pub(crate) fn castling_rook_squares(king_to: Square) -> (Square, Square) {
    let rank = king_to.rank();
    if king_to.file() == 6 {
        (Square::new(7, rank), Square::new(5, rank))
    } else {
        (Square::new(0, rank), Square::new(3, rank))
    }
}
