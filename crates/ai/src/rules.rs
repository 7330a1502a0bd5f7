//! The narrow view of the rules engine that search and evaluation rely on.

use engine::{Bitboard, Board, Move, Piece, Square, EMPTY, WHITE};
use std::ops::{Deref, DerefMut};

/// Chess rules as consumed by the searcher.
///
/// Implementors own the position; the searcher only borrows it for the
/// duration of a call and pairs every `push` with a `pop`.
pub trait RulesEngine {
    /// Every legal move for the side to move, in no particular order.
    fn legal_moves(&self) -> Vec<Move>;

    /// Apply a legal move in place.
    fn push(&mut self, mv: Move);

    /// Undo the most recent `push`, restoring all prior state.
    fn pop(&mut self);

    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Would `mv` put the opponent in check?
    fn gives_check(&self, mv: Move) -> bool;

    /// Checkmate, stalemate or any other terminal condition.
    fn is_game_over(&self) -> bool;

    /// Squares occupied by pieces of `piece_type` and `color`.
    fn pieces(&self, piece_type: u8, color: u8) -> Bitboard;

    fn white_to_move(&self) -> bool;
}

impl RulesEngine for Board {
    fn legal_moves(&self) -> Vec<Move> {
        self.get_all_legal_moves()
    }

    fn push(&mut self, mv: Move) {
        self.make_move(mv);
    }

    fn pop(&mut self) {
        // Only ever called to balance a push
        if let Err(err) = self.undo_move() {
            log::error!("pop without a matching push: {}", err);
        }
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        match self.get_piece(square) {
            EMPTY => None,
            piece => Some(piece),
        }
    }

    fn gives_check(&self, mv: Move) -> bool {
        Board::gives_check(self, mv)
    }

    fn is_game_over(&self) -> bool {
        Board::is_game_over(self)
    }

    fn pieces(&self, piece_type: u8, color: u8) -> Bitboard {
        Board::pieces(self, piece_type, color)
    }

    fn white_to_move(&self) -> bool {
        self.current_turn == WHITE
    }
}

/// A move applied for as long as the guard lives.
///
/// Dropping the guard pops the move, including when the scope is left by
/// unwinding, so the position is always handed back as it was received.
pub struct MoveGuard<'a, R: RulesEngine + ?Sized> {
    position: &'a mut R,
}

impl<'a, R: RulesEngine + ?Sized> MoveGuard<'a, R> {
    pub fn push(position: &'a mut R, mv: Move) -> Self {
        position.push(mv);
        Self { position }
    }
}

impl<R: RulesEngine + ?Sized> Deref for MoveGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.position
    }
}

impl<R: RulesEngine + ?Sized> DerefMut for MoveGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.position
    }
}

impl<R: RulesEngine + ?Sized> Drop for MoveGuard<'_, R> {
    fn drop(&mut self) {
        self.position.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{make_piece, PAWN};

    #[test]
    fn guard_pops_on_scope_exit() {
        let mut board = Board::new();
        let before = board.clone();
        let e2e4 = Move::from_uci("e2e4").unwrap();
        {
            let guard = MoveGuard::push(&mut board, e2e4);
            assert!(!guard.white_to_move());
            assert_eq!(guard.piece_at(e2e4.to), Some(make_piece(PAWN, WHITE)));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn guard_pops_when_unwinding() {
        let mut board = Board::new();
        let before = board.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = MoveGuard::push(&mut board, Move::from_uci("g1f3").unwrap());
            panic!("search aborted");
        }));
        assert!(result.is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn unmatched_pop_leaves_position_alone() {
        let mut board = Board::new();
        board.pop();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn empty_squares_have_no_piece() {
        let board = Board::new();
        assert_eq!(board.piece_at(Square::new(4, 4)), None);
        assert!(board.piece_at(Square::new(4, 0)).is_some());
    }
}
