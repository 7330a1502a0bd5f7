use crate::rules::RulesEngine;
use crate::types::*;
use engine::{count_bits, BLACK, PIECE_TYPES, WHITE};

/// Material balance: White's piece values minus Black's.
///
/// Positive favors White. Kings count for nothing, so a bare board is 0.
pub fn evaluate_position<R: RulesEngine + ?Sized>(position: &R) -> Score {
    let (white, black) = material(position);
    white - black
}

/// Total material for each side as `(white, black)`.
pub fn material<R: RulesEngine + ?Sized>(position: &R) -> (Score, Score) {
    let side_total = |color: u8| -> Score {
        PIECE_TYPES
            .iter()
            .map(|&piece_type| {
                count_bits(position.pieces(piece_type, color)) as Score * PIECE_VALUES[piece_type as usize]
            })
            .sum()
    };
    (side_total(WHITE), side_total(BLACK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Board;

    fn eval(fen: &str) -> Score {
        evaluate_position(&Board::from_fen(fen).unwrap())
    }

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(evaluate_position(&Board::new()), 0);
        assert_eq!(material(&Board::new()), (39, 39));
    }

    #[test]
    fn bare_kings_score_zero() {
        assert_eq!(eval("4k3/8/8/8/8/8/8/4K3 w - - 0 1"), 0);
    }

    #[test]
    fn piece_values() {
        assert_eq!(eval("4k3/8/8/8/8/8/P7/4K3 w - - 0 1"), 1);
        assert_eq!(eval("4k3/8/8/8/8/8/N7/4K3 w - - 0 1"), 3);
        assert_eq!(eval("4k3/8/8/8/8/8/B7/4K3 w - - 0 1"), 3);
        assert_eq!(eval("4k3/8/8/8/8/8/R7/4K3 w - - 0 1"), 5);
        assert_eq!(eval("4k3/8/8/8/8/8/Q7/4K3 w - - 0 1"), 9);
        assert_eq!(eval("4k3/q7/8/8/8/8/8/4K3 w - - 0 1"), -9);
    }

    #[test]
    fn side_to_move_does_not_matter() {
        assert_eq!(
            eval("r3k3/8/8/8/8/8/8/4K2N w - - 0 1"),
            eval("r3k3/8/8/8/8/8/8/4K2N b - - 0 1")
        );
    }

    #[test]
    fn mirrored_position_negates() {
        let board = Board::from_fen("r2qk2r/pp3ppp/2n5/8/3N4/8/PP3PPP/R2QKB1R w KQkq - 0 1").unwrap();
        let score = evaluate_position(&board);
        assert_ne!(score, 0);
        assert_eq!(evaluate_position(&board.mirrored()), -score);
    }
}
