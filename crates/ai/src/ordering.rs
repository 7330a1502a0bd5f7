use crate::rules::RulesEngine;
use engine::{piece_type, Move};
use std::cmp::Ordering;

/// Sort key for trying promising moves first. Larger keys are searched earlier.
///
/// Piece values here are the engine's type codes (pawn 1 through king 6),
/// not material values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOrderingKey {
    pub gives_check: bool,
    pub captured_type: u8,
    pub moved_type: u8,
    pub tactical_bonus: i32,
}

impl MoveOrderingKey {
    pub fn for_move<R: RulesEngine + ?Sized>(position: &R, mv: Move) -> Self {
        let gives_check = position.gives_check(mv);
        let captured_type = position.piece_at(mv.to).map(piece_type).unwrap_or(0);
        let moved_type = position.piece_at(mv.from).map(piece_type).unwrap_or(0);
        Self {
            gives_check,
            captured_type,
            moved_type,
            tactical_bonus: tactical_bonus(gives_check, captured_type),
        }
    }
}

/// 100 for a check plus ten times the captured type code.
pub fn tactical_bonus(gives_check: bool, captured_type: u8) -> i32 {
    let mut bonus = 0;
    if gives_check {
        bonus += 100;
    }
    bonus + 10 * captured_type as i32
}

impl Ord for MoveOrderingKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.gives_check
            .cmp(&other.gives_check)
            .then_with(|| self.captured_type.cmp(&other.captured_type))
            .then_with(|| self.moved_type.cmp(&other.moved_type))
            .then_with(|| self.tactical_bonus.cmp(&other.tactical_bonus))
    }
}

impl PartialOrd for MoveOrderingKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reorder `moves` so checks come first, then bigger captures, then bigger movers.
/// Never drops a move.
pub fn order_moves<R: RulesEngine + ?Sized>(position: &R, moves: Vec<Move>) -> Vec<(Move, MoveOrderingKey)> {
    let mut keyed: Vec<(Move, MoveOrderingKey)> = moves
        .into_iter()
        .map(|mv| (mv, MoveOrderingKey::for_move(position, mv)))
        .collect();
    keyed.sort_by(|a, b| b.1.cmp(&a.1));
    keyed
}
