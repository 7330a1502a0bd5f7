use crate::bitboard::squares_of;
use crate::board::Board;
use crate::types::*;
use std::sync::OnceLock;

/// Zobrist hash keys for position hashing
pub struct ZobristKeys {
    pieces: [[u64; 64]; 12], // [piece_index][square]
    side_to_move: u64,
    castling_rights: [u64; 16],
    en_passant: [u64; 8], // by file
}

impl ZobristKeys {
    fn new() -> Self {
        let mut keys = ZobristKeys {
            pieces: [[0; 64]; 12],
            side_to_move: 0,
            castling_rights: [0; 16],
            en_passant: [0; 8],
        };

        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        let mut next = move || {
            // splitmix64
            state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        };

        for piece in keys.pieces.iter_mut() {
            for key in piece.iter_mut() {
                *key = next();
            }
        }
        keys.side_to_move = next();
        for key in keys.castling_rights.iter_mut() {
            *key = next();
        }
        for key in keys.en_passant.iter_mut() {
            *key = next();
        }

        keys
    }

    pub fn get() -> &'static ZobristKeys {
        static KEYS: OnceLock<ZobristKeys> = OnceLock::new();
        KEYS.get_or_init(ZobristKeys::new)
    }

    pub fn hash_position(&self, board: &Board) -> u64 {
        let mut hash = 0u64;

        for color in [WHITE, BLACK] {
            for piece_type in PIECE_TYPES {
                let piece_index = (piece_type - 1) as usize + if color == WHITE { 0 } else { 6 };
                for square in squares_of(board.pieces(piece_type, color)) {
                    hash ^= self.pieces[piece_index][square.0 as usize];
                }
            }
        }

        if board.current_turn == BLACK {
            hash ^= self.side_to_move;
        }

        hash ^= self.castling_rights[board.castling_rights as usize & 15];

        if let Some(en_passant_square) = board.en_passant_target {
            if en_passant_capturable(board, en_passant_square) {
                hash ^= self.en_passant[en_passant_square.file() as usize];
            }
        }

        hash
    }
}

// The target only distinguishes positions when a pawn of the side to move can take it
fn en_passant_capturable(board: &Board, target: Square) -> bool {
    let color = board.current_turn;
    let behind = if color == WHITE { -1 } else { 1 };
    let capturer = make_piece(PAWN, color);
    [-1, 1].into_iter().any(|df| {
        target
            .offset(df, behind)
            .is_some_and(|square| board.get_piece(square) == capturer)
    })
}
