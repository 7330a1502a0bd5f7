use crate::bitboard::{Bitboard, BitboardManager};
use crate::error::EngineError;
use crate::types::*;
use crate::zobrist::ZobristKeys;

pub mod moves;
pub mod state;
pub mod validation;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub squares: [Piece; 64],
    pub current_turn: u8,
    pub move_history: Vec<GameMove>,
    pub half_move_clock: u16,
    pub full_move_number: u16,
    pub castling_rights: u8,
    pub en_passant_target: Option<Square>,
    pub bitboards: BitboardManager,
    // Hash of every position reached, current one last
    position_keys: Vec<u64>,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_starting_position();
        board.castling_rights = ALL_CASTLING_RIGHTS;
        board.reset_position_keys();
        board
    }

    fn empty() -> Self {
        Self {
            squares: [EMPTY; 64],
            current_turn: WHITE,
            move_history: Vec::new(),
            half_move_clock: 0,
            full_move_number: 1,
            castling_rights: 0,
            en_passant_target: None,
            bitboards: BitboardManager::new(),
            position_keys: Vec::new(),
        }
    }

    fn setup_starting_position(&mut self) {
        let back_rank = [ROOK, KNIGHT, BISHOP, QUEEN, KING, BISHOP, KNIGHT, ROOK];
        for (file, &piece_type) in back_rank.iter().enumerate() {
            let file = file as u8;
            self.set_piece(Square::new(file, 0), make_piece(piece_type, WHITE));
            self.set_piece(Square::new(file, 1), make_piece(PAWN, WHITE));
            self.set_piece(Square::new(file, 6), make_piece(PAWN, BLACK));
            self.set_piece(Square::new(file, 7), make_piece(piece_type, BLACK));
        }
    }

    pub fn get_piece(&self, square: Square) -> Piece {
        self.squares[square.0 as usize]
    }

    pub fn set_piece(&mut self, square: Square, piece: Piece) {
        let old = self.squares[square.0 as usize];
        self.bitboards.update_square(square, old, piece);
        self.squares[square.0 as usize] = piece;
    }

    /// Squares holding pieces of the given type and color.
    pub fn pieces(&self, piece_type: u8, color: u8) -> Bitboard {
        self.bitboards.get_pieces(color, piece_type)
    }

    pub fn find_king(&self, color: u8) -> Option<Square> {
        self.bitboards.find_pieces(color, KING).into_iter().next()
    }

    pub fn position_key(&self) -> u64 {
        self.position_keys
            .last()
            .copied()
            .unwrap_or_else(|| ZobristKeys::get().hash_position(self))
    }

    pub(crate) fn position_keys(&self) -> &[u64] {
        &self.position_keys
    }

    pub(crate) fn push_position_key(&mut self) {
        let key = ZobristKeys::get().hash_position(self);
        self.position_keys.push(key);
    }

    pub(crate) fn pop_position_key(&mut self) {
        self.position_keys.pop();
    }

    fn reset_position_keys(&mut self) {
        self.position_keys.clear();
        self.push_position_key();
    }

    // FEN parsing functionality
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 || parts.len() > 6 {
            return Err(EngineError::InvalidFen(format!(
                "expected 4 to 6 fields, found {}",
                parts.len()
            )));
        }

        let mut board = Self::empty();

        board.parse_piece_placement(parts[0])?;

        board.current_turn = match parts[1] {
            "w" => WHITE,
            "b" => BLACK,
            other => return Err(EngineError::InvalidFen(format!("invalid active color '{}'", other))),
        };

        board.parse_castling_rights(parts[2])?;
        board.parse_en_passant(parts[3])?;

        if let Some(clock) = parts.get(4) {
            board.half_move_clock = clock
                .parse()
                .map_err(|_| EngineError::InvalidFen(format!("invalid halfmove clock '{}'", clock)))?;
        }
        if let Some(number) = parts.get(5) {
            board.full_move_number = number
                .parse()
                .map_err(|_| EngineError::InvalidFen(format!("invalid fullmove number '{}'", number)))?;
        }

        for color in [WHITE, BLACK] {
            if board.bitboards.count_pieces(color, KING) != 1 {
                return Err(EngineError::InvalidFen(format!(
                    "{} must have exactly one king",
                    color_name(color)
                )));
            }
        }

        board.reset_position_keys();
        Ok(board)
    }

    fn parse_piece_placement(&mut self, placement: &str) -> Result<(), EngineError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(EngineError::InvalidFen("piece placement must have 8 ranks".to_string()));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN starts from rank 8
            let mut file = 0u8;

            for ch in rank_str.chars() {
                if let Some(empty_squares) = ch.to_digit(10) {
                    file += empty_squares as u8;
                } else {
                    let piece = piece_from_char(ch)
                        .ok_or_else(|| EngineError::InvalidFen(format!("unknown piece '{}'", ch)))?;
                    if file >= 8 {
                        return Err(EngineError::InvalidFen(format!("too many squares in rank {}", rank + 1)));
                    }
                    self.set_piece(Square::new(file, rank), piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(EngineError::InvalidFen(format!("too many squares in rank {}", rank + 1)));
                }
            }

            if file != 8 {
                return Err(EngineError::InvalidFen(format!("incomplete rank {}", rank + 1)));
            }
        }

        Ok(())
    }

    fn parse_castling_rights(&mut self, castling_str: &str) -> Result<(), EngineError> {
        if castling_str == "-" {
            self.castling_rights = 0;
            return Ok(());
        }

        for ch in castling_str.chars() {
            match ch {
                'K' => self.castling_rights |= WHITE_KINGSIDE,
                'Q' => self.castling_rights |= WHITE_QUEENSIDE,
                'k' => self.castling_rights |= BLACK_KINGSIDE,
                'q' => self.castling_rights |= BLACK_QUEENSIDE,
                _ => return Err(EngineError::InvalidFen(format!("invalid castling right '{}'", ch))),
            }
        }

        Ok(())
    }

    fn parse_en_passant(&mut self, en_passant_str: &str) -> Result<(), EngineError> {
        if en_passant_str == "-" {
            self.en_passant_target = None;
            return Ok(());
        }

        let square = Square::from_algebraic(en_passant_str)
            .filter(|square| square.rank() == 2 || square.rank() == 5)
            .ok_or_else(|| EngineError::InvalidFen(format!("invalid en passant square '{}'", en_passant_str)))?;
        self.en_passant_target = Some(square);
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empty_run = 0;
            for file in 0..8 {
                let piece = self.get_piece(Square::new(file, rank));
                if is_empty(piece) {
                    empty_run += 1;
                } else {
                    if empty_run > 0 {
                        placement.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    placement.push(piece_char(piece));
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let turn = if self.current_turn == WHITE { "w" } else { "b" };

        let mut castling = String::new();
        for (right, ch) in [
            (WHITE_KINGSIDE, 'K'),
            (WHITE_QUEENSIDE, 'Q'),
            (BLACK_KINGSIDE, 'k'),
            (BLACK_QUEENSIDE, 'q'),
        ] {
            if has_castling_right(self.castling_rights, right) {
                castling.push(ch);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant_target
            .map(|square| square.to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {} {} {} {} {}",
            placement, turn, castling, en_passant, self.half_move_clock, self.full_move_number
        )
    }

    /// The same position with colors swapped and the board flipped vertically.
    pub fn mirrored(&self) -> Self {
        let mut board = Self::empty();
        for index in 0..64u8 {
            let piece = self.squares[index as usize];
            if !is_empty(piece) {
                let square = Square(index);
                let flipped = Square::new(square.file(), 7 - square.rank());
                board.set_piece(flipped, make_piece(piece_type(piece), opposite_color(piece_color(piece))));
            }
        }
        board.current_turn = opposite_color(self.current_turn);
        let rights = self.castling_rights;
        board.castling_rights = ((rights & 0b0011) << 2) | ((rights & 0b1100) >> 2);
        board.en_passant_target = self
            .en_passant_target
            .map(|square| Square::new(square.file(), 7 - square.rank()));
        board.half_move_clock = self.half_move_clock;
        board.full_move_number = self.full_move_number;
        board.reset_position_keys();
        board
    }

    pub fn can_player_move(&self) -> bool {
        !self.get_all_legal_moves().is_empty()
    }

    /// Parse a UCI move string and check it is legal here.
    pub fn parse_move(&self, text: &str) -> Result<Move, EngineError> {
        let mv = Move::from_uci(text).ok_or_else(|| EngineError::InvalidNotation(text.to_string()))?;
        if !self.is_valid_move(mv) {
            return Err(EngineError::IllegalMove(mv));
        }
        Ok(mv)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
