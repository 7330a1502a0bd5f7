use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub u8);

impl Square {
    pub fn new(file: u8, rank: u8) -> Self {
        Self(rank * 8 + file)
    }

    pub fn file(&self) -> u8 {
        self.0 % 8
    }

    pub fn rank(&self) -> u8 {
        self.0 / 8
    }

    /// Square reached by stepping `df` files and `dr` ranks, if still on the board.
    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Parse algebraic notation such as `e4`.
    pub fn from_algebraic(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Self::new(file, rank))
        } else {
            None
        }
    }

    pub fn from_coords(x: f32, y: f32, square_size: f32) -> Option<Self> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let file = (x / square_size) as u8;
        let row = (y / square_size) as u8;

        if file < 8 && row < 8 {
            // Flip rank for screen coordinates
            Some(Self::new(file, 7 - row))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, (b'1' + self.rank()) as char)
    }
}

// 4-bit piece representation
// Bits 0-2: piece type (0=empty, 1=pawn, 2=knight, 3=bishop, 4=rook, 5=queen, 6=king)
// Bit 3: color (0=black, 1=white)
pub type Piece = u8;

pub const EMPTY: u8 = 0;

// Piece types (bits 0-2)
pub const PAWN: u8 = 1;
pub const KNIGHT: u8 = 2;
pub const BISHOP: u8 = 3;
pub const ROOK: u8 = 4;
pub const QUEEN: u8 = 5;
pub const KING: u8 = 6;

pub const PIECE_TYPES: [u8; 6] = [PAWN, KNIGHT, BISHOP, ROOK, QUEEN, KING];
pub const PROMOTION_PIECES: [u8; 4] = [QUEEN, ROOK, BISHOP, KNIGHT];

// Colors (bit 3)
pub const BLACK: u8 = 0;
pub const WHITE: u8 = 8; // 1000 in binary

pub fn make_piece(piece_type: u8, color: u8) -> Piece {
    piece_type | color
}

pub fn piece_type(piece: Piece) -> u8 {
    piece & 7 // Extract bits 0-2
}

pub fn piece_color(piece: Piece) -> u8 {
    piece & 8 // Extract bit 3
}

pub fn is_white(piece: Piece) -> bool {
    !is_empty(piece) && piece_color(piece) == WHITE
}

pub fn is_black(piece: Piece) -> bool {
    piece_color(piece) == BLACK && piece != EMPTY
}

pub fn is_empty(piece: Piece) -> bool {
    piece == EMPTY
}

pub fn opposite_color(color: u8) -> u8 {
    color ^ WHITE
}

pub fn is_piece_color(piece: Piece, color: u8) -> bool {
    !is_empty(piece) && piece_color(piece) == color
}

pub fn color_name(color: u8) -> &'static str {
    if color == WHITE {
        "White"
    } else {
        "Black"
    }
}

pub fn piece_char(piece: Piece) -> char {
    let ch = match piece_type(piece) {
        PAWN => 'p',
        KNIGHT => 'n',
        BISHOP => 'b',
        ROOK => 'r',
        QUEEN => 'q',
        KING => 'k',
        _ => return '.',
    };
    if is_white(piece) {
        ch.to_ascii_uppercase()
    } else {
        ch
    }
}

pub fn piece_from_char(ch: char) -> Option<Piece> {
    let piece_type = match ch.to_ascii_lowercase() {
        'p' => PAWN,
        'n' => KNIGHT,
        'b' => BISHOP,
        'r' => ROOK,
        'q' => QUEEN,
        'k' => KING,
        _ => return None,
    };
    let color = if ch.is_ascii_uppercase() { WHITE } else { BLACK };
    Some(make_piece(piece_type, color))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<u8>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to, promotion: None }
    }

    pub fn new_promotion(from: Square, to: Square, promotion: u8) -> Self {
        Self { from, to, promotion: Some(promotion) }
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Parse long algebraic (UCI) notation: `e2e4`, `e7e8q`.
    pub fn from_uci(text: &str) -> Option<Self> {
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return None;
        }
        let from = Square::from_algebraic(&text[0..2])?;
        let to = Square::from_algebraic(&text[2..4])?;
        match text[4..].chars().next() {
            None => Some(Self::new(from, to)),
            Some(ch) => {
                let promotion = piece_type(piece_from_char(ch)?);
                if PROMOTION_PIECES.contains(&promotion) {
                    Some(Self::new_promotion(from, to, promotion))
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", piece_char(make_piece(promotion, BLACK)))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Check(u8),     // Which color is in check
    Checkmate(u8), // Which color is checkmated (other color wins)
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress | GameStatus::Check(_))
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Check(color) => write!(f, "{} is in check", color_name(*color)),
            GameStatus::Checkmate(color) => write!(
                f,
                "checkmate, {} wins",
                color_name(opposite_color(*color))
            ),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "draw by insufficient material")
            }
            GameStatus::Draw(DrawReason::SeventyFiveMoves) => write!(f, "draw by 75-move rule"),
            GameStatus::Draw(DrawReason::FivefoldRepetition) => {
                write!(f, "draw by fivefold repetition")
            }
        }
    }
}

/// Everything needed to take a move back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameMove {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured_piece: Piece,
    pub captured_square: Square,
    pub is_castling: bool,
    pub is_en_passant: bool,
    pub previous_castling_rights: u8,
    pub previous_en_passant_target: Option<Square>,
    pub previous_half_move_clock: u16,
    pub previous_full_move_number: u16,
}

impl GameMove {
    pub fn is_capture(&self) -> bool {
        !is_empty(self.captured_piece)
    }
}

// Castling rights bitfield constants
pub const WHITE_KINGSIDE: u8 = 0b0001;
pub const WHITE_QUEENSIDE: u8 = 0b0010;
pub const BLACK_KINGSIDE: u8 = 0b0100;
pub const BLACK_QUEENSIDE: u8 = 0b1000;
pub const ALL_CASTLING_RIGHTS: u8 = 0b1111;

pub fn has_castling_right(castling_rights: u8, right: u8) -> bool {
    castling_rights & right != 0
}

pub fn remove_castling_right(castling_rights: &mut u8, right: u8) {
    *castling_rights &= !right;
}

pub fn get_castling_rights_for_color(castling_rights: u8, color: u8) -> u8 {
    if color == WHITE {
        castling_rights & (WHITE_KINGSIDE | WHITE_QUEENSIDE)
    } else {
        castling_rights & (BLACK_KINGSIDE | BLACK_QUEENSIDE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_encoding_round_trips() {
        let piece = make_piece(QUEEN, WHITE);
        assert_eq!(piece_type(piece), QUEEN);
        assert_eq!(piece_color(piece), WHITE);
        assert!(is_white(piece));
        assert!(!is_black(piece));
        assert!(is_black(make_piece(PAWN, BLACK)));
        assert!(!is_black(EMPTY));
        assert!(!is_white(EMPTY));
    }

    #[test]
    fn uci_notation() {
        let mv = Move::from_uci("e7e8q").unwrap();
        assert_eq!(mv.from, Square::new(4, 6));
        assert_eq!(mv.to, Square::new(4, 7));
        assert_eq!(mv.promotion, Some(QUEEN));
        assert_eq!(mv.to_string(), "e7e8q");
        assert_eq!(Move::from_uci("g1f3").unwrap().to_string(), "g1f3");
        assert!(Move::from_uci("e7e8k").is_none());
        assert!(Move::from_uci("i1a1").is_none());
        assert!(Move::from_uci("e2").is_none());
    }

    #[test]
    fn square_offsets_stay_on_board() {
        let a1 = Square::new(0, 0);
        assert_eq!(a1.offset(1, 2), Some(Square::new(1, 2)));
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(Square::new(7, 7).offset(0, 1), None);
    }

    #[test]
    fn screen_coordinates_flip_rank() {
        assert_eq!(Square::from_coords(5.0, 5.0, 10.0), Some(Square::new(0, 7)));
        assert_eq!(Square::from_coords(75.0, 75.0, 10.0), Some(Square::new(7, 0)));
        assert_eq!(Square::from_coords(85.0, 5.0, 10.0), None);
        assert_eq!(Square::from_coords(-1.0, 5.0, 10.0), None);
    }
}
