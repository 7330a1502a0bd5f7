use crate::types::*;

pub type Bitboard = u64;

pub const BITBOARD_EMPTY: Bitboard = 0;

// File masks
pub const FILE_A: Bitboard = 0x0101010101010101;
pub const FILE_H: Bitboard = 0x8080808080808080;

// Rank masks
pub const RANK_1: Bitboard = 0x00000000000000FF;
pub const RANK_8: Bitboard = 0xFF00000000000000;

// Square colors, used for same-colored bishop detection
pub const LIGHT_SQUARES: Bitboard = 0x55AA55AA55AA55AA;
pub const DARK_SQUARES: Bitboard = !LIGHT_SQUARES;

pub fn set_bit(bitboard: &mut Bitboard, square: u8) {
    *bitboard |= 1u64 << square;
}

pub fn clear_bit(bitboard: &mut Bitboard, square: u8) {
    *bitboard &= !(1u64 << square);
}

pub fn get_bit(bitboard: Bitboard, square: u8) -> bool {
    (bitboard & (1u64 << square)) != 0
}

pub fn square_to_bitboard(square: u8) -> Bitboard {
    1u64 << square
}

pub fn count_bits(bitboard: Bitboard) -> u32 {
    bitboard.count_ones()
}

pub fn index_to_square(index: u8) -> Square {
    Square(index)
}

// Pop LSB (remove and return the least significant bit)
pub fn pop_lsb(bitboard: &mut Bitboard) -> Option<u8> {
    if *bitboard == 0 {
        None
    } else {
        let lsb = bitboard.trailing_zeros() as u8;
        *bitboard &= *bitboard - 1;
        Some(lsb)
    }
}

pub struct BitboardIterator {
    bitboard: Bitboard,
}

impl BitboardIterator {
    pub fn new(bitboard: Bitboard) -> Self {
        BitboardIterator { bitboard }
    }
}

impl Iterator for BitboardIterator {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        pop_lsb(&mut self.bitboard)
    }
}

pub fn iterate_bits(bitboard: Bitboard) -> BitboardIterator {
    BitboardIterator::new(bitboard)
}

pub fn squares_of(bitboard: Bitboard) -> impl Iterator<Item = Square> {
    iterate_bits(bitboard).map(index_to_square)
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1),
];

const fn generate_step_masks(offsets: &[(i8, i8); 8]) -> [Bitboard; 64] {
    let mut masks = [0u64; 64];
    let mut square = 0;
    while square < 64 {
        let file = (square % 8) as i8;
        let rank = (square / 8) as i8;
        let mut i = 0;
        while i < offsets.len() {
            let new_file = file + offsets[i].0;
            let new_rank = rank + offsets[i].1;
            if new_file >= 0 && new_file < 8 && new_rank >= 0 && new_rank < 8 {
                masks[square] |= 1u64 << ((new_rank * 8 + new_file) as u32);
            }
            i += 1;
        }
        square += 1;
    }
    masks
}

static KNIGHT_ATTACKS: [Bitboard; 64] = generate_step_masks(&KNIGHT_OFFSETS);
static KING_ATTACKS: [Bitboard; 64] = generate_step_masks(&KING_OFFSETS);

pub fn get_knight_attacks(square: u8) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

pub fn get_king_attacks(square: u8) -> Bitboard {
    KING_ATTACKS[square as usize]
}

fn color_index(color: u8) -> usize {
    if color == WHITE {
        1
    } else {
        0
    }
}

/// Per color and piece type occupancy, kept in step with the mailbox.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BitboardManager {
    pieces: [[Bitboard; 7]; 2],
    colors: [Bitboard; 2],
}

impl BitboardManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_squares(squares: &[Piece; 64]) -> Self {
        let mut manager = Self::new();
        for (index, &piece) in squares.iter().enumerate() {
            manager.update_square(Square(index as u8), EMPTY, piece);
        }
        manager
    }

    /// Replace `old` with `new` on `square`.
    pub fn update_square(&mut self, square: Square, old: Piece, new: Piece) {
        if !is_empty(old) {
            let color = color_index(piece_color(old));
            clear_bit(&mut self.pieces[color][piece_type(old) as usize], square.0);
            clear_bit(&mut self.colors[color], square.0);
        }
        if !is_empty(new) {
            let color = color_index(piece_color(new));
            set_bit(&mut self.pieces[color][piece_type(new) as usize], square.0);
            set_bit(&mut self.colors[color], square.0);
        }
    }

    pub fn get_pieces(&self, color: u8, piece_type: u8) -> Bitboard {
        self.pieces[color_index(color)][piece_type as usize & 7]
    }

    pub fn get_all_pieces(&self, color: u8) -> Bitboard {
        self.colors[color_index(color)]
    }

    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    pub fn count_pieces(&self, color: u8, piece_type: u8) -> u32 {
        count_bits(self.get_pieces(color, piece_type))
    }

    pub fn find_pieces(&self, color: u8, piece_type: u8) -> Vec<Square> {
        squares_of(self.get_pieces(color, piece_type)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_masks() {
        // a1 reaches b3 and c2 only
        let a1 = get_knight_attacks(0);
        assert_eq!(count_bits(a1), 2);
        assert!(get_bit(a1, Square::new(1, 2).0));
        assert!(get_bit(a1, Square::new(2, 1).0));
        // d8 (59) includes f7 (53)
        assert!(get_bit(get_knight_attacks(59), 53));
        assert_eq!(count_bits(get_knight_attacks(Square::new(3, 3).0)), 8);
    }

    #[test]
    fn king_masks() {
        assert_eq!(count_bits(get_king_attacks(0)), 3);
        assert_eq!(count_bits(get_king_attacks(Square::new(4, 4).0)), 8);
        assert_eq!(get_king_attacks(7) & FILE_A, 0);
        assert_eq!(get_king_attacks(63) & RANK_1, 0);
        assert_eq!(get_king_attacks(56) & FILE_H, 0);
    }

    #[test]
    fn square_colors() {
        // a1 is dark, h1 is light
        assert!(get_bit(DARK_SQUARES, 0));
        assert!(get_bit(LIGHT_SQUARES, 7));
        assert_ne!(LIGHT_SQUARES & RANK_8 & square_to_bitboard(56), 0);
    }

    #[test]
    fn manager_tracks_updates() {
        let mut manager = BitboardManager::new();
        let knight = make_piece(KNIGHT, WHITE);
        manager.update_square(Square(1), EMPTY, knight);
        assert_eq!(manager.count_pieces(WHITE, KNIGHT), 1);
        manager.update_square(Square(1), knight, EMPTY);
        manager.update_square(Square(18), EMPTY, knight);
        assert_eq!(manager.find_pieces(WHITE, KNIGHT), vec![Square(18)]);
        assert_eq!(manager.get_all_pieces(BLACK), BITBOARD_EMPTY);
        assert_eq!(manager.occupied(), square_to_bitboard(18));
    }
}
