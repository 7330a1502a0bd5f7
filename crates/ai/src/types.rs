use engine::Move;

/// Material balance from White's point of view.
pub type Score = i32;

/// Pruning bound sentinel. Kept clear of `i32::MIN` so it negates safely.
pub const SCORE_INFINITY: Score = i32::MAX;

/// Material value per piece type, indexed by the engine's type code
pub const PIECE_VALUES: [Score; 7] = [
    0, // Empty
    1, // Pawn
    3, // Knight
    3, // Bishop
    5, // Rook
    9, // Queen
    0, // King
];

/// Plies searched when nothing else is configured
pub const DEFAULT_DEPTH: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub evaluation: Score,
    pub depth: u32,
    pub nodes_searched: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u32,
    pub advanced_logging: bool,
}

impl SearchConfig {
    pub fn with_depth(depth: u32) -> Self {
        Self { depth, ..Self::default() }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            advanced_logging: false,
        }
    }
}

/// Plies left below this node and the depth the search started with.
///
/// The root is the only frame where `remaining == root`, which is where the
/// best move gets recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthBudget {
    pub remaining: u32,
    pub root: u32,
}

impl DepthBudget {
    pub fn new(depth: u32) -> Self {
        Self { remaining: depth, root: depth }
    }

    pub fn is_root(&self) -> bool {
        self.remaining == self.root
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    pub fn ply(&self) -> u32 {
        self.root - self.remaining
    }

    pub fn child(&self) -> Self {
        Self {
            remaining: self.remaining.saturating_sub(1),
            root: self.root,
        }
    }
}
