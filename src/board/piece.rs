use super::moves::Square;

/// Side to move / piece ownership. White starts at the bottom two rows
/// (y = 6, 7) and moves toward y = 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Per-color slot used by `Board::piece_counts` (Black first).
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    /// Row delta for a pawn push of this color.
    pub fn pawn_dir(self) -> i8 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// The six piece kinds. Only the king carries extra state: whether it has
/// castled, which the evaluator rewards until the endgame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King { castled: bool },
}

impl PieceKind {
    /// Material value in pawn-ish units.
    pub fn material(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 5,
            PieceKind::Bishop => 5,
            PieceKind::Rook => 6,
            PieceKind::Queen => 8,
            PieceKind::King { .. } => 100,
        }
    }

    pub fn is_king(self) -> bool {
        matches!(self, PieceKind::King { .. })
    }

    /// Lowercase placement letter for this kind.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King { .. } => 'k',
        }
    }
}

/// A piece on the board. `x`/`y` always mirror the tile that owns the piece;
/// `moves` counts lifetime moves and drives castling and double-push
/// eligibility as well as the "undeveloped" evaluation penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub x: i8,
    pub y: i8,
    pub moves: u32,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, x: i8, y: i8) -> Self {
        Self { kind, color, x, y, moves: 0 }
    }

    pub fn square(&self) -> Square {
        Square::new(self.x, self.y)
    }

    /// Uppercase for White, lowercase for Black.
    pub fn letter(&self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }
}
