use std::fmt;
use std::str::FromStr;

/// A board coordinate. `x` is the file (0 = a), `y` is the row in placement
/// order (0 = rank 8, 7 = rank 1). Both must stay in [0, 7]; `Board::tile`
/// enforces the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub x: i8,
    pub y: i8,
}

impl Square {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        (0..8).contains(&self.x) && (0..8).contains(&self.y)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.x as u8) as char;
        let rank = 8 - self.y;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file = chars.next().ok_or(())?;
        let rank = chars.next().ok_or(())?;
        if chars.next().is_some() {
            return Err(());
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(());
        }
        let x = (file as u8 - b'a') as i8;
        let y = 8 - (rank as u8 - b'0') as i8;
        Ok(Square::new(x, y))
    }
}

/// What a move does beyond relocating its piece. The variant is closed so
/// apply/undo are single exhaustive matches; captures and promotion are
/// discovered at apply time and live on the history record instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Simple,
    /// King two-column slide with the rook leg executed atomically.
    Castle { rook_from: Square, rook_to: Square },
    /// Destination is empty; the pawn behind it is removed.
    EnPassant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    pub fn simple(from: Square, to: Square) -> Self {
        Self { from, to, kind: MoveKind::Simple }
    }

    pub fn en_passant(from: Square, to: Square) -> Self {
        Self { from, to, kind: MoveKind::EnPassant }
    }

    pub fn castle(from: Square, to: Square, rook_from: Square, rook_to: Square) -> Self {
        Self { from, to, kind: MoveKind::Castle { rook_from, rook_to } }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Parse a coordinate move such as `e2e4` into its two squares. Anything
/// else, including input where byte 2 is not a character boundary, is `None`.
pub fn parse_coord_pair(s: &str) -> Option<(Square, Square)> {
    if s.len() != 4 || !s.is_char_boundary(2) {
        return None;
    }
    let from = s[..2].parse().ok()?;
    let to = s[2..].parse().ok()?;
    Some((from, to))
}
