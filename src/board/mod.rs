//! The shared mutable position: an 8x8 tile grid, a reversible apply/undo
//! protocol over a move history stack, and per-ply derived caches (attacked
//! squares, legal moves) rebuilt by [`Board::refresh`]. Both search
//! strategies drive one `Board` through the same protocol; turn advancement
//! belongs to the ply loop, not to apply/undo.

mod movegen;
mod moves;
mod piece;

pub use moves::{parse_coord_pair, Move, MoveKind, Square};
pub use piece::{Color, Piece, PieceKind};

use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Standard starting placement (rank 8 first).
pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("unrecognized placement character {ch:?} at index {index}")]
    UnrecognizedChar { index: usize, ch: char },
    #[error("placement character {ch:?} at index {index} falls outside the board")]
    SquareOutOfRange { index: usize, ch: char },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("move source square {at} holds no piece")]
    EmptySource { at: Square },
}

/// Terminal and in-check classification for the side to move. Stalemate is a
/// distinct terminal state, never folded into checkmate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

/// One grid cell. Exactly one tile exists per coordinate and it holds at most
/// one piece whose coordinates mirror the tile's.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub x: i8,
    pub y: i8,
    pub piece: Option<Piece>,
}

impl Tile {
    pub fn square(&self) -> Square {
        Square::new(self.x, self.y)
    }
}

/// History record for one applied logical move. A castle is a single record;
/// its rook leg is reversed by the same pop.
#[derive(Clone, Debug)]
struct Applied {
    mv: Move,
    /// Piece removed from the destination, or from the square behind it for
    /// en-passant. Restored verbatim on undo.
    captured: Option<Piece>,
    /// The pawn a promotion replaced, snapshotted after its counter bump so
    /// undo restores the exact pre-move piece.
    promoted_from: Option<Piece>,
}

#[derive(Clone, Debug)]
pub struct Board {
    tiles: [[Tile; 8]; 8], // indexed [y][x]
    turn: Color,
    history: Vec<Applied>,
    /// Squares attacked by the opponent of the side to move, as of the last
    /// refresh. Pawns contribute only their diagonal capture squares.
    attacked: HashSet<Square>,
    /// Legal moves per own piece, in board-scan order (x outer, y inner).
    legal: Vec<(Square, Vec<Move>)>,
}

impl Board {
    /// An empty board, White to move. Call `refresh` after placing pieces.
    pub fn empty() -> Self {
        let tiles = std::array::from_fn(|y| {
            std::array::from_fn(|x| Tile { x: x as i8, y: y as i8, piece: None })
        });
        Self {
            tiles,
            turn: Color::White,
            history: Vec::new(),
            attacked: HashSet::new(),
            legal: Vec::new(),
        }
    }

    pub fn startpos() -> Self {
        let (board, errors) = Self::from_placement(START_PLACEMENT);
        debug_assert!(errors.is_empty());
        board
    }

    /// Build a board from a rank-delimited placement string: letters place
    /// pieces (uppercase White, lowercase Black), digits skip empty squares,
    /// `/` advances to the next row. Unrecognized characters are skipped and
    /// reported; parsing continues best-effort and never fabricates a piece.
    pub fn from_placement(s: &str) -> (Self, Vec<PlacementError>) {
        let mut board = Self::empty();
        let mut errors = Vec::new();
        let (mut x, mut y) = (0i8, 0i8);
        for (index, ch) in s.chars().enumerate() {
            match ch {
                '/' => {
                    y += 1;
                    x = 0;
                    continue;
                }
                '1'..='8' => {
                    x += (ch as u8 - b'0') as i8;
                    continue;
                }
                _ => {}
            }
            let kind = match ch.to_ascii_lowercase() {
                'p' => PieceKind::Pawn,
                'n' => PieceKind::Knight,
                'b' => PieceKind::Bishop,
                'r' => PieceKind::Rook,
                'q' => PieceKind::Queen,
                'k' => PieceKind::King { castled: false },
                _ => {
                    errors.push(PlacementError::UnrecognizedChar { index, ch });
                    continue;
                }
            };
            if !(0..8).contains(&x) || !(0..8).contains(&y) {
                errors.push(PlacementError::SquareOutOfRange { index, ch });
                continue;
            }
            let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
            board.tiles[y as usize][x as usize].piece = Some(Piece::new(kind, color, x, y));
            x += 1;
        }
        for err in &errors {
            log::warn!("placement: {err}");
        }
        board.refresh();
        (board, errors)
    }

    /// Bounds-checked tile lookup; out-of-range coordinates are a hard stop.
    pub fn tile(&self, x: i8, y: i8) -> Option<&Tile> {
        if (0..8).contains(&x) && (0..8).contains(&y) {
            Some(&self.tiles[y as usize][x as usize])
        } else {
            None
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.tile(sq.x, sq.y).and_then(|t| t.piece.as_ref())
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Turn advancement is owned by the ply loop that also refreshes; it is
    /// deliberately not part of apply/undo.
    pub fn toggle_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    /// Per-color piece totals, Black in slot 0 and White in slot 1.
    pub fn piece_counts(&self) -> [usize; 2] {
        let mut counts = [0usize; 2];
        for row in &self.tiles {
            for tile in row {
                if let Some(piece) = &tile.piece {
                    counts[piece.color.index()] += 1;
                }
            }
        }
        counts
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|rec| rec.mv)
    }

    /// Squares currently attacked by the opponent of the side to move.
    pub fn attacked(&self) -> &HashSet<Square> {
        &self.attacked
    }

    /// Legal moves for the side to move, one entry per own piece in
    /// board-scan order. Valid until the next mutation + refresh.
    pub fn legal_moves(&self) -> &[(Square, Vec<Move>)] {
        &self.legal
    }

    pub fn moves_for(&self, sq: Square) -> Option<&[Move]> {
        self.legal
            .iter()
            .find(|(from, _)| *from == sq)
            .map(|(_, moves)| moves.as_slice())
    }

    pub fn all_legal_moves(&self) -> impl Iterator<Item = &Move> + '_ {
        self.legal.iter().flat_map(|(_, moves)| moves.iter())
    }

    pub fn legal_move_count(&self) -> usize {
        self.legal.iter().map(|(_, moves)| moves.len()).sum()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        for row in &self.tiles {
            for tile in row {
                if let Some(piece) = &tile.piece {
                    if piece.kind.is_king() && piece.color == color {
                        return Some(tile.square());
                    }
                }
            }
        }
        None
    }

    /// Destination squares of every pseudo-legal move of `by`, except that a
    /// pawn contributes only its two diagonal capture squares — never its
    /// pushes. Same-color destinations are included on purpose: a defended
    /// piece's square counts as attacked, which keeps the enemy king off it.
    pub fn attacked_by(&self, by: Color) -> HashSet<Square> {
        let mut attacked = HashSet::new();
        for x in 0..8i8 {
            for y in 0..8i8 {
                let piece = match &self.tiles[y as usize][x as usize].piece {
                    Some(p) if p.color == by => *p,
                    _ => continue,
                };
                if piece.kind == PieceKind::Pawn {
                    let dir = piece.color.pawn_dir();
                    for dx in [-1, 1] {
                        let sq = Square::new(piece.x + dx, piece.y + dir);
                        if sq.in_bounds() {
                            attacked.insert(sq);
                        }
                    }
                } else {
                    for mv in movegen::pseudo_moves(self, &piece) {
                        attacked.insert(mv.to);
                    }
                }
            }
        }
        attacked
    }

    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.attacked_by(color.opponent()).contains(&king),
            None => false,
        }
    }

    /// Classify the refreshed position for the side to move.
    pub fn status(&self) -> Status {
        let any_moves = self.legal.iter().any(|(_, moves)| !moves.is_empty());
        let check = self
            .king_square(self.turn)
            .map_or(false, |king| self.attacked.contains(&king));
        match (any_moves, check) {
            (false, true) => Status::Checkmate,
            (false, false) => Status::Stalemate,
            (true, true) => Status::Check,
            (true, false) => Status::Ongoing,
        }
    }

    /// Rebuild the per-ply caches: the attacked-square map first (castling
    /// eligibility reads it during generation), then the legal-move map with
    /// same-color captures dropped and self-check candidates simulated out
    /// via apply/undo on this very board.
    pub fn refresh(&mut self) {
        self.attacked = self.attacked_by(self.turn.opponent());
        let mut legal: Vec<(Square, Vec<Move>)> = Vec::new();
        for x in 0..8i8 {
            for y in 0..8i8 {
                let piece = match &self.tiles[y as usize][x as usize].piece {
                    Some(p) if p.color == self.turn => *p,
                    _ => continue,
                };
                let mut keep = Vec::new();
                for mv in movegen::pseudo_moves(self, &piece) {
                    if let Some(dst) = self.piece_at(mv.to) {
                        if dst.color == piece.color {
                            continue;
                        }
                    }
                    if self.apply(&mv).is_err() {
                        continue;
                    }
                    let attacked = self.attacked_by(self.turn.opponent());
                    let safe = self
                        .king_square(self.turn)
                        .map_or(true, |king| !attacked.contains(&king));
                    self.undo();
                    if safe {
                        keep.push(mv);
                    }
                }
                legal.push((Square::new(x, y), keep));
            }
        }
        self.legal = legal;
    }

    /// Apply a move: record any capture, relocate the mover (coordinates and
    /// move counter), promote a pawn reaching the last row to a Queen, remove
    /// the en-passant victim, push the history record, and for a castle
    /// execute the rook leg and set the king's castled flag. An empty source
    /// is a reported contract violation and leaves the board untouched.
    pub fn apply(&mut self, mv: &Move) -> Result<(), MoveError> {
        if !mv.from.in_bounds() || !mv.to.in_bounds() {
            log::error!("apply called with out-of-range move {mv}");
            return Err(MoveError::EmptySource { at: mv.from });
        }
        let mut piece = match self.tiles[mv.from.y as usize][mv.from.x as usize].piece.take() {
            Some(piece) => piece,
            None => {
                log::error!("apply called with empty source square {}", mv.from);
                return Err(MoveError::EmptySource { at: mv.from });
            }
        };

        let mut captured = self.tiles[mv.to.y as usize][mv.to.x as usize].piece.take();

        piece.x = mv.to.x;
        piece.y = mv.to.y;
        piece.moves += 1;

        let mut promoted_from = None;
        if piece.kind == PieceKind::Pawn && (mv.to.y == 0 || mv.to.y == 7) {
            promoted_from = Some(piece);
            piece.kind = PieceKind::Queen;
        }

        if mv.kind == MoveKind::EnPassant {
            let behind = Square::new(mv.to.x, mv.to.y - piece.color.pawn_dir());
            if behind.in_bounds() {
                captured = self.tiles[behind.y as usize][behind.x as usize].piece.take();
            }
        }

        if let MoveKind::Castle { rook_from, rook_to } = mv.kind {
            if let PieceKind::King { castled } = &mut piece.kind {
                *castled = true;
            }
            match self.tiles[rook_from.y as usize][rook_from.x as usize].piece.take() {
                Some(mut rook) => {
                    rook.x = rook_to.x;
                    rook.y = rook_to.y;
                    rook.moves += 1;
                    self.tiles[rook_to.y as usize][rook_to.x as usize].piece = Some(rook);
                }
                None => log::error!("castle move {mv} found no rook on {rook_from}"),
            }
        }

        self.tiles[mv.to.y as usize][mv.to.x as usize].piece = Some(piece);
        self.history.push(Applied { mv: *mv, captured, promoted_from });
        Ok(())
    }

    /// Pop and exactly reverse the last applied move, including the rook leg
    /// of a castle, a reconstructed pawn for a promotion, and the restored
    /// victim of an en-passant capture. Returns false on empty history.
    pub fn undo(&mut self) -> bool {
        let rec = match self.history.pop() {
            Some(rec) => rec,
            None => return false,
        };
        let Move { from, to, kind } = rec.mv;

        if let MoveKind::Castle { rook_from, rook_to } = kind {
            match self.tiles[rook_to.y as usize][rook_to.x as usize].piece.take() {
                Some(mut rook) => {
                    rook.x = rook_from.x;
                    rook.y = rook_from.y;
                    rook.moves -= 1;
                    self.tiles[rook_from.y as usize][rook_from.x as usize].piece = Some(rook);
                }
                None => log::error!("undo of castle {} found no rook on {rook_to}", rec.mv),
            }
        }

        let mover = self.tiles[to.y as usize][to.x as usize].piece.take();
        let mut piece = match rec.promoted_from {
            // Reconstruct the pawn the promotion replaced.
            Some(pawn) => pawn,
            None => match mover {
                Some(piece) => piece,
                None => {
                    log::error!("undo found no piece on {to}");
                    return false;
                }
            },
        };

        piece.x = from.x;
        piece.y = from.y;
        piece.moves -= 1;
        if matches!(kind, MoveKind::Castle { .. }) {
            if let PieceKind::King { castled } = &mut piece.kind {
                *castled = false;
            }
        }
        self.tiles[from.y as usize][from.x as usize].piece = Some(piece);

        match (kind, rec.captured) {
            (MoveKind::EnPassant, Some(victim)) => {
                self.tiles[victim.y as usize][victim.x as usize].piece = Some(victim);
            }
            (MoveKind::EnPassant, None) => {}
            (_, captured) => {
                self.tiles[to.y as usize][to.x as usize].piece = captured;
            }
        }
        true
    }
}

/// Board equality is positional: same occupancy (pieces with identical kind,
/// color, coordinates, counters and flags) and same side to move.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.turn == other.turn && self.tiles == other.tiles
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..8usize {
            write!(f, "{} ", 8 - y)?;
            for x in 0..8usize {
                match &self.tiles[y][x].piece {
                    Some(piece) => write!(f, " {}", piece.letter())?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_counts_and_turn() {
        let board = Board::startpos();
        assert_eq!(board.piece_counts(), [16, 16]);
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.history_len(), 0);
    }

    #[test]
    fn tile_lookup_is_bounds_checked() {
        let board = Board::startpos();
        assert!(board.tile(8, 0).is_none());
        assert!(board.tile(-1, 3).is_none());
        assert!(board.tile(0, 8).is_none());
        assert!(board.tile(7, 7).is_some());
    }

    #[test]
    fn undo_with_empty_history_is_false() {
        let mut board = Board::startpos();
        assert!(!board.undo());
    }

    #[test]
    fn apply_from_empty_square_is_a_noop() {
        let mut board = Board::startpos();
        let snapshot = board.clone();
        let mv = Move::simple(Square::new(4, 4), Square::new(4, 3));
        assert_eq!(board.apply(&mv), Err(MoveError::EmptySource { at: Square::new(4, 4) }));
        assert_eq!(board, snapshot);
        assert_eq!(board.history_len(), 0);
    }
}
