//! Per-piece pseudo-legal move generation. Same-color captures and
//! self-check are filtered later by `Board::refresh`; bounds are enforced by
//! `Board::tile` returning `None` off the edge.

use super::moves::{Move, Square};
use super::piece::{Color, Piece, PieceKind};
use super::Board;

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, 2),
    (-1, -2),
    (1, 2),
    (1, -2),
    (-2, 1),
    (-2, -1),
    (2, 1),
    (2, -1),
];

/// All pseudo-legal moves for one piece, in deterministic generation order.
pub fn pseudo_moves(board: &Board, piece: &Piece) -> Vec<Move> {
    match piece.kind {
        PieceKind::Rook => ray_moves(board, piece, &ORTHOGONAL),
        PieceKind::Bishop => ray_moves(board, piece, &DIAGONAL),
        PieceKind::Queen => {
            let mut moves = ray_moves(board, piece, &DIAGONAL);
            moves.extend(ray_moves(board, piece, &ORTHOGONAL));
            moves
        }
        PieceKind::Knight => offset_moves(board, piece, &KNIGHT_OFFSETS),
        PieceKind::King { .. } => king_moves(board, piece),
        PieceKind::Pawn => pawn_moves(board, piece),
    }
}

/// Walk each ray tile-by-tile; an occupied tile yields one final landing move
/// (capture legality resolved later) and stops the ray.
fn ray_moves(board: &Board, piece: &Piece, dirs: &[(i8, i8)]) -> Vec<Move> {
    let from = piece.square();
    let mut moves = Vec::new();
    for &(dx, dy) in dirs {
        let (mut x, mut y) = (piece.x + dx, piece.y + dy);
        while let Some(tile) = board.tile(x, y) {
            moves.push(Move::simple(from, Square::new(x, y)));
            if tile.piece.is_some() {
                break;
            }
            x += dx;
            y += dy;
        }
    }
    moves
}

fn offset_moves(board: &Board, piece: &Piece, offsets: &[(i8, i8)]) -> Vec<Move> {
    let from = piece.square();
    let mut moves = Vec::new();
    for &(dx, dy) in offsets {
        let (x, y) = (piece.x + dx, piece.y + dy);
        if board.tile(x, y).is_some() {
            moves.push(Move::simple(from, Square::new(x, y)));
        }
    }
    moves
}

fn king_moves(board: &Board, piece: &Piece) -> Vec<Move> {
    let from = piece.square();
    let mut moves = Vec::new();
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (x, y) = (piece.x + dx, piece.y + dy);
            if board.tile(x, y).is_some() {
                moves.push(Move::simple(from, Square::new(x, y)));
            }
        }
    }

    if piece.moves > 0 {
        return moves;
    }

    // Castling: reads the attacked-square cache computed at the start of the
    // current refresh, so eligibility sees the opponent's current threats.
    let in_check = board.attacked().contains(&from);

    let mut kingside = true;
    for x in piece.x + 1..7 {
        let sq = Square::new(x, piece.y);
        let occupied = board.tile(x, piece.y).map_or(true, |t| t.piece.is_some());
        if occupied || board.attacked().contains(&sq) || in_check {
            kingside = false;
            break;
        }
    }
    if kingside {
        if let Some(corner) = board.tile(7, piece.y) {
            if let Some(rook) = &corner.piece {
                if rook.kind == PieceKind::Rook && rook.moves == 0 {
                    let to = Square::new(piece.x + 2, piece.y);
                    let rook_to = Square::new(piece.x + 1, piece.y);
                    if to.in_bounds() && rook_to.in_bounds() {
                        moves.push(Move::castle(from, to, Square::new(7, piece.y), rook_to));
                    }
                }
            }
        }
    }

    let mut queenside = true;
    for x in (1..piece.x).rev() {
        let sq = Square::new(x, piece.y);
        let occupied = board.tile(x, piece.y).map_or(true, |t| t.piece.is_some());
        // The rook's transit square next to the corner may be attacked; the
        // king never crosses it.
        if occupied || (board.attacked().contains(&sq) && x != 1) || in_check {
            queenside = false;
            break;
        }
    }
    if queenside {
        if let Some(corner) = board.tile(0, piece.y) {
            if let Some(rook) = &corner.piece {
                if rook.kind == PieceKind::Rook && rook.moves == 0 {
                    let to = Square::new(piece.x - 2, piece.y);
                    let rook_to = Square::new(piece.x - 1, piece.y);
                    if to.in_bounds() && rook_to.in_bounds() {
                        moves.push(Move::castle(from, to, Square::new(0, piece.y), rook_to));
                    }
                }
            }
        }
    }

    moves
}

fn pawn_moves(board: &Board, piece: &Piece) -> Vec<Move> {
    let from = piece.square();
    let dir = piece.color.pawn_dir();
    let mut moves = Vec::new();

    // Single push onto an empty tile.
    let one_empty = match board.tile(piece.x, piece.y + dir) {
        Some(tile) if tile.piece.is_none() => {
            moves.push(Move::simple(from, Square::new(piece.x, piece.y + dir)));
            true
        }
        _ => false,
    };

    // Double push from the starting rank, both tiles empty.
    let start_rank = match piece.color {
        Color::White => 6,
        Color::Black => 1,
    };
    if piece.y == start_rank && one_empty {
        if let Some(tile) = board.tile(piece.x, piece.y + 2 * dir) {
            if tile.piece.is_none() {
                moves.push(Move::simple(from, Square::new(piece.x, piece.y + 2 * dir)));
            }
        }
    }

    // Diagonal captures onto occupied tiles only.
    for dx in [-1, 1] {
        if let Some(tile) = board.tile(piece.x + dx, piece.y + dir) {
            if tile.piece.is_some() {
                moves.push(Move::simple(from, Square::new(piece.x + dx, piece.y + dir)));
            }
        }
    }

    // En-passant: the immediately preceding move was an enemy pawn double
    // push landing adjacent on our rank. Destination is the empty square
    // behind that pawn.
    let ep_rank = match piece.color {
        Color::White => 3,
        Color::Black => 4,
    };
    if piece.y == ep_rank {
        if let Some(last) = board.last_move() {
            if let Some(pushed) = board.piece_at(last.to) {
                if pushed.kind == PieceKind::Pawn
                    && pushed.color != piece.color
                    && (last.from.y - last.to.y).abs() == 2
                    && last.to.y == piece.y
                    && (last.to.x - piece.x).abs() == 1
                {
                    moves.push(Move::en_passant(from, Square::new(last.to.x, piece.y + dir)));
                }
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_in_corner_has_two_targets() {
        let (board, errs) = Board::from_placement("N7/8/8/8/8/8/8/8");
        assert!(errs.is_empty());
        let piece = *board.piece_at(Square::new(0, 0)).unwrap();
        let moves = pseudo_moves(&board, &piece);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn rook_rays_stop_at_blockers() {
        // White rook a8, white pawn a2: the file ray stops on the pawn tile.
        let (board, _) = Board::from_placement("R7/8/8/8/8/8/P7/8");
        let rook = *board.piece_at(Square::new(0, 0)).unwrap();
        let moves = pseudo_moves(&board, &rook);
        // 7 along the rank, 6 down the file including the landing on the pawn.
        assert_eq!(moves.len(), 13);
        assert!(moves.iter().any(|m| m.to == Square::new(0, 6)));
        assert!(!moves.iter().any(|m| m.to == Square::new(0, 7)));
    }

    #[test]
    fn pawn_double_push_requires_both_tiles_empty() {
        let (board, _) = Board::from_placement("8/8/8/8/8/p7/P7/8");
        let pawn = *board.piece_at(Square::new(0, 6)).unwrap();
        let moves = pseudo_moves(&board, &pawn);
        assert!(moves.is_empty(), "blocked pawn generated {moves:?}");
    }
}
