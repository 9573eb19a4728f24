use crate::board::{Board, Color, PieceKind};
use std::f32::consts::PI;

/// Total piece count below which both strategies flip to endgame heuristics.
/// A tunable, not a law; this is the value the engine was developed with.
pub const ENDGAME_PIECE_THRESHOLD: usize = 20;

/// Deterministic scalar score for a position, positive favoring White.
///
/// Per piece: material x100 (Queen doubled), a sinusoidal center-control
/// bonus (zeroed for a king outside the endgame, doubled for one inside it,
/// replaced by an advancement bonus for an endgame pawn), a -5 penalty for a
/// never-moved piece that is neither pawn nor rook, and +20 for a castled
/// king outside the endgame. Swapping every piece's color negates the score.
pub fn evaluate(board: &Board, endgame: bool) -> f32 {
    let mut assessment = 0.0f32;
    for x in 0..8i8 {
        for y in 0..8i8 {
            let piece = match board.tile(x, y).and_then(|t| t.piece.as_ref()) {
                Some(piece) => piece,
                None => continue,
            };

            let mut center =
                (piece.x as f32 * PI / 8.0).sin() * (piece.y as f32 * PI / 8.0).sin() * 10.0;
            match piece.kind {
                PieceKind::King { .. } => {
                    // Centralize the king only once material thins out.
                    center = if endgame { center * 2.0 } else { 0.0 };
                }
                PieceKind::Pawn if endgame => {
                    center = (piece.y as f32 * PI / 7.0).cos().abs() * 20.0;
                }
                _ => {}
            }

            let mut points = piece.kind.material() as f32 * 100.0;
            if piece.kind == PieceKind::Queen {
                points *= 2.0;
            }

            let developed =
                if !matches!(piece.kind, PieceKind::Pawn | PieceKind::Rook) && piece.moves < 1 {
                    -5.0
                } else {
                    0.0
                };
            let castled = if !endgame && matches!(piece.kind, PieceKind::King { castled: true }) {
                20.0
            } else {
                0.0
            };

            let total = points + center + developed + castled;
            match piece.color {
                Color::White => assessment += total,
                Color::Black => assessment -= total,
            }
        }
    }
    // A non-finite sum means a piece carried a broken material value; fail
    // loudly instead of poisoning the search.
    assert!(assessment.is_finite(), "evaluation produced a non-finite score");
    assessment
}
