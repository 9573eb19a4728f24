//! Depth-limited minimax with alpha-beta pruning over the one shared board.
//! Every recursive step is a scoped apply -> toggle -> refresh -> recurse ->
//! undo -> toggle -> refresh; the board is fully restored before returning.

use crate::board::{Board, Color, Move};
use crate::search::eval::{evaluate, ENDGAME_PIECE_THRESHOLD};

#[derive(Clone, Copy, Debug)]
pub struct ScoredMove {
    pub mv: Move,
    /// White-positive evaluation of the chosen line.
    pub score: f32,
}

pub struct Engine {
    depth: u32,
    endgame: bool,
    nodes: u64,
}

impl Engine {
    pub fn new(depth: u32) -> Self {
        Self { depth, endgame: false, nodes: 0 }
    }

    /// Leaf evaluations performed so far, across calls.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn endgame(&self) -> bool {
        self.endgame
    }

    /// Pick a move for the side to move. The board must be refreshed.
    /// Returns `None` when the root has no legal move — a terminal outcome
    /// for this turn (checkmate or stalemate in reach), never a retry.
    pub fn choose_move(&mut self, board: &mut Board) -> Option<ScoredMove> {
        let counts = board.piece_counts();
        if !self.endgame && counts[0] + counts[1] < ENDGAME_PIECE_THRESHOLD {
            log::warn!(
                "engine switching to endgame strategy ({} pieces left)",
                counts[0] + counts[1]
            );
            self.endgame = true;
        }

        let maximize = board.turn() == Color::White;
        let (best, score) =
            self.alphabeta(board, self.depth, f32::NEG_INFINITY, f32::INFINITY, maximize);
        match best {
            Some(mv) => Some(ScoredMove { mv, score }),
            None => {
                log::warn!(
                    "no candidate move at depth {} (typically checkmate within the horizon)",
                    self.depth
                );
                None
            }
        }
    }

    fn alphabeta(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: f32,
        mut beta: f32,
        maximize: bool,
    ) -> (Option<Move>, f32) {
        if depth == 0 {
            self.nodes += 1;
            return (None, evaluate(board, self.endgame));
        }

        // The legal-move map is recomputed once per ply by refresh, not per
        // node; snapshot it before the board starts mutating underneath us.
        let moves: Vec<Move> = board.all_legal_moves().copied().collect();
        let mut best: Option<Move> = None;

        if maximize {
            let mut value = f32::NEG_INFINITY;
            for mv in moves {
                let score = self.visit(board, &mv, depth, alpha, beta, maximize);
                if score > value {
                    value = score;
                    best = Some(mv);
                }
                if score >= beta {
                    break;
                }
                alpha = alpha.max(score);
            }
            (best, value)
        } else {
            let mut value = f32::INFINITY;
            for mv in moves {
                let score = self.visit(board, &mv, depth, alpha, beta, maximize);
                if score < value {
                    value = score;
                    best = Some(mv);
                }
                if score <= alpha {
                    break;
                }
                beta = beta.min(score);
            }
            (best, value)
        }
    }

    fn visit(
        &mut self,
        board: &mut Board,
        mv: &Move,
        depth: u32,
        alpha: f32,
        beta: f32,
        maximize: bool,
    ) -> f32 {
        if let Err(err) = board.apply(mv) {
            // Legal moves always carry a source piece; treat this as the
            // contract violation it is and make the line unattractive.
            log::error!("search rejected move {mv}: {err}");
            return if maximize { f32::NEG_INFINITY } else { f32::INFINITY };
        }
        board.toggle_turn();
        board.refresh();

        let (_, score) = self.alphabeta(board, depth - 1, alpha, beta, !maximize);

        board.undo();
        board.toggle_turn();
        board.refresh();
        score
    }
}
