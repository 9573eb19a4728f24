//! Monte Carlo tree search with UCB1 selection and a deterministic rollout:
//! instead of a random playout, a leaf is scored by the static evaluator of
//! the fully-applied position. The tree is an arena of nodes (parent links
//! are indices, never owning references) built fresh for every move choice,
//! and the search drives the same shared board as alpha-beta through
//! apply/undo — no board copies.

use crate::board::{Board, Color, Move};
use crate::search::eval::{evaluate, ENDGAME_PIECE_THRESHOLD};

const EXPLORATION: f32 = 0.5;
/// Hard cap on selection depth to keep runaway lines bounded.
const MAX_SELECTION_DEPTH: u32 = 40;

#[derive(Debug)]
struct Node {
    /// The move that leads from the parent into this node; `None` at the root.
    mv: Option<Move>,
    /// Cumulative rollout score.
    t: f32,
    /// Visit count.
    n: u32,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Orientation of this node's UCB1 value: the root carries the side to
    /// move and the flag flips at every tree level below it.
    maximize: bool,
}

impl Node {
    fn new(mv: Option<Move>, parent: Option<usize>, maximize: bool) -> Self {
        Self { mv, t: 0.0, n: 0, parent, children: Vec::new(), maximize }
    }

    /// UCB1 with the exploration term subtracted for a maximizing node and
    /// added for a minimizing one; unvisited nodes sort first either way.
    fn ucb1(&self, parent_n: u32) -> f32 {
        if self.n == 0 {
            return if self.maximize { f32::NEG_INFINITY } else { f32::INFINITY };
        }
        let mean = self.t / self.n as f32;
        let explore = EXPLORATION * ((parent_n as f32).ln() / self.n as f32).sqrt();
        if self.maximize {
            mean - explore
        } else {
            mean + explore
        }
    }
}

pub struct MonteCarlo {
    iterations: u32,
    endgame: bool,
}

impl MonteCarlo {
    pub fn new(iterations: u32) -> Self {
        Self { iterations, endgame: false }
    }

    pub fn endgame(&self) -> bool {
        self.endgame
    }

    /// Run the full iteration budget from the current (refreshed) position
    /// and return the root child with the highest visit count. The tree is
    /// discarded afterwards; the board comes back exactly as it went in.
    /// `None` means the root has no legal move.
    pub fn choose_move(&mut self, board: &mut Board) -> Option<Move> {
        let counts = board.piece_counts();
        if !self.endgame && counts[0] + counts[1] < ENDGAME_PIECE_THRESHOLD {
            log::warn!(
                "engine switching to endgame strategy ({} pieces left)",
                counts[0] + counts[1]
            );
            self.endgame = true;
        }

        let mut arena = vec![Node::new(None, None, board.turn() == Color::White)];
        for _ in 0..self.iterations {
            let leaf = self.select(board, &arena);
            self.expand(board, &mut arena, leaf);
            let value = evaluate(board, self.endgame);
            self.backpropagate(board, &mut arena, leaf, value);
        }

        let mut best: Option<usize> = None;
        for &child in &arena[0].children {
            match best {
                Some(current) if arena[child].n <= arena[current].n => {}
                _ => best = Some(child),
            }
        }
        let chosen = best.and_then(|idx| arena[idx].mv);
        if chosen.is_none() {
            log::warn!("no candidate move found; the side to move has no legal moves");
        }
        chosen
    }

    /// Descend from the root by best UCB1 child, applying each chosen move to
    /// the live board, until an unvisited node, a childless node, or the
    /// depth cap.
    fn select(&self, board: &mut Board, arena: &[Node]) -> usize {
        let mut current = 0usize;
        let mut depth = 0u32;
        loop {
            if depth > MAX_SELECTION_DEPTH {
                break;
            }
            let next = match self.best_child(arena, current) {
                Some(next) => next,
                None => break,
            };
            if let Some(mv) = arena[next].mv {
                if board.apply(&mv).is_err() {
                    // A tree move no longer valid means a protocol bug
                    // upstream; stop descending rather than corrupt state.
                    log::error!("selection could not apply {mv}");
                    break;
                }
                board.toggle_turn();
                board.refresh();
            }
            current = next;
            if arena[current].n == 0 {
                break;
            }
            depth += 1;
        }
        current
    }

    /// First-best child by UCB1 under the parent's orientation: a maximizing
    /// parent takes the largest value, a minimizing one the smallest. Ties
    /// keep the earliest child, so selection is deterministic.
    fn best_child(&self, arena: &[Node], parent: usize) -> Option<usize> {
        let parent_n = arena[parent].n;
        let mut best: Option<(usize, f32)> = None;
        for &child in &arena[parent].children {
            let score = arena[child].ucb1(parent_n);
            best = match best {
                None => Some((child, score)),
                Some((_, best_score))
                    if (arena[parent].maximize && score > best_score)
                        || (!arena[parent].maximize && score < best_score) =>
                {
                    Some((child, score))
                }
                keep => keep,
            };
        }
        best.map(|(idx, _)| idx)
    }

    /// Create one child per currently-legal move, tagged with the flipped
    /// maximize flag. No-op if the node already has children.
    fn expand(&self, board: &Board, arena: &mut Vec<Node>, at: usize) {
        if !arena[at].children.is_empty() {
            return;
        }
        let maximize = !arena[at].maximize;
        let moves: Vec<Move> = board.all_legal_moves().copied().collect();
        for mv in moves {
            let idx = arena.len();
            arena.push(Node::new(Some(mv), Some(at), maximize));
            arena[at].children.push(idx);
        }
    }

    /// Walk back up the parent chain, undoing each applied move as we ascend
    /// and accumulating the rollout at every node along the way, then refresh
    /// the root position once. The root only counts the visit; its score sum
    /// is never consulted.
    fn backpropagate(&self, board: &mut Board, arena: &mut [Node], from: usize, value: f32) {
        let mut current = from;
        while let Some(parent) = arena[current].parent {
            arena[current].t += value;
            arena[current].n += 1;
            board.undo();
            board.toggle_turn();
            current = parent;
        }
        arena[current].n += 1;
        board.refresh();
    }
}
