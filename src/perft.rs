//! Legal-move node counting via make/undo on the shared board (no cloning).
//! The movegen acceptance harness: depth 1 from the starting position must
//! be exactly 20.

use crate::board::{Board, Move};

pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves: Vec<Move> = board.all_legal_moves().copied().collect();
    let mut nodes = 0u64;
    for mv in moves {
        if board.apply(&mv).is_err() {
            continue;
        }
        board.toggle_turn();
        board.refresh();
        nodes += perft(board, depth - 1);
        board.undo();
        board.toggle_turn();
    }
    // Leave the caller's caches consistent with its own ply.
    board.refresh();
    nodes
}
