use plybot::board::{Board, Move, MoveKind, Square};

fn sq(s: &str) -> Square {
    s.parse().expect("valid square")
}

fn castles(board: &Board, king: &str) -> Vec<Move> {
    board
        .moves_for(sq(king))
        .map(|moves| {
            moves
                .iter()
                .filter(|mv| matches!(mv.kind, MoveKind::Castle { .. }))
                .copied()
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn both_wings_available_on_an_open_rank() {
    let (board, _) = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R");
    let moves = castles(&board, "e1");
    assert_eq!(moves.len(), 2);
    assert!(moves.iter().any(|mv| mv.to == sq("g1")));
    assert!(moves.iter().any(|mv| mv.to == sq("c1")));
}

#[test]
fn startpos_has_no_castles() {
    let board = Board::startpos();
    assert!(castles(&board, "e1").is_empty());
}

#[test]
fn attacked_transit_square_blocks_castling() {
    // Black rook f3 covers f1: no kingside castle.
    let (board, _) = Board::from_placement("4k3/8/8/8/8/5r2/8/4K2R");
    assert!(castles(&board, "e1").is_empty());
}

#[test]
fn king_in_check_cannot_castle() {
    let (board, _) = Board::from_placement("4k3/8/8/8/8/4r3/8/4K2R");
    assert!(castles(&board, "e1").is_empty());
}

#[test]
fn attacked_b_file_does_not_block_queenside() {
    // The king never crosses b1; a rook covering it is irrelevant.
    let (board, _) = Board::from_placement("4k3/8/8/8/8/1r6/8/R3K3");
    let moves = castles(&board, "e1");
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].to, sq("c1"));
}

#[test]
fn moved_rook_forfeits_its_wing() {
    let (mut board, _) = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R");

    // Shuttle the h1 rook out and back, with black replies in between.
    for (from, to) in [("h1", "h2"), ("a8", "a7"), ("h2", "h1"), ("a7", "a8")] {
        let mv = *board
            .moves_for(sq(from))
            .unwrap()
            .iter()
            .find(|mv| mv.to == sq(to))
            .unwrap();
        board.apply(&mv).unwrap();
        board.toggle_turn();
        board.refresh();
    }

    let moves = castles(&board, "e1");
    assert_eq!(moves.len(), 1, "only the untouched wing remains");
    assert_eq!(moves[0].to, sq("c1"));
}

#[test]
fn moved_king_never_castles() {
    let (mut board, _) = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R");
    for (from, to) in [("e1", "e2"), ("a8", "a7"), ("e2", "e1"), ("a7", "a8")] {
        let mv = *board
            .moves_for(sq(from))
            .unwrap()
            .iter()
            .find(|mv| mv.to == sq(to))
            .unwrap();
        board.apply(&mv).unwrap();
        board.toggle_turn();
        board.refresh();
    }
    assert!(castles(&board, "e1").is_empty());
}
