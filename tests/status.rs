use plybot::board::{Board, Color, Status};

#[test]
fn startpos_is_ongoing() {
    let board = Board::startpos();
    assert_eq!(board.status(), Status::Ongoing);
    assert!(!board.in_check(Color::White));
    assert!(!board.in_check(Color::Black));
}

#[test]
fn rook_gives_check_with_moves_left() {
    // Black rook e2 checks the e1 king; White can capture or step aside.
    let (board, _) = Board::from_placement("4k3/8/8/8/8/8/4r3/4K3");
    assert!(board.in_check(Color::White));
    assert_eq!(board.status(), Status::Check);
    assert!(board.legal_move_count() > 0);
}

#[test]
fn cornered_king_is_checkmated() {
    // Queen g7 guarded by the g6 king; Black to move has nothing.
    let (mut board, _) = Board::from_placement("7k/6Q1/6K1/8/8/8/8/8");
    board.toggle_turn();
    board.refresh();
    assert!(board.in_check(Color::Black));
    assert_eq!(board.legal_move_count(), 0);
    assert_eq!(board.status(), Status::Checkmate);
}

#[test]
fn stalemate_is_not_checkmate() {
    // Black king a8 has no moves but is not in check.
    let (mut board, _) = Board::from_placement("k7/8/1Q6/8/8/8/8/7K");
    board.toggle_turn();
    board.refresh();
    assert!(!board.in_check(Color::Black));
    assert_eq!(board.legal_move_count(), 0);
    assert_eq!(board.status(), Status::Stalemate);
}

#[test]
fn no_filtered_move_leaves_own_king_in_check() {
    // While in check, every surviving legal move must resolve it.
    let (mut board, _) = Board::from_placement("4k3/8/8/8/8/8/4r3/4K3");
    let moves: Vec<_> = board.all_legal_moves().copied().collect();
    assert!(!moves.is_empty());
    for mv in moves {
        board.apply(&mv).unwrap();
        assert!(!board.in_check(Color::White), "{mv} leaves the king in check");
        assert!(board.undo());
    }
}

#[test]
fn pawn_pushes_do_not_give_check() {
    // A pawn threatens diagonally only: a pawn one push away from the king
    // square does not check it.
    let (board, _) = Board::from_placement("8/8/8/8/4k3/4P3/8/4K3");
    assert!(!board.in_check(Color::Black));
    // But a king diagonally adjacent to the pawn is attacked.
    let (board, _) = Board::from_placement("8/8/8/8/3k4/4P3/8/4K3");
    assert!(board.in_check(Color::Black));
}
