use plybot::board::Board;
use plybot::perft::perft;

#[test]
fn perft_startpos_depth_one_is_twenty() {
    let mut board = Board::startpos();
    assert_eq!(perft(&mut board, 1), 20);
}

#[test]
fn perft_startpos_depth_two() {
    let mut board = Board::startpos();
    assert_eq!(perft(&mut board, 2), 400);
}

#[test]
#[ignore] // slow: the legality filter simulates every candidate per ply
fn perft_startpos_depth_three() {
    let mut board = Board::startpos();
    assert_eq!(perft(&mut board, 3), 8902);
}

#[test]
fn perft_leaves_the_board_unchanged() {
    let mut board = Board::startpos();
    let snapshot = board.clone();
    perft(&mut board, 2);
    assert_eq!(board, snapshot);
    assert_eq!(board.history_len(), 0);
}
