// Chess rule engine and move-search core: one reversible board, two
// interchangeable selection strategies.
pub mod board;
pub mod mcts;
pub mod perft;
pub mod search;
