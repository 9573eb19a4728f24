use plybot::board::Board;
use plybot::search::alphabeta::Engine;
use std::fs::File;
use std::io::{BufRead, BufReader};

#[derive(Debug, serde::Deserialize)]
struct PosRec {
    placement: String,
    best: String,
    depth: u32,
}

fn load_positions() -> Vec<PosRec> {
    // Env var override first, then the bundled sample.
    let path = std::env::var("PLYBOT_TEST_POSITIONS")
        .unwrap_or_else(|_| "tests/data/positions_sample.jsonl".to_string());
    let file = File::open(&path).expect("open positions fixture");
    BufReader::new(file)
        .lines()
        .filter_map(|line| line.ok())
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(&line).ok())
        .collect()
}

#[test]
fn fixture_positions_find_the_expected_move() {
    let records = load_positions();
    assert!(!records.is_empty());
    for rec in &records {
        let (mut board, errors) = Board::from_placement(&rec.placement);
        assert!(errors.is_empty(), "bad fixture placement {}", rec.placement);
        let mut engine = Engine::new(rec.depth);
        let chosen = engine
            .choose_move(&mut board)
            .unwrap_or_else(|| panic!("no move for {}", rec.placement));
        assert_eq!(chosen.mv.to_string(), rec.best, "placement {}", rec.placement);
    }
}
