use anyhow::Result;
use clap::{Parser, ValueEnum};
use plybot::board::{parse_coord_pair, Board, Color, Move, Status};
use plybot::mcts::MonteCarlo;
use plybot::search::alphabeta::Engine;
use std::io::{self, Write};
use std::time::Duration;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyKind {
    Alphabeta,
    Mcts,
    Human,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess with alpha-beta and Monte Carlo engines", long_about = None)]
struct Args {
    /// Initial placement string (rank rows separated by '/'); standard start
    /// if omitted
    #[arg(long)]
    placement: Option<String>,

    /// Strategy playing White
    #[arg(long, value_enum, default_value_t = StrategyKind::Human)]
    white: StrategyKind,

    /// Strategy playing Black
    #[arg(long, value_enum, default_value_t = StrategyKind::Alphabeta)]
    black: StrategyKind,

    /// Alpha-beta search depth
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// MCTS iteration budget per move
    #[arg(long, default_value_t = 3200)]
    iterations: u32,

    /// Pause between engine moves in milliseconds (cosmetic pacing only)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Stop after this many plies
    #[arg(long, default_value_t = 400)]
    max_plies: u32,
}

enum Player {
    Alphabeta(Engine),
    Mcts(MonteCarlo),
    Human,
}

impl Player {
    fn new(kind: StrategyKind, args: &Args) -> Self {
        match kind {
            StrategyKind::Alphabeta => Player::Alphabeta(Engine::new(args.depth)),
            StrategyKind::Mcts => Player::Mcts(MonteCarlo::new(args.iterations)),
            StrategyKind::Human => Player::Human,
        }
    }

    fn pick(&mut self, board: &mut Board) -> Result<Option<Move>> {
        match self {
            Player::Alphabeta(engine) => {
                let choice = engine.choose_move(board);
                if let Some(scored) = &choice {
                    println!("engine evaluation: {:.2}", scored.score / 1000.0);
                }
                Ok(choice.map(|scored| scored.mv))
            }
            Player::Mcts(mcts) => Ok(mcts.choose_move(board)),
            Player::Human => get_human_move(board).map(Some),
        }
    }
}

fn get_human_move(board: &Board) -> Result<Move> {
    loop {
        print!("Enter your move (e.g. e2e4): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        let Some((from, to)) = parse_coord_pair(input) else {
            println!("Invalid move format! Use format like 'e2e4'");
            continue;
        };
        let found = board
            .moves_for(from)
            .and_then(|moves| moves.iter().find(|mv| mv.to == to).copied());
        match found {
            Some(mv) => return Ok(mv),
            None => println!("Illegal move!"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut board = match &args.placement {
        Some(placement) => {
            let (board, errors) = Board::from_placement(placement);
            if !errors.is_empty() {
                eprintln!("placement had {} bad character(s); continuing without them", errors.len());
            }
            board
        }
        None => Board::startpos(),
    };

    let mut white = Player::new(args.white, &args);
    let mut black = Player::new(args.black, &args);

    for _ in 0..args.max_plies {
        println!("\n{}'s turn", board.turn());
        println!("{board}");

        match board.status() {
            Status::Checkmate => {
                println!("\nCheckmate! {} wins!", board.turn().opponent());
                return Ok(());
            }
            Status::Stalemate => {
                println!("\nStalemate! Game drawn.");
                return Ok(());
            }
            Status::Check => println!("Check!"),
            Status::Ongoing => {}
        }

        let player = match board.turn() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let Some(mv) = player.pick(&mut board)? else {
            println!("No move available for {}.", board.turn());
            return Ok(());
        };

        println!("{} plays {}", board.turn(), mv);
        board.apply(&mv)?;
        board.toggle_turn();
        board.refresh();

        if let Some(ms) = args.delay_ms {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }

    println!("Reached the ply limit; stopping.");
    Ok(())
}
