//! Hex engine command-line harness
//!
//! Sets up a position from a move list, asks the engine for a move and
//! prints the board and search statistics. With `--selfplay` the engine
//! plays both sides until someone connects.

use std::error::Error;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::info;

use hex::rules::winning_chain;
use hex::{Board, HexPlayer, MoveResult, Pos, SearchConfig, Stone, DEFAULT_BOARD_SIZE};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    Red,
    Blue,
}

impl From<Side> for Stone {
    fn from(side: Side) -> Self {
        match side {
            Side::Red => Stone::Red,
            Side::Blue => Stone::Blue,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Alpha-beta Hex engine", long_about = None)]
struct Args {
    /// Board size (1-26)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    /// Maximum search depth
    #[arg(long, default_value_t = 3)]
    depth: u32,
    /// Single fixed-depth pass instead of iterative deepening
    #[arg(long)]
    fixed: bool,
    /// Candidate moves kept at each node
    #[arg(long, default_value_t = hex::search::DEFAULT_TOP_K)]
    top_k: usize,
    /// Time budget per move in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,
    /// Node budget per move
    #[arg(long)]
    node_limit: Option<u64>,
    /// Opening moves, alternating from Red, e.g. "c3,d4"
    #[arg(long, value_delimiter = ',')]
    moves: Vec<Pos>,
    /// Override the side to move after the opening
    #[arg(long, value_enum)]
    to_move: Option<Side>,
    /// Let the engine play both sides to the end
    #[arg(long)]
    selfplay: bool,
}

impl Args {
    fn search_config(&self) -> Result<SearchConfig, hex::HexError> {
        let mut config = SearchConfig::new(self.depth, !self.fixed)?.with_top_k(self.top_k)?;
        if let Some(ms) = self.time_ms {
            config = config.with_time_limit(Duration::from_millis(ms));
        }
        if let Some(limit) = self.node_limit {
            config = config.with_node_limit(limit);
        }
        Ok(config)
    }
}

fn report(side: Stone, result: &MoveResult) {
    let mv = result
        .best_move
        .map_or_else(|| "none".to_string(), |pos| pos.to_string());
    println!(
        "{side} plays {mv}  (score {}, {:?} depth {}, {} nodes, {} ms{})",
        result.score,
        result.mode,
        result.depth,
        result.nodes,
        result.time_ms,
        if result.cancelled { ", cut short" } else { "" }
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut board = Board::new(args.size)?;
    for &pos in &args.moves {
        board.play(pos)?;
    }
    if let Some(side) = args.to_move {
        board.set_to_move(side.into())?;
    }

    let mut player = HexPlayer::new(args.search_config()?);
    info!("{} on a {}x{} board", player.name(), args.size, args.size);

    loop {
        print!("{board}");
        if let Some(winner) = board.winner() {
            let chain: Vec<String> = winning_chain(&board, winner)
                .unwrap_or_default()
                .iter()
                .map(Pos::to_string)
                .collect();
            println!("{winner} wins: {}", chain.join(" "));
            break;
        }

        let side = board.to_move();
        let result = player.get_move_with_stats(&board);
        report(side, &result);

        let Some(pos) = result.best_move else {
            break;
        };
        if !args.selfplay {
            print!("{}", board.with_move(pos));
            break;
        }
        board.play(pos)?;
    }

    Ok(())
}
