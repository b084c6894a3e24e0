use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use rookery::movegen::{MoveList, generate_all_moves};
use rookery::perft::perft_divide;
use rookery::{Board, DEFAULT_DEPTH, Game, Move, PieceType, Search};

#[derive(Parser, Debug)]
#[command(name = "rookery", about = "Chess rules engine and minimax search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count leaf nodes of the legal move tree from the starting position.
    Perft {
        #[arg(long, default_value_t = 3)]
        depth: u32,
    },
    /// Search the position reached after the given moves.
    Bestmove {
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u8,
        /// Moves in coordinate notation, e.g. e2e4 e7e5.
        #[arg(long, num_args = 0..)]
        moves: Vec<String>,
    },
    /// Engine (White) against a seeded random mover (Black).
    Selfplay {
        #[arg(long, default_value_t = 2)]
        depth: u8,
        #[arg(long, default_value_t = 60)]
        plies: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Perft { depth } => {
            let mut board = Board::startpos();
            let color = board.side_to_move();
            let split = perft_divide(&mut board, color, depth)?;
            for (m, nodes) in &split {
                println!("{m}: {nodes}");
            }
            println!("perft({depth}): {}", split.iter().map(|(_, n)| n).sum::<u64>());
        }
        Command::Bestmove { depth, moves } => {
            let mut game = Game::new();
            for text in &moves {
                let m: Move = text.parse().with_context(|| format!("bad move {text:?}"))?;
                game.play(m.from(), m.to()).with_context(|| format!("cannot play {m}"))?;
                if game.board().pending_promotion().is_some() {
                    game.promote(PieceType::Queen)?;
                }
            }
            println!("{}", game.board());
            let result = Search::new(game.board(), game.side_to_move(), depth)?.run()?;
            match result.best {
                Some(m) => println!("bestmove {m} score {} nodes {}", result.score, result.nodes),
                None => println!("no legal move ({:?})", game.status()?),
            }
        }
        Command::Selfplay { depth, plies, seed } => selfplay(depth, plies, seed)?,
    }
    Ok(())
}

fn selfplay(depth: u8, plies: u32, seed: u64) -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();

    for _ in 0..plies {
        let status = game.status()?;
        if status.is_over() {
            println!("{status:?}");
            break;
        }

        let color = game.side_to_move();
        let chosen = if color == rookery::Color::White {
            game.best_move(depth)?
        } else {
            let mut list = MoveList::new();
            let mut board = game.board().clone_board();
            generate_all_moves(&mut board, color, &mut list)?;
            let moves: Vec<Move> = list.iter().copied().collect();
            moves.choose(&mut rng).copied()
        };
        let Some(m) = chosen else {
            bail!("{color:?} has no move although the game is not over");
        };

        game.play(m.from(), m.to())?;
        if game.board().pending_promotion().is_some() {
            game.promote(PieceType::Queen)?;
        }
        info!("{color:?} {m}");
        println!("{}. {color:?} {m}", game.board().turn());
    }

    println!("{}", game.board());
    Ok(())
}
