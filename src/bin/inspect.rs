use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use play_2048::engine;
use play_2048::game::Game;
use play_2048::serialization::{SnapshotStore, DEFAULT_SNAPSHOT_FILE};

#[derive(Debug, Parser)]
#[command(name = "inspect", about = "Print a saved 2048 game")]
struct Args {
    /// Snapshot file to read
    #[arg(default_value = DEFAULT_SNAPSHOT_FILE)]
    path: PathBuf,

    /// Print the raw JSON snapshot as well
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let store = SnapshotStore::new(&args.path);
    let Some(snapshot) = store.load()? else {
        anyhow::bail!("No saved game at '{}'", args.path.display());
    };
    let game = Game::restore(&snapshot)?;
    let grid = game.grid();

    if args.verbose {
        println!("{}", snapshot.to_json()?);
    }
    print!("{}", grid);
    println!("score: {}", game.score());
    println!("highest tile: {}", grid.highest_tile());
    println!("empty cells: {}", grid.count_empty());
    let legal: Vec<String> = engine::legal_moves(grid).iter().map(|m| m.to_string()).collect();
    if legal.is_empty() {
        println!("game over");
    } else {
        println!("legal moves: {}", legal.join(", "));
    }
    Ok(())
}
