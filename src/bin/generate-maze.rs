//! CLI for maze generation

use clap::Parser;
use terminal_maze::{MazeGenerator, MazeSize};
use tracing_subscriber::EnvFilter;

/// Random perfect maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze size (10 to 50, even sizes are rounded up)
    #[arg(long, default_value_t = 21)]
    size: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Do not report the shortest path from start to end
    #[arg(long)]
    no_solve: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let size = MazeSize::new(args.size)?;

    let mut gen = MazeGenerator::new(args.seed);
    let grid = gen.generate_maze(size.get());
    println!("{}", grid);

    if !args.no_solve {
        let path = grid
            .shortest_path(grid.start(), grid.end())
            .ok_or_else(|| anyhow::anyhow!("End is not reachable from start"))?;
        println!("The shortest path is {} steps.", path.len() - 1);
    }
    Ok(())
}
