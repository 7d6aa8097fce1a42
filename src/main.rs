//! Interactive terminal maze game

use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;
use clap::Parser;
use terminal_maze::{
    terminal::{self, Finish, MainMenuChoice, PostGameChoice},
    GameSession, MazeGenerator, MazeSize,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Walk out of a randomly generated maze as fast as you can
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze size for the first game (10 to 50); asked for when omitted
    #[arg(short, long, env = "MAZE_SIZE")]
    size: Option<usize>,

    /// Random seed, for repeatable mazes
    #[arg(long, env = "MAZE_SEED")]
    seed: Option<u64>,

    /// Write logs to this file. The terminal is used by the game, so
    /// nothing is logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Set up the terminal, run the menus, restore the terminal
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let mut stdout = io::stdout();
    terminal::setup(&mut stdout).context("Cannot switch terminal to raw mode")?;
    let result = run(&mut stdout, &args);
    terminal::restore(&mut stdout).context("Cannot restore terminal")?;
    result?;

    println!("Program finished. Goodbye!");
    Ok(())
}

fn run<W: Write>(out: &mut W, args: &Args) -> anyhow::Result<()> {
    let mut generator = MazeGenerator::new(args.seed);
    let mut first_size = args.size.map(MazeSize::new);

    while terminal::main_menu(out)? == MainMenuChoice::Play {
        let size = match first_size.take() {
            Some(Ok(size)) => Some(size),
            Some(Err(e)) => {
                warn!(error = %e, "ignoring configured maze size");
                terminal::prompt_size(out, Some(&e.to_string()))?
            }
            None => terminal::prompt_size(out, None)?,
        };
        let Some(size) = size else {
            continue;
        };

        let mut session = GameSession::new(size, &mut generator);
        info!(size = size.get(), "game started");
        loop {
            match terminal::play(out, &mut session)? {
                Finish::Quit => break,
                Finish::Won => match terminal::post_game_menu(out, &session)? {
                    PostGameChoice::PlayNew => {
                        let Some(size) = terminal::prompt_size(out, None)? else {
                            break;
                        };
                        session.new_maze(size, &mut generator);
                    }
                    PostGameChoice::MainMenu => break,
                    PostGameChoice::Quit => return Ok(()),
                },
            }
        }
    }
    Ok(())
}
