use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use clap::Parser;
use engine::{Runtime, SCREEN_SIZE};
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use ui::{InputMap, Terminal};
use util::Logos;

pub const GAME_NAME: &str = "wildlands";

#[derive(Parser, Debug)]
struct Args {
    #[arg(
        long,
        value_parser = |e: &str| Ok::<Logos, &str>(Logos::new(e)),
        help = "Game world seed"
    )]
    seed: Option<Logos>,

    #[arg(long, default_value = "wildlands.log", help = "Log file")]
    log_file: PathBuf,
}

/// Log to a file, the terminal belongs to the game.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Creating log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let seed = args
        .seed
        .unwrap_or_else(|| Logos::sample(&mut rand::thread_rng(), 10));
    log::info!("{GAME_NAME} seed: {seed}");

    let mut runtime = Runtime::new(&seed)?;

    let input = ui::spawn_input_thread(InputMap::default());
    let mut terminal = Terminal::new(SCREEN_SIZE)?;
    engine::run(&mut runtime, &input, &mut terminal)?;

    // Restore the terminal before printing.
    drop(terminal);
    println!("Seed was {seed}, revived {} times.", runtime.cheat_count());
    Ok(())
}
