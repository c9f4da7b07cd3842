use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{cursor, event, execute, terminal};
use hunt_core::{Attempts, Coord, DEFAULT_ATTEMPTS, DEFAULT_SIZE, HuntConfig, HuntRound};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use app::{App, ExitPolicy};
use input::{Input, input_for_event, input_for_line};
use render::{JsonRenderer, TerminalRenderer};

mod app;
mod input;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Side length of the square grid
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: Coord,

    /// Attempts per round
    #[arg(long, default_value_t = DEFAULT_ATTEMPTS)]
    attempts: Attempts,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seconds the final message stays up before exiting
    #[arg(long, default_value_t = 3)]
    exit_delay: u64,

    /// Start a new round after running out of attempts instead of exiting
    #[arg(long)]
    restart: bool,

    /// Read moves as lines from stdin and print every frame as JSON
    #[arg(long)]
    json: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = HuntConfig::new(args.size, args.attempts).context("Invalid game configuration")?;
    let round = match args.seed {
        Some(seed) => HuntRound::with_seed(config, seed),
        None => HuntRound::with_config(config),
    }
    .context("Could not start the hunt")?;

    let policy = ExitPolicy {
        delay: Duration::from_secs(args.exit_delay),
        restart: args.restart,
    };
    let mut app = App::new(round, policy);
    log::debug!("seed: {}", app.round().generator().seed());

    if args.json {
        run_headless(&mut app)
    } else {
        run_terminal(&mut app)
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let level = args.verbose.log_level_filter().as_str().to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Could not create log file {}", path.display()))?;
            builder.with_writer(Arc::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn run_headless(app: &mut App) -> Result<()> {
    let stdin = io::stdin();
    let inputs = stdin
        .lock()
        .lines()
        .map(|line| line.context("Could not read input"))
        .filter_map(|line| line.map(|line| input_for_line(&line)).transpose());

    let mut renderer = JsonRenderer::new(io::stdout().lock());
    app.run(&mut renderer, inputs)
}

fn run_terminal(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("Could not enable raw mode")?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)
        .context("Could not set up the terminal")?;

    let inputs = std::iter::repeat_with(read_key_input);
    let result = app.run(&mut TerminalRenderer::new(&mut stdout), inputs);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)
        .context("Could not restore the terminal")?;
    terminal::disable_raw_mode().context("Could not disable raw mode")?;
    result
}

/// Blocks until a key maps to something the game understands.
fn read_key_input() -> Result<Input> {
    loop {
        let event = event::read().context("Could not read terminal event")?;
        if let Some(input) = input_for_event(&event) {
            return Ok(input);
        }
    }
}
