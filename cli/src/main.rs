use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use sweeper_core::{CellCount, Coord, Difficulty, GameConfig, GameSession};
use tracing_subscriber::filter::LevelFilter;

use command::{Command, HELP};

mod command;
mod render;

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(other: DifficultyArg) -> Self {
        match other {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset
    #[arg(short, long, value_enum, default_value = "easy")]
    difficulty: DifficultyArg,

    /// Custom board rows, needs --cols and --mines
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    /// Custom board columns
    #[arg(long, requires = "rows")]
    cols: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires = "rows")]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the board as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> Result<GameConfig> {
        match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => {
                GameConfig::new(rows, cols, mines).context("invalid custom board")
            }
            _ => Ok(Difficulty::from(self.difficulty).config()),
        }
    }
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn clock_seed() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_secs() ^ u64::from(now.subsec_nanos()).rotate_left(32)
}

/// Drives one engine session from stdin and owns the wall clock.
struct Frontend {
    game: GameSession,
    difficulty: Option<Difficulty>,
    json: bool,
    last_tick: Instant,
}

impl Frontend {
    fn new(args: &Args) -> Result<Self> {
        let config = args.config()?;
        let seed = args.seed.unwrap_or_else(clock_seed);
        log::debug!("seed: {}", seed);

        let mut game = GameSession::new(config, seed).context("could not create game")?;
        game.start_timer();
        Ok(Self {
            game,
            difficulty: args.rows.is_none().then(|| args.difficulty.into()),
            json: args.json,
            last_tick: Instant::now(),
        })
    }

    /// Feeds one tick per whole second since the last one.
    fn advance_clock(&mut self) {
        let secs = self.last_tick.elapsed().as_secs();
        for _ in 0..secs {
            self.game.tick();
        }
        self.last_tick += Duration::from_secs(secs);
    }

    fn show(&self, out: &mut impl Write) -> Result<()> {
        let snapshot = self.game.snapshot();
        if self.json {
            serde_json::to_writer(&mut *out, &snapshot)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", render::render(&snapshot))?;
        }
        Ok(())
    }

    /// Returns `false` once the player quits.
    fn handle(&mut self, command: Command, out: &mut impl Write) -> Result<bool> {
        self.advance_clock();

        match command {
            Command::Reveal(coords) => {
                let update = self.game.reveal(coords);
                log::info!(
                    "reveal {:?}: {} cells, {:?}",
                    coords,
                    update.cells.len(),
                    update.status
                );
                if update.has_update() {
                    self.show(out)?;
                }
            }
            Command::Flag(coords) => {
                let update = self.game.toggle_flag(coords);
                log::info!(
                    "flag {:?}: {:?}, {} flags left",
                    coords,
                    update.outcome,
                    update.flags_remaining
                );
                if update.has_update() {
                    self.show(out)?;
                }
            }
            Command::New(difficulty) => {
                let difficulty = difficulty.or(self.difficulty);
                let config = difficulty.map_or(self.game.config(), Difficulty::config);
                self.game.reset(config)?;
                self.game.start_timer();
                self.difficulty = difficulty;
                self.last_tick = Instant::now();
                match difficulty {
                    Some(difficulty) => writeln!(out, "New {} game", difficulty)?,
                    None => writeln!(out, "New game")?,
                }
                self.show(out)?;
            }
            Command::Show => self.show(out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let mut frontend = Frontend::new(&args)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", HELP)?;
    frontend.show(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("could not read input")?;
        match line.parse::<Command>() {
            Ok(command) => {
                if !frontend.handle(command, &mut out)? {
                    break;
                }
            }
            Err(err) => writeln!(out, "{:#}", err)?,
        }
        out.flush()?;
    }

    Ok(())
}
