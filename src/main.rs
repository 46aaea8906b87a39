use std::{error::Error as _, io, path::PathBuf, process, time::Instant};

use clap::{ArgGroup, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use lhsolver::{
    BimatrixGame, DEFAULT_EPS, GameError, SolverConfig, all_lemke_with, lemke_howson,
    nfg::{self, NfgError},
    report::{ReportContext, ReportError, ReportFormat, write_equilibria, write_run},
};
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["pivot", "all"])))]
struct Args {
    /// Game file in NFG format. A random game is generated when missing.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of strategies of the first player of the random game.
    #[arg(short = 'w', long, default_value_t = 10)]
    dim1: usize,

    /// Number of strategies of the second player of the random game.
    #[arg(short = 'l', long, default_value_t = 10)]
    dim2: usize,

    /// Seed for the random game. Taken from the system when missing.
    #[arg(long)]
    seed: Option<u64>,

    /// Runs the Lemke-Howson algorithm once, dropping this label first. Labels go from 1 to
    /// DIM1 + DIM2.
    #[arg(short, long, allow_negative_numbers = true)]
    pivot: Option<isize>,

    /// Searches all equilibria reachable by the Lemke-Howson algorithm.
    #[arg(short, long)]
    all: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
    format: ReportFormat,

    /// Tolerance of the sign tests of the pivoting algorithm.
    #[arg(long, default_value_t = DEFAULT_EPS)]
    eps: f64,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Nfg(#[from] NfgError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

fn load_game(args: &Args) -> Result<BimatrixGame, CliError> {
    let game = match &args.input {
        Some(path) => {
            info!("Reading game from {}", path.display());
            nfg::from_file(path)?
        }
        None => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            BimatrixGame::random(args.dim1, args.dim2, &mut rng)?
        }
    };
    Ok(game)
}

fn solve(args: Args) -> Result<(), CliError> {
    let config = SolverConfig::new(args.eps)?;
    let game = load_game(&args)?;
    let (dim1, dim2) = game.num_strategies();
    info!("{dim1}x{dim2} game, minimum payoff {}", game.min_payoff());

    let game = game.rectified();
    let context = ReportContext { dim1, dim2, config };
    let mut out = io::stdout().lock();
    let now = Instant::now();

    if let Some(start) = args.pivot {
        let run = lemke_howson(&game, start, &config)?;
        info!("Elapsed: {:.2?}", now.elapsed());
        write_run(&mut out, &run, start, &context, args.format)?;
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan/blue} {elapsed} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        let (equilibria, stats) = all_lemke_with(&game, &config, |stats| {
            if stats.runs % 1000 == 0 {
                pb.set_message(format!("{} paths, {} pivots", stats.runs, stats.steps));
                pb.tick();
            }
        })?;
        pb.finish_and_clear();
        info!(
            "Elapsed: {:.2?}, {} equilibria, {} paths, {} pivots, depth {}",
            now.elapsed(),
            equilibria.len(),
            stats.runs,
            stats.steps,
            stats.max_depth
        );
        write_equilibria(&mut out, &equilibria, &stats, &context, args.format)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = solve(args) {
        eprintln!("Error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("Caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}
