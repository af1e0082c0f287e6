//! Speedcubing practice timer.
//!
//! Keeps a solve history (`.cubetimer/store.json`) and generates scrambles.
//! Timing itself happens elsewhere: `record` receives the elapsed milliseconds.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;

use cubetimer::core::cube::{CubeState, Cubie};
use cubetimer::core::format::{format_millis, format_solve_time, format_stat};
use cubetimer::core::scramble::{Scramble, generate, redundancy_errors};
use cubetimer::core::solve::Solve;
use cubetimer::exit_codes;
use cubetimer::io::init::{InitOptions, init_timer};
use cubetimer::logging;
use cubetimer::session::{
    EditOutcome, RecordOutcome, SolveTarget, delete_solve, load_session, record_solve,
    session_stats, toggle_dnf, toggle_penalty,
};

#[derive(Parser)]
#[command(name = "cubetimer", version, about = "Speedcubing practice timer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.cubetimer/` with default config, schema and an empty store.
    Init {
        /// Overwrite existing files, clearing the solve history.
        #[arg(short, long)]
        force: bool,
    },
    /// Print generated scrambles, or check one for redundant moves.
    Scramble {
        /// Seed for reproducible scrambles.
        #[arg(long)]
        seed: Option<u64>,
        /// Number of scrambles to print.
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Check this scramble instead of generating one.
        #[arg(long, value_name = "TEXT", conflicts_with_all = ["seed", "count"])]
        check: Option<String>,
    },
    /// Print the cube state after a scramble as JSON.
    State {
        /// Scramble to apply; a fresh one is generated when omitted.
        scramble: Option<String>,
        #[arg(long, conflicts_with = "scramble")]
        seed: Option<u64>,
    },
    /// Record a finished solve.
    Record {
        /// Elapsed time in milliseconds.
        millis: u64,
        /// Scramble the solve used; a fresh one is generated when omitted.
        #[arg(long, value_name = "TEXT")]
        scramble: Option<String>,
        #[arg(long, conflicts_with = "scramble")]
        seed: Option<u64>,
    },
    /// List solves, most recent first.
    List,
    /// Print session statistics.
    Stats {
        /// Print as JSON (milliseconds, `null` when not enough data).
        #[arg(long)]
        json: bool,
    },
    /// Toggle DNF on a solve (latest when no id is given).
    Dnf { id: Option<u64> },
    /// Toggle the +2 penalty on a solve (latest when no id is given).
    Penalty { id: Option<u64> },
    /// Delete a solve (latest when no id is given).
    Delete { id: Option<u64> },
}

#[derive(Serialize)]
struct StateSnapshot<'a> {
    scramble: String,
    solved: bool,
    cubies: &'a [Cubie],
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let root = std::env::current_dir().context("resolve current directory")?;
    match cli.command {
        Command::Init { force } => cmd_init(&root, force),
        Command::Scramble { seed, count, check } => match check {
            Some(text) => cmd_check(&text),
            None => cmd_scramble(seed, count),
        },
        Command::State { scramble, seed } => cmd_state(scramble, seed),
        Command::Record {
            millis,
            scramble,
            seed,
        } => cmd_record(&root, millis, scramble, seed),
        Command::List => cmd_list(&root),
        Command::Stats { json } => cmd_stats(&root, json),
        Command::Dnf { id } => report_edit(toggle_dnf(&root, SolveTarget::from(id))?),
        Command::Penalty { id } => report_edit(toggle_penalty(&root, SolveTarget::from(id))?),
        Command::Delete { id } => report_edit(delete_solve(&root, SolveTarget::from(id))?),
    }
}

fn cmd_init(root: &Path, force: bool) -> Result<i32> {
    let paths = init_timer(root, &InitOptions { force })?;
    println!("initialized {}", display_relative(root, &paths.timer_dir).display());
    Ok(exit_codes::OK)
}

fn cmd_scramble(seed: Option<u64>, count: usize) -> Result<i32> {
    let mut rng = random_source(seed);
    for _ in 0..count {
        println!("{}", generate(&mut *rng));
    }
    Ok(exit_codes::OK)
}

fn cmd_check(text: &str) -> Result<i32> {
    let scramble = Scramble::parse(text);
    let errors = redundancy_errors(&scramble);
    if errors.is_empty() {
        println!("ok: {} moves", scramble.len());
        return Ok(exit_codes::OK);
    }
    for error in &errors {
        println!("{}", error);
    }
    Ok(exit_codes::REDUNDANT)
}

fn cmd_state(scramble: Option<String>, seed: Option<u64>) -> Result<i32> {
    let scramble = resolve_scramble(scramble, seed);
    let state = CubeState::solved().apply_scramble(&scramble);
    let snapshot = StateSnapshot {
        scramble: scramble.to_string(),
        solved: state.is_solved(),
        cubies: state.cubies(),
    };
    let payload = serde_json::to_string_pretty(&snapshot).context("serialize cube state")?;
    println!("{}", payload);
    Ok(exit_codes::OK)
}

fn cmd_record(
    root: &Path,
    millis: u64,
    scramble: Option<String>,
    seed: Option<u64>,
) -> Result<i32> {
    let scramble = match scramble {
        Some(text) => text,
        None => resolve_scramble(None, seed).to_string(),
    };
    match record_solve(root, millis, &scramble, Utc::now())? {
        RecordOutcome::Recorded(solve) => {
            println!("{}", solve_row(&solve));
            Ok(exit_codes::OK)
        }
        RecordOutcome::Discarded {
            elapsed_millis,
            min_millis,
        } => {
            eprintln!(
                "discarded: {} ms is under the {} ms minimum",
                elapsed_millis, min_millis
            );
            Ok(exit_codes::DISCARDED)
        }
    }
}

fn cmd_list(root: &Path) -> Result<i32> {
    let session = load_session(root)?;
    for solve in session.history.iter() {
        println!("{}", solve_row(solve));
    }
    Ok(exit_codes::OK)
}

fn cmd_stats(root: &Path, json: bool) -> Result<i32> {
    let stats = session_stats(root)?;
    if json {
        let payload = serde_json::to_string_pretty(&stats).context("serialize stats")?;
        println!("{}", payload);
        return Ok(exit_codes::OK);
    }
    println!("solves: {}", stats.count);
    println!("best:   {}", format_stat(stats.best.map(|ms| ms as f64)));
    println!("worst:  {}", format_stat(stats.worst.map(|ms| ms as f64)));
    println!("mean:   {}", format_stat(stats.mean));
    println!("ao5:    {}", format_stat(stats.ao5));
    println!("ao12:   {}", format_stat(stats.ao12));
    Ok(exit_codes::OK)
}

fn report_edit(outcome: EditOutcome) -> Result<i32> {
    match outcome {
        EditOutcome::Updated(solve) => {
            println!("{}", solve_row(&solve));
            Ok(exit_codes::OK)
        }
        EditOutcome::Deleted(solve) => {
            println!("deleted {}", solve_row(&solve));
            Ok(exit_codes::OK)
        }
        EditOutcome::NotFound(id) => {
            eprintln!("solve {} not found", id);
            Ok(exit_codes::NOT_FOUND)
        }
        EditOutcome::Empty => {
            eprintln!("no solves recorded");
            Ok(exit_codes::NOT_FOUND)
        }
    }
}

fn solve_row(solve: &Solve) -> String {
    let time = if solve.is_dnf {
        format!("DNF({})", format_millis(solve.time))
    } else if solve.penalty {
        format!("{}+", format_solve_time(solve))
    } else {
        format_solve_time(solve)
    };
    format!(
        "{}\t{}\t{}\t{}",
        solve.id,
        time,
        solve.date.to_rfc3339(),
        solve.scramble
    )
}

fn resolve_scramble(text: Option<String>, seed: Option<u64>) -> Scramble {
    match text {
        Some(text) => Scramble::parse(&text),
        None => generate(&mut *random_source(seed)),
    }
}

fn random_source(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    }
}

fn display_relative(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
