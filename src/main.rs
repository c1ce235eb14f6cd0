//! Wordle Bot CLI
//!
//! Plays interactively against a live game, or against a known target.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use wordle_bot::heuristic::{coverage_score, letter_coverage};
use wordle_bot::{
    initial_guess, load_dictionary, load_dictionary_file, Game, GameConfig, GameReport, GuessMode,
    InteractiveFeedback, Outcome, RoundState, Word, DEFAULT_MAX_ROUNDS,
};

/// Candidates printed after each round before the list is cut short.
const MAX_LISTED: usize = 40;

#[derive(Debug, Parser)]
#[command(name = "wordle-bot", version, about = "Greedy exhaustive-search Wordle solver")]
struct Cli {
    /// Word list, one word per line [default: bundled dictionary]
    #[arg(short, long, global = true)]
    dictionary: Option<PathBuf>,

    /// Which words may be guessed after the first round
    #[arg(long, value_enum, default_value_t = GuessMode::Easy, global = true)]
    mode: GuessMode,

    /// Rounds of feedback before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS, global = true)]
    rounds: usize,

    /// Score guesses on a single thread
    #[arg(long, global = true)]
    sequential: bool,

    /// Seconds allowed per search; the best guess so far is used after that
    #[arg(long, global = true)]
    time_limit: Option<f64>,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    quiet: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Enter feedback from a live game (default)
    Play,
    /// Solve for a known target word
    Solve { target: String },
    /// Print the opening guess
    Suggest,
    /// Solve every dictionary word and report the guess distribution
    Benchmark {
        /// Only the first N dictionary words
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn game_config(cli: &Cli) -> Result<GameConfig> {
    let time_limit = cli
        .time_limit
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("invalid --time-limit")?;
    Ok(GameConfig::default()
        .with_mode(cli.mode)
        .with_max_rounds(cli.rounds)
        .with_parallel(!cli.sequential)
        .with_time_limit(time_limit))
}

fn progress_bar(quiet: bool, template: &str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(0).with_style(style)
}

fn print_candidates(words: &[Word]) {
    println!("after pruning, {} possibilities:", words.len());
    let listed: Vec<&str> = words.iter().take(MAX_LISTED).map(Word::as_str).collect();
    if words.len() > MAX_LISTED {
        println!("{} ...", listed.join(" "));
    } else {
        println!("{}", listed.join(" "));
    }
}

fn run_play(game: &Game) -> Result<()> {
    let mut source = InteractiveFeedback::new(io::stdin().lock(), io::stdout());
    let mut state = game.start();

    loop {
        if let RoundState::AwaitingFeedback {
            guess, rationale, ..
        } = &state
        {
            println!("guess: {}", guess.as_str().to_uppercase());
            println!("{rationale}");
        }
        state = game.step(state, &mut source)?;

        match &state {
            RoundState::AwaitingGuess { words, .. } => print_candidates(words),
            RoundState::AwaitingFeedback { .. } => {}
            RoundState::Solved { word, rounds } => {
                println!("solution after {rounds} guesses: {}", word.as_str().to_uppercase());
                return Ok(());
            }
            RoundState::Failed { round } => {
                bail!("all possibilities eliminated after {round} guesses");
            }
            RoundState::Exhausted { words } => {
                println!("giving up after {} tries.", game.config().max_rounds);
                print_candidates(words);
                return Ok(());
            }
        }
    }
}

fn print_report(report: &GameReport) {
    for round in &report.rounds {
        println!(
            "Guess {}: {} → {}  {} left  ({})",
            round.round,
            round.guess.as_str().to_uppercase(),
            round.feedback.to_emoji_string(),
            round.remaining,
            round.rationale
        );
    }
    println!();
    match &report.outcome {
        Outcome::Solved { word, rounds } => {
            println!("Solved in {rounds} guesses: {}", word.as_str().to_uppercase())
        }
        Outcome::Failed { round } => println!("All possibilities eliminated in round {round}."),
        Outcome::Exhausted { words } => {
            println!("Gave up with {} possibilities left.", words.len())
        }
    }
}

fn run_solve(game: &Game, target: &str) -> Result<()> {
    let target = Word::new(target).context("invalid target word")?;
    if !game.dictionary().contains(&target) {
        log::warn!("{target} is not in the dictionary");
    }
    println!("Solving for: {}", target.as_str().to_uppercase());
    println!();
    let report = game.solve_for_target(&target)?;
    print_report(&report);
    Ok(())
}

fn run_suggest(game: &Game) -> Result<()> {
    let words = game.dictionary();
    let Some(guess) = initial_guess(words) else {
        bail!("no words available");
    };
    let table = letter_coverage(words);
    println!("Best opening guess: {}", guess.as_str().to_uppercase());
    println!("Letter coverage: {}", coverage_score(&table, guess));
    Ok(())
}

fn run_benchmark(game: &Game, limit: Option<usize>, quiet: bool) -> Result<()> {
    let dictionary = game.dictionary();
    let targets = &dictionary[..limit.unwrap_or(dictionary.len()).min(dictionary.len())];
    println!("Running benchmark on {} words...", targets.len());

    let bar = progress_bar(quiet, "{spinner} [{elapsed_precise}] {wide_bar} {pos}/{len}");
    let start = Instant::now();
    let benchmark = game.benchmark(targets, &bar)?;
    let elapsed = start.elapsed();

    println!("Results:");
    println!("{}", "=".repeat(40));
    println!();
    println!("Guess distribution:");
    let total = benchmark.games.max(1);
    for (rounds, count) in &benchmark.distribution {
        let pct = *count as f64 / total as f64 * 100.0;
        let bar = "█".repeat((*count * 40 / total).max(1));
        println!("  {rounds} guesses: {count:>5} ({pct:>5.1}%) {bar}");
    }
    println!();
    println!("Average guesses: {:.3}", benchmark.average_rounds());
    println!("Total words: {}", benchmark.games);
    println!("Time elapsed: {elapsed:.2?}");
    if !benchmark.failed.is_empty() {
        println!("Failed: {}", join(&benchmark.failed));
    }
    if !benchmark.exhausted.is_empty() {
        println!(
            "Not solved in {} guesses: {}",
            game.config().max_rounds,
            join(&benchmark.exhausted)
        );
    }
    Ok(())
}

fn join(words: &[Word]) -> String {
    words.iter().map(Word::as_str).collect::<Vec<_>>().join(" ")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let words = match &cli.dictionary {
        Some(path) => load_dictionary_file(path)
            .with_context(|| format!("loading dictionary {}", path.display()))?,
        None => load_dictionary().context("loading bundled dictionary")?,
    };
    log::info!("loaded {} words", words.len());

    let config = game_config(&cli)?;
    let search_bar = progress_bar(cli.quiet, "searching: [{elapsed_precise}] {wide_bar} {pos}/{len}");
    let game = Game::new(words, config)?.with_progress(Arc::new(search_bar));

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(&game),
        Command::Solve { target } => run_solve(&game, &target),
        Command::Suggest => run_suggest(&game),
        Command::Benchmark { limit } => run_benchmark(&game, limit, cli.quiet),
    }
}
