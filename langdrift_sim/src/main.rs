// CLI entry point for a terminal game of language drift.
//
// Draws a sentence from the corpus, lets it drift through several language
// groups, prints where each group ended up, and scores the player's guess
// of the original. See `session.rs` for the game loop itself.
//
// Usage:
//   drift [OPTIONS]
//     --language <PATH>           Language definition JSON (default: embedded French)
//     --corpus <PATH>             Corpus text file, repeatable (default: embedded sample)
//     --config <PATH>             Session config JSON (default: 3 groups, 5 turns)
//     --seed <N>                  RNG seed (default: system clock)
//     --independent-alternates    Treat accented letters as letters of their own
//     --guess <TEXT>              The guess (default: read one line from stdin)
//     --admin                     Print every turn log line
//
// Logging goes to stderr through `tracing`; set RUST_LOG=debug to see each
// mutation as it happens.

use std::io::BufRead;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use langdrift_sim::config::SessionConfig;
use langdrift_sim::lang::{AlternateMode, Corpus, LanguageDefinition, default_language_with};
use langdrift_sim::scoring::Score;
use langdrift_sim::session::GameSession;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const SAMPLE_CORPUS: &str = include_str!("../../data/corpus_sample.txt");

#[derive(Debug, Default)]
struct CliArgs {
    language: Option<PathBuf>,
    corpus: Vec<PathBuf>,
    config: Option<PathBuf>,
    seed: Option<u64>,
    alternates: AlternateMode,
    guess: Option<String>,
    admin: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let args = parse_args();
    let language = load_language(&args);
    let corpus = load_corpus(&args);
    let config = load_config(&args);
    let seed = args.seed.unwrap_or_else(clock_seed);

    let mut session = GameSession::new(language, seed);
    if let Err(e) = session.new_sentence(&corpus, &config.bounds) {
        eprintln!("Could not draw a sentence: {e}");
        std::process::exit(1);
    }
    let summaries = match session.start(&config) {
        Ok(summaries) => summaries,
        Err(e) => {
            eprintln!("Could not start the session: {e}");
            std::process::exit(1);
        }
    };

    println!("=== Language drift (seed {seed}) ===");
    println!();
    for summary in &summaries {
        println!(
            "{:<10} {:>2} turns   {}",
            summary.id.to_string(),
            summary.turns,
            summary.sentence
        );
    }
    if args.admin {
        println!();
        for log in session.log() {
            println!("{log}");
        }
    }
    println!();

    let guess = match args.guess.clone() {
        Some(guess) => guess,
        None => read_guess(),
    };
    let score = match session.score(&guess) {
        Ok(score) => score,
        Err(e) => {
            eprintln!("Could not score the guess: {e}");
            std::process::exit(1);
        }
    };

    let original = session
        .original()
        .map(|o| o.sentence.as_str())
        .unwrap_or("");
    println!("Your guess: {}", marked_guess(&guess, &score));
    println!("Original:   {original}");
    println!(
        "Score:      {:.1} / 10 ({} of {} words)",
        score.value(),
        score.matches,
        score.total
    );
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> CliArgs {
    let mut cli = CliArgs::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--language" => {
                i += 1;
                cli.language = Some(required(&args, i, "--language").into());
            }
            "--corpus" => {
                i += 1;
                cli.corpus.push(required(&args, i, "--corpus").into());
            }
            "--config" => {
                i += 1;
                cli.config = Some(required(&args, i, "--config").into());
            }
            "--seed" => {
                i += 1;
                cli.seed = Some(required(&args, i, "--seed").parse().unwrap_or_else(|_| {
                    eprintln!("--seed requires an unsigned integer");
                    std::process::exit(1);
                }));
            }
            "--guess" => {
                i += 1;
                cli.guess = Some(required(&args, i, "--guess").to_string());
            }
            "--independent-alternates" => cli.alternates = AlternateMode::Independent,
            "--admin" => cli.admin = true,
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    cli
}

fn required<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    args.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("{flag} requires a value");
        std::process::exit(1);
    })
}

fn load_language(args: &CliArgs) -> LanguageDefinition {
    let Some(path) = &args.language else {
        return default_language_with(args.alternates);
    };
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| {
            LanguageDefinition::from_json(&json, args.alternates).map_err(|e| e.to_string())
        });
    loaded.unwrap_or_else(|e| {
        eprintln!("Failed to load language {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn load_corpus(args: &CliArgs) -> Corpus {
    if args.corpus.is_empty() {
        return Corpus::from_texts([SAMPLE_CORPUS]);
    }
    Corpus::from_paths(&args.corpus).unwrap_or_else(|e| {
        eprintln!("Failed to load corpus: {e}");
        std::process::exit(1);
    })
}

fn load_config(args: &CliArgs) -> SessionConfig {
    let Some(path) = &args.config else {
        return SessionConfig::default();
    };
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| SessionConfig::from_json(&json).map_err(|e| e.to_string()));
    loaded.unwrap_or_else(|e| {
        eprintln!("Failed to load config {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn read_guess() -> String {
    println!("Guess the original sentence:");
    let mut line = String::new();
    if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
        eprintln!("Failed to read the guess: {e}");
        std::process::exit(1);
    }
    line.trim().to_string()
}

/// The guess with every wrong word wrapped in brackets.
fn marked_guess(guess: &str, score: &Score) -> String {
    let mut marked = String::with_capacity(guess.len() + 2 * score.verdicts.len());
    let mut cursor = 0;
    for verdict in &score.verdicts {
        marked.push_str(&guess[cursor..verdict.start]);
        if verdict.correct {
            marked.push_str(&verdict.text);
        } else {
            marked.push('[');
            marked.push_str(&verdict.text);
            marked.push(']');
        }
        cursor = verdict.end;
    }
    marked.push_str(&guess[cursor..]);
    marked
}
