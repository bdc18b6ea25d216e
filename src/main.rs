use std::process::ExitCode;
use clap::Parser;
use std::time::Instant;

use lexigrid::generator::{generate_crossword_layout, GenerationOptions};
use lexigrid::word_entry::{load_entries_from_path, WordEntry};
use lexigrid::GenerationError;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Lexigrid crossword layout generator
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// Entries as WORD=clue (e.g., "casa=house")
    entries: Vec<String>,

    /// Path to a word list file (word;clue per line)
    #[arg(short, long)]
    word_list: Option<String>,

    /// Side length of the working grid
    #[arg(long, default_value_t = 21)]
    max_grid_size: usize,

    /// Smallest side length of the finished grid
    #[arg(long, default_value_t = 15)]
    min_grid_size: usize,

    /// Strict attempts before relaxing constraints
    #[arg(short = 'a', long, default_value_t = 1000)]
    max_attempts: usize,

    /// Allow words that do not cross any other word
    #[arg(long)]
    allow_disconnected: bool,

    /// Do not favor placements with more crossings
    #[arg(long)]
    no_prioritize_intersections: bool,

    /// Maximum number of words to place
    #[arg(short = 'n', long = "max-words", default_value_t = 15)]
    max_words_to_place: usize,

    /// Seed for the word-order shuffles of retry attempts
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Print the result as JSON instead of a text grid
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn options(&self) -> GenerationOptions {
        GenerationOptions {
            max_grid_size: self.max_grid_size,
            min_grid_size: self.min_grid_size,
            max_attempts: self.max_attempts,
            allow_disconnected: self.allow_disconnected,
            prioritize_intersections: !self.no_prioritize_intersections,
            max_words_to_place: self.max_words_to_place,
            seed: self.seed,
        }
    }
}

/// Split a `WORD=clue` argument. Arguments without `=` are rejected up front
/// rather than silently dropped by preprocessing.
fn parse_entry_arg(arg: &str) -> Result<WordEntry, String> {
    arg.split_once('=')
        .map(|(word, clue)| WordEntry::new(word.trim(), clue.trim()))
        .ok_or_else(|| format!("expected WORD=clue, got '{arg}'"))
}

/// Entry point of the lexigrid CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("LEXIGRID_DEBUG").is_ok();
    lexigrid::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        // coded errors get their help text
        if let Some(generation_err) = e.downcast_ref::<GenerationError>() {
            eprintln!("Error: {}", generation_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the lexigrid CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Collect entries from the word-list file and the positional arguments.
/// 3. Generate the layout.
/// 4. Print the puzzle (text or JSON) on stdout and timings on stderr.
///
/// Returns `Ok(())` on success or an error (invalid entries, unreadable word
/// list, no layout found) which bubbles up to [`main`].
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 1. Gather entries: file first, then command-line arguments
    let t_load = Instant::now();
    let mut entries = match &cli.word_list {
        Some(path) => load_entries_from_path(path)?,
        None => Vec::new(),
    };
    for arg in &cli.entries {
        entries.push(parse_entry_arg(arg)?);
    }
    let load_secs = t_load.elapsed().as_secs_f64();

    // 2. Generate
    let t_generate = Instant::now();
    let result = generate_crossword_layout(&entries, &cli.options())?;
    let generate_secs = t_generate.elapsed().as_secs_f64();

    let Some(result) = result else {
        return Err(format!("could not generate a crossword from {} entries", entries.len()).into());
    };

    // 3. Output
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{result}");
    }

    // 4. Diagnostics
    eprintln!(
        "Read {} entries in {:.3}s; placed {}/{} words ({} intersections) in {:.3}s.",
        entries.len(),
        load_secs,
        result.stats.placed_words,
        result.stats.total_words,
        result.stats.intersections,
        generate_secs
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_arg() {
        assert_eq!(parse_entry_arg("casa=house").unwrap(), WordEntry::new("casa", "house"));
        assert_eq!(parse_entry_arg(" sol = sun = star ").unwrap(), WordEntry::new("sol", "sun = star"));
        assert!(parse_entry_arg("casa").is_err());
    }

    #[test]
    fn test_cli_flags_map_to_options() {
        let cli = Cli::parse_from(["lexigrid", "--no-prioritize-intersections", "--max-words", "9", "--seed", "7", "a=b"]);
        let options = cli.options();
        assert!(!options.prioritize_intersections);
        assert_eq!(options.max_words_to_place, 9);
        assert_eq!(options.seed, 7);
        assert_eq!(options.max_grid_size, 21);
        assert_eq!(cli.entries, vec!["a=b".to_string()]);
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
