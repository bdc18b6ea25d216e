//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing of crossword generation for a handful of word sets.
//! - Runs each case several times and reports the median.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print the last grid per case:   `cargo run --bin bench_local --release -- -p`
//!
//! NOTES
//! -----
//! - Not statistically rigorous. Use the same machine and `--release`.
//! - One warm-up run per case is done (not included in timing).

use clap::Parser;
use std::hint::black_box;
use std::time::Instant;

use lexigrid::generator::{generate_crossword_layout, GenerationOptions};
use lexigrid::word_entry::{load_entries_from_path, WordEntry};

/// Local benchmark runner for crossword generation.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Word list (word;clue per line) benchmarked as an extra case
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/spanish_vocabulary.txt")
    )]
    word_list: String,

    /// Number of repeats per case (median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 3)]
    num_repeats: usize,

    /// Print the grid produced by the last run of each case
    #[arg(short = 'p', long = "print")]
    print_grid: bool,
}

/// A named word set and the options it runs with.
struct Case {
    name: String,
    entries: Vec<WordEntry>,
    options: GenerationOptions,
}

fn words(list: &[&str]) -> Vec<WordEntry> {
    list.iter().map(|w| WordEntry::new(*w, format!("clue for {w}"))).collect()
}

fn get_cases(word_list: Vec<WordEntry>) -> Vec<Case> {
    vec![
        Case {
            name: "spanish basics".to_string(),
            entries: words(&["hola", "casa", "agua", "gato"]),
            options: GenerationOptions::default(),
        },
        Case {
            name: "anagram cluster".to_string(),
            entries: words(&["tea", "eat", "ate", "tat", "ear", "art", "rat", "tar"]),
            options: GenerationOptions::default(),
        },
        // every strict attempt fails, so this times the full retry budget
        Case {
            name: "no shared letters".to_string(),
            entries: words(&["abc", "def", "ghi", "jkl"]),
            options: GenerationOptions::default(),
        },
        Case {
            name: "long words, small grid".to_string(),
            entries: words(&["international", "conversation", "organization", "relationship", "notation"]),
            options: GenerationOptions { max_grid_size: 15, min_grid_size: 0, ..GenerationOptions::default() },
        },
        Case {
            name: "word list".to_string(),
            entries: word_list,
            options: GenerationOptions::default(),
        },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let word_list = load_entries_from_path(&cli.word_list)?;
    eprintln!("Loaded {} entries from {}", word_list.len(), cli.word_list);

    // (name, median seconds, placed words, intersections)
    let mut summary: Vec<(String, f64, usize, usize)> = Vec::new();

    for (idx, case) in get_cases(word_list).iter().enumerate() {
        eprintln!("\n[{:02}] {}", idx + 1, case.name);

        if let Err(e) = generate_crossword_layout(&case.entries, &case.options) {
            eprintln!("  ✗ Warm-up failed: {}", e.display_detailed());
            continue;
        }

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last = None;

        for rep in 0..cli.num_repeats {
            let t_generate = Instant::now();
            let result = generate_crossword_layout(black_box(&case.entries), &case.options)?;
            let secs = t_generate.elapsed().as_secs_f64();

            times.push(secs);
            eprintln!("  run {:>2}/{:>2}: {:.4}s", rep + 1, cli.num_repeats, secs);
            last = result;
        }

        let med = median(times);
        let (placed, intersections) = last
            .as_ref()
            .map_or((0, 0), |r| (r.stats.placed_words, r.stats.intersections));

        if cli.print_grid {
            match &last {
                Some(result) => println!("{}\n{result}\n", case.name),
                None => println!("{}: no layout\n", case.name),
            }
        }

        eprintln!("  → median {med:.4}s; {placed} placed, {intersections} intersections");
        summary.push((case.name.clone(), med, placed, intersections));
    }

    eprintln!("\n==== Summary ====");
    eprintln!("{:<24} | {:>10} | {:>6} | {:>13}", "case", "median (s)", "placed", "intersections");
    eprintln!("{:-<24}-+-{:-<10}-+-{:-<6}-+-{:-<13}", "", "", "", "");
    for (name, med, placed, intersections) in &summary {
        eprintln!("{name:<24} | {med:>10.4} | {placed:>6} | {intersections:>13}");
    }

    Ok(())
}
