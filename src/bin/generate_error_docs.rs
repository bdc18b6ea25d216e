//! Generate error code documentation from the source of truth (`GenerationError`).
//!
//! Codes, descriptions, details and help text come straight from the
//! `code()`, `description()`, `details()` and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;

use lexigrid::errors::GenerationError;

/// One example of every `GenerationError` variant, in code order.
fn all_generation_error_variants() -> Vec<GenerationError> {
    vec![
        GenerationError::InvalidWord { word: "ab".to_string(), reason: "fewer than 3 letters after cleaning".to_string() },
        GenerationError::InsufficientWords { found: 2, required: 3 },
        GenerationError::PlacementExhausted { placed: 1, required: 3 },
        GenerationError::InvalidOptions { reason: "max_grid_size must be between 3 and 64, got 500".to_string() },
        GenerationError::EntryListIo { path: "words.txt".to_string(), message: "No such file or directory".to_string() },
    ]
}

fn render_error(out: &mut String, error: &GenerationError) -> std::fmt::Result {
    writeln!(out, "### {}: {}\n", error.code(), error.description())?;
    writeln!(out, "**Details:** {}\n", error.details())?;

    if let Some(help_text) = error.help() {
        writeln!(out, "**How to fix:**\n```\n{help_text}\n```\n")?;
    }

    writeln!(out, "**Example error message:**\n```\n{error}\n```\n")?;
    writeln!(out, "**Detailed format:**\n```\n{}\n```\n", error.display_detailed())?;
    writeln!(out, "---\n")
}

fn render_docs() -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "# Error Code Reference\n")?;
    writeln!(out, "**This document is auto-generated from the source code. Do not edit manually.**\n")?;

    writeln!(out, "## Generation Errors\n")?;
    writeln!(
        out,
        "Only G002 and G004 are returned by `generate_crossword_layout`. \
         G001 and G003 are absorbed during preprocessing and retries; G005 comes from the CLI.\n"
    )?;
    for error in &all_generation_error_variants() {
        render_error(&mut out, error)?;
    }

    writeln!(out, "## Error Display Formats\n")?;
    writeln!(out, "### Simple Format\n```\nError: <message>\n```\n")?;
    writeln!(out, "### Detailed Format (via `display_detailed()`)\n```\n<message> (<code>)\n<help text if available>\n```")?;

    Ok(out)
}

fn main() -> Result<(), std::fmt::Error> {
    print!("{}", render_docs()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_documented_once() {
        let docs = render_docs().unwrap();
        for error in all_generation_error_variants() {
            let heading = format!("### {}: {}", error.code(), error.description());
            assert_eq!(docs.matches(&heading).count(), 1, "missing or repeated: {heading}");
        }
    }

    #[test]
    fn test_help_only_where_available() {
        let docs = render_docs().unwrap();
        // G003 has no help text, the other four do
        assert_eq!(docs.matches("**How to fix:**").count(), 4);
    }
}
