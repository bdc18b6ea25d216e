use crate::errors::GenerationError;
use crate::generator::{generate_crossword_layout, GenerationOptions};
use crate::log::init_logger;
use crate::word_entry::{parse_entries_from_str, WordEntry};
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::to_value;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "G002", "WASM001")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<GenerationError> for WasmError {
    fn from(e: GenerationError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(str::to_string),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        js_sys::Error::new(&msg).into()
    }
}

fn serialization_error(code: &str, what: &str, e: &serde_wasm_bindgen::Error) -> JsValue {
    WasmError {
        code: code.to_string(),
        message: format!("serialization failed: {e}"),
        description: format!("Failed to serialize {what}"),
        details: format!("The {what} could not be converted to JavaScript format."),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
    .into()
}

/// Initialize lexigrid logging with the specified debug setting.
///
/// # Arguments
/// * `debug_enabled` - If true, use Debug log level; if false, use Info log level
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

/// JS entry: `(entries: {word, clue}[], options?: Partial<GenerationOptions>)`.
///
/// Resolves to the crossword result object, or `null` when no layout could be
/// found. Options use camelCase keys (`maxGridSize`, `allowDisconnected`, ...);
/// missing keys take their defaults.
#[wasm_bindgen]
pub fn generate_crossword_wasm(entries: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let entries: Vec<WordEntry> = serde_wasm_bindgen::from_value(entries).map_err(|e| WasmError {
        code: "WASM001".to_string(),
        message: format!("entries must be {{word, clue}}[]: {e}"),
        description: "Invalid entries format".to_string(),
        details: "The entries parameter must be a JavaScript array of objects with string `word` and `clue` fields.".to_string(),
        help: Some("Example: [{word: 'casa', clue: 'house'}, {word: 'gato', clue: 'cat'}]".to_string()),
    })?;

    let options: GenerationOptions = if options.is_undefined() || options.is_null() {
        GenerationOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| WasmError {
            code: "WASM002".to_string(),
            message: format!("invalid options: {e}"),
            description: "Invalid options format".to_string(),
            details: "The options parameter must be an object with camelCase generation settings.".to_string(),
            help: Some("Example: {maxGridSize: 21, allowDisconnected: false}".to_string()),
        })?
    };

    let result = generate_crossword_layout(&entries, &options).map_err(WasmError::from)?;

    match result {
        Some(layout) => to_value(&layout).map_err(|e| serialization_error("WASM003", "crossword", &e)),
        None => Ok(JsValue::NULL),
    }
}

/// Parse newline-separated `word;clue` text into `{word, clue}` objects.
///
/// # Errors
/// Returns a `JsValue` error if the entries cannot be serialized.
#[wasm_bindgen]
pub fn parse_entry_list(text: &str) -> Result<JsValue, JsValue> {
    let entries = parse_entries_from_str(text);
    to_value(&entries).map_err(|e| serialization_error("WASM004", "entry list", &e))
}

/// Generate a debug report users can paste into an issue.
///
/// # Arguments
/// * `error_message` - The error message that was displayed
/// * `entry_count` - Number of entries submitted
/// * `max_grid_size` - Working grid size that was requested
#[wasm_bindgen]
pub fn get_debug_info(error_message: &str, entry_count: usize, max_grid_size: usize) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // writing to a String is infallible
    let _ = writeln!(&mut report, "=== LEXIGRID DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH_FULL"));
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{error_message}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Input");
    let _ = writeln!(&mut report, "Entries: {entry_count}");
    let _ = writeln!(&mut report, "Max Grid Size: {max_grid_size}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {user_agent}");
        }
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_debug_info_structure() {
        let report = get_debug_info("insufficient words (G002)", 2, 21);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "=== LEXIGRID DEBUG REPORT ===");
        assert!(lines[1].starts_with(&format!("Version: {}", env!("CARGO_PKG_VERSION"))));
        assert_eq!(lines[3], "## Error");
        assert_eq!(lines[4], "insufficient words (G002)");
        assert_eq!(lines[6], "## Input");
        assert_eq!(lines[7], "Entries: 2");
        assert_eq!(lines[8], "Max Grid Size: 21");
        assert_eq!(lines.last(), Some(&"=== END DEBUG REPORT ==="));
    }

    #[test]
    fn test_wasm_error_from_generation_error() {
        let err = WasmError::from(GenerationError::InsufficientWords { found: 1, required: 3 });
        assert_eq!(err.code, "G002");
        assert!(err.help.is_some());
    }
}
