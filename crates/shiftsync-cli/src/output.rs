//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: readable text for operators, stable JSON for scripts.

use serde::Serialize;

/// Shared width for human output separators.
pub const RULE_WIDTH: usize = 60;

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Print a serializable value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a section heading followed by a separator rule.
pub fn section(heading: &str) {
    println!("{heading}");
    println!("{:-<RULE_WIDTH$}", "");
}

/// Render a failure in the requested mode. Human goes to stderr; JSON goes
/// to stdout as a stable `{"error": ...}` object.
pub fn render_error(mode: OutputMode, message: &str) {
    if mode.is_json() {
        println!(
            "{}",
            serde_json::json!({ "error": message })
        );
    } else {
        eprintln!("error: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::OutputMode;

    #[test]
    fn json_detection() {
        assert!(OutputMode::Json.is_json());
        assert!(!OutputMode::Human.is_json());
    }
}
