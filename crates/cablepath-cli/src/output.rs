//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, bare text for pipes, or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / hidden `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. `output` in the user config
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use cablepath_core::error::ErrorCode;
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 48;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (headings, counts, visual framing).
    Pretty,
    /// One value per line for pipes and scripts.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    fn parse_loose(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    config_default: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    // Unknown values fall through to the next source.
    if let Some(mode) = format_env.and_then(OutputMode::parse_loose) {
        return mode;
    }
    if let Some(mode) = config_default.and_then(OutputMode::parse_loose) {
        return mode;
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from CLI flags, environment, user config, and
/// TTY defaults.
pub fn resolve_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    config_default: Option<&str>,
) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(format_flag, json_flag, env_val.as_deref(), config_default, is_tty)
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => pretty_fn(value, &mut out)?,
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// A failed command, as reported to the user.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Full error message, including context.
    pub error: String,
    /// Machine-readable code (`E####`).
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl CliError {
    pub fn new(code: ErrorCode, err: &anyhow::Error) -> Self {
        Self {
            error: format!("{err:#}"),
            code: code.code(),
            hint: code.hint(),
        }
    }
}

/// Write an error in the requested format.
pub fn write_error(mode: OutputMode, error: &CliError, w: &mut dyn Write) -> io::Result<()> {
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut *w, error)?;
        writeln!(w)
    } else {
        writeln!(w, "error[{}]: {}", error.code, error.error)?;
        if let Some(hint) = error.hint {
            writeln!(w, "  hint: {hint}")?;
        }
        Ok(())
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> io::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(mode, error, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── resolve_output_mode_inner ───────────────────────────────────────────

    #[test]
    fn resolve_format_flag_wins_over_json_and_env() {
        let mode = resolve_output_mode_inner(Some(OutputMode::Text), true, Some("pretty"), None, true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_json_flag_wins_over_env() {
        let mode = resolve_output_mode_inner(None, true, Some("pretty"), None, true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_format_env_case_insensitive() {
        let mode = resolve_output_mode_inner(None, false, Some("JSON"), None, false);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_env_wins_over_config() {
        let mode = resolve_output_mode_inner(None, false, Some("text"), Some("json"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_config_default_applies() {
        let mode = resolve_output_mode_inner(None, false, None, Some("json"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_unknown_values_fall_through_to_tty() {
        let tty = resolve_output_mode_inner(None, false, Some("fancy"), Some("nope"), true);
        assert_eq!(tty, OutputMode::Pretty);
        let pipe = resolve_output_mode_inner(None, false, Some("fancy"), None, false);
        assert_eq!(pipe, OutputMode::Text);
    }

    // ── errors ──────────────────────────────────────────────────────────────

    #[test]
    fn json_error_has_code_and_hint() {
        let err = anyhow::anyhow!("connection not found in graph: 7");
        let cli_error = CliError::new(ErrorCode::ConnectionNotFound, &err);

        let mut buf = Vec::new();
        write_error(OutputMode::Json, &cli_error, &mut buf).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");

        assert_eq!(value["code"], "E2001");
        assert_eq!(value["error"], "connection not found in graph: 7");
        assert!(value["hint"].is_string());
    }

    #[test]
    fn text_error_includes_context_chain() {
        let err = anyhow::anyhow!("no such table: LinkList_view").context("prepare link list query");
        let cli_error = CliError::new(ErrorCode::LinkSourceUnavailable, &err);

        let mut buf = Vec::new();
        write_error(OutputMode::Text, &cli_error, &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");

        assert!(text.starts_with("error[E3002]: prepare link list query: no such table"));
        assert!(text.contains("  hint: "));
    }
}
