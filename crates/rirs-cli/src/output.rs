//! Terminal rendering for the `rirs` binary.
//!
//! Every command speaks two dialects, selected by the global `--json` flag:
//! colored lines for a human at a terminal, or one JSON document for
//! scripts. The JSON dialect always goes through [`CommandResult`] so the
//! envelope shape stays uniform across subcommands.

use colored::Colorize;
use serde::Serialize;
use std::time::Duration;

/// Rendering mode selected by the global `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored human-readable lines.
    Text,
    /// A single JSON document.
    Json,
}

impl OutputFormat {
    /// Map the `--json` flag onto a format.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Envelope serialized in `--json` mode.
///
/// Mirrors the gateway's own one-success-or-one-error contract: a result
/// carries either `data` or `error`, never both.
#[derive(Debug, Serialize)]
pub struct CommandResult<T: Serialize> {
    /// Whether the command succeeded.
    pub success: bool,
    /// Payload of a successful command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Message of a failed command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    /// Wrap a successful payload.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wrap a failure message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Render the result in the given format.
    ///
    /// Text mode only renders failures here; successful text output is
    /// command-specific and printed at the call site.
    pub fn print(&self, format: OutputFormat) -> anyhow::Result<()> {
        match format {
            OutputFormat::Json => json(self),
            OutputFormat::Text => {
                if let Some(message) = &self.error {
                    error(message);
                }
                Ok(())
            }
        }
    }
}

/// Green check line for a succeeded step.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Red cross line on stderr for a failed step.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Indented `key: value` detail line.
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", key.bold(), value);
}

/// Underlined header opening a detail block.
pub fn section(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Serialize a value as pretty-printed JSON on stdout.
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Spinner shown while a gateway request is in flight.
///
/// Callers finish-and-clear it before printing the reply, so nothing of
/// the spinner survives into the command output.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let bar = indicatif::ProgressBar::new_spinner();
    bar.set_style(
        indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("static template parses")
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
