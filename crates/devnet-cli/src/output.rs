//! Human and JSON rendering for commands that print to stdout.
//!
//! Reports and graph documents go to files (or `-`); only summaries such as
//! `devnet stats` are rendered here.

use std::io::{self, Write};

use serde::Serialize;

/// Shared width for pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 48;

/// Write a horizontal separator.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<20} {}", format!("{key}:"), value.as_ref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Aligned key/value text.
    Pretty,
    /// Pretty-printed JSON.
    Json,
}

impl OutputMode {
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Pretty }
    }

    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render `value` to `out` as JSON or through `human_fn`.
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn render<T: Serialize>(
    mode: OutputMode,
    out: &mut dyn Write,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
    } else {
        human_fn(value, out)?;
    }
    Ok(())
}
