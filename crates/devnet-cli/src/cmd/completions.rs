//! `devnet completions`: shell completion scripts.

use std::io::Write;

use anyhow::Result;
use clap::{Args, Command};
use clap_complete::{Shell, generate};

/// Arguments for `devnet completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `command` to `out`.
///
/// # Errors
///
/// Returns an error if flushing `out` fails.
pub fn run_completions(args: &CompletionsArgs, command: &mut Command, out: &mut dyn Write) -> Result<()> {
    let bin = command.get_name().to_string();
    generate(args.shell, command, bin, out);
    out.flush()?;
    Ok(())
}
