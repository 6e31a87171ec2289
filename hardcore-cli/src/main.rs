//! Reference driver for the hard-disk perfect sampler.
//!
//! Parses the positional activity and radius arguments, draws one exact
//! sample, and writes one `"<x> <y>"` line per retained point to stdout.
//! Logging is initialized eagerly so subsequent operations can emit
//! structured diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use hardcore_cli::{
    cli::{Cli, CliError, render_points, run_cli},
    logging::{self, LoggingError},
};
use tracing::error;

/// Parse the arguments, run the sampler, render the points, and flush the
/// output stream.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to draw sample")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_points(&summary, &mut writer).context("failed to render points")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        // Walk the context chain for a structured sampler code so scripted
        // callers get a stable identifier alongside the rendered message.
        let code = err.chain().find_map(|cause| {
            let cause: &(dyn std::error::Error + 'static) = cause;
            cause
                .downcast_ref::<CliError>()
                .and_then(CliError::sampler_code)
        });

        error!(
            error = %err,
            code = ?code.map(|c| c.as_str()),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Emit a fallback diagnostic to stderr when tracing initialization fails.
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
