use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use filemage::application::IdentifyResourceUseCase;
use filemage::presentation::cli::{
    Cli, Commands, apply_overrides, write_outcomes_json, write_outcomes_text, write_signatures_json,
    write_signatures_text,
};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(io::stderr)
        .init();

    let base = cli.base_options().context("Failed to load configuration")?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let code = match &cli.command {
        Commands::Identify {
            paths,
            json,
            sample_size,
            text_bytes,
            text_ratio,
            max_size,
        } => {
            let options = apply_overrides(base, *sample_size, *text_bytes, *text_ratio, *max_size)
                .context("Invalid options")?;
            let use_case = IdentifyResourceUseCase::from_options(&options)?;
            let outcomes = use_case.execute_all(paths);

            if *json {
                write_outcomes_json(&mut out, &outcomes)?;
            } else {
                write_outcomes_text(&mut out, &outcomes)?;
            }

            if outcomes.iter().any(|o| o.is_failure()) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Commands::ListSignatures { json } => {
            let registry = base
                .build_registry()
                .context("Failed to build signature table")?;
            if *json {
                write_signatures_json(&mut out, &registry)?;
            } else {
                write_signatures_text(&mut out, &registry)?;
            }
            ExitCode::SUCCESS
        }
    };

    out.flush()?;
    Ok(code)
}
