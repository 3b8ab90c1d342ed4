use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use vmal_asm::Listing;
use vmal_rs::assemble_str;

#[derive(Parser, Debug)]
#[command(author, version, about = "VMAL assembler: print the resolved program", long_about = None)]
struct Cli {
    /// Input VMAL source
    #[arg(value_name = "VMALFILE")]
    input: PathBuf,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    // stdout carries the listing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let program = match assemble_str(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e.render());
            return Ok(ExitCode::FAILURE);
        }
    };
    let listing = Listing::new(&program);
    let text = match cli.format {
        OutputFormat::Text => listing.render_text(),
        OutputFormat::Json => listing.to_json()?,
    };
    match &cli.out {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{text}"),
    }
    Ok(ExitCode::SUCCESS)
}
