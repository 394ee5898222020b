//! gpui-codemod: rewrite JSX markup in TSX/JSX files into GPUI builder calls.

mod cli;
mod config;
mod orchestrator;
mod output;

use clap::Parser;
use cli::Args;
use miette::Result;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let summary = orchestrator::run(&args)?;
    if summary.failed_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}
