mod cli;
mod error;
mod importer;
mod models;
mod normalize;
#[cfg(feature = "pdf")]
mod pdf;
mod reader;
mod report;
mod settings;
mod writer;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("meisai=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Exit code 1 means at least one file failed outright; unmatched files are fine.
fn run(cli: Cli) -> Result<bool> {
    let settings = settings::load_settings();
    let paths = settings::resolve_paths(
        cli.input_dir.as_deref(),
        cli.output_dir.as_deref(),
        &settings,
        chrono::Utc::now().date_naive(),
    );

    match cli.command {
        Some(Commands::Formats) => cli::formats::run().map(|_| true),
        Some(Commands::Convert { file, format }) => {
            cli::convert::run_single(&file, format.as_deref(), &paths).map(|r| !r.is_failure())
        }
        None if cli.watch => {
            let interval = Duration::from_secs(settings.watch_interval_secs.max(1));
            cli::watch::run(&paths, interval).map(|_| true)
        }
        None => cli::convert::run(&paths).map(|summary| !summary.has_failures()),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
