pub mod convert;
pub mod formats;
pub mod watch;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "meisai",
    about = "Convert Japanese bank and card statement exports into budgeting-tool CSV."
)]
pub struct Cli {
    /// Directory holding statement exports (default: ~/Desktop)
    #[arg(long = "input-dir", env = "MEISAI_INPUT_DIR", global = true)]
    pub input_dir: Option<String>,
    /// Where converted CSVs go (default: <input-dir>/<YYYYMMDD>_output)
    #[arg(long = "output-dir", env = "MEISAI_OUTPUT_DIR", global = true)]
    pub output_dir: Option<String>,
    /// Keep running and convert statements as they appear in the input directory.
    #[arg(long)]
    pub watch: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single statement file (CSV or Suica PDF).
    Convert {
        /// Path to the statement export
        file: String,
        /// Only try this format (key from `meisai formats`)
        #[arg(long)]
        format: Option<String>,
    },
    /// List supported formats in detection order.
    Formats,
}
