use std::path::PathBuf;

use colored::Colorize;

use crate::importer::ImporterKind;
use crate::models::SkippedRow;

#[derive(Debug)]
pub enum FileStatus {
    Converted {
        kind: ImporterKind,
        output: PathBuf,
        converted: usize,
        skipped: Vec<SkippedRow>,
    },
    /// No recognizer claimed the file. Not an error.
    NoMatch,
    Failed(String),
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, FileStatus::Failed(_))
    }

    /// Per-file result on stdout, skipped rows on stderr.
    pub fn print(&self) {
        println!("{}", self.path.display());
        match &self.status {
            FileStatus::Converted {
                kind,
                output,
                converted,
                skipped,
            } => {
                println!(
                    "  {} {} ({}): {converted} converted, {} skipped",
                    "Matched".green().bold(),
                    kind.name(),
                    kind.key(),
                    skipped.len()
                );
                for row in skipped {
                    eprintln!("  row {}: {}", row.row_number, row.reason);
                    tracing::debug!(row = row.row_number, raw = ?row.raw_data, "skipped row");
                }
                println!("  Wrote {}", output.display());
            }
            FileStatus::NoMatch => println!("  {}", "No matched format".yellow()),
            FileStatus::Failed(e) => println!("  {} {e}", "Failed:".red().bold()),
        }
    }
}

/// Everything that happened in one batch run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    pub fn converted(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Converted { .. }))
            .count()
    }

    pub fn unmatched(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::NoMatch))
            .count()
    }

    pub fn failures(&self) -> usize {
        self.files.iter().filter(|f| f.is_failure()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }

    pub fn print(&self) {
        println!();
        let failed = self.failures();
        let failed_label = format!("{failed} failed");
        println!(
            "{} files: {} converted, {} unmatched, {}",
            self.files.len(),
            self.converted(),
            self.unmatched(),
            if failed > 0 {
                failed_label.red().to_string()
            } else {
                failed_label
            }
        );
    }
}
