use std::path::{Path, PathBuf};

use crate::error::{MeisaiError, Result};
use crate::importer::{get_by_key, Dispatch, Dispatcher, Input};
use crate::reader::read_table;
use crate::report::{FileReport, FileStatus, RunSummary};
use crate::settings::Paths;
use crate::writer::write_records;

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn is_statement_file(path: &Path) -> bool {
    matches!(extension(path).as_deref(), Some("csv" | "pdf"))
}

/// Output lands at `<output_dir>/<format key>_<input stem>.csv`.
pub fn output_path(output_dir: &Path, key: &str, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    output_dir.join(format!("{key}_{stem}.csv"))
}

#[cfg(feature = "pdf")]
fn dispatch_pdf(path: &Path, dispatcher: &Dispatcher) -> Result<Dispatch> {
    let text = crate::pdf::extract_text(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let year = crate::importer::suica::statement_year(&name);
    dispatcher.dispatch(&Input::PdfText { text: &text, year })
}

#[cfg(not(feature = "pdf"))]
fn dispatch_pdf(path: &Path, _dispatcher: &Dispatcher) -> Result<Dispatch> {
    Err(MeisaiError::UnsupportedFile(path.to_path_buf()))
}

/// Recognize one statement and, on a match, write its records.
pub fn process_file(path: &Path, output_dir: &Path, dispatcher: &Dispatcher) -> Result<FileStatus> {
    let dispatch = match extension(path).as_deref() {
        Some("csv") => {
            let table = read_table(path)?;
            dispatcher.dispatch(&Input::Table(&table))?
        }
        Some("pdf") => dispatch_pdf(path, dispatcher)?,
        _ => return Err(MeisaiError::UnsupportedFile(path.to_path_buf())),
    };

    let Dispatch::Matched { kind, outcome } = dispatch else {
        return Ok(FileStatus::NoMatch);
    };

    std::fs::create_dir_all(output_dir)?;
    let output = output_path(output_dir, kind.key(), path);
    let converted = write_records(&outcome.valid_records, &output)?;
    tracing::info!(
        file = %path.display(),
        format = kind.key(),
        converted,
        skipped = outcome.skipped_rows.len(),
        "converted statement"
    );
    Ok(FileStatus::Converted {
        kind,
        output,
        converted,
        skipped: outcome.skipped_rows,
    })
}

/// Like `process_file`, but a failure becomes part of the report.
pub fn convert_file(path: &Path, output_dir: &Path, dispatcher: &Dispatcher) -> FileReport {
    let status = match process_file(path, output_dir, dispatcher) {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "conversion failed");
            FileStatus::Failed(e.to_string())
        }
    };
    FileReport {
        path: path.to_path_buf(),
        status,
    }
}

/// CSV and PDF files directly inside `dir`, sorted by name.
pub fn list_statement_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_statement_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    dispatcher: &Dispatcher,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    for path in list_statement_files(input_dir)? {
        summary.push(convert_file(&path, output_dir, dispatcher));
    }
    Ok(summary)
}

pub fn run(paths: &Paths) -> Result<RunSummary> {
    println!("Scanning {}", paths.input_dir.display());
    let summary = process_directory(&paths.input_dir, &paths.output_dir, &Dispatcher::default())?;
    if summary.files.is_empty() {
        println!("No CSV or PDF files found.");
        return Ok(summary);
    }
    for report in &summary.files {
        report.print();
    }
    summary.print();
    Ok(summary)
}

/// A `--format` key narrows detection to that one recognizer.
pub fn dispatcher_for(format: Option<&str>) -> Result<Dispatcher> {
    match format {
        None => Ok(Dispatcher::default()),
        Some(key) => get_by_key(key)
            .map(|kind| Dispatcher::new(vec![kind]))
            .ok_or_else(|| MeisaiError::UnknownFormat(key.to_string())),
    }
}

pub fn run_single(file: &str, format: Option<&str>, paths: &Paths) -> Result<FileReport> {
    let dispatcher = dispatcher_for(format)?;
    let path = PathBuf::from(crate::settings::expand_home(file));
    if !path.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        )
        .into());
    }
    let report = convert_file(&path, &paths.output_dir, &dispatcher);
    report.print();
    Ok(report)
}
