use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeisaiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("pdftotext not found: install poppler-utils (brew install poppler / apt-get install poppler-utils)")]
    PdfToolMissing,

    #[error("Failed to extract text from {}: {detail}", path.display())]
    PdfExtract { path: PathBuf, detail: String },

    #[error("{format}: row {row} has {len} columns, column {column} is required")]
    ShortRow {
        format: &'static str,
        row: usize,
        column: usize,
        len: usize,
    },

    #[error("Unsupported file: {}", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("Unknown format '{0}' (see `meisai formats`)")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, MeisaiError>;
