use std::path::Path;
use std::process::Command;

use crate::error::{MeisaiError, Result};

/// Run `pdftotext -layout <file> -` and capture stdout.
pub fn extract_text(file_path: &Path) -> Result<String> {
    which::which("pdftotext").map_err(|_| MeisaiError::PdfToolMissing)?;

    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg(file_path)
        .arg("-")
        .output()
        .map_err(|e| MeisaiError::PdfExtract {
            path: file_path.to_path_buf(),
            detail: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MeisaiError::PdfExtract {
            path: file_path.to_path_buf(),
            detail: format!(
                "pdftotext exited with {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            ),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
