use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use colored::Colorize;
use sha2::{Digest, Sha256};

use super::convert::{convert_file, list_statement_files};
use crate::error::Result;
use crate::importer::Dispatcher;
use crate::report::FileReport;
use crate::settings::Paths;

fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

/// One pass over the input directory. Only files whose content changed since
/// the last pass are converted; `seen` maps each path to its last checksum.
pub fn poll(
    paths: &Paths,
    dispatcher: &Dispatcher,
    seen: &mut HashMap<PathBuf, String>,
) -> Result<Vec<FileReport>> {
    let mut reports = Vec::new();
    for path in list_statement_files(&paths.input_dir)? {
        let checksum = match compute_checksum(&path) {
            Ok(sum) => sum,
            Err(e) => {
                // Usually a file that vanished between listing and reading.
                tracing::debug!(file = %path.display(), error = %e, "checksum failed");
                continue;
            }
        };
        if seen.get(&path) == Some(&checksum) {
            continue;
        }
        reports.push(convert_file(&path, &paths.output_dir, dispatcher));
        seen.insert(path, checksum);
    }
    seen.retain(|path, _| path.exists());
    Ok(reports)
}

pub fn run(paths: &Paths, interval: Duration) -> Result<()> {
    let dispatcher = Dispatcher::default();
    let mut seen = HashMap::new();

    println!(
        "Watching {} (output: {})",
        paths.input_dir.display(),
        paths.output_dir.display()
    );
    println!("{}", "Press Ctrl-C to stop.".dimmed());

    // The first pass surfaces an unreadable input directory as an error.
    for report in poll(paths, &dispatcher, &mut seen)? {
        report.print();
    }
    loop {
        std::thread::sleep(interval);
        match poll(paths, &dispatcher, &mut seen) {
            Ok(reports) => reports.iter().for_each(FileReport::print),
            Err(e) => tracing::warn!(dir = %paths.input_dir.display(), error = %e, "watch pass failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FileStatus;

    const RAKUTEN_CSV: &str = "取引日,入出金(円),取引後残高(円),入出金内容\n20240105,-1200,8800,スーパー\n";

    fn paths(dir: &Path) -> Paths {
        Paths {
            input_dir: dir.to_path_buf(),
            output_dir: dir.join("out"),
        }
    }

    #[test]
    fn test_compute_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.csv");
        std::fs::write(&path, "abc").unwrap();
        assert_eq!(
            compute_checksum(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_poll_converts_new_and_changed_files_once() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(dir.path());
        let dispatcher = Dispatcher::default();
        let mut seen = HashMap::new();
        let input = dir.path().join("rakuten.csv");
        std::fs::write(&input, RAKUTEN_CSV).unwrap();

        let reports = poll(&paths, &dispatcher, &mut seen).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(matches!(reports[0].status, FileStatus::Converted { converted: 1, .. }));
        assert!(paths.output_dir.join("rakuten_rakuten.csv").exists());

        // Unchanged content is not processed again.
        assert!(poll(&paths, &dispatcher, &mut seen).unwrap().is_empty());

        std::fs::write(&input, format!("{RAKUTEN_CSV}20240106,3000,11800,振込\n")).unwrap();
        let reports = poll(&paths, &dispatcher, &mut seen).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(matches!(reports[0].status, FileStatus::Converted { converted: 2, .. }));
    }

    #[test]
    fn test_poll_forgets_removed_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(dir.path());
        let dispatcher = Dispatcher::default();
        let mut seen = HashMap::new();
        let input = dir.path().join("notes.csv");
        std::fs::write(&input, "a,b\n").unwrap();

        let reports = poll(&paths, &dispatcher, &mut seen).unwrap();
        assert!(matches!(reports[0].status, FileStatus::NoMatch));
        std::fs::remove_file(&input).unwrap();
        assert!(poll(&paths, &dispatcher, &mut seen).unwrap().is_empty());
        assert!(seen.is_empty());
    }

    #[test]
    fn test_poll_missing_input_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(&dir.path().join("missing"));
        assert!(poll(&paths, &Dispatcher::default(), &mut HashMap::new()).is_err());
    }
}
