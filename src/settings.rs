use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_input_dir")]
    pub input_dir: String,
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default = "default_watch_interval_secs")]
    pub watch_interval_secs: u64,
}

fn default_input_dir() -> String {
    dirs::desktop_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Desktop")))
        .unwrap_or_else(|| PathBuf::from("."))
        .to_string_lossy()
        .to_string()
}

fn default_watch_interval_secs() -> u64 {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: None,
            watch_interval_secs: default_watch_interval_secs(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("meisai")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Settings::default()
        }
    }
}

/// Expand a leading `~` (alone or followed by `/`) to the home directory.
pub fn expand_home(path: &str) -> String {
    let Some(rest) = path.strip_prefix('~') else {
        return path.to_string();
    };
    if !rest.is_empty() && !rest.starts_with('/') {
        return path.to_string();
    }
    match dirs::home_dir() {
        Some(home) => format!("{}{rest}", home.to_string_lossy()),
        None => path.to_string(),
    }
}

/// Directories a run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Command line (flag or env var) wins over the settings file. Without an
/// output directory, output goes to `<input>/<YYYYMMDD>_output`.
pub fn resolve_paths(
    input_dir: Option<&str>,
    output_dir: Option<&str>,
    settings: &Settings,
    today: NaiveDate,
) -> Paths {
    let input_dir = input_dir
        .filter(|s| !s.is_empty())
        .unwrap_or(settings.input_dir.as_str());
    let input_dir = PathBuf::from(expand_home(input_dir));
    let output_dir = match output_dir
        .filter(|s| !s.is_empty())
        .or(settings.output_dir.as_deref().filter(|s| !s.is_empty()))
    {
        Some(dir) => PathBuf::from(expand_home(dir)),
        None => input_dir.join(format!("{}_output", today.format("%Y%m%d"))),
    };
    Paths {
        input_dir,
        output_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> String {
        dirs::home_dir().unwrap().to_string_lossy().to_string()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("settings.json"));
        assert_eq!(s, Settings::default());
        assert_eq!(s.watch_interval_secs, 2);
        assert!(s.output_dir.is_none());
        assert!(!s.input_dir.is_empty());
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"input_dir": "/tmp/statements"}"#).unwrap();
        let s = load_settings_from(&path);
        assert_eq!(s.input_dir, "/tmp/statements");
        assert_eq!(s.watch_interval_secs, 2);
    }

    #[test]
    fn test_load_ignores_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn test_expand_home() {
        let cases = [
            ("~/foo".to_string(), format!("{}/foo", home())),
            ("~".to_string(), home()),
            ("/absolute/path".to_string(), "/absolute/path".to_string()),
            (String::new(), String::new()),
            ("/foo/~/bar".to_string(), "/foo/~/bar".to_string()),
            ("~user/x".to_string(), "~user/x".to_string()),
        ];
        for (input, expected) in cases {
            assert_eq!(expand_home(&input), expected, "{input}");
        }
    }

    #[test]
    fn test_resolve_paths_prefers_command_line() {
        let settings = Settings {
            input_dir: "/settings/in".into(),
            output_dir: Some("/settings/out".into()),
            watch_interval_secs: 2,
        };
        let paths = resolve_paths(Some("/cli/in"), Some("/cli/out"), &settings, day());
        assert_eq!(paths.input_dir, PathBuf::from("/cli/in"));
        assert_eq!(paths.output_dir, PathBuf::from("/cli/out"));

        let paths = resolve_paths(None, Some(""), &settings, day());
        assert_eq!(paths.input_dir, PathBuf::from("/settings/in"));
        assert_eq!(paths.output_dir, PathBuf::from("/settings/out"));
    }

    #[test]
    fn test_resolve_paths_default_output_is_dated() {
        let settings = Settings {
            input_dir: "/in".into(),
            ..Settings::default()
        };
        let paths = resolve_paths(None, None, &settings, day());
        assert_eq!(paths.output_dir, PathBuf::from("/in/20260102_output"));
    }
}
