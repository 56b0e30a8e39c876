//! INI file configuration adapter.
//!
//! ```ini
//! [report]
//! area = SE3
//! timezone = Europe/Stockholm
//! expected_points = 96
//!
//! [currency]
//! eur_rate = 11.03
//! ```

use crate::domain::error::SpotprisError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::{Path, PathBuf};

pub struct FileConfigAdapter {
    config: Ini,
    source: Option<PathBuf>,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SpotprisError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| SpotprisError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// No file given; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self {
            config: Ini::new(),
            source: None,
        }
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// File the configuration was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// A path value; relative paths resolve against the config file's directory.
    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        let value = PathBuf::from(self.get_string(section, key)?.trim());
        match self.source.as_deref().and_then(Path::parent) {
            Some(dir) if value.is_relative() => Some(dir.join(value)),
            _ => Some(value),
        }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key).filter(|v| !v.trim().is_empty())
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.get_string(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[report]
area = SE3
timezone = Europe/Stockholm
expected_points = 96

[currency]
eur_rate = 11.03
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(adapter.get_string("report", "area"), Some("SE3".to_string()));
        assert_eq!(
            adapter.get_string("report", "timezone"),
            Some("Europe/Stockholm".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[report]\narea = SE4\n").unwrap();
        assert_eq!(adapter.get_string("report", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_opt_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[report]\nexpected_points = 96\n").unwrap();
        assert_eq!(adapter.get_opt_int("report", "expected_points").unwrap(), Some(96));
    }

    #[test]
    fn get_opt_int_trims_whitespace() {
        let adapter = FileConfigAdapter::from_string("[report]\nwindow =   6  \n").unwrap();
        assert_eq!(adapter.get_opt_int("report", "window").unwrap(), Some(6));
    }

    #[test]
    fn get_opt_double_rejects_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[pricing]\noverhead = lots\n").unwrap();
        match adapter.get_opt_double("pricing", "overhead") {
            Err(SpotprisError::ConfigInvalid { section, key, reason }) => {
                assert_eq!(section, "pricing");
                assert_eq!(key, "overhead");
                assert!(reason.contains("lots"));
            }
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn get_opt_tells_missing_from_malformed() {
        let adapter =
            FileConfigAdapter::from_string("[report]\nwindow = 6\nexpected_points = many\n")
                .unwrap();
        assert_eq!(adapter.get_opt_int("report", "window").unwrap(), Some(6));
        assert_eq!(adapter.get_opt_int("report", "interval_minutes").unwrap(), None);
        assert!(matches!(
            adapter.get_opt_int("report", "expected_points"),
            Err(SpotprisError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn get_opt_double_parses_value() {
        let adapter = FileConfigAdapter::from_string("[pricing]\noverhead = 84.5\n").unwrap();
        assert_eq!(adapter.get_opt_double("pricing", "overhead").unwrap(), Some(84.5));
        assert_eq!(adapter.get_opt_double("pricing", "cheap_cutoff").unwrap(), None);
    }

    #[test]
    fn get_bool_values() {
        let adapter =
            FileConfigAdapter::from_string("[output]\na = true\nb = no\nc = 1\n").unwrap();
        assert!(adapter.get_bool("output", "a", false));
        assert!(!adapter.get_bool("output", "b", true));
        assert!(adapter.get_bool("output", "c", false));
        assert!(adapter.get_bool("output", "missing", true));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[data]\ndocument_dir = /var/lib/spotpris\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "document_dir"),
            Some("/var/lib/spotpris".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/spotpris.ini");
        assert!(matches!(result, Err(SpotprisError::ConfigParse { .. })));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let adapter = FileConfigAdapter::from_string("[currency]\neur_rate =\n").unwrap();
        assert_eq!(adapter.get_string("currency", "eur_rate"), None);
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("spotpris.ini");
        std::fs::write(&path, "[data]\ndocument_dir = prices\nrates_file = /etc/rates.json\n")
            .unwrap();
        let adapter = FileConfigAdapter::from_file(&path).unwrap();

        assert_eq!(adapter.source(), Some(path.as_path()));
        assert_eq!(
            adapter.get_path("data", "document_dir"),
            Some(dir.path().join("prices"))
        );
        assert_eq!(
            adapter.get_path("data", "rates_file"),
            Some(PathBuf::from("/etc/rates.json"))
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.source(), None);
        assert_eq!(adapter.get_string("report", "area"), None);
        assert_eq!(adapter.get_opt_double("pricing", "overhead").unwrap(), None);
    }

    #[test]
    fn paths_from_string_are_kept_as_is() {
        let adapter = FileConfigAdapter::from_string("[data]\ndocument_dir = prices\n").unwrap();
        assert_eq!(
            adapter.get_path("data", "document_dir"),
            Some(PathBuf::from("prices"))
        );
    }
}
