//! Run config file (`-c`): one TOML table per stage group.
//!
//! ```toml
//! [Step1]
//! refstar = "/refs/star"
//! qparam = "-N hsep_custom -V -cwd -l mem=32G"
//!
//! [Step3]
//! blastdb = "/db/nt"
//! ```
//!
//! Values may be strings, numbers or booleans; they are kept as strings
//! because they end up on stage command lines. Keys are lower-cased.
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// Key that carries a per-stage scheduler override.
pub const QPARAM_KEY: &str = "qparam";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageSections {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl StageSections {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|e| match e {
            SectionsParseError::Toml(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            SectionsParseError::NotATable(section) => ConfigError::NotATable { section },
        })
    }

    fn parse(raw: &str) -> Result<Self, SectionsParseError> {
        let doc: toml::Table = raw.parse().map_err(SectionsParseError::Toml)?;
        let mut sections = BTreeMap::new();
        for (name, value) in doc {
            let toml::Value::Table(table) = value else {
                return Err(SectionsParseError::NotATable(name));
            };
            let entries = table
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), value_to_string(v)))
                .collect();
            sections.insert(name, entries);
        }
        Ok(Self { sections })
    }

    /// Value of `key` in `section`, if both exist.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(String::as_str)
    }
}

#[derive(Debug)]
enum SectionsParseError {
    Toml(toml::de::Error),
    NotATable(String),
}

fn value_to_string(value: toml::Value) -> String {
    match value {
        toml::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_sections_and_lowercases_keys() {
        let sections = StageSections::parse(
            r#"
            [Step1]
            RefStar = "/refs/star"
            qparam = "-N custom"

            [Step3]
            blastdb = "/db/nt"
            chunk = 250
            "#,
        )
        .unwrap();
        assert_eq!(sections.get("Step1", "refstar"), Some("/refs/star"));
        assert_eq!(sections.get("Step1", QPARAM_KEY), Some("-N custom"));
        assert_eq!(sections.get("Step3", "chunk"), Some("250"));
        assert_eq!(sections.get("Step2", "anything"), None);
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StageSections::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn unparseable_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[Step1\nrefstar = ").unwrap();
        let err = StageSections::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn top_level_scalar_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refstar = \"/refs\"").unwrap();
        let err = StageSections::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotATable { ref section } if section == "refstar"));
    }
}
