//! Builder options, loadable from a TOML file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File written when no destination is configured
pub const DEFAULT_FILE_LOCATION: &str = "default_file.md";

/// Markdown flavor the document targets
///
/// Informational only: both flavors share the same emission grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// GitHub flavored Markdown
    Github,
    /// GitLab flavored Markdown
    #[default]
    Gitlab,
}

/// When fragments reach the destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Keep everything in memory and write once at finalization
    #[default]
    Buffered,
    /// Write each fragment to the destination as soon as it is emitted
    Immediate,
}

/// Options recognised by the document builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Output file; [`DEFAULT_FILE_LOCATION`] when unset
    pub destination: Option<PathBuf>,

    /// Markdown flavor
    pub syntax: Flavor,

    /// Generate a table of contents from the emitted headings
    pub enable_toc: bool,

    /// Buffer-then-flush or write-immediately
    pub write_mode: WriteMode,

    /// Fragment index at which the table of contents is inserted
    pub toc_position: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            destination: None,
            syntax: Flavor::default(),
            enable_toc: true,
            write_mode: WriteMode::default(),
            toc_position: 0,
        }
    }
}

impl Options {
    /// Load options from a TOML file
    ///
    /// # Parameters
    /// * `path` - Path to the options file
    ///
    /// # Returns
    /// * `Ok(Options)` - Successfully loaded options, missing keys take their defaults
    /// * `Err(OptionsError)` - Error reading or parsing the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let content = fs::read_to_string(&path).map_err(OptionsError::IoError)?;

        let options: Options = toml::from_str(&content).map_err(OptionsError::ParseError)?;

        Ok(options)
    }

    /// Save options to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), OptionsError> {
        let content = toml::to_string_pretty(self).map_err(OptionsError::SerializeError)?;

        fs::write(&path, content).map_err(OptionsError::IoError)?;

        Ok(())
    }

    /// Resolve the file the document is written to
    ///
    /// Returns the path and whether the default location was used. A
    /// destination naming an existing directory gets the default file name
    /// appended.
    pub fn destination_path(&self) -> (PathBuf, bool) {
        match &self.destination {
            None => (PathBuf::from(DEFAULT_FILE_LOCATION), true),
            Some(path) if path.is_dir() => (path.join(DEFAULT_FILE_LOCATION), true),
            Some(path) => (path.clone(), false),
        }
    }
}

/// Errors that can occur when loading or saving options
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum OptionsError {
    /// IO error when reading or writing file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    SerializeError(toml::ser::Error),
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::IoError(e) => write!(f, "IO error: {}", e),
            OptionsError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            OptionsError::SerializeError(e) => write!(f, "TOML serialize error: {}", e),
        }
    }
}

impl std::error::Error for OptionsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.syntax, Flavor::Gitlab);
        assert!(options.enable_toc);
        assert_eq!(options.write_mode, WriteMode::Buffered);
        assert_eq!(options.toc_position, 0);
        assert_eq!(
            options.destination_path(),
            (PathBuf::from(DEFAULT_FILE_LOCATION), true)
        );
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_content = r#"
destination = "out/report.md"
syntax = "github"
write_mode = "immediate"
"#;

        let options: Options = toml::from_str(toml_content).unwrap();

        assert_eq!(options.destination, Some(PathBuf::from("out/report.md")));
        assert_eq!(options.syntax, Flavor::Github);
        assert_eq!(options.write_mode, WriteMode::Immediate);
        assert!(options.enable_toc);
    }

    #[test]
    fn test_options_roundtrip() {
        let options = Options {
            destination: Some(PathBuf::from("notes.md")),
            syntax: Flavor::Github,
            enable_toc: false,
            write_mode: WriteMode::Buffered,
            toc_position: 3,
        };

        let toml_str = toml::to_string_pretty(&options).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, options);
    }

    #[test]
    fn test_directory_destination_gets_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let options = Options {
            destination: Some(dir.path().to_path_buf()),
            ..Options::default()
        };

        let (path, defaulted) = options.destination_path();
        assert_eq!(path, dir.path().join(DEFAULT_FILE_LOCATION));
        assert!(defaulted);
    }

    #[test]
    fn test_invalid_flavor_is_rejected() {
        let result: Result<Options, _> = toml::from_str("syntax = \"bitbucket\"");
        assert!(result.is_err());
    }
}
