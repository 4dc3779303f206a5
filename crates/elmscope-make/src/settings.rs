use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use elmscope_error::{Error, ErrorKind, Result};

pub const SETTINGS_FILE_NAME: &str = "elmscope.toml";

/// Contents of `elmscope.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub make: MakeSettings,
}

/// The `[make]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MakeSettings {
    #[serde(default = "MakeSettings::default_executable")]
    pub executable: String,
    #[serde(default = "MakeSettings::default_enabled")]
    pub enabled: bool,
}

impl MakeSettings {
    fn default_executable() -> String {
        "elm-make".to_string()
    }

    fn default_enabled() -> bool {
        true
    }

    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for MakeSettings {
    fn default() -> Self {
        Self {
            executable: Self::default_executable(),
            enabled: Self::default_enabled(),
        }
    }
}

impl Settings {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| {
            Error::new(ErrorKind::ConfigInvalid, err.message().to_string())
                .with_operation("settings::parse")
                .set_source(err)
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            Error::from(err)
                .with_operation("settings::from_path")
                .with_context("path", path.display().to_string())
        })?;
        Self::parse(&text).map_err(|err| {
            err.with_operation("settings::from_path")
                .with_context("path", path.display().to_string())
        })
    }

    /// Read `elmscope.toml` from `dir`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(SETTINGS_FILE_NAME);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::from_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.make.executable, "elm-make");
        assert!(settings.make.enabled);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_table() {
        let settings = Settings::parse("[make]\nenabled = false\n").unwrap();
        assert_eq!(settings.make, MakeSettings::default().with_enabled(false));
    }

    #[test]
    fn test_invalid_settings() {
        let err = Settings::parse("[make]\nexecutable = 3\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(Settings::parse("[make]\nunknown = 1\n").is_err());
    }
}
