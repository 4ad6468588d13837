//! Build-time configuration for autoimpl generation, read from `autoimpl.toml`.
//!
//! ```toml
//! [generate]
//! schema = "schema.toml"
//! suffix = "_Impl"
//! on_invalid_blueprint = "abort"
//! ```

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Default file name looked up next to the crate manifest.
pub const CONFIG_FILE: &str = "autoimpl.toml";

/// Schema file used when the config names none.
pub const DEFAULT_SCHEMA_FILE: &str = "schema.toml";

/// Suffix appended to a blueprint ident to name its generated type.
pub const DEFAULT_SUFFIX: &str = "_Impl";

/// Path generated code uses to reach the runtime crate.
pub const DEFAULT_RUNTIME_CRATE: &str = "::autoimpl";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot parse config '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// InvalidBlueprintPolicy
///
/// What a pass does when a discovered blueprint is not an abstract struct.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidBlueprintPolicy {
    /// Report the error and stop the whole pass before anything is emitted.
    #[default]
    #[display("abort")]
    Abort,

    /// Report the error, skip that blueprint and keep going.
    #[display("skip")]
    Skip,
}

///
/// ConfigFile
///

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    generate: Config,
}

///
/// Config
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub suffix: String,
    pub on_invalid_blueprint: InvalidBlueprintPolicy,
    pub runtime_crate: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            on_invalid_blueprint: InvalidBlueprintPolicy::default(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            schema: None,
            out_dir: None,
        }
    }
}

impl Config {
    /// Parse the `[generate]` table from TOML text.
    pub fn from_toml_str(s: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(s).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        file.generate.validate()?;

        Ok(file.generate)
    }

    /// Load from a file; relative `schema`/`out_dir` resolve against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: origin.clone(),
            source,
        })?;

        let mut config = Self::from_toml_str(&text, &origin)?;
        if let Some(base) = path.parent() {
            config.schema = config.schema.map(|p| base.join(p));
            config.out_dir = config.out_dir.map(|p| base.join(p));
        }

        Ok(config)
    }

    /// Load `dir/autoimpl.toml` when present, otherwise defaults.
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Schema location, falling back to `dir/schema.toml`.
    #[must_use]
    pub fn schema_path(&self, dir: impl AsRef<Path>) -> PathBuf {
        self.schema
            .clone()
            .unwrap_or_else(|| dir.as_ref().join(DEFAULT_SCHEMA_FILE))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let suffix_ok = !self.suffix.is_empty()
            && self
                .suffix
                .chars()
                .all(|c| c == '_' || c.is_ascii_alphanumeric());
        if !suffix_ok {
            return Err(ConfigError::Invalid(format!(
                "suffix '{}' must be non-empty and made of [A-Za-z0-9_]",
                self.suffix
            )));
        }
        if self.runtime_crate.trim().is_empty() {
            return Err(ConfigError::Invalid("runtime_crate is empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml_str("", "inline").expect("empty config");

        assert_eq!(config, Config::default());
        assert_eq!(config.suffix, "_Impl");
        assert_eq!(config.on_invalid_blueprint, InvalidBlueprintPolicy::Abort);
    }

    #[test]
    fn generate_table_overrides_defaults() {
        let config = Config::from_toml_str(
            r#"
            [generate]
            suffix = "Delegate"
            on_invalid_blueprint = "skip"
            runtime_crate = "::my_runtime"
            "#,
            "inline",
        )
        .expect("config");

        assert_eq!(config.suffix, "Delegate");
        assert_eq!(config.on_invalid_blueprint, InvalidBlueprintPolicy::Skip);
        assert_eq!(config.runtime_crate, "::my_runtime");
    }

    #[test]
    fn unknown_keys_and_bad_suffix_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("[generate]\nsufix = \"x\"", "inline"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("[generate]\nsuffix = \"-x\"", "inline"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn load_resolves_paths_against_config_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[generate]\nschema = \"schema.toml\"\nout_dir = \"gen\"\n",
        )
        .expect("write config");

        let config = Config::load_or_default(dir.path()).expect("config");
        assert_eq!(config.schema, Some(dir.path().join("schema.toml")));
        assert_eq!(config.out_dir, Some(dir.path().join("gen")));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");

        let config = Config::load_or_default(dir.path()).expect("config");
        assert_eq!(config, Config::default());
        assert_eq!(
            config.schema_path(dir.path()),
            dir.path().join(DEFAULT_SCHEMA_FILE)
        );
    }
}
