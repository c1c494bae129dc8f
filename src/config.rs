//! Configuration structures for alertwait.
//!
//! The configuration is read from an optional YAML file and merged with
//! environment variables prefixed with `ALERTWAIT_`. Every field has a
//! default, so an empty or missing file is a valid configuration.
//!
//! # Configuration File Format
//!
//! ```yaml
//! # Length of the generated alert and action ids
//! id_length: 6
//!
//! # Localized labels
//! labels:
//!   cancel: "Annuler"
//!   confirm: "Valider"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Nested keys are separated with a double underscore:
//!
//! ```bash
//! export ALERTWAIT_ID_LENGTH=8
//! export ALERTWAIT_LABELS__CANCEL="Abbrechen"
//! ```

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::id::{DEFAULT_ID_LENGTH, MIN_ID_LENGTH};

/// Prefix of the environment variables overriding the configuration.
const ENV_PREFIX: &str = "ALERTWAIT_";

/// Root configuration structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Length of the generated alert and action ids, at least [`MIN_ID_LENGTH`].
    pub id_length: usize,
    /// Localized labels.
    pub labels: Labels,
}

/// Localized labels used when an action carries no content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Default content of cancel actions.
    pub cancel: String,
    /// Label rendered for confirm actions without content.
    pub confirm: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            id_length: DEFAULT_ID_LENGTH,
            labels: Labels::default(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            cancel: "Cancel".to_string(),
            confirm: "OK".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// Defaults are overridden by the YAML file at `path` when given, then by
    /// `ALERTWAIT_` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file exists but cannot be parsed,
    /// if a value has the wrong type, or if `id_length` is below
    /// [`MIN_ID_LENGTH`].
    pub fn load(path: Option<&Path>) -> Result<Config, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        if config.id_length < MIN_ID_LENGTH {
            return Err(figment::Error::from(format!(
                "id_length must be at least {}, got {}",
                MIN_ID_LENGTH, config.id_length
            )));
        }

        Ok(config)
    }
}
