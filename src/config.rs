//! Configuration loading.
//!
//! Sources, lowest precedence first: built-in defaults, the settings file,
//! then `ABSTRACT_KEYWORDS__*` environment variables
//! (e.g. `ABSTRACT_KEYWORDS__MODEL__PATH`). List values in the environment
//! are comma separated.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::policy::PolicySpec;

const CONFIG_FILE: &str = "config/settings";
const ENV_PREFIX: &str = "ABSTRACT_KEYWORDS";
const DEFAULT_MODEL_PATH: &str = "resources/pos_tagger.json";

/// Policy keys parsed as lists when set from the environment
const LIST_KEYS: [&str; 2] = ["policy.forbidden_categories", "policy.stoplist"];

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error(transparent)]
    Build(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub model: ModelConfig,
    #[serde(default)]
    pub policy: PolicySpec,
    pub batch: BatchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    pub path: PathBuf,
    /// Per-document token limit; unlimited when unset
    #[serde(default)]
    pub max_tokens: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BatchConfig {
    pub parallel: bool,
}

/// Load the configuration.
///
/// `config_file` replaces the default `config/settings` lookup and must
/// exist when given.
pub fn load(config_file: Option<&Path>) -> Result<AppConfig, AppConfigError> {
    let file = match config_file {
        Some(path) => File::from(path).required(true),
        None => File::with_name(CONFIG_FILE).required(false),
    };

    let mut env = Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",");
    for key in LIST_KEYS {
        env = env.with_list_parse_key(key);
    }

    let builder = Config::builder()
        .set_default("model.path", DEFAULT_MODEL_PATH)?
        .set_default("batch.parallel", true)?
        .add_source(file)
        .add_source(env);

    let cfg: AppConfig = builder.build()?.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
}

impl AppConfig {
    fn validate(&self) -> Result<(), AppConfigError> {
        if self.model.max_tokens == Some(0) {
            return Err(AppConfigError::Invalid {
                key: "model.max_tokens",
                reason: "must be greater than zero".into(),
            });
        }
        if self.model.path.as_os_str().is_empty() {
            return Err(AppConfigError::Invalid {
                key: "model.path",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
