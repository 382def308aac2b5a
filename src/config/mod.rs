pub mod log_level;

use std::path::Path;

use figment::providers::{Format, Yaml};
use figment::{Figment, providers::Env};
use serde::Deserialize;

use crate::{CONFIG_FILE_NAME, ENV_PREFIX, FUNCTION_NAME};
use log_level::LogLevel;

pub const RUNTIME_API_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

#[derive(Debug, PartialEq, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    /// Host and port of the Lambda Runtime API, e.g. `127.0.0.1:9001`.
    pub runtime_api: Option<String>,
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

#[allow(clippy::module_name_repetitions)]
pub fn get_config(config_directory: &Path) -> Result<Config, ConfigError> {
    let path = config_directory.join(CONFIG_FILE_NAME);

    let figment = Figment::new()
        .merge(Yaml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(
            Env::raw()
                .only(&[RUNTIME_API_ENV])
                .map(|_| "runtime_api".into()),
        );

    figment.extract().map_err(|err| {
        println!("Failed to parse {FUNCTION_NAME} config: {err}");
        ConfigError::ParseError(err.to_string())
    })
}
