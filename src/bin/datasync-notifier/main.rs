#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_copy_implementations)]
#![deny(missing_debug_implementations)]

use datasync_notifier::{
    DEFAULT_TASK_ROOT,
    config::{self, Config, RUNTIME_API_ENV},
    handler::function_handler,
    logger,
};
use lambda_runtime::service_fn;
use std::{
    env,
    io::{Error, ErrorKind, Result},
    path::Path,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config().map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))?;

    enable_logging_subsystem(&config)?;

    if config.runtime_api.is_none() {
        error!("{RUNTIME_API_ENV} is not set, not running inside a Lambda sandbox");
        return Err(Error::new(
            ErrorKind::NotFound,
            format!("{RUNTIME_API_ENV} is not set"),
        ));
    }

    debug!("Starting Lambda runtime");
    lambda_runtime::run(service_fn(function_handler))
        .await
        .map_err(|e| {
            error!("Lambda runtime failed: {e:?}");
            Error::other(e.to_string())
        })
}

fn load_config() -> std::result::Result<Config, config::ConfigError> {
    let lambda_directory =
        env::var("LAMBDA_TASK_ROOT").unwrap_or_else(|_| DEFAULT_TASK_ROOT.to_string());
    config::get_config(Path::new(&lambda_directory))
}

fn enable_logging_subsystem(config: &Config) -> Result<()> {
    let env_filter = format!(
        "h2=off,hyper=off,hyper_util=off,{}",
        config.log_level.as_level_filter()
    );
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(env_filter)
                .map_err(|e| Error::new(ErrorKind::InvalidInput, e.to_string()))?,
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(false)
        .without_time()
        .event_format(logger::Formatter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::new(ErrorKind::AlreadyExists, e.to_string()))?;

    debug!("Logging subsystem enabled");
    Ok(())
}
