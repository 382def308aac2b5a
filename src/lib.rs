//! Crate for the `datasync-notifier` Lambda function
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_copy_implementations)]
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod events;
pub mod handler;
pub mod logger;

pub const FUNCTION_NAME: &str = "datasync-notifier";
pub const LOG_PREFIX: &str = "DATASYNC_NOTIFIER";
pub const CONFIG_FILE_NAME: &str = "datasync-notifier.yaml";
pub const ENV_PREFIX: &str = "DATASYNC_NOTIFIER_";
pub const DEFAULT_TASK_ROOT: &str = "/var/task";
