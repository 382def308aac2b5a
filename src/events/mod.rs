use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Value of `source` for events emitted by AWS `DataSync`.
pub const DATASYNC_SOURCE: &str = "aws.datasync";

/// `EventBridge` envelope of a `DataSync` task execution state change.
///
/// Only `source`, `resources` and `detail.State` are read by the handler.
/// `id` and `detail-type` are kept untyped for diagnostics; the rest of the
/// envelope is ignored.
#[derive(Deserialize, Debug, PartialEq, Default)]
pub struct DataSyncEvent {
    pub id: Option<Value>,
    #[serde(rename = "detail-type")]
    pub detail_type: Option<Value>,
    pub source: String,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub detail: DataSyncDetail,
}

#[derive(Deserialize, Debug, PartialEq, Default)]
pub struct DataSyncDetail {
    #[serde(rename = "State")]
    pub state: Option<String>,
}

/// The pair of values reported for a matching event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferNotice {
    /// Identifier of the task execution that triggered the event.
    pub task_execution_arn: String,
    /// Current transfer state, e.g. `SUCCESS`, `ERROR`, `LAUNCHING`.
    pub data_transfer_state: String,
}

impl DataSyncEvent {
    /// Returns `Some(true)` when `source` is exactly [`DATASYNC_SOURCE`],
    /// `Some(false)` for any other value, and `None` when the payload has no
    /// `source` at all.
    #[must_use]
    pub fn is_match(payload: &Value) -> Option<bool> {
        let source = payload.get("source")?;
        Some(source.as_str() == Some(DATASYNC_SOURCE))
    }

    pub fn new(payload: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(payload).inspect_err(|e| {
            debug!("Failed to deserialize DataSync Event: {}", e);
        })
    }
}

impl fmt::Display for TransferNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "task_execution_arn: {}", self.task_execution_arn)?;
        writeln!(f, "data_transfer_state: {}", self.data_transfer_state)
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::fs;
    use std::path::PathBuf;

    #[must_use]
    pub(crate) fn read_json_file(file_name: &str) -> String {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("tests/payloads");
        path.push(file_name);
        fs::read_to_string(path).expect("Failed to read file")
    }
}
