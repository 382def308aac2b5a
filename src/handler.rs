use std::io::{self, Write};

use lambda_runtime::{Context, Diagnostic, LambdaEvent};
use serde_json::Value;
use tracing::{debug, error};

use crate::events::{DataSyncEvent, TransferNotice};

#[derive(thiserror::Error, Debug)]
pub enum HandlerError {
    /// A field read by the handler is absent from the event
    #[error("Missing field in event: {0}")]
    MissingField(&'static str),

    /// `resources` is absent or empty on a `DataSync` event
    #[error("Missing task execution ARN: event has no resources")]
    MissingResource,

    /// A field read by the handler has the wrong type
    #[error("Malformed DataSync event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    /// The notice could not be written to the log stream
    #[error("Failed to write notice: {0}")]
    Io(#[from] io::Error),
}

impl HandlerError {
    /// Name reported to the Lambda platform as `errorType`.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            HandlerError::MissingField(_) => "MissingField",
            HandlerError::MissingResource => "MissingResource",
            HandlerError::MalformedEvent(_) => "MalformedEvent",
            HandlerError::Io(_) => "Io",
        }
    }
}

impl From<HandlerError> for Diagnostic {
    fn from(err: HandlerError) -> Self {
        Diagnostic {
            error_type: err.error_type().to_string(),
            error_message: err.to_string(),
        }
    }
}

/// Extracts the notice from a `DataSync` event.
///
/// Returns `Ok(None)` when the event comes from another source.
pub fn extract_notice(payload: &Value) -> Result<Option<TransferNotice>, HandlerError> {
    match DataSyncEvent::is_match(payload) {
        None => return Err(HandlerError::MissingField("source")),
        Some(false) => return Ok(None),
        Some(true) => {}
    }

    let event = DataSyncEvent::new(payload.clone())?;
    let task_execution_arn = event
        .resources
        .into_iter()
        .next()
        .ok_or(HandlerError::MissingResource)?;
    let data_transfer_state = event
        .detail
        .state
        .ok_or(HandlerError::MissingField("detail.State"))?;

    debug!(
        id = ?event.id,
        detail_type = ?event.detail_type,
        "Received DataSync event"
    );

    Ok(Some(TransferNotice {
        task_execution_arn,
        data_transfer_state,
    }))
}

/// Writes the task execution ARN and transfer state of a `DataSync` event to
/// `out`. Events from any other source are ignored.
///
/// The context is accepted for signature compatibility and never read.
pub fn handle<W: Write>(
    payload: &Value,
    _context: &Context,
    out: &mut W,
) -> Result<(), HandlerError> {
    let Some(notice) = extract_notice(payload)? else {
        return Ok(());
    };

    write!(out, "{notice}")?;
    out.flush()?;
    Ok(())
}

/// Entry point registered with the Lambda runtime. The notice goes to stdout;
/// failures are returned so the runtime reports them for this invocation.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<(), HandlerError> {
    let (payload, context) = event.into_parts();
    handle(&payload, &context, &mut io::stdout()).inspect_err(|err| {
        error!(request_id = %context.request_id, "Invocation failed: {err}");
    })
}
