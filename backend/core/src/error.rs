use thiserror::Error;

/// Failure taxonomy for one message-handling invocation.
///
/// Every variant is recoverable: the handler that hit it returns early and is
/// logged, sibling handlers and the process keep running. Startup
/// preconditions (configuration, typeface) are enforced by the binary before
/// any handler exists and never appear here.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("attachment fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("object localization failed: {0}")]
    Localize(String),

    #[error("image decode failed: {0}")]
    Decode(String),

    #[error("image encode failed: {0}")]
    Encode(String),

    #[error("reply upload failed: {0}")]
    Reply(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
