pub mod error;
pub mod types;

pub use error::HandlerError;
pub use types::{Attachment, Detection, InboundMessage, NormalizedVertex, PixelRect};
