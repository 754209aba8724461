//! Per-message processing pipeline: filter attachments, fetch bytes, localize
//! objects, crop and caption matches, and hand the encoded results to a reply
//! sink. Everything the pipeline talks to is injected, so the whole path runs
//! under test with fakes.

pub mod fetch;
pub mod pipeline;

pub use fetch::{AttachmentFetcher, HttpFetcher};
pub use pipeline::{MessagePipeline, PipelineSettings, ReplySink};
