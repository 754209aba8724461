//! Structured logging for the chairspot process.

pub mod logger;

pub use logger::init_logger;
