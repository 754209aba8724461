use serde::{Deserialize, Serialize};

/// A file carried by an inbound chat message, referenced by filename and a
/// fetchable URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub url: String,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
        }
    }
}

/// Channel-agnostic view of an inbound message, as handed to the pipeline.
///
/// Nothing here outlives a single handling invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Originating conversation, kept as an opaque string for logging.
    pub channel_id: String,
    /// Whether the sender is an automated account.
    pub from_bot: bool,
    pub attachments: Vec<Attachment>,
}

/// One localized object returned by the detection service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub score: f32,
    /// Bounding polygon in normalized coordinates.
    pub vertices: Vec<NormalizedVertex>,
}

/// A polygon coordinate expressed as a fraction (0.0–1.0) of image
/// width/height, resolution-independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedVertex {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned min/max pixel envelope of a detection polygon — a coarse
/// approximation of the object's true extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.x_max.saturating_sub(self.x_min)
    }

    pub fn height(&self) -> u32 {
        self.y_max.saturating_sub(self.y_min)
    }
}
