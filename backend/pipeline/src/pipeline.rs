//! The per-message handler.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chairspot_core::{HandlerError, InboundMessage};
use chairspot_media::{CaptionRenderer, caption_region, decode_image, encode_png, image_attachments};
use chairspot_vision::{ObjectLocalizer, bounding_rect, matching_detections};
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::fetch::AttachmentFetcher;

/// Posts the finished crops back to the originating conversation.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Deliver all images as file attachments in a single message.
    async fn reply(&self, channel_id: &str, images: Vec<Vec<u8>>) -> Result<()>;
}

/// Tunables for the pipeline, all settable from the environment.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Detection label that triggers a crop.
    pub label: String,
    /// Text stamped onto each crop.
    pub caption: String,
    /// Upper bound on concurrently executing message handlers.
    pub max_handlers: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            label: "Chair".to_string(),
            caption: "CHAIR".to_string(),
            max_handlers: 8,
        }
    }
}

/// Orchestrates one inbound message from attachment filter to encoded crops.
///
/// All collaborators are injected once at startup and shared immutably across
/// handlers; the semaphore caps how many handlers run at the same time.
pub struct MessagePipeline {
    localizer: Arc<dyn ObjectLocalizer>,
    fetcher: Arc<dyn AttachmentFetcher>,
    renderer: Arc<dyn CaptionRenderer>,
    settings: PipelineSettings,
    permits: Arc<Semaphore>,
}

impl MessagePipeline {
    pub fn new(
        localizer: Arc<dyn ObjectLocalizer>,
        fetcher: Arc<dyn AttachmentFetcher>,
        renderer: Arc<dyn CaptionRenderer>,
        settings: PipelineSettings,
    ) -> Self {
        let permits = Arc::new(Semaphore::new(settings.max_handlers.max(1)));
        Self {
            localizer,
            fetcher,
            renderer,
            settings,
            permits,
        }
    }

    /// Full handler entry point: filter, process, reply, log.
    ///
    /// Any per-message failure is logged and dropped here; nothing escapes to
    /// the caller or to the conversation. A message that yields no crops is a
    /// silent no-op.
    pub async fn process(&self, msg: InboundMessage, sink: Arc<dyn ReplySink>) {
        if msg.from_bot || msg.attachments.is_empty() {
            return;
        }
        let Ok(_permit) = Arc::clone(&self.permits).acquire_owned().await else {
            return;
        };

        let outcome = match self.handle(&msg).await {
            Ok(images) if images.is_empty() => return,
            Ok(images) => {
                let count = images.len();
                sink.reply(&msg.channel_id, images)
                    .await
                    .map(|_| count)
                    .map_err(|e| HandlerError::Reply(e.to_string()))
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(count) => info!(channel = %msg.channel_id, count, "posted captioned crops"),
            Err(err) => error!(channel = %msg.channel_id, error = %err, "message handling failed"),
        }
    }

    /// Process one message into its ordered list of encoded crops.
    ///
    /// The first hard error (fetch, localize, decode, encode) aborts the
    /// whole message: no partial results, no retry.
    pub async fn handle(&self, msg: &InboundMessage) -> Result<Vec<Vec<u8>>, HandlerError> {
        let candidates = image_attachments(&msg.attachments);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut edited = Vec::new();
        for attachment in candidates {
            let bytes =
                self.fetcher
                    .fetch(&attachment.url)
                    .await
                    .map_err(|e| HandlerError::Fetch {
                        url: attachment.url.clone(),
                        reason: e.to_string(),
                    })?;

            let detections = self
                .localizer
                .localize(&bytes)
                .await
                .map_err(|e| HandlerError::Localize(e.to_string()))?;
            let matching = matching_detections(&detections, &self.settings.label);
            if matching.is_empty() {
                continue;
            }

            let decoded = decode_image(&bytes)?;
            let (width, height) = decoded.dimensions();
            for detection in matching {
                let Some(rect) = bounding_rect(&detection.vertices, width, height) else {
                    continue;
                };
                let crop =
                    caption_region(&decoded, rect, self.renderer.as_ref(), &self.settings.caption);
                edited.push(encode_png(&crop.pixels)?);
            }
        }
        Ok(edited)
    }
}
