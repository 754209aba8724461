//! Discord gateway adapter.
//!
//! Receives message events, hands qualifying ones to the pipeline in their
//! own task, and uploads the resulting crops back to the channel.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chairspot_core::{Attachment, InboundMessage};
use chairspot_pipeline::{MessagePipeline, ReplySink};
use serenity::builder::{CreateAttachment, CreateMessage};
use serenity::gateway::ActivityData;
use serenity::http::Http;
use serenity::model::channel::Message as DiscordMessage;
use serenity::model::gateway::Ready;
use serenity::model::id::ChannelId;
use serenity::prelude::*;
use tracing::{error, info};

use crate::ChannelAdapter;

/// Fixed interval of the process-wide presence refresh.
const PRESENCE_INTERVAL: Duration = Duration::from_secs(20);
/// Status text shown under the bot's name (chair emoji).
const PRESENCE_TEXT: &str = "\u{1FA91}";
/// Every uploaded crop shares this filename.
const OUTPUT_FILENAME: &str = "chairs.png";

struct Handler {
    pipeline: Arc<MessagePipeline>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: DiscordMessage) {
        if msg.author.bot || msg.attachments.is_empty() {
            return;
        }

        let inbound = InboundMessage {
            channel_id: msg.channel_id.to_string(),
            from_bot: msg.author.bot,
            attachments: msg
                .attachments
                .iter()
                .map(|a| Attachment::new(a.filename.clone(), a.url.clone()))
                .collect(),
        };
        let sink: Arc<dyn ReplySink> = Arc::new(DiscordReplySink {
            http: ctx.http.clone(),
            channel_id: msg.channel_id,
        });

        // One task per message; the pipeline's semaphore caps how many run
        // at once.
        let pipeline = Arc::clone(&self.pipeline);
        tokio::spawn(async move {
            pipeline.process(inbound, sink).await;
        });
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "connected to the gateway");

        // Presence updates run on their own task, never blocked by handlers.
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(PRESENCE_INTERVAL);
            loop {
                tick.tick().await;
                ctx.set_activity(Some(ActivityData::custom(PRESENCE_TEXT)));
            }
        });
    }
}

/// Uploads finished crops back to the originating Discord channel, all under
/// the same fixed filename.
struct DiscordReplySink {
    http: Arc<Http>,
    channel_id: ChannelId,
}

#[async_trait]
impl ReplySink for DiscordReplySink {
    async fn reply(&self, _channel_id: &str, images: Vec<Vec<u8>>) -> Result<()> {
        let files: Vec<CreateAttachment> = images
            .into_iter()
            .map(|bytes| CreateAttachment::bytes(bytes, OUTPUT_FILENAME))
            .collect();
        self.channel_id
            .send_message(&self.http, CreateMessage::new().add_files(files))
            .await?;
        Ok(())
    }
}

pub struct DiscordAdapter {
    token: String,
    pipeline: Arc<MessagePipeline>,
}

impl DiscordAdapter {
    pub fn new(token: impl Into<String>, pipeline: Arc<MessagePipeline>) -> Self {
        Self {
            token: token.into(),
            pipeline,
        }
    }
}

#[async_trait]
impl ChannelAdapter for DiscordAdapter {
    fn name(&self) -> &str {
        "discord"
    }

    async fn start(&self) -> Result<()> {
        info!("starting Discord adapter");

        let intents = GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let mut client = Client::builder(&self.token, intents)
            .event_handler(Handler {
                pipeline: Arc::clone(&self.pipeline),
            })
            .await?;

        if let Err(why) = client.start().await {
            error!("client error: {:?}", why);
            anyhow::bail!("Discord client error: {:?}", why);
        }

        Ok(())
    }
}
