use async_trait::async_trait;

pub mod discord;

pub use discord::DiscordAdapter;

/// All channel adapters implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Connect and run until the connection ends or the process is
    /// interrupted.
    async fn start(&self) -> anyhow::Result<()>;
}
