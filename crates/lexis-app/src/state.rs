use std::sync::Arc;

use lexis_config::Config;
use lexis_markdown::BuilderOptions;
use lexis_stream::BufferOptions;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Buffer settings for a fresh lookup, read from the current config.
    pub async fn buffer_options(&self) -> BufferOptions {
        let config = self.config.read().await;
        BufferOptions {
            max_buffer_bytes: config.stream.max_buffer_bytes,
            builder: BuilderOptions::new(config.markdown.label_language),
        }
    }
}
