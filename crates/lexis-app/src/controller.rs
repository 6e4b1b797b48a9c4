use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexis_types::AppEvent;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{OutputEvent, event_loop};
use crate::io::transcript_reader;
use crate::output::{OutputFormat, output_loop};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub reader_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_output: (AsyncSender<OutputEvent>, AsyncReceiver<OutputEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            reader_to_app: kanal::bounded_async(capacity),
            app_to_output: kanal::bounded_async(capacity),
        }
    }
}

/// Spawns the reader, event loop and output tasks of one replay and owns
/// their cancellation.
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub async fn new(state: Arc<AppState>) -> Self {
        let capacity = state.config.read().await.stream.channel_capacity;
        Self {
            channels: ChannelSet::new(capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks<R, W>(
        &self,
        term: String,
        input: R,
        format: OutputFormat,
        writer: W,
    ) -> JoinSet<anyhow::Result<()>>
    where
        R: AsyncBufRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let mut tasks = JoinSet::new();

        tasks.spawn(transcript_reader(
            input,
            self.cancel_token.child_token(),
            self.channels.reader_to_app.0.clone(),
        ));

        tasks.spawn(event_loop(
            self.state.clone(),
            term,
            self.channels.reader_to_app.1.clone(),
            self.channels.app_to_output.0.clone(),
        ));

        tasks.spawn(output_loop(
            self.channels.app_to_output.1.clone(),
            format,
            writer,
        ));

        tasks
    }

    /// Stop the reader and close both channels. The event loop drops its
    /// unfinished lookup and the output task stops writing.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        let _ = self.channels.reader_to_app.0.close();
        let _ = self.channels.app_to_output.0.close();
    }
}
