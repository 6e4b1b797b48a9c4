use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexis_stream::LookupSession;
use lexis_types::{AppEvent, FinalOutput, StreamUpdate};
use serde::Serialize;

use crate::state::AppState;

/// What the event loop hands to the output task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputEvent {
    Update(StreamUpdate),
    Final(FinalOutput),
}

/// App's main loop: drives one lookup session from the reader's events.
pub async fn event_loop(
    state: Arc<AppState>,
    term: String,
    reader_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<OutputEvent>,
) -> anyhow::Result<()> {
    let options = state.buffer_options().await;
    let mut session = LookupSession::new(term, options);
    tracing::info!(session = %session.id(), term = session.term(), "Lookup started");

    loop {
        let event = match reader_rx.recv().await {
            Ok(event) => event,
            Err(_) => {
                tracing::info!(
                    session = %session.id(),
                    chunks = session.chunks_seen(),
                    "Reader gone, dropping unfinished lookup"
                );
                return Ok(());
            }
        };

        match event {
            AppEvent::Chunk(chunk) => {
                let update = session.apply(&chunk);
                if update.is_unchanged() {
                    continue;
                }
                output_tx.send(OutputEvent::Update(update)).await?;
            }
            AppEvent::EndOfStream => {
                let output = session.finish();
                tracing::info!(
                    session = %session.id(),
                    chunks = session.chunks_seen(),
                    structured = output.entry.is_some(),
                    "Lookup finished"
                );
                output_tx.send(OutputEvent::Final(output)).await?;
                return Ok(());
            }
        }
    }
}
