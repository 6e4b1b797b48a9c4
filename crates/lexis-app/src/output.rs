use kanal::AsyncReceiver;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::events::OutputEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Render one event the way `format` asks for.
pub fn render_event(event: &OutputEvent, format: OutputFormat) -> anyhow::Result<String> {
    let text = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string(event)?),
        OutputFormat::Text => match event {
            OutputEvent::Update(update) => match &update.preview {
                Some(preview) => format!("--- preview ---\n{preview}\n"),
                None => String::new(),
            },
            OutputEvent::Final(output) => format!("--- final ---\n{}\n", output.markdown),
        },
    };
    Ok(text)
}

/// Write events until the final output or until the event loop goes away.
pub async fn output_loop<W>(
    output_rx: AsyncReceiver<OutputEvent>,
    format: OutputFormat,
    mut writer: W,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Ok(event) = output_rx.recv().await {
        let text = render_event(&event, format)?;
        writer.write_all(text.as_bytes()).await?;
        writer.flush().await?;

        if matches!(event, OutputEvent::Final(_)) {
            break;
        }
    }

    writer.shutdown().await?;
    Ok(())
}
