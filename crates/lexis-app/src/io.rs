use std::path::{Path, PathBuf};

use kanal::AsyncSender;
use lexis_types::{AppEvent, RawChunk};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio_util::sync::CancellationToken;

pub type InputReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// Where a command reads its input from. `-` means stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(arg.to_path_buf())
        }
    }

    /// Term used to label a replayed lookup.
    pub fn term(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::File(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    pub async fn open(&self) -> anyhow::Result<InputReader> {
        match self {
            InputSource::Stdin => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
            InputSource::File(path) => {
                let file = File::open(path).await.map_err(|e| {
                    anyhow::anyhow!("Failed to open {}: {}", path.display(), e)
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }

    pub async fn read_to_string(&self) -> anyhow::Result<String> {
        let mut reader = self.open().await?;
        let mut text = String::new();
        reader.read_to_string(&mut text).await?;
        Ok(text)
    }
}

/// Feed a transcript to the event loop, one chunk per line.
///
/// Sends [`AppEvent::EndOfStream`] once the input is exhausted. On
/// cancellation it returns without it, so the lookup is dropped unfinished.
pub async fn transcript_reader<R>(
    reader: R,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut count = 0usize;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = cancel.cancelled() => {
                tracing::info!(lines = count, "Transcript reader cancelled");
                return Ok(());
            }
        };

        let Some(line) = line else {
            break;
        };
        count += 1;

        if event_tx
            .send(AppEvent::Chunk(RawChunk::from_line(&line)))
            .await
            .is_err()
        {
            tracing::warn!(lines = count, "Event loop closed before transcript ended");
            return Ok(());
        }
    }

    tracing::debug!(lines = count, "Transcript exhausted");
    event_tx.send(AppEvent::EndOfStream).await?;
    Ok(())
}
