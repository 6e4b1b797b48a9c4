use lexis_core::interpret;
use lexis_types::{
    ChunkOperation, FinalOutput, ParsedEntity, PreviewSnapshot, RawChunk, StreamUpdate,
};
use uuid::Uuid;

use crate::buffer::{AssemblyBuffer, BufferOptions};

/// One term lookup: the buffer plus bookkeeping for tracing.
#[derive(Debug)]
pub struct LookupSession {
    id: Uuid,
    term: String,
    buffer: AssemblyBuffer,
    chunks_seen: usize,
}

impl LookupSession {
    pub fn new(term: impl Into<String>, options: BufferOptions) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            term: term.into(),
            buffer: AssemblyBuffer::new(options),
            chunks_seen: 0,
        };
        tracing::debug!(session = %session.id, term = %session.term, "lookup session started");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn chunks_seen(&self) -> usize {
        self.chunks_seen
    }

    pub fn buffer(&self) -> &AssemblyBuffer {
        &self.buffer
    }

    /// Interpret one transport chunk and feed it to the buffer.
    pub fn apply(&mut self, chunk: &RawChunk) -> StreamUpdate {
        self.chunks_seen += 1;
        let interpreted = interpret(chunk);
        tracing::debug!(
            session = %self.id,
            chunk = self.chunks_seen,
            shape = ?interpreted.shape,
            operation = ?interpreted.operation,
            bytes = interpreted.text.len(),
            "chunk received"
        );

        match interpreted.operation {
            ChunkOperation::Append => self.buffer.append(&interpreted.text),
            ChunkOperation::Replace => self
                .buffer
                .replace_with_entry(&interpreted.text, interpreted.entry),
        }
    }

    pub fn finish(&mut self) -> FinalOutput {
        let output = self.buffer.finalize();
        tracing::debug!(
            session = %self.id,
            chunks = self.chunks_seen,
            bytes = output.markdown.len(),
            headword = ?output.entry.as_ref().and_then(ParsedEntity::term),
            "lookup session finished"
        );
        output
    }

    pub fn snapshot(&self) -> PreviewSnapshot {
        self.buffer.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_deltas_accumulate() {
        let mut session = LookupSession::new("run", BufferOptions::default());
        for piece in ["##Ti", "tle\n", "- a"] {
            session.apply(&RawChunk::from(json!({
                "choices": [{ "delta": { "content": piece } }]
            })));
        }
        session.apply(&RawChunk::from(json!({ "value": "\n- b" })));

        assert_eq!(session.chunks_seen(), 4);
        assert_eq!(session.snapshot().raw, "##Title\n- a\n- b");
        assert_eq!(session.finish().markdown, "## Title\n- a\n- b");
    }

    #[test]
    fn test_markdown_entity_replaces_partial_text() {
        let mut session = LookupSession::new("run", BufferOptions::default());
        session.apply(&RawChunk::from("half-finished te"));

        let update = session.apply(&RawChunk::from(json!({ "markdown": "# run\n- to move" })));
        assert_eq!(update.preview.as_deref(), Some("# run\n- to move"));
        assert_eq!(
            update.entry,
            Some(ParsedEntity::MarkdownOnly {
                markdown: "# run\n- to move".to_string()
            })
        );

        let output = session.finish();
        assert_eq!(output.markdown, "# run\n- to move");
        assert!(output.entry.is_some());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = LookupSession::new("a", BufferOptions::default());
        let b = LookupSession::new("b", BufferOptions::default());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.term(), "a");
    }
}
