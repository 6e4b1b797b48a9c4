//! Streaming Assembly Buffer.
//!
//! Accumulates the raw text of one lookup and re-renders it after every
//! chunk. Complete JSON goes through the entry builder, incomplete JSON
//! through the field scanner, anything else is treated as markdown.

use lexis_core::parse_entity;
use lexis_markdown::{
    BuilderOptions, build_entry_markdown_with, extract_markdown_preview,
    normalize_dictionary_markdown,
};
use lexis_types::{FinalOutput, ParsedEntity, PreviewSnapshot, StreamUpdate};
use serde_json::Value;

pub const DEFAULT_MAX_BUFFER_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferOptions {
    /// Chunks that would grow the accumulator past this are dropped
    pub max_buffer_bytes: usize,
    pub builder: BuilderOptions,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            max_buffer_bytes: DEFAULT_MAX_BUFFER_BYTES,
            builder: BuilderOptions::default(),
        }
    }
}

/// Candidate output of one render of the accumulator.
struct Rendering {
    /// `None` keeps the previous preview
    preview: Option<String>,
    entry: Option<ParsedEntity>,
}

#[derive(Debug, Default)]
pub struct AssemblyBuffer {
    raw: String,
    preview: String,
    current_entry: Option<ParsedEntity>,
    last_parsed: Option<ParsedEntity>,
    /// Entry delivered alongside a replacement
    pinned_entry: Option<ParsedEntity>,
    frozen: Option<FinalOutput>,
    options: BufferOptions,
}

impl AssemblyBuffer {
    pub fn new(options: BufferOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn is_finalized(&self) -> bool {
        self.frozen.is_some()
    }

    pub fn append(&mut self, chunk: &str) -> StreamUpdate {
        if self.frozen.is_some() {
            tracing::warn!(bytes = chunk.len(), "append after finalize ignored");
            return StreamUpdate::default();
        }
        if chunk.is_empty() {
            return StreamUpdate::default();
        }
        if self.raw.len() + chunk.len() > self.options.max_buffer_bytes {
            tracing::warn!(
                bytes = chunk.len(),
                buffered = self.raw.len(),
                limit = self.options.max_buffer_bytes,
                "chunk dropped, buffer limit reached"
            );
            return StreamUpdate::default();
        }

        self.raw.push_str(chunk);
        self.refresh()
    }

    /// Discard everything received so far and start over from `markdown`.
    pub fn replace(&mut self, markdown: &str) -> StreamUpdate {
        self.replace_with_entry(markdown, None)
    }

    /// Like [`replace`](Self::replace), reporting `entry` as the parsed entry.
    pub fn replace_with_entry(&mut self, markdown: &str, entry: Option<ParsedEntity>) -> StreamUpdate {
        if self.frozen.is_some() {
            tracing::warn!("replace after finalize ignored");
            return StreamUpdate::default();
        }

        let options = self.options;
        *self = Self::new(options);
        self.pinned_entry = entry;
        self.append(markdown);

        // Replacement always reports the full new state
        StreamUpdate {
            preview: Some(self.preview.clone()),
            entry: self.current_entry.clone(),
        }
    }

    /// Render one last time and freeze the result.
    pub fn finalize(&mut self) -> FinalOutput {
        if let Some(frozen) = &self.frozen {
            return frozen.clone();
        }

        self.refresh();
        // JSON that never yielded an entry finalizes as its literal text
        let unparsed_json = self.raw.trim_start().starts_with('{') && self.current_entry.is_none();
        let markdown = if unparsed_json || self.preview.is_empty() {
            normalize_dictionary_markdown(&self.raw).trim_end().to_string()
        } else {
            self.preview.clone()
        };
        let output = FinalOutput {
            markdown,
            entry: self.current_entry.clone(),
        };

        tracing::debug!(
            bytes = self.raw.len(),
            parsed = output.entry.is_some(),
            "assembly buffer finalized"
        );
        self.frozen = Some(output.clone());
        output
    }

    pub fn snapshot(&self) -> PreviewSnapshot {
        PreviewSnapshot {
            raw: self.raw.clone(),
            preview: self.preview.clone(),
            entry: self.current_entry.clone(),
        }
    }

    fn render(&self) -> Rendering {
        if !self.raw.trim_start().starts_with('{') {
            return Rendering {
                preview: Some(normalize_dictionary_markdown(&self.raw)),
                entry: None,
            };
        }

        match serde_json::from_str::<Value>(&self.raw) {
            Ok(value) => match parse_entity(&value) {
                Some(entry) => Rendering {
                    preview: Some(build_entry_markdown_with(&entry, &self.options.builder)),
                    entry: Some(entry),
                },
                None => {
                    tracing::debug!("complete JSON is not a dictionary entry");
                    Rendering {
                        preview: Some(String::new()),
                        entry: None,
                    }
                }
            },
            Err(e) => {
                tracing::debug!("accumulated JSON incomplete: {e}");
                Rendering {
                    preview: extract_markdown_preview(&self.raw),
                    entry: None,
                }
            }
        }
    }

    fn refresh(&mut self) -> StreamUpdate {
        let rendering = self.render();
        let mut update = StreamUpdate::default();

        if let Some(candidate) = rendering.preview {
            let regresses = candidate.is_empty() && !self.preview.is_empty();
            if !regresses && candidate != self.preview {
                self.preview = candidate.clone();
                update.preview = Some(candidate);
            }
        }

        let entry = rendering.entry.or_else(|| self.pinned_entry.clone());
        if let Some(entry) = entry {
            if self.last_parsed.as_ref() != Some(&entry) {
                self.last_parsed = Some(entry.clone());
                self.current_entry = Some(entry.clone());
                update.entry = Some(entry);
            }
        }

        update
    }
}
