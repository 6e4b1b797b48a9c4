use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entry::ParsedEntity;

/// One unit of data delivered by the lookup transport.
#[derive(Debug, Clone, PartialEq)]
pub enum RawChunk {
    Text(String),
    Json(serde_json::Value),
}

impl RawChunk {
    /// Decode one transcript line: JSON strings become text chunks, other
    /// JSON values stay structured, anything unparseable is taken literally.
    pub fn from_line(line: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(line) {
            Ok(serde_json::Value::String(text)) => RawChunk::Text(text),
            Ok(value) => RawChunk::Json(value),
            Err(_) => RawChunk::Text(line.to_string()),
        }
    }
}

impl From<&str> for RawChunk {
    fn from(text: &str) -> Self {
        RawChunk::Text(text.to_string())
    }
}

impl From<String> for RawChunk {
    fn from(text: String) -> Self {
        RawChunk::Text(text)
    }
}

impl From<serde_json::Value> for RawChunk {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => RawChunk::Text(text),
            other => RawChunk::Json(other),
        }
    }
}

/// Messages from the chunk reader to the lookup event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Chunk(RawChunk),
    EndOfStream,
}

/// Shape a chunk was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkShape {
    PlainText,
    ValueWrapper,
    MarkdownEntity,
    ProviderDelta,
    Primitive,
    Empty,
    Unclassified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkOperation {
    /// Append the text to the raw accumulator
    Append,
    /// Discard in-flight text and use this complete result instead
    Replace,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterpretedChunk {
    pub text: String,
    pub entry: Option<ParsedEntity>,
    pub operation: ChunkOperation,
    pub shape: ChunkShape,
}

impl InterpretedChunk {
    pub fn append(text: impl Into<String>, shape: ChunkShape) -> Self {
        Self {
            text: text.into(),
            entry: None,
            operation: ChunkOperation::Append,
            shape,
        }
    }
}

/// Incremental output of the assembly buffer. `preview` is `None` when the
/// rendering did not change since the previous update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StreamUpdate {
    pub preview: Option<String>,
    pub entry: Option<ParsedEntity>,
}

impl StreamUpdate {
    pub fn is_unchanged(&self) -> bool {
        self.preview.is_none() && self.entry.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinalOutput {
    pub markdown: String,
    pub entry: Option<ParsedEntity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreviewSnapshot {
    pub raw: String,
    pub preview: String,
    pub entry: Option<ParsedEntity>,
}

/// Language used for the headings and labels the builder emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelLanguage {
    #[default]
    Zh,
    En,
}

impl FromStr for LabelLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" | "chinese" => Ok(LabelLanguage::Zh),
            "en" | "en-us" | "english" => Ok(LabelLanguage::En),
            other => Err(format!("unknown label language: {other}")),
        }
    }
}

impl fmt::Display for LabelLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelLanguage::Zh => write!(f, "zh"),
            LabelLanguage::En => write!(f, "en"),
        }
    }
}
