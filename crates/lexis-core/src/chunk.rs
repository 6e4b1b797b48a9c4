//! Uniform handling of the chunk shapes the lookup transport can deliver.

use lexis_types::{ChunkOperation, ChunkShape, InterpretedChunk, RawChunk};
use serde_json::Value;

use crate::entity::parse_entity;

/// Turn one chunk into an accumulator operation. Total: every input maps to
/// some text, unclassifiable JSON is stringified.
pub fn interpret(chunk: &RawChunk) -> InterpretedChunk {
    match chunk {
        RawChunk::Text(text) => interpret_text(text),
        RawChunk::Json(value) => interpret_value(value),
    }
}

fn interpret_text(text: &str) -> InterpretedChunk {
    if text.is_empty() {
        return InterpretedChunk::append("", ChunkShape::Empty);
    }

    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                if let Some(interpreted) = interpret_wrapper(&value) {
                    return interpreted;
                }
            }
            Err(e) => tracing::debug!("text chunk looks like JSON but does not parse: {e}"),
        }
    }

    InterpretedChunk::append(text, ChunkShape::PlainText)
}

fn interpret_value(value: &Value) -> InterpretedChunk {
    if let Some(interpreted) = interpret_wrapper(value) {
        return interpreted;
    }

    match value {
        Value::String(text) => interpret_text(text),
        Value::Null => InterpretedChunk::append("", ChunkShape::Empty),
        Value::Bool(b) => InterpretedChunk::append(b.to_string(), ChunkShape::Primitive),
        Value::Number(n) => InterpretedChunk::append(n.to_string(), ChunkShape::Primitive),
        other => InterpretedChunk::append(other.to_string(), ChunkShape::Unclassified),
    }
}

/// The three recognised envelope objects, checked in order.
fn interpret_wrapper(value: &Value) -> Option<InterpretedChunk> {
    let object = value.as_object()?;

    if let Some(markdown) = object.get("markdown").and_then(Value::as_str) {
        return Some(InterpretedChunk {
            text: markdown.to_string(),
            entry: parse_entity(value),
            operation: ChunkOperation::Replace,
            shape: ChunkShape::MarkdownEntity,
        });
    }

    if let Some(inner) = object.get("value") {
        return Some(InterpretedChunk::append(
            scalar_text(inner),
            ChunkShape::ValueWrapper,
        ));
    }

    let content = object
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("delta"))
        .and_then(|delta| delta.get("content"))?;

    Some(InterpretedChunk::append(
        delta_text(content),
        ChunkShape::ProviderDelta,
    ))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Delta content is either a string or a list of parts carrying `text`.
fn delta_text(content: &Value) -> String {
    match content {
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| match part {
                Value::String(s) => Some(s.as_str()),
                other => other.get("text").and_then(Value::as_str),
            })
            .collect(),
        other => scalar_text(other),
    }
}
