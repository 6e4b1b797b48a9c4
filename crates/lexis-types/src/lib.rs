pub mod entry;
pub mod types;

pub use entry::{
    Example, LegacyEntry, ParsedEntity, Phonetics, Phrase, Relations, Sense, SenseGroup,
    StructuredEntry, VariantForm,
};
pub use types::{
    AppEvent, ChunkOperation, ChunkShape, FinalOutput, InterpretedChunk, LabelLanguage,
    PreviewSnapshot, RawChunk, StreamUpdate,
};
