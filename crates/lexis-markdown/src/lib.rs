pub mod builder;
pub mod labels;
pub mod normalize;
pub mod preview;

#[cfg(test)]
mod tests;

pub use builder::{
    BuilderOptions, build_dictionary_entry_markdown, build_entry_markdown_with,
    build_markdown_from_value, from_value,
};
pub use normalize::normalize_dictionary_markdown;
pub use preview::extract_markdown_preview;
