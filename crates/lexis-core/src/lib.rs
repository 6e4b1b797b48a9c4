pub mod chars;
pub mod chunk;
pub mod entity;
pub mod error;
pub mod json_scan;
pub mod preprocess;

pub use chunk::interpret;
pub use entity::{parse_entity, parse_entity_str};
pub use error::CoreError;
pub use json_scan::{FieldValue, decode_json_string, find_field_value};
