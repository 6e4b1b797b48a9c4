use serde::{Deserialize, Serialize};

fn default_max_buffer_bytes() -> usize {
    1024 * 1024
}

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Ceiling for one lookup's accumulated text
    #[serde(default = "default_max_buffer_bytes")]
    pub max_buffer_bytes: usize,
    /// Bound of the reader → event loop channel
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_buffer_bytes: default_max_buffer_bytes(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let max_buffer_bytes =
            crate::parsed_or(lookup, "LEXIS_MAX_BUFFER_BYTES", default_max_buffer_bytes());
        let channel_capacity = crate::parsed_or(
            lookup,
            "LEXIS_CHANNEL_CAPACITY",
            default_channel_capacity(),
        )
        .max(1);

        Self {
            max_buffer_bytes,
            channel_capacity,
        }
    }
}
