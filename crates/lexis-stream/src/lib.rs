pub mod buffer;
pub mod session;

pub use buffer::{AssemblyBuffer, BufferOptions, DEFAULT_MAX_BUFFER_BYTES};
pub use session::LookupSession;
