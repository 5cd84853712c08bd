pub mod clipboard;
pub mod generator;
pub mod pool;

pub use clipboard::{copy_to_clipboard, ClipboardError, ClipboardTool, CANDIDATES};
pub use generator::{generate, generate_with_key, GenerateError};
pub use pool::{build_pool, Options};
