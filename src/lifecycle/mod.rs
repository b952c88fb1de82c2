//! Process lifecycle: shutdown coordination and signal handling.

pub mod shutdown;

pub use shutdown::{wait_for_signal, Shutdown};
