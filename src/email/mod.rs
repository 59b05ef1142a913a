pub mod common;
pub mod mailbox;

// Re-export commonly used items
pub use common::{FetchedMessage, MessageHandle, MessageMetadata};
pub use mailbox::Mailbox;
