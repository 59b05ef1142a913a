/// Cleanup session: collect, summarize, confirm, delete
pub mod confirm;
pub mod interrupt;
pub mod processor;
pub mod progress;
pub mod stats;

pub use confirm::{Confirmation, ScriptedConfirmation, TerminalConfirmation};
pub use interrupt::Interrupt;
pub use processor::{
    CleanupSession, DeleteFailure, DeletionCandidate, SessionOptions, SessionReport, SessionState,
};
pub use stats::SessionStats;
