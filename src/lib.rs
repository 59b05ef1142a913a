// Library exports for the mailsweep crate
// This allows tests and the binary to use the modules

pub mod classifier;
pub mod config;
pub mod email;
pub mod error;
pub mod imap_client;
pub mod session;
