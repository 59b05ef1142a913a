use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop flag raised by Ctrl+C and polled by the session
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Raise the flag on the first Ctrl+C.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn listen_for_ctrl_c(&self) {
        let interrupt = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    println!("\n\n🛑 STOP REQUESTED - finishing the current step...");
                    info!("Interrupt received");
                    interrupt.trigger();
                }
                Err(e) => warn!("Unable to listen for Ctrl+C: {}", e),
            }
        });
    }
}
