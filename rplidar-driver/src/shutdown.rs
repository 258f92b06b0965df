//! Cooperative cancellation. The interrupt handler does exactly one thing:
//! it flips an atomic flag. All teardown runs in the normal tick path, at
//! the start of the tick that observes the flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct ShutdownCoordinator {
    cancelled: Arc<AtomicBool>,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        ShutdownCoordinator {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register the process interrupt handler. The handler only stores the
    /// flag; it never blocks and never touches the device. Registration can
    /// fail (the one fallible piece of driver scaffolding), which callers
    /// treat as a distinct terminal condition.
    pub fn install(&self) -> Result<(), ctrlc::Error> {
        let cancelled = Arc::clone(&self.cancelled);
        ctrlc::set_handler(move || {
            cancelled.store(true, Ordering::Relaxed);
        })?;
        info!("interrupt handler installed");
        Ok(())
    }

    /// Request cancellation from inside the process, e.g. when the window
    /// is closed. Equivalent to receiving the interrupt.
    pub fn request_shutdown(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Checked at the start of every tick. The flag may be set between any
    /// two ticks; a single relaxed atomic is the only synchronization the
    /// design needs.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_starts_clear() {
        let coordinator = ShutdownCoordinator::new();
        assert!(!coordinator.is_cancelled());
    }

    #[test]
    fn test_request_shutdown_sets_flag_for_all_clones() {
        let coordinator = ShutdownCoordinator::new();
        let observer = coordinator.clone();
        coordinator.request_shutdown();
        assert!(observer.is_cancelled());
        // Setting it again changes nothing.
        coordinator.request_shutdown();
        assert!(observer.is_cancelled());
    }
}
