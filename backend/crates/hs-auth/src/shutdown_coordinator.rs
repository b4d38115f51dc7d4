use crate::ShutdownGuard;

use std::sync::Arc;

use log::info;
use tokio::sync::watch;

/// Latched stop signal for the identity listener and the portal shell.
///
/// Once raised it stays raised: guards handed out afterwards see it
/// immediately.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    signal: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            signal: Arc::new(signal),
        }
    }

    pub fn shutdown(&self) {
        if !self.signal.send_replace(true) {
            info!("Shutdown requested");
        }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.signal.borrow()
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self.signal.subscribe())
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
