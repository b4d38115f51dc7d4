use tokio::sync::watch;

/// Held by a background task to learn when to stop
pub struct ShutdownGuard {
    signal: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub(crate) fn new(signal: watch::Receiver<bool>) -> Self {
        Self { signal }
    }

    /// Resolve once shutdown has been requested
    pub async fn wait(&mut self) {
        // Err means every coordinator is gone, nobody can raise it any more
        if self.signal.wait_for(|raised| *raised).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.signal.borrow()
    }
}
