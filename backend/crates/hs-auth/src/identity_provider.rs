use crate::{IdentityEvent, Result as AuthErrorResult};

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Source of identity session changes.
///
/// `subscribe` must first deliver the current session (signed in or out) so
/// subscribers can leave their initializing state, then every later change.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn subscribe(&self) -> mpsc::UnboundedReceiver<IdentityEvent>;

    /// End the session at the identity service. Rejections are
    /// `AuthError::SignOut`.
    async fn sign_out(&self) -> AuthErrorResult<()>;
}
