use crate::{
    AuthError, IdentityEvent, IdentityProvider, Result as AuthErrorResult, SessionRevoker,
    SessionValidator,
};

use std::panic::Location;
use std::sync::Arc;

use async_trait::async_trait;
use error_location::ErrorLocation;
use hs_core::Identity;
use log::{debug, info, warn};
use tokio::sync::{RwLock, mpsc};

/// In-process identity provider fed by validated access tokens.
///
/// Holds at most one session and fans its changes out to every subscriber.
pub struct SessionBroker {
    inner: Arc<RwLock<BrokerInner>>,
    validator: Arc<SessionValidator>,
    revoker: Option<Arc<dyn SessionRevoker>>,
}

struct BrokerInner {
    session: Option<ActiveSession>,
    subscribers: Vec<mpsc::UnboundedSender<IdentityEvent>>,
}

struct ActiveSession {
    access_token: String,
    identity: Identity,
    expires_at: i64,
}

impl BrokerInner {
    /// Deliver to every live subscriber, dropping the closed ones
    fn emit(&mut self, event: IdentityEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
        debug!(
            "Emitted {:?} to {} subscriber(s)",
            event,
            self.subscribers.len()
        );
    }
}

impl SessionBroker {
    pub fn new(validator: SessionValidator, revoker: Option<Arc<dyn SessionRevoker>>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BrokerInner {
                session: None,
                subscribers: Vec::new(),
            })),
            validator: Arc::new(validator),
            revoker,
        }
    }

    /// Validate an access token and make it the active session
    pub async fn sign_in(&self, access_token: &str) -> AuthErrorResult<Identity> {
        let claims = self.validator.validate(access_token)?;
        let identity = claims.identity();

        let mut inner = self.inner.write().await;
        inner.session = Some(ActiveSession {
            access_token: access_token.to_string(),
            identity: identity.clone(),
            expires_at: claims.exp,
        });
        inner.emit(IdentityEvent::SignedIn(identity.clone()));

        info!("Session started for {}", identity);
        Ok(identity)
    }

    /// Drop the active session without contacting the identity service
    pub async fn expire(&self) {
        let mut inner = self.inner.write().await;
        if let Some(session) = inner.session.take() {
            info!("Session for {} expired", session.identity);
            inner.emit(IdentityEvent::SignedOut);
        }
    }

    /// Expire the session if its token is past `exp` at `now` (Unix seconds).
    /// Returns true when a session was expired.
    pub async fn expire_if_due(&self, now: i64) -> bool {
        let due = {
            let inner = self.inner.read().await;
            inner
                .session
                .as_ref()
                .is_some_and(|session| session.expires_at <= now)
        };
        if due {
            self.expire().await;
        }
        due
    }

    /// Forward a failure of the underlying session channel to subscribers
    pub async fn report_error(&self, message: impl Into<String>) {
        let mut inner = self.inner.write().await;
        inner.session = None;
        inner.emit(IdentityEvent::StreamError(message.into()));
    }

    pub async fn current_identity(&self) -> Option<Identity> {
        let inner = self.inner.read().await;
        inner.session.as_ref().map(|session| session.identity.clone())
    }
}

#[async_trait]
impl IdentityProvider for SessionBroker {
    async fn subscribe(&self) -> mpsc::UnboundedReceiver<IdentityEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.write().await;

        let initial = match &inner.session {
            Some(session) => IdentityEvent::SignedIn(session.identity.clone()),
            None => IdentityEvent::SignedOut,
        };
        // Receiver is still in scope, so this cannot fail
        let _ = tx.send(initial);

        inner.subscribers.push(tx);
        debug!("Identity subscriber added ({} total)", inner.subscribers.len());
        rx
    }

    async fn sign_out(&self) -> AuthErrorResult<()> {
        let session = {
            let mut inner = self.inner.write().await;
            let session = inner.session.take();
            if session.is_some() {
                inner.emit(IdentityEvent::SignedOut);
            }
            session
        };

        let (Some(session), Some(revoker)) = (session, &self.revoker) else {
            return Ok(());
        };

        revoker
            .revoke(&session.access_token)
            .await
            .map_err(|e| {
                warn!("Revoking session for {} failed: {}", session.identity, e);
                AuthError::SignOut {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        info!("Session for {} revoked", session.identity);
        Ok(())
    }
}

impl Clone for SessionBroker {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            validator: Arc::clone(&self.validator),
            revoker: self.revoker.clone(),
        }
    }
}
