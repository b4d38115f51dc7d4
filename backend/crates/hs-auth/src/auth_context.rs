use crate::{
    AuthError, AuthSnapshot, AuthState, IdentityEvent, IdentityProvider, ProfileStatus,
    Result as AuthErrorResult, ShutdownCoordinator, ShutdownGuard, create_fetch_span,
};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use error_location::ErrorLocation;
use hs_core::{Identity, Profile, ProfileLookup, ProfileRepository};
use log::{debug, info, warn};
use tokio::sync::{RwLock, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Process-wide identity/profile state.
///
/// Owns the single identity stream subscription and reconciles it with
/// profile lookups. Cloning shares the same state; readers either call the
/// accessors or hold a `watch` receiver.
pub struct AuthContext {
    inner: Arc<RwLock<ContextInner>>,
    snapshots: Arc<watch::Sender<AuthSnapshot>>,
    provider: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    fetch_timeout: Duration,
    shutdown: ShutdownCoordinator,
}

struct ContextInner {
    state: AuthState,
    generation: u64,
    /// Sequence number of the most recently started profile lookup
    issued_fetch: u64,
    /// Sequence number of the lookup whose result is currently applied
    applied_fetch: u64,
    last_stream_error: Option<String>,
    stream_task: Option<JoinHandle<()>>,
}

impl ContextInner {
    fn issue_fetch(&mut self) -> u64 {
        self.issued_fetch += 1;
        self.issued_fetch
    }

    /// A result is usable only for the identity it was started for, and
    /// never over a result from a lookup that started later
    fn accepts(&self, generation: u64, fetch: u64) -> bool {
        self.generation == generation && fetch > self.applied_fetch
    }

    fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            state: self.state.clone(),
            generation: self.generation,
            last_stream_error: self.last_stream_error.clone(),
        }
    }
}

impl AuthContext {
    /// Subscribe to the identity stream and start reconciling.
    ///
    /// The context stays `Initializing` until the provider delivers its first
    /// event.
    pub async fn start(
        provider: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        fetch_timeout: Duration,
    ) -> Self {
        let (snapshots, _) = watch::channel(AuthSnapshot::default());

        let context = Self {
            inner: Arc::new(RwLock::new(ContextInner {
                state: AuthState::Initializing,
                generation: 0,
                issued_fetch: 0,
                applied_fetch: 0,
                last_stream_error: None,
                stream_task: None,
            })),
            snapshots: Arc::new(snapshots),
            provider,
            profiles,
            fetch_timeout,
            shutdown: ShutdownCoordinator::new(),
        };

        let events = context.provider.subscribe().await;
        let guard = context.shutdown.subscribe_guard();
        let handle = tokio::spawn(Self::run_identity_stream(context.clone(), events, guard));
        context.inner.write().await.stream_task = Some(handle);

        info!(
            "Auth context started (profile fetch timeout {}s)",
            fetch_timeout.as_secs()
        );
        context
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.snapshots.borrow().state.identity().cloned()
    }

    pub fn current_profile(&self) -> Option<Profile> {
        self.snapshots.borrow().state.profile().cloned()
    }

    /// True only before the first identity event
    pub fn is_loading(&self) -> bool {
        self.snapshots.borrow().state.is_loading()
    }

    /// True while a profile lookup for the current identity is in flight
    pub fn is_profile_pending(&self) -> bool {
        self.snapshots.borrow().state.is_profile_pending()
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that observes every published snapshot
    pub fn watch(&self) -> watch::Receiver<AuthSnapshot> {
        self.snapshots.subscribe()
    }

    /// Re-run the profile lookup for the current identity.
    ///
    /// Returns `Ok(None)` when nobody is signed in or the identity has no
    /// usable profile. On failure a profile already held is kept. When a
    /// lookup started after this one has already been applied, that newer
    /// result stands and is returned.
    pub async fn refresh_profile(&self) -> AuthErrorResult<Option<Profile>> {
        let (identity, generation, fetch) = {
            let mut inner = self.inner.write().await;
            let Some(identity) = inner.state.identity().cloned() else {
                return Ok(None);
            };
            let fetch = inner.issue_fetch();
            (identity, inner.generation, fetch)
        };

        let span = create_fetch_span(&identity.id, generation, "refresh");
        let outcome = self.fetch_profile(&identity.id).instrument(span).await;

        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            debug!(
                "Discarding refresh for {} (generation {} superseded by {})",
                identity.id, generation, inner.generation
            );
            return Err(AuthError::IdentityChanged {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if !inner.accepts(generation, fetch) {
            debug!(
                "Discarding refresh {} for {} (lookup {} already applied)",
                fetch, identity.id, inner.applied_fetch
            );
            return Ok(inner.state.profile().cloned());
        }

        match outcome {
            Ok(lookup) => {
                inner.applied_fetch = fetch;
                inner.state = AuthState::from_lookup(identity, lookup);
                let profile = inner.state.profile().cloned();
                self.publish(&inner);
                Ok(profile)
            }
            Err(e) => {
                warn!("Profile refresh for {} failed: {}", identity.id, e);
                if inner.state.profile().is_none() {
                    inner.state = AuthState::AuthenticatedNoProfile {
                        identity,
                        status: ProfileStatus::Failed(e.reason()),
                    };
                    self.publish(&inner);
                }
                Err(e)
            }
        }
    }

    /// Clear local state, then end the session at the identity service.
    ///
    /// Local state is `Unauthenticated` even when the vendor rejects the
    /// request; the rejection is still returned.
    pub async fn sign_out(&self) -> AuthErrorResult<()> {
        {
            let mut inner = self.inner.write().await;
            inner.generation += 1;
            inner.state = AuthState::Unauthenticated;
            inner.last_stream_error = None;
            self.publish(&inner);
        }
        info!("Signed out locally");

        self.provider.sign_out().await.inspect_err(|e| {
            warn!("Identity service rejected sign-out: {}", e);
        })
    }

    /// Tear down the identity stream subscription. Safe to call repeatedly.
    pub async fn shutdown(&self) {
        let handle = self.inner.write().await.stream_task.take();
        let Some(handle) = handle else {
            return;
        };

        self.shutdown.shutdown();
        if let Err(e) = handle.await {
            warn!("Identity stream task ended abnormally: {}", e);
        }
        info!("Auth context shut down");
    }

    async fn run_identity_stream(
        context: AuthContext,
        mut events: mpsc::UnboundedReceiver<IdentityEvent>,
        mut guard: ShutdownGuard,
    ) {
        loop {
            tokio::select! {
                _ = guard.wait() => {
                    debug!("Identity stream listener stopping");
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => context.apply_event(event).await,
                    None => {
                        context.apply_stream_closed().await;
                        break;
                    }
                }
            }
        }
    }

    pub(crate) async fn apply_event(&self, event: IdentityEvent) {
        let mut inner = self.inner.write().await;
        inner.generation += 1;

        match event {
            IdentityEvent::SignedIn(identity) => {
                info!("Identity signed in: {}", identity);
                inner.state = AuthState::AuthenticatedNoProfile {
                    identity: identity.clone(),
                    status: ProfileStatus::Pending,
                };
                inner.last_stream_error = None;
                let generation = inner.generation;
                let fetch = inner.issue_fetch();
                self.publish(&inner);
                drop(inner);

                self.spawn_fetch(identity, generation, fetch);
            }
            IdentityEvent::SignedOut => {
                info!("Identity signed out");
                inner.state = AuthState::Unauthenticated;
                inner.last_stream_error = None;
                self.publish(&inner);
            }
            IdentityEvent::StreamError(message) => {
                warn!("Identity stream error, treating as signed out: {}", message);
                inner.state = AuthState::Unauthenticated;
                inner.last_stream_error = Some(message);
                self.publish(&inner);
            }
        }
    }

    /// A closed stream before any event would leave readers loading forever
    async fn apply_stream_closed(&self) {
        let mut inner = self.inner.write().await;
        if inner.state.is_loading() {
            warn!("Identity stream closed before reporting a session");
            inner.generation += 1;
            inner.state = AuthState::Unauthenticated;
            inner.last_stream_error = Some("identity stream closed".to_string());
            self.publish(&inner);
        } else {
            info!("Identity stream closed");
        }
    }

    fn spawn_fetch(&self, identity: Identity, generation: u64, fetch: u64) {
        let context = self.clone();
        let span = create_fetch_span(&identity.id, generation, "identity_change");

        tokio::spawn(
            async move {
                let outcome = context.fetch_profile(&identity.id).await;
                context.apply_fetch(generation, fetch, outcome).await;
            }
            .instrument(span),
        );
    }

    /// Look up a profile, bounded by the configured timeout
    async fn fetch_profile(&self, identity_id: &str) -> AuthErrorResult<ProfileLookup> {
        debug!("Fetching profile for {}", identity_id);

        match tokio::time::timeout(self.fetch_timeout, self.profiles.get_profile(identity_id)).await
        {
            Ok(Ok(lookup)) => Ok(lookup),
            Ok(Err(source)) => Err(AuthError::ProfileFetch {
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(_) => Err(AuthError::ProfileFetchTimeout {
                timeout: self.fetch_timeout,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Apply a lookup result tagged with the generation and lookup sequence
    /// number it was started with. Returns false when the result was stale
    /// and discarded.
    pub(crate) async fn apply_fetch(
        &self,
        generation: u64,
        fetch: u64,
        outcome: AuthErrorResult<ProfileLookup>,
    ) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.accepts(generation, fetch) {
            debug!(
                "Discarding stale profile fetch {} (generation {}, current {}, applied {})",
                fetch, generation, inner.generation, inner.applied_fetch
            );
            return false;
        }

        let Some(identity) = inner.state.identity().cloned() else {
            return false;
        };

        // Failures never outrank a later answer from an older lookup
        let state = match outcome {
            Ok(lookup) => {
                inner.applied_fetch = fetch;
                AuthState::from_lookup(identity, lookup)
            }
            Err(e) => {
                warn!("Profile fetch for {} failed: {}", identity.id, e);
                AuthState::AuthenticatedNoProfile {
                    identity,
                    status: ProfileStatus::Failed(e.reason()),
                }
            }
        };
        inner.state = state;
        debug!("Auth state now {}", inner.state.label());
        self.publish(&inner);
        true
    }

    fn publish(&self, inner: &ContextInner) {
        self.snapshots.send_replace(inner.snapshot());
    }
}

impl Clone for AuthContext {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            snapshots: Arc::clone(&self.snapshots),
            provider: Arc::clone(&self.provider),
            profiles: Arc::clone(&self.profiles),
            fetch_timeout: self.fetch_timeout,
            shutdown: self.shutdown.clone(),
        }
    }
}
