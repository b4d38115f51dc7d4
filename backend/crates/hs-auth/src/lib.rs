pub mod auth_context;
pub mod auth_state;
pub mod claims;
pub mod error;
pub mod identity_event;
pub mod identity_provider;
pub mod session_broker;
pub mod session_revoker;
pub mod session_validator;
pub mod shutdown_coordinator;
pub mod shutdown_guard;

pub use auth_context::AuthContext;
pub use auth_state::{AuthSnapshot, AuthState, ProfileStatus};
pub use claims::SessionClaims;
pub use error::{AuthError, Result};
pub use identity_event::IdentityEvent;
pub use identity_provider::IdentityProvider;
pub use session_broker::SessionBroker;
pub use session_revoker::SessionRevoker;
pub use session_validator::SessionValidator;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for a single profile lookup.
/// Log entries emitted while the lookup runs carry these fields.
pub fn create_fetch_span(identity_id: &str, generation: u64, trigger: &str) -> tracing::Span {
    info_span!(
        "profile_fetch",
        identity_id = %identity_id,
        generation = generation,
        trigger = %trigger,
    )
}
