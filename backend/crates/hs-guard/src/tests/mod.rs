
use crate::{RouteGuard, RouteTable};

use hs_auth::{AuthState, ProfileStatus};
use hs_config::RoutesConfig;
use hs_core::{Identity, Profile, Role};

pub(crate) fn portal_routes() -> RouteTable {
    RouteTable::from_config(&RoutesConfig::default()).unwrap()
}

pub(crate) fn portal_guard() -> RouteGuard {
    RouteGuard::new(portal_routes())
}

pub(crate) fn identity() -> Identity {
    Identity::new("user-1", Some("user-1@example.com".to_string()))
}

pub(crate) fn signed_in_as(role: Role) -> AuthState {
    AuthState::AuthenticatedWithProfile {
        identity: identity(),
        profile: Profile::new(
            "user-1".to_string(),
            "user-1@example.com".to_string(),
            "Test User".to_string(),
            role,
        ),
    }
}

pub(crate) fn without_profile(status: ProfileStatus) -> AuthState {
    AuthState::AuthenticatedNoProfile {
        identity: identity(),
        status,
    }
}
