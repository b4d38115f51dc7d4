use crate::{Decision, NavigationIntent, RouteAccess, RouteTable};

use std::sync::Arc;

use hs_auth::{AuthState, ProfileStatus};

/// Decide what to do with a navigation request.
///
/// Pure: the same intent, state and table always give the same decision.
/// Rules are applied in order:
/// 1. auth state unsettled (initializing, profile pending) shows the loader
/// 2. signed out: public paths render, everything else goes to login
/// 3. signed in without a profile: public paths render; otherwise a missing
///    or role-less profile goes to signup and a failed lookup shows an error
/// 4. signed in with a profile: login/signup, paths the role may not see and
///    unknown paths all go to the role's home; the rest render
pub fn decide(routes: &RouteTable, intent: &NavigationIntent, state: &AuthState) -> Decision {
    match state {
        AuthState::Initializing
        | AuthState::AuthenticatedNoProfile {
            status: ProfileStatus::Pending,
            ..
        } => Decision::ShowLoader,

        AuthState::Unauthenticated => match intent.access {
            RouteAccess::Public => Decision::Render,
            RouteAccess::Roles(_) | RouteAccess::Unknown => {
                Decision::RedirectTo(routes.login().to_string())
            }
        },

        AuthState::AuthenticatedNoProfile { status, .. } => match (&intent.access, status) {
            (RouteAccess::Public, _) => Decision::Render,
            (_, ProfileStatus::Failed(reason)) => Decision::ShowError(reason.clone()),
            (_, ProfileStatus::NotFound | ProfileStatus::RoleMissing | ProfileStatus::Pending) => {
                Decision::RedirectTo(routes.signup().to_string())
            }
        },

        AuthState::AuthenticatedWithProfile { profile, .. } => {
            let home = || Decision::RedirectTo(routes.role_home(profile.role).to_string());
            match &intent.access {
                RouteAccess::Public if routes.is_auth_entry(&intent.path) => home(),
                RouteAccess::Public => Decision::Render,
                RouteAccess::Roles(roles) if roles.contains(&profile.role) => Decision::Render,
                RouteAccess::Roles(_) | RouteAccess::Unknown => home(),
            }
        }
    }
}

/// Shared handle pairing a route table with `decide`
#[derive(Debug, Clone)]
pub struct RouteGuard {
    routes: Arc<RouteTable>,
}

impl RouteGuard {
    pub fn new(routes: RouteTable) -> Self {
        Self {
            routes: Arc::new(routes),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn decide(&self, intent: &NavigationIntent, state: &AuthState) -> Decision {
        decide(&self.routes, intent, state)
    }

    /// Classify a raw path and decide
    pub fn evaluate(&self, raw_path: &str, state: &AuthState) -> (NavigationIntent, Decision) {
        let intent = self.routes.intent(raw_path);
        let decision = self.decide(&intent, state);
        (intent, decision)
    }
}
