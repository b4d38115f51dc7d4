use crate::{Decision, GuardError, Result as GuardErrorResult, RouteGuard, normalize_path};

use std::panic::Location;

use error_location::ErrorLocation;
use hs_auth::AuthState;
use log::{debug, warn};

/// Consecutive redirects tolerated while resolving one navigation
pub const MAX_REDIRECTS: usize = 8;

/// Where a navigation ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOutcome {
    /// Location after redirects were followed
    pub path: String,
    /// Final, non-redirect decision for `path`
    pub decision: Decision,
    /// Paths redirected through, in order
    pub redirects: Vec<String>,
}

/// History stack driven by the route guard.
///
/// `navigate` pushes; redirects replace the top entry, so back never lands
/// on a path the guard bounced away from.
pub struct Navigator {
    guard: RouteGuard,
    history: Vec<String>,
}

impl Navigator {
    pub fn new(guard: RouteGuard) -> Self {
        Self {
            guard,
            history: Vec::new(),
        }
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    pub fn current_path(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Push `path` and resolve it against `state`
    pub fn navigate(&mut self, path: &str, state: &AuthState) -> GuardErrorResult<NavigationOutcome> {
        let path = normalize_path(path);
        debug!("Navigate to {}", path);
        self.history.push(path.clone());
        self.resolve(path, state)
    }

    /// Re-run the guard for the current location after the auth state changed
    pub fn reevaluate(&mut self, state: &AuthState) -> GuardErrorResult<Option<NavigationOutcome>> {
        match self.history.last().cloned() {
            Some(current) => self.resolve(current, state).map(Some),
            None => Ok(None),
        }
    }

    /// Pop the current location and resolve the previous one
    pub fn back(&mut self, state: &AuthState) -> GuardErrorResult<Option<NavigationOutcome>> {
        if self.history.len() < 2 {
            return Ok(None);
        }
        self.history.pop();
        self.reevaluate(state)
    }

    /// Follow redirects from `start`, then replace the top history entry
    /// with the final location
    #[track_caller]
    fn resolve(&mut self, start: String, state: &AuthState) -> GuardErrorResult<NavigationOutcome> {
        let mut current = start.clone();
        let mut redirects: Vec<String> = Vec::new();

        let outcome = loop {
            let (_, decision) = self.guard.evaluate(&current, state);
            let Decision::RedirectTo(target) = decision else {
                break NavigationOutcome {
                    path: current,
                    decision,
                    redirects,
                };
            };

            if redirects.len() >= MAX_REDIRECTS || target == start || redirects.contains(&target) {
                warn!(
                    "Redirect loop resolving {} (chain: {} -> {})",
                    start,
                    redirects.join(" -> "),
                    target
                );
                return Err(GuardError::RedirectLoop {
                    path: target,
                    hops: redirects.len() + 1,
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            debug!("Redirect {} -> {}", current, target);
            current = target.clone();
            redirects.push(target);
        };

        if let Some(top) = self.history.last_mut() {
            top.clone_from(&outcome.path);
        }
        Ok(outcome)
    }
}
