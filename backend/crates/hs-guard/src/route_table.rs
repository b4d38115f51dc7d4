use crate::{GuardError, NavigationIntent, Result as GuardErrorResult, RouteAccess, normalize_path};

use std::collections::HashMap;
use std::panic::Location;

use error_location::ErrorLocation;
use hs_config::RoutesConfig;
use hs_core::Role;
use log::debug;

pub const PATIENT_AI_DIAGNOSIS_PATH: &str = "/patient/ai-diagnosis";
pub const PATIENT_BOOK_APPOINTMENT_PATH: &str = "/patient/book-appointment";
pub const DOCTOR_COMPLETE_PROFILE_PATH: &str = "/doctor/complete-profile";

/// Path -> access rule map plus the well-known destinations the guard
/// redirects to. Every role is guaranteed a home route.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, RouteAccess>,
    login: String,
    signup: String,
    role_homes: HashMap<Role, String>,
}

impl RouteTable {
    pub fn builder(login: &str, signup: &str) -> RouteTableBuilder {
        RouteTableBuilder {
            login: normalize_path(login),
            signup: normalize_path(signup),
            routes: Vec::new(),
            role_homes: HashMap::new(),
        }
    }

    /// The portal's route table with paths taken from configuration
    pub fn from_config(config: &RoutesConfig) -> GuardErrorResult<Self> {
        Self::builder(&config.login, &config.signup)
            .public(&config.home)
            .role_home(Role::Patient, &config.patient_home)
            .gated(PATIENT_AI_DIAGNOSIS_PATH, &[Role::Patient])
            .gated(PATIENT_BOOK_APPOINTMENT_PATH, &[Role::Patient])
            .role_home(Role::Doctor, &config.doctor_home)
            .gated(DOCTOR_COMPLETE_PROFILE_PATH, &[Role::Doctor])
            .role_home(Role::Admin, &config.admin_home)
            .build()
    }

    /// Classify a raw path
    pub fn intent(&self, raw_path: &str) -> NavigationIntent {
        let path = normalize_path(raw_path);
        let access = self
            .routes
            .get(&path)
            .cloned()
            .unwrap_or(RouteAccess::Unknown);
        NavigationIntent { path, access }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn signup(&self) -> &str {
        &self.signup
    }

    /// Landing route for a role
    pub fn role_home(&self, role: Role) -> &str {
        // `build` guarantees an entry for every role
        self.role_homes
            .get(&role)
            .map(String::as_str)
            .unwrap_or(&self.login)
    }

    /// Login and signup are the forms signed-in users get bounced away from
    pub fn is_auth_entry(&self, path: &str) -> bool {
        path == self.login || path == self.signup
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

pub struct RouteTableBuilder {
    login: String,
    signup: String,
    routes: Vec<(String, RouteAccess)>,
    role_homes: HashMap<Role, String>,
}

impl RouteTableBuilder {
    pub fn public(mut self, path: &str) -> Self {
        self.routes.push((normalize_path(path), RouteAccess::Public));
        self
    }

    pub fn gated(mut self, path: &str, roles: &[Role]) -> Self {
        self.routes
            .push((normalize_path(path), RouteAccess::roles(roles)));
        self
    }

    /// Register a role's landing route, gated to that role
    pub fn role_home(mut self, role: Role, path: &str) -> Self {
        let path = normalize_path(path);
        self.routes.push((path.clone(), RouteAccess::roles(&[role])));
        self.role_homes.insert(role, path);
        self
    }

    /// Validate and freeze the table
    #[track_caller]
    pub fn build(self) -> GuardErrorResult<RouteTable> {
        let mut routes = HashMap::new();
        let entries = [
            (self.login.clone(), RouteAccess::Public),
            (self.signup.clone(), RouteAccess::Public),
        ];

        for (path, access) in entries.into_iter().chain(self.routes) {
            if let RouteAccess::Roles(roles) = &access
                && roles.is_empty()
            {
                return Err(GuardError::InvalidRoute {
                    path,
                    message: "role-gated route needs at least one role".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            if routes.contains_key(&path) {
                return Err(GuardError::DuplicateRoute {
                    path,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            routes.insert(path, access);
        }

        for role in Role::ALL {
            if !self.role_homes.contains_key(&role) {
                return Err(GuardError::MissingRoleHome {
                    role,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        debug!("Route table built with {} routes", routes.len());

        Ok(RouteTable {
            routes,
            login: self.login,
            signup: self.signup,
            role_homes: self.role_homes,
        })
    }
}
