use std::collections::BTreeSet;

use hs_core::Role;

/// Access rule attached to a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable without signing in
    Public,
    /// Reachable only by profiles holding one of these roles (never empty)
    Roles(BTreeSet<Role>),
    /// Path not in the route table
    Unknown,
}

impl RouteAccess {
    pub fn roles(roles: &[Role]) -> Self {
        Self::Roles(roles.iter().copied().collect())
    }

    pub fn permits(&self, role: Role) -> bool {
        match self {
            Self::Public => true,
            Self::Roles(roles) => roles.contains(&role),
            Self::Unknown => false,
        }
    }
}
