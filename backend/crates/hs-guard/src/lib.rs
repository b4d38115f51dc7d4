pub mod decision;
pub mod error;
pub mod navigation_intent;
pub mod navigator;
pub mod route_access;
pub mod route_guard;
pub mod route_table;

pub use decision::Decision;
pub use error::{GuardError, Result};
pub use navigation_intent::{NavigationIntent, normalize_path};
pub use navigator::{MAX_REDIRECTS, NavigationOutcome, Navigator};
pub use route_access::RouteAccess;
pub use route_guard::{RouteGuard, decide};
pub use route_table::{RouteTable, RouteTableBuilder};

#[cfg(test)]
mod tests;
