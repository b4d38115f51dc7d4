use crate::RouteAccess;

/// A requested path together with its access rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    /// Normalized path
    pub path: String,
    pub access: RouteAccess,
}

impl NavigationIntent {
    pub fn new(path: &str, access: RouteAccess) -> Self {
        Self {
            path: normalize_path(path),
            access,
        }
    }
}

/// Strip query string, fragment and trailing slashes; empty becomes "/"
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = raw[..end].trim();
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
