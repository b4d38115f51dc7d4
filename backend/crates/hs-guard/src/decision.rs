use std::fmt;

/// What the shell should do with a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Auth state not settled yet
    ShowLoader,
    Render,
    /// Replace the current location with this path
    RedirectTo(String),
    /// Profile lookup failed; shown instead of redirecting to signup
    ShowError(String),
}

impl Decision {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::RedirectTo(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowLoader => write!(f, "show loader"),
            Self::Render => write!(f, "render"),
            Self::RedirectTo(path) => write!(f, "redirect to {}", path),
            Self::ShowError(reason) => write!(f, "show error: {}", reason),
        }
    }
}
