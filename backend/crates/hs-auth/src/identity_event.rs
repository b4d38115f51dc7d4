use hs_core::Identity;

/// One notification from the identity service, delivered in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    SignedIn(Identity),
    SignedOut,
    StreamError(String),
}

impl IdentityEvent {
    /// The identity this event leaves signed in, if any
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedIn(identity) => Some(identity),
            Self::SignedOut | Self::StreamError(_) => None,
        }
    }
}
