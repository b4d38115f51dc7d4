use hs_core::{Identity, Profile, ProfileLookup};

/// Why a signed-in identity has no profile yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileStatus {
    /// Lookup in flight
    Pending,
    /// No record exists for the identity
    NotFound,
    /// A record exists but carries no usable role
    RoleMissing,
    /// The store failed or the lookup timed out
    Failed(String),
}

/// Reconciled identity/profile state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No identity event processed yet
    #[default]
    Initializing,
    Unauthenticated,
    AuthenticatedNoProfile {
        identity: Identity,
        status: ProfileStatus,
    },
    AuthenticatedWithProfile {
        identity: Identity,
        profile: Profile,
    },
}

impl AuthState {
    /// State after a lookup for `identity` concludes
    pub fn from_lookup(identity: Identity, lookup: ProfileLookup) -> Self {
        match lookup {
            ProfileLookup::Found(profile) => Self::AuthenticatedWithProfile { identity, profile },
            ProfileLookup::NotFound => Self::AuthenticatedNoProfile {
                identity,
                status: ProfileStatus::NotFound,
            },
            ProfileLookup::RoleMissing => Self::AuthenticatedNoProfile {
                identity,
                status: ProfileStatus::RoleMissing,
            },
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Initializing | Self::Unauthenticated => None,
            Self::AuthenticatedNoProfile { identity, .. }
            | Self::AuthenticatedWithProfile { identity, .. } => Some(identity),
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::AuthenticatedWithProfile { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Initializing)
    }

    pub fn is_profile_pending(&self) -> bool {
        matches!(
            self,
            Self::AuthenticatedNoProfile {
                status: ProfileStatus::Pending,
                ..
            }
        )
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Unauthenticated => "unauthenticated",
            Self::AuthenticatedNoProfile { status, .. } => match status {
                ProfileStatus::Pending => "authenticated (profile pending)",
                ProfileStatus::NotFound => "authenticated (no profile)",
                ProfileStatus::RoleMissing => "authenticated (profile without role)",
                ProfileStatus::Failed(_) => "authenticated (profile lookup failed)",
            },
            Self::AuthenticatedWithProfile { .. } => "authenticated",
        }
    }
}

/// What readers observe: the state plus bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthSnapshot {
    pub state: AuthState,
    /// Bumped on every identity change and on sign-out
    pub generation: u64,
    /// Text of the most recent identity stream error, cleared by the next
    /// sign-in or sign-out
    pub last_stream_error: Option<String>,
}
