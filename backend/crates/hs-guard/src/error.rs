use error_location::ErrorLocation;
use hs_core::Role;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Route table has no home route for role '{role}' {location}")]
    MissingRoleHome { role: Role, location: ErrorLocation },

    #[error("Route '{path}' registered twice {location}")]
    DuplicateRoute {
        path: String,
        location: ErrorLocation,
    },

    #[error("Invalid route '{path}': {message} {location}")]
    InvalidRoute {
        path: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Redirect loop at '{path}' after {hops} redirects {location}")]
    RedirectLoop {
        path: String,
        hops: usize,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, GuardError>;
