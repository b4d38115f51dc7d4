pub(crate) mod error;
pub(crate) mod rest_client;

pub use error::{ClientError, Result};
pub use rest_client::RestClient;
