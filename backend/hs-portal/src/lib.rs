pub mod cli;
pub mod command;
pub mod error;
pub mod logger;
pub mod portal;
pub mod shell;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use command::Command;
pub use error::{PortalError, Result};
pub use portal::{Portal, Reply, render_outcome};
