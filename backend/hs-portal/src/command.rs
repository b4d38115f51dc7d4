use crate::error::{PortalError, Result as PortalErrorResult};

use std::str::FromStr;

pub const HELP: &str = "\
commands:
  go <path>       navigate to a path
  back            return to the previous location
  login <token>   start a session from an access token
  logout          end the session
  refresh         re-read the signed-in user's profile
  whoami          show the session and profile
  help            show this list
  quit            leave the portal";

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Back,
    Login(String),
    Logout,
    Refresh,
    WhoAmI,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = PortalError;

    #[track_caller]
    fn from_str(line: &str) -> PortalErrorResult<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err(PortalError::command("empty command"));
        };
        let argument = parts.next();
        if parts.next().is_some() {
            return Err(PortalError::command(format!(
                "'{}' takes at most one argument",
                verb
            )));
        }

        let command = match (verb.to_lowercase().as_str(), argument) {
            ("go", Some(path)) => Self::Go(path.to_string()),
            ("go", None) => return Err(PortalError::command("usage: go <path>")),
            ("login", Some(token)) => Self::Login(token.to_string()),
            ("login", None) => return Err(PortalError::command("usage: login <token>")),
            ("back", None) => Self::Back,
            ("logout", None) => Self::Logout,
            ("refresh", None) => Self::Refresh,
            ("whoami", None) => Self::WhoAmI,
            ("help", None) => Self::Help,
            ("quit" | "exit", None) => Self::Quit,
            ("back" | "logout" | "refresh" | "whoami" | "help" | "quit" | "exit", Some(_)) => {
                return Err(PortalError::command(format!("'{}' takes no argument", verb)));
            }
            _ => {
                return Err(PortalError::command(format!(
                    "unknown command '{}', try 'help'",
                    verb
                )));
            }
        };

        Ok(command)
    }
}
