use crate::command::{Command, HELP};
use crate::error::{PortalError, Result as PortalErrorResult};

use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use error_location::ErrorLocation;
use hs_auth::{AuthContext, AuthSnapshot, SessionBroker, SessionRevoker, SessionValidator};
use hs_client::{RestClient, RestProfileRepository};
use hs_config::{BackendKind, Config};
use hs_core::ProfileRepository;
use hs_db::{SqliteProfileRepository, create_pool};
use hs_guard::{NavigationOutcome, Navigator, RouteGuard, RouteTable};
use log::{info, warn};
use tokio::sync::watch;

/// Result of one shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Navigated(NavigationOutcome),
    Message(String),
    Quit,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigated(outcome) => write!(f, "{}", render_outcome(outcome)),
            Self::Message(message) => write!(f, "{}", message),
            Self::Quit => write!(f, "bye"),
        }
    }
}

/// `/login: render [redirected: /login]`
pub fn render_outcome(outcome: &NavigationOutcome) -> String {
    if outcome.redirects.is_empty() {
        format!("{}: {}", outcome.path, outcome.decision)
    } else {
        format!(
            "{}: {} [redirected: {}]",
            outcome.path,
            outcome.decision,
            outcome.redirects.join(" -> ")
        )
    }
}

/// The running portal: session source, auth context and navigator
pub struct Portal {
    context: AuthContext,
    broker: SessionBroker,
    navigator: Navigator,
    rest: Option<Arc<RestClient>>,
    last_outcome: Option<NavigationOutcome>,
}

impl Portal {
    /// Wire the configured backend, session validation and route table
    pub async fn build(config: &Config) -> PortalErrorResult<Self> {
        let validator = session_validator(config)?;

        let (profiles, rest): (Arc<dyn ProfileRepository>, Option<Arc<RestClient>>) =
            match config.backend.kind {
                BackendKind::Sqlite => {
                    let pool = create_pool(&config.database_path()).await?;
                    (Arc::new(SqliteProfileRepository::new(pool)), None)
                }
                BackendKind::Rest => {
                    let client = Arc::new(RestClient::from_config(&config.backend)?);
                    (
                        Arc::new(RestProfileRepository::new(Arc::clone(&client))),
                        Some(client),
                    )
                }
            };

        let revoker = rest
            .as_ref()
            .map(|client| Arc::clone(client) as Arc<dyn SessionRevoker>);
        let broker = SessionBroker::new(validator, revoker);
        let routes = RouteTable::from_config(&config.routes)?;

        Ok(Self::start(
            profiles,
            broker,
            routes,
            rest,
            config.auth.profile_fetch_timeout(),
        )
        .await)
    }

    /// Start the auth context over an already-built store and broker
    pub async fn start(
        profiles: Arc<dyn ProfileRepository>,
        broker: SessionBroker,
        routes: RouteTable,
        rest: Option<Arc<RestClient>>,
        fetch_timeout: Duration,
    ) -> Self {
        let context = AuthContext::start(Arc::new(broker.clone()), profiles, fetch_timeout).await;
        info!("Portal ready with {} routes", routes.len());

        Self {
            context,
            broker,
            navigator: Navigator::new(RouteGuard::new(routes)),
            rest,
            last_outcome: None,
        }
    }

    pub fn context(&self) -> &AuthContext {
        &self.context
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Receiver that fires whenever the auth state changes
    pub fn watch(&self) -> watch::Receiver<AuthSnapshot> {
        self.context.watch()
    }

    pub async fn execute(&mut self, command: Command) -> PortalErrorResult<Reply> {
        if self.broker.expire_if_due(Utc::now().timestamp()).await {
            self.set_rest_token(None).await;
        }

        match command {
            Command::Go(path) => {
                let state = self.context.snapshot().state;
                let outcome = self.navigator.navigate(&path, &state)?;
                Ok(self.record(outcome))
            }
            Command::Back => {
                let state = self.context.snapshot().state;
                match self.navigator.back(&state)? {
                    Some(outcome) => Ok(self.record(outcome)),
                    None => Ok(Reply::Message("no earlier location".to_string())),
                }
            }
            Command::Login(token) => {
                // The profile fetch starts as soon as the broker emits, so
                // the store must already carry the new token
                let previous = self.set_rest_token(Some(token.clone())).await;
                match self.broker.sign_in(&token).await {
                    Ok(identity) => Ok(Reply::Message(format!("signed in as {}", identity))),
                    Err(e) => {
                        self.set_rest_token(previous).await;
                        Err(e.into())
                    }
                }
            }
            Command::Logout => {
                self.set_rest_token(None).await;
                self.sign_out().await
            }
            Command::Refresh => match self.context.refresh_profile().await? {
                Some(profile) => Ok(Reply::Message(format!(
                    "profile refreshed: {} ({})",
                    profile.full_name, profile.role
                ))),
                None => Ok(Reply::Message("no profile".to_string())),
            },
            Command::WhoAmI => Ok(Reply::Message(describe(&self.context.snapshot()))),
            Command::Help => Ok(Reply::Message(HELP.to_string())),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    /// Re-run the guard for the current location after the auth state moved.
    /// Returns the outcome only when it differs from the last one shown.
    pub fn on_state_change(&mut self) -> PortalErrorResult<Option<NavigationOutcome>> {
        let state = self.context.snapshot().state;
        let Some(outcome) = self.navigator.reevaluate(&state)? else {
            return Ok(None);
        };
        if self.last_outcome.as_ref() == Some(&outcome) {
            return Ok(None);
        }
        self.last_outcome = Some(outcome.clone());
        Ok(Some(outcome))
    }

    pub async fn shutdown(&self) {
        self.context.shutdown().await;
    }

    async fn sign_out(&self) -> PortalErrorResult<Reply> {
        match self.context.sign_out().await {
            Ok(()) => Ok(Reply::Message("signed out".to_string())),
            Err(e) => {
                warn!("Sign-out was not confirmed by the identity service: {}", e);
                Ok(Reply::Message(format!(
                    "signed out locally; identity service reported: {}",
                    e.reason()
                )))
            }
        }
    }

    /// Point the REST store at a session token; no-op for the sqlite store
    async fn set_rest_token(&self, token: Option<String>) -> Option<String> {
        match &self.rest {
            Some(client) => client.replace_access_token(token).await,
            None => None,
        }
    }

    fn record(&mut self, outcome: NavigationOutcome) -> Reply {
        self.last_outcome = Some(outcome.clone());
        Reply::Navigated(outcome)
    }
}

/// HS256 with the shared secret, else RS256 with the configured public key
fn session_validator(config: &Config) -> PortalErrorResult<SessionValidator> {
    if let Some(secret) = &config.auth.jwt_secret {
        info!("Session tokens: HS256");
        return Ok(SessionValidator::with_hs256(secret.as_bytes()));
    }

    let Some(key_path) = config.jwt_public_key_path() else {
        return Err(PortalError::MissingSigningKey {
            location: ErrorLocation::from(Location::caller()),
        });
    };
    let public_key = std::fs::read_to_string(&key_path).map_err(|e| PortalError::JwtKeyFile {
        path: key_path.display().to_string(),
        source: e,
    })?;
    info!("Session tokens: RS256");
    Ok(SessionValidator::with_rs256(&public_key)?)
}

fn describe(snapshot: &AuthSnapshot) -> String {
    let mut lines = vec![format!(
        "state: {} (generation {})",
        snapshot.state.label(),
        snapshot.generation
    )];
    if let Some(identity) = snapshot.state.identity() {
        lines.push(format!("identity: {}", identity));
    }
    if let Some(profile) = snapshot.state.profile() {
        lines.push(format!("profile: {} ({})", profile.full_name, profile.role));
    }
    if let Some(error) = &snapshot.last_stream_error {
        lines.push(format!("last identity error: {}", error));
    }
    lines.join("\n")
}
