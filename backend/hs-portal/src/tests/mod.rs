
use crate::Portal;

use std::sync::Arc;
use std::time::Duration;

use hs_auth::{AuthSnapshot, SessionBroker, SessionClaims, SessionValidator};
use hs_config::RoutesConfig;
use hs_core::{Profile, ProfileRepository, Role};
use hs_db::{SqliteProfileRepository, create_memory_pool};
use hs_guard::RouteTable;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

pub(crate) const TEST_SECRET: &str = "portal-test-secret-at-least-32-characters";

pub(crate) fn token_for(sub: &str) -> String {
    token_expiring_at(sub, chrono::Utc::now().timestamp() + 3600)
}

/// Token whose `exp` is `exp`; validation tolerates 30s of skew past it
pub(crate) fn token_expiring_at(sub: &str, exp: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: sub.to_string(),
        email: Some(format!("{sub}@example.com")),
        exp,
        iat: now - 60,
        role: None,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Portal over an in-memory store holding one profile per `(id, role)`
pub(crate) async fn test_portal(profiles: &[(&str, Role)]) -> Portal {
    let pool = create_memory_pool().await.unwrap();
    let repository = SqliteProfileRepository::new(pool);
    for (id, role) in profiles {
        let profile = Profile::new(
            id.to_string(),
            format!("{id}@example.com"),
            format!("Test {id}"),
            *role,
        );
        repository.put_profile(&profile).await.unwrap();
    }

    let broker = SessionBroker::new(SessionValidator::with_hs256(TEST_SECRET.as_bytes()), None);
    let routes = RouteTable::from_config(&RoutesConfig::default()).unwrap();

    let portal = Portal::start(
        Arc::new(repository),
        broker,
        routes,
        None,
        Duration::from_secs(5),
    )
    .await;
    wait_for(&portal, |snapshot| !snapshot.state.is_loading()).await;
    portal
}

/// Block until the published snapshot satisfies `condition`
pub(crate) async fn wait_for<F>(portal: &Portal, condition: F) -> AuthSnapshot
where
    F: Fn(&AuthSnapshot) -> bool,
{
    let mut rx = portal.watch();
    let snapshot = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| condition(s)))
        .await
        .expect("timed out waiting for auth state")
        .expect("auth context dropped");
    snapshot.clone()
}
