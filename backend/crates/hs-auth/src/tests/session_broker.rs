use crate::tests::jwt::{create_test_token, valid_claims};
use crate::tests::{
    MockProfileRepository, MockRevoker, TEST_SECRET, profile, wait_for_snapshot,
};
use crate::{
    AuthContext, AuthError, AuthState, IdentityEvent, IdentityProvider, SessionBroker,
    SessionRevoker, SessionValidator,
};

use std::sync::Arc;
use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, none, ok, some};
use hs_core::Role;
use tokio::time::timeout;

fn broker(revoker: Option<Arc<dyn SessionRevoker>>) -> SessionBroker {
    SessionBroker::new(SessionValidator::with_hs256(TEST_SECRET), revoker)
}

fn token_for(sub: &str) -> String {
    create_test_token(&valid_claims(sub), TEST_SECRET)
}

async fn next_event(rx: &mut tokio::sync::mpsc::UnboundedReceiver<IdentityEvent>) -> IdentityEvent {
    timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for identity event")
        .expect("identity stream closed")
}

#[tokio::test]
async fn given_no_session_when_subscribed_then_signed_out_delivered_first() {
    // Given
    let broker = broker(None);

    // When
    let mut rx = broker.subscribe().await;

    // Then
    let event = next_event(&mut rx).await;
    assert_that!(event, eq(&IdentityEvent::SignedOut));
}

#[tokio::test]
async fn given_valid_token_when_signed_in_then_subscribers_receive_identity() {
    // Given
    let broker = broker(None);
    let mut rx = broker.subscribe().await;
    next_event(&mut rx).await;

    // When
    let result = broker.sign_in(&token_for("patient-1")).await;

    // Then
    assert_that!(result, ok(anything()));
    let event = next_event(&mut rx).await;
    assert_that!(event.identity().map(|i| i.id.as_str()), some(eq("patient-1")));
    let current = broker.current_identity().await;
    assert_that!(current, some(anything()));
}

#[tokio::test]
async fn given_active_session_when_late_subscriber_joins_then_signed_in_delivered_first() {
    // Given
    let broker = broker(None);
    broker.sign_in(&token_for("doc-1")).await.unwrap();

    // When
    let mut rx = broker.subscribe().await;

    // Then
    let event = next_event(&mut rx).await;
    assert!(matches!(event, IdentityEvent::SignedIn(ref identity) if identity.id == "doc-1"));
}

#[tokio::test]
async fn given_invalid_token_when_signed_in_then_error_and_no_session() {
    // Given
    let broker = broker(None);

    // When
    let result = broker.sign_in("not.a.jwt").await;

    // Then
    assert_that!(result, err(anything()));
    let current = broker.current_identity().await;
    assert_that!(current, none());
}

#[tokio::test]
async fn given_active_session_when_expired_then_signed_out_emitted() {
    // Given
    let broker = broker(None);
    broker.sign_in(&token_for("patient-1")).await.unwrap();
    let mut rx = broker.subscribe().await;
    next_event(&mut rx).await;

    // When
    broker.expire().await;

    // Then
    let event = next_event(&mut rx).await;
    assert_that!(event, eq(&IdentityEvent::SignedOut));
    let current = broker.current_identity().await;
    assert_that!(current, none());
}

#[tokio::test]
async fn given_session_past_exp_when_checked_then_expired() {
    // Given
    let broker = broker(None);
    broker.sign_in(&token_for("patient-1")).await.unwrap();
    let now = chrono::Utc::now().timestamp();

    // When / Then
    assert!(!broker.expire_if_due(now).await);
    assert!(broker.expire_if_due(now + 7200).await);
    let current = broker.current_identity().await;
    assert_that!(current, none());
}

#[tokio::test]
async fn given_revoker_when_signed_out_then_token_revoked() {
    // Given
    let revoker = Arc::new(MockRevoker::default());
    let broker = broker(Some(revoker.clone()));
    let token = token_for("patient-1");
    broker.sign_in(&token).await.unwrap();

    // When
    let result = broker.sign_out().await;

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(revoker.revoked(), eq(&vec![token]));
}

#[tokio::test]
async fn given_failing_revoker_when_signed_out_then_sign_out_error_and_session_cleared() {
    // Given
    let broker = broker(Some(MockRevoker::failing()));
    broker.sign_in(&token_for("patient-1")).await.unwrap();
    let mut rx = broker.subscribe().await;
    next_event(&mut rx).await;

    // When
    let result = broker.sign_out().await;

    // Then
    assert!(matches!(result, Err(AuthError::SignOut { .. })));
    let event = next_event(&mut rx).await;
    assert_that!(event, eq(&IdentityEvent::SignedOut));
    let current = broker.current_identity().await;
    assert_that!(current, none());
}

#[tokio::test]
async fn given_channel_failure_when_reported_then_stream_error_emitted() {
    // Given
    let broker = broker(None);
    let mut rx = broker.subscribe().await;
    next_event(&mut rx).await;

    // When
    broker.report_error("token refresh failed").await;

    // Then
    let event = next_event(&mut rx).await;
    assert_that!(
        event,
        eq(&IdentityEvent::StreamError("token refresh failed".to_string()))
    );
}

// =========================================================================
// Broker driving a context
// =========================================================================

#[tokio::test]
async fn given_broker_as_provider_when_token_signed_in_then_context_holds_profile() {
    // Given
    let broker = Arc::new(broker(None));
    let repository = MockProfileRepository::new();
    repository.set_profile(profile("doc-1", Role::Doctor));
    let context = AuthContext::start(broker.clone(), repository.clone(), Duration::from_secs(2)).await;
    wait_for_snapshot(&context, |s| s.state == AuthState::Unauthenticated).await;

    // When
    broker.sign_in(&token_for("doc-1")).await.unwrap();
    wait_for_snapshot(&context, |s| s.state.profile().is_some()).await;

    // Then
    assert_that!(context.current_profile().unwrap().role, eq(Role::Doctor));

    // And sign-out through the context ends the broker session
    context.sign_out().await.unwrap();
    let current = broker.current_identity().await;
    assert_that!(current, none());
    context.shutdown().await;
}
