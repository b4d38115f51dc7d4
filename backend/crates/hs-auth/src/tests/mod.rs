mod session_broker;

use crate::{AuthContext, AuthError, AuthSnapshot, IdentityEvent, IdentityProvider, SessionRevoker};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use hs_core::{
    CoreError, DoctorDetails, PatientDetails, Profile, ProfileLookup, ProfileRepository, Role,
};
use tokio::sync::{Notify, mpsc};
use tokio::time::timeout;

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

pub(crate) fn profile(id: &str, role: Role) -> Profile {
    Profile::new(
        id.to_string(),
        format!("{id}@example.com"),
        "Test User".to_string(),
        role,
    )
}

// =========================================================================
// Profile store double
// =========================================================================

#[derive(Default)]
pub(crate) struct MockProfileRepository {
    lookups: Mutex<HashMap<String, ProfileLookup>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl MockProfileRepository {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn set_lookup(&self, id: &str, lookup: ProfileLookup) {
        self.lookups.lock().unwrap().insert(id.to_string(), lookup);
    }

    pub(crate) fn set_profile(&self, profile: Profile) {
        let id = profile.id.clone();
        self.set_lookup(&id, ProfileLookup::Found(profile));
    }

    /// Block lookups for `id` until the returned gate is notified
    pub(crate) fn gate(&self, id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(id.to_string(), Arc::clone(&gate));
        gate
    }

    /// Let later lookups for `id` through; calls already waiting stay blocked
    pub(crate) fn ungate(&self, id: &str) {
        self.gates.lock().unwrap().remove(id);
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn get_profile(&self, id: &str) -> hs_core::Result<ProfileLookup> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        // The row is read when the call arrives; the gate only delays the reply
        let result = if self.failing.load(Ordering::SeqCst) {
            Err(CoreError::store("mock", "backend unreachable"))
        } else {
            let lookup = self.lookups.lock().unwrap().get(id).cloned();
            Ok(lookup.unwrap_or(ProfileLookup::NotFound))
        };

        let gate = self.gates.lock().unwrap().get(id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }

    async fn put_profile(&self, profile: &Profile) -> hs_core::Result<()> {
        self.set_profile(profile.clone());
        Ok(())
    }

    async fn count_by_role(&self) -> hs_core::Result<HashMap<Role, u64>> {
        Ok(HashMap::new())
    }

    async fn list_by_role(&self, _role: Role) -> hs_core::Result<Vec<Profile>> {
        Ok(Vec::new())
    }

    async fn get_doctor_details(&self, _user_id: &str) -> hs_core::Result<Option<DoctorDetails>> {
        Ok(None)
    }

    async fn put_doctor_details(&self, _details: &DoctorDetails) -> hs_core::Result<()> {
        Ok(())
    }

    async fn get_patient_details(&self, _user_id: &str) -> hs_core::Result<Option<PatientDetails>> {
        Ok(None)
    }

    async fn put_patient_details(&self, _details: &PatientDetails) -> hs_core::Result<()> {
        Ok(())
    }
}

// =========================================================================
// Identity stream double
// =========================================================================

pub(crate) struct ScriptedProvider {
    sender: Mutex<Option<mpsc::UnboundedSender<IdentityEvent>>>,
    receiver: Mutex<Option<mpsc::UnboundedReceiver<IdentityEvent>>>,
    subscriptions: AtomicUsize,
    sign_out_calls: AtomicUsize,
    sign_out_error: Mutex<Option<String>>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            sender: Mutex::new(Some(tx)),
            receiver: Mutex::new(Some(rx)),
            subscriptions: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
            sign_out_error: Mutex::new(None),
        })
    }

    pub(crate) fn emit(&self, event: IdentityEvent) {
        if let Some(sender) = self.sender.lock().unwrap().as_ref() {
            let _ = sender.send(event);
        }
    }

    /// Drop the sending half so the subscriber sees the stream end
    pub(crate) fn close(&self) {
        self.sender.lock().unwrap().take();
    }

    pub(crate) fn reject_sign_out(&self, message: &str) {
        *self.sign_out_error.lock().unwrap() = Some(message.to_string());
    }

    pub(crate) fn subscriptions(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }

    pub(crate) fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn subscribe(&self) -> mpsc::UnboundedReceiver<IdentityEvent> {
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        let receiver = self.receiver.lock().unwrap().take();
        receiver.unwrap_or_else(|| mpsc::unbounded_channel().1)
    }

    async fn sign_out(&self) -> crate::Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        let error = self.sign_out_error.lock().unwrap().clone();
        match error {
            Some(message) => Err(AuthError::SignOut {
                message,
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(()),
        }
    }
}

// =========================================================================
// Token revocation double
// =========================================================================

#[derive(Default)]
pub(crate) struct MockRevoker {
    failing: AtomicBool,
    revoked: Mutex<Vec<String>>,
}

impl MockRevoker {
    pub(crate) fn failing() -> Arc<Self> {
        let revoker = Self::default();
        revoker.failing.store(true, Ordering::SeqCst);
        Arc::new(revoker)
    }

    pub(crate) fn revoked(&self) -> Vec<String> {
        self.revoked.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionRevoker for MockRevoker {
    async fn revoke(&self, access_token: &str) -> hs_core::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::store("mock", "logout endpoint returned 503"));
        }
        self.revoked.lock().unwrap().push(access_token.to_string());
        Ok(())
    }
}

// =========================================================================
// Helpers
// =========================================================================

pub(crate) async fn start_context(
    provider: &Arc<ScriptedProvider>,
    repository: &Arc<MockProfileRepository>,
) -> AuthContext {
    start_context_with_timeout(provider, repository, Duration::from_secs(2)).await
}

pub(crate) async fn start_context_with_timeout(
    provider: &Arc<ScriptedProvider>,
    repository: &Arc<MockProfileRepository>,
    fetch_timeout: Duration,
) -> AuthContext {
    AuthContext::start(provider.clone(), repository.clone(), fetch_timeout).await
}

/// Wait until a published snapshot satisfies `predicate`
pub(crate) async fn wait_for_snapshot<F>(context: &AuthContext, predicate: F) -> AuthSnapshot
where
    F: Fn(&AuthSnapshot) -> bool,
{
    let mut rx = context.watch();
    let snapshot = timeout(Duration::from_secs(2), rx.wait_for(|s| predicate(s)))
        .await
        .expect("timed out waiting for auth state")
        .expect("snapshot channel closed");
    AuthSnapshot::clone(&snapshot)
}

/// Poll `condition` until it holds
pub(crate) async fn wait_until<F>(condition: F)
where
    F: Fn() -> bool,
{
    timeout(Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("timed out waiting for condition");
}
