//! Hand-written fakes for the button service collaborators.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once, OnceLock};

use fl_app::{ButtonManager, ButtonManagerDeps, GrabOutcome};
use fl_core::broadcast::BroadcastPayload;
use fl_core::button::{ConnectionStatus, EventMask};
use fl_core::credentials::{AppCredentials, AppCredentialsSnapshot};
use fl_core::ids::{ButtonId, ServiceSessionId};
use fl_core::notification::ServiceNotification;
use fl_core::pairing::{GrabResponse, ManufacturerKey, PairingVerifier};
use fl_core::ports::{
    ButtonServicePort, GrabRequest, KnownButtonStoreError, KnownButtonStorePort,
    NotificationSink, PairingFlowError, PairingFlowPort, RemoteError, ServiceBinderPort,
};
use rand::rngs::OsRng;
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use x25519_dalek::{PublicKey, StaticSecret};

pub const SESSION: ServiceSessionId = ServiceSessionId::new(42);

static TRACE_INIT: Once = Once::new();

/// Route library logs to the test writer; set `RUST_LOG` to see them.
pub fn init_tracing() {
    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Button service fake. Records every call as a readable string.
#[derive(Default)]
pub struct FakeButtonService {
    pub calls: Mutex<Vec<String>>,
    pub live: Mutex<Vec<String>>,
    pub sink: Mutex<Option<Arc<dyn NotificationSink>>>,
    pub registered_app_id: Mutex<Option<String>>,
    pub fail_register: AtomicBool,
    pub fail_mask: AtomicBool,
    pub fail_listen: AtomicBool,
    pub reject_payloads: AtomicBool,
}

impl FakeButtonService {
    pub fn with_live(live: &[&str]) -> Arc<Self> {
        let service = Self::default();
        *service.live.lock().unwrap() = live.iter().map(|s| s.to_string()).collect();
        Arc::new(service)
    }

    pub fn push(&self, notification: ServiceNotification) {
        let sink = self.sink.lock().unwrap().clone().expect("no sink registered");
        sink.deliver(notification);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ButtonServicePort for FakeButtonService {
    fn register(
        &self,
        sink: Arc<dyn NotificationSink>,
        credentials: &AppCredentialsSnapshot,
    ) -> Result<ServiceSessionId, RemoteError> {
        self.record("register".into());
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(RemoteError::unavailable("register refused"));
        }
        *self.sink.lock().unwrap() = Some(sink);
        *self.registered_app_id.lock().unwrap() = Some(credentials.app_id.clone());
        Ok(SESSION)
    }

    fn unregister(&self, session: ServiceSessionId) -> Result<(), RemoteError> {
        self.record(format!("unregister {session}"));
        Ok(())
    }

    fn list_buttons(&self, _session: ServiceSessionId) -> Result<Vec<String>, RemoteError> {
        Ok(self.live.lock().unwrap().clone())
    }

    fn set_button_callbacks(
        &self,
        _session: ServiceSessionId,
        button: &ButtonId,
        mask: EventMask,
    ) -> Result<(), RemoteError> {
        self.record(format!("mask {button} {}", mask.bits()));
        if self.fail_mask.load(Ordering::SeqCst) {
            return Err(RemoteError::unavailable("mask rejected"));
        }
        Ok(())
    }

    fn register_listen_for_broadcast(
        &self,
        _session: ServiceSessionId,
        button: &ButtonId,
        mask: EventMask,
    ) -> Result<(), RemoteError> {
        self.record(format!("broadcast {button} {}", mask.bits()));
        Ok(())
    }

    fn listen_for_connection_callbacks(
        &self,
        _session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<(), RemoteError> {
        self.record(format!("listen {button}"));
        if self.fail_listen.load(Ordering::SeqCst) {
            return Err(RemoteError::unavailable("listen rejected"));
        }
        Ok(())
    }

    fn unlisten_for_connection_callbacks(
        &self,
        _session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<(), RemoteError> {
        self.record(format!("unlisten {button}"));
        Ok(())
    }

    fn connection_status(
        &self,
        _session: ServiceSessionId,
        _button: &ButtonId,
    ) -> Result<ConnectionStatus, RemoteError> {
        Ok(ConnectionStatus::ConnectionCompleted)
    }

    fn name(
        &self,
        _session: ServiceSessionId,
        _button: &ButtonId,
    ) -> Result<Option<String>, RemoteError> {
        Ok(Some("Kitchen".into()))
    }

    fn color(
        &self,
        _session: ServiceSessionId,
        _button: &ButtonId,
    ) -> Result<Option<String>, RemoteError> {
        Err(RemoteError::unavailable("color lookup failed"))
    }

    fn read_remote_rssi(
        &self,
        _session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<bool, RemoteError> {
        self.record(format!("rssi {button}"));
        Ok(true)
    }

    fn set_active_mode(
        &self,
        _session: ServiceSessionId,
        button: &ButtonId,
        active: bool,
    ) -> Result<(), RemoteError> {
        self.record(format!("active {button} {active}"));
        Ok(())
    }

    fn grab_exclusivity(
        &self,
        _session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<(), RemoteError> {
        self.record(format!("grab {button}"));
        Ok(())
    }

    fn release_exclusivity(
        &self,
        _session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<(), RemoteError> {
        self.record(format!("release {button}"));
        Ok(())
    }

    fn remove_button(
        &self,
        _session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<(), RemoteError> {
        self.record(format!("remove {button}"));
        Ok(())
    }

    fn validate_payload(
        &self,
        _session: ServiceSessionId,
        _payload: &BroadcastPayload,
    ) -> Result<bool, RemoteError> {
        Ok(!self.reject_payloads.load(Ordering::SeqCst))
    }
}

#[derive(Default)]
pub struct FakeBinder {
    pub binds: AtomicUsize,
    pub unbinds: AtomicUsize,
    pub unavailable: AtomicBool,
}

impl ServiceBinderPort for FakeBinder {
    fn bind(&self) -> Result<(), RemoteError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RemoteError::unavailable("service not installed"));
        }
        self.binds.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn unbind(&self) {
        self.unbinds.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub ids: Mutex<BTreeSet<ButtonId>>,
    pub adds: AtomicUsize,
}

impl MemoryStore {
    pub fn with(ids: &[&str]) -> Arc<Self> {
        let store = Self::default();
        store
            .ids
            .lock()
            .unwrap()
            .extend(ids.iter().map(|raw| ButtonId::parse(raw).unwrap()));
        Arc::new(store)
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.ids
            .lock()
            .unwrap()
            .contains(&ButtonId::parse(raw).unwrap())
    }
}

impl KnownButtonStorePort for MemoryStore {
    fn list_all(&self) -> Result<Vec<ButtonId>, KnownButtonStoreError> {
        Ok(self.ids.lock().unwrap().iter().cloned().collect())
    }

    fn add(&self, id: &ButtonId) -> Result<(), KnownButtonStoreError> {
        self.adds.fetch_add(1, Ordering::SeqCst);
        self.ids.lock().unwrap().insert(id.clone());
        Ok(())
    }

    fn remove(&self, id: &ButtonId) -> Result<(), KnownButtonStoreError> {
        self.ids.lock().unwrap().remove(id);
        Ok(())
    }
}

/// Captures the requests handed to the pairing UI.
#[derive(Default)]
pub struct RecordingFlow {
    pub requests: Mutex<Vec<GrabRequest>>,
}

impl RecordingFlow {
    pub fn last_public_key(&self) -> [u8; 32] {
        self.requests
            .lock()
            .unwrap()
            .last()
            .expect("no grab launched")
            .public_key
    }
}

impl PairingFlowPort for RecordingFlow {
    fn launch(&self, request: GrabRequest) -> Result<(), PairingFlowError> {
        self.requests.lock().unwrap().push(request);
        Ok(())
    }
}

fn manufacturer() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut OsRng, 1024).unwrap())
}

pub fn test_verifier() -> PairingVerifier {
    PairingVerifier::new(ManufacturerKey::from_public_key(RsaPublicKey::from(
        manufacturer(),
    )))
}

/// A genuine button answering a grab for `app_public_key`.
pub fn genuine_grab(mac: &str, app_public_key: [u8; 32]) -> GrabOutcome {
    let uuid = "0f1e2d3c4b5a69788796a5b4c3d2e1f0";
    let secret = StaticSecret::random_from_rng(OsRng);
    let public = PublicKey::from(&secret);
    let shared = secret.diffie_hellman(&PublicKey::from(app_public_key));
    let digest = Sha256::digest(shared.as_bytes());

    let mut signed = public.as_bytes().to_vec();
    signed.extend_from_slice(mac.to_lowercase().as_bytes());
    signed.extend_from_slice(&hex::decode(uuid).unwrap());
    let signature = SigningKey::<Sha256>::new(manufacturer().clone())
        .sign(&signed)
        .to_vec();

    GrabOutcome::Completed(GrabResponse {
        mac: mac.to_string(),
        button_uuid: uuid.to_string(),
        public_key: Some(public.as_bytes().to_vec()),
        signature: Some(signature),
        proof: Some(digest[1..14].to_vec()),
    })
}

pub struct Harness {
    pub manager: ButtonManager,
    pub binder: Arc<FakeBinder>,
    pub store: Arc<MemoryStore>,
    pub flow: Arc<RecordingFlow>,
}

pub fn harness(store: Arc<MemoryStore>) -> Harness {
    init_tracing();
    let binder = Arc::new(FakeBinder::default());
    let flow = Arc::new(RecordingFlow::default());
    let manager = ButtonManager::new(ButtonManagerDeps {
        credentials: Arc::new(AppCredentials::new()),
        binder: binder.clone(),
        known_buttons: store.clone(),
        pairing_flow: flow.clone(),
        verifier: test_verifier(),
    });
    Harness {
        manager,
        binder,
        store,
        flow,
    }
}

/// Harness with credentials set and the service connected.
pub fn ready_harness(store: Arc<MemoryStore>, service: &Arc<FakeButtonService>) -> Harness {
    let harness = harness(store);
    harness.manager.set_app_credentials("app-id", "app-secret", "Test App");
    harness.manager.acquire(|_| {}, None).unwrap();
    harness.manager.handle_service_connected(service.clone());
    harness
}
