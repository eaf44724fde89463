//! Button manager: the connection lifecycle to the button service.
//!
//! The manager is an explicit context object owned by the host. The host
//! keeps one per process and drives it with the service-connected and
//! service-disconnected notifications of its binding mechanism.
//!
//! ```text
//! Uninitialized --acquire--> Initializing --connected--> Ready
//!       ^                                                  |
//!       +---------------- service lost / destroy ----------+
//! ```

mod state;

use std::sync::Arc;

use fl_core::broadcast::BroadcastPayload;
use fl_core::credentials::AppCredentials;
use fl_core::ids::ButtonId;
use fl_core::pairing::PairingVerifier;
use fl_core::ports::{
    ButtonServicePort, KnownButtonStorePort, NotificationSink, PairingFlowPort, ServiceBinderPort,
};
use fl_core::ManagerError;
use tracing::{debug, error, info, warn};

use crate::broadcast::{BroadcastDispatcher, BroadcastHandler};
use crate::button::Button;
use crate::connection::ServiceConnection;
use crate::dispatcher::CallbackDispatcher;
use crate::grab::{GrabError, GrabFlow, GrabOutcome};
use crate::registry::ButtonRegistry;

pub use state::LifecycleState;

/// Fired once when the manager reaches `Ready`.
pub type InitializedCallback = Box<dyn FnOnce(&ButtonManager) + Send>;

/// Fired once when the manager falls back to `Uninitialized`. Observers are
/// cleared after firing; acquire again to re-register.
pub type UninitializedCallback = Box<dyn FnOnce(&ButtonManager) + Send>;

pub struct ButtonManager {
    credentials: Arc<AppCredentials>,
    connection: Arc<ServiceConnection>,
    registry: Arc<ButtonRegistry>,
    dispatcher: Arc<CallbackDispatcher>,
    broadcasts: BroadcastDispatcher,
    grab: GrabFlow,
    binder: Arc<dyn ServiceBinderPort>,
    sink: Arc<dyn NotificationSink>,
}

/// Helper for constructing the manager with explicit dependency fields.
pub struct ButtonManagerDeps {
    pub credentials: Arc<AppCredentials>,
    pub binder: Arc<dyn ServiceBinderPort>,
    pub known_buttons: Arc<dyn KnownButtonStorePort>,
    pub pairing_flow: Arc<dyn PairingFlowPort>,
    pub verifier: PairingVerifier,
}

impl ButtonManager {
    pub fn new(deps: ButtonManagerDeps) -> Self {
        let ButtonManagerDeps {
            credentials,
            binder,
            known_buttons,
            pairing_flow,
            verifier,
        } = deps;

        let connection = Arc::new(ServiceConnection::new());
        let registry = Arc::new(ButtonRegistry::new(known_buttons, connection.clone()));
        let dispatcher = Arc::new(CallbackDispatcher::new(registry.clone()));

        Self {
            credentials,
            broadcasts: BroadcastDispatcher::new(registry.clone(), connection.clone()),
            grab: GrabFlow::new(verifier, pairing_flow),
            sink: dispatcher.clone(),
            connection,
            registry,
            dispatcher,
            binder,
        }
    }

    /// Register `sink` with the service instead of the dispatcher, e.g. a
    /// channel that feeds [`ButtonManager::dispatcher`] from its own thread.
    pub fn with_notification_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Set the app credentials. Each field is write-once.
    pub fn set_app_credentials(
        &self,
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        app_name: impl Into<String>,
    ) {
        self.credentials.set(app_id, app_secret, app_name);
    }

    pub fn credentials(&self) -> &AppCredentials {
        &self.credentials
    }

    pub fn dispatcher(&self) -> Arc<CallbackDispatcher> {
        self.dispatcher.clone()
    }

    pub fn state(&self) -> LifecycleState {
        let state = self.connection.lock();
        LifecycleState::from_flags(state.service.is_some(), state.initializing)
    }

    pub fn is_initialized(&self) -> bool {
        self.connection.current().is_some()
    }

    /// Request the manager.
    ///
    /// When `Ready`, `on_initialized` runs before this returns. Otherwise it
    /// is queued and runs once the service connection completes; the first
    /// caller triggers the bind. Fails when credentials are missing or the
    /// service cannot be bound. Neither failure is retried.
    pub fn acquire(
        &self,
        on_initialized: impl FnOnce(&ButtonManager) + Send + 'static,
        on_uninitialized: Option<UninitializedCallback>,
    ) -> Result<(), ManagerError> {
        if !self.credentials.is_complete() {
            return Err(ManagerError::CredentialsMissing);
        }

        let mut run_now: Option<InitializedCallback> = None;
        let start_bind = {
            let mut state = self.connection.lock();
            if let Some(callback) = on_uninitialized {
                state.uninitialized_callbacks.push(callback);
            }
            if state.service.is_none() || state.initializing {
                state.initialized_callbacks.push(Box::new(on_initialized));
            } else {
                run_now = Some(Box::new(on_initialized));
            }
            let start = state.service.is_none() && !state.initializing;
            if start {
                state.initializing = true;
            }
            start
        };

        if start_bind {
            info!("Binding button service");
            if let Err(err) = self.binder.bind() {
                error!(error = %err, "Button service is not available");
                let mut state = self.connection.lock();
                state.initializing = false;
                state.initialized_callbacks.clear();
                state.uninitialized_callbacks.clear();
                return Err(ManagerError::ServiceUnavailable(err.to_string()));
            }
        }

        if let Some(callback) = run_now {
            callback(self);
        }
        Ok(())
    }

    /// The host's binding mechanism connected the service.
    ///
    /// Registers the notification sink, reconciles the registry and flushes
    /// the queued initialization callbacks in order.
    pub fn handle_service_connected(&self, service: Arc<dyn ButtonServicePort>) {
        let Some(credentials) = self.credentials.snapshot() else {
            warn!("Service connected without app credentials; ignoring");
            return;
        };

        match service.register(self.sink.clone(), &credentials) {
            Ok(session) => {
                let mut state = self.connection.lock();
                state.service = Some(service);
                state.session = session;
                info!(session = %session, "Registered with button service");
            }
            Err(err) => {
                error!(error = %err, "Registration with button service failed");
                let observers = {
                    let mut state = self.connection.lock();
                    state.initializing = false;
                    state.initialized_callbacks.clear();
                    std::mem::take(&mut state.uninitialized_callbacks)
                };
                self.fire(observers);
                return;
            }
        }

        if let Err(err) = self.registry.sync_with_service() {
            warn!(error = %err, "Could not reconcile known buttons");
        }

        let callbacks = {
            let mut state = self.connection.lock();
            state.initializing = false;
            std::mem::take(&mut state.initialized_callbacks)
        };
        debug!(count = callbacks.len(), "Flushing initialization callbacks");
        for callback in callbacks {
            callback(self);
        }
    }

    /// The service went away without the app asking for it.
    ///
    /// The registry is kept so it can be reconciled on the next connection.
    pub fn handle_service_disconnected(&self) {
        let observers = {
            let mut state = self.connection.lock();
            state.service = None;
            state.session = Default::default();
            state.initializing = false;
            std::mem::take(&mut state.uninitialized_callbacks)
        };
        warn!("Button service disconnected");
        self.fire(observers);
    }

    /// Unregister from the service and release the binding.
    ///
    /// The registry is kept. Uninitialized observers fire.
    pub fn destroy(&self) {
        let (connected, observers) = {
            let mut state = self.connection.lock();
            let session = std::mem::take(&mut state.session);
            let connected = state.service.take().map(|service| (service, session));
            state.initializing = false;
            state.initialized_callbacks.clear();
            (connected, std::mem::take(&mut state.uninitialized_callbacks))
        };

        if let Some((service, session)) = connected {
            if let Err(err) = service.unregister(session) {
                warn!(error = %err, "Failed to unregister from button service");
            }
        }
        self.grab.discard();
        self.binder.unbind();
        info!("Button manager destroyed");
        self.fire(observers);
    }

    /// Look up a tracked button by address, case-insensitively.
    pub fn button_by_id(&self, raw: &str) -> Option<Button> {
        let id = ButtonId::parse(raw).ok()?;
        self.registry.lookup(&id)
    }

    /// Copy of every tracked button.
    pub fn known_buttons(&self) -> Vec<Button> {
        self.registry.known_buttons()
    }

    /// Dispose of a button; it receives no further callbacks.
    pub fn forget_button(&self, button: &Button) {
        self.registry.forget(button);
    }

    /// Start a grab. A grab already pending is discarded.
    pub fn initiate_grab_button(&self) -> Result<(), GrabError> {
        let credentials = self
            .credentials
            .snapshot()
            .ok_or(GrabError::CredentialsMissing)?;
        self.grab.initiate(credentials, self.connection.session())
    }

    /// Finish a grab with the pairing flow's result.
    ///
    /// Returns the admitted button, or `None` when the result is not ours,
    /// was cancelled, or failed verification. Nothing is admitted on failure.
    pub fn complete_grab_button(&self, request_code: u32, outcome: GrabOutcome) -> Option<Button> {
        match self.grab.complete(request_code, outcome) {
            Ok(Some(id)) => Some(self.registry.admit(id)),
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "Grab failed");
                None
            }
        }
    }

    /// Entry point for broadcast payloads.
    pub fn handle_broadcast(
        &self,
        payload: BroadcastPayload,
        handler: Arc<dyn BroadcastHandler>,
    ) -> Result<(), ManagerError> {
        if !self.credentials.is_complete() {
            handler.request_app_credentials(&self.credentials);
        }
        self.acquire(
            move |manager| manager.broadcasts.deliver(&payload, handler.as_ref()),
            None,
        )
    }

    fn fire(&self, observers: Vec<UninitializedCallback>) {
        for observer in observers {
            observer(self);
        }
    }
}

impl std::fmt::Debug for ButtonManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonManager")
            .field("state", &self.state())
            .field("connection", &self.connection)
            .finish_non_exhaustive()
    }
}
