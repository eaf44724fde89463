//! Connection handle to the button service.
//!
//! One lock guards the service handle, the session id, the initializing flag
//! and both lifecycle callback lists. Remote calls never run under it: the
//! handle is cloned out first, so a service that pushes notifications from
//! inside a call cannot deadlock against the lifecycle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fl_core::ids::ServiceSessionId;
use fl_core::ports::{ButtonServicePort, RemoteError};

use crate::manager::{InitializedCallback, UninitializedCallback};

#[derive(Default)]
pub(crate) struct ConnectionState {
    pub service: Option<Arc<dyn ButtonServicePort>>,
    pub session: ServiceSessionId,
    pub initializing: bool,
    pub initialized_callbacks: Vec<InitializedCallback>,
    pub uninitialized_callbacks: Vec<UninitializedCallback>,
}

#[derive(Default)]
pub struct ServiceConnection {
    state: Mutex<ConnectionState>,
}

impl ServiceConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, ConnectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The bound service and its session, if connected.
    pub fn current(&self) -> Option<(Arc<dyn ButtonServicePort>, ServiceSessionId)> {
        let state = self.lock();
        state.service.clone().map(|service| (service, state.session))
    }

    pub fn session(&self) -> ServiceSessionId {
        self.lock().session
    }

    /// Run one remote call, failing with `Unavailable` when not connected.
    pub fn call<T>(
        &self,
        f: impl FnOnce(&dyn ButtonServicePort, ServiceSessionId) -> Result<T, RemoteError>,
    ) -> Result<T, RemoteError> {
        let (service, session) = self
            .current()
            .ok_or_else(|| RemoteError::unavailable("not connected to the button service"))?;
        f(service.as_ref(), session)
    }
}

impl std::fmt::Debug for ServiceConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ServiceConnection")
            .field("connected", &state.service.is_some())
            .field("session", &state.session)
            .field("initializing", &state.initializing)
            .finish()
    }
}
