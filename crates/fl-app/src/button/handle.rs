use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fl_core::button::{ConnectionStatus, EventMask};
use fl_core::ids::{ButtonId, ServiceSessionId};
use fl_core::ports::{ButtonServicePort, RemoteError};
use fl_core::ButtonError;
use tracing::debug;

use super::ButtonCallback;
use crate::connection::ServiceConnection;

/// Handle to one paired button.
///
/// Cloning is cheap and every clone refers to the same button; equality is
/// identity of the underlying button, not of its address.
///
/// Once the button is forgotten every operation except [`Button::id`] and
/// [`Button::callback_flags`] fails with [`ButtonError::Forgotten`].
/// Remote failures never surface as errors: state-changing calls report
/// `false` and queries fall back to a safe default.
#[derive(Clone)]
pub struct Button {
    inner: Arc<ButtonInner>,
}

struct ButtonInner {
    id: ButtonId,
    callbacks: Mutex<Vec<Arc<dyn ButtonCallback>>>,
    mask: AtomicU32,
    forgotten: AtomicBool,
    connection: Arc<ServiceConnection>,
}

impl Button {
    pub(crate) fn new(id: ButtonId, connection: Arc<ServiceConnection>) -> Self {
        Self {
            inner: Arc::new(ButtonInner {
                id,
                callbacks: Mutex::new(Vec::new()),
                mask: AtomicU32::new(EventMask::default().bits()),
                forgotten: AtomicBool::new(false),
                connection,
            }),
        }
    }

    pub fn id(&self) -> &ButtonId {
        &self.inner.id
    }

    pub fn is_forgotten(&self) -> bool {
        self.inner.forgotten.load(Ordering::Acquire)
    }

    pub fn callback_flags(&self) -> EventMask {
        EventMask::from_bits_truncate(self.inner.mask.load(Ordering::Acquire))
    }

    pub fn add_callback(&self, callback: Arc<dyn ButtonCallback>) -> Result<(), ButtonError> {
        let mut callbacks = self.callbacks();
        self.ensure_not_forgotten()?;
        callbacks.push(callback);
        Ok(())
    }

    /// Remove the first registration of `callback`, compared by pointer.
    pub fn remove_callback(&self, callback: &Arc<dyn ButtonCallback>) -> Result<(), ButtonError> {
        let mut callbacks = self.callbacks();
        self.ensure_not_forgotten()?;
        if let Some(index) = callbacks
            .iter()
            .position(|c| std::ptr::addr_eq(Arc::as_ptr(c), Arc::as_ptr(callback)))
        {
            callbacks.remove(index);
        }
        Ok(())
    }

    pub fn remove_all_callbacks(&self) -> Result<(), ButtonError> {
        let mut callbacks = self.callbacks();
        self.ensure_not_forgotten()?;
        callbacks.clear();
        Ok(())
    }

    /// Set which event categories the service delivers for this button.
    ///
    /// The local mask changes only when the service accepted the new one.
    pub fn set_callback_flags(&self, mask: EventMask) -> Result<bool, ButtonError> {
        self.ensure_not_forgotten()?;
        let accepted = self.remote_ok("set_button_callbacks", |service, session| {
            service.set_button_callbacks(session, self.id(), mask)
        });
        if accepted {
            self.inner.mask.store(mask.bits(), Ordering::Release);
        }
        Ok(accepted)
    }

    /// Set the categories delivered through the broadcast path. Independent
    /// of [`Button::set_callback_flags`].
    pub fn register_listen_for_broadcast(&self, mask: EventMask) -> Result<bool, ButtonError> {
        self.ensure_not_forgotten()?;
        Ok(self.remote_ok("register_listen_for_broadcast", |service, session| {
            service.register_listen_for_broadcast(session, self.id(), mask)
        }))
    }

    pub fn grab_exclusivity(&self) -> Result<bool, ButtonError> {
        self.ensure_not_forgotten()?;
        Ok(self.remote_ok("grab_exclusivity", |service, session| {
            service.grab_exclusivity(session, self.id())
        }))
    }

    pub fn release_exclusivity(&self) -> Result<bool, ButtonError> {
        self.ensure_not_forgotten()?;
        Ok(self.remote_ok("release_exclusivity", |service, session| {
            service.release_exclusivity(session, self.id())
        }))
    }

    /// Start an RSSI read; the value arrives through
    /// [`ButtonCallback::on_read_remote_rssi`].
    pub fn read_remote_rssi(&self) -> Result<bool, ButtonError> {
        self.ensure_not_forgotten()?;
        Ok(self
            .query("read_remote_rssi", |service, session| {
                service.read_remote_rssi(session, self.id())
            })
            .unwrap_or(false))
    }

    pub fn set_active_mode(&self, active: bool) -> Result<bool, ButtonError> {
        self.ensure_not_forgotten()?;
        Ok(self.remote_ok("set_active_mode", |service, session| {
            service.set_active_mode(session, self.id(), active)
        }))
    }

    pub fn connection_status(&self) -> Result<ConnectionStatus, ButtonError> {
        self.ensure_not_forgotten()?;
        Ok(self
            .query("connection_status", |service, session| {
                service.connection_status(session, self.id())
            })
            .unwrap_or_default())
    }

    pub fn name(&self) -> Result<Option<String>, ButtonError> {
        self.ensure_not_forgotten()?;
        Ok(self
            .query("name", |service, session| service.name(session, self.id()))
            .flatten())
    }

    pub fn color(&self) -> Result<Option<String>, ButtonError> {
        self.ensure_not_forgotten()?;
        Ok(self
            .query("color", |service, session| service.color(session, self.id()))
            .flatten())
    }

    pub(crate) fn callbacks_snapshot(&self) -> Vec<Arc<dyn ButtonCallback>> {
        self.callbacks().clone()
    }

    /// Teardown used by the registry. Subscribers are dropped, the mask is
    /// cleared and the flag set under the subscriber lock, so no subscriber
    /// can be added in between.
    pub(crate) fn retire(&self) {
        let mut callbacks = self.callbacks();
        callbacks.clear();
        self.inner.mask.store(EventMask::NONE.bits(), Ordering::Release);
        self.inner.forgotten.store(true, Ordering::Release);
    }

    /// Flag a handle the registry does not track. Subscribers are kept.
    pub(crate) fn mark_forgotten(&self) {
        let _callbacks = self.callbacks();
        self.inner.forgotten.store(true, Ordering::Release);
    }

    #[cfg(test)]
    pub(crate) fn force_local_mask(&self, mask: EventMask) {
        self.inner.mask.store(mask.bits(), Ordering::Release);
    }

    fn ensure_not_forgotten(&self) -> Result<(), ButtonError> {
        if self.is_forgotten() {
            return Err(ButtonError::Forgotten {
                id: self.inner.id.clone(),
            });
        }
        Ok(())
    }

    fn callbacks(&self) -> MutexGuard<'_, Vec<Arc<dyn ButtonCallback>>> {
        self.inner
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn remote_ok(
        &self,
        operation: &'static str,
        f: impl FnOnce(&dyn ButtonServicePort, ServiceSessionId) -> Result<(), RemoteError>,
    ) -> bool {
        self.query(operation, f).is_some()
    }

    fn query<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&dyn ButtonServicePort, ServiceSessionId) -> Result<T, RemoteError>,
    ) -> Option<T> {
        match self.inner.connection.call(f) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(button_id = %self.id(), operation, error = %err, "Button service call failed");
                None
            }
        }
    }
}

impl PartialEq for Button {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Button {}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("id", &self.inner.id)
            .field("mask", &self.callback_flags())
            .field("forgotten", &self.is_forgotten())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "button {}", self.inner.id)?;
        if self.is_forgotten() {
            f.write_str(" (forgotten)")?;
        }
        Ok(())
    }
}
