//! Registry of verified buttons.
//!
//! The registry is the runtime source of truth for which buttons this app
//! tracks. The persisted allow-list is written through on admit and forget
//! and only read back when reconciling after a service (re)connection.
//!
//! Set mutation and the matching persistence write happen under one
//! registry-wide lock. Remote calls to the button service happen after that
//! lock is released.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fl_core::button::EventMask;
use fl_core::ids::{ButtonId, ServiceSessionId};
use fl_core::ports::{ButtonServicePort, KnownButtonStorePort, RemoteError};
use tracing::{debug, info, warn};

use crate::button::Button;
use crate::connection::ServiceConnection;

pub struct ButtonRegistry {
    buttons: Mutex<HashMap<ButtonId, Button>>,
    store: Arc<dyn KnownButtonStorePort>,
    connection: Arc<ServiceConnection>,
}

impl ButtonRegistry {
    pub fn new(store: Arc<dyn KnownButtonStorePort>, connection: Arc<ServiceConnection>) -> Self {
        Self {
            buttons: Mutex::new(HashMap::new()),
            store,
            connection,
        }
    }

    pub fn lookup(&self, id: &ButtonId) -> Option<Button> {
        self.buttons().get(id).cloned()
    }

    /// Snapshot of every tracked button.
    pub fn known_buttons(&self) -> Vec<Button> {
        self.buttons().values().cloned().collect()
    }

    /// Track a verified button. Idempotent: an already tracked id returns
    /// the existing handle and is not persisted again.
    pub fn admit(&self, id: ButtonId) -> Button {
        let button = {
            let mut buttons = self.buttons();
            if let Some(existing) = buttons.get(&id) {
                return existing.clone();
            }
            let button = Button::new(id.clone(), self.connection.clone());
            buttons.insert(id.clone(), button.clone());
            if let Err(err) = self.store.add(&id) {
                warn!(button_id = %id, error = %err, "Failed to persist admitted button");
            }
            button
        };

        info!(button_id = %button.id(), "Button admitted");
        self.subscribe(&button);
        button
    }

    /// A handle for an id that is not tracked. It is never inserted.
    pub fn synthesize(&self, id: ButtonId) -> Button {
        debug!(button_id = %id, "Synthesizing handle for untracked button");
        Button::new(id, self.connection.clone())
    }

    /// Forget a tracked button. No-op when `button` is not the handle this
    /// registry tracks for its id, which covers a second forget and any
    /// synthesized handle.
    pub fn forget(&self, button: &Button) {
        {
            let mut buttons = self.buttons();
            match buttons.get(button.id()) {
                Some(tracked) if tracked == button => {}
                _ => return,
            }

            button.retire();
            buttons.remove(button.id());
            if let Err(err) = self.store.remove(button.id()) {
                warn!(button_id = %button.id(), error = %err, "Failed to remove forgotten button from store");
            }
        }

        info!(button_id = %button.id(), "Button forgotten");
        let id = button.id();
        self.remote(id, "set_button_callbacks", |service, session| {
            service.set_button_callbacks(session, id, EventMask::NONE)
        });
        self.remote(id, "remove_button", |service, session| {
            service.remove_button(session, id)
        });
        self.remote(id, "unlisten_for_connection_callbacks", |service, session| {
            service.unlisten_for_connection_callbacks(session, id)
        });
    }

    /// Restore tracked state after a service (re)connection.
    ///
    /// Only ids that are both persisted and live are materialized. Every
    /// tracked button then gets its mask and connection subscription
    /// re-asserted, since the service forgets a disconnected client's
    /// subscriptions. Tracked buttons are never pruned here.
    pub fn reconcile(&self, persisted: &[ButtonId], live: &[String]) -> Vec<Button> {
        let live = parse_live(live);
        let tracked = {
            let mut buttons = self.buttons();
            self.restore(&mut buttons, persisted, &live)
        };
        self.resubscribe(tracked)
    }

    /// Fetch the service's live list, then reconcile it against the
    /// allow-list. The allow-list is read under the registry lock so a
    /// concurrent forget cannot be undone by a stale read.
    pub fn sync_with_service(&self) -> Result<Vec<Button>, RemoteError> {
        let live = self
            .connection
            .call(|service, session| service.list_buttons(session))?;
        let live = parse_live(&live);

        let tracked = {
            let mut buttons = self.buttons();
            let persisted = self.store.list_all().unwrap_or_else(|err| {
                warn!(error = %err, "Failed to read known buttons; treating allow-list as empty");
                Vec::new()
            });
            self.restore(&mut buttons, &persisted, &live)
        };
        Ok(self.resubscribe(tracked))
    }

    fn restore(
        &self,
        buttons: &mut HashMap<ButtonId, Button>,
        persisted: &[ButtonId],
        live: &HashSet<ButtonId>,
    ) -> Vec<Button> {
        for id in persisted.iter().filter(|id| live.contains(*id)) {
            if !buttons.contains_key(id) {
                debug!(button_id = %id, "Restoring persisted button");
                buttons.insert(id.clone(), Button::new(id.clone(), self.connection.clone()));
            }
        }
        buttons.values().cloned().collect()
    }

    fn resubscribe(&self, tracked: Vec<Button>) -> Vec<Button> {
        for button in &tracked {
            self.subscribe(button);
        }
        info!(count = tracked.len(), "Known buttons reconciled");
        tracked
    }

    fn subscribe(&self, button: &Button) {
        let id = button.id();
        let mask = button.callback_flags();
        self.remote(id, "listen_for_connection_callbacks", |service, session| {
            service.listen_for_connection_callbacks(session, id)
        });
        self.remote(id, "set_button_callbacks", |service, session| {
            service.set_button_callbacks(session, id, mask)
        });
    }

    /// One service call; a failure is logged and does not stop the caller.
    fn remote(
        &self,
        id: &ButtonId,
        operation: &'static str,
        f: impl FnOnce(&dyn ButtonServicePort, ServiceSessionId) -> Result<(), RemoteError>,
    ) {
        if let Err(err) = self.connection.call(f) {
            debug!(button_id = %id, operation, error = %err, "Button service call failed");
        }
    }

    fn buttons(&self) -> MutexGuard<'_, HashMap<ButtonId, Button>> {
        self.buttons.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn parse_live(live: &[String]) -> HashSet<ButtonId> {
    live.iter()
        .filter_map(|raw| match ButtonId::parse(raw) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(raw = %raw, error = %err, "Ignoring malformed live button address");
                None
            }
        })
        .collect()
}
