//! Grab (pairing) flow.
//!
//! `initiate` generates a fresh ephemeral key, parks it as the single pending
//! session and launches the pairing UI flow. `complete` consumes that session
//! against the flow's result. Starting a new grab discards the previous
//! session, so only the most recent grab can ever complete.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fl_core::credentials::AppCredentialsSnapshot;
use fl_core::ids::{ButtonId, ServiceSessionId};
use fl_core::pairing::{GrabResponse, PairingError, PairingSession, PairingVerifier};
use fl_core::ports::{GrabRequest, PairingFlowError, PairingFlowPort};
use thiserror::Error;
use tracing::{debug, info};

/// Correlation id for results of the grab flow.
pub const GRAB_BUTTON_REQUEST_CODE: u32 = 0xce8b;

/// What the pairing UI flow returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrabOutcome {
    Completed(GrabResponse),
    Cancelled,
}

#[derive(Debug, Error)]
pub enum GrabError {
    #[error("app credentials were not provided")]
    CredentialsMissing,

    #[error("no grab is pending")]
    NoPendingSession,

    #[error(transparent)]
    Launch(#[from] PairingFlowError),

    #[error(transparent)]
    Pairing(#[from] PairingError),
}

pub struct GrabFlow {
    pending: Mutex<Option<PairingSession>>,
    verifier: PairingVerifier,
    pairing_flow: Arc<dyn PairingFlowPort>,
}

impl GrabFlow {
    pub fn new(verifier: PairingVerifier, pairing_flow: Arc<dyn PairingFlowPort>) -> Self {
        Self {
            pending: Mutex::new(None),
            verifier,
            pairing_flow,
        }
    }

    pub fn initiate(
        &self,
        credentials: AppCredentialsSnapshot,
        session: ServiceSessionId,
    ) -> Result<(), GrabError> {
        let pairing = PairingSession::generate();
        let request = GrabRequest {
            request_code: GRAB_BUTTON_REQUEST_CODE,
            public_key: pairing.public_key_bytes(),
            session,
            app_id: credentials.app_id,
            app_secret: credentials.app_secret,
            app_name: credentials.app_name,
        };

        if self.pending().replace(pairing).is_some() {
            debug!("Discarded previous pending grab");
        }
        if let Err(err) = self.pairing_flow.launch(request) {
            self.pending().take();
            return Err(err.into());
        }
        info!("Grab flow launched");
        Ok(())
    }

    /// Finish the pending grab.
    ///
    /// `Ok(None)` means the result was not ours or the user cancelled; a
    /// foreign request code leaves the pending session untouched.
    pub fn complete(
        &self,
        request_code: u32,
        outcome: GrabOutcome,
    ) -> Result<Option<ButtonId>, GrabError> {
        if request_code != GRAB_BUTTON_REQUEST_CODE {
            return Ok(None);
        }
        let session = self.pending().take();
        let response = match outcome {
            GrabOutcome::Cancelled => {
                debug!("Grab cancelled");
                return Ok(None);
            }
            GrabOutcome::Completed(response) => response,
        };
        let session = session.ok_or(GrabError::NoPendingSession)?;
        Ok(Some(self.verifier.verify(session, &response)?))
    }

    pub fn has_pending(&self) -> bool {
        self.pending().is_some()
    }

    /// Drop the pending session, if any.
    pub fn discard(&self) {
        self.pending().take();
    }

    fn pending(&self) -> MutexGuard<'_, Option<PairingSession>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_core::pairing::ManufacturerKey;
    use fl_core::SecretString;
    use rand::rngs::OsRng;
    use rsa::{RsaPrivateKey, RsaPublicKey};
    use std::sync::OnceLock;

    mockall::mock! {
        pub Flow {}

        impl PairingFlowPort for Flow {
            fn launch(&self, request: GrabRequest) -> Result<(), PairingFlowError>;
        }
    }

    fn verifier() -> PairingVerifier {
        static KEY: OnceLock<RsaPublicKey> = OnceLock::new();
        let key = KEY.get_or_init(|| {
            RsaPublicKey::from(&RsaPrivateKey::new(&mut OsRng, 1024).unwrap())
        });
        PairingVerifier::new(ManufacturerKey::from_public_key(key.clone()))
    }

    fn credentials() -> AppCredentialsSnapshot {
        AppCredentialsSnapshot {
            app_id: "app".into(),
            app_secret: SecretString::new("secret"),
            app_name: "App".into(),
        }
    }

    #[test]
    fn test_initiate_hands_key_and_credentials_to_flow() {
        let mut flow = MockFlow::new();
        flow.expect_launch()
            .withf(|request| {
                request.request_code == GRAB_BUTTON_REQUEST_CODE
                    && request.app_id == "app"
                    && request.app_secret.expose() == "secret"
                    && request.app_name == "App"
                    && request.session == ServiceSessionId::new(7)
            })
            .times(1)
            .returning(|_| Ok(()));
        let grab = GrabFlow::new(verifier(), Arc::new(flow));

        grab.initiate(credentials(), ServiceSessionId::new(7)).unwrap();
        assert!(grab.has_pending());
    }

    #[test]
    fn test_failed_launch_discards_session() {
        let mut flow = MockFlow::new();
        flow.expect_launch()
            .returning(|_| Err(PairingFlowError::LaunchFailed("no activity".into())));
        let grab = GrabFlow::new(verifier(), Arc::new(flow));

        assert!(matches!(
            grab.initiate(credentials(), ServiceSessionId::default()),
            Err(GrabError::Launch(_))
        ));
        assert!(!grab.has_pending());
    }

    #[test]
    fn test_foreign_request_code_is_ignored() {
        let mut flow = MockFlow::new();
        flow.expect_launch().returning(|_| Ok(()));
        let grab = GrabFlow::new(verifier(), Arc::new(flow));
        grab.initiate(credentials(), ServiceSessionId::default()).unwrap();

        let result = grab.complete(1, GrabOutcome::Completed(GrabResponse::default()));
        assert!(matches!(result, Ok(None)));
        assert!(grab.has_pending());
    }

    #[test]
    fn test_cancel_discards_session() {
        let mut flow = MockFlow::new();
        flow.expect_launch().returning(|_| Ok(()));
        let grab = GrabFlow::new(verifier(), Arc::new(flow));
        grab.initiate(credentials(), ServiceSessionId::default()).unwrap();

        assert!(matches!(
            grab.complete(GRAB_BUTTON_REQUEST_CODE, GrabOutcome::Cancelled),
            Ok(None)
        ));
        assert!(!grab.has_pending());
    }

    #[test]
    fn test_complete_without_pending_session() {
        let grab = GrabFlow::new(verifier(), Arc::new(MockFlow::new()));
        assert!(matches!(
            grab.complete(
                GRAB_BUTTON_REQUEST_CODE,
                GrabOutcome::Completed(GrabResponse::default())
            ),
            Err(GrabError::NoPendingSession)
        ));
    }

    #[test]
    fn test_bad_response_consumes_session() {
        let mut flow = MockFlow::new();
        flow.expect_launch().returning(|_| Ok(()));
        let grab = GrabFlow::new(verifier(), Arc::new(flow));
        grab.initiate(credentials(), ServiceSessionId::default()).unwrap();

        let result = grab.complete(
            GRAB_BUTTON_REQUEST_CODE,
            GrabOutcome::Completed(GrabResponse::default()),
        );
        assert!(matches!(
            result,
            Err(GrabError::Pairing(PairingError::MalformedResponse(_)))
        ));
        assert!(!grab.has_pending());
    }
}
