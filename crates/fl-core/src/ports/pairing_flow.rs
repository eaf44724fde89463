use super::errors::PairingFlowError;
use crate::ids::ServiceSessionId;
use crate::security::SecretString;

/// Everything the pairing UI flow needs to run one grab.
#[derive(Debug)]
pub struct GrabRequest {
    /// Correlation id echoed back with the result.
    pub request_code: u32,
    /// Ephemeral X25519 public key of this attempt.
    pub public_key: [u8; 32],
    pub session: ServiceSessionId,
    pub app_id: String,
    pub app_secret: SecretString,
    pub app_name: String,
}

/// Launches the out-of-band grab UI.
///
/// The result comes back later through the manager's grab completion call.
pub trait PairingFlowPort: Send + Sync {
    fn launch(&self, request: GrabRequest) -> Result<(), PairingFlowError>;
}
