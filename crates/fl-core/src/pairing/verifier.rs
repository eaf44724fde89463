use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use x25519_dalek::PublicKey;
use zeroize::Zeroize;

use super::{GrabResponse, ManufacturerKey, PairingError, PairingSession};
use crate::ids::ButtonId;

/// Length of the proof: digest bytes `1..14` of SHA-256(shared secret).
pub const PROOF_LEN: usize = 13;

const PUBLIC_KEY_LEN: usize = 32;

/// Authenticates grab responses against the manufacturer key.
#[derive(Debug, Clone)]
pub struct PairingVerifier {
    manufacturer_key: ManufacturerKey,
}

impl PairingVerifier {
    pub fn new(manufacturer_key: ManufacturerKey) -> Self {
        Self { manufacturer_key }
    }

    pub fn with_builtin_key() -> Result<Self, rsa::Error> {
        Ok(Self::new(ManufacturerKey::builtin()?))
    }

    /// Verify a grab response against the session that started the grab.
    ///
    /// The session is consumed whatever the outcome. The shared secret and
    /// its digest are zeroized before returning.
    pub fn verify(
        &self,
        session: PairingSession,
        response: &GrabResponse,
    ) -> Result<ButtonId, PairingError> {
        let result = self.verify_inner(session, response);

        #[cfg(feature = "tracing")]
        match &result {
            Ok(id) => tracing::info!(button_id = %id, "Pairing response verified"),
            Err(err) => tracing::warn!(error = %err, "Pairing response rejected"),
        }

        result
    }

    fn verify_inner(
        &self,
        session: PairingSession,
        response: &GrabResponse,
    ) -> Result<ButtonId, PairingError> {
        let button_key: [u8; PUBLIC_KEY_LEN] = response
            .public_key
            .as_deref()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| malformed("button public key must be 32 bytes"))?;
        let signature = response
            .signature
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| malformed("signature is missing"))?;
        let proof = response
            .proof
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| malformed("proof is missing"))?;
        // Signed bytes are the lower-cased address as received, padding included.
        let mac = response.mac.to_lowercase();
        let button_id = ButtonId::parse(&mac).map_err(|e| malformed(&e.to_string()))?;
        let uuid = hex::decode(response.button_uuid.trim())
            .map_err(|e| malformed(&format!("button uuid is not hex: {e}")))?;

        let mut signed = Vec::with_capacity(PUBLIC_KEY_LEN + mac.len() + uuid.len());
        signed.extend_from_slice(&button_key);
        signed.extend_from_slice(mac.as_bytes());
        signed.extend_from_slice(&uuid);
        if !self.manufacturer_key.verify(&signed, signature) {
            return Err(PairingError::SignatureInvalid);
        }

        let shared = session
            .into_secret()
            .diffie_hellman(&PublicKey::from(button_key));
        let mut digest = Sha256::digest(shared.as_bytes());
        drop(shared);

        let matches = proofs_equal(&digest[1..1 + PROOF_LEN], proof);
        digest.as_mut_slice().zeroize();

        if matches {
            Ok(button_id)
        } else {
            Err(PairingError::ProofMismatch)
        }
    }
}

fn malformed(reason: &str) -> PairingError {
    PairingError::MalformedResponse(reason.to_string())
}

/// Constant-time for equal lengths; a length difference fails immediately.
fn proofs_equal(expected: &[u8], received: &[u8]) -> bool {
    expected.ct_eq(received).into()
}
