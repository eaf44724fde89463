use rand::rngs::OsRng;
use x25519_dalek::{EphemeralSecret, PublicKey};

/// One in-flight grab: a fresh ephemeral X25519 key pair.
///
/// The private half can be used exactly once. It is consumed by
/// [`PairingVerifier::verify`](super::PairingVerifier::verify) and zeroized
/// on drop, so discarding the session also discards the key.
pub struct PairingSession {
    secret: EphemeralSecret,
    public_key: PublicKey,
}

impl PairingSession {
    pub fn generate() -> Self {
        let secret = EphemeralSecret::random_from_rng(OsRng);
        let public_key = PublicKey::from(&secret);
        Self { secret, public_key }
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.public_key.to_bytes()
    }

    pub(crate) fn into_secret(self) -> EphemeralSecret {
        self.secret
    }
}

impl std::fmt::Debug for PairingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairingSession")
            .field("public_key", &hex::encode(self.public_key.as_bytes()))
            .finish_non_exhaustive()
    }
}
