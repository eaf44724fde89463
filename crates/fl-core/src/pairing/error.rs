use thiserror::Error;

/// Pairing failures. All of them mean "no button produced".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    #[error("malformed pairing response: {0}")]
    MalformedResponse(String),

    #[error("manufacturer signature did not verify")]
    SignatureInvalid,

    #[error("pairing proof mismatch")]
    ProofMismatch,
}
