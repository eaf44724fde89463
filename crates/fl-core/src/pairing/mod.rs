//! Pairing handshake.
//!
//! A grab produces an untrusted response from the pairing UI flow. The
//! verifier turns it into a trusted [`ButtonId`](crate::ids::ButtonId) by
//! checking the manufacturer signature over the button's key material and a
//! proof derived from an X25519 shared secret.

mod error;
mod manufacturer_key;
mod response;
mod session;
mod verifier;

pub use error::PairingError;
pub use manufacturer_key::ManufacturerKey;
pub use response::GrabResponse;
pub use session::PairingSession;
pub use verifier::{PairingVerifier, PROOF_LEN};
