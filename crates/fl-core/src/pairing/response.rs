/// Untrusted response returned by the pairing UI flow for a completed grab.
///
/// Optional fields model values the flow may omit; a missing field is a
/// malformed response, not a panic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrabResponse {
    /// Claimed hardware address of the button.
    pub mac: String,
    /// Hex-encoded button UUID.
    pub button_uuid: String,
    /// Button X25519 public key, 32 bytes when well-formed.
    pub public_key: Option<Vec<u8>>,
    /// Manufacturer signature over the button's key material.
    pub signature: Option<Vec<u8>>,
    pub proof: Option<Vec<u8>>,
}
