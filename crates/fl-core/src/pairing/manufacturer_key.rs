use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use rsa::{BigUint, RsaPublicKey};
use sha2::Sha256;

/// Decimal modulus of the manufacturer signing key (2048 bit).
const MANUFACTURER_MODULUS: &str = concat!(
    "266461097468202292061577383279715697520902116923484006283350165618725938",
    "107149808515656272589693796282844469548562172710111138391489237184712329",
    "830713567474605858773171596500041849142203337775959651059613277165960193",
    "128877599848411256939953432876711220309718095564170603905551586617637901",
    "664463975584697344343488170915406716145217729787838343713050590638051845",
    "526759990140939039533579022725373632490047338276861438665150018458552696",
    "946430027156044689159245297540839638708770154229501950328145806464526961",
    "553580257724226813290418021920388832022034231530809198077570201660012489",
    "42233209849142898672366749341514289888739",
);

const MANUFACTURER_EXPONENT: u32 = 65537;

/// RSA public key that signs every genuine button's key material.
///
/// Signatures are PKCS#1 v1.5 over SHA-256.
#[derive(Debug, Clone)]
pub struct ManufacturerKey {
    verifying_key: VerifyingKey<Sha256>,
}

impl ManufacturerKey {
    /// The key burned into every genuine button at manufacturing time.
    pub fn builtin() -> Result<Self, rsa::Error> {
        let modulus = BigUint::parse_bytes(MANUFACTURER_MODULUS.as_bytes(), 10)
            .ok_or(rsa::Error::InvalidModulus)?;
        let public_key = RsaPublicKey::new(modulus, BigUint::from(MANUFACTURER_EXPONENT))?;
        Ok(Self::from_public_key(public_key))
    }

    pub fn from_public_key(public_key: RsaPublicKey) -> Self {
        Self {
            verifying_key: VerifyingKey::new(public_key),
        }
    }

    /// Any decoding or provider error counts as a failed verification.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::try_from(signature) else {
            return false;
        };
        self.verifying_key.verify(message, &signature).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::traits::PublicKeyParts;

    #[test]
    fn test_builtin_key_parses() {
        let key = ManufacturerKey::builtin().unwrap();
        let public_key: &RsaPublicKey = key.verifying_key.as_ref();
        assert_eq!(public_key.size() * 8, 2048);
        assert_eq!(public_key.e(), &BigUint::from(MANUFACTURER_EXPONENT));
    }

    #[test]
    fn test_garbage_signature_is_rejected_not_an_error() {
        let key = ManufacturerKey::builtin().unwrap();
        assert!(!key.verify(b"message", &[]));
        assert!(!key.verify(b"message", &[0xff; 256]));
        assert!(!key.verify(b"message", &[0x01; 7]));
    }
}
