use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// A sensitive string such as the app secret.
///
/// 敏感字符串：不输出真实内容，Drop 时清零内存。
///
/// - `Debug` / `Display` print `[REDACTED]`
/// - no `Clone`, copies must be explicit via [`SecretString::duplicate`]
/// - equality is constant-time
/// - the buffer is zeroed on drop
pub struct SecretString {
    inner: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Borrow the secret. Callers must not log the result.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Make an independent copy that is zeroed on its own drop.
    pub fn duplicate(&self) -> Self {
        Self::new(self.inner.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_bytes().ct_eq(other.inner.as_bytes()).into()
    }
}

impl Eq for SecretString {}

impl Drop for SecretString {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_redacted() {
        let secret = SecretString::new("hunter2");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(format!("{secret}"), "[REDACTED]");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_duplicate_is_equal() {
        let secret = SecretString::new("s3cret");
        let copy = secret.duplicate();
        assert_eq!(secret, copy);
        assert_ne!(secret, SecretString::new("other"));
    }
}
