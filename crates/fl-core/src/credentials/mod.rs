//! App credentials.
//!
//! The host application identifies itself to the button service with an
//! `(app_id, app_secret, app_name)` triple. Each field is write-once: the
//! first write wins and later writes are silently ignored, so a library
//! component cannot override what the application configured at startup.

use std::sync::OnceLock;

use crate::security::SecretString;

/// Write-once app credentials.
///
/// 应用凭据：每个字段只能写入一次。
#[derive(Debug, Default)]
pub struct AppCredentials {
    app_id: OnceLock<String>,
    app_secret: OnceLock<SecretString>,
    app_name: OnceLock<String>,
}

impl AppCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all three fields. Fields that are already set keep their value.
    ///
    /// `app_name` is what the button service shows to the user.
    pub fn set(
        &self,
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        app_name: impl Into<String>,
    ) {
        self.set_app_id(app_id);
        self.set_app_secret(app_secret);
        self.set_app_name(app_name);
    }

    pub fn set_app_id(&self, app_id: impl Into<String>) {
        let _ = self.app_id.set(app_id.into());
    }

    pub fn set_app_secret(&self, app_secret: impl Into<String>) {
        let _ = self.app_secret.set(SecretString::new(app_secret));
    }

    pub fn set_app_name(&self, app_name: impl Into<String>) {
        let _ = self.app_name.set(app_name.into());
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.get().map(String::as_str)
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.get().map(String::as_str)
    }

    pub fn is_complete(&self) -> bool {
        self.app_id.get().is_some() && self.app_secret.get().is_some() && self.app_name.get().is_some()
    }

    /// Owned copy of the triple, `None` until every field is set.
    pub fn snapshot(&self) -> Option<AppCredentialsSnapshot> {
        Some(AppCredentialsSnapshot {
            app_id: self.app_id.get()?.clone(),
            app_secret: self.app_secret.get()?.duplicate(),
            app_name: self.app_name.get()?.clone(),
        })
    }
}

/// Complete credentials as handed to the button service and the pairing flow.
#[derive(Debug, PartialEq, Eq)]
pub struct AppCredentialsSnapshot {
    pub app_id: String,
    pub app_secret: SecretString,
    pub app_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_requires_every_field() {
        let credentials = AppCredentials::new();
        assert!(credentials.snapshot().is_none());

        credentials.set_app_id("id");
        credentials.set_app_name("name");
        assert!(!credentials.is_complete());
        assert!(credentials.snapshot().is_none());

        credentials.set_app_secret("secret");
        let snapshot = credentials.snapshot().unwrap();
        assert_eq!(snapshot.app_id, "id");
        assert_eq!(snapshot.app_secret.expose(), "secret");
        assert_eq!(snapshot.app_name, "name");
    }

    #[test]
    fn test_second_set_is_a_no_op() {
        let credentials = AppCredentials::new();
        credentials.set("first-id", "first-secret", "First App");
        credentials.set("second-id", "second-secret", "Second App");

        let snapshot = credentials.snapshot().unwrap();
        assert_eq!(snapshot.app_id, "first-id");
        assert_eq!(snapshot.app_secret.expose(), "first-secret");
        assert_eq!(snapshot.app_name, "First App");
    }

    #[test]
    fn test_fields_are_write_once_independently() {
        let credentials = AppCredentials::new();
        credentials.set_app_name("Early Name");
        credentials.set("id", "secret", "Late Name");

        assert_eq!(credentials.app_id(), Some("id"));
        assert_eq!(credentials.app_name(), Some("Early Name"));
    }

    #[test]
    fn test_debug_never_prints_secret() {
        let credentials = AppCredentials::new();
        credentials.set("id", "super-secret", "name");
        let rendered = format!("{credentials:?} {:?}", credentials.snapshot());
        assert!(!rendered.contains("super-secret"));
    }
}
