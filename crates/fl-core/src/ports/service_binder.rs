use super::errors::RemoteError;

/// Discovers and binds the button service.
///
/// `bind` only starts the connection; the host reports the outcome back to
/// the manager through its service-connected and service-disconnected
/// handlers.
pub trait ServiceBinderPort: Send + Sync {
    /// Fails when the service is not installed or not discoverable.
    fn bind(&self) -> Result<(), RemoteError>;

    fn unbind(&self);
}
