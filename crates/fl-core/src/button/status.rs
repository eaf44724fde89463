use serde::{Deserialize, Serialize};

/// Connection status of a button as reported by the button service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConnectionStatus {
    /// No connection and no pending connection.
    #[default]
    Disconnected,
    /// Pending connection; the button connects when in range and pressed.
    ConnectionStarted,
    /// Connected; events arrive immediately.
    ConnectionCompleted,
}

impl ConnectionStatus {
    /// Decode the service's status code. Unknown codes read as disconnected.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::ConnectionStarted,
            2 => Self::ConnectionCompleted,
            _ => Self::Disconnected,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Disconnected => 0,
            Self::ConnectionStarted => 1,
            Self::ConnectionCompleted => 2,
        }
    }
}

/// Why the service dropped a button connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisconnectReason {
    NoError,
    ConnectionFailed,
    UnknownDataReceived,
    VerificationTimeOut,
    BackendUnreachable,
    NoInternetConnection,
    CredentialsNotMatching,
    /// The button is bound to another account.
    ButtonIsPrivate,
    CryptographicFailure,
    ButtonDisconnectedDuringVerification,
    Rebonding,
    InvalidButton,
    Unknown(i32),
}

impl DisconnectReason {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::NoError,
            1 => Self::ConnectionFailed,
            2 => Self::UnknownDataReceived,
            3 => Self::VerificationTimeOut,
            4 => Self::BackendUnreachable,
            5 => Self::NoInternetConnection,
            6 => Self::CredentialsNotMatching,
            7 => Self::ButtonIsPrivate,
            8 => Self::CryptographicFailure,
            9 => Self::ButtonDisconnectedDuringVerification,
            10 => Self::Rebonding,
            11 => Self::InvalidButton,
            other => Self::Unknown(other),
        }
    }
}
