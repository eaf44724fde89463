use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Number of octets in a Bluetooth hardware address.
const OCTET_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ButtonIdError {
    #[error("button id is empty")]
    Empty,

    #[error("invalid button id: {0}")]
    InvalidFormat(String),
}

/// Bluetooth hardware address of a button (48-bit).
///
/// 按钮的蓝牙硬件地址，比较时不区分大小写。
///
/// The canonical form is lower-case hex octets separated by `:`. Input may use
/// either `:` or `-` as separator and any letter case; both normalize to the
/// same id, so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ButtonId(String);

impl ButtonId {
    pub fn parse(raw: &str) -> Result<Self, ButtonIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ButtonIdError::Empty);
        }

        let octets: Vec<&str> = trimmed.split(|c| c == ':' || c == '-').collect();
        let well_formed = octets.len() == OCTET_COUNT
            && octets
                .iter()
                .all(|octet| octet.len() == 2 && octet.chars().all(|c| c.is_ascii_hexdigit()));
        if !well_formed {
            return Err(ButtonIdError::InvalidFormat(trimmed.to_string()));
        }

        Ok(Self(octets.join(":").to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ButtonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ButtonId {
    type Err = ButtonIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ButtonId {
    type Error = ButtonIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ButtonId> for String {
    fn from(id: ButtonId) -> Self {
        id.0
    }
}

impl AsRef<str> for ButtonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        let id = ButtonId::parse("80:E4:DA:70:1A:2B").unwrap();
        assert_eq!(id.as_str(), "80:e4:da:70:1a:2b");
    }

    #[test]
    fn test_parse_accepts_dash_separator() {
        let dashed = ButtonId::parse("80-e4-da-70-1a-2b").unwrap();
        let coloned = ButtonId::parse("80:e4:da:70:1a:2b").unwrap();
        assert_eq!(dashed, coloned);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = ButtonId::parse("  80:e4:da:70:1a:2b\n").unwrap();
        assert_eq!(id.as_str(), "80:e4:da:70:1a:2b");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(ButtonId::parse("   "), Err(ButtonIdError::Empty));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(ButtonId::parse("80:e4:da:70:1a").is_err());
        assert!(ButtonId::parse("80:e4:da:70:1a:2g").is_err());
        assert!(ButtonId::parse("80e4:da:70:1a:2b:00").is_err());
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let id: ButtonId = serde_json::from_str("\"80:E4:DA:70:1A:2B\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"80:e4:da:70:1a:2b\"");
        assert!(serde_json::from_str::<ButtonId>("\"nope\"").is_err());
    }
}
