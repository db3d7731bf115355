// Address value object - the unit of route membership
use crate::domain::error::PanelError;
use serde::Serialize;
use std::fmt;

/// A trimmed, non-empty address string.
///
/// Two addresses are equal only when their trimmed text is byte-for-byte equal;
/// case and inner whitespace are significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self, PanelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PanelError::Validation("address is empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
