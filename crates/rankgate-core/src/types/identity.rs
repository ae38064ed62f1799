//! Caller and grantee identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An identity that can hold a level or submit operations.
///
/// Identities are opaque strings supplied by the execution environment
/// (account addresses, emails, service names). The registry never parses
/// them; two identities are the same iff their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates a new identity from a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use rankgate_core::Identity;
    ///
    /// let id = Identity::new("alice");
    /// assert_eq!(id.as_str(), "alice");
    /// ```
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
