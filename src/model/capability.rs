use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a gated world interaction (e.g. "build",
/// "interact_door").
///
/// The universe of valid identifiers is owned by the host's capability
/// registry; this crate stores and compares them without interpretation.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    /// # Panics
    /// Panics on an empty identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.is_empty(), "Capability::new: identifier cannot be empty");
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
