//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifies one analyst session from construction to process exit.
///
/// Only used to correlate log lines; it is never sent to the scoring API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalystSessionId(Uuid);

impl AnalystSessionId {
    /// Creates a new random AnalystSessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AnalystSessionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AnalystSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalystSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnalystSessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(AnalystSessionId::new(), AnalystSessionId::new());
    }

    #[test]
    fn parses_from_display_output() {
        let id = AnalystSessionId::new();
        let parsed: AnalystSessionId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
