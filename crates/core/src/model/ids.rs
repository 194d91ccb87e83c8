use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a quiz in the question bank (e.g. `math-1`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuizId(String);

impl QuizId {
    /// Creates a new `QuizId` from a non-empty string.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the trimmed value is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ParseIdError> {
        let raw = id.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError::new("QuizId"));
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for QuizId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuizId> for String {
    fn from(id: QuizId) -> Self {
        id.0
    }
}

/// Unique identifier for a history entry.
///
/// Derived from the completion instant in milliseconds since the Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HistoryEntryId(u64);

impl HistoryEntryId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Builds an id from a timestamp in milliseconds. Pre-epoch instants map to 0.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(u64::try_from(millis).unwrap_or(0))
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuizId({})", self.0)
    }
}

impl fmt::Debug for HistoryEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HistoryEntryId({})", self.0)
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for HistoryEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing an id from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl ParseIdError {
    fn new(kind: &'static str) -> Self {
        Self { kind }
    }
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuizId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for HistoryEntryId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(HistoryEntryId::new)
            .map_err(|_| ParseIdError::new("HistoryEntryId"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_id_trims_and_displays() {
        let id = QuizId::new("  math-1 ").unwrap();
        assert_eq!(id.to_string(), "math-1");
        assert_eq!(id.as_str(), "math-1");
    }

    #[test]
    fn quiz_id_rejects_blank() {
        assert!(QuizId::new("   ").is_err());
        assert!("".parse::<QuizId>().is_err());
    }

    #[test]
    fn quiz_id_deserializes_through_validation() {
        let id: QuizId = serde_json::from_str("\"rust-basics\"").unwrap();
        assert_eq!(id.as_str(), "rust-basics");
        assert!(serde_json::from_str::<QuizId>("\"\"").is_err());
    }

    #[test]
    fn history_id_from_str() {
        let id: HistoryEntryId = "1700000000000".parse().unwrap();
        assert_eq!(id, HistoryEntryId::new(1_700_000_000_000));
        assert!("not-a-number".parse::<HistoryEntryId>().is_err());
    }

    #[test]
    fn history_id_from_negative_millis_is_zero() {
        assert_eq!(HistoryEntryId::from_millis(-5).value(), 0);
    }
}
