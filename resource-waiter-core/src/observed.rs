//! Tally of everything a waiter saw, attached to errors for diagnostics.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Count of each distinct observation, keyed by its summary text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ObservedResponses(BTreeMap<String, usize>);

impl ObservedResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, summary: impl Into<String>) {
        *self.0.entry(summary.into()).or_insert(0) += 1;
    }

    pub fn count(&self, summary: &str) -> usize {
        self.0.get(summary).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl fmt::Display for ObservedResponses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "nothing observed");
        }
        let mut first = true;
        for (summary, count) in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{summary} (x{count})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_display() {
        let mut observed = ObservedResponses::new();
        assert_eq!(observed.to_string(), "nothing observed");

        observed.record("EndpointStatus=Creating");
        observed.record("EndpointStatus=Creating");
        observed.record("ThrottlingException");

        assert_eq!(observed.count("EndpointStatus=Creating"), 2);
        assert_eq!(observed.count("missing"), 0);
        assert_eq!(observed.total(), 3);
        assert_eq!(
            observed.to_string(),
            "EndpointStatus=Creating (x2), ThrottlingException (x1)"
        );
    }

    #[test]
    fn test_serializes_as_map() {
        let mut observed = ObservedResponses::new();
        observed.record("a");
        let json = serde_json::to_string(&observed).unwrap();
        assert_eq!(json, r#"{"a":1}"#);
    }
}
