// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Validation failures keyed by the field or node id they concern.
///
/// This is what error listeners receive, so the editor can highlight the
/// offending field or node. A key may carry more than one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorMap(BTreeMap<String, Vec<String>>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(message.into());
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct keys with at least one message.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn message_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, messages)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", key, messages.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_accumulate_per_key() {
        let mut errors = ErrorMap::new();
        errors.insert("name", "Please enter a name");
        errors.insert("name", "Name contains invalid characters");
        errors.insert("source", "Missing source");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message_count(), 3);
        assert_eq!(errors.get("name").map(|m| m.len()), Some(2));
        assert_eq!(
            errors.to_string(),
            "name: Please enter a name, Name contains invalid characters; source: Missing source"
        );
    }
}
