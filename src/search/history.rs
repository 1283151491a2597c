use serde::{Deserialize, Serialize};

/// Append-only record of successful queries, oldest first.
///
/// Identical queries are stored every time they succeed; there is no
/// de-duplication and no storage cap. Capping is a display concern handled
/// by `snapshot(Some(n))`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful query at the end of the sequence.
    pub(crate) fn append(&mut self, query: String) {
        self.entries.push(query);
    }

    /// Chronological snapshot.
    ///
    /// With `Some(max)`, only the `max` most recent entries are returned,
    /// still in chronological order.
    pub fn snapshot(&self, max: Option<usize>) -> Vec<String> {
        let skip = match max {
            Some(max) => self.entries.len().saturating_sub(max),
            None => 0,
        };
        self.entries[skip..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}
