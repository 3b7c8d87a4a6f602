use std::sync::Arc;

/// Append-only sequence of human-readable discovery messages.
///
/// The engine only appends; it never reads entries back. Entries are shared
/// with published snapshots and copied on the next append.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscoveryLog {
    entries: Arc<Vec<String>>,
}

impl DiscoveryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(message: impl Into<String>) -> Self {
        let mut log = Self::new();
        log.push(message);
        log
    }

    pub fn push(&mut self, message: impl Into<String>) {
        Arc::make_mut(&mut self.entries).push(message.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// The `count` most recent entries, oldest first.
    pub fn recent(&self, count: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }
}
