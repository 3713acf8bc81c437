use std::collections::HashMap;

/// Signal -> action associations a listener has committed to during a run.
///
/// Grows monotonically: entries are overwritten, never removed. Owned by a
/// single run and threaded through every listener call in round order.
#[derive(Debug, Clone)]
pub struct ListenerMemory<A> {
    entries: HashMap<String, A>,
}

impl<A> ListenerMemory<A> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The most recent action taken for `signal`.
    pub fn get(&self, signal: &str) -> Option<&A> {
        self.entries.get(signal)
    }

    pub fn contains(&self, signal: &str) -> bool {
        self.entries.contains_key(signal)
    }

    /// Record the action taken for a signal, replacing any earlier entry.
    pub fn record(&mut self, signal: String, action: A) {
        self.entries.insert(signal, action);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &A)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A> Default for ListenerMemory<A> {
    fn default() -> Self {
        Self::new()
    }
}
