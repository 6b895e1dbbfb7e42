//! Navigation History
//!
//! Browser-style history over a route table: a stack of locations with a
//! cursor. `push` discards forward entries the way the browser does.

use super::table::{Resolved, RouteTable};

/// Route table plus a history stack
#[derive(Debug, Clone)]
pub struct Router<V> {
    table: RouteTable<V>,
    entries: Vec<String>,
    index: usize,
}

impl<V: Clone> Router<V> {
    /// Create a router whose history starts at `initial`
    pub fn new(table: RouteTable<V>, initial: &str) -> Self {
        Self {
            table,
            entries: vec![initial.to_string()],
            index: 0,
        }
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    /// Current location
    pub fn location(&self) -> &str {
        &self.entries[self.index]
    }

    /// Resolve the current location
    pub fn current(&self) -> Option<Resolved<V>> {
        self.table.resolve(self.location())
    }

    /// Navigate to a new location, dropping any forward history
    pub fn push(&mut self, location: &str) -> Option<Resolved<V>> {
        self.entries.truncate(self.index + 1);
        self.entries.push(location.to_string());
        self.index += 1;
        tracing::debug!(location, "history push");
        self.current()
    }

    /// Replace the current location without adding an entry
    pub fn replace(&mut self, location: &str) -> Option<Resolved<V>> {
        self.entries[self.index] = location.to_string();
        tracing::debug!(location, "history replace");
        self.current()
    }

    /// Step back. Returns `None` (and stays put) at the oldest entry.
    pub fn back(&mut self) -> Option<Resolved<V>> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.current()
    }

    /// Step forward. Returns `None` (and stays put) at the newest entry.
    pub fn forward(&mut self) -> Option<Resolved<V>> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of entries in the stack
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
