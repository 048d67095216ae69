//! Bounded command history with an up/down recall cursor.

/// Default number of lines retained.
pub const DEFAULT_LIMIT: usize = 100;

/// Recorded command lines, oldest first.
///
/// The cursor sits one past the newest entry after every push, so the first
/// `previous()` yields the most recent line.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    limit: usize,
    cursor: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
            cursor: 0,
        }
    }

    /// Record a line. Consecutive duplicates collapse into one entry.
    pub fn push(&mut self, line: &str) {
        if self.entries.last().is_none_or(|last| last != line) {
            self.entries.push(line.to_string());
            if self.entries.len() > self.limit {
                let excess = self.entries.len() - self.limit;
                self.entries.drain(..excess);
            }
        }
        self.cursor = self.entries.len();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Move the cursor one entry back. At the oldest entry returns `None`.
    pub fn previous(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Move the cursor one entry forward. Stepping past the newest entry
    /// returns an empty line; with the cursor already there, `None`.
    pub fn next(&mut self) -> Option<&str> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries.get(self.cursor).map_or("", String::as_str))
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}
