//! Completed calculations, newest first.

use std::collections::VecDeque;
use std::fmt;

pub const DEFAULT_CAPACITY: usize = 10;

const PRINT_TITLE: &str = "CalcVerse History";
const EMPTY_PLACEHOLDER: &str = "No history yet";

/// One finished calculation as shown to the user, e.g. `"12+3 = 15"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry(String);

impl HistoryEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bounded log. Recording past capacity evicts the oldest entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryLog {
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&mut self, entry: impl Into<String>) {
        self.entries.push_front(HistoryEntry::new(entry));
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Plain-text page for printing.
    pub fn printable(&self) -> String {
        let mut page = format!("{PRINT_TITLE}\n\n");
        if self.is_empty() {
            page.push_str(EMPTY_PLACEHOLDER);
            page.push('\n');
        }
        for entry in self.iter() {
            page.push_str(entry.as_str());
            page.push('\n');
        }
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(log: &HistoryLog) -> Vec<&str> {
        log.iter().map(HistoryEntry::as_str).collect()
    }

    #[test]
    fn newest_first() {
        let mut log = HistoryLog::default();
        log.record("1+1 = 2");
        log.record("2*3 = 6");
        assert_eq!(texts(&log), ["2*3 = 6", "1+1 = 2"]);
        assert_eq!(log.newest().map(HistoryEntry::as_str), Some("2*3 = 6"));
    }

    #[test]
    fn eleventh_entry_evicts_oldest() {
        let mut log = HistoryLog::default();
        for i in 1..=11 {
            log.record(format!("entry {i}"));
        }
        assert_eq!(log.len(), DEFAULT_CAPACITY);
        assert_eq!(log.newest().map(HistoryEntry::as_str), Some("entry 11"));
        assert!(!texts(&log).contains(&"entry 1"));
        assert_eq!(texts(&log).last(), Some(&"entry 2"));
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut log = HistoryLog::new(3);
        for i in 0..50 {
            log.record(i.to_string());
            assert!(log.len() <= 3);
        }
        assert_eq!(texts(&log), ["49", "48", "47"]);
    }

    #[test]
    fn record_then_clear_is_empty() {
        let mut log = HistoryLog::default();
        log.clear();
        assert!(log.is_empty());
        for i in 0..7 {
            log.record(i.to_string());
        }
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.newest(), None);
    }

    #[test]
    fn zero_capacity_is_raised() {
        let mut log = HistoryLog::new(0);
        log.record("a");
        log.record("b");
        assert_eq!(texts(&log), ["b"]);
    }

    #[test]
    fn printable_page() {
        let mut log = HistoryLog::default();
        assert_eq!(log.printable(), "CalcVerse History\n\nNo history yet\n");
        log.record("5! = 120");
        log.record("1/4 = 0.25");
        assert_eq!(
            log.printable(),
            "CalcVerse History\n\n1/4 = 0.25\n5! = 120\n"
        );
    }
}
