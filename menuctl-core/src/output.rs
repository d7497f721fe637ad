//! Append-only transcript shown in the output panel

use std::collections::VecDeque;

/// Ordered log lines, append-only except for [`OutputLog::clear`]
///
/// Unbounded by default. With a line cap the log behaves as a ring buffer
/// and drops the oldest lines first.
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    lines: VecDeque<String>,
    max_lines: Option<usize>,
    /// Lines ever appended; survives eviction and `clear`
    appended: usize,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log that keeps at most `max_lines` lines (a cap of 0 means unbounded)
    pub fn with_max_lines(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: (max_lines > 0).then_some(max_lines),
            appended: 0,
        }
    }

    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        self.appended += 1;
        self.enforce_cap();
    }

    /// Append all of `lines` in order as one operation
    pub fn append_many<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.lines.len();
        self.lines.extend(lines.into_iter().map(Into::into));
        self.appended += self.lines.len() - before;
        self.enforce_cap();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Running count of appended lines, including any since evicted or cleared
    pub fn total_appended(&self) -> usize {
        self.appended
    }

    /// Copy of the lines, mostly useful in tests
    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    /// Window of at most `height` lines ending `offset` lines before the tail
    pub fn window(&self, height: usize, offset: usize) -> impl Iterator<Item = &str> {
        let end = self.lines.len().saturating_sub(offset);
        let start = end.saturating_sub(height);
        self.lines.range(start..end).map(String::as_str)
    }

    fn enforce_cap(&mut self) {
        if let Some(max) = self.max_lines {
            while self.lines.len() > max {
                self.lines.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut log = OutputLog::new();
        log.append("$ ls");
        log.append_many(["a", "b", "a"]);

        assert_eq!(log.lines(), vec!["$ ls", "a", "b", "a"]);
    }

    #[test]
    fn test_clear_truncates() {
        let mut log = OutputLog::new();
        log.append_many(vec!["one".to_string(), "two".to_string()]);
        log.clear();

        assert!(log.is_empty());
        log.append("three");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut log = OutputLog::with_max_lines(3);
        log.append_many(["1", "2", "3", "4", "5"]);

        assert_eq!(log.lines(), vec!["3", "4", "5"]);
        assert_eq!(log.total_appended(), 5);
    }

    #[test]
    fn test_total_appended_counts_through_clear() {
        let mut log = OutputLog::with_max_lines(2);
        log.append("a");
        log.append_many(["b", "c"]);
        log.clear();
        log.append("d");

        assert_eq!(log.len(), 1);
        assert_eq!(log.total_appended(), 4);
    }

    #[test]
    fn test_zero_cap_is_unbounded() {
        let mut log = OutputLog::with_max_lines(0);
        log.append_many((0..1000).map(|n| n.to_string()));
        assert_eq!(log.len(), 1000);
    }

    #[test]
    fn test_window() {
        let mut log = OutputLog::new();
        log.append_many(["1", "2", "3", "4", "5"]);

        let tail: Vec<&str> = log.window(2, 0).collect();
        assert_eq!(tail, vec!["4", "5"]);

        let scrolled: Vec<&str> = log.window(2, 2).collect();
        assert_eq!(scrolled, vec!["2", "3"]);

        let past_top: Vec<&str> = log.window(3, 10).collect();
        assert!(past_top.is_empty());
    }
}
