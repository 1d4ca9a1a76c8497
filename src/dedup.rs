//! Deduplication and duplicate counting
//!
//! Both operate on trimmed text and ignore blank lines.

use ahash::RandomState;
use hashbrown::{HashMap, HashSet};

use crate::line::Line;

/// Statistics for a deduplication pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
    /// Non-blank lines looked at
    pub total_processed: u64,
    /// Distinct lines kept
    pub unique_count: u64,
    /// Lines dropped as repeats
    pub duplicate_count: u64,
}

/// In-memory set of trimmed lines
#[derive(Debug, Default)]
pub struct MemoryDeduplicator {
    set: HashSet<String, RandomState>,
    stats: DedupStats,
}

impl MemoryDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            set: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
            stats: DedupStats::default(),
        }
    }

    /// Insert a trimmed line; returns true if it was not seen before
    pub fn insert(&mut self, item: &str) -> bool {
        self.stats.total_processed += 1;
        if self.set.contains(item) {
            self.stats.duplicate_count += 1;
            return false;
        }
        self.set.insert(item.to_string());
        self.stats.unique_count += 1;
        true
    }

    pub fn stats(&self) -> DedupStats {
        self.stats
    }

    /// Consume the set, returning its lines sorted ascending
    pub fn into_sorted(self) -> Vec<Line> {
        let mut lines: Vec<Line> = self.set.into_iter().map(Line::from).collect();
        lines.sort_unstable();
        lines
    }
}

/// Distinct trimmed, non-blank lines sorted ascending
pub fn unique_sorted(lines: &[Line]) -> Vec<Line> {
    let mut dedup = MemoryDeduplicator::with_capacity(lines.len());
    for line in lines.iter().filter(|l| !l.is_blank()) {
        dedup.insert(line.trimmed());
    }
    log::debug!("dedup: {:?}", dedup.stats());
    dedup.into_sorted()
}

/// Occurrence counts of trimmed, non-blank lines
#[derive(Debug, Default)]
pub struct LineCounter {
    counts: HashMap<String, usize, RandomState>,
}

impl LineCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, line: &Line) {
        let trimmed = line.trimmed();
        if trimmed.is_empty() {
            return;
        }
        match self.counts.get_mut(trimmed) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(trimmed.to_string(), 1);
            }
        }
    }

    /// Lines seen more than once with their counts, sorted by line text
    pub fn duplicates(&self) -> Vec<(&str, usize)> {
        let mut dups: Vec<(&str, usize)> = self
            .counts
            .iter()
            .filter(|&(_, &count)| count > 1)
            .map(|(line, &count)| (line.as_str(), count))
            .collect();
        dups.sort_unstable_by(|a, b| a.0.cmp(b.0));
        dups
    }
}

impl<'a> FromIterator<&'a Line> for LineCounter {
    fn from_iter<I: IntoIterator<Item = &'a Line>>(iter: I) -> Self {
        let mut counter = Self::new();
        for line in iter {
            counter.add(line);
        }
        counter
    }
}

/// Format one entry of the duplicate report
pub fn format_duplicate(line: &str, count: usize) -> String {
    format!("{} (Count: {})", line, count)
}
