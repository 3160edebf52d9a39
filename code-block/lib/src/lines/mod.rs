//! Line sets for highlight specifications.
//!
//! A highlight specification (`"3,5,9..12"`) names the lines of a panel that
//! stay at full strength; every other line is dimmed. Parsing is memoized per
//! distinct specification string by [`LineSetCache`].

mod cache;
mod parser;

pub use cache::{DEFAULT_CAPACITY as DEFAULT_CACHE_CAPACITY, LineSetCache};
pub use parser::MAX_RANGE_SPAN;

use std::collections::BTreeSet;

/// The set of line numbers named by a highlight specification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSet(BTreeSet<usize>);

impl LineSet {
    /// Creates an empty line set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a highlight specification.
    ///
    /// Never fails: malformed entries are skipped.
    ///
    /// ## Examples
    ///
    /// ```
    /// use code_block::LineSet;
    ///
    /// let set = LineSet::parse("5..7");
    /// assert!(set.contains(5) && set.contains(6) && set.contains(7));
    /// assert!(!set.contains(8));
    /// ```
    pub fn parse(spec: &str) -> Self {
        parser::parse_highlight_spec(spec)
    }

    /// Adds a line number.
    pub fn insert(&mut self, line: usize) {
        self.0.insert(line);
    }

    /// Negative values can never match a rendered line and are dropped.
    fn insert_signed(&mut self, line: i64) {
        if let Ok(line) = usize::try_from(line) {
            self.0.insert(line);
        }
    }

    /// Checks if a line number is in the set.
    pub fn contains(&self, line: usize) -> bool {
        self.0.contains(&line)
    }

    /// Returns the number of lines in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the line numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for LineSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
