//! Parser for highlight specifications.
//!
//! Parses strings like:
//! - `14`
//! - `14,15`
//! - `14..19` / `14-19` (inclusive)
//! - `14...19` (exclusive of 19)

use lazy_static::lazy_static;
use regex::Regex;

use super::LineSet;

/// Widest range a single entry may expand to.
pub const MAX_RANGE_SPAN: u64 = 100_000;

lazy_static! {
    /// A lone, possibly negative, integer.
    static ref SINGLE: Regex = Regex::new(r"^-?\d+$").unwrap();

    /// `<lhs><sep><rhs>` where the separator picks inclusive or exclusive.
    /// Exclusive separators are listed first so `...` is not read as `..`.
    static ref RANGE: Regex = Regex::new(
        r"^(-?\d+)\s*(\.\.\.|\x{2026}|\x{22EF}|\.\.|\x{2025}|-)\s*(-?\d+)$"
    ).unwrap();
}

/// Parses a highlight specification into the set of line numbers it names.
///
/// Malformed entries are skipped rather than rejected, so the result is
/// always a best-effort set.
///
/// ## Examples
///
/// ```
/// use code_block::LineSet;
///
/// let set = LineSet::parse("3,5,9..12");
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 5, 9, 10, 11, 12]);
/// ```
pub(super) fn parse_highlight_spec(spec: &str) -> LineSet {
    let mut lines = LineSet::new();

    for entry in spec.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        if SINGLE.is_match(entry) {
            match entry.parse::<i64>() {
                Ok(line) => lines.insert_signed(line),
                Err(_) => tracing::debug!(entry = entry, "Skipping out-of-range line number"),
            }
            continue;
        }

        let Some(captures) = RANGE.captures(entry) else {
            tracing::debug!(entry = entry, "Skipping malformed highlight entry");
            continue;
        };

        let (Ok(start), Ok(end)) = (captures[1].parse::<i64>(), captures[3].parse::<i64>()) else {
            tracing::debug!(entry = entry, "Skipping out-of-range highlight bounds");
            continue;
        };
        let inclusive = matches!(&captures[2], ".." | "-" | "\u{2025}");

        if start.abs_diff(end) > MAX_RANGE_SPAN {
            tracing::warn!(
                entry = entry,
                span = start.abs_diff(end),
                max = MAX_RANGE_SPAN,
                "Skipping oversized highlight range"
            );
            continue;
        }

        expand_range(start, end, inclusive, &mut lines);
    }

    lines
}

/// Pushes every value from `start` towards `end`, ascending or descending.
fn expand_range(start: i64, end: i64, inclusive: bool, lines: &mut LineSet) {
    let step = if start <= end { 1 } else { -1 };
    let stop = if inclusive { end + step } else { end };

    let mut current = start;
    while current != stop {
        lines.insert_signed(current);
        current += step;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: parsing never panics on any input
        #[test]
        fn parse_never_panics(s in ".*") {
            let _ = parse_highlight_spec(&s);
        }

        /// Property: a comma-joined list of numbers yields exactly those numbers
        #[test]
        fn listed_numbers_are_present(lines in proptest::collection::vec(1usize..500, 0..20)) {
            let spec = lines.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(",");
            let set = parse_highlight_spec(&spec);
            for line in &lines {
                prop_assert!(set.contains(*line));
            }
            prop_assert!(set.len() <= lines.len());
        }

        /// Property: an inclusive range covers exactly its bounds
        #[test]
        fn inclusive_range_covers_bounds(start in 1usize..1000, len in 0usize..100) {
            let end = start + len;
            let set = parse_highlight_spec(&format!("{start}..{end}"));
            prop_assert_eq!(set.len(), len + 1);
            prop_assert!(set.contains(start));
            prop_assert!(set.contains(end));
            prop_assert!(!set.contains(end + 1));
        }
    }
}
