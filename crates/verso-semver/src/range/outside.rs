//! Tests for versions escaping a range on one side

use std::cmp::Ordering;

use crate::comparator::{Operand, Operator};
use crate::version::Version;

use super::Range;

/// Which side of the range a version may escape on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    High,
    Low,
}

impl Range {
    /// True when `version` lies beyond every alternative on the given side:
    /// above every alternative for `Side::High`, below for `Side::Low`.
    pub fn outside(&self, version: &Version, side: Side) -> bool {
        if self.test(version) {
            return false;
        }
        // edge operators as seen from the escaping side
        let (edge, edge_inclusive) = match side {
            Side::High => (Operator::GreaterThan, Operator::GreaterThanOrEqual),
            Side::Low => (Operator::LessThan, Operator::LessThanOrEqual),
        };
        let past = |a: &Version, b: &Version| match side {
            Side::High => a.compare(b) == Ordering::Greater,
            Side::Low => a.compare(b) == Ordering::Less,
        };
        let short = |a: &Version, b: &Version| match side {
            Side::High => a.compare(b) == Ordering::Less,
            Side::Low => a.compare(b) == Ordering::Greater,
        };
        let short_or_at = |a: &Version, b: &Version| match side {
            Side::High => a.compare(b) != Ordering::Greater,
            Side::Low => a.compare(b) != Ordering::Less,
        };

        for comparators in &self.set {
            let resolved: Vec<(Operator, Version)> = comparators
                .iter()
                .map(|c| match c.operand() {
                    Operand::Exact(target) => (c.operator(), target.clone()),
                    Operand::Any => (
                        Operator::GreaterThanOrEqual,
                        Version::from_parts(0, 0, 0, Vec::new(), self.options),
                    ),
                })
                .collect();

            let mut extreme = &resolved[0];
            let mut near = &resolved[0];
            for entry in &resolved {
                if past(&entry.1, &extreme.1) {
                    extreme = entry;
                } else if short(&entry.1, &near.1) {
                    near = entry;
                }
            }

            // the far edge still reaches past the version
            if extreme.0 == edge || extreme.0 == edge_inclusive {
                return false;
            }
            // the near edge shows the version has not cleared the range
            if (near.0 == Operator::Equal || near.0 == edge) && short_or_at(version, &near.1) {
                return false;
            }
            if near.0 == edge_inclusive && short(version, &near.1) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::options::Options;

    use super::*;

    fn outside(range: &str, version: &str, side: Side) -> bool {
        let range = Range::parse(range, Options::default()).unwrap();
        let version = Version::parse(version, Options::default()).unwrap();
        range.outside(&version, side)
    }

    #[test]
    fn test_outside_high() {
        assert!(outside("~1.2.2", "1.3.0", Side::High));
        assert!(outside("~0.6.1-1", "0.7.1-1", Side::High));
        assert!(outside("1.0.0 - 2.0.0", "2.0.1", Side::High));
        assert!(outside("1.0.0", "1.0.1", Side::High));
        assert!(outside("<=2.0.0", "3.0.0", Side::High));
        assert!(outside("=0.7.x", "0.8.0", Side::High));

        assert!(!outside("~1.2.2", "1.2.9", Side::High));
        assert!(!outside("~1.2.2", "1.2.1", Side::High));
        assert!(!outside("1.0.0 - 2.0.0", "1.5.0", Side::High));
        assert!(!outside(">=1.0.0", "2.0.0", Side::High));
        assert!(!outside("*", "1.2.3", Side::High));
    }

    #[test]
    fn test_outside_low() {
        assert!(outside("~1.2.2", "1.0.0", Side::Low));
        assert!(outside("1.0.0 - 2.0.0", "0.9.9", Side::Low));
        assert!(outside(">=2.0.0", "1.9.9", Side::Low));
        assert!(outside("=0.7.x", "0.6.9", Side::Low));

        assert!(!outside("~1.2.2", "1.2.9", Side::Low));
        assert!(!outside("~1.2.2", "1.3.0", Side::Low));
        assert!(!outside("<=2.0.0", "1.0.0", Side::Low));
        assert!(!outside("*", "0.0.1", Side::Low));
    }

    #[test]
    fn test_outside_disjunctions() {
        // every branch has to be cleared
        assert!(outside("1.x || 2.x", "3.0.0", Side::High));
        assert!(!outside("1.x || 3.x", "2.5.0", Side::High));
        assert!(outside("2.x || 3.x", "1.0.0", Side::Low));
        assert!(!outside("1.x || 3.x", "2.5.0", Side::Low));
    }
}
