//! Lowest version admitted by a range

use std::cmp::Ordering;

use crate::comparator::{Operand, Operator};
use crate::identifier::Identifier;
use crate::version::Version;

use super::Range;

impl Range {
    /// The lowest version that satisfies this range, `None` when the range
    /// is unsatisfiable.
    pub fn min_version(&self) -> Option<Version> {
        let zero = Version::from_parts(0, 0, 0, Vec::new(), self.options);
        if self.test(&zero) {
            return Some(zero);
        }
        let zero_pre = Version::from_parts(0, 0, 0, vec![Identifier::Numeric(0)], self.options);
        if self.test(&zero_pre) {
            return Some(zero_pre);
        }

        let mut minimum: Option<Version> = None;
        for comparators in &self.set {
            let mut alternative_min: Option<Version> = None;
            for comparator in comparators {
                let Operand::Exact(target) = comparator.operand() else {
                    continue;
                };
                let candidate = match comparator.operator() {
                    Operator::GreaterThan => {
                        // the next possible release above an exclusive bound
                        if target.is_prerelease() {
                            let mut prerelease = target.prerelease().to_vec();
                            prerelease.push(Identifier::Numeric(0));
                            Version::from_parts(
                                target.major(),
                                target.minor(),
                                target.patch(),
                                prerelease,
                                self.options,
                            )
                        } else {
                            Version::from_parts(
                                target.major(),
                                target.minor(),
                                target.patch() + 1,
                                Vec::new(),
                                self.options,
                            )
                        }
                    }
                    Operator::Equal | Operator::GreaterThanOrEqual => target.clone(),
                    Operator::LessThan | Operator::LessThanOrEqual => continue,
                };
                let lifted = match &alternative_min {
                    Some(current) => candidate.compare(current) == Ordering::Greater,
                    None => true,
                };
                if lifted {
                    alternative_min = Some(candidate);
                }
            }
            if let Some(candidate) = alternative_min {
                let lowered = match &minimum {
                    Some(current) => current.compare(&candidate) == Ordering::Greater,
                    None => true,
                };
                if lowered {
                    minimum = Some(candidate);
                }
            }
        }
        minimum.filter(|candidate| self.test(candidate))
    }
}
