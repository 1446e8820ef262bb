//! Primitive `operator + version` predicates

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::options::Options;
use crate::patterns;
use crate::range::Range;
use crate::version::{Version, VersionError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComparatorError {
    #[error("Invalid comparator: {0}")]
    InvalidComparator(String),
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Comparison operators for primitive comparators. `Equal` is spelled as
/// the empty string in canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    LessThan,
    LessThanOrEqual,
    Equal,
    GreaterThanOrEqual,
    GreaterThan,
}

impl Operator {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "" | "=" => Some(Operator::Equal),
            "<" => Some(Operator::LessThan),
            "<=" => Some(Operator::LessThanOrEqual),
            ">=" => Some(Operator::GreaterThanOrEqual),
            ">" => Some(Operator::GreaterThan),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "",
            Operator::GreaterThanOrEqual => ">=",
            Operator::GreaterThan => ">",
        }
    }

    /// Whether an ordering outcome (version vs operand) satisfies this
    /// operator.
    pub fn test(self, ordering: Ordering) -> bool {
        match self {
            Operator::LessThan => ordering == Ordering::Less,
            Operator::LessThanOrEqual => ordering != Ordering::Greater,
            Operator::Equal => ordering == Ordering::Equal,
            Operator::GreaterThanOrEqual => ordering != Ordering::Less,
            Operator::GreaterThan => ordering == Ordering::Greater,
        }
    }

    pub fn is_gt_family(self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::GreaterThanOrEqual)
    }

    pub fn is_lt_family(self) -> bool {
        matches!(self, Operator::LessThan | Operator::LessThanOrEqual)
    }

    fn is_inclusive_bound(self) -> bool {
        matches!(self, Operator::LessThanOrEqual | Operator::GreaterThanOrEqual)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The right-hand side of a comparator: a concrete version, or the
/// match-everything sentinel produced by a bare operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Any,
    Exact(Version),
}

/// A single `op version` predicate.
#[derive(Debug, Clone)]
pub struct Comparator {
    operator: Operator,
    operand: Operand,
    value: String,
    options: Options,
}

impl Comparator {
    /// Parse one comparator (`>=1.2.3`, `1.2.3`, `>`, the empty string).
    pub fn parse(input: &str, options: Options) -> Result<Self, ComparatorError> {
        let text = input.split_whitespace().collect::<Vec<_>>().join(" ");
        let caps = patterns::comparator_re(options.loose)
            .captures(&text)
            .ok_or_else(|| ComparatorError::InvalidComparator(input.to_string()))?;
        let operator = Operator::parse(caps.get(1).map_or("", |m| m.as_str()))
            .ok_or_else(|| ComparatorError::InvalidComparator(input.to_string()))?;
        let operand = match caps.get(2) {
            Some(m) => Operand::Exact(Version::parse(m.as_str(), options)?),
            None => Operand::Any,
        };
        Ok(Comparator::from_parts(operator, operand, options))
    }

    pub(crate) fn from_parts(operator: Operator, operand: Operand, options: Options) -> Self {
        let value = match &operand {
            Operand::Any => String::new(),
            Operand::Exact(version) => format!("{}{}", operator, version.format()),
        };
        Comparator {
            operator,
            operand,
            value,
            options,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// The operand version, `None` for the match-everything sentinel.
    pub fn version(&self) -> Option<&Version> {
        match &self.operand {
            Operand::Any => None,
            Operand::Exact(version) => Some(version),
        }
    }

    /// Canonical `op+version` text, empty for the sentinel.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// True when no version at all can satisfy this comparator.
    pub(crate) fn is_null_set(&self) -> bool {
        self.value == "<0.0.0-0"
    }

    /// True when every version satisfies this comparator: the sentinel, or
    /// the explicit floor the wildcard forms desugar to.
    pub(crate) fn is_match_all(&self, include_prerelease: bool) -> bool {
        match &self.operand {
            Operand::Any => true,
            Operand::Exact(version) => {
                self.operator == Operator::GreaterThanOrEqual
                    && version.major() == 0
                    && version.minor() == 0
                    && version.patch() == 0
                    && if include_prerelease {
                        matches!(version.prerelease(), [crate::identifier::Identifier::Numeric(0)])
                    } else {
                        version.prerelease().is_empty()
                    }
            }
        }
    }

    /// Test a version against this comparator alone. The pre-release gate
    /// lives at range level, not here.
    pub fn test(&self, version: &Version) -> bool {
        match &self.operand {
            Operand::Any => true,
            Operand::Exact(target) => self.operator.test(version.compare(target)),
        }
    }

    /// Whether some version satisfies both comparators.
    pub fn intersects(&self, other: &Comparator, options: Options) -> bool {
        if matches!(self.operand, Operand::Any) || matches!(other.operand, Operand::Any) {
            return true;
        }
        if self.operator == Operator::Equal {
            // an exact pin intersects whatever admits its version
            return match (self.version(), Range::parse(&other.value, options)) {
                (Some(version), Ok(range)) => range.test(version),
                _ => false,
            };
        }
        if other.operator == Operator::Equal {
            return match (other.version(), Range::parse(&self.value, options)) {
                (Some(version), Ok(range)) => range.test(version),
                _ => false,
            };
        }

        // comparators that admit nothing intersect nothing
        if options.include_prerelease {
            if self.value == "<0.0.0-0" || other.value == "<0.0.0-0" {
                return false;
            }
        } else if self.value.starts_with("<0.0.0") || other.value.starts_with("<0.0.0") {
            return false;
        }

        let (ours, theirs) = match (self.version(), other.version()) {
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };
        if self.operator.is_gt_family() && other.operator.is_gt_family() {
            return true;
        }
        if self.operator.is_lt_family() && other.operator.is_lt_family() {
            return true;
        }
        let ordering = ours.compare(theirs);
        if ordering == Ordering::Equal
            && self.operator.is_inclusive_bound()
            && other.operator.is_inclusive_bound()
        {
            return true;
        }
        if ordering == Ordering::Less && self.operator.is_gt_family() && other.operator.is_lt_family()
        {
            return true;
        }
        if ordering == Ordering::Greater
            && self.operator.is_lt_family()
            && other.operator.is_gt_family()
        {
            return true;
        }
        false
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Comparator {
    type Err = ComparatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Comparator::parse(s, Options::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(text: &str) -> Comparator {
        Comparator::parse(text, Options::default()).unwrap()
    }

    fn v(text: &str) -> Version {
        Version::parse(text, Options::default()).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(c(">=1.2.3").operator(), Operator::GreaterThanOrEqual);
        assert_eq!(c(">=1.2.3").value(), ">=1.2.3");
        // `=` normalizes away
        assert_eq!(c("=1.2.3").operator(), Operator::Equal);
        assert_eq!(c("=1.2.3").value(), "1.2.3");
        assert_eq!(c("1.2.3").value(), "1.2.3");
        // bare operators and the empty string match everything
        assert_eq!(c(">").operand(), &Operand::Any);
        assert_eq!(c("").operand(), &Operand::Any);
        assert_eq!(c("").value(), "");
        assert!(Comparator::parse(">=1.2", Options::default()).is_err());
        assert!(Comparator::parse("blerg", Options::default()).is_err());
    }

    #[test]
    fn test_test() {
        assert!(c(">=1.2.3").test(&v("1.2.3")));
        assert!(c(">=1.2.3").test(&v("2.0.0")));
        assert!(!c(">=1.2.3").test(&v("1.2.2")));
        assert!(c("<2.0.0").test(&v("1.9.9")));
        assert!(!c("<2.0.0").test(&v("2.0.0")));
        assert!(c("1.2.3").test(&v("1.2.3")));
        assert!(!c("1.2.3").test(&v("1.2.4")));
        assert!(c(">").test(&v("0.0.0")));
        // pre-releases order below their release at comparator level
        assert!(c("<2.0.0").test(&v("2.0.0-alpha")));
        assert!(c(">=1.2.3-alpha").test(&v("1.2.3-beta")));
    }

    #[test]
    fn test_intersects_same_direction() {
        assert!(c(">1.2.3").intersects(&c(">=0.0.1"), Options::default()));
        assert!(c("<2.0.0").intersects(&c("<3.0.0"), Options::default()));
    }

    #[test]
    fn test_intersects_opposite_directions() {
        assert!(c(">=1.0.0").intersects(&c("<2.0.0"), Options::default()));
        assert!(!c(">=2.0.0").intersects(&c("<1.0.0"), Options::default()));
        assert!(c(">=1.2.3").intersects(&c("<=1.2.3"), Options::default()));
        assert!(!c(">1.2.3").intersects(&c("<=1.2.3"), Options::default()));
        assert!(!c(">=1.2.3").intersects(&c("<1.2.3"), Options::default()));
    }

    #[test]
    fn test_intersects_pins_and_any() {
        assert!(c(">").intersects(&c("<0.0.0-0"), Options::default()));
        assert!(c("1.2.3").intersects(&c(">=1.0.0"), Options::default()));
        assert!(!c("1.2.3").intersects(&c("<1.0.0"), Options::default()));
        assert!(c("1.2.3").intersects(&c("1.2.3"), Options::default()));
        assert!(!c("1.2.3").intersects(&c("1.2.4"), Options::default()));
    }

    #[test]
    fn test_intersects_empty_comparators() {
        assert!(!c(">=0.0.0").intersects(&c("<0.0.0"), Options::default()));
        assert!(!c("<0.0.0-0").intersects(&c(">=0.0.0"), Options::default()));
        let include_pre = Options::new().with_include_prerelease(true);
        assert!(!c("<0.0.0-0").intersects(&c(">=0.0.0"), include_pre));
    }
}
