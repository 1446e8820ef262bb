//! Pre-release identifier type and ordering

use std::cmp::Ordering;
use std::fmt;

use crate::patterns::MAX_SAFE_INTEGER;

/// One dot-separated pre-release identifier.
///
/// Digits-only fields that fit under the safe-integer cap become `Numeric`
/// and compare numerically; everything else compares byte-wise. A numeric
/// identifier always orders below an alphanumeric one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

impl Identifier {
    pub fn parse(text: &str) -> Self {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(value) = text.parse::<u64>() {
                if value <= MAX_SAFE_INTEGER {
                    return Identifier::Numeric(value);
                }
            }
        }
        Identifier::AlphaNumeric(text.to_string())
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Numeric(_))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            (Identifier::Numeric(_), Identifier::AlphaNumeric(_)) => Ordering::Less,
            (Identifier::AlphaNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::AlphaNumeric(a), Identifier::AlphaNumeric(b)) => a.as_str().cmp(b.as_str()),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(value) => write!(f, "{}", value),
            Identifier::AlphaNumeric(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!(Identifier::parse("0"), Identifier::Numeric(0));
        assert_eq!(Identifier::parse("11"), Identifier::Numeric(11));
        assert_eq!(Identifier::parse("beta"), Identifier::AlphaNumeric("beta".to_string()));
        assert_eq!(Identifier::parse("beta2"), Identifier::AlphaNumeric("beta2".to_string()));
        // wider than the safe-integer cap stays opaque
        assert_eq!(
            Identifier::parse("99999999999999999999"),
            Identifier::AlphaNumeric("99999999999999999999".to_string())
        );
    }

    #[test]
    fn test_ordering() {
        let num = |n| Identifier::Numeric(n);
        let alpha = |s: &str| Identifier::AlphaNumeric(s.to_string());

        assert_eq!(num(2).cmp(&num(11)), Ordering::Less);
        assert_eq!(num(99).cmp(&alpha("alpha")), Ordering::Less);
        assert_eq!(alpha("alpha").cmp(&num(0)), Ordering::Greater);
        assert_eq!(alpha("alpha").cmp(&alpha("beta")), Ordering::Less);
        assert_eq!(alpha("beta").cmp(&alpha("beta")), Ordering::Equal);
    }
}
