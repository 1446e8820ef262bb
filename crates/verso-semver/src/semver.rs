//! High-level facade over the version and range engines

use std::cmp::Ordering;

use crate::comparator::Operator;
use crate::identifier::Identifier;
use crate::options::Options;
use crate::patterns;
use crate::range::{Range, Side};
use crate::version::{IdentifierBase, ReleaseType, Version};

/// Facade for semantic versioning operations.
///
/// Predicates swallow parse failures into `false`/`None`; use the
/// `Version`/`Range` constructors directly when the error matters.
pub struct Semver;

impl Semver {
    /// Parse a version string, `None` when it does not parse.
    pub fn parse(version: &str, options: Options) -> Option<Version> {
        Version::parse(version, options).ok()
    }

    /// Canonical `major.minor.patch[-pre]` form of a valid version.
    pub fn valid(version: &str, options: Options) -> Option<String> {
        Self::parse(version, options).map(|v| v.format())
    }

    /// Like `valid`, but forgives leading `=`/`v` junk.
    pub fn clean(version: &str, options: Options) -> Option<String> {
        let trimmed = version.trim().trim_start_matches(['=', 'v']);
        Self::parse(trimmed, options).map(|v| v.format())
    }

    pub fn compare(a: &str, b: &str, options: Options) -> Option<Ordering> {
        let a = Version::parse(a, options).ok()?;
        let b = Version::parse(b, options).ok()?;
        Some(a.compare(&b))
    }

    pub fn rcompare(a: &str, b: &str, options: Options) -> Option<Ordering> {
        Self::compare(a, b, options).map(Ordering::reverse)
    }

    pub fn compare_loose(a: &str, b: &str) -> Option<Ordering> {
        Self::compare(a, b, Options::loose())
    }

    /// Ordinal comparison with build metadata as the final tiebreak.
    pub fn compare_build(a: &str, b: &str, options: Options) -> Option<Ordering> {
        let a = Version::parse(a, options).ok()?;
        let b = Version::parse(b, options).ok()?;
        Some(a.compare(&b).then_with(|| a.compare_build(&b)))
    }

    pub fn eq(a: &str, b: &str, options: Options) -> bool {
        Self::compare(a, b, options) == Some(Ordering::Equal)
    }

    pub fn neq(a: &str, b: &str, options: Options) -> bool {
        matches!(
            Self::compare(a, b, options),
            Some(Ordering::Less) | Some(Ordering::Greater)
        )
    }

    pub fn gt(a: &str, b: &str, options: Options) -> bool {
        Self::compare(a, b, options) == Some(Ordering::Greater)
    }

    pub fn gte(a: &str, b: &str, options: Options) -> bool {
        matches!(
            Self::compare(a, b, options),
            Some(Ordering::Greater) | Some(Ordering::Equal)
        )
    }

    pub fn lt(a: &str, b: &str, options: Options) -> bool {
        Self::compare(a, b, options) == Some(Ordering::Less)
    }

    pub fn lte(a: &str, b: &str, options: Options) -> bool {
        matches!(
            Self::compare(a, b, options),
            Some(Ordering::Less) | Some(Ordering::Equal)
        )
    }

    /// Apply an operator the way a comparator would.
    pub fn cmp(a: &str, operator: Operator, b: &str, options: Options) -> bool {
        Self::compare(a, b, options).is_some_and(|ordering| operator.test(ordering))
    }

    /// Sort versions ascending; unparseable entries are dropped.
    pub fn sort(versions: &[&str], options: Options) -> Vec<String> {
        Self::usort(versions, options, true)
    }

    /// Sort versions descending.
    pub fn rsort(versions: &[&str], options: Options) -> Vec<String> {
        Self::usort(versions, options, false)
    }

    fn usort(versions: &[&str], options: Options, ascending: bool) -> Vec<String> {
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, raw)| Version::parse(raw, options).ok().map(|v| (v, i)))
            .collect();
        parsed.sort_by(|(a, _), (b, _)| {
            let ordering = a.compare(b).then_with(|| a.compare_build(b));
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }

    /// The release kind separating two versions, `None` when they compare
    /// equal.
    pub fn diff(a: &str, b: &str, options: Options) -> Option<ReleaseType> {
        let v1 = Version::parse(a, options).ok()?;
        let v2 = Version::parse(b, options).ok()?;
        let comparison = v1.compare(&v2);
        if comparison == Ordering::Equal {
            return None;
        }
        let (high, low) = if comparison == Ordering::Greater {
            (&v1, &v2)
        } else {
            (&v2, &v1)
        };
        let high_pre = high.is_prerelease();
        if low.is_prerelease() && !high_pre {
            // moving off a pre-release counts as the release it settles on
            if low.patch() == 0 && low.minor() == 0 {
                return Some(ReleaseType::Major);
            }
            if low.compare_main(high) == Ordering::Equal {
                if low.minor() != 0 && low.patch() == 0 {
                    return Some(ReleaseType::Minor);
                }
                return Some(ReleaseType::Patch);
            }
        }
        if v1.major() != v2.major() {
            return Some(if high_pre {
                ReleaseType::Premajor
            } else {
                ReleaseType::Major
            });
        }
        if v1.minor() != v2.minor() {
            return Some(if high_pre {
                ReleaseType::Preminor
            } else {
                ReleaseType::Minor
            });
        }
        if v1.patch() != v2.patch() {
            return Some(if high_pre {
                ReleaseType::Prepatch
            } else {
                ReleaseType::Patch
            });
        }
        Some(ReleaseType::Prerelease)
    }

    pub fn major(version: &str, options: Options) -> Option<u64> {
        Self::parse(version, options).map(|v| v.major())
    }

    pub fn minor(version: &str, options: Options) -> Option<u64> {
        Self::parse(version, options).map(|v| v.minor())
    }

    pub fn patch(version: &str, options: Options) -> Option<u64> {
        Self::parse(version, options).map(|v| v.patch())
    }

    /// The pre-release identifiers, `None` when the version has none.
    pub fn prerelease(version: &str, options: Options) -> Option<Vec<Identifier>> {
        let parsed = Self::parse(version, options)?;
        if parsed.prerelease().is_empty() {
            None
        } else {
            Some(parsed.prerelease().to_vec())
        }
    }

    /// Increment a version, `None` when the input or the combination of
    /// arguments is invalid.
    pub fn inc(
        version: &str,
        release: ReleaseType,
        options: Options,
        identifier: Option<&str>,
        base: IdentifierBase,
    ) -> Option<String> {
        let parsed = Version::parse(version, options).ok()?;
        parsed.inc(release, identifier, base).ok().map(|v| v.format())
    }

    pub fn satisfies(version: &str, range: &str, options: Options) -> bool {
        let Ok(range) = Range::parse(range, options) else {
            return false;
        };
        let Ok(version) = Version::parse(version, options) else {
            return false;
        };
        range.test(&version)
    }

    /// The highest of `versions` inside the range, as originally written.
    pub fn max_satisfying(versions: &[&str], range: &str, options: Options) -> Option<String> {
        let range = Range::parse(range, options).ok()?;
        let mut best: Option<(Version, &str)> = None;
        for raw in versions {
            let Ok(version) = Version::parse(raw, options) else {
                continue;
            };
            if !range.test(&version) {
                continue;
            }
            let better = match &best {
                Some((current, _)) => current.compare(&version) == Ordering::Less,
                None => true,
            };
            if better {
                best = Some((version, *raw));
            }
        }
        best.map(|(_, raw)| raw.to_string())
    }

    /// The lowest of `versions` inside the range.
    pub fn min_satisfying(versions: &[&str], range: &str, options: Options) -> Option<String> {
        let range = Range::parse(range, options).ok()?;
        let mut best: Option<(Version, &str)> = None;
        for raw in versions {
            let Ok(version) = Version::parse(raw, options) else {
                continue;
            };
            if !range.test(&version) {
                continue;
            }
            let better = match &best {
                Some((current, _)) => current.compare(&version) == Ordering::Greater,
                None => true,
            };
            if better {
                best = Some((version, *raw));
            }
        }
        best.map(|(_, raw)| raw.to_string())
    }

    /// The lowest version a range can admit at all.
    pub fn min_version(range: &str, options: Options) -> Option<Version> {
        Range::parse(range, options).ok()?.min_version()
    }

    /// True when `version` is above every alternative of the range.
    pub fn gtr(version: &str, range: &str, options: Options) -> bool {
        Self::outside(version, range, Side::High, options)
    }

    /// True when `version` is below every alternative of the range.
    pub fn ltr(version: &str, range: &str, options: Options) -> bool {
        Self::outside(version, range, Side::Low, options)
    }

    pub fn outside(version: &str, range: &str, side: Side, options: Options) -> bool {
        let Ok(range) = Range::parse(range, options) else {
            return false;
        };
        let Ok(version) = Version::parse(version, options) else {
            return false;
        };
        range.outside(&version, side)
    }

    pub fn intersects(a: &str, b: &str, options: Options) -> bool {
        let Ok(a) = Range::parse(a, options) else {
            return false;
        };
        let Ok(b) = Range::parse(b, options) else {
            return false;
        };
        a.intersects(&b, options)
    }

    pub fn subset(sub: &str, sup: &str, options: Options) -> bool {
        let Ok(sub) = Range::parse(sub, options) else {
            return false;
        };
        let Ok(sup) = Range::parse(sup, options) else {
            return false;
        };
        sub.subset_of(&sup, options)
    }

    /// Canonical form of a valid range, `None` when it does not parse.
    pub fn valid_range(range: &str, options: Options) -> Option<String> {
        let formatted = Range::parse(range, options).ok()?.format();
        if formatted.is_empty() {
            Some("*".to_string())
        } else {
            Some(formatted)
        }
    }

    /// The desugared comparator strings, alternative by alternative.
    pub fn to_comparators(range: &str, options: Options) -> Option<Vec<Vec<String>>> {
        Range::parse(range, options).ok().map(|r| r.to_comparators())
    }

    /// A range expression selecting the same subset of `versions` as
    /// `range`, no longer than the original.
    pub fn simplify(versions: &[&str], range: &str, options: Options) -> String {
        let Ok(parsed) = Range::parse(range, options) else {
            return range.to_string();
        };
        let mut sorted: Vec<(Version, &str)> = versions
            .iter()
            .filter_map(|raw| Version::parse(raw, options).ok().map(|v| (v, *raw)))
            .collect();
        sorted.sort_by(|(a, _), (b, _)| a.compare(b));

        let mut runs: Vec<(&str, Option<&str>)> = Vec::new();
        let mut first: Option<&str> = None;
        let mut prev: Option<&str> = None;
        for (version, raw) in &sorted {
            if parsed.test(version) {
                prev = Some(*raw);
                if first.is_none() {
                    first = Some(*raw);
                }
            } else {
                if let (Some(start), Some(end)) = (first, prev) {
                    runs.push((start, Some(end)));
                }
                first = None;
                prev = None;
            }
        }
        if let Some(start) = first {
            runs.push((start, None));
        }

        let lowest = sorted.first().map(|(_, raw)| *raw);
        let mut pieces: Vec<String> = Vec::new();
        for (min, max) in runs {
            if max == Some(min) {
                pieces.push(min.to_string());
            } else if max.is_none() && Some(min) == lowest {
                pieces.push("*".to_string());
            } else if let Some(max) = max {
                if Some(min) == lowest {
                    pieces.push(format!("<={}", max));
                } else {
                    pieces.push(format!("{} - {}", min, max));
                }
            } else {
                pieces.push(format!(">={}", min));
            }
        }
        let simplified = pieces.join(" || ");
        if simplified.len() < range.len() {
            simplified
        } else {
            range.to_string()
        }
    }

    /// Pull the first version-like substring out of arbitrary text.
    pub fn coerce(text: &str, options: Options) -> Option<Version> {
        Self::coerce_with(text, options, false)
    }

    /// Like `coerce`, but picks the right-most coercible substring.
    pub fn coerce_rtl(text: &str, options: Options) -> Option<Version> {
        Self::coerce_with(text, options, true)
    }

    fn coerce_with(text: &str, options: Options, rtl: bool) -> Option<Version> {
        let re = if options.include_prerelease {
            &*patterns::COERCE_FULL
        } else {
            &*patterns::COERCE
        };

        let caps = if !rtl {
            re.captures(text)?
        } else {
            // walk right, keeping the match whose terminus moved furthest;
            // stop once the best match reaches the end of the text
            let mut best: Option<regex::Captures> = None;
            let mut at = 0;
            while let Some(next) = re.captures_at(text, at) {
                let best_end = best
                    .as_ref()
                    .and_then(|caps| caps.get(0))
                    .map(|m| m.end());
                if best_end == Some(text.len()) {
                    break;
                }
                let whole = next.get(0)?;
                let advance = whole.start()
                    + next.get(1).map_or(0, |m| m.len())
                    + next.get(2).map_or(0, |m| m.len());
                if best_end != Some(whole.end()) {
                    best = Some(next);
                }
                at = advance;
            }
            best?
        };

        let major = caps.get(2)?.as_str();
        let minor = caps.get(3).map_or("0", |m| m.as_str());
        let patch = caps.get(4).map_or("0", |m| m.as_str());
        let prerelease = match caps.get(5) {
            Some(m) if options.include_prerelease => format!("-{}", m.as_str()),
            _ => String::new(),
        };
        let build = match caps.get(6) {
            Some(m) if options.include_prerelease => format!("+{}", m.as_str()),
            _ => String::new(),
        };
        Version::parse(
            &format!("{}.{}.{}{}{}", major, minor, patch, prerelease, build),
            options,
        )
        .ok()
    }
}
