//! Version parsing, comparison and increments

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::identifier::Identifier;
use crate::options::Options;
use crate::patterns::{self, MAX_LENGTH, MAX_SAFE_INTEGER};

/// Error type for version parsing and increments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version string \"{0}\"")]
    InvalidVersion(String),
    #[error("version is longer than {MAX_LENGTH} characters")]
    TooLong,
    #[error("numeric component \"{0}\" exceeds the safe integer range")]
    NumericOverflow(String),
    #[error("invalid increment argument: {0}")]
    InvalidIncrement(String),
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("invalid increment argument: identifier is empty")]
    EmptyIdentifier,
    #[error("invalid increment argument: identifier already exists")]
    IdentifierExists,
    #[error("version {0} is not a prerelease")]
    NotPrerelease(String),
}

/// The release slot an increment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    Premajor,
    Preminor,
    Prepatch,
    Prerelease,
    Release,
    Pre,
}

impl ReleaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
            ReleaseType::Premajor => "premajor",
            ReleaseType::Preminor => "preminor",
            ReleaseType::Prepatch => "prepatch",
            ReleaseType::Prerelease => "prerelease",
            ReleaseType::Release => "release",
            ReleaseType::Pre => "pre",
        }
    }

    fn touches_prerelease(self) -> bool {
        matches!(
            self,
            ReleaseType::Premajor
                | ReleaseType::Preminor
                | ReleaseType::Prepatch
                | ReleaseType::Prerelease
                | ReleaseType::Pre
        )
    }
}

impl FromStr for ReleaseType {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(ReleaseType::Major),
            "minor" => Ok(ReleaseType::Minor),
            "patch" => Ok(ReleaseType::Patch),
            "premajor" => Ok(ReleaseType::Premajor),
            "preminor" => Ok(ReleaseType::Preminor),
            "prepatch" => Ok(ReleaseType::Prepatch),
            "prerelease" => Ok(ReleaseType::Prerelease),
            "release" => Ok(ReleaseType::Release),
            "pre" => Ok(ReleaseType::Pre),
            other => Err(VersionError::InvalidIncrement(other.to_string())),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The numeric base a fresh pre-release identifier starts from.
///
/// `False` suppresses the numeric slot entirely and turns re-use of an
/// existing identifier into a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierBase {
    #[default]
    Zero,
    One,
    False,
}

/// A parsed semantic version.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Vec<Identifier>,
    build: Vec<String>,
    raw: String,
    options: Options,
}

impl Version {
    /// Parse a version string under the given options.
    pub fn parse(input: &str, options: Options) -> Result<Self, VersionError> {
        let input = input.trim();
        if input.len() > MAX_LENGTH {
            return Err(VersionError::TooLong);
        }
        let caps = patterns::full_re(options.loose)
            .captures(input)
            .ok_or_else(|| VersionError::InvalidVersion(input.to_string()))?;

        let major = parse_component(caps.get(1).map_or("", |m| m.as_str()))?;
        let minor = parse_component(caps.get(2).map_or("", |m| m.as_str()))?;
        let patch = parse_component(caps.get(3).map_or("", |m| m.as_str()))?;
        let prerelease = caps.get(4).map_or_else(Vec::new, |m| {
            m.as_str().split('.').map(Identifier::parse).collect()
        });
        let build = caps.get(5).map_or_else(Vec::new, |m| {
            m.as_str().split('.').map(str::to_string).collect()
        });

        Ok(Version {
            major,
            minor,
            patch,
            prerelease,
            build,
            raw: input.to_string(),
            options,
        })
    }

    /// Build a version from already-validated parts; `raw` becomes the
    /// canonical form.
    pub(crate) fn from_parts(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: Vec<Identifier>,
        options: Options,
    ) -> Self {
        let mut version = Version {
            major,
            minor,
            patch,
            prerelease,
            build: Vec::new(),
            raw: String::new(),
            options,
        };
        version.raw = version.format();
        version
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn prerelease(&self) -> &[Identifier] {
        &self.prerelease
    }

    pub fn build(&self) -> &[String] {
        &self.build
    }

    /// The original input, with build metadata preserved.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Canonical `major.minor.patch[-prerelease]` form. Build metadata is
    /// ordering-irrelevant and excluded.
    pub fn format(&self) -> String {
        let mut out = format!("{}.{}.{}", self.major, self.minor, self.patch);
        if !self.prerelease.is_empty() {
            out.push('-');
            out.push_str(&self.prerelease_string());
        }
        out
    }

    fn prerelease_string(&self) -> String {
        self.prerelease
            .iter()
            .map(Identifier::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Lexicographic comparison of the numeric triple.
    pub fn compare_main(&self, other: &Version) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
    }

    /// Pre-release comparison: having a pre-release sorts below not having
    /// one, then identifier by identifier with the shorter list smaller.
    pub fn compare_pre(&self, other: &Version) -> Ordering {
        match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
            (true, true) => return Ordering::Equal,
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            (false, false) => {}
        }
        let len = self.prerelease.len().max(other.prerelease.len());
        for i in 0..len {
            match (self.prerelease.get(i), other.prerelease.get(i)) {
                (Some(a), Some(b)) => match a.cmp(b) {
                    Ordering::Equal => continue,
                    decided => return decided,
                },
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (None, None) => return Ordering::Equal,
            }
        }
        Ordering::Equal
    }

    /// The ordinal comparison: main triple, then pre-release.
    pub fn compare(&self, other: &Version) -> Ordering {
        self.compare_main(other).then_with(|| self.compare_pre(other))
    }

    /// Build-metadata tiebreak used by sorting. Same walk as `compare_pre`
    /// but identifiers compare as plain strings.
    pub fn compare_build(&self, other: &Version) -> Ordering {
        let len = self.build.len().max(other.build.len());
        for i in 0..len {
            match (self.build.get(i), other.build.get(i)) {
                (Some(a), Some(b)) => match a.cmp(b) {
                    Ordering::Equal => continue,
                    decided => return decided,
                },
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (None, None) => return Ordering::Equal,
            }
        }
        Ordering::Equal
    }

    /// Produce the incremented version. The receiver is left untouched.
    pub fn inc(
        &self,
        release: ReleaseType,
        identifier: Option<&str>,
        base: IdentifierBase,
    ) -> Result<Version, VersionError> {
        if release.touches_prerelease() {
            if identifier.is_none() && base == IdentifierBase::False {
                return Err(VersionError::EmptyIdentifier);
            }
            if let Some(id) = identifier {
                if !patterns::prerelease_ids_re(self.options.loose).is_match(id) {
                    return Err(VersionError::InvalidIdentifier(id.to_string()));
                }
            }
        }

        let mut next = self.clone();
        match release {
            ReleaseType::Premajor => {
                next.prerelease.clear();
                next.patch = 0;
                next.minor = 0;
                next.major += 1;
                next.apply_pre(identifier, base)?;
            }
            ReleaseType::Preminor => {
                next.prerelease.clear();
                next.patch = 0;
                next.minor += 1;
                next.apply_pre(identifier, base)?;
            }
            ReleaseType::Prepatch => {
                // an existing pre-release is irrelevant here: drop it, then
                // bump as if from the release
                next.prerelease.clear();
                next.bump_patch();
                next.apply_pre(identifier, base)?;
            }
            ReleaseType::Prerelease => {
                if next.prerelease.is_empty() {
                    next.bump_patch();
                }
                next.apply_pre(identifier, base)?;
            }
            ReleaseType::Release => {
                if next.prerelease.is_empty() {
                    return Err(VersionError::NotPrerelease(self.raw.clone()));
                }
                next.prerelease.clear();
            }
            ReleaseType::Major => {
                // a pre-major like 2.0.0-rc.1 settles on 2.0.0 instead of
                // moving to 3.0.0
                if next.minor != 0 || next.patch != 0 || next.prerelease.is_empty() {
                    next.major += 1;
                }
                next.minor = 0;
                next.patch = 0;
                next.prerelease.clear();
            }
            ReleaseType::Minor => {
                if next.patch != 0 || next.prerelease.is_empty() {
                    next.minor += 1;
                }
                next.patch = 0;
                next.prerelease.clear();
            }
            ReleaseType::Patch => {
                next.bump_patch();
            }
            ReleaseType::Pre => {
                next.apply_pre(identifier, base)?;
            }
        }
        next.raw = next.format();
        if !next.build.is_empty() {
            next.raw.push('+');
            next.raw.push_str(&next.build.join("."));
        }
        Ok(next)
    }

    fn bump_patch(&mut self) {
        // a pre-release patch like 1.2.0-5 settles on 1.2.0
        if self.prerelease.is_empty() {
            self.patch += 1;
        }
        self.prerelease.clear();
    }

    fn apply_pre(
        &mut self,
        identifier: Option<&str>,
        base: IdentifierBase,
    ) -> Result<(), VersionError> {
        let base_value = match base {
            IdentifierBase::One => 1,
            _ => 0,
        };

        if self.prerelease.is_empty() {
            self.prerelease = vec![Identifier::Numeric(base_value)];
        } else {
            let mut bumped = false;
            for id in self.prerelease.iter_mut().rev() {
                if let Identifier::Numeric(value) = id {
                    *value += 1;
                    bumped = true;
                    break;
                }
            }
            if !bumped {
                if base == IdentifierBase::False
                    && identifier == Some(self.prerelease_string().as_str())
                {
                    return Err(VersionError::IdentifierExists);
                }
                self.prerelease.push(Identifier::Numeric(base_value));
            }
        }

        if let Some(id) = identifier {
            let id = Identifier::parse(id);
            // 1.2.0-beta.1 bumps to 1.2.0-beta.2; any other identifier (or a
            // non-numeric second slot) restarts the sequence
            let keep = self.prerelease.first() == Some(&id)
                && matches!(self.prerelease.get(1), Some(Identifier::Numeric(_)));
            if !keep {
                self.prerelease = if base == IdentifierBase::False {
                    vec![id]
                } else {
                    vec![id, Identifier::Numeric(base_value)]
                };
            }
        }
        Ok(())
    }
}

pub(crate) fn parse_component(text: &str) -> Result<u64, VersionError> {
    let value: u64 = text
        .parse()
        .map_err(|_| VersionError::NumericOverflow(text.to_string()))?;
    if value > MAX_SAFE_INTEGER {
        return Err(VersionError::NumericOverflow(text.to_string()));
    }
    Ok(value)
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s, Options::default())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        Version::parse(&text, Options::default()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        Version::parse(text, Options::default()).unwrap()
    }

    fn inc_str(text: &str, release: ReleaseType) -> String {
        v(text).inc(release, None, IdentifierBase::Zero).unwrap().format()
    }

    fn inc_id(text: &str, release: ReleaseType, id: &str) -> String {
        v(text)
            .inc(release, Some(id), IdentifierBase::Zero)
            .unwrap()
            .format()
    }

    #[test]
    fn test_parse_valid() {
        let parsed = v("1.2.3");
        assert_eq!(parsed.major(), 1);
        assert_eq!(parsed.minor(), 2);
        assert_eq!(parsed.patch(), 3);
        assert!(parsed.prerelease().is_empty());
        assert!(parsed.build().is_empty());

        let parsed = v("v1.2.3-alpha.1+build.5");
        assert_eq!(
            parsed.prerelease(),
            &[
                Identifier::AlphaNumeric("alpha".to_string()),
                Identifier::Numeric(1)
            ]
        );
        assert_eq!(parsed.build(), &["build".to_string(), "5".to_string()]);
        assert_eq!(parsed.raw(), "v1.2.3-alpha.1+build.5");
        assert_eq!(parsed.format(), "1.2.3-alpha.1");
    }

    #[test]
    fn test_parse_invalid() {
        for bad in [
            "",
            "1.2",
            "1.2.3.4",
            "a.b.c",
            "01.2.3",
            "1.02.3",
            "1.2.3-01",
            "1.2.3-",
            "=1.2.3",
            "1.2.3 ||",
        ] {
            assert!(
                Version::parse(bad, Options::default()).is_err(),
                "{} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_parse_loose() {
        let loose = Options::loose();
        assert_eq!(Version::parse("=v1.2.3", loose).unwrap().format(), "1.2.3");
        assert_eq!(Version::parse("01.02.03", loose).unwrap().format(), "1.2.3");
        assert_eq!(
            Version::parse("1.2.3beta", loose).unwrap().format(),
            "1.2.3-beta"
        );
        assert!(Version::parse("=v1.2.3", Options::default()).is_err());
    }

    #[test]
    fn test_parse_limits() {
        let long = format!("1.2.3-{}", "a".repeat(300));
        assert_eq!(
            Version::parse(&long, Options::default()),
            Err(VersionError::TooLong)
        );
        // 2^53 is one past the cap
        assert!(Version::parse("9007199254740992.0.0", Options::default()).is_err());
        assert!(Version::parse("9007199254740991.0.0", Options::default()).is_ok());
    }

    #[test]
    fn test_compare() {
        assert_eq!(v("1.2.3").compare(&v("1.2.3")), Ordering::Equal);
        assert_eq!(v("1.2.3").compare(&v("1.2.4")), Ordering::Less);
        assert_eq!(v("2.0.0").compare(&v("1.9.9")), Ordering::Greater);
        assert_eq!(v("1.10.0").compare(&v("1.9.0")), Ordering::Greater);
        // build metadata never participates
        assert_eq!(v("1.2.3+a").compare(&v("1.2.3+b")), Ordering::Equal);
    }

    #[test]
    fn test_compare_prerelease() {
        // a pre-release sorts below its release
        assert_eq!(v("1.2.3-alpha").compare(&v("1.2.3")), Ordering::Less);
        assert_eq!(v("1.2.3").compare(&v("1.2.3-rc.1")), Ordering::Greater);
        // numeric identifiers compare numerically
        assert_eq!(v("1.2.3-beta.11").compare(&v("1.2.3-beta.2")), Ordering::Greater);
        // numeric sorts below alphanumeric
        assert_eq!(v("1.2.3-1").compare(&v("1.2.3-alpha")), Ordering::Less);
        // the longer list wins a shared prefix
        assert_eq!(v("1.2.3-alpha").compare(&v("1.2.3-alpha.1")), Ordering::Less);
        assert_eq!(v("1.2.3-alpha.beta").compare(&v("1.2.3-alpha.1")), Ordering::Greater);
    }

    #[test]
    fn test_compare_build() {
        assert_eq!(v("1.2.3+1").compare_build(&v("1.2.3+2")), Ordering::Less);
        assert_eq!(v("1.2.3+a").compare_build(&v("1.2.3")), Ordering::Greater);
        assert_eq!(v("1.2.3+a.1").compare_build(&v("1.2.3+a")), Ordering::Greater);
        // string rules throughout, no numeric promotion
        assert_eq!(v("1.2.3+11").compare_build(&v("1.2.3+2")), Ordering::Less);
    }

    #[test]
    fn test_format_round_trip() {
        for text in ["1.2.3", "1.2.3-alpha.1", "0.0.0", "10.20.30-rc.1.x-y"] {
            let parsed = v(text);
            assert_eq!(v(&parsed.format()), parsed);
        }
    }

    #[test]
    fn test_inc_plain() {
        assert_eq!(inc_str("1.2.3", ReleaseType::Major), "2.0.0");
        assert_eq!(inc_str("1.2.3", ReleaseType::Minor), "1.3.0");
        assert_eq!(inc_str("1.2.3", ReleaseType::Patch), "1.2.4");
        // pre-releases settle on their own triple first
        assert_eq!(inc_str("2.0.0-rc.1", ReleaseType::Major), "2.0.0");
        assert_eq!(inc_str("1.3.0-beta", ReleaseType::Minor), "1.3.0");
        assert_eq!(inc_str("1.2.3-alpha", ReleaseType::Patch), "1.2.3");
        // unless the tail is already dirty
        assert_eq!(inc_str("2.1.0-rc.1", ReleaseType::Major), "3.0.0");
        assert_eq!(inc_str("1.3.2-beta", ReleaseType::Minor), "1.4.0");
    }

    #[test]
    fn test_inc_pre_family() {
        assert_eq!(inc_str("1.2.3", ReleaseType::Premajor), "2.0.0-0");
        assert_eq!(inc_str("1.2.3", ReleaseType::Preminor), "1.3.0-0");
        assert_eq!(inc_str("1.2.3", ReleaseType::Prepatch), "1.2.4-0");
        assert_eq!(inc_str("1.2.3-beta", ReleaseType::Prepatch), "1.2.4-0");
        assert_eq!(inc_str("1.2.3", ReleaseType::Prerelease), "1.2.4-0");
        assert_eq!(inc_str("1.2.3-beta.4", ReleaseType::Prerelease), "1.2.3-beta.5");
        assert_eq!(
            inc_str("1.2.3-alpha.beta", ReleaseType::Prerelease),
            "1.2.3-alpha.beta.0"
        );
    }

    #[test]
    fn test_inc_release() {
        assert_eq!(inc_str("1.2.3-beta.4", ReleaseType::Release), "1.2.3");
        assert_eq!(
            v("1.2.3").inc(ReleaseType::Release, None, IdentifierBase::Zero),
            Err(VersionError::NotPrerelease("1.2.3".to_string()))
        );
    }

    #[test]
    fn test_inc_with_identifier() {
        assert_eq!(inc_id("1.2.3", ReleaseType::Premajor, "rc"), "2.0.0-rc.0");
        assert_eq!(inc_id("1.2.3", ReleaseType::Prerelease, "beta"), "1.2.4-beta.0");
        assert_eq!(
            inc_id("1.2.3-beta.4", ReleaseType::Prerelease, "beta"),
            "1.2.3-beta.5"
        );
        assert_eq!(
            inc_id("1.2.3-beta.4", ReleaseType::Prerelease, "alpha"),
            "1.2.3-alpha.0"
        );
        assert_eq!(inc_id("1.2.3-beta", ReleaseType::Prerelease, "beta"), "1.2.3-beta.0");
        assert_eq!(
            v("1.2.3")
                .inc(ReleaseType::Prerelease, Some("beta"), IdentifierBase::One)
                .unwrap()
                .format(),
            "1.2.4-beta.1"
        );
        assert_eq!(
            v("1.2.3").inc(ReleaseType::Prerelease, Some("be ta"), IdentifierBase::Zero),
            Err(VersionError::InvalidIdentifier("be ta".to_string()))
        );
    }

    #[test]
    fn test_inc_identifier_base_false() {
        assert_eq!(
            v("1.2.3")
                .inc(ReleaseType::Prerelease, Some("beta"), IdentifierBase::False)
                .unwrap()
                .format(),
            "1.2.4-beta"
        );
        assert_eq!(
            v("1.2.3-beta").inc(ReleaseType::Prerelease, Some("beta"), IdentifierBase::False),
            Err(VersionError::IdentifierExists)
        );
        assert_eq!(
            v("1.2.3").inc(ReleaseType::Prerelease, None, IdentifierBase::False),
            Err(VersionError::EmptyIdentifier)
        );
    }

    #[test]
    fn test_inc_keeps_build_in_raw() {
        let next = v("1.2.3+build.9")
            .inc(ReleaseType::Patch, None, IdentifierBase::Zero)
            .unwrap();
        assert_eq!(next.format(), "1.2.4");
        assert_eq!(next.raw(), "1.2.4+build.9");
    }
}
