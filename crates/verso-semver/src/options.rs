//! Parse options carried by every version and range

/// Parsing and matching options.
///
/// `loose` admits the permissive grammar (leading `v`/`=`, stray whitespace,
/// leading zeroes); `include_prerelease` disables the pre-release gate so
/// that pre-release versions match any range that numerically admits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub loose: bool,
    pub include_prerelease: bool,
}

impl Options {
    pub fn new() -> Self {
        Options::default()
    }

    /// The permissive grammar.
    pub fn loose() -> Self {
        Options {
            loose: true,
            include_prerelease: false,
        }
    }

    pub fn with_loose(mut self, loose: bool) -> Self {
        self.loose = loose;
        self
    }

    pub fn with_include_prerelease(mut self, include_prerelease: bool) -> Self {
        self.include_prerelease = include_prerelease;
        self
    }
}
