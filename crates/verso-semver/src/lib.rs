//! npm-compatible semantic versioning
//!
//! This crate parses versions and range expressions the way the npm
//! ecosystem writes them (tildes, carets, `x`/`*` wildcards, hyphen ranges,
//! `||` unions), desugars ranges into primitive comparators and answers
//! satisfaction, intersection and subset queries with npm's pre-release
//! semantics.
//!
//! ```
//! use verso_semver::{Options, Semver};
//!
//! let opts = Options::default();
//! assert!(Semver::satisfies("1.2.4", "~1.2.3", opts));
//! assert_eq!(
//!     Semver::max_satisfying(&["1.9.0", "2.3.1", "3.0.0"], "1.x || 2.x", opts),
//!     Some("2.3.1".to_string())
//! );
//! ```

mod comparator;
mod identifier;
mod options;
mod patterns;
mod range;
mod semver;
mod version;

pub use comparator::{Comparator, ComparatorError, Operand, Operator};
pub use identifier::Identifier;
pub use options::Options;
pub use patterns::{MAX_LENGTH, MAX_SAFE_INTEGER};
pub use range::{Range, RangeError, Side};
pub use semver::Semver;
pub use version::{IdentifierBase, ReleaseType, Version, VersionError};
