//! Shared lexical patterns for version and range parsing

use lazy_static::lazy_static;
use regex::Regex;

/// Longest accepted input string, checked before any matching.
pub const MAX_LENGTH: usize = 256;

/// Largest accepted numeric component (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Longest numeric component `coerce` will pick up.
pub const MAX_SAFE_COMPONENT_LENGTH: usize = 16;

lazy_static! {
    static ref NUMERIC_IDENTIFIER: &'static str = r"0|[1-9]\d*";
    static ref NUMERIC_IDENTIFIER_LOOSE: &'static str = r"\d+";
    static ref NON_NUMERIC_IDENTIFIER: &'static str = r"\d*[a-zA-Z-][a-zA-Z0-9-]*";

    static ref MAIN_VERSION: String = format!(
        r"({0})\.({0})\.({0})",
        *NUMERIC_IDENTIFIER
    );
    static ref MAIN_VERSION_LOOSE: String = format!(
        r"({0})\.({0})\.({0})",
        *NUMERIC_IDENTIFIER_LOOSE
    );

    static ref PRERELEASE_IDENTIFIER: String = format!(
        r"(?:{}|{})",
        *NUMERIC_IDENTIFIER, *NON_NUMERIC_IDENTIFIER
    );
    static ref PRERELEASE_IDENTIFIER_LOOSE: String = format!(
        r"(?:{}|{})",
        *NUMERIC_IDENTIFIER_LOOSE, *NON_NUMERIC_IDENTIFIER
    );

    static ref PRERELEASE: String = format!(
        r"(?:-({0}(?:\.{0})*))",
        *PRERELEASE_IDENTIFIER
    );
    static ref PRERELEASE_LOOSE: String = format!(
        r"(?:-?({0}(?:\.{0})*))",
        *PRERELEASE_IDENTIFIER_LOOSE
    );

    static ref BUILD_IDENTIFIER: &'static str = r"[0-9A-Za-z-]+";
    static ref BUILD: String = format!(
        r"(?:\+({0}(?:\.{0})*))",
        *BUILD_IDENTIFIER
    );

    static ref FULL_PLAIN: String = format!(r"v?{}{}?{}?", *MAIN_VERSION, *PRERELEASE, *BUILD);
    static ref LOOSE_PLAIN: String = format!(
        r"[v=\s]*{}{}?{}?",
        *MAIN_VERSION_LOOSE, *PRERELEASE_LOOSE, *BUILD
    );

    /// Strict version grammar, anchored.
    pub static ref FULL: Regex = Regex::new(&format!(r"^{}$", *FULL_PLAIN)).unwrap();

    /// Permissive version grammar, anchored.
    pub static ref LOOSE: Regex = Regex::new(&format!(r"^{}$", *LOOSE_PLAIN)).unwrap();

    static ref GTLT: &'static str = r"((?:<|>)?=?)";

    static ref XRANGE_IDENTIFIER: String = format!(r"{}|x|X|\*", *NUMERIC_IDENTIFIER);
    static ref XRANGE_IDENTIFIER_LOOSE: String = format!(r"{}|x|X|\*", *NUMERIC_IDENTIFIER_LOOSE);

    static ref XRANGE_PLAIN: String = format!(
        r"[v=\s]*({0})(?:\.({0})(?:\.({0})(?:{1})?{2}?)?)?",
        *XRANGE_IDENTIFIER, *PRERELEASE, *BUILD
    );
    static ref XRANGE_PLAIN_LOOSE: String = format!(
        r"[v=\s]*({0})(?:\.({0})(?:\.({0})(?:{1})?{2}?)?)?",
        *XRANGE_IDENTIFIER_LOOSE, *PRERELEASE_LOOSE, *BUILD
    );

    /// Partial version with wildcards, optionally prefixed by an operator.
    pub static ref XRANGE: Regex =
        Regex::new(&format!(r"^{}\s*{}$", *GTLT, *XRANGE_PLAIN)).unwrap();
    pub static ref XRANGE_LOOSE: Regex =
        Regex::new(&format!(r"^{}\s*{}$", *GTLT, *XRANGE_PLAIN_LOOSE)).unwrap();

    /// Tilde specifier (`~1.2.3`, `~>1.2.3`).
    pub static ref TILDE: Regex = Regex::new(&format!(r"^(?:~>?){}$", *XRANGE_PLAIN)).unwrap();
    pub static ref TILDE_LOOSE: Regex =
        Regex::new(&format!(r"^(?:~>?){}$", *XRANGE_PLAIN_LOOSE)).unwrap();

    /// Caret specifier (`^1.2.3`).
    pub static ref CARET: Regex = Regex::new(&format!(r"^\^{}$", *XRANGE_PLAIN)).unwrap();
    pub static ref CARET_LOOSE: Regex =
        Regex::new(&format!(r"^\^{}$", *XRANGE_PLAIN_LOOSE)).unwrap();

    /// A primitive comparator: operator plus version, both optional.
    pub static ref COMPARATOR: Regex =
        Regex::new(&format!(r"^{}\s*({})?$", *GTLT, *FULL_PLAIN)).unwrap();
    pub static ref COMPARATOR_LOOSE: Regex =
        Regex::new(&format!(r"^{}\s*({})?$", *GTLT, *LOOSE_PLAIN)).unwrap();

    /// Hyphen range over two partials; must cover the whole alternative.
    pub static ref HYPHEN_RANGE: Regex =
        Regex::new(&format!(r"^\s*({0})\s+-\s+({0})\s*$", *XRANGE_PLAIN)).unwrap();
    pub static ref HYPHEN_RANGE_LOOSE: Regex =
        Regex::new(&format!(r"^\s*({0})\s+-\s+({0})\s*$", *XRANGE_PLAIN_LOOSE)).unwrap();

    /// Collapses `>= 1.2.3` into `>=1.2.3` before tokenizing.
    pub static ref COMPARATOR_TRIM: Regex = Regex::new(&format!(
        r"(\s*){}\s*((?:{})|(?:{}))",
        *GTLT, *LOOSE_PLAIN, *XRANGE_PLAIN_LOOSE
    ))
    .unwrap();

    /// Collapses `~ 1.2.3` into `~1.2.3`.
    pub static ref TILDE_TRIM: Regex = Regex::new(r"(\s*)(?:~>?)\s+").unwrap();

    /// Collapses `^ 1.2.3` into `^1.2.3`.
    pub static ref CARET_TRIM: Regex = Regex::new(r"(\s*)\^\s+").unwrap();

    /// Dotted pre-release identifier list, anchored; used to vet `inc` identifiers.
    pub static ref PRERELEASE_IDENTIFIERS: Regex =
        Regex::new(&format!(r"^{0}(?:\.{0})*$", *PRERELEASE_IDENTIFIER)).unwrap();
    pub static ref PRERELEASE_IDENTIFIERS_LOOSE: Regex =
        Regex::new(&format!(r"^{0}(?:\.{0})*$", *PRERELEASE_IDENTIFIER_LOOSE)).unwrap();

    static ref COERCE_PLAIN: String = format!(
        r"(^|[^\d])(\d{{1,{0}}})(?:\.(\d{{1,{0}}}))?(?:\.(\d{{1,{0}}}))?",
        MAX_SAFE_COMPONENT_LENGTH
    );

    /// First version-like substring for `coerce`.
    pub static ref COERCE: Regex =
        Regex::new(&format!(r"{}(?:$|[^\d])", *COERCE_PLAIN)).unwrap();

    /// `coerce` variant that also picks up pre-release and build tails.
    pub static ref COERCE_FULL: Regex = Regex::new(&format!(
        r"{}(?:{})?(?:{})?(?:$|[^\d])",
        *COERCE_PLAIN, *PRERELEASE_LOOSE, *BUILD
    ))
    .unwrap();
}

pub fn full_re(loose: bool) -> &'static Regex {
    if loose {
        &LOOSE
    } else {
        &FULL
    }
}

pub fn comparator_re(loose: bool) -> &'static Regex {
    if loose {
        &COMPARATOR_LOOSE
    } else {
        &COMPARATOR
    }
}

pub fn xrange_re(loose: bool) -> &'static Regex {
    if loose {
        &XRANGE_LOOSE
    } else {
        &XRANGE
    }
}

pub fn tilde_re(loose: bool) -> &'static Regex {
    if loose {
        &TILDE_LOOSE
    } else {
        &TILDE
    }
}

pub fn caret_re(loose: bool) -> &'static Regex {
    if loose {
        &CARET_LOOSE
    } else {
        &CARET
    }
}

pub fn hyphen_re(loose: bool) -> &'static Regex {
    if loose {
        &HYPHEN_RANGE_LOOSE
    } else {
        &HYPHEN_RANGE
    }
}

pub fn prerelease_ids_re(loose: bool) -> &'static Regex {
    if loose {
        &PRERELEASE_IDENTIFIERS_LOOSE
    } else {
        &PRERELEASE_IDENTIFIERS
    }
}
