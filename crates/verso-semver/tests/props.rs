//! Property tests for the comparison relation and the range algebra.

use std::cmp::Ordering;

use proptest::prelude::*;
use proptest::string::string_regex;
use verso_semver::{Options, Range, Semver, Version};

fn version_strategy() -> impl Strategy<Value = String> {
    let triple = (0u64..12, 0u64..12, 0u64..12);
    let identifier = prop_oneof![
        (0u64..6).prop_map(|n| n.to_string()),
        string_regex("[a-z]{1,3}").unwrap(),
    ];
    let prerelease = prop::option::of(prop::collection::vec(identifier, 1..3));
    (triple, prerelease).prop_map(|((major, minor, patch), prerelease)| {
        let mut out = format!("{}.{}.{}", major, minor, patch);
        if let Some(identifiers) = prerelease {
            out.push('-');
            out.push_str(&identifiers.join("."));
        }
        out
    })
}

fn simple_range_strategy() -> impl Strategy<Value = String> {
    let triple =
        (0u64..12, 0u64..12, 0u64..12).prop_map(|(a, b, c)| format!("{}.{}.{}", a, b, c));
    prop_oneof![
        Just("*".to_string()),
        triple.clone().prop_map(|v| format!("^{}", v)),
        triple.clone().prop_map(|v| format!("~{}", v)),
        triple.clone().prop_map(|v| format!(">={}", v)),
        triple.clone().prop_map(|v| format!(">{}", v)),
        triple.clone().prop_map(|v| format!("<{}", v)),
        triple.clone().prop_map(|v| format!("<={}", v)),
        triple.clone().prop_map(|v| format!("={}", v)),
        (0u64..12).prop_map(|major| format!("{}.x", major)),
        (0u64..12, 0u64..12).prop_map(|(major, minor)| format!("{}.{}.x", major, minor)),
        (triple.clone(), triple.clone()).prop_map(|(a, b)| format!("{} - {}", a, b)),
        (triple.clone(), triple).prop_map(|(a, b)| format!(">={} <{}", a, b)),
    ]
}

fn range_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(simple_range_strategy(), 1..3).prop_map(|alts| alts.join(" || "))
}

proptest! {
    #[test]
    fn prop_compare_total(a in version_strategy(), b in version_strategy()) {
        let opts = Options::default();
        let va = Version::parse(&a, opts).unwrap();
        let vb = Version::parse(&b, opts).unwrap();
        prop_assert_eq!(va.compare(&vb), vb.compare(&va).reverse());
        prop_assert_eq!(va.compare(&va), Ordering::Equal);
    }

    #[test]
    fn prop_compare_transitive(
        a in version_strategy(),
        b in version_strategy(),
        c in version_strategy(),
    ) {
        let opts = Options::default();
        let va = Version::parse(&a, opts).unwrap();
        let vb = Version::parse(&b, opts).unwrap();
        let vc = Version::parse(&c, opts).unwrap();
        if va.compare(&vb) == Ordering::Less && vb.compare(&vc) == Ordering::Less {
            prop_assert_eq!(va.compare(&vc), Ordering::Less);
        }
    }

    #[test]
    fn prop_prerelease_below_release(v in version_strategy()) {
        let opts = Options::default();
        let parsed = Version::parse(&v, opts).unwrap();
        if parsed.is_prerelease() {
            let release = format!("{}.{}.{}", parsed.major(), parsed.minor(), parsed.patch());
            let release = Version::parse(&release, opts).unwrap();
            prop_assert_eq!(parsed.compare(&release), Ordering::Less);
        }
    }

    #[test]
    fn prop_format_round_trip(v in version_strategy()) {
        let opts = Options::default();
        let parsed = Version::parse(&v, opts).unwrap();
        let reparsed = Version::parse(&parsed.format(), opts).unwrap();
        prop_assert_eq!(reparsed, parsed);
    }

    #[test]
    fn prop_range_canonicalization_idempotent(r in range_strategy()) {
        let opts = Options::default();
        let first = Range::parse(&r, opts).unwrap();
        let second = Range::parse(&first.format(), opts).unwrap();
        prop_assert_eq!(second.format(), first.format());
        prop_assert_eq!(second.to_comparators(), first.to_comparators());
    }

    #[test]
    fn prop_subset_soundness(
        sub in range_strategy(),
        dom in range_strategy(),
        versions in prop::collection::vec(version_strategy(), 1..8),
    ) {
        let opts = Options::default();
        if Semver::subset(&sub, &dom, opts) {
            for version in &versions {
                if Semver::satisfies(version, &sub, opts) {
                    prop_assert!(
                        Semver::satisfies(version, &dom, opts),
                        "{} satisfies {} but escapes its superset {}",
                        version, sub, dom,
                    );
                }
            }
        }
    }

    #[test]
    fn prop_intersects_admits_witnesses(
        a in range_strategy(),
        b in range_strategy(),
        versions in prop::collection::vec(version_strategy(), 1..8),
    ) {
        let opts = Options::default();
        for version in &versions {
            if Semver::satisfies(version, &a, opts) && Semver::satisfies(version, &b, opts) {
                prop_assert!(
                    Semver::intersects(&a, &b, opts),
                    "{} satisfies both {} and {} yet they do not intersect",
                    version, a, b,
                );
            }
        }
    }

    #[test]
    fn prop_min_version_is_minimal(
        r in range_strategy(),
        versions in prop::collection::vec(version_strategy(), 1..8),
    ) {
        let opts = Options::default();
        let range = Range::parse(&r, opts).unwrap();
        if let Some(min) = range.min_version() {
            prop_assert!(range.test(&min));
            for version in &versions {
                let parsed = Version::parse(version, opts).unwrap();
                if range.test(&parsed) {
                    prop_assert!(min.compare(&parsed) != Ordering::Greater);
                }
            }
        }
    }

    #[test]
    fn prop_outside_excludes_satisfaction(r in range_strategy(), v in version_strategy()) {
        let opts = Options::default();
        let satisfied = Semver::satisfies(&v, &r, opts);
        let above = Semver::gtr(&v, &r, opts);
        let below = Semver::ltr(&v, &r, opts);
        if satisfied {
            prop_assert!(!above && !below);
        }
        prop_assert!(!(above && below));
    }
}
