//! Range-to-range subset decision

use std::cmp::Ordering;
use std::slice;

use crate::comparator::{Comparator, Operand, Operator};
use crate::identifier::Identifier;
use crate::options::Options;
use crate::version::Version;

use super::{match_all_comparator, test_alternative, Range};

impl Range {
    /// True when every version this range admits is admitted by `sup`:
    /// each alternative here must reduce into some alternative of `sup`.
    pub fn subset_of(&self, sup: &Range, options: Options) -> bool {
        let mut saw_decision = false;
        'outer: for sub_alt in &self.set {
            for sup_alt in &sup.set {
                let verdict = simple_subset(sub_alt, sup_alt, options);
                saw_decision = saw_decision || verdict.is_some();
                if verdict == Some(true) {
                    continue 'outer;
                }
            }
            // indeterminate against every alternative means this conjunction
            // is empty, and the empty set is inside everything
            if saw_decision {
                return false;
            }
        }
        true
    }
}

/// A tracked bound: the comparator and its operand version.
type Bound<'a> = (&'a Comparator, &'a Version);

/// One `sub` conjunction against one `dom` conjunction. `None` marks an
/// empty or contradictory `sub` side.
fn simple_subset(sub: &[Comparator], dom: &[Comparator], options: Options) -> Option<bool> {
    // an alternative that admits nothing is inside everything
    if sub.iter().any(|c| c.is_null_set()) {
        return Some(true);
    }
    let sub_storage;
    let mut sub = sub;
    if sub.len() == 1 && matches!(sub[0].operand(), Operand::Any) {
        if dom.len() == 1 && matches!(dom[0].operand(), Operand::Any) {
            return Some(true);
        }
        sub_storage = [match_all_comparator(options)];
        sub = &sub_storage;
    }
    let dom_storage;
    let mut dom = dom;
    if dom.len() == 1 && matches!(dom[0].operand(), Operand::Any) {
        if options.include_prerelease {
            return Some(true);
        }
        dom_storage = [match_all_comparator(options)];
        dom = &dom_storage;
    }

    let mut eq_versions: Vec<&Version> = Vec::new();
    let mut gt: Option<Bound> = None;
    let mut lt: Option<Bound> = None;
    for comparator in sub {
        let Operand::Exact(version) = comparator.operand() else {
            continue;
        };
        match comparator.operator() {
            Operator::GreaterThan | Operator::GreaterThanOrEqual => {
                gt = Some(higher_gt(gt, (comparator, version)));
            }
            Operator::LessThan | Operator::LessThanOrEqual => {
                lt = Some(lower_lt(lt, (comparator, version)));
            }
            Operator::Equal => eq_versions.push(version),
        }
    }

    if eq_versions.len() > 1 {
        return None;
    }

    let mut gtlt_comp: Option<Ordering> = None;
    if let (Some((gt_comp, gt_ver)), Some((lt_comp, lt_ver))) = (gt, lt) {
        let ordering = gt_ver.compare(lt_ver);
        if ordering == Ordering::Greater {
            return None;
        }
        if ordering == Ordering::Equal
            && (gt_comp.operator() != Operator::GreaterThanOrEqual
                || lt_comp.operator() != Operator::LessThanOrEqual)
        {
            return None;
        }
        gtlt_comp = Some(ordering);
    }

    // a pinned version must clear its own bounds and every dom comparator
    if let Some(pinned) = eq_versions.first() {
        if let Some((gt_comp, _)) = gt {
            if !test_alternative(slice::from_ref(gt_comp), pinned, options) {
                return None;
            }
        }
        if let Some((lt_comp, _)) = lt {
            if !test_alternative(slice::from_ref(lt_comp), pinned, options) {
                return None;
            }
        }
        for comparator in dom {
            if !test_alternative(slice::from_ref(comparator), pinned, options) {
                return Some(false);
            }
        }
        return Some(true);
    }

    // a pre-release bound on the sub side needs the matching tuple named
    // with a pre-release somewhere in dom
    let mut need_dom_gt_pre: Option<&Version> = match gt {
        Some((_, version)) if !options.include_prerelease && version.is_prerelease() => {
            Some(version)
        }
        _ => None,
    };
    let mut need_dom_lt_pre: Option<&Version> = match lt {
        Some((_, version)) if !options.include_prerelease && version.is_prerelease() => {
            Some(version)
        }
        _ => None,
    };
    // `<1.2.3-0` admits exactly what `<1.2.3` admits
    if let (Some(version), Some((lt_comp, _))) = (need_dom_lt_pre, lt) {
        if lt_comp.operator() == Operator::LessThan
            && matches!(version.prerelease(), [Identifier::Numeric(0)])
        {
            need_dom_lt_pre = None;
        }
    }

    let mut has_dom_gt = false;
    let mut has_dom_lt = false;
    for comparator in dom {
        let operator = comparator.operator();
        has_dom_gt = has_dom_gt || operator.is_gt_family();
        has_dom_lt = has_dom_lt || operator.is_lt_family();
        let dom_version = match comparator.operand() {
            Operand::Exact(version) => Some(version),
            Operand::Any => None,
        };

        if let Some((gt_comp, gt_ver)) = gt {
            if let (Some(need), Some(version)) = (need_dom_gt_pre, dom_version) {
                if version.is_prerelease()
                    && version.major() == need.major()
                    && version.minor() == need.minor()
                    && version.patch() == need.patch()
                {
                    need_dom_gt_pre = None;
                }
            }
            if operator.is_gt_family() {
                if let Some(version) = dom_version {
                    // a dom lower bound above ours leaves versions behind
                    if outranks_gt((comparator, version), (gt_comp, gt_ver)) {
                        return Some(false);
                    }
                }
            } else if gt_comp.operator() == Operator::GreaterThanOrEqual
                && !test_alternative(slice::from_ref(comparator), gt_ver, options)
            {
                return Some(false);
            }
        }

        if let Some((lt_comp, lt_ver)) = lt {
            if let (Some(need), Some(version)) = (need_dom_lt_pre, dom_version) {
                if version.is_prerelease()
                    && version.major() == need.major()
                    && version.minor() == need.minor()
                    && version.patch() == need.patch()
                {
                    need_dom_lt_pre = None;
                }
            }
            if operator.is_lt_family() {
                if let Some(version) = dom_version {
                    if outranks_lt((comparator, version), (lt_comp, lt_ver)) {
                        return Some(false);
                    }
                }
            } else if lt_comp.operator() == Operator::LessThanOrEqual
                && !test_alternative(slice::from_ref(comparator), lt_ver, options)
            {
                return Some(false);
            }
        }

        if operator == Operator::Equal
            && (gt.is_some() || lt.is_some())
            && gtlt_comp != Some(Ordering::Equal)
        {
            return Some(false);
        }
    }

    // a one-sided sub cannot fit a dom bounded on the other side, unless the
    // sub bounds already pinched to a point
    if gt.is_some() && has_dom_lt && lt.is_none() && gtlt_comp != Some(Ordering::Equal) {
        return Some(false);
    }
    if lt.is_some() && has_dom_gt && gt.is_none() && gtlt_comp != Some(Ordering::Equal) {
        return Some(false);
    }
    if need_dom_gt_pre.is_some() || need_dom_lt_pre.is_some() {
        return Some(false);
    }
    Some(true)
}

fn higher_gt<'a>(current: Option<Bound<'a>>, candidate: Bound<'a>) -> Bound<'a> {
    let Some(current) = current else {
        return candidate;
    };
    match current.1.compare(candidate.1) {
        Ordering::Greater => current,
        Ordering::Less => candidate,
        Ordering::Equal => {
            if candidate.0.operator() == Operator::GreaterThan
                && current.0.operator() == Operator::GreaterThanOrEqual
            {
                candidate
            } else {
                current
            }
        }
    }
}

fn lower_lt<'a>(current: Option<Bound<'a>>, candidate: Bound<'a>) -> Bound<'a> {
    let Some(current) = current else {
        return candidate;
    };
    match current.1.compare(candidate.1) {
        Ordering::Less => current,
        Ordering::Greater => candidate,
        Ordering::Equal => {
            if candidate.0.operator() == Operator::LessThan
                && current.0.operator() == Operator::LessThanOrEqual
            {
                candidate
            } else {
                current
            }
        }
    }
}

/// Whether `candidate` is a strictly higher lower bound than `current`.
fn outranks_gt(candidate: Bound, current: Bound) -> bool {
    match current.1.compare(candidate.1) {
        Ordering::Less => true,
        Ordering::Equal => {
            candidate.0.operator() == Operator::GreaterThan
                && current.0.operator() == Operator::GreaterThanOrEqual
        }
        Ordering::Greater => false,
    }
}

/// Whether `candidate` is a strictly lower upper bound than `current`.
fn outranks_lt(candidate: Bound, current: Bound) -> bool {
    match current.1.compare(candidate.1) {
        Ordering::Greater => true,
        Ordering::Equal => {
            candidate.0.operator() == Operator::LessThan
                && current.0.operator() == Operator::LessThanOrEqual
        }
        Ordering::Less => false,
    }
}
