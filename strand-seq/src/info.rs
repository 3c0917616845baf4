//! Regex Property Inference.
//!
//! A compositional, memoized static analysis over regex terms. Each regex
//! term reachable in the graph gets an immutable [`ReInfo`] record computed
//! bottom-up from the records of its operands; results are cached per term
//! identity and never recomputed within a session. The properties steer the
//! choice between automaton-based and symbolic-derivative-based decision
//! procedures elsewhere in the solver.
//!
//! The record is a tagged variant, not a struct with a validity flag:
//! "not yet known" is a type-level state callers cannot forget to check.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use strand_core::{TermId, TermManager};
use tracing::trace;

use crate::facade::{self, max_mul, max_plus};
use crate::ops::SeqOp;
use crate::plugin::SeqPlugin;

/// Three-valued truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ternary {
    /// Truth value not determined.
    #[default]
    Unknown,
    /// Determined false.
    False,
    /// Determined true.
    True,
}

impl Ternary {
    /// Three-valued conjunction.
    #[must_use]
    pub fn and(self, other: Ternary) -> Ternary {
        match (self, other) {
            (Ternary::False, _) | (_, Ternary::False) => Ternary::False,
            (Ternary::True, Ternary::True) => Ternary::True,
            _ => Ternary::Unknown,
        }
    }

    /// Three-valued disjunction.
    #[must_use]
    pub fn or(self, other: Ternary) -> Ternary {
        match (self, other) {
            (Ternary::True, _) | (_, Ternary::True) => Ternary::True,
            (Ternary::False, Ternary::False) => Ternary::False,
            _ => Ternary::Unknown,
        }
    }

    /// Three-valued negation.
    #[must_use]
    pub fn negate(self) -> Ternary {
        match self {
            Ternary::True => Ternary::False,
            Ternary::False => Ternary::True,
            Ternary::Unknown => Ternary::Unknown,
        }
    }

    /// Construct from a definite Boolean.
    #[must_use]
    pub fn from_bool(b: bool) -> Ternary {
        if b { Ternary::True } else { Ternary::False }
    }
}

/// Determined semantic properties of one regex term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReProps {
    /// Built only from union, concatenation, star, and reverse.
    pub classical: bool,
    /// Boolean-reverse combination of classical regexes.
    pub standard: bool,
    /// No uninterpreted symbols occur.
    pub interpreted: bool,
    /// No branching (conditional) structure is used.
    pub nonbranching: bool,
    /// Concatenations are right associative, and a nullable loop body
    /// implies a zero lower bound.
    pub normalized: bool,
    /// All bounded loops have a singleton body.
    pub monadic: bool,
    /// Positive Boolean combination of ranges, predicates, or singleton
    /// sequences.
    pub singleton: bool,
    /// Whether the empty word is accepted.
    pub nullable: Ternary,
    /// Lower bound on the length of accepted words.
    pub min_length: u64,
    /// Maximum nesting depth of Kleene-star-like operators.
    pub star_height: u32,
}

impl ReProps {
    /// All structural flags set: the record for fully-known leaves.
    #[must_use]
    pub fn leaf(nullable: Ternary, min_length: u64, star_height: u32) -> Self {
        Self {
            classical: true,
            standard: true,
            interpreted: true,
            nonbranching: true,
            normalized: true,
            monadic: true,
            singleton: true,
            nullable,
            min_length,
            star_height,
        }
    }
}

/// The info lattice: uncomputed, computed-but-indeterminate, or fully known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReInfo {
    /// No record exists; nothing may be concluded.
    #[default]
    Unknown,
    /// Deliberately untracked: the record exists and says nothing.
    Indeterminate,
    /// Fully determined properties.
    Known(ReProps),
}

impl ReInfo {
    /// Whether the record is fully determined.
    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, ReInfo::Known(_))
    }

    /// The determined properties, when known.
    #[must_use]
    pub fn props(&self) -> Option<&ReProps> {
        match self {
            ReInfo::Known(p) => Some(p),
            _ => None,
        }
    }

    /// Kleene star: accepts the empty word by definition.
    #[must_use]
    pub fn star(self) -> ReInfo {
        match self {
            ReInfo::Known(p) => ReInfo::Known(ReProps {
                classical: p.classical,
                standard: p.classical,
                singleton: false,
                nullable: Ternary::True,
                min_length: 0,
                star_height: p.star_height + 1,
                ..p
            }),
            other => other,
        }
    }

    /// One-or-more repetition: nullability and minimum length are the
    /// body's.
    #[must_use]
    pub fn plus(self) -> ReInfo {
        match self {
            ReInfo::Known(p) => ReInfo::Known(ReProps {
                classical: p.classical,
                standard: p.classical,
                singleton: false,
                star_height: p.star_height + 1,
                ..p
            }),
            other => other,
        }
    }

    /// Zero-or-one repetition: accepts the empty word by definition.
    #[must_use]
    pub fn opt(self) -> ReInfo {
        match self {
            ReInfo::Known(p) => ReInfo::Known(ReProps {
                classical: p.classical,
                standard: p.classical,
                singleton: false,
                nullable: Ternary::True,
                min_length: 0,
                ..p
            }),
            other => other,
        }
    }

    /// Complement: excluded from the classical subset; the length bound
    /// resets, staying positive only when the complement provably rejects
    /// the empty word.
    #[must_use]
    pub fn complement(self) -> ReInfo {
        match self {
            ReInfo::Known(p) => {
                let nullable = p.nullable.negate();
                let min_length = if nullable == Ternary::False { 1 } else { 0 };
                ReInfo::Known(ReProps {
                    classical: false,
                    singleton: false,
                    nullable,
                    min_length,
                    star_height: p.star_height,
                    ..p
                })
            }
            other => other,
        }
    }

    /// Concatenation. `lhs_is_concat` reports whether the left operand term
    /// is itself a concatenation, which breaks right-associated
    /// normalization.
    #[must_use]
    pub fn concat(self, rhs: ReInfo, lhs_is_concat: bool) -> ReInfo {
        match (self, rhs) {
            (ReInfo::Known(a), ReInfo::Known(b)) => ReInfo::Known(ReProps {
                classical: a.classical && b.classical,
                standard: a.classical && b.classical,
                interpreted: a.interpreted && b.interpreted,
                nonbranching: a.nonbranching && b.nonbranching,
                normalized: a.normalized && !lhs_is_concat && b.normalized,
                monadic: a.monadic && b.monadic,
                singleton: a.singleton && b.singleton,
                nullable: a.nullable.and(b.nullable),
                min_length: max_plus(a.min_length, b.min_length),
                star_height: a.star_height.max(b.star_height),
            }),
            (ReInfo::Known(_), other) => other,
            (other, _) => other,
        }
    }

    /// Union.
    #[must_use]
    pub fn disj(self, rhs: ReInfo) -> ReInfo {
        match (self, rhs) {
            (ReInfo::Known(a), ReInfo::Known(b)) => ReInfo::Known(ReProps {
                classical: a.classical && b.classical,
                standard: a.standard && b.standard,
                interpreted: a.interpreted && b.interpreted,
                nonbranching: a.nonbranching && b.nonbranching,
                normalized: a.normalized && b.normalized,
                monadic: a.monadic && b.monadic,
                singleton: a.singleton && b.singleton,
                nullable: a.nullable.or(b.nullable),
                min_length: a.min_length.min(b.min_length),
                star_height: a.star_height.max(b.star_height),
            }),
            (ReInfo::Known(_), other) => other,
            (other, _) => other,
        }
    }

    /// Intersection: excluded from the classical subset.
    #[must_use]
    pub fn conj(self, rhs: ReInfo) -> ReInfo {
        match (self, rhs) {
            (ReInfo::Known(a), ReInfo::Known(b)) => ReInfo::Known(ReProps {
                classical: false,
                standard: a.standard && b.standard,
                interpreted: a.interpreted && b.interpreted,
                nonbranching: a.nonbranching && b.nonbranching,
                normalized: a.normalized && b.normalized,
                monadic: a.monadic && b.monadic,
                singleton: a.singleton && b.singleton,
                nullable: a.nullable.and(b.nullable),
                min_length: a.min_length.max(b.min_length),
                star_height: a.star_height.max(b.star_height),
            }),
            (ReInfo::Known(_), other) => other,
            (other, _) => other,
        }
    }

    /// Difference: excluded from the classical subset. Accepted words stay
    /// within the left language, so the left length bound survives.
    #[must_use]
    pub fn diff(self, rhs: ReInfo) -> ReInfo {
        match (self, rhs) {
            (ReInfo::Known(a), ReInfo::Known(b)) => ReInfo::Known(ReProps {
                classical: false,
                standard: a.standard && b.standard,
                interpreted: a.interpreted && b.interpreted,
                nonbranching: a.nonbranching && b.nonbranching,
                normalized: a.normalized && b.normalized,
                monadic: a.monadic && b.monadic,
                singleton: false,
                nullable: a.nullable.and(b.nullable.negate()),
                min_length: a.min_length,
                star_height: a.star_height.max(b.star_height),
            }),
            (ReInfo::Known(_), other) => other,
            (other, _) => other,
        }
    }

    /// Combine the records of two syntactic alternatives considered during
    /// simplification. Guaranteed-true flags meet; fields where the records
    /// disagree stay indeterminate. Not itself a regex operator.
    #[must_use]
    pub fn orelse(self, rhs: ReInfo) -> ReInfo {
        match (self, rhs) {
            (ReInfo::Known(a), ReInfo::Known(b)) => ReInfo::Known(ReProps {
                classical: false,
                standard: false,
                interpreted: false,
                nonbranching: false,
                normalized: a.normalized && b.normalized,
                monadic: a.monadic && b.monadic,
                singleton: a.singleton && b.singleton,
                nullable: if a.nullable == b.nullable {
                    a.nullable
                } else {
                    Ternary::Unknown
                },
                min_length: a.min_length.min(b.min_length),
                star_height: a.star_height.max(b.star_height),
            }),
            (ReInfo::Known(_), other) => other,
            (other, _) => other,
        }
    }

    /// Bounded repetition with numeral bounds; `upper` of `None` means the
    /// loop is unbounded above.
    ///
    /// Per the normalization invariant a nullable-bodied loop is normalized
    /// only when its lower bound is zero; the combinator records whether
    /// the invariant holds, it never rewrites the term.
    #[must_use]
    pub fn loop_(self, lower: u64, upper: Option<u64>) -> ReInfo {
        match self {
            ReInfo::Known(p) => {
                let min_length = max_mul(p.min_length, lower);
                let nullable = if lower == 0 {
                    Ternary::True
                } else {
                    p.nullable
                };
                match upper {
                    None => ReInfo::Known(ReProps {
                        classical: p.classical,
                        standard: p.classical,
                        // r{lo,} denotes r{lo,lo} followed by r*.
                        normalized: false,
                        singleton: false,
                        nullable,
                        min_length,
                        star_height: p.star_height + 1,
                        ..p
                    }),
                    Some(upper) => {
                        let normalized = p.normalized
                            && !(p.nullable == Ternary::True && lower > 0)
                            && upper != 1
                            && lower <= upper;
                        ReInfo::Known(ReProps {
                            classical: p.classical,
                            standard: p.classical,
                            normalized,
                            monadic: p.monadic && p.singleton,
                            singleton: false,
                            nullable,
                            min_length,
                            star_height: p.star_height,
                            ..p
                        })
                    }
                }
            }
            other => other,
        }
    }
}

/// Memoized inference engine. Owns its cache, keyed by term identity; never
/// owns the terms.
#[derive(Debug, Default)]
pub struct ReInfoEngine {
    cache: FxHashMap<TermId, ReInfo>,
}

impl ReInfoEngine {
    /// Create an engine with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached record for `t`; [`ReInfo::Unknown`] when uncomputed.
    #[must_use]
    pub fn cached(&self, t: TermId) -> ReInfo {
        self.cache.get(&t).copied().unwrap_or(ReInfo::Unknown)
    }

    /// Number of cached records.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Compute (or fetch) the info record for a regex term.
    ///
    /// Iterative bottom-up pass with an explicit work list: sharing-safe
    /// (each distinct subterm is computed once) and tolerant of deep
    /// nesting. Operators outside the combinator set — including
    /// derivative- and antimorov-internal nodes and opaque regex-valued
    /// terms — yield the indeterminate record.
    pub fn info(&mut self, tm: &TermManager, t: TermId) -> ReInfo {
        if let Some(&cached) = self.cache.get(&t) {
            return cached;
        }
        trace!(term = t.0, "computing regex info");
        let mut stack = vec![t];
        while let Some(&cur) = stack.last() {
            if self.cache.contains_key(&cur) {
                stack.pop();
                continue;
            }
            let deps = Self::info_children(tm, cur);
            let mut pushed = false;
            for &dep in &deps {
                if !self.cache.contains_key(&dep) {
                    stack.push(dep);
                    pushed = true;
                }
            }
            if pushed {
                continue;
            }
            let record = self.combine(tm, cur);
            self.cache.insert(cur, record);
            stack.pop();
        }
        self.cached(t)
    }

    /// Regex operands whose records the combinator for `t` consumes.
    fn info_children(tm: &TermManager, t: TermId) -> SmallVec<[TermId; 2]> {
        let mut deps = SmallVec::new();
        match SeqPlugin::op_of(tm, t) {
            Some(
                SeqOp::ReStar
                | SeqOp::RePlus
                | SeqOp::ReOption
                | SeqOp::ReComplement
                | SeqOp::ReReverse,
            ) => deps.extend(tm.app_args(t).iter().copied()),
            Some(SeqOp::ReConcat | SeqOp::ReUnion | SeqOp::ReIntersect | SeqOp::ReDiff) => {
                deps.extend(tm.app_args(t).iter().copied());
            }
            Some(SeqOp::ReLoop) => {
                // Only the numeral-bound form is tracked.
                if let Some((body, _, _)) = facade::as_loop_bounds(tm, t) {
                    deps.push(body);
                }
            }
            _ => {}
        }
        deps
    }

    fn combine(&self, tm: &TermManager, t: TermId) -> ReInfo {
        let op = match SeqPlugin::op_of(tm, t) {
            Some(op) => op,
            None => return ReInfo::Indeterminate,
        };
        let arg_info = |i: usize| -> ReInfo {
            tm.app_args(t)
                .get(i)
                .map_or(ReInfo::Indeterminate, |&a| self.cached(a))
        };
        match op {
            SeqOp::ReEmptySet => {
                // No accepted word at all; the length bound saturates.
                ReInfo::Known(ReProps::leaf(Ternary::False, u64::MAX, 0))
            }
            SeqOp::ReFullSeqSet => {
                // Behaves as a starred all-character set.
                ReInfo::Known(ReProps::leaf(Ternary::True, 0, 1))
            }
            SeqOp::ReFullCharSet | SeqOp::ReRange | SeqOp::ReOfPred => {
                ReInfo::Known(ReProps::leaf(Ternary::False, 1, 0))
            }
            SeqOp::SeqToRe => {
                let Some(&arg) = tm.app_args(t).first() else {
                    return ReInfo::Indeterminate;
                };
                // Operands built over the uninterpreted index accessor (or
                // other witness applications) carry no trustworthy bound.
                if Self::derives_from_uninterpreted(tm, arg) {
                    return ReInfo::Indeterminate;
                }
                let min_length = facade::min_length(tm, arg);
                let is_value = SeqPlugin::is_value(tm, arg);
                let nullable = if is_value {
                    Ternary::from_bool(min_length == 0)
                } else if min_length > 0 {
                    Ternary::False
                } else {
                    Ternary::Unknown
                };
                ReInfo::Known(ReProps {
                    interpreted: is_value,
                    ..ReProps::leaf(nullable, min_length, 0)
                })
            }
            SeqOp::ReStar => arg_info(0).star(),
            SeqOp::RePlus => arg_info(0).plus(),
            SeqOp::ReOption => arg_info(0).opt(),
            SeqOp::ReComplement => arg_info(0).complement(),
            SeqOp::ReReverse => arg_info(0),
            SeqOp::ReConcat => {
                let args = tm.app_args(t);
                let Some((&last, init)) = args.split_last() else {
                    return ReInfo::Indeterminate;
                };
                let mut acc = self.cached(last);
                for &lhs in init.iter().rev() {
                    acc = self
                        .cached(lhs)
                        .concat(acc, facade::is_re_concat(tm, lhs));
                }
                acc
            }
            SeqOp::ReUnion => Self::fold_nary(tm, t, self, ReInfo::disj),
            SeqOp::ReIntersect => Self::fold_nary(tm, t, self, ReInfo::conj),
            SeqOp::ReDiff => arg_info(0).diff(arg_info(1)),
            SeqOp::ReLoop => match facade::as_loop_bounds(tm, t) {
                Some((_, lo, hi)) => arg_info(0).loop_(lo, hi),
                // Symbolic bounds are deliberately untracked.
                None => ReInfo::Indeterminate,
            },
            _ => ReInfo::Indeterminate,
        }
    }

    /// Whether a sequence operand is built over a considered-uninterpreted
    /// application (the out-of-range index accessor or a witness term).
    /// Checked along the concatenation spine and one level into units.
    fn derives_from_uninterpreted(tm: &TermManager, s: TermId) -> bool {
        facade::get_concat(tm, s).into_iter().any(|leaf| {
            let direct = SeqPlugin::op_of(tm, leaf)
                .is_some_and(SeqPlugin::is_considered_uninterpreted);
            let under_unit = facade::as_unit(tm, leaf).is_some_and(|elem| {
                SeqPlugin::op_of(tm, elem)
                    .is_some_and(SeqPlugin::is_considered_uninterpreted)
            });
            direct || under_unit
        })
    }

    fn fold_nary(
        tm: &TermManager,
        t: TermId,
        engine: &Self,
        combine: fn(ReInfo, ReInfo) -> ReInfo,
    ) -> ReInfo {
        let args = tm.app_args(t);
        let Some((&first, rest)) = args.split_first() else {
            return ReInfo::Indeterminate;
        };
        let mut acc = engine.cached(first);
        for &next in rest {
            acc = combine(acc, engine.cached(next));
        }
        acc
    }

    /// Lower bound on the length of words accepted by `r`; 0 when the
    /// record is not known.
    pub fn min_length(&mut self, tm: &TermManager, r: TermId) -> u64 {
        match self.info(tm, r) {
            ReInfo::Known(p) => p.min_length,
            _ => 0,
        }
    }
}

/// Syntactic upper bound on the length of words accepted by `r`; `None`
/// when unbounded or not derivable from shape.
#[must_use]
pub fn re_max_length(tm: &TermManager, r: TermId) -> Option<u64> {
    // Iterative post-order with a local memo, sharing-safe like the engine.
    let mut memo: FxHashMap<TermId, Option<u64>> = FxHashMap::default();
    let mut stack = vec![r];
    while let Some(&cur) = stack.last() {
        if memo.contains_key(&cur) {
            stack.pop();
            continue;
        }
        let deps: SmallVec<[TermId; 2]> = match SeqPlugin::op_of(tm, cur) {
            Some(
                SeqOp::ReConcat
                | SeqOp::ReUnion
                | SeqOp::ReIntersect
                | SeqOp::ReDiff
                | SeqOp::ReOption
                | SeqOp::ReReverse,
            ) => tm.app_args(cur).iter().copied().collect(),
            Some(SeqOp::ReLoop) => match facade::as_loop_bounds(tm, cur) {
                Some((body, _, Some(_))) => SmallVec::from_slice(&[body]),
                _ => SmallVec::new(),
            },
            Some(SeqOp::RePower) => match facade::as_power(tm, cur) {
                Some((body, _)) => SmallVec::from_slice(&[body]),
                None => SmallVec::new(),
            },
            _ => SmallVec::new(),
        };
        let mut pushed = false;
        for &dep in &deps {
            if !memo.contains_key(&dep) {
                stack.push(dep);
                pushed = true;
            }
        }
        if pushed {
            continue;
        }
        let bound = re_max_length_step(tm, cur, &memo);
        memo.insert(cur, bound);
        stack.pop();
    }
    memo.get(&r).copied().flatten()
}

fn re_max_length_step(
    tm: &TermManager,
    t: TermId,
    memo: &FxHashMap<TermId, Option<u64>>,
) -> Option<u64> {
    let sub = |a: TermId| memo.get(&a).copied().flatten();
    match SeqPlugin::op_of(tm, t)? {
        SeqOp::ReEmptySet => Some(0),
        SeqOp::ReFullCharSet | SeqOp::ReRange | SeqOp::ReOfPred => Some(1),
        SeqOp::SeqToRe => facade::max_length(tm, *tm.app_args(t).first()?),
        SeqOp::ReConcat => {
            let mut total: u64 = 0;
            for &arg in tm.app_args(t) {
                total = max_plus(total, sub(arg)?);
            }
            Some(total)
        }
        SeqOp::ReUnion => {
            let mut best: Option<u64> = None;
            for &arg in tm.app_args(t) {
                let b = sub(arg)?;
                best = Some(best.map_or(b, |x: u64| x.max(b)));
            }
            best
        }
        SeqOp::ReIntersect => {
            // Any operand bounds the intersection from above.
            tm.app_args(t).iter().filter_map(|&a| sub(a)).min()
        }
        SeqOp::ReDiff => sub(*tm.app_args(t).first()?),
        SeqOp::ReOption | SeqOp::ReReverse => sub(*tm.app_args(t).first()?),
        SeqOp::ReLoop => {
            let (body, _, hi) = facade::as_loop_bounds(tm, t)?;
            Some(max_mul(sub(body)?, hi?))
        }
        SeqOp::RePower => {
            let (body, n) = facade::as_power(tm, t)?;
            Some(max_mul(sub(body)?, n))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::SeqFacade;
    use crate::zstring::ZString;

    fn setup() -> (TermManager, SeqFacade, ReInfoEngine) {
        let mut tm = TermManager::new();
        let facade = SeqFacade::new(&mut tm);
        (tm, facade, ReInfoEngine::new())
    }

    fn range_az(tm: &mut TermManager, f: &mut SeqFacade) -> TermId {
        let a = f.mk_string(tm, &ZString::parse("a").expect("lit"));
        let z = f.mk_string(tm, &ZString::parse("z").expect("lit"));
        f.mk_range(tm, a, z).expect("range")
    }

    #[test]
    fn test_range_leaf_properties() {
        let (mut tm, mut f, mut engine) = setup();
        let r = range_az(&mut tm, &mut f);
        let props = *engine.info(&tm, r).props().expect("known");
        assert_eq!(props.min_length, 1);
        assert_eq!(props.nullable, Ternary::False);
        assert_eq!(props.star_height, 0);
        assert!(props.classical);
    }

    #[test]
    fn test_concat_sums_min_length() {
        let (mut tm, mut f, mut engine) = setup();
        let r1 = range_az(&mut tm, &mut f);
        let r2 = f.mk_re_concat(&mut tm, r1, r1).expect("concat");
        let props = *engine.info(&tm, r2).props().expect("known");
        assert_eq!(props.min_length, 2);
        assert_eq!(props.nullable, Ternary::False);
    }

    #[test]
    fn test_star_is_nullable_for_every_body() {
        let (mut tm, mut f, mut engine) = setup();
        let r = range_az(&mut tm, &mut f);
        let star = f.mk_re_star(&mut tm, r).expect("star");
        let props = *engine.info(&tm, star).props().expect("known");
        assert_eq!(props.nullable, Ternary::True);
        assert_eq!(props.min_length, 0);
        assert_eq!(props.star_height, 1);

        // Also for an opaque body: star of a variable is still nullable...
        let opaque = tm.mk_var("r", f.plugin().reglan_sort());
        let star2 = f.mk_re_star(&mut tm, opaque).expect("star");
        // ...but the body record is indeterminate, so the star's stays so.
        assert_eq!(engine.info(&tm, star2), ReInfo::Indeterminate);
    }

    #[test]
    fn test_determinism_and_idempotence() {
        let (mut tm, mut f, mut engine) = setup();
        let r = range_az(&mut tm, &mut f);
        let star = f.mk_re_star(&mut tm, r).expect("star");
        let first = engine.info(&tm, star);
        let second = engine.info(&tm, star);
        assert_eq!(first, second);

        let mut fresh = ReInfoEngine::new();
        assert_eq!(fresh.info(&tm, star), first);
    }

    #[test]
    fn test_complement_clears_classical() {
        let (mut tm, mut f, mut engine) = setup();
        let r = range_az(&mut tm, &mut f);
        assert!(engine.info(&tm, r).props().expect("known").classical);
        let comp = f.mk_re_complement(&mut tm, r).expect("complement");
        let props = *engine.info(&tm, comp).props().expect("known");
        assert!(!props.classical);
        // range is not nullable, so its complement is, with a zero bound
        assert_eq!(props.nullable, Ternary::True);
        assert_eq!(props.min_length, 0);

        let star = f.mk_re_star(&mut tm, r).expect("star");
        let comp_star = f.mk_re_complement(&mut tm, star).expect("complement");
        let props = *engine.info(&tm, comp_star).props().expect("known");
        assert!(!props.classical);
        assert_eq!(props.nullable, Ternary::False);
        assert_eq!(props.min_length, 1);
    }

    #[test]
    fn test_inter_and_diff_clear_classical() {
        let (mut tm, mut f, mut engine) = setup();
        let r = range_az(&mut tm, &mut f);
        let inter = f.mk_re_inter(&mut tm, r, r).expect("inter");
        assert!(!engine.info(&tm, inter).props().expect("known").classical);
        let diff = f.mk_re_diff(&mut tm, r, r).expect("diff");
        assert!(!engine.info(&tm, diff).props().expect("known").classical);
        let union = f.mk_re_union(&mut tm, r, r).expect("union");
        assert!(engine.info(&tm, union).props().expect("known").classical);
    }

    #[test]
    fn test_loop_normalization_invariant() {
        let (mut tm, mut f, mut engine) = setup();
        let r = range_az(&mut tm, &mut f);
        let nullable_body = f.mk_re_opt(&mut tm, r).expect("opt");
        assert_eq!(
            engine.info(&tm, nullable_body).props().expect("known").nullable,
            Ternary::True
        );

        // Nullable body with zero lower bound: the invariant holds.
        let loop0 = f.mk_re_loop(&mut tm, nullable_body, 0, 4).expect("loop");
        let props0 = *engine.info(&tm, loop0).props().expect("known");
        assert!(props0.normalized);
        assert_eq!(props0.nullable, Ternary::True);

        // Nullable body with positive lower bound: not normalized.
        let loop2 = f.mk_re_loop(&mut tm, nullable_body, 2, 4).expect("loop");
        let props2 = *engine.info(&tm, loop2).props().expect("known");
        assert!(!props2.normalized);
        assert_eq!(props2.min_length, 0);
    }

    #[test]
    fn test_loop_min_length_multiplies() {
        let (mut tm, mut f, mut engine) = setup();
        let r = range_az(&mut tm, &mut f);
        let loop24 = f.mk_re_loop(&mut tm, r, 2, 4).expect("loop");
        let props = *engine.info(&tm, loop24).props().expect("known");
        assert_eq!(props.min_length, 2);
        assert_eq!(props.nullable, Ternary::False);
        assert_eq!(props.star_height, 0);

        let unbounded = f.mk_re_loop_lower(&mut tm, r, 3).expect("loop");
        let props = *engine.info(&tm, unbounded).props().expect("known");
        assert_eq!(props.min_length, 3);
        assert!(!props.normalized);
        assert_eq!(props.star_height, 1);
    }

    #[test]
    fn test_to_re_of_literal() {
        let (mut tm, mut f, mut engine) = setup();
        let ab = f.mk_string(&mut tm, &ZString::parse("ab").expect("lit"));
        let re_ab = f.mk_to_re(&mut tm, ab).expect("to_re");
        let props = *engine.info(&tm, re_ab).props().expect("known");
        assert_eq!(props.min_length, 2);
        assert_eq!(props.nullable, Ternary::False);
        assert!(props.interpreted);

        let string = f.plugin().string_sort();
        let eps = f.mk_epsilon(&mut tm, string).expect("epsilon");
        let props = *engine.info(&tm, eps).props().expect("known");
        assert_eq!(props.min_length, 0);
        assert_eq!(props.nullable, Ternary::True);

        // Symbolic operand: length bound zero, nullability open.
        let x = tm.mk_var("x", string);
        let re_x = f.mk_to_re(&mut tm, x).expect("to_re");
        let props = *engine.info(&tm, re_x).props().expect("known");
        assert_eq!(props.nullable, Ternary::Unknown);
        assert!(!props.interpreted);
    }

    #[test]
    fn test_untracked_operators_are_indeterminate() {
        let (mut tm, mut f, mut engine) = setup();
        let r = range_az(&mut tm, &mut f);
        let c = f.mk_char(&mut tm, 0x61).expect("char");
        let deriv = f.mk_re_derivative(&mut tm, c, r).expect("derivative");
        assert_eq!(engine.info(&tm, deriv), ReInfo::Indeterminate);

        let anti = f.mk_re_antimorov_union(&mut tm, r, r).expect("antimorov");
        assert_eq!(engine.info(&tm, anti), ReInfo::Indeterminate);

        let lo = tm.mk_var("lo", tm.sorts.int_sort);
        let sym_loop = f.mk_re_loop_terms(&mut tm, r, lo, None).expect("loop");
        assert_eq!(engine.info(&tm, sym_loop), ReInfo::Indeterminate);

        // Cached as computed-indeterminate, not recomputed.
        assert_eq!(engine.cached(deriv), ReInfo::Indeterminate);
    }

    #[test]
    fn test_empty_set_and_full_sets() {
        let (mut tm, mut f, mut engine) = setup();
        let reglan = f.plugin().reglan_sort();
        let none = f.mk_re_empty(&mut tm, reglan).expect("none");
        let props = *engine.info(&tm, none).props().expect("known");
        assert_eq!(props.nullable, Ternary::False);
        assert_eq!(props.min_length, u64::MAX);

        let all = f.mk_re_full_seq(&mut tm, reglan).expect("all");
        let props = *engine.info(&tm, all).props().expect("known");
        assert_eq!(props.nullable, Ternary::True);
        assert_eq!(props.min_length, 0);

        let allchar = f.mk_re_full_char(&mut tm, reglan).expect("allchar");
        let props = *engine.info(&tm, allchar).props().expect("known");
        assert_eq!(props.min_length, 1);
    }

    #[test]
    fn test_orelse_meets_disagreement() {
        let a = ReInfo::Known(ReProps::leaf(Ternary::True, 0, 0));
        let b = ReInfo::Known(ReProps::leaf(Ternary::False, 2, 1));
        let combined = a.orelse(b);
        let props = combined.props().expect("known");
        assert_eq!(props.nullable, Ternary::Unknown);
        assert_eq!(props.min_length, 0);
        assert_eq!(props.star_height, 1);
        assert!(!props.classical);
    }

    #[test]
    fn test_shared_subterms_computed_once() {
        let (mut tm, mut f, mut engine) = setup();
        let r = range_az(&mut tm, &mut f);
        // Build a deep chain with heavy sharing: r{i+1} = r{i} ++ r{i}.
        let mut cur = r;
        for _ in 0..64 {
            cur = f.mk_re_concat(&mut tm, cur, cur).expect("concat");
        }
        let props = *engine.info(&tm, cur).props().expect("known");
        // One record per distinct subterm, not per occurrence.
        assert_eq!(engine.cache_len(), 65);
        assert_eq!(props.min_length, u64::MAX); // saturated
    }

    #[test]
    fn test_re_max_length_bounds() {
        let (mut tm, mut f, _) = setup();
        let r = range_az(&mut tm, &mut f);
        assert_eq!(re_max_length(&tm, r), Some(1));

        let cat = f.mk_re_concat(&mut tm, r, r).expect("concat");
        assert_eq!(re_max_length(&tm, cat), Some(2));

        let loop24 = f.mk_re_loop(&mut tm, r, 2, 4).expect("loop");
        assert_eq!(re_max_length(&tm, loop24), Some(4));

        let star = f.mk_re_star(&mut tm, r).expect("star");
        assert_eq!(re_max_length(&tm, star), None);

        let inter = f.mk_re_inter(&mut tm, star, r).expect("inter");
        assert_eq!(re_max_length(&tm, inter), Some(1));
    }
}
