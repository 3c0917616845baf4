//! Term Construction and Recognition Facade.
//!
//! Typed builders and matchers over the generic term graph for every
//! sequence/string/regex operator. Builders resolve declarations through the
//! plugin and construct application nodes; matchers and destructors read
//! term structure so downstream code never pattern-matches on raw operator
//! codes. The facade is stateless beyond the plugin it carries.

use smallvec::SmallVec;
use strand_core::{DeclParam, Result, SortId, StrandError, TermId, TermManager};

use crate::ops::SeqOp;
use crate::plugin::SeqPlugin;
use crate::zstring::ZString;

/// Saturating addition used for syntactic length bounds.
#[must_use]
pub fn max_plus(a: u64, b: u64) -> u64 {
    a.saturating_add(b)
}

/// Saturating multiplication used for syntactic length bounds.
#[must_use]
pub fn max_mul(a: u64, b: u64) -> u64 {
    a.saturating_mul(b)
}

/// Operator kind of a term, when it is an application of this theory.
#[must_use]
pub fn op_of(tm: &TermManager, term: TermId) -> Option<SeqOp> {
    SeqPlugin::op_of(tm, term)
}

macro_rules! is_op {
    ($(#[$meta:meta])* $name:ident, $op:path) => {
        $(#[$meta])*
        #[must_use]
        pub fn $name(tm: &TermManager, t: TermId) -> bool {
            op_of(tm, t) == Some($op)
        }
    };
}

macro_rules! match_unary {
    ($(#[$meta:meta])* $name:ident, $op:path) => {
        $(#[$meta])*
        #[must_use]
        pub fn $name(tm: &TermManager, t: TermId) -> Option<TermId> {
            if op_of(tm, t) != Some($op) {
                return None;
            }
            match tm.app_args(t) {
                [a] => Some(*a),
                _ => None,
            }
        }
    };
}

macro_rules! match_binary {
    ($(#[$meta:meta])* $name:ident, $op:path) => {
        $(#[$meta])*
        #[must_use]
        pub fn $name(tm: &TermManager, t: TermId) -> Option<(TermId, TermId)> {
            if op_of(tm, t) != Some($op) {
                return None;
            }
            match tm.app_args(t) {
                [a, b] => Some((*a, *b)),
                _ => None,
            }
        }
    };
}

macro_rules! match_ternary {
    ($(#[$meta:meta])* $name:ident, $op:path) => {
        $(#[$meta])*
        #[must_use]
        pub fn $name(tm: &TermManager, t: TermId) -> Option<(TermId, TermId, TermId)> {
            if op_of(tm, t) != Some($op) {
                return None;
            }
            match tm.app_args(t) {
                [a, b, c] => Some((*a, *b, *c)),
                _ => None,
            }
        }
    };
}

is_op!(/// Sequence concatenation test.
    is_concat, SeqOp::SeqConcat);
is_op!(/// Empty-sequence constructor test.
    is_empty_seq, SeqOp::SeqEmpty);
is_op!(/// Unit-sequence test.
    is_unit, SeqOp::SeqUnit);
is_op!(/// Length test.
    is_length, SeqOp::SeqLength);
is_op!(/// Extraction test.
    is_extract, SeqOp::SeqExtract);
is_op!(/// Containment test.
    is_contains, SeqOp::SeqContains);
is_op!(/// Element-or-empty access test.
    is_at, SeqOp::SeqAt);
is_op!(/// Total element access test.
    is_nth, SeqOp::SeqNth);
is_op!(/// Interpreted element access test.
    is_nth_i, SeqOp::SeqNthI);
is_op!(/// Uninterpreted element access test.
    is_nth_u, SeqOp::SeqNthU);
is_op!(/// Index-of test.
    is_index, SeqOp::SeqIndex);
is_op!(/// Last-index-of test.
    is_last_index, SeqOp::SeqLastIndex);
is_op!(/// Replace-first test.
    is_replace, SeqOp::SeqReplace);
is_op!(/// Replace-all test.
    is_replace_all, SeqOp::SeqReplaceAll);
is_op!(/// Replace-first-regex-match test.
    is_replace_re, SeqOp::SeqReplaceRe);
is_op!(/// Replace-all-regex-matches test.
    is_replace_re_all, SeqOp::SeqReplaceReAll);
is_op!(/// Prefix-predicate test.
    is_prefix, SeqOp::SeqPrefix);
is_op!(/// Suffix-predicate test.
    is_suffix, SeqOp::SeqSuffix);
is_op!(/// Integer-to-string test.
    is_itos, SeqOp::StringItos);
is_op!(/// String-to-integer test.
    is_stoi, SeqOp::StringStoi);
is_op!(/// Regex-membership test.
    is_in_re, SeqOp::SeqInRe);
is_op!(/// Lexicographic strict-order test.
    is_lt, SeqOp::StringLt);
is_op!(/// Lexicographic order test.
    is_le, SeqOp::StringLe);
is_op!(/// Digit-predicate test.
    is_is_digit, SeqOp::StringIsDigit);
is_op!(/// To-code test.
    is_to_code, SeqOp::StringToCode);
is_op!(/// From-code test.
    is_from_code, SeqOp::StringFromCode);
is_op!(/// Character-order test.
    is_char_le, SeqOp::CharLe);
is_op!(/// Internal witness test.
    is_skolem, SeqOp::SeqSkolem);
is_op!(/// String-literal test.
    is_string_const, SeqOp::StringConst);
is_op!(/// Sequence-to-regex injection test.
    is_to_re, SeqOp::SeqToRe);
is_op!(/// Regex concatenation test.
    is_re_concat, SeqOp::ReConcat);
is_op!(/// Regex union test.
    is_re_union, SeqOp::ReUnion);
is_op!(/// Regex intersection test.
    is_re_inter, SeqOp::ReIntersect);
is_op!(/// Regex difference test.
    is_re_diff, SeqOp::ReDiff);
is_op!(/// Regex complement test.
    is_re_complement, SeqOp::ReComplement);
is_op!(/// Kleene-star test.
    is_re_star, SeqOp::ReStar);
is_op!(/// One-or-more repetition test.
    is_re_plus, SeqOp::RePlus);
is_op!(/// Zero-or-one repetition test.
    is_re_opt, SeqOp::ReOption);
is_op!(/// Character-range test.
    is_re_range, SeqOp::ReRange);
is_op!(/// Bounded-repetition test.
    is_re_loop, SeqOp::ReLoop);
is_op!(/// Fixed-power test.
    is_re_power, SeqOp::RePower);
is_op!(/// Empty-language test.
    is_re_empty, SeqOp::ReEmptySet);
is_op!(/// All-characters-language test.
    is_re_full_char, SeqOp::ReFullCharSet);
is_op!(/// All-sequences-language test.
    is_re_full_seq, SeqOp::ReFullSeqSet);
is_op!(/// Predicate-language test.
    is_re_of_pred, SeqOp::ReOfPred);
is_op!(/// Regex-reversal test.
    is_re_reverse, SeqOp::ReReverse);
is_op!(/// Symbolic-derivative test.
    is_re_derivative, SeqOp::ReDerivative);
is_op!(/// Internal lifted-union test.
    is_re_antimorov_union, SeqOp::ReAntimorovUnion);
is_op!(/// Internal nullability-test test.
    is_re_is_nullable, SeqOp::ReIsNullable);

match_binary!(/// Destructure a binary concatenation.
    as_concat, SeqOp::SeqConcat);
match_unary!(/// Destructure a unit sequence.
    as_unit, SeqOp::SeqUnit);
match_unary!(/// Destructure a length application.
    as_length, SeqOp::SeqLength);
match_ternary!(/// Destructure an extraction.
    as_extract, SeqOp::SeqExtract);
match_binary!(/// Destructure a containment predicate.
    as_contains, SeqOp::SeqContains);
match_binary!(/// Destructure an element-or-empty access.
    as_at, SeqOp::SeqAt);
match_binary!(/// Destructure a total element access.
    as_nth, SeqOp::SeqNth);
match_binary!(/// Destructure an interpreted element access.
    as_nth_i, SeqOp::SeqNthI);
match_binary!(/// Destructure an uninterpreted element access.
    as_nth_u, SeqOp::SeqNthU);
match_ternary!(/// Destructure a three-argument index-of.
    as_index, SeqOp::SeqIndex);
match_binary!(/// Destructure a two-argument index-of.
    as_index2, SeqOp::SeqIndex);
match_binary!(/// Destructure a last-index-of.
    as_last_index, SeqOp::SeqLastIndex);
match_ternary!(/// Destructure a replace-first.
    as_replace, SeqOp::SeqReplace);
match_ternary!(/// Destructure a replace-all.
    as_replace_all, SeqOp::SeqReplaceAll);
match_ternary!(/// Destructure a replace-first-regex-match.
    as_replace_re, SeqOp::SeqReplaceRe);
match_ternary!(/// Destructure a replace-all-regex-matches.
    as_replace_re_all, SeqOp::SeqReplaceReAll);
match_binary!(/// Destructure a prefix predicate.
    as_prefix, SeqOp::SeqPrefix);
match_binary!(/// Destructure a suffix predicate.
    as_suffix, SeqOp::SeqSuffix);
match_unary!(/// Destructure an integer-to-string conversion.
    as_itos, SeqOp::StringItos);
match_unary!(/// Destructure a string-to-integer conversion.
    as_stoi, SeqOp::StringStoi);
match_binary!(/// Destructure a regex membership.
    as_in_re, SeqOp::SeqInRe);
match_binary!(/// Destructure a lexicographic strict order.
    as_lt, SeqOp::StringLt);
match_binary!(/// Destructure a lexicographic order.
    as_le, SeqOp::StringLe);
match_unary!(/// Destructure a digit predicate.
    as_is_digit, SeqOp::StringIsDigit);
match_unary!(/// Destructure a to-code conversion.
    as_to_code, SeqOp::StringToCode);
match_unary!(/// Destructure a from-code conversion.
    as_from_code, SeqOp::StringFromCode);
match_binary!(/// Destructure a character order.
    as_char_le, SeqOp::CharLe);
match_unary!(/// Destructure a sequence-to-regex injection.
    as_to_re, SeqOp::SeqToRe);
match_binary!(/// Destructure a binary regex concatenation.
    as_re_concat, SeqOp::ReConcat);
match_binary!(/// Destructure a binary regex union.
    as_re_union, SeqOp::ReUnion);
match_binary!(/// Destructure a binary regex intersection.
    as_re_inter, SeqOp::ReIntersect);
match_binary!(/// Destructure a regex difference.
    as_re_diff, SeqOp::ReDiff);
match_unary!(/// Destructure a regex complement.
    as_re_complement, SeqOp::ReComplement);
match_unary!(/// Destructure a Kleene star.
    as_re_star, SeqOp::ReStar);
match_unary!(/// Destructure a one-or-more repetition.
    as_re_plus, SeqOp::RePlus);
match_unary!(/// Destructure a zero-or-one repetition.
    as_re_opt, SeqOp::ReOption);
match_binary!(/// Destructure a character range.
    as_re_range, SeqOp::ReRange);
match_unary!(/// Destructure a predicate language.
    as_re_of_pred, SeqOp::ReOfPred);
match_unary!(/// Destructure a regex reversal.
    as_re_reverse, SeqOp::ReReverse);
match_binary!(/// Destructure a symbolic derivative.
    as_re_derivative, SeqOp::ReDerivative);
match_binary!(/// Destructure an internal lifted union.
    as_re_antimorov_union, SeqOp::ReAntimorovUnion);

/// Decoded value of a string constant (or constant-valued composition).
#[must_use]
pub fn as_string_value(tm: &TermManager, t: TermId) -> Option<ZString> {
    SeqPlugin::const_value(tm, t)
}

/// Code point of a character constant.
#[must_use]
pub fn as_const_char(tm: &TermManager, t: TermId) -> Option<u32> {
    SeqPlugin::const_char(tm, t)
}

/// Whether `t` denotes the empty sequence (constructor or empty literal).
#[must_use]
pub fn is_empty_value(tm: &TermManager, t: TermId) -> bool {
    match op_of(tm, t) {
        Some(SeqOp::SeqEmpty) => true,
        Some(SeqOp::StringConst) => {
            as_string_value(tm, t).is_some_and(|v| v.is_empty())
        }
        _ => false,
    }
}

/// Whether `t` is `to_re` of the empty sequence.
#[must_use]
pub fn is_epsilon(tm: &TermManager, t: TermId) -> bool {
    as_to_re(tm, t).is_some_and(|s| is_empty_value(tm, s))
}

/// Destructure a loop whose bounds are declaration parameters: body, lower,
/// optional upper.
#[must_use]
pub fn as_loop_bounds(tm: &TermManager, t: TermId) -> Option<(TermId, u64, Option<u64>)> {
    if op_of(tm, t) != Some(SeqOp::ReLoop) {
        return None;
    }
    let body = match tm.app_args(t) {
        [r] => *r,
        _ => return None,
    };
    let decl = tm.get_decl(tm.app_decl(t)?)?;
    let mut bounds = decl.params.iter().filter_map(|p| match p {
        DeclParam::Int(n) => Some(*n),
        _ => None,
    });
    let lo = bounds.next()?;
    let hi = bounds.next();
    Some((body, lo, hi))
}

/// Destructure a loop whose bounds are terms: body, lower, optional upper.
#[must_use]
pub fn as_loop_terms(tm: &TermManager, t: TermId) -> Option<(TermId, TermId, Option<TermId>)> {
    if op_of(tm, t) != Some(SeqOp::ReLoop) {
        return None;
    }
    match tm.app_args(t) {
        [r, lo] => Some((*r, *lo, None)),
        [r, lo, hi] => Some((*r, *lo, Some(*hi))),
        _ => None,
    }
}

/// Exponent of a fixed power, from its declaration parameters.
#[must_use]
pub fn as_power(tm: &TermManager, t: TermId) -> Option<(TermId, u64)> {
    if op_of(tm, t) != Some(SeqOp::RePower) {
        return None;
    }
    let body = match tm.app_args(t) {
        [r] => *r,
        _ => return None,
    };
    let decl = tm.get_decl(tm.app_decl(t)?)?;
    match decl.params.first()? {
        DeclParam::Int(n) => Some((body, *n)),
        _ => None,
    }
}

/// Flatten a concatenation into its leaf sequence, in term order.
///
/// Iterative spine walk: terminates on any finite term graph and reports
/// each occurrence along the flattened spine exactly once.
#[must_use]
pub fn get_concat(tm: &TermManager, t: TermId) -> Vec<TermId> {
    let mut out = Vec::new();
    let mut stack = vec![t];
    while let Some(cur) = stack.pop() {
        if op_of(tm, cur) == Some(SeqOp::SeqConcat) {
            for &arg in tm.app_args(cur).iter().rev() {
                stack.push(arg);
            }
        } else {
            out.push(cur);
        }
    }
    out
}

/// Leftmost leaf of a concatenation chain.
#[must_use]
pub fn leftmost_concat(tm: &TermManager, mut t: TermId) -> TermId {
    while op_of(tm, t) == Some(SeqOp::SeqConcat) {
        match tm.app_args(t).first() {
            Some(&first) => t = first,
            None => break,
        }
    }
    t
}

/// Rightmost leaf of a concatenation chain.
#[must_use]
pub fn rightmost_concat(tm: &TermManager, mut t: TermId) -> TermId {
    while op_of(tm, t) == Some(SeqOp::SeqConcat) {
        match tm.app_args(t).last() {
            Some(&last) => t = last,
            None => break,
        }
    }
    t
}

/// Syntactic lower bound on the length of a sequence term, from shape alone.
#[must_use]
pub fn min_length(tm: &TermManager, t: TermId) -> u64 {
    let mut total: u64 = 0;
    let mut stack = vec![t];
    while let Some(cur) = stack.pop() {
        match op_of(tm, cur) {
            Some(SeqOp::SeqConcat) => stack.extend(tm.app_args(cur).iter().copied()),
            Some(SeqOp::SeqUnit) => total = max_plus(total, 1),
            Some(SeqOp::StringConst) => {
                let len = as_string_value(tm, cur).map_or(0, |v| v.len() as u64);
                total = max_plus(total, len);
            }
            _ => {}
        }
    }
    total
}

/// Syntactic upper bound on the length of a sequence term; `None` when the
/// shape gives no bound.
#[must_use]
pub fn max_length(tm: &TermManager, t: TermId) -> Option<u64> {
    match op_of(tm, t)? {
        SeqOp::SeqEmpty => Some(0),
        SeqOp::SeqUnit | SeqOp::SeqAt => Some(1),
        SeqOp::StringConst => as_string_value(tm, t).map(|v| v.len() as u64),
        SeqOp::SeqConcat => {
            let mut total: u64 = 0;
            for &arg in tm.app_args(t) {
                total = max_plus(total, max_length(tm, arg)?);
            }
            Some(total)
        }
        SeqOp::SeqExtract => {
            // Bounded by a numeral extraction length when one is present.
            let (_, _, len) = as_extract(tm, t)?;
            tm.as_u64(len)
        }
        _ => None,
    }
}

/// The term construction facade: typed builders over the plugin.
#[derive(Debug)]
pub struct SeqFacade {
    plugin: SeqPlugin,
}

impl SeqFacade {
    /// Create a facade with a freshly initialized plugin.
    pub fn new(tm: &mut TermManager) -> Self {
        Self {
            plugin: SeqPlugin::new(tm),
        }
    }

    /// The underlying plugin.
    #[must_use]
    pub fn plugin(&self) -> &SeqPlugin {
        &self.plugin
    }

    /// The underlying plugin, mutably.
    pub fn plugin_mut(&mut self) -> &mut SeqPlugin {
        &mut self.plugin
    }

    fn arg_sorts(tm: &TermManager, args: &[TermId]) -> Result<SmallVec<[SortId; 3]>> {
        args.iter()
            .map(|&a| {
                tm.sort_of(a).ok_or_else(|| StrandError::SortMismatch {
                    expected: "a term of this graph".to_string(),
                    found: format!("unknown term #{}", a.0),
                })
            })
            .collect()
    }

    fn app(
        &mut self,
        tm: &mut TermManager,
        op: SeqOp,
        params: &[DeclParam],
        args: &[TermId],
    ) -> Result<TermId> {
        let domain = Self::arg_sorts(tm, args)?;
        let decl = self.plugin.mk_func_decl(tm, op, params, &domain, None)?;
        tm.mk_app(decl, args)
    }

    fn app_ranged(
        &mut self,
        tm: &mut TermManager,
        op: SeqOp,
        range: SortId,
        args: &[TermId],
    ) -> Result<TermId> {
        let domain = Self::arg_sorts(tm, args)?;
        let decl = self.plugin.mk_func_decl(tm, op, &[], &domain, Some(range))?;
        tm.mk_app(decl, args)
    }

    // ---- sequence and string builders ----

    /// The empty sequence of `sort`.
    pub fn mk_empty(&mut self, tm: &mut TermManager, sort: SortId) -> Result<TermId> {
        self.app_ranged(tm, SeqOp::SeqEmpty, sort, &[])
    }

    /// Singleton sequence of one element.
    pub fn mk_unit(&mut self, tm: &mut TermManager, elem: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqUnit, &[], &[elem])
    }

    /// Binary concatenation.
    pub fn mk_concat(&mut self, tm: &mut TermManager, a: TermId, b: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqConcat, &[], &[a, b])
    }

    /// N-ary concatenation: empty for zero terms, the term itself for one.
    pub fn mk_concat_n(
        &mut self,
        tm: &mut TermManager,
        terms: &[TermId],
        sort: SortId,
    ) -> Result<TermId> {
        match terms {
            [] => self.mk_empty(tm, sort),
            [t] => Ok(*t),
            _ => self.app(tm, SeqOp::SeqConcat, &[], terms),
        }
    }

    /// Sequence length.
    pub fn mk_length(&mut self, tm: &mut TermManager, s: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqLength, &[], &[s])
    }

    /// Unit-or-empty element access.
    pub fn mk_at(&mut self, tm: &mut TermManager, s: TermId, i: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqAt, &[], &[s, i])
    }

    /// Total-domain element access. Rewriting splits it into the
    /// interpreted in-range variant and the uninterpreted out-of-range one,
    /// so out-of-domain indexing stays symbolic without asserting a value.
    pub fn mk_nth(&mut self, tm: &mut TermManager, s: TermId, i: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqNth, &[], &[s, i])
    }

    /// Interpreted element access for in-range indices.
    pub fn mk_nth_i(&mut self, tm: &mut TermManager, s: TermId, i: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqNthI, &[], &[s, i])
    }

    /// Uninterpreted element access for out-of-range indices.
    pub fn mk_nth_u(&mut self, tm: &mut TermManager, s: TermId, i: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqNthU, &[], &[s, i])
    }

    /// Subsequence extraction.
    pub fn mk_extract(
        &mut self,
        tm: &mut TermManager,
        s: TermId,
        offset: TermId,
        length: TermId,
    ) -> Result<TermId> {
        self.app(tm, SeqOp::SeqExtract, &[], &[s, offset, length])
    }

    /// Containment predicate.
    pub fn mk_contains(&mut self, tm: &mut TermManager, s: TermId, sub: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqContains, &[], &[s, sub])
    }

    /// Prefix predicate: `a` is a prefix of `b`.
    pub fn mk_prefix(&mut self, tm: &mut TermManager, a: TermId, b: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqPrefix, &[], &[a, b])
    }

    /// Suffix predicate: `a` is a suffix of `b`.
    pub fn mk_suffix(&mut self, tm: &mut TermManager, a: TermId, b: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqSuffix, &[], &[a, b])
    }

    /// Index of the first occurrence of `sub` in `s` at or after `offset`.
    pub fn mk_index(
        &mut self,
        tm: &mut TermManager,
        s: TermId,
        sub: TermId,
        offset: TermId,
    ) -> Result<TermId> {
        self.app(tm, SeqOp::SeqIndex, &[], &[s, sub, offset])
    }

    /// Index of the first occurrence of `sub` in `s`.
    pub fn mk_index2(&mut self, tm: &mut TermManager, s: TermId, sub: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqIndex, &[], &[s, sub])
    }

    /// Index of the last occurrence of `sub` in `s`.
    pub fn mk_last_index(&mut self, tm: &mut TermManager, s: TermId, sub: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqLastIndex, &[], &[s, sub])
    }

    /// Replace the first occurrence of `src` in `s` with `dst`.
    pub fn mk_replace(
        &mut self,
        tm: &mut TermManager,
        s: TermId,
        src: TermId,
        dst: TermId,
    ) -> Result<TermId> {
        self.app(tm, SeqOp::SeqReplace, &[], &[s, src, dst])
    }

    /// Replace every occurrence of `src` in `s` with `dst`.
    pub fn mk_replace_all(
        &mut self,
        tm: &mut TermManager,
        s: TermId,
        src: TermId,
        dst: TermId,
    ) -> Result<TermId> {
        self.app(tm, SeqOp::SeqReplaceAll, &[], &[s, src, dst])
    }

    /// Replace the first match of regex `r` in `s` with `dst`.
    pub fn mk_replace_re(
        &mut self,
        tm: &mut TermManager,
        s: TermId,
        r: TermId,
        dst: TermId,
    ) -> Result<TermId> {
        self.app(tm, SeqOp::SeqReplaceRe, &[], &[s, r, dst])
    }

    /// Replace every match of regex `r` in `s` with `dst`.
    pub fn mk_replace_re_all(
        &mut self,
        tm: &mut TermManager,
        s: TermId,
        r: TermId,
        dst: TermId,
    ) -> Result<TermId> {
        self.app(tm, SeqOp::SeqReplaceReAll, &[], &[s, r, dst])
    }

    /// Integer-to-string conversion.
    pub fn mk_itos(&mut self, tm: &mut TermManager, i: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::StringItos, &[], &[i])
    }

    /// String-to-integer conversion.
    pub fn mk_stoi(&mut self, tm: &mut TermManager, s: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::StringStoi, &[], &[s])
    }

    /// Lexicographic strict order.
    pub fn mk_lex_lt(&mut self, tm: &mut TermManager, a: TermId, b: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::StringLt, &[], &[a, b])
    }

    /// Lexicographic order.
    pub fn mk_lex_le(&mut self, tm: &mut TermManager, a: TermId, b: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::StringLe, &[], &[a, b])
    }

    /// Code point of a length-one string.
    pub fn mk_to_code(&mut self, tm: &mut TermManager, s: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::StringToCode, &[], &[s])
    }

    /// Length-one string from a code point.
    pub fn mk_from_code(&mut self, tm: &mut TermManager, i: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::StringFromCode, &[], &[i])
    }

    /// Digit predicate on a length-one string.
    pub fn mk_is_digit(&mut self, tm: &mut TermManager, s: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::StringIsDigit, &[], &[s])
    }

    /// Unicode order on characters.
    pub fn mk_char_le(&mut self, tm: &mut TermManager, a: TermId, b: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::CharLe, &[], &[a, b])
    }

    /// Canonical string constant.
    pub fn mk_string(&mut self, tm: &mut TermManager, value: &ZString) -> TermId {
        self.plugin.mk_string(tm, value)
    }

    /// Canonical character constant.
    pub fn mk_char(&mut self, tm: &mut TermManager, code: u32) -> Result<TermId> {
        self.plugin.mk_char(tm, code)
    }

    /// Nest a chain of binary applications of a flattenable operator,
    /// associating per the operator's policy.
    pub fn mk_assoc_chain(
        &mut self,
        tm: &mut TermManager,
        op: SeqOp,
        terms: &[TermId],
    ) -> Result<TermId> {
        let assoc = SeqPlugin::assoc_policy(op).ok_or_else(|| {
            StrandError::UnknownOperator(format!("{} is not associative", op.seq_name()))
        })?;
        match terms {
            [] => Err(StrandError::Arity {
                op: op.seq_name().to_string(),
                expected: 1,
                found: 0,
            }),
            [t] => Ok(*t),
            _ => match assoc {
                crate::signature::Assoc::Right => {
                    let mut iter = terms.iter().rev();
                    let mut acc = *iter.next().expect("nonempty");
                    for &t in iter {
                        acc = self.app(tm, op, &[], &[t, acc])?;
                    }
                    Ok(acc)
                }
                crate::signature::Assoc::Left => {
                    let mut iter = terms.iter();
                    let mut acc = *iter.next().expect("nonempty");
                    for &t in iter {
                        acc = self.app(tm, op, &[], &[acc, t])?;
                    }
                    Ok(acc)
                }
            },
        }
    }

    /// Internal witness application.
    pub fn mk_skolem(
        &mut self,
        tm: &mut TermManager,
        name: &str,
        args: &[TermId],
        range: SortId,
    ) -> Result<TermId> {
        let domain = Self::arg_sorts(tm, args)?;
        let decl = self.plugin.mk_skolem_decl(tm, name, &domain, range);
        tm.mk_app(decl, args)
    }

    // ---- regex builders ----

    /// Inject a sequence into regular expressions.
    pub fn mk_to_re(&mut self, tm: &mut TermManager, s: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqToRe, &[], &[s])
    }

    /// Regex membership predicate.
    pub fn mk_in_re(&mut self, tm: &mut TermManager, s: TermId, r: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::SeqInRe, &[], &[s, r])
    }

    /// Character range between two length-one sequences.
    pub fn mk_range(&mut self, tm: &mut TermManager, lo: TermId, hi: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::ReRange, &[], &[lo, hi])
    }

    /// Regex concatenation.
    pub fn mk_re_concat(&mut self, tm: &mut TermManager, a: TermId, b: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::ReConcat, &[], &[a, b])
    }

    /// Regex union.
    pub fn mk_re_union(&mut self, tm: &mut TermManager, a: TermId, b: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::ReUnion, &[], &[a, b])
    }

    /// Regex intersection.
    pub fn mk_re_inter(&mut self, tm: &mut TermManager, a: TermId, b: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::ReIntersect, &[], &[a, b])
    }

    /// Regex difference.
    pub fn mk_re_diff(&mut self, tm: &mut TermManager, a: TermId, b: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::ReDiff, &[], &[a, b])
    }

    /// Regex complement.
    pub fn mk_re_complement(&mut self, tm: &mut TermManager, r: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::ReComplement, &[], &[r])
    }

    /// Kleene star.
    pub fn mk_re_star(&mut self, tm: &mut TermManager, r: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::ReStar, &[], &[r])
    }

    /// One-or-more repetition.
    pub fn mk_re_plus(&mut self, tm: &mut TermManager, r: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::RePlus, &[], &[r])
    }

    /// Zero-or-one repetition.
    pub fn mk_re_opt(&mut self, tm: &mut TermManager, r: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::ReOption, &[], &[r])
    }

    /// Bounded repetition with numeral bounds.
    pub fn mk_re_loop(
        &mut self,
        tm: &mut TermManager,
        r: TermId,
        lo: u64,
        hi: u64,
    ) -> Result<TermId> {
        let params = [DeclParam::Int(lo), DeclParam::Int(hi)];
        self.app(tm, SeqOp::ReLoop, &params, &[r])
    }

    /// Lower-bounded repetition with a numeral bound.
    pub fn mk_re_loop_lower(
        &mut self,
        tm: &mut TermManager,
        r: TermId,
        lo: u64,
    ) -> Result<TermId> {
        let params = [DeclParam::Int(lo)];
        self.app(tm, SeqOp::ReLoop, &params, &[r])
    }

    /// Bounded repetition with symbolic bounds.
    pub fn mk_re_loop_terms(
        &mut self,
        tm: &mut TermManager,
        r: TermId,
        lo: TermId,
        hi: Option<TermId>,
    ) -> Result<TermId> {
        match hi {
            Some(hi) => self.app(tm, SeqOp::ReLoop, &[], &[r, lo, hi]),
            None => self.app(tm, SeqOp::ReLoop, &[], &[r, lo]),
        }
    }

    /// Fixed power `r^n`.
    pub fn mk_re_power(&mut self, tm: &mut TermManager, r: TermId, n: u64) -> Result<TermId> {
        let params = [DeclParam::Int(n)];
        self.app(tm, SeqOp::RePower, &params, &[r])
    }

    /// The empty language of the given regex sort.
    pub fn mk_re_empty(&mut self, tm: &mut TermManager, re_sort: SortId) -> Result<TermId> {
        self.app_ranged(tm, SeqOp::ReEmptySet, re_sort, &[])
    }

    /// The language of all sequences of the given regex sort.
    pub fn mk_re_full_seq(&mut self, tm: &mut TermManager, re_sort: SortId) -> Result<TermId> {
        self.app_ranged(tm, SeqOp::ReFullSeqSet, re_sort, &[])
    }

    /// The language of all length-one sequences of the given regex sort.
    pub fn mk_re_full_char(&mut self, tm: &mut TermManager, re_sort: SortId) -> Result<TermId> {
        self.app_ranged(tm, SeqOp::ReFullCharSet, re_sort, &[])
    }

    /// Language of length-one sequences satisfying an opaque predicate.
    pub fn mk_re_of_pred(&mut self, tm: &mut TermManager, p: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::ReOfPred, &[], &[p])
    }

    /// Language reversal.
    pub fn mk_re_reverse(&mut self, tm: &mut TermManager, r: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::ReReverse, &[], &[r])
    }

    /// Symbolic derivative of `r` by element `ele`.
    pub fn mk_re_derivative(
        &mut self,
        tm: &mut TermManager,
        ele: TermId,
        r: TermId,
    ) -> Result<TermId> {
        self.app(tm, SeqOp::ReDerivative, &[], &[ele, r])
    }

    /// Internal lifted union used by derivative-based matching.
    pub fn mk_re_antimorov_union(
        &mut self,
        tm: &mut TermManager,
        a: TermId,
        b: TermId,
    ) -> Result<TermId> {
        self.app(tm, SeqOp::ReAntimorovUnion, &[], &[a, b])
    }

    /// Internal nullability test.
    pub fn mk_re_is_nullable(&mut self, tm: &mut TermManager, r: TermId) -> Result<TermId> {
        self.app(tm, SeqOp::ReIsNullable, &[], &[r])
    }

    /// `to_re` of the empty sequence: the language containing only the
    /// empty word.
    pub fn mk_epsilon(&mut self, tm: &mut TermManager, seq_sort: SortId) -> Result<TermId> {
        let empty = self.mk_empty(tm, seq_sort)?;
        self.mk_to_re(tm, empty)
    }

    // ---- recognition helpers that need the canonical sorts ----

    /// Whether `t` is a term of the string sort.
    #[must_use]
    pub fn is_string_term(&self, tm: &TermManager, t: TermId) -> bool {
        tm.sort_of(t) == Some(self.plugin.string_sort())
    }

    /// Whether `t` is a sequence term of a non-string element sort.
    #[must_use]
    pub fn is_non_string_sequence(&self, tm: &TermManager, t: TermId) -> bool {
        match tm.sort_of(t) {
            Some(sort) => tm.sorts.is_seq_like(sort) && sort != self.plugin.string_sort(),
            None => false,
        }
    }

    /// Flatten a concatenation into units: string literals decompose into
    /// one unit per character.
    pub fn get_concat_units(
        &mut self,
        tm: &mut TermManager,
        t: TermId,
    ) -> Result<Vec<TermId>> {
        let leaves = get_concat(tm, t);
        let mut out = Vec::with_capacity(leaves.len());
        for leaf in leaves {
            match op_of(tm, leaf) {
                Some(SeqOp::StringConst) => {
                    let value =
                        as_string_value(tm, leaf).unwrap_or_default();
                    for &cp in value.code_points() {
                        let ch = self.mk_char(tm, cp)?;
                        out.push(self.mk_unit(tm, ch)?);
                    }
                }
                _ => out.push(leaf),
            }
        }
        Ok(out)
    }
}

/// Compact textual rendering of a regex term, for diagnostics.
#[must_use]
pub fn re_display(tm: &TermManager, t: TermId) -> String {
    fn seq_text(tm: &TermManager, s: TermId) -> String {
        match as_string_value(tm, s) {
            Some(v) if v.is_empty() => "()".to_string(),
            Some(v) => v.encode(),
            None => format!("<seq #{}>", s.0),
        }
    }
    fn go(tm: &TermManager, t: TermId, out: &mut String) {
        match op_of(tm, t) {
            Some(SeqOp::ReEmptySet) => out.push_str("[]"),
            Some(SeqOp::ReFullCharSet) => out.push('.'),
            Some(SeqOp::ReFullSeqSet) => out.push_str(".*"),
            Some(SeqOp::SeqToRe) => {
                let arg = tm.app_args(t).first().copied();
                match arg {
                    Some(s) => out.push_str(&seq_text(tm, s)),
                    None => out.push('?'),
                }
            }
            Some(SeqOp::ReRange) => {
                let args = tm.app_args(t);
                let lo = args.first().map(|&s| seq_text(tm, s)).unwrap_or_default();
                let hi = args.get(1).map(|&s| seq_text(tm, s)).unwrap_or_default();
                out.push('[');
                out.push_str(&lo);
                out.push('-');
                out.push_str(&hi);
                out.push(']');
            }
            Some(SeqOp::ReStar | SeqOp::RePlus | SeqOp::ReOption) => {
                let suffix = match op_of(tm, t) {
                    Some(SeqOp::ReStar) => '*',
                    Some(SeqOp::RePlus) => '+',
                    _ => '?',
                };
                out.push('(');
                if let Some(&r) = tm.app_args(t).first() {
                    go(tm, r, out);
                }
                out.push(')');
                out.push(suffix);
            }
            Some(SeqOp::ReComplement) => {
                out.push('~');
                out.push('(');
                if let Some(&r) = tm.app_args(t).first() {
                    go(tm, r, out);
                }
                out.push(')');
            }
            Some(SeqOp::ReConcat) => {
                for &r in tm.app_args(t) {
                    go(tm, r, out);
                }
            }
            Some(SeqOp::ReUnion | SeqOp::ReIntersect | SeqOp::ReDiff | SeqOp::ReAntimorovUnion) => {
                let sep = match op_of(tm, t) {
                    Some(SeqOp::ReUnion) => '|',
                    Some(SeqOp::ReIntersect) => '&',
                    Some(SeqOp::ReAntimorovUnion) => '|',
                    _ => '\\',
                };
                out.push('(');
                for (i, &r) in tm.app_args(t).iter().enumerate() {
                    if i > 0 {
                        out.push(sep);
                    }
                    go(tm, r, out);
                }
                out.push(')');
            }
            Some(SeqOp::ReLoop) => {
                if let Some((body, lo, hi)) = as_loop_bounds(tm, t) {
                    out.push('(');
                    go(tm, body, out);
                    out.push(')');
                    match hi {
                        Some(hi) => out.push_str(&format!("{{{lo},{hi}}}")),
                        None => out.push_str(&format!("{{{lo},}}")),
                    }
                } else {
                    out.push_str("(loop)");
                }
            }
            Some(SeqOp::RePower) => {
                if let Some((body, n)) = as_power(tm, t) {
                    out.push('(');
                    go(tm, body, out);
                    out.push_str(&format!(")^{n}"));
                } else {
                    out.push_str("(power)");
                }
            }
            Some(SeqOp::ReReverse) => {
                out.push_str("reverse(");
                if let Some(&r) = tm.app_args(t).first() {
                    go(tm, r, out);
                }
                out.push(')');
            }
            Some(SeqOp::ReDerivative) => {
                out.push_str("D(");
                let args = tm.app_args(t);
                if let Some(&ele) = args.first() {
                    match as_const_char(tm, ele) {
                        Some(code) => out.push_str(&format!("\\u{{{code:x}}}")),
                        None => out.push('?'),
                    }
                }
                out.push(',');
                if let Some(&r) = args.get(1) {
                    go(tm, r, out);
                }
                out.push(')');
            }
            _ => out.push_str(&format!("<re #{}>", t.0)),
        }
    }
    let mut out = String::new();
    go(tm, t, &mut out);
    out
}
