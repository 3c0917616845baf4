//! Operator Vocabulary of the Sequence Theory.
//!
//! [`SeqOp`] tags every function declaration the theory can produce. The
//! internal-only kinds exist purely for internal rewriting and never appear
//! in a builtin-name table.

/// Operator kinds of the sequence/string/regex theory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SeqOp {
    /// Singleton sequence from an element.
    SeqUnit,
    /// Empty sequence of a given sort.
    SeqEmpty,
    /// Sequence concatenation (associative).
    SeqConcat,
    /// Prefix predicate.
    SeqPrefix,
    /// Suffix predicate.
    SeqSuffix,
    /// Containment predicate.
    SeqContains,
    /// Subsequence extraction: sequence, offset, length.
    SeqExtract,
    /// Replace first occurrence.
    SeqReplace,
    /// Unit-or-empty element access.
    SeqAt,
    /// Total-domain element access; rewritten to the interpreted variant
    /// when the index is within bounds and the uninterpreted one otherwise.
    SeqNth,
    /// Interpreted element access for indices within the defined domain.
    SeqNthI,
    /// Uninterpreted element access for indices outside the defined domain.
    SeqNthU,
    /// Sequence length.
    SeqLength,
    /// First index of an occurrence at or after an offset.
    SeqIndex,
    /// Last index of an occurrence.
    SeqLastIndex,
    /// Injection of a sequence into regular expressions.
    SeqToRe,
    /// Regular-expression membership predicate.
    SeqInRe,
    /// Replace every regex match.
    SeqReplaceReAll,
    /// Replace the first regex match.
    SeqReplaceRe,
    /// Replace every occurrence.
    SeqReplaceAll,

    /// One-or-more repetition.
    RePlus,
    /// Kleene star.
    ReStar,
    /// Zero-or-one repetition.
    ReOption,
    /// Character range.
    ReRange,
    /// Regex concatenation (associative).
    ReConcat,
    /// Regex union (associative).
    ReUnion,
    /// Regex difference.
    ReDiff,
    /// Regex intersection (associative).
    ReIntersect,
    /// Bounded repetition; bounds are declaration parameters or terms.
    ReLoop,
    /// Fixed power `r^n`.
    RePower,
    /// Regex complement.
    ReComplement,
    /// The empty language.
    ReEmptySet,
    /// The language of all sequences.
    ReFullSeqSet,
    /// The language of all length-one sequences.
    ReFullCharSet,
    /// Language of length-one sequences satisfying an opaque predicate.
    ReOfPred,
    /// Language reversal.
    ReReverse,
    /// Symbolic derivative of a regex by an element.
    ReDerivative,

    /// String literal.
    StringConst,
    /// Integer-to-string conversion.
    StringItos,
    /// String-to-integer conversion.
    StringStoi,
    /// Lexicographic strict order.
    StringLt,
    /// Lexicographic order.
    StringLe,
    /// Digit test on a length-one string.
    StringIsDigit,
    /// Code point of a length-one string, -1 otherwise.
    StringToCode,
    /// Length-one string from a code point.
    StringFromCode,

    /// Character literal.
    CharConst,
    /// Unicode order on characters.
    CharLe,

    /// Internal nullability test used during rewriting.
    ReIsNullable,
    /// Internal lifted union used by derivative-based matching.
    ReAntimorovUnion,
    /// Internal witness function introduced by the solver.
    SeqSkolem,
}

impl SeqOp {
    /// Opaque code stored on [`strand_core::FuncDecl`].
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Inverse of [`SeqOp::code`].
    #[must_use]
    pub const fn from_code(code: u32) -> Option<SeqOp> {
        use SeqOp::*;
        const ALL: &[SeqOp] = &[
            SeqUnit,
            SeqEmpty,
            SeqConcat,
            SeqPrefix,
            SeqSuffix,
            SeqContains,
            SeqExtract,
            SeqReplace,
            SeqAt,
            SeqNth,
            SeqNthI,
            SeqNthU,
            SeqLength,
            SeqIndex,
            SeqLastIndex,
            SeqToRe,
            SeqInRe,
            SeqReplaceReAll,
            SeqReplaceRe,
            SeqReplaceAll,
            RePlus,
            ReStar,
            ReOption,
            ReRange,
            ReConcat,
            ReUnion,
            ReDiff,
            ReIntersect,
            ReLoop,
            RePower,
            ReComplement,
            ReEmptySet,
            ReFullSeqSet,
            ReFullCharSet,
            ReOfPred,
            ReReverse,
            ReDerivative,
            StringConst,
            StringItos,
            StringStoi,
            StringLt,
            StringLe,
            StringIsDigit,
            StringToCode,
            StringFromCode,
            CharConst,
            CharLe,
            ReIsNullable,
            ReAntimorovUnion,
            SeqSkolem,
        ];
        if (code as usize) < ALL.len() {
            Some(ALL[code as usize])
        } else {
            None
        }
    }

    /// Internal-only kinds exist purely for internal rewriting and are
    /// excluded from every builtin-name table.
    #[must_use]
    pub const fn is_internal(self) -> bool {
        matches!(
            self,
            SeqOp::ReIsNullable | SeqOp::ReAntimorovUnion | SeqOp::SeqSkolem
        )
    }

    /// Generic (sequence-sorted) display name.
    #[must_use]
    pub const fn seq_name(self) -> &'static str {
        match self {
            SeqOp::SeqUnit => "seq.unit",
            SeqOp::SeqEmpty => "seq.empty",
            SeqOp::SeqConcat => "seq.++",
            SeqOp::SeqPrefix => "seq.prefixof",
            SeqOp::SeqSuffix => "seq.suffixof",
            SeqOp::SeqContains => "seq.contains",
            SeqOp::SeqExtract => "seq.extract",
            SeqOp::SeqReplace => "seq.replace",
            SeqOp::SeqAt => "seq.at",
            SeqOp::SeqNth => "seq.nth",
            SeqOp::SeqNthI => "seq.nth_i",
            SeqOp::SeqNthU => "seq.nth_u",
            SeqOp::SeqLength => "seq.len",
            SeqOp::SeqIndex => "seq.indexof",
            SeqOp::SeqLastIndex => "seq.last_indexof",
            SeqOp::SeqToRe => "seq.to_re",
            SeqOp::SeqInRe => "seq.in_re",
            SeqOp::SeqReplaceReAll => "str.replace_re_all",
            SeqOp::SeqReplaceRe => "str.replace_re",
            SeqOp::SeqReplaceAll => "str.replace_all",
            SeqOp::RePlus => "re.+",
            SeqOp::ReStar => "re.*",
            SeqOp::ReOption => "re.opt",
            SeqOp::ReRange => "re.range",
            SeqOp::ReConcat => "re.++",
            SeqOp::ReUnion => "re.union",
            SeqOp::ReDiff => "re.diff",
            SeqOp::ReIntersect => "re.inter",
            SeqOp::ReLoop => "re.loop",
            SeqOp::RePower => "re.^",
            SeqOp::ReComplement => "re.comp",
            SeqOp::ReEmptySet => "re.none",
            SeqOp::ReFullSeqSet => "re.all",
            SeqOp::ReFullCharSet => "re.allchar",
            SeqOp::ReOfPred => "re.of.pred",
            SeqOp::ReReverse => "re.reverse",
            SeqOp::ReDerivative => "re.derivative",
            SeqOp::StringConst => "str.const",
            SeqOp::StringItos => "str.from_int",
            SeqOp::StringStoi => "str.to_int",
            SeqOp::StringLt => "str.<",
            SeqOp::StringLe => "str.<=",
            SeqOp::StringIsDigit => "str.is_digit",
            SeqOp::StringToCode => "str.to_code",
            SeqOp::StringFromCode => "str.from_code",
            SeqOp::CharConst => "char.const",
            SeqOp::CharLe => "char.<=",
            SeqOp::ReIsNullable => "re.is_nullable",
            SeqOp::ReAntimorovUnion => "re.antimorov_union",
            SeqOp::SeqSkolem => "seq.skolem",
        }
    }

    /// String-specialized display name, for the operators that have one.
    #[must_use]
    pub const fn str_name(self) -> Option<&'static str> {
        match self {
            SeqOp::SeqConcat => Some("str.++"),
            SeqOp::SeqPrefix => Some("str.prefixof"),
            SeqOp::SeqSuffix => Some("str.suffixof"),
            SeqOp::SeqContains => Some("str.contains"),
            SeqOp::SeqExtract => Some("str.substr"),
            SeqOp::SeqReplace => Some("str.replace"),
            SeqOp::SeqAt => Some("str.at"),
            SeqOp::SeqLength => Some("str.len"),
            SeqOp::SeqIndex => Some("str.indexof"),
            SeqOp::SeqLastIndex => Some("str.last_indexof"),
            SeqOp::SeqToRe => Some("str.to_re"),
            SeqOp::SeqInRe => Some("str.in_re"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for code in 0..100 {
            if let Some(op) = SeqOp::from_code(code) {
                assert_eq!(op.code(), code);
            }
        }
        assert_eq!(SeqOp::from_code(SeqOp::SeqSkolem.code()), Some(SeqOp::SeqSkolem));
        assert_eq!(SeqOp::from_code(10_000), None);
    }

    #[test]
    fn test_internal_flags() {
        assert!(SeqOp::SeqSkolem.is_internal());
        assert!(SeqOp::ReAntimorovUnion.is_internal());
        assert!(SeqOp::ReIsNullable.is_internal());
        assert!(!SeqOp::SeqConcat.is_internal());
        assert!(!SeqOp::ReStar.is_internal());
    }

    #[test]
    fn test_string_specializations() {
        assert_eq!(SeqOp::SeqConcat.str_name(), Some("str.++"));
        assert_eq!(SeqOp::SeqExtract.str_name(), Some("str.substr"));
        assert_eq!(SeqOp::ReStar.str_name(), None);
    }
}
