//! Polymorphic Signature Matching.
//!
//! A [`Signature`] is a sort-parametric template for an operator: an ordered
//! domain of [`SortPattern`]s and a range pattern, over `num_params` sort
//! parameters. Matching unifies each domain pattern against a concrete
//! argument sort: the first occurrence of a parameter binds it, later
//! occurrences must agree with the bound sort, and a contradiction is a hard
//! match failure. All functions here are pure — bindings go in and come out
//! by value, so concurrent resolution attempts never share scratch state.

use smallvec::SmallVec;
use strand_core::{SortId, SortKind, SortStore};

/// A sort pattern: a parameter reference, a kind with nested patterns, or an
/// exact interned sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortPattern {
    /// Reference to sort parameter `i`.
    Param(u32),
    /// A sort kind applied to nested patterns, e.g. `Seq(Param(0))`.
    Shape(SortKind, Vec<SortPattern>),
    /// An exact sort.
    Exact(SortId),
}

/// A named, arity-fixed, sort-parametric operator template.
///
/// Registered once per operator kind at plugin initialization; immutable
/// thereafter.
#[derive(Debug, Clone)]
pub struct Signature {
    /// Display name used in diagnostics.
    pub name: &'static str,
    /// Number of sort parameters.
    pub num_params: u32,
    /// Domain patterns, one per argument.
    pub domain: Vec<SortPattern>,
    /// Range pattern.
    pub range: SortPattern,
}

/// A parameter binding: index → concrete sort. Valid for one resolution.
pub type Binding = SmallVec<[Option<SortId>; 2]>;

/// Associativity policy for flattenable n-ary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    /// Chains resolve `(a ∘ b) ∘ c`.
    Left,
    /// Chains resolve `a ∘ (b ∘ c)`.
    Right,
}

/// Fresh all-unbound binding for a signature.
#[must_use]
pub fn empty_binding(num_params: u32) -> Binding {
    SmallVec::from_elem(None, num_params as usize)
}

/// Unify one pattern against one concrete sort, extending `binding`.
///
/// Returns the extended binding, or `None` when the pattern cannot match.
#[must_use]
pub fn match_sort(
    store: &SortStore,
    binding: Binding,
    pattern: &SortPattern,
    concrete: SortId,
) -> Option<Binding> {
    match pattern {
        SortPattern::Param(i) => {
            let slot = *i as usize;
            let mut binding = binding;
            match binding.get(slot).copied().flatten() {
                None => {
                    *binding.get_mut(slot)? = Some(concrete);
                    Some(binding)
                }
                Some(bound) if bound == concrete => Some(binding),
                Some(_) => None,
            }
        }
        SortPattern::Exact(id) => {
            if *id == concrete {
                Some(binding)
            } else {
                None
            }
        }
        SortPattern::Shape(kind, nested) => {
            let sort = store.get(concrete)?;
            if &sort.kind != kind || sort.params.len() != nested.len() {
                return None;
            }
            let params: SmallVec<[SortId; 1]> = sort.params.clone();
            let mut binding = binding;
            for (pat, &param) in nested.iter().zip(params.iter()) {
                binding = match_sort(store, binding, pat, param)?;
            }
            Some(binding)
        }
    }
}

/// Apply a binding to a pattern, interning shapes as needed.
///
/// `None` when an unbound parameter remains — an underconstrained
/// declaration, reported by the caller at resolution time.
#[must_use]
pub fn apply_binding(
    store: &mut SortStore,
    binding: &Binding,
    pattern: &SortPattern,
) -> Option<SortId> {
    match pattern {
        SortPattern::Param(i) => binding.get(*i as usize).copied().flatten(),
        SortPattern::Exact(id) => Some(*id),
        SortPattern::Shape(kind, nested) => {
            let mut params = Vec::with_capacity(nested.len());
            for pat in nested {
                params.push(apply_binding(store, binding, pat)?);
            }
            Some(store.intern(kind.clone(), &params))
        }
    }
}

/// Match a fixed-arity signature against concrete argument sorts.
///
/// On success returns the binding and the concrete range sort. A
/// `range_hint` (the caller's requested range) is consulted only when the
/// range pattern is underconstrained by the domain alone, e.g. for nullary
/// constructors like the empty sequence.
#[must_use]
pub fn match_signature(
    store: &mut SortStore,
    sig: &Signature,
    args: &[SortId],
    range_hint: Option<SortId>,
) -> Option<(Binding, SortId)> {
    if args.len() != sig.domain.len() {
        return None;
    }
    let mut binding = empty_binding(sig.num_params);
    for (pattern, &arg) in sig.domain.iter().zip(args.iter()) {
        binding = match_sort(store, binding, pattern, arg)?;
    }
    resolve_range(store, sig, binding, range_hint)
}

/// Match an associative signature: the single domain pattern repeated once
/// per argument. Tolerates arity 0 (range hint required), 1, and n ≥ 2.
#[must_use]
pub fn match_assoc(
    store: &mut SortStore,
    sig: &Signature,
    args: &[SortId],
    range_hint: Option<SortId>,
) -> Option<(Binding, SortId)> {
    let pattern = sig.domain.first()?;
    let mut binding = empty_binding(sig.num_params);
    for &arg in args {
        binding = match_sort(store, binding, pattern, arg)?;
    }
    resolve_range(store, sig, binding, range_hint)
}

fn resolve_range(
    store: &mut SortStore,
    sig: &Signature,
    binding: Binding,
    range_hint: Option<SortId>,
) -> Option<(Binding, SortId)> {
    if let Some(range) = apply_binding(store, &binding, &sig.range) {
        return Some((binding, range));
    }
    // Domain left parameters unbound; let the requested range bind them.
    let hint = range_hint?;
    let binding = match_sort(store, binding, &sig.range, hint)?;
    let range = apply_binding(store, &binding, &sig.range)?;
    Some((binding, range))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_char_seq() -> (SortStore, SortId, SortId) {
        let mut store = SortStore::new();
        let char_sort = store.intern(SortKind::Char, &[]);
        let seq_char = store.intern(SortKind::Seq, &[char_sort]);
        (store, char_sort, seq_char)
    }

    // (Seq<X>, X) -> Seq<X>
    fn push_back_sig() -> Signature {
        Signature {
            name: "seq.push",
            num_params: 1,
            domain: vec![
                SortPattern::Shape(SortKind::Seq, vec![SortPattern::Param(0)]),
                SortPattern::Param(0),
            ],
            range: SortPattern::Shape(SortKind::Seq, vec![SortPattern::Param(0)]),
        }
    }

    #[test]
    fn test_binding_resolution() {
        let (mut store, char_sort, seq_char) = store_with_char_seq();
        let sig = push_back_sig();
        let (binding, range) = match_signature(&mut store, &sig, &[seq_char, char_sort], None)
            .expect("signature should match");
        assert_eq!(binding[0], Some(char_sort));
        assert_eq!(range, seq_char);
    }

    #[test]
    fn test_inconsistent_binding_fails() {
        let (mut store, _char_sort, seq_char) = store_with_char_seq();
        let sig = push_back_sig();
        // Second occurrence of X would need Seq<Char>, but X is bound to Char.
        assert!(match_signature(&mut store, &sig, &[seq_char, seq_char], None).is_none());
    }

    #[test]
    fn test_arity_mismatch_is_no_match() {
        let (mut store, char_sort, _seq_char) = store_with_char_seq();
        let sig = push_back_sig();
        assert!(match_signature(&mut store, &sig, &[char_sort], None).is_none());
    }

    #[test]
    fn test_string_sort_unifies_as_seq_of_char() {
        // The canonical string sort is Seq(Char); it must bind X = Char.
        let (mut store, char_sort, string_sort) = store_with_char_seq();
        let sig = push_back_sig();
        let (binding, _range) = match_signature(&mut store, &sig, &[string_sort, char_sort], None)
            .expect("String should match Seq<Char> shape");
        assert_eq!(binding[0], Some(char_sort));
    }

    #[test]
    fn test_assoc_match_uniform_sorts() {
        let (mut store, _char_sort, seq_char) = store_with_char_seq();
        let sig = Signature {
            name: "seq.++",
            num_params: 1,
            domain: vec![SortPattern::Shape(SortKind::Seq, vec![SortPattern::Param(0)])],
            range: SortPattern::Shape(SortKind::Seq, vec![SortPattern::Param(0)]),
        };
        // n-ary
        let ok = match_assoc(&mut store, &sig, &[seq_char, seq_char, seq_char], None);
        assert!(ok.is_some());
        // unary
        assert!(match_assoc(&mut store, &sig, &[seq_char], None).is_some());
        // nullary without a hint cannot resolve the range
        assert!(match_assoc(&mut store, &sig, &[], None).is_none());
        // nullary with a hint binds through the range pattern
        let (_b, range) =
            match_assoc(&mut store, &sig, &[], Some(seq_char)).expect("hint resolves range");
        assert_eq!(range, seq_char);
        // mixed element sorts fail
        let int = store.int_sort;
        let seq_int = store.intern(SortKind::Seq, &[int]);
        assert!(match_assoc(&mut store, &sig, &[seq_char, seq_int], None).is_none());
    }

    #[test]
    fn test_unbound_range_param_is_error() {
        let mut store = SortStore::new();
        let sig = Signature {
            name: "seq.empty",
            num_params: 1,
            domain: vec![],
            range: SortPattern::Shape(SortKind::Seq, vec![SortPattern::Param(0)]),
        };
        assert!(match_signature(&mut store, &sig, &[], None).is_none());
    }
}
