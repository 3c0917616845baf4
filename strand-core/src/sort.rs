//! Sort System for the Term Graph.
//!
//! Sorts are canonicalized: interning the same kind with the same parameters
//! always returns the same [`SortId`]. The sequence theory's `String` and
//! `RegLan` kinds are request tags resolved by the theory plugin to the
//! canonical `Seq(Char)` and `Re(Seq(Char))` sorts, so one sort object backs
//! both spellings and structural algorithms treat them uniformly.

use lasso::Spur;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Stable handle to an interned sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortId(pub u32);

impl SortId {
    /// Create a sort id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Raw index of this sort id.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind tag of a sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortKind {
    /// Booleans.
    Bool,
    /// Mathematical integers (indices, lengths, character codes).
    Int,
    /// Sequences over an element sort (one parameter).
    Seq,
    /// Regular expressions over a sequence sort (one parameter).
    Re,
    /// The character sort of the string theory.
    Char,
    /// Request tag for the Unicode string sort; the plugin resolves it to
    /// the canonical `Seq(Char)`.
    String,
    /// Request tag for the regular-language sort; the plugin resolves it to
    /// the canonical `Re(Seq(Char))`.
    RegLan,
    /// An uninterpreted sort identified by name.
    Uninterpreted(Spur),
}

/// An interned sort: a kind plus its sort parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sort {
    /// Kind tag.
    pub kind: SortKind,
    /// Sort parameters (e.g. the element sort of a sequence).
    pub params: SmallVec<[SortId; 1]>,
}

impl Sort {
    /// First sort parameter, if any.
    #[must_use]
    pub fn param(&self) -> Option<SortId> {
        self.params.first().copied()
    }
}

/// Canonicalizing store of sorts.
///
/// Interning is compute-or-fetch-cached: at most one `Sort` object exists per
/// (kind, parameters) pair within a session.
#[derive(Debug)]
pub struct SortStore {
    sorts: Vec<Sort>,
    intern_map: FxHashMap<Sort, SortId>,
    /// The pre-interned Bool sort.
    pub bool_sort: SortId,
    /// The pre-interned Int sort.
    pub int_sort: SortId,
}

impl SortStore {
    /// Create a store with `Bool` and `Int` pre-interned.
    #[must_use]
    pub fn new() -> Self {
        let mut store = Self {
            sorts: Vec::new(),
            intern_map: FxHashMap::default(),
            bool_sort: SortId(0),
            int_sort: SortId(0),
        };
        store.bool_sort = store.intern(SortKind::Bool, &[]);
        store.int_sort = store.intern(SortKind::Int, &[]);
        store
    }

    /// Intern a sort, returning the canonical id for (kind, params).
    pub fn intern(&mut self, kind: SortKind, params: &[SortId]) -> SortId {
        let sort = Sort {
            kind,
            params: SmallVec::from_slice(params),
        };
        if let Some(&id) = self.intern_map.get(&sort) {
            return id;
        }
        let id = SortId(u32::try_from(self.sorts.len()).expect("sort table overflow"));
        self.sorts.push(sort.clone());
        self.intern_map.insert(sort, id);
        id
    }

    /// Look up a sort by id.
    #[must_use]
    pub fn get(&self, id: SortId) -> Option<&Sort> {
        self.sorts.get(id.index())
    }

    /// Kind of a sort id. Panics only on a foreign id.
    #[must_use]
    pub fn kind(&self, id: SortId) -> &SortKind {
        &self.sorts[id.index()].kind
    }

    /// First parameter of a sort id, if any.
    #[must_use]
    pub fn param(&self, id: SortId) -> Option<SortId> {
        self.sorts.get(id.index()).and_then(Sort::param)
    }

    /// True for `Seq` and its `String` specialization.
    #[must_use]
    pub fn is_seq_like(&self, id: SortId) -> bool {
        matches!(self.kind(id), SortKind::Seq | SortKind::String)
    }

    /// True for `Re` and its `RegLan` specialization.
    #[must_use]
    pub fn is_re_like(&self, id: SortId) -> bool {
        matches!(self.kind(id), SortKind::Re | SortKind::RegLan)
    }

    /// Number of interned sorts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorts.len()
    }

    /// Whether the store holds only the pre-interned sorts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorts.is_empty()
    }
}

impl Default for SortStore {
    fn default() -> Self {
        Self::new()
    }
}
