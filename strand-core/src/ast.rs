//! Hash-Consed Term Arena.
//!
//! Terms are immutable nodes addressed by [`TermId`] handles into an arena.
//! Construction is structurally deduplicating: building the same (kind, sort)
//! pair twice returns the same handle, so the term store is a DAG with
//! arbitrary sharing and algorithms over it must memoize by handle.
//!
//! Theory operators are not baked into [`TermKind`]. A theory registers
//! [`FuncDecl`] entries carrying an opaque operator `code` it owns, and all
//! theory structure is [`TermKind::App`] nodes over those declarations. The
//! declaration table is value-deduplicated the same way the term arena is.

use crate::error::{Result, StrandError};
use crate::sort::{SortId, SortStore};
use lasso::{Rodeo, Spur};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Stable handle to a term in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermId(pub u32);

impl TermId {
    /// Create a term id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Raw index of this term id.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable handle to a function declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(pub u32);

impl DeclId {
    /// Create a declaration id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Raw index of this declaration id.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A declaration parameter: payload attached to a [`FuncDecl`] beyond its
/// signature (literal values, loop bounds).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclParam {
    /// A sort payload.
    Sort(SortId),
    /// A numeral payload (loop bounds, power exponents, character codes).
    Int(u64),
    /// A code-point buffer payload (string literal values).
    Zstr(Box<[u32]>),
}

/// A function declaration: named, arity-fixed, carrying an opaque theory
/// operator code and optional parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FuncDecl {
    /// Interned display name (e.g. `str.++`).
    pub name: Spur,
    /// Theory-owned operator code; the owning plugin defines the mapping.
    pub code: u32,
    /// Declaration parameters (literal payloads).
    pub params: SmallVec<[DeclParam; 1]>,
    /// Domain sorts.
    pub domain: SmallVec<[SortId; 2]>,
    /// Range sort.
    pub range: SortId,
}

/// The structural kind of a term node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// A free constant with an interned name.
    Var(Spur),
    /// An integer literal.
    IntConst(BigInt),
    /// An application of a declared function to argument terms.
    App(DeclId, SmallVec<[TermId; 2]>),
}

/// An immutable term node: structural kind plus sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    /// Structural kind.
    pub kind: TermKind,
    /// Sort of the node.
    pub sort: SortId,
}

/// Hash-consed term arena with a value-deduplicated declaration table.
#[derive(Debug)]
pub struct TermManager {
    terms: Vec<Term>,
    term_map: FxHashMap<Term, TermId>,
    decls: Vec<FuncDecl>,
    decl_map: FxHashMap<FuncDecl, DeclId>,
    names: Rodeo,
    /// Canonicalizing sort store.
    pub sorts: SortStore,
}

impl TermManager {
    /// Create an empty manager with `Bool` and `Int` pre-interned.
    #[must_use]
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
            term_map: FxHashMap::default(),
            decls: Vec::new(),
            decl_map: FxHashMap::default(),
            names: Rodeo::default(),
            sorts: SortStore::new(),
        }
    }

    /// Look up a term by handle.
    #[must_use]
    pub fn get(&self, id: TermId) -> Option<&Term> {
        self.terms.get(id.index())
    }

    /// Sort of a term. Constant time.
    #[must_use]
    pub fn sort_of(&self, id: TermId) -> Option<SortId> {
        self.get(id).map(|t| t.sort)
    }

    /// Look up a declaration by handle.
    #[must_use]
    pub fn get_decl(&self, id: DeclId) -> Option<&FuncDecl> {
        self.decls.get(id.index())
    }

    /// Intern a symbol name.
    pub fn intern_name(&mut self, name: &str) -> Spur {
        self.names.get_or_intern(name)
    }

    /// Resolve an interned symbol name.
    #[must_use]
    pub fn resolve_name(&self, spur: Spur) -> &str {
        self.names.resolve(&spur)
    }

    /// Number of terms in the arena.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    fn intern_term(&mut self, term: Term) -> TermId {
        if let Some(&id) = self.term_map.get(&term) {
            return id;
        }
        let id = TermId(u32::try_from(self.terms.len()).expect("term arena overflow"));
        self.terms.push(term.clone());
        self.term_map.insert(term, id);
        id
    }

    /// Create (or fetch) a free constant of the given sort.
    pub fn mk_var(&mut self, name: &str, sort: SortId) -> TermId {
        let spur = self.names.get_or_intern(name);
        self.intern_term(Term {
            kind: TermKind::Var(spur),
            sort,
        })
    }

    /// Create (or fetch) an integer literal.
    pub fn mk_int(&mut self, value: BigInt) -> TermId {
        let sort = self.sorts.int_sort;
        self.intern_term(Term {
            kind: TermKind::IntConst(value),
            sort,
        })
    }

    /// Create (or fetch) an application of `decl` to `args`.
    ///
    /// The arity must match the declaration's domain; the node's sort is the
    /// declaration's range. Shape errors are reported here, never deferred.
    pub fn mk_app(&mut self, decl: DeclId, args: &[TermId]) -> Result<TermId> {
        let (arity, range, name) = {
            let d = self
                .get_decl(decl)
                .ok_or_else(|| StrandError::UnknownOperator(format!("decl #{}", decl.0)))?;
            (d.domain.len(), d.range, d.name)
        };
        if arity != args.len() {
            return Err(StrandError::Arity {
                op: self.resolve_name(name).to_string(),
                expected: arity,
                found: args.len(),
            });
        }
        Ok(self.intern_term(Term {
            kind: TermKind::App(decl, SmallVec::from_slice(args)),
            sort: range,
        }))
    }

    /// Register (or fetch) a declaration, deduplicated by value.
    pub fn mk_decl(&mut self, decl: FuncDecl) -> DeclId {
        if let Some(&id) = self.decl_map.get(&decl) {
            return id;
        }
        let id = DeclId(u32::try_from(self.decls.len()).expect("decl table overflow"));
        self.decls.push(decl.clone());
        self.decl_map.insert(decl, id);
        id
    }

    /// Declaration of an application node, if `id` is one.
    #[must_use]
    pub fn app_decl(&self, id: TermId) -> Option<DeclId> {
        match self.get(id).map(|t| &t.kind) {
            Some(TermKind::App(d, _)) => Some(*d),
            _ => None,
        }
    }

    /// Arguments of an application node; empty for other kinds.
    #[must_use]
    pub fn app_args(&self, id: TermId) -> &[TermId] {
        match self.get(id).map(|t| &t.kind) {
            Some(TermKind::App(_, args)) => args,
            _ => &[],
        }
    }

    /// Numeral value of a term, if it is a small nonnegative integer literal.
    #[must_use]
    pub fn as_u64(&self, id: TermId) -> Option<u64> {
        match self.get(id).map(|t| &t.kind) {
            Some(TermKind::IntConst(n)) => n.to_u64(),
            _ => None,
        }
    }
}

impl Default for TermManager {
    fn default() -> Self {
        Self::new()
    }
}
