//! Strand Core - Term Graph, Sorts, and Bridge Interfaces.
//!
//! This crate provides the shared substrate the sequence/string/regex theory
//! front-end ([`strand-seq`](../strand_seq/index.html)) is built over:
//! - Hash-consed, arena-allocated terms with stable [`TermId`] handles
//! - A canonicalizing sort store covering the sequence theory's sort algebra
//! - A value-deduplicated function-declaration table with opaque theory codes
//! - The SAT/theory-bridge traits the host solver implements
//!
//! # Examples
//!
//! ```
//! use num_bigint::BigInt;
//! use strand_core::{SortKind, TermManager};
//!
//! let mut tm = TermManager::new();
//! let five = tm.mk_int(BigInt::from(5));
//! let also_five = tm.mk_int(BigInt::from(5));
//! assert_eq!(five, also_five); // structural deduplication
//!
//! let char_sort = tm.sorts.intern(SortKind::Char, &[]);
//! let seq_char = tm.sorts.intern(SortKind::Seq, &[char_sort]);
//! assert!(tm.sorts.is_seq_like(seq_char));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
pub mod error;
pub mod literal;
pub mod sort;
pub mod traits;

pub use ast::{DeclId, DeclParam, FuncDecl, Term, TermId, TermKind, TermManager};
pub use error::{Result, StrandError};
pub use literal::{Lit, Var};
pub use sort::{Sort, SortId, SortKind, SortStore};
pub use traits::{ModelBuilder, SatInternalizer};
