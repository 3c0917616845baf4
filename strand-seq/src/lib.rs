//! Strand Seq - Sequence/String/Regex Theory Front-End.
//!
//! This crate defines the sort algebra and operator vocabulary for
//! sequences, strings, characters, and regular expressions over the shared
//! term graph of [`strand_core`], and a compositional analysis that infers
//! semantic properties of regex terms without re-deriving them on every
//! query. It provides:
//!
//! - **Unicode string values** ([`ZString`]): the atomic literal type, with
//!   SMT-LIB 2.6 escape decoding and lossless round-tripping
//! - **Signature matching** ([`signature`]): pure structural unification of
//!   sort-parametric operator templates against concrete argument sorts
//! - **The theory plugin** ([`SeqPlugin`]): the authoritative sort/operator
//!   namespace, builtin-name tables, and constant value semantics
//! - **The term facade** ([`SeqFacade`] and the matchers in [`facade`]):
//!   typed builders and destructors for every operator
//! - **Regex property inference** ([`ReInfoEngine`]): a memoized bottom-up
//!   "info" lattice over regex terms — nullability, minimum length,
//!   automaton class, star height
//!
//! # Examples
//!
//! ```
//! use strand_core::TermManager;
//! use strand_seq::{ReInfoEngine, SeqFacade, Ternary, ZString};
//!
//! let mut tm = TermManager::new();
//! let mut facade = SeqFacade::new(&mut tm);
//!
//! // [a-z][a-z]
//! let a = facade.mk_string(&mut tm, &ZString::parse("a").unwrap());
//! let z = facade.mk_string(&mut tm, &ZString::parse("z").unwrap());
//! let lower = facade.mk_range(&mut tm, a, z).unwrap();
//! let two = facade.mk_re_concat(&mut tm, lower, lower).unwrap();
//!
//! let mut engine = ReInfoEngine::new();
//! let props = *engine.info(&tm, two).props().unwrap();
//! assert_eq!(props.min_length, 2);
//! assert_eq!(props.nullable, Ternary::False);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod facade;
pub mod info;
pub mod ops;
pub mod plugin;
pub mod signature;
pub mod zstring;

pub use facade::{max_mul, max_plus, re_display, SeqFacade};
pub use info::{re_max_length, ReInfo, ReInfoEngine, ReProps, Ternary};
pub use ops::SeqOp;
pub use plugin::{SeqPlugin, SUPPORTED_LOGICS};
pub use signature::{Assoc, Binding, Signature, SortPattern};
pub use zstring::{ZString, MAX_CHAR, NUM_BITS};
