//! Interface Traits Toward the Host Solver.

mod internalizer;

pub use internalizer::{ModelBuilder, SatInternalizer};
