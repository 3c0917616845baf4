//! Property test modules for strand-seq.

mod info_properties;
mod zstring_properties;
