//! Low-level scanner for Java source text.
//!
//! This crate turns a source string into a flat sequence of raw lexemes
//! (`RawTag` plus byte length). It knows nothing about keywords, enum bodies,
//! module declarations or generic brackets; that classification lives in
//! `java_lexer`, which drives a [`RawScanner`] and assigns final token kinds.
//!
//! ```text
//! &str → SourceBuffer → Cursor → RawScanner → (RawTag, len)*
//! ```
//!
//! The scanner never fails: malformed input produces error tags
//! (`InvalidByte`, `Unterminated*`) and scanning always moves forward.

mod cursor;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use raw_scanner::RawScanner;
pub use source_buffer::{LineCol, SourceBuffer};
pub use tag::{RawTag, RawToken};
