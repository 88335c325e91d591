//! Tern IR - shared data model for grammar-directed scanning.
//!
//! This crate contains the types every other tern crate agrees on:
//! - Spans for source locations (flat byte offsets)
//! - Token kind identifiers and their descriptor flags
//! - Token instances produced by the scanner
//!
//! It has no knowledge of match rules or grammars. Those live in
//! `tern_scan` and `tern_parse`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod span;
mod token;

pub use span::{Span, SpanError};
pub use token::{Token, TokenFlags, TokenKindId};
