//! Scannerless token matching for tern.
//!
//! There is no up-front tokenization pass. The parser asks for one token
//! kind at a time and the scanner answers by anchoring that kind's match
//! rule exactly at the current offset:
//!
//! - [`Vocabulary`]: the immutable set of token-kind descriptors, built once
//! - [`PositionStore`]: the source text plus the single live scan offset
//! - [`Scanner`]: anchored matching, insignificant-text skipping, and
//!   synthetic error tokens, exposed through the [`Scan`] capability trait
//!
//! Which kind to ask for is decided by the grammar in `tern_parse`; that is
//! what lets `/` be a division operator in one place and the start of a
//! regular-expression literal in another.

mod config;
mod position;
mod scanner;
mod vocabulary;

pub use config::ScanConfig;
pub use position::{Position, PositionStore};
pub use scanner::{Scan, ScanMismatch, Scanner};
pub use vocabulary::{MatchRule, TokenKindDef, Vocabulary, VocabularyBuilder, VocabularyError};
