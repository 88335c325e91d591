//! Token kind identifiers, descriptor flags and token instances.
//!
//! A token kind is identified by a dense index into the vocabulary that
//! defined it. The match rule itself lives with the vocabulary in
//! `tern_scan`; everything downstream only needs the id.

use bitflags::bitflags;
use std::fmt;

use crate::Span;

/// Dense identifier of a token kind within one vocabulary.
///
/// Ids are assigned in definition order starting at zero. Two ids at the
/// top of the range are reserved and can never be produced by a vocabulary:
/// [`TokenKindId::ERROR`] for synthetic mismatch tokens and
/// [`TokenKindId::EOF`] for "end of input expected".
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TokenKindId(u32);

impl TokenKindId {
    /// Kind of the synthetic token built when a mandatory match fails.
    pub const ERROR: TokenKindId = TokenKindId(u32::MAX);
    /// Expected kind when a grammar requires the input to be exhausted.
    pub const EOF: TokenKindId = TokenKindId(u32::MAX - 1);

    /// First id that a vocabulary may not hand out.
    pub const FIRST_RESERVED: u32 = u32::MAX - 1;

    #[inline]
    pub const fn new(index: u32) -> Self {
        TokenKindId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether `self` is one of the reserved ids no vocabulary hands out.
    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0 >= Self::FIRST_RESERVED
    }
}

impl fmt::Debug for TokenKindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TokenKindId::ERROR => write!(f, "TokenKindId(<error>)"),
            TokenKindId::EOF => write!(f, "TokenKindId(<eof>)"),
            TokenKindId(index) => write!(f, "TokenKindId({index})"),
        }
    }
}

bitflags! {
    /// Descriptor flags attached to a token kind at definition time.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenFlags: u8 {
        /// Matched text is insignificant and never reaches the grammar.
        ///
        /// All skipped kinds are folded into the scanner's single
        /// aggregate skip rule.
        const SKIP = 1 << 0;
        /// Matched text may contain line breaks.
        const LINE_BREAKS = 1 << 1;
    }
}

/// A matched token: kind, text borrowed from the source, and location.
///
/// Produced by the scanner on every successful match, and synthesized with
/// kind [`TokenKindId::ERROR`] when a mandatory match fails.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token<'src> {
    pub kind: TokenKindId,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    #[inline]
    pub fn new(kind: TokenKindId, text: &'src str, span: Span) -> Self {
        Token { kind, text, span }
    }

    /// Whether this is a synthetic mismatch token.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == TokenKindId::ERROR
    }

    /// Whether this is the synthetic token standing for exhausted input.
    ///
    /// Error tokens cover exactly one character, so an empty span can only
    /// mean the scanner was already past the last character.
    #[inline]
    pub fn is_end_of_input(&self) -> bool {
        self.is_error() && self.span.is_empty()
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} @ {}", self.kind, self.text, self.span)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Token, TokenKindId};
    crate::static_assert_size!(TokenKindId, 4);
    crate::static_assert_size!(Token<'static>, 32);
}
