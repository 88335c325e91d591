//! Mismatch errors raised while parsing.
//!
//! A parse has exactly one runtime failure: the scanner could not match any
//! kind the grammar required at the current offset. [`ParseError`] records
//! what was expected, the synthetic token that was found instead, and the
//! rule that was active. The message text comes from a [`MessageBuilder`],
//! so embedders can phrase it their own way.

use std::fmt;

use smallvec::SmallVec;
use tern_diagnostic::{unexpected_end, unexpected_token, Diagnostic, ErrorCode};
use tern_ir::{Span, Token, TokenKindId};
use tern_scan::Vocabulary;

/// Expected kinds of a mismatch: one for `consume`, the branch union for
/// `alternatives`.
pub type ExpectedKinds = SmallVec<[TokenKindId; 4]>;

/// Produces the human-readable message of a mismatch.
pub trait MessageBuilder {
    fn mismatch(
        &self,
        vocabulary: &Vocabulary,
        expected: &[TokenKindId],
        found: &Token<'_>,
        rule: Option<&str>,
    ) -> String;
}

/// `expected X, found `y` while parsing Rule`.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultMessages;

impl MessageBuilder for DefaultMessages {
    fn mismatch(
        &self,
        vocabulary: &Vocabulary,
        expected: &[TokenKindId],
        found: &Token<'_>,
        rule: Option<&str>,
    ) -> String {
        let expected = describe_expected(vocabulary, expected);
        let found = if found.is_end_of_input() {
            "end of input".to_string()
        } else {
            format!("`{}`", found.text)
        };
        match rule {
            Some(rule) => format!("expected {expected}, found {found} while parsing {rule}"),
            None => format!("expected {expected}, found {found}"),
        }
    }
}

/// Phrase a set of expected kinds: `A`, `A or B`, `one of A, B, C`.
pub fn describe_expected(vocabulary: &Vocabulary, expected: &[TokenKindId]) -> String {
    let name = |kind: TokenKindId| match kind {
        TokenKindId::EOF => "end of input",
        kind => vocabulary.name(kind),
    };
    match expected {
        [] => "nothing".to_string(),
        [only] => name(*only).to_string(),
        [first, second] => format!("{} or {}", name(*first), name(*second)),
        many => {
            let names: Vec<&str> = many.iter().map(|&kind| name(kind)).collect();
            format!("one of {}", names.join(", "))
        }
    }
}

/// A token mismatch, raised once and propagated with `?` to [`Parser::run`].
///
/// [`Parser::run`]: crate::Parser::run
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError<'src> {
    pub expected: ExpectedKinds,
    /// Synthetic [`TokenKindId::ERROR`] token: the offending character, or
    /// the end-of-input marker.
    pub found: Token<'src>,
    /// Innermost rule active when the mismatch was raised.
    pub rule: Option<&'static str>,
    pub message: String,
}

impl ParseError<'_> {
    #[inline]
    pub fn span(&self) -> Span {
        self.found.span
    }

    pub fn is_unexpected_end(&self) -> bool {
        self.found.is_end_of_input()
    }

    pub fn code(&self) -> ErrorCode {
        if self.is_unexpected_end() {
            ErrorCode::E1002
        } else {
            ErrorCode::E1001
        }
    }

    /// Convert to a full [`Diagnostic`] for rendering.
    ///
    /// Kind names are resolved against `vocabulary`, which must be the one
    /// the parse ran with.
    pub fn to_diagnostic(&self, vocabulary: &Vocabulary) -> Diagnostic {
        let expected = describe_expected(vocabulary, &self.expected);
        let diagnostic = if self.is_unexpected_end() {
            unexpected_end(self.span(), &expected)
        } else {
            unexpected_token(self.span(), &expected, self.found.text)
        };
        let diagnostic = diagnostic.with_message(self.message.clone());
        match self.rule {
            Some(rule) => diagnostic.with_note(format!("while parsing {rule}")),
            None => diagnostic,
        }
    }
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span())
    }
}

impl std::error::Error for ParseError<'_> {}
