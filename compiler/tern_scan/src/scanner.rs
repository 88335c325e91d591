//! Anchored token matching over a [`PositionStore`].
//!
//! The scanner never searches forward. `try_match(kind)` either matches
//! `kind` starting exactly at the current offset and advances past it, or
//! reports `None` and leaves the offset untouched. Because of that, saving
//! and restoring the offset is enough to undo any exploratory match.

use tern_ir::{Span, Token, TokenKindId};
use tracing::{trace, warn};

use crate::{Position, PositionStore, ScanConfig, Vocabulary};

/// A failed mandatory match, before any grammar context is attached.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScanMismatch<'src> {
    pub expected: TokenKindId,
    /// Synthetic [`TokenKindId::ERROR`] token at the failure offset.
    pub found: Token<'src>,
}

/// Scanning capability consumed by the grammar engine.
///
/// The engine holds an implementation as an injected dependency instead of
/// overriding hooks, so tests can wrap or replace the real [`Scanner`].
pub trait Scan<'src> {
    fn vocabulary(&self) -> &Vocabulary;

    /// Install new input and reset every piece of per-parse state.
    fn begin(&mut self, source: &'src str);

    fn export_position(&self) -> Position;

    fn import_position(&mut self, position: Position);

    /// Advance past the insignificant run at the current offset, if any.
    ///
    /// Returns the number of bytes skipped.
    fn skip_insignificant(&mut self) -> u32;

    /// Match `kind` anchored at the current offset, advancing on success.
    fn try_match(&mut self, kind: TokenKindId) -> Option<Token<'src>>;

    /// Whether the current offset is past the last character.
    fn is_at_end(&self) -> bool;

    /// Synthetic one-character token at the current offset, or the
    /// end-of-input marker when there is nothing left.
    fn error_token(&self) -> Token<'src>;

    /// Skip insignificant text, then require `kind`.
    ///
    /// On failure the offset stays after the skipped run and the mismatch
    /// carries the synthetic error token for the offending character.
    fn consume(&mut self, kind: TokenKindId) -> Result<Token<'src>, ScanMismatch<'src>> {
        self.skip_insignificant();
        match self.try_match(kind) {
            Some(token) => Ok(token),
            None => Err(ScanMismatch {
                expected: kind,
                found: self.error_token(),
            }),
        }
    }
}

/// The standard [`Scan`] implementation.
///
/// One scanner serves one parse at a time. Parallel parses each need their
/// own scanner; the [`Vocabulary`] can be shared between them.
#[derive(Clone, Debug)]
pub struct Scanner<'v, 'src> {
    vocabulary: &'v Vocabulary,
    store: PositionStore<'src>,
    config: ScanConfig,
}

impl<'v, 'src> Scanner<'v, 'src> {
    /// Create a scanner with no input; call [`Scan::begin`] before use.
    pub fn new(vocabulary: &'v Vocabulary, config: ScanConfig) -> Self {
        Scanner {
            vocabulary,
            store: PositionStore::new(""),
            config,
        }
    }

    /// Create a scanner positioned at the start of `source`.
    pub fn with_source(vocabulary: &'v Vocabulary, source: &'src str) -> Self {
        let mut scanner = Scanner::new(vocabulary, ScanConfig::default());
        scanner.begin(source);
        scanner
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn source(&self) -> &'src str {
        self.store.source()
    }

    pub fn remaining(&self) -> &'src str {
        self.store.remaining()
    }
}

impl<'src> Scan<'src> for Scanner<'_, 'src> {
    fn vocabulary(&self) -> &Vocabulary {
        self.vocabulary
    }

    fn begin(&mut self, source: &'src str) {
        self.store.reset(source);
    }

    #[inline]
    fn export_position(&self) -> Position {
        self.store.export()
    }

    #[inline]
    fn import_position(&mut self, position: Position) {
        self.store.import(position);
    }

    fn skip_insignificant(&mut self) -> u32 {
        if !self.config.skip_insignificant {
            return 0;
        }
        let skipped = self.vocabulary.skip_len(self.store.remaining());
        let skipped = u32::try_from(skipped).unwrap_or(0);
        if skipped > 0 {
            self.store.advance(skipped);
        }
        skipped
    }

    fn try_match(&mut self, kind: TokenKindId) -> Option<Token<'src>> {
        let def = self.vocabulary.get(kind)?;
        let rest = self.store.remaining();
        let len = def.match_len(rest)?;
        let text = &rest[..len];
        let start = self.store.offset() as usize;
        let span = Span::try_from_range(start..start + len).ok()?;
        self.store.advance(span.len());

        if !def.may_span_lines() && text.contains('\n') {
            warn!(
                kind = def.name(),
                start = span.start,
                "token kind without LINE_BREAKS matched a line break"
            );
        }
        trace!(
            kind = def.name(),
            start = span.start,
            end = span.end,
            "match"
        );
        Some(Token::new(kind, text, span))
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.store.is_at_end()
    }

    fn error_token(&self) -> Token<'src> {
        let start = self.store.offset();
        match self.store.current_char() {
            Some(c) => {
                let width = c.len_utf8();
                let text = &self.store.remaining()[..width];
                #[expect(clippy::cast_possible_truncation, reason = "len_utf8() <= 4")]
                let end = start + width as u32;
                Token::new(TokenKindId::ERROR, text, Span::new(start, end))
            }
            None => Token::new(TokenKindId::ERROR, self.config.eof_marker, Span::point(start)),
        }
    }
}
