//! The grammar execution engine.
//!
//! Grammar code is ordinary Rust over a [`Parser`]: sequencing is statement
//! order with `?`, sub-rules go through [`Parser::rule`], and decisions go
//! through the lookahead combinators. The engine owns the scanner and the
//! rule stack; the scan position is the only state lookahead touches.

use smallvec::smallvec;
use tern_ir::{Token, TokenKindId};
use tern_scan::{Position, Scan, Vocabulary};
use tracing::{debug, trace};

use crate::{
    AlternativeLookahead, DefaultMessages, ExpectedKinds, MessageBuilder, OptionalLookahead,
    ParseError,
};

pub type ParseResult<'src, T> = Result<T, ParseError<'src>>;

/// Final result of [`Parser::run`].
#[derive(Clone, Debug)]
pub struct ParseOutput<'src, T> {
    /// Value of the top-level rule; `None` when the parse aborted.
    pub value: Option<T>,
    pub errors: Vec<ParseError<'src>>,
}

impl<'src, T> ParseOutput<'src, T> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The value when the parse succeeded, every collected error otherwise.
    pub fn into_result(self) -> Result<T, Vec<ParseError<'src>>> {
        match self.value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}

/// Recursive descent driver over an injected [`Scan`] implementation.
pub struct Parser<'src, S, M = DefaultMessages> {
    scanner: S,
    messages: M,
    rules: Vec<&'static str>,
    errors: Vec<ParseError<'src>>,
    consumed: usize,
}

impl<'src, S: Scan<'src>> Parser<'src, S> {
    pub fn new(scanner: S) -> Self {
        Parser::with_messages(scanner, DefaultMessages)
    }
}

impl<'src, S: Scan<'src>, M: MessageBuilder> Parser<'src, S, M> {
    pub fn with_messages(scanner: S, messages: M) -> Self {
        Parser {
            scanner,
            messages,
            rules: Vec::new(),
            errors: Vec::new(),
            consumed: 0,
        }
    }

    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    pub fn scanner_mut(&mut self) -> &mut S {
        &mut self.scanner
    }

    pub fn into_scanner(self) -> S {
        self.scanner
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.scanner.vocabulary()
    }

    /// Install `source` and reset all per-parse state.
    ///
    /// Must run before every input when a parser is reused; [`run`] does it.
    ///
    /// [`run`]: Parser::run
    pub fn begin_parse(&mut self, source: &'src str) {
        self.scanner.begin(source);
        self.rules.clear();
        self.errors.clear();
        self.consumed = 0;
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.scanner.export_position()
    }

    /// Innermost active rule.
    pub fn active_rule(&self) -> Option<&'static str> {
        self.rules.last().copied()
    }

    pub fn rule_stack(&self) -> &[&'static str] {
        &self.rules
    }

    /// Tokens committed since [`begin_parse`](Parser::begin_parse).
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn errors(&self) -> &[ParseError<'src>] {
        &self.errors
    }

    /// Consume one token of a required kind.
    ///
    /// Skips insignificant text first. On failure the error carries the
    /// single offending character (or the end-of-input marker) and the
    /// active rule.
    pub fn consume(&mut self, kind: TokenKindId) -> ParseResult<'src, Token<'src>> {
        match self.scanner.consume(kind) {
            Ok(token) => {
                self.consumed += 1;
                trace!(
                    kind = self.scanner.vocabulary().name(kind),
                    start = token.span.start,
                    end = token.span.end,
                    "consume"
                );
                Ok(token)
            }
            Err(mismatch) => Err(self.mismatch(smallvec![mismatch.expected], mismatch.found)),
        }
    }

    /// Run `body` as the sub-rule `name`.
    ///
    /// `name` is the active rule for every mismatch raised inside `body`
    /// that no nested rule claims.
    pub fn rule<T>(
        &mut self,
        name: &'static str,
        body: impl FnOnce(&mut Self) -> ParseResult<'src, T>,
    ) -> ParseResult<'src, T> {
        trace!(rule = name, offset = self.position().offset(), "enter");
        self.rules.push(name);
        let result = body(self);
        self.rules.pop();
        trace!(rule = name, ok = result.is_ok(), "exit");
        result
    }

    /// Whether `lookahead` would enter its fragment here, without consuming.
    #[inline]
    pub fn check(&mut self, lookahead: &OptionalLookahead) -> bool {
        lookahead.evaluate(&mut self.scanner)
    }

    /// Run `body` only if `lookahead` says the fragment starts here.
    pub fn optional<T>(
        &mut self,
        lookahead: &OptionalLookahead,
        body: impl FnOnce(&mut Self) -> ParseResult<'src, T>,
    ) -> ParseResult<'src, Option<T>> {
        if self.check(lookahead) {
            body(self).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Run `body` for as long as `lookahead` says another item starts here.
    ///
    /// `body` must consume at least one token per iteration; the lookahead
    /// already guarantees that when it commits to a candidate `body` will
    /// consume.
    pub fn many<T>(
        &mut self,
        lookahead: &OptionalLookahead,
        mut body: impl FnMut(&mut Self) -> ParseResult<'src, T>,
    ) -> ParseResult<'src, Vec<T>> {
        let mut items = Vec::new();
        while self.check(lookahead) {
            let before = self.position();
            items.push(body(self)?);
            debug_assert!(
                self.position() > before,
                "repetition body made no progress at offset {}",
                before.offset()
            );
        }
        Ok(items)
    }

    /// Pick the branch of a labeled choice.
    ///
    /// When no branch applies, the error expects the union of every branch's
    /// candidates.
    pub fn alternatives(&mut self, lookahead: &AlternativeLookahead) -> ParseResult<'src, usize> {
        if let Some(branch) = lookahead.evaluate(&mut self.scanner) {
            return Ok(branch);
        }
        self.scanner.skip_insignificant();
        let found = self.scanner.error_token();
        Err(self.mismatch(lookahead.expected().iter().copied().collect(), found))
    }

    /// Require that only insignificant text remains.
    pub fn expect_end(&mut self) -> ParseResult<'src, ()> {
        self.scanner.skip_insignificant();
        if self.scanner.is_at_end() {
            Ok(())
        } else {
            let found = self.scanner.error_token();
            Err(self.mismatch(smallvec![TokenKindId::EOF], found))
        }
    }

    /// Parse `source` with the top-level rule `entry`.
    ///
    /// Resets the parser first. A raised mismatch aborts the parse and is
    /// recorded in [`ParseOutput::errors`].
    pub fn run<T>(
        &mut self,
        source: &'src str,
        entry: impl FnOnce(&mut Self) -> ParseResult<'src, T>,
    ) -> ParseOutput<'src, T> {
        self.begin_parse(source);
        let value = match entry(self) {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.push(error);
                None
            }
        };
        ParseOutput {
            value,
            errors: std::mem::take(&mut self.errors),
        }
    }

    /// Build the error for a failed match.
    ///
    /// Separated as `#[cold]` so the message formatting stays off the
    /// consumption fast path.
    #[cold]
    #[inline(never)]
    fn mismatch(&self, expected: ExpectedKinds, found: Token<'src>) -> ParseError<'src> {
        let rule = self.active_rule();
        let message = self
            .messages
            .mismatch(self.scanner.vocabulary(), &expected, &found, rule);
        debug!(
            rule = rule.unwrap_or("<none>"),
            offset = found.span.start,
            %message,
            "mismatch"
        );
        ParseError {
            expected,
            found,
            rule,
            message,
        }
    }
}

#[cfg(test)]
mod tests;
