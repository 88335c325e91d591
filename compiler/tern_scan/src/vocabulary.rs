//! Token-kind descriptors and the vocabulary that owns them.
//!
//! Every kind is defined once at startup with a name, a match rule and
//! [`TokenFlags`]. Building the vocabulary compiles each rule into a regular
//! expression anchored with `\A`, so a match can only ever begin at the
//! offset the scanner hands it. Kinds flagged [`TokenFlags::SKIP`] are also
//! folded into one aggregate rule, `\A(?:skip_1|skip_2|...)+`, which the
//! scanner applies as a single step before each real match attempt.

use regex::Regex;
use rustc_hash::FxHashMap;
use tern_ir::{TokenFlags, TokenKindId};

/// How a token kind recognizes its text.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum MatchRule {
    /// Exact text, matched verbatim (regex metacharacters are escaped).
    Literal(String),
    /// Regular expression body (`regex` crate syntax), anchored on build.
    Pattern(String),
    /// Reserved word: `text` only when the whole word at the offset is
    /// `text`, where a word continues through any character matching the
    /// `word` class. `return` does not match the start of `returned`.
    Keyword { text: String, word: String },
}

impl MatchRule {
    pub fn literal(text: impl Into<String>) -> Self {
        MatchRule::Literal(text.into())
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        MatchRule::Pattern(pattern.into())
    }

    pub fn keyword(text: impl Into<String>, word: impl Into<String>) -> Self {
        MatchRule::Keyword {
            text: text.into(),
            word: word.into(),
        }
    }

    /// Regex body equivalent to this rule, not yet anchored.
    ///
    /// A keyword munches the entire word; [`TokenKindDef::match_len`] then
    /// rejects any word longer than the keyword itself.
    fn regex_body(&self) -> String {
        match self {
            MatchRule::Literal(text) => regex::escape(text),
            MatchRule::Pattern(pattern) => pattern.clone(),
            MatchRule::Keyword { text, word } => format!("{}(?:{word})*", regex::escape(text)),
        }
    }

    /// Text the rule must match exactly, if any.
    fn fixed_text(&self) -> Option<&str> {
        match self {
            MatchRule::Literal(text) | MatchRule::Keyword { text, .. } => Some(text.as_str()),
            MatchRule::Pattern(_) => None,
        }
    }
}

/// Errors raised while building a [`Vocabulary`].
///
/// All of them are setup errors: they surface before any input is parsed.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("token kind `{name}` has an invalid pattern: {source}")]
    InvalidPattern { name: String, source: regex::Error },
    #[error("token kind `{name}` is defined more than once")]
    DuplicateName { name: String },
    #[error("token kind `{name}` has an empty literal")]
    EmptyLiteral { name: String },
    #[error("token kind `{name}` matches the empty string")]
    MatchesEmpty { name: String },
    #[error("vocabulary defines {count} token kinds, more than the id space allows")]
    TooManyKinds { count: usize },
}

/// An immutable token-kind descriptor.
#[derive(Clone, Debug)]
pub struct TokenKindDef {
    id: TokenKindId,
    name: String,
    rule: MatchRule,
    flags: TokenFlags,
    matcher: Regex,
    /// Required match length for keywords.
    exact_len: Option<usize>,
}

impl TokenKindDef {
    pub fn id(&self) -> TokenKindId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &MatchRule {
        &self.rule
    }

    pub fn flags(&self) -> TokenFlags {
        self.flags
    }

    /// Discardable output, consumed by the aggregate skip rule.
    pub fn is_skipped(&self) -> bool {
        self.flags.contains(TokenFlags::SKIP)
    }

    pub fn may_span_lines(&self) -> bool {
        self.flags.contains(TokenFlags::LINE_BREAKS)
    }

    /// Length in bytes of this kind's match at the very start of `rest`.
    ///
    /// Zero-length matches count as no match: a token always advances.
    #[inline]
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        self.matcher
            .find(rest)
            .map(|m| m.end())
            .filter(|&len| len > 0 && self.exact_len.is_none_or(|exact| exact == len))
    }
}

/// Ordered token-kind definitions, validated and compiled by [`build`].
///
/// Ids are handed out at definition time so grammar code can keep them in
/// plain fields; errors are deferred until `build`.
///
/// [`build`]: VocabularyBuilder::build
#[derive(Clone, Debug, Default)]
pub struct VocabularyBuilder {
    defs: Vec<(String, MatchRule, TokenFlags)>,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a token kind and return its id.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        rule: MatchRule,
        flags: TokenFlags,
    ) -> TokenKindId {
        let id = TokenKindId::new(u32::try_from(self.defs.len()).unwrap_or(u32::MAX));
        self.defs.push((name.into(), rule, flags));
        id
    }

    /// Define a significant kind matched by exact text.
    pub fn literal(&mut self, name: impl Into<String>, text: impl Into<String>) -> TokenKindId {
        self.define(name, MatchRule::literal(text), TokenFlags::empty())
    }

    /// Define a significant kind matched by a regular expression.
    pub fn pattern(&mut self, name: impl Into<String>, pattern: impl Into<String>) -> TokenKindId {
        self.define(name, MatchRule::pattern(pattern), TokenFlags::empty())
    }

    /// Define a reserved word that never matches a prefix of a longer word.
    ///
    /// `word` is a regex class of the characters that continue a word, for
    /// example `[A-Za-z0-9_$]`.
    pub fn keyword(
        &mut self,
        name: impl Into<String>,
        text: impl Into<String>,
        word: impl Into<String>,
    ) -> TokenKindId {
        self.define(name, MatchRule::keyword(text, word), TokenFlags::empty())
    }

    /// Define an insignificant kind (whitespace, comments).
    ///
    /// `SKIP` is always added to `flags`.
    pub fn skip(
        &mut self,
        name: impl Into<String>,
        pattern: impl Into<String>,
        flags: TokenFlags,
    ) -> TokenKindId {
        self.define(name, MatchRule::pattern(pattern), flags | TokenFlags::SKIP)
    }

    /// Validate and compile every definition.
    pub fn build(self) -> Result<Vocabulary, VocabularyError> {
        let count = self.defs.len();
        let next_free = u32::try_from(count).map_or(TokenKindId::ERROR, TokenKindId::new);
        if next_free.is_reserved() {
            return Err(VocabularyError::TooManyKinds { count });
        }

        let mut kinds = Vec::with_capacity(count);
        let mut by_name = FxHashMap::default();
        let mut skip_bodies = Vec::new();

        for (index, (name, rule, flags)) in self.defs.into_iter().enumerate() {
            let id = TokenKindId::new(u32::try_from(index).unwrap_or(u32::MAX));
            if by_name.insert(name.clone(), id).is_some() {
                return Err(VocabularyError::DuplicateName { name });
            }
            if rule.fixed_text().is_some_and(str::is_empty) {
                return Err(VocabularyError::EmptyLiteral { name });
            }

            let body = rule.regex_body();
            let matcher = match Regex::new(&format!(r"\A(?:{body})")) {
                Ok(matcher) => matcher,
                Err(source) => return Err(VocabularyError::InvalidPattern { name, source }),
            };
            if matcher.is_match("") {
                return Err(VocabularyError::MatchesEmpty { name });
            }
            if flags.contains(TokenFlags::SKIP) {
                skip_bodies.push(format!("(?:{body})"));
            }

            let exact_len = match &rule {
                MatchRule::Keyword { text, .. } => Some(text.len()),
                MatchRule::Literal(_) | MatchRule::Pattern(_) => None,
            };
            kinds.push(TokenKindDef {
                id,
                name,
                rule,
                flags,
                matcher,
                exact_len,
            });
        }

        let skip = if skip_bodies.is_empty() {
            None
        } else {
            let aggregate = format!(r"\A(?:{})+", skip_bodies.join("|"));
            match Regex::new(&aggregate) {
                Ok(re) => Some(re),
                Err(source) => {
                    return Err(VocabularyError::InvalidPattern {
                        name: "<skip>".to_string(),
                        source,
                    })
                }
            }
        };

        Ok(Vocabulary {
            kinds,
            by_name,
            skip,
        })
    }
}

/// The immutable, shareable set of token kinds for one grammar.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    kinds: Vec<TokenKindDef>,
    by_name: FxHashMap<String, TokenKindId>,
    /// Aggregate of every `SKIP` kind; `None` when nothing is skippable.
    skip: Option<Regex>,
}

impl Vocabulary {
    pub fn builder() -> VocabularyBuilder {
        VocabularyBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn get(&self, id: TokenKindId) -> Option<&TokenKindDef> {
        self.kinds.get(id.index())
    }

    /// Look a kind up by its definition name.
    pub fn lookup(&self, name: &str) -> Option<TokenKindId> {
        self.by_name.get(name).copied()
    }

    /// Display name of a kind, including the reserved ones.
    pub fn name(&self, id: TokenKindId) -> &str {
        match id {
            TokenKindId::ERROR => "<error>",
            TokenKindId::EOF => "<eof>",
            _ => self.get(id).map_or("<unknown>", TokenKindDef::name),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenKindDef> {
        self.kinds.iter()
    }

    pub fn has_skip_rule(&self) -> bool {
        self.skip.is_some()
    }

    /// Length of the insignificant run at the very start of `rest`.
    #[inline]
    pub fn skip_len(&self, rest: &str) -> usize {
        self.skip
            .as_ref()
            .and_then(|re| re.find(rest))
            .map_or(0, |m| m.end())
    }
}
