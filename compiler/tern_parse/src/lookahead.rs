//! Single-token lookahead predicates.
//!
//! A predicate is built once per grammar decision point from the sequences
//! of token kinds that may start each branch. Only sequences of exactly one
//! token are admissible; anything else is rejected at construction, before
//! any input is parsed.
//!
//! Evaluation snapshots the scan position, skips insignificant text, probes
//! the candidates in declaration order with real anchored matches, and
//! restores the position through a [`PositionGuard`] no matter how the probe
//! ends. The first candidate that matches wins.
//!
//! Probe results are not cached: a token found by a predicate is matched a
//! second time when the chosen branch consumes it.

use smallvec::SmallVec;
use tern_ir::TokenKindId;
use tern_scan::{Scan, Vocabulary};
use tracing::trace;

use crate::PositionGuard;

/// Errors raised while building a lookahead predicate.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LookaheadError {
    #[error(
        "lookahead sequence {sequence} of branch {branch} has {len} tokens; \
         only single-token lookahead is supported"
    )]
    NotSingleToken {
        branch: usize,
        sequence: usize,
        len: usize,
    },
    #[error("lookahead candidate {kind:?} is not defined by the vocabulary")]
    UnknownKind { kind: TokenKindId },
    #[error("lookahead candidate {kind:?} is a skipped kind and can never match")]
    SkippedKind { kind: TokenKindId },
    #[error("lookahead branch {branch} has no candidates")]
    NoCandidates { branch: usize },
    #[error("alternative lookahead has no branches")]
    NoBranches,
}

/// Ordered candidate kinds for one branch.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct LookaheadSet {
    kinds: SmallVec<[TokenKindId; 4]>,
}

impl LookaheadSet {
    /// Validate the admissible sequences of `branch` and keep their only kind.
    fn from_sequences<I, Q>(
        vocabulary: &Vocabulary,
        branch: usize,
        sequences: I,
    ) -> Result<Self, LookaheadError>
    where
        I: IntoIterator<Item = Q>,
        Q: AsRef<[TokenKindId]>,
    {
        let mut kinds: SmallVec<[TokenKindId; 4]> = SmallVec::new();
        for (sequence, tokens) in sequences.into_iter().enumerate() {
            let &[kind] = tokens.as_ref() else {
                return Err(LookaheadError::NotSingleToken {
                    branch,
                    sequence,
                    len: tokens.as_ref().len(),
                });
            };
            let Some(def) = vocabulary.get(kind) else {
                return Err(LookaheadError::UnknownKind { kind });
            };
            // The skip step always runs first, so a skipped kind is never
            // at the offset a candidate is tried at.
            if def.is_skipped() {
                return Err(LookaheadError::SkippedKind { kind });
            }
            kinds.push(kind);
        }
        if kinds.is_empty() {
            return Err(LookaheadError::NoCandidates { branch });
        }
        Ok(LookaheadSet { kinds })
    }

    pub fn kinds(&self) -> &[TokenKindId] {
        &self.kinds
    }

    pub fn contains(&self, kind: TokenKindId) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// First candidate that matches at the current offset.
    ///
    /// Leaves the scanner advanced past the hit; callers hold a guard.
    fn first_match<'src, S: Scan<'src> + ?Sized>(&self, scanner: &mut S) -> Option<TokenKindId> {
        self.kinds
            .iter()
            .copied()
            .find(|&kind| scanner.try_match(kind).is_some())
    }
}

/// Predicate for an optional fragment: enter it or skip it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionalLookahead {
    candidates: LookaheadSet,
}

impl OptionalLookahead {
    /// Build from the admissible sequences of the fragment.
    ///
    /// Every sequence must hold exactly one token kind.
    pub fn new<I, Q>(vocabulary: &Vocabulary, sequences: I) -> Result<Self, LookaheadError>
    where
        I: IntoIterator<Item = Q>,
        Q: AsRef<[TokenKindId]>,
    {
        Ok(OptionalLookahead {
            candidates: LookaheadSet::from_sequences(vocabulary, 0, sequences)?,
        })
    }

    /// Build from single kinds, one sequence each.
    pub fn from_kinds(vocabulary: &Vocabulary, kinds: &[TokenKindId]) -> Result<Self, LookaheadError> {
        Self::new(vocabulary, kinds.iter().map(std::slice::from_ref))
    }

    pub fn candidates(&self) -> &LookaheadSet {
        &self.candidates
    }

    /// The candidate that decides "enter", or `None` for "skip".
    pub fn matching_candidate<'src, S: Scan<'src> + ?Sized>(
        &self,
        scanner: &mut S,
    ) -> Option<TokenKindId> {
        let mut probe = PositionGuard::new(scanner);
        probe.skip_insignificant();
        let hit = self.candidates.first_match(&mut *probe);
        trace!(
            offset = probe.saved().offset(),
            candidate = ?hit,
            "optional lookahead"
        );
        hit
    }

    /// Whether the optional fragment should be entered.
    ///
    /// The scan position is the same before and after the call.
    #[inline]
    pub fn evaluate<'src, S: Scan<'src> + ?Sized>(&self, scanner: &mut S) -> bool {
        self.matching_candidate(scanner).is_some()
    }
}

/// Predicate for a labeled-alternative construct: which branch, if any.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlternativeLookahead {
    branches: Vec<LookaheadSet>,
    /// Every branch's candidates, first occurrence order, no duplicates.
    expected: SmallVec<[TokenKindId; 8]>,
}

impl AlternativeLookahead {
    /// Build from the admissible sequences of each branch, in branch order.
    pub fn new<B, I, Q>(vocabulary: &Vocabulary, branches: B) -> Result<Self, LookaheadError>
    where
        B: IntoIterator<Item = I>,
        I: IntoIterator<Item = Q>,
        Q: AsRef<[TokenKindId]>,
    {
        let branches = branches
            .into_iter()
            .enumerate()
            .map(|(index, sequences)| LookaheadSet::from_sequences(vocabulary, index, sequences))
            .collect::<Result<Vec<_>, _>>()?;
        if branches.is_empty() {
            return Err(LookaheadError::NoBranches);
        }

        let mut expected: SmallVec<[TokenKindId; 8]> = SmallVec::new();
        for &kind in branches.iter().flat_map(LookaheadSet::kinds) {
            if !expected.contains(&kind) {
                expected.push(kind);
            }
        }
        Ok(AlternativeLookahead { branches, expected })
    }

    /// Build from single kinds, one list per branch.
    pub fn from_kinds(
        vocabulary: &Vocabulary,
        branches: &[&[TokenKindId]],
    ) -> Result<Self, LookaheadError> {
        Self::new(
            vocabulary,
            branches
                .iter()
                .map(|kinds| kinds.iter().map(std::slice::from_ref)),
        )
    }

    pub fn branches(&self) -> &[LookaheadSet] {
        &self.branches
    }

    /// Union of all branches' candidates, for mismatch reporting.
    pub fn expected(&self) -> &[TokenKindId] {
        &self.expected
    }

    /// Index of the first branch with a matching candidate.
    ///
    /// The scan position is the same before and after the call.
    pub fn evaluate<'src, S: Scan<'src> + ?Sized>(&self, scanner: &mut S) -> Option<usize> {
        let mut probe = PositionGuard::new(scanner);
        probe.skip_insignificant();
        let selected = self
            .branches
            .iter()
            .position(|branch| branch.first_match(&mut *probe).is_some());
        trace!(
            offset = probe.saved().offset(),
            branch = ?selected,
            "alternative lookahead"
        );
        selected
    }
}
