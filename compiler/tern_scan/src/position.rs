//! The single live scan offset and the text it points into.
//!
//! This is pure state. Lookahead saves it with [`PositionStore::export`] and
//! puts it back with [`PositionStore::import`]; nothing else about a probe
//! needs undoing, because matching has no other side effects.

/// A snapshot of the scan offset.
///
/// Plain `Copy` value: taking one is free, restoring one is a store.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default, Debug)]
pub struct Position(u32);

impl Position {
    /// Offset zero, the state of a freshly reset store.
    pub const START: Position = Position(0);

    #[inline]
    pub const fn new(offset: u32) -> Self {
        Position(offset)
    }

    #[inline]
    pub const fn offset(self) -> u32 {
        self.0
    }
}

/// Source text plus the current byte offset into it.
///
/// Offsets are `u32`, matching [`Span`](tern_ir::Span); sources larger than
/// 4 GiB are not supported.
#[derive(Clone, Debug)]
pub struct PositionStore<'src> {
    source: &'src str,
    offset: u32,
}

impl<'src> PositionStore<'src> {
    pub fn new(source: &'src str) -> Self {
        debug_assert!(
            u32::try_from(source.len()).is_ok(),
            "source of {} bytes exceeds the u32 offset space",
            source.len()
        );
        PositionStore { source, offset: 0 }
    }

    /// Install new text and rewind to offset zero.
    pub fn reset(&mut self, source: &'src str) {
        *self = PositionStore::new(source);
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub fn export(&self) -> Position {
        Position(self.offset)
    }

    /// Overwrite the current offset with a previously exported one.
    #[inline]
    pub fn import(&mut self, position: Position) {
        debug_assert!(
            position.0 as usize <= self.source.len(),
            "position {} out of bounds (max {})",
            position.0,
            self.source.len()
        );
        self.offset = position.0;
    }

    /// Text from the current offset to the end.
    ///
    /// Empty when the offset does not sit on a character boundary, which only
    /// a hand-built [`Position`] can cause.
    #[inline]
    pub fn remaining(&self) -> &'src str {
        self.source.get(self.offset as usize..).unwrap_or("")
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset as usize >= self.source.len()
    }

    /// Character at the current offset, if any.
    #[inline]
    pub fn current_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Move forward by `len` bytes of already-matched text.
    #[inline]
    pub(crate) fn advance(&mut self, len: u32) {
        debug_assert!(
            (self.offset + len) as usize <= self.source.len(),
            "advance past end of source"
        );
        self.offset += len;
    }
}

#[cfg(test)]
mod tests;
