//! Scoped position snapshots for lookahead.
//!
//! Probing is plain matching followed by a rewind. [`PositionGuard`] takes
//! the snapshot when it is created and writes it back when it is dropped,
//! so every way out of a probe restores the position: normal return, early
//! return, `?`, and unwinding from a panic.
//!
//! ```ignore
//! let mut probe = PositionGuard::new(&mut scanner);
//! probe.skip_insignificant();
//! let hit = probe.try_match(kind).is_some();
//! // position restored here
//! ```
//!
//! The guard snapshots the scan offset only. Anything else a probe touches
//! (collected errors, rule stack) is not part of the snapshot, which is why
//! lookahead code never touches it.

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use tern_scan::{Position, Scan};

/// Exclusive access to a scanner that restores its position on drop.
///
/// Dereferences to the scanner, so probing code calls [`Scan`] methods on
/// the guard directly.
pub struct PositionGuard<'a, 'src, S: Scan<'src> + ?Sized> {
    scanner: &'a mut S,
    saved: Position,
    _source: PhantomData<&'src str>,
}

impl<'a, 'src, S: Scan<'src> + ?Sized> PositionGuard<'a, 'src, S> {
    #[inline]
    pub fn new(scanner: &'a mut S) -> Self {
        let saved = scanner.export_position();
        PositionGuard {
            scanner,
            saved,
            _source: PhantomData,
        }
    }

    /// Position that will be restored.
    #[inline]
    pub fn saved(&self) -> Position {
        self.saved
    }
}

impl<'src, S: Scan<'src> + ?Sized> Deref for PositionGuard<'_, 'src, S> {
    type Target = S;

    #[inline]
    fn deref(&self) -> &S {
        self.scanner
    }
}

impl<'src, S: Scan<'src> + ?Sized> DerefMut for PositionGuard<'_, 'src, S> {
    #[inline]
    fn deref_mut(&mut self) -> &mut S {
        self.scanner
    }
}

impl<'src, S: Scan<'src> + ?Sized> Drop for PositionGuard<'_, 'src, S> {
    #[inline]
    fn drop(&mut self) {
        self.scanner.import_position(self.saved);
    }
}

#[cfg(test)]
mod tests;
