//! Diagnostic model for tern.
//!
//! A diagnostic carries:
//! - An error code for searchability
//! - A message (what went wrong)
//! - A primary span (where it went wrong, as a byte range)
//! - Notes (which grammar rule was active)
//!
//! Locations stay flat byte offsets until rendering; [`span_utils`]
//! converts them to 1-based line and column numbers on demand.

mod diagnostic;
mod error_code;
pub mod span_utils;

pub use diagnostic::{unexpected_end, unexpected_token, Diagnostic, Label};
pub use error_code::ErrorCode;
