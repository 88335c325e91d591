//! Grammar-directed parsing for tern.
//!
//! The parser drives a [`Scan`](tern_scan::Scan) implementation directly:
//! there is no token stream. Grammar rules decide which token kind to ask
//! for next, so one piece of text can scan differently depending on the
//! rule that is active.
//!
//! - [`OptionalLookahead`] / [`AlternativeLookahead`]: single-token
//!   predicates that probe the scanner and always put the position back
//! - [`PositionGuard`]: the scoped snapshot those predicates restore through
//! - [`Parser`]: rule stack, combinators, mismatch diagnostics
//! - [`grammar`]: a small ECMAScript-shaped grammar built on the above

mod error;
pub mod grammar;
mod lookahead;
mod parser;
mod snapshot;

pub use error::{describe_expected, DefaultMessages, ExpectedKinds, MessageBuilder, ParseError};
pub use lookahead::{AlternativeLookahead, LookaheadError, LookaheadSet, OptionalLookahead};
pub use parser::{ParseOutput, ParseResult, Parser};
pub use snapshot::PositionGuard;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=tern_parse=trace,tern_scan=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
