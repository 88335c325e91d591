//! Scanner configuration.

/// Per-scanner settings.
///
/// The token kinds themselves are configured through
/// [`VocabularyBuilder`](crate::VocabularyBuilder); this only controls how
/// the scanner applies them.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScanConfig {
    /// Run the aggregate skip rule before every consumption and probe.
    pub skip_insignificant: bool,
    /// Text of the synthetic error token when the input is exhausted.
    pub eof_marker: &'static str,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            skip_insignificant: true,
            eof_marker: "<eof>",
        }
    }
}

impl ScanConfig {
    /// Config for grammars where skipped kinds must be consumed explicitly.
    pub fn whitespace_sensitive() -> Self {
        ScanConfig {
            skip_insignificant: false,
            ..ScanConfig::default()
        }
    }

    #[must_use]
    pub fn with_eof_marker(mut self, marker: &'static str) -> Self {
        self.eof_marker = marker;
        self
    }
}
