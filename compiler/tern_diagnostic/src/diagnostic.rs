use std::fmt;
use std::fmt::Write as _;

use tern_ir::Span;

use crate::span_utils::LineOffsetTable;
use crate::ErrorCode;

/// A span annotated with what should have been there.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

/// A parse failure, ready to show to a user.
///
/// Every diagnostic tern produces is an error: a mismatch aborts the parse.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    /// Where the mismatch happened. The first label is the offending token.
    pub labels: Vec<Label>,
    /// Extra context, such as the grammar rule that was active.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Diagnostic for `code`, titled with the code's default wording.
    pub fn new(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: code.title().to_string(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
        });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Render with 1-based `line:column` locations resolved against `source`.
    ///
    /// [`Display`](fmt::Display) prints byte ranges instead and needs no
    /// source text.
    pub fn render(&self, source: &str) -> String {
        let table = LineOffsetTable::build(source);
        let mut out = self.header();
        for label in &self.labels {
            let (line, col) = table.offset_to_line_col(source, label.span.start);
            let _ = write!(out, "\n  --> {line}:{col}: {}", label.message);
        }
        self.write_notes(&mut out);
        out
    }

    fn header(&self) -> String {
        format!("error [{}]: {}", self.code, self.message)
    }

    fn write_notes(&self, out: &mut String) {
        for note in &self.notes {
            let _ = write!(out, "\n  = note: {note}");
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = self.header();
        for label in &self.labels {
            let _ = write!(out, "\n  --> {}: {}", label.span, label.message);
        }
        self.write_notes(&mut out);
        f.write_str(&out)
    }
}

/// `E1001`: a mandatory token did not match; `found` is the offending text.
pub fn unexpected_token(span: Span, expected: &str, found: &str) -> Diagnostic {
    let code = ErrorCode::E1001;
    Diagnostic::new(code)
        .with_message(format!("{}: expected {expected}, found `{found}`", code.title()))
        .with_label(span, format!("expected {expected}"))
}

/// `E1002`: input ran out where a token was required.
pub fn unexpected_end(span: Span, expected: &str) -> Diagnostic {
    let code = ErrorCode::E1002;
    Diagnostic::new(code)
        .with_message(format!("{}: expected {expected}", code.title()))
        .with_label(span, format!("expected {expected} here"))
}
