use std::fmt;

/// Error codes for scanner and parser diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E1xxx: Parse-time token mismatches
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Mandatory token did not match at the current position
    E1001,
    /// Input ended where a token was required
    E1002,
}

impl ErrorCode {
    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
        }
    }

    /// Default message of a diagnostic carrying this code.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "unexpected end of input",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests;
