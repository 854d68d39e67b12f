use std::fmt;

/// Byte range within an input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering the whole of `input`.
    pub fn whole(input: &str) -> Self {
        Self::new(0, input.len())
    }
}

/// All errors produced by recur.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventError {
    /// Malformed date, time or request document.
    Parse {
        message: String,
        span: Span,
        input: String,
    },

    /// Well-formed input that breaks a request precondition.
    Validation { message: String },

    /// Unknown IANA timezone name.
    Timezone { message: String },

    /// Date arithmetic left the supported range.
    Eval { message: String },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { message, .. } => write!(f, "{message}"),
            Self::Validation { message } => write!(f, "{message}"),
            Self::Timezone { message } => write!(f, "{message}"),
            Self::Eval { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for EventError {}

impl EventError {
    pub fn parse(message: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            span,
            input: input.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn timezone(message: impl Into<String>) -> Self {
        Self::Timezone {
            message: message.into(),
        }
    }

    pub fn eval(message: impl Into<String>) -> Self {
        Self::Eval {
            message: message.into(),
        }
    }

    /// Format a rich error, underlining the offending part of the input.
    pub fn display_rich(&self) -> String {
        match self {
            Self::Parse {
                message,
                span,
                input,
            } => format_span_error("error", message, span, input),
            Self::Validation { message } => format!("error: {message}"),
            Self::Timezone { message } => format!("error: {message}"),
            Self::Eval { message } => format!("error: {message}"),
        }
    }
}

fn format_span_error(prefix: &str, message: &str, span: &Span, input: &str) -> String {
    let mut out = format!("{prefix}: {message}\n");
    out.push_str(&format!("  {input}\n"));
    let padding = " ".repeat(span.start + 2);
    let underline = "^".repeat(span.end.saturating_sub(span.start).max(1));
    out.push_str(&padding);
    out.push_str(&underline);
    out
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
