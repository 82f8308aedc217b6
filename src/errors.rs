//! Match failures as data.
//!
//! Every failure the matcher can produce is represented by the types in this
//! module and returned inside a `ParseResult`; nothing panics or unwinds.
//! `ErrorKind` carries the failure data, `MatchError` wraps it with the
//! rendered command line so `miette` can point at the offending token.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scan-phase failures: token-to-slot binding.
pub const PHASE_SCAN: &str = "scan";
/// Validate-phase failures: post-scan dependency rules.
pub const PHASE_VALIDATE: &str = "validate";

// ============================================================================
// ERROR CODES - bare discriminants for comparison
// ============================================================================

/// Type-safe failure classification that corresponds to `ErrorKind` variants.
/// Callers and tests compare against this instead of matching on error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The input token sequence was empty.
    NoArgs,
    /// A token resolved to no declared spec and no fallback could claim it.
    UnknownArg,
    /// A valued spec matched at the last input index with nothing after it.
    MissingValue,
    /// A spec's declared fixed position did not equal its actual input index.
    PositionMismatch,
    /// A required spec ended the scan unbound.
    MissingRequired,
    /// A forbidden spec ended the scan bound.
    ForbiddenPresent,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NoArgs => "NoArgs",
            ErrorCode::UnknownArg => "UnknownArg",
            ErrorCode::MissingValue => "MissingValue",
            ErrorCode::PositionMismatch => "PositionMismatch",
            ErrorCode::MissingRequired => "MissingRequired",
            ErrorCode::ForbiddenPresent => "ForbiddenPresent",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ERROR KINDS - what went wrong, with the data needed to say so
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("no arguments were supplied")]
    NoArgs,

    #[error("unknown argument '{token}'")]
    UnknownArg { token: String },

    #[error("'{name}' expects a value, but the input ended first")]
    MissingValue { name: String },

    #[error("'{token}' must occupy position {expected}, found at position {found}")]
    PositionMismatch {
        token: String,
        expected: usize,
        found: usize,
    },

    #[error("required argument '{name}' was never supplied")]
    MissingRequired { name: String },

    #[error("argument '{name}' must not be supplied")]
    ForbiddenPresent { name: String },
}

impl ErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoArgs => ErrorCode::NoArgs,
            Self::UnknownArg { .. } => ErrorCode::UnknownArg,
            Self::MissingValue { .. } => ErrorCode::MissingValue,
            Self::PositionMismatch { .. } => ErrorCode::PositionMismatch,
            Self::MissingRequired { .. } => ErrorCode::MissingRequired,
            Self::ForbiddenPresent { .. } => ErrorCode::ForbiddenPresent,
        }
    }

    /// Suffix used in diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::NoArgs => "no_args",
            Self::UnknownArg { .. } => "unknown_arg",
            Self::MissingValue { .. } => "missing_value",
            Self::PositionMismatch { .. } => "position_mismatch",
            Self::MissingRequired { .. } => "missing_required",
            Self::ForbiddenPresent { .. } => "forbidden_present",
        }
    }

    /// The offending token or spec name, for terse diagnostics.
    pub fn subject(&self) -> &str {
        match self {
            Self::NoArgs => "",
            Self::UnknownArg { token } => token,
            Self::MissingValue { name } => name,
            Self::PositionMismatch { token, .. } => token,
            Self::MissingRequired { name } => name,
            Self::ForbiddenPresent { name } => name,
        }
    }
}

// ============================================================================
// COMMAND LINE - the input rendered as diagnostic source text
// ============================================================================

/// The input tokens joined into a single line, with per-token byte offsets,
/// so failures can be labeled in place.
#[derive(Debug, Clone)]
pub struct CommandLine {
    line: String,
    offsets: Vec<usize>,
}

impl CommandLine {
    pub fn render(tokens: &[String]) -> Self {
        let mut line = String::new();
        let mut offsets = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            offsets.push(line.len());
            line.push_str(token);
        }
        Self { line, offsets }
    }

    /// Span covering the token at `index` within the rendered line.
    pub fn span_of(&self, index: usize) -> SourceSpan {
        match self.offsets.get(index) {
            Some(&start) => {
                let end = self
                    .offsets
                    .get(index + 1)
                    .map_or(self.line.len(), |&next| next - 1);
                (start..end).into()
            }
            None => unspanned(),
        }
    }

    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new("argv", self.line.clone()))
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }
}

/// Placeholder span for failures not tied to a single token, such as a
/// required argument that never appeared.
pub fn unspanned() -> SourceSpan {
    SourceSpan::from(0..0)
}

// ============================================================================
// MATCH ERROR - a failure plus everything needed to report it
// ============================================================================

/// Where in the input the failure was detected.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: &'static str,
}

/// Diagnostic enhancement data.
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

/// The single error type carried by a failed `ParseResult`.
#[derive(Debug, Clone)]
pub struct MatchError {
    pub kind: ErrorKind,
    pub source_info: SourceInfo,
    pub diagnostic_info: DiagnosticInfo,
}

impl MatchError {
    pub(crate) fn new(
        kind: ErrorKind,
        line: &CommandLine,
        span: SourceSpan,
        phase: &'static str,
    ) -> Self {
        let error_code = format!("clasp::{}::{}", phase, kind.code_suffix());
        let help = default_help(&kind);
        MatchError {
            kind,
            source_info: SourceInfo {
                source: line.to_named_source(),
                primary_span: span,
                phase,
            },
            diagnostic_info: DiagnosticInfo { help, error_code },
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// The offending token or spec name.
    pub fn subject(&self) -> &str {
        self.kind.subject()
    }

    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::NoArgs => "nothing to match".into(),
            ErrorKind::UnknownArg { .. } => "not declared".into(),
            ErrorKind::MissingValue { .. } => "expects a value after this".into(),
            ErrorKind::PositionMismatch { expected, .. } => {
                format!("belongs at position {}", expected)
            }
            ErrorKind::MissingRequired { .. } => "required argument missing".into(),
            ErrorKind::ForbiddenPresent { .. } => "bound here".into(),
        }
    }
}

fn default_help(kind: &ErrorKind) -> Option<String> {
    match kind {
        ErrorKind::UnknownArg { .. } => Some(
            "declare the argument, add a positional slot, or enable overflow capture".into(),
        ),
        ErrorKind::MissingValue { name } => Some(format!("supply a value after '{}'", name)),
        _ => None,
    }
}

impl std::error::Error for MatchError {}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Diagnostic for MatchError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.source_info.source.inner().is_empty() {
            return None;
        }
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

/// Prints a MatchError with full miette diagnostics.
///
/// Use this for user-facing error display in CLI contexts; library callers
/// usually inspect `ParseResult::error_code` instead.
pub fn print_error(error: MatchError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
