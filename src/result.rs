//! The parse result and its query surface.
//!
//! A `ParseResult` is an independent snapshot of every declared spec's final
//! binding, so it stays valid across the registry's later parses. Queries
//! accept a spec's name or any of its aliases and never panic: a miss is
//! `false` or the empty string.

use serde::Serialize;

use crate::errors::{ErrorCode, MatchError};
use crate::registry::{ArgKind, ArgSpec};

/// One declared spec together with its final binding state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundArg {
    pub spec: ArgSpec,
    pub present: bool,
    pub value: String,
}

impl BoundArg {
    /// Bound in the dependency-rule sense: flags by presence, everything
    /// else by a non-empty value.
    pub fn is_bound(&self) -> bool {
        match self.spec.kind {
            ArgKind::Flag => self.present,
            ArgKind::Valued | ArgKind::Positional => !self.value.is_empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParseResult {
    args: Vec<BoundArg>,
    bin: Option<Vec<String>>,
    error: Option<MatchError>,
}

impl ParseResult {
    pub(crate) fn new(
        args: Vec<BoundArg>,
        bin: Option<Vec<String>>,
        error: Option<MatchError>,
    ) -> Self {
        Self { args, bin, error }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&MatchError> {
        self.error.as_ref()
    }

    /// Bare failure discriminant, for comparison. `None` on success.
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error.as_ref().map(MatchError::code)
    }

    /// The offending token or spec name. `None` on success.
    pub fn diagnostic(&self) -> Option<&str> {
        self.error.as_ref().map(MatchError::subject)
    }

    /// Presence lookup for flag specs. Anything else, including a name that
    /// was never declared, is `false`.
    pub fn is_set(&self, name: &str) -> bool {
        self.lookup(name)
            .map(|arg| arg.spec.kind == ArgKind::Flag && arg.present)
            .unwrap_or(false)
    }

    /// Value lookup for valued and positional specs. Absent values and
    /// undeclared names are the empty string.
    pub fn value_of(&self, name: &str) -> &str {
        self.lookup(name)
            .filter(|arg| arg.spec.kind != ArgKind::Flag)
            .map(|arg| arg.value.as_str())
            .unwrap_or("")
    }

    /// Whether the named spec ended the parse with a non-empty value.
    pub fn has_value(&self, name: &str) -> bool {
        !self.value_of(name).is_empty()
    }

    /// The overflow bucket. Empty unless the registry enabled capture and
    /// the scan overflowed.
    pub fn bin(&self) -> &[String] {
        self.bin.as_deref().unwrap_or(&[])
    }

    /// The full snapshot, in declaration order.
    pub fn args(&self) -> &[BoundArg] {
        &self.args
    }

    fn lookup(&self, name: &str) -> Option<&BoundArg> {
        self.args.iter().find(|arg| arg.spec.matches(name))
    }
}
