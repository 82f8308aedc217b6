//! Argument declarations.
//!
//! An `ArgRegistry` is the ordered list of `ArgSpec`s a caller expects,
//! built once and reused across parses. It is pure data with alias lookup:
//! all binding state lives in the matcher's per-parse table, so a registry
//! shared between threads needs no locking.
//!
//! Registry Invariant: every spec name must be distinct from every other
//! spec's name and every alias in the same registry. This is a construction
//! contract, not a runtime check; `resolve` simply returns the first match
//! in declaration order.

use serde::{Deserialize, Serialize};

/// How a declared argument binds to input tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgKind {
    /// Carries no value; its presence is the signal.
    Flag,
    /// Consumes exactly one following token as its value.
    Valued,
    /// Claims an unresolved token (first-declared, first-unclaimed order),
    /// or binds its own name when matched explicitly.
    Positional,
}

/// Post-scan dependency rule attached to a spec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// No constraint.
    #[default]
    Optional,
    /// Must end the scan bound, else the parse fails.
    Required,
    /// Must end the scan unbound, else the parse fails.
    Forbidden,
}

/// A single declared argument: identity, aliases, kind, and constraints.
///
/// Specs are immutable once declared. Construct with one of the kind
/// constructors and chain the builder methods:
///
/// ```
/// use clasp::{ArgSpec, Priority};
///
/// let spec = ArgSpec::valued("--say").alias("-s");
/// let cmd = ArgSpec::positional("cmd").required().at_position(0);
/// assert_eq!(cmd.priority, Priority::Required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSpec {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub kind: ArgKind,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub fixed_position: Option<usize>,
}

impl ArgSpec {
    fn new(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            kind,
            priority: Priority::Optional,
            fixed_position: None,
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, ArgKind::Flag)
    }

    pub fn valued(name: impl Into<String>) -> Self {
        Self::new(name, ArgKind::Valued)
    }

    pub fn positional(name: impl Into<String>) -> Self {
        Self::new(name, ArgKind::Positional)
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I>(mut self, aliases: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn required(self) -> Self {
        self.priority(Priority::Required)
    }

    pub fn forbidden(self) -> Self {
        self.priority(Priority::Forbidden)
    }

    /// Pins the spec's matched token to an exact zero-based input index.
    pub fn at_position(mut self, index: usize) -> Self {
        self.fixed_position = Some(index);
        self
    }

    /// Exact, case-sensitive match against the name or any alias.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }
}

/// The ordered set of declared specs, plus the overflow-capture switch.
#[derive(Debug, Clone, Default)]
pub struct ArgRegistry {
    specs: Vec<ArgSpec>,
    capture_overflow: bool,
}

impl ArgRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a spec. Returns self for builder chaining.
    pub fn declare(mut self, spec: ArgSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Once no declared spec can claim a token, collect it and everything
    /// after it into the result's bin bucket instead of failing.
    pub fn capture_overflow(mut self) -> Self {
        self.capture_overflow = true;
        self
    }

    pub fn overflow_enabled(&self) -> bool {
        self.capture_overflow
    }

    /// Resolves a token to a spec index by name or alias. Linear scan,
    /// declaration order, exact string equality.
    pub fn resolve(&self, token: &str) -> Option<usize> {
        self.specs.iter().position(|spec| spec.matches(token))
    }

    pub fn specs(&self) -> &[ArgSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
