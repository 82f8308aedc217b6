//! The matching algorithm.
//!
//! A `Matcher` borrows a registry and consumes a token sequence in a single
//! left-to-right scan, binding tokens to declared slots, then validates the
//! cross-argument dependency rules. All per-parse state lives in a local
//! `BindingTable` keyed by spec index; the registry is never mutated, so one
//! registry can serve concurrent parses without locking.
//!
//! Failures come back as data inside the `ParseResult`, never as panics or
//! early `Err` returns, and the result always carries the full bound state
//! at the moment of failure.

use crate::errors::{unspanned, CommandLine, ErrorKind, MatchError, PHASE_SCAN, PHASE_VALIDATE};
use crate::logging::LogSink;
use crate::registry::{ArgKind, ArgRegistry, Priority};
use crate::result::{BoundArg, ParseResult};

// ============================================================================
// BINDING TABLE - per-parse state, keyed by spec index
// ============================================================================

#[derive(Debug, Clone, Default)]
struct Binding {
    present: bool,
    value: String,
    /// Input index of the token that bound this spec, for diagnostics.
    site: Option<usize>,
}

#[derive(Debug)]
struct BindingTable {
    slots: Vec<Binding>,
}

impl BindingTable {
    fn new(len: usize) -> Self {
        Self {
            slots: vec![Binding::default(); len],
        }
    }

    fn mark_present(&mut self, index: usize, site: usize) {
        let slot = &mut self.slots[index];
        slot.present = true;
        slot.site = Some(site);
    }

    fn bind_value(&mut self, index: usize, value: String, site: usize) {
        let slot = &mut self.slots[index];
        slot.present = true;
        slot.value = value;
        slot.site = Some(site);
    }

    /// First positional spec, in declaration order, whose slot is still empty.
    fn next_open_positional(&self, registry: &ArgRegistry) -> Option<usize> {
        registry.specs().iter().enumerate().find_map(|(index, spec)| {
            (spec.kind == ArgKind::Positional && self.slots[index].value.is_empty())
                .then_some(index)
        })
    }

    /// Bound for dependency purposes: flags by presence, everything else by
    /// a non-empty value.
    fn is_bound(&self, index: usize, kind: ArgKind) -> bool {
        match kind {
            ArgKind::Flag => self.slots[index].present,
            ArgKind::Valued | ArgKind::Positional => !self.slots[index].value.is_empty(),
        }
    }

    fn site(&self, index: usize) -> Option<usize> {
        self.slots[index].site
    }
}

// ============================================================================
// MATCHER
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Matcher<'r> {
    registry: &'r ArgRegistry,
    log: Option<&'r LogSink>,
}

impl<'r> Matcher<'r> {
    pub fn new(registry: &'r ArgRegistry) -> Self {
        Self {
            registry,
            log: None,
        }
    }

    /// Attaches a log sink; the matcher narrates its bindings into it.
    pub fn with_log(mut self, sink: &'r LogSink) -> Self {
        self.log = Some(sink);
        self
    }

    /// Parses the process argument vector, minus the program name. An argv
    /// holding only the program name reports `NoArgs`.
    pub fn parse_env(&self) -> ParseResult {
        self.parse(std::env::args().skip(1))
    }

    /// Matches a token sequence against the registry. Pure: identical inputs
    /// yield identical results, and nothing persists between calls.
    pub fn parse<I>(&self, tokens: I) -> ParseResult
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let line = CommandLine::render(&tokens);
        let mut table = BindingTable::new(self.registry.len());
        self.notify(|| format!("parse: {} token(s)", tokens.len()));

        if tokens.is_empty() {
            let error = MatchError::new(ErrorKind::NoArgs, &line, unspanned(), PHASE_SCAN);
            return self.finish(table, None, Some(error));
        }

        let mut bin: Option<Vec<String>> = None;
        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];

            // Resolution by name/alias and fallback to a positional slot are
            // separate, non-overlapping attempts; a declared alias wins.
            let index = match self.registry.resolve(token) {
                Some(index) => index,
                None => match table.next_open_positional(self.registry) {
                    Some(index) => index,
                    None if self.registry.overflow_enabled() => {
                        bin = Some(tokens[i..].to_vec());
                        self.notify(|| format!("bin: captured {} token(s)", tokens.len() - i));
                        break;
                    }
                    None => {
                        let error = MatchError::new(
                            ErrorKind::UnknownArg {
                                token: token.clone(),
                            },
                            &line,
                            line.span_of(i),
                            PHASE_SCAN,
                        );
                        return self.finish(table, bin, Some(error));
                    }
                },
            };

            let spec = &self.registry.specs()[index];
            if let Some(expected) = spec.fixed_position {
                if expected != i {
                    let error = MatchError::new(
                        ErrorKind::PositionMismatch {
                            token: token.clone(),
                            expected,
                            found: i,
                        },
                        &line,
                        line.span_of(i),
                        PHASE_SCAN,
                    );
                    return self.finish(table, bin, Some(error));
                }
            }

            // Rebinding an already-bound spec overwrites: last occurrence wins.
            match spec.kind {
                ArgKind::Valued => match tokens.get(i + 1) {
                    Some(value) => {
                        self.notify(|| format!("bind: {} = {:?}", spec.name, value));
                        table.bind_value(index, value.clone(), i);
                        i += 2;
                    }
                    None => {
                        let error = MatchError::new(
                            ErrorKind::MissingValue {
                                name: spec.name.clone(),
                            },
                            &line,
                            line.span_of(i),
                            PHASE_SCAN,
                        );
                        return self.finish(table, bin, Some(error));
                    }
                },
                ArgKind::Flag => {
                    self.notify(|| format!("bind: {}", spec.name));
                    table.mark_present(index, i);
                    i += 1;
                }
                // Explicitly matched positionals consume the current token
                // itself as their value; fallback claims bind the unresolved
                // token the same way.
                ArgKind::Positional => {
                    self.notify(|| format!("bind: {} = {:?}", spec.name, token));
                    table.bind_value(index, token.clone(), i);
                    i += 1;
                }
            }
        }

        let error = self.validate(&table, &line);
        self.finish(table, bin, error)
    }

    /// Post-scan dependency validation. The required pass runs to completion
    /// before the forbidden pass, so a required violation always takes
    /// precedence; within a pass the first violation in declaration order
    /// wins.
    fn validate(&self, table: &BindingTable, line: &CommandLine) -> Option<MatchError> {
        for (index, spec) in self.registry.specs().iter().enumerate() {
            if spec.priority == Priority::Required && !table.is_bound(index, spec.kind) {
                return Some(MatchError::new(
                    ErrorKind::MissingRequired {
                        name: spec.name.clone(),
                    },
                    line,
                    unspanned(),
                    PHASE_VALIDATE,
                ));
            }
        }
        for (index, spec) in self.registry.specs().iter().enumerate() {
            if spec.priority == Priority::Forbidden && table.is_bound(index, spec.kind) {
                let span = table
                    .site(index)
                    .map_or_else(unspanned, |site| line.span_of(site));
                return Some(MatchError::new(
                    ErrorKind::ForbiddenPresent {
                        name: spec.name.clone(),
                    },
                    line,
                    span,
                    PHASE_VALIDATE,
                ));
            }
        }
        None
    }

    /// Snapshots the binding table into a caller-owned result. The snapshot
    /// happens on every exit path, so a failed result still exposes the
    /// bound state at failure.
    fn finish(
        &self,
        table: BindingTable,
        bin: Option<Vec<String>>,
        error: Option<MatchError>,
    ) -> ParseResult {
        match &error {
            Some(err) => self.notify(|| {
                format!("fail: {} '{}'", err.diagnostic_info.error_code, err.subject())
            }),
            None => self.notify(|| "ok".to_string()),
        }
        let args = self
            .registry
            .specs()
            .iter()
            .zip(table.slots)
            .map(|(spec, binding)| BoundArg {
                spec: spec.clone(),
                present: binding.present,
                value: binding.value,
            })
            .collect();
        ParseResult::new(args, bin, error)
    }

    fn notify<F: FnOnce() -> String>(&self, line: F) {
        if let Some(sink) = self.log {
            sink.append(&line());
        }
    }
}
