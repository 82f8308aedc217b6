//! Clasp - Declarative Command-Line Argument Matching
//!
//! Declare the arguments a program expects (flags, valued options, positional
//! slots), hand the matcher a token sequence, and query the bound result.
//! Values stay raw text; coercion is the caller's business.
//!
//! ```
//! use clasp::{ArgRegistry, ArgSpec, Matcher};
//!
//! let registry = ArgRegistry::new()
//!     .declare(ArgSpec::flag("--help"))
//!     .declare(ArgSpec::valued("--say").alias("-s"));
//!
//! let result = Matcher::new(&registry).parse(["-s", "hi"]);
//! assert!(result.is_ok());
//! assert_eq!(result.value_of("--say"), "hi");
//! assert!(!result.is_set("--help"));
//! ```

pub use crate::errors::{ErrorCode, ErrorKind, MatchError};
pub use crate::logging::LogSink;
pub use crate::matcher::Matcher;
pub use crate::registry::{ArgKind, ArgRegistry, ArgSpec, Priority};
pub use crate::result::{BoundArg, ParseResult};

pub mod errors;
pub mod logging;
pub mod matcher;
pub mod registry;
pub mod result;
