//! # lessvars - LESS variables as plain values
//!
//! Walks a parsed LESS stylesheet, follows its imports, and evaluates every
//! variable declaration into a number or a string keyed by a camelCase
//! identifier.
//!
//! ## Quick Start
//!
//! ```rust
//! use lesstree::parse_stylesheet;
//! use lessvars::{import_less_vars, Value};
//!
//! let sheet = parse_stylesheet(r#"
//!     @font-size: 19px;
//!     @brand: #d9534f;
//!     @padding: 10px 20px;
//!     @stack: 'Helvetica Neue', Arial;
//! "#).unwrap();
//!
//! let vars = import_less_vars(&sheet.rules).unwrap();
//! assert_eq!(vars.get_value("fontSize"), Some(&Value::Number(19.0)));
//! assert_eq!(vars.get_value("brand"), Some(&Value::from("#d9534f")));
//! assert_eq!(vars.get_value("padding"), Some(&Value::from("10px 20px")));
//! assert_eq!(vars.get_value("stack"), Some(&Value::from("'Helvetica Neue', Arial")));
//! ```
//!
//! ## How values come out
//!
//! - `px` and unitless numbers become numbers, percentages become `"N%"`
//! - colors render as written, or as `#rrggbb` / `rgba(...)` once computed
//! - operations and function calls are evaluated first
//! - lists are joined into one string, space-list terms by their bare value
//! - a reference to a variable declared later stays
//!   [`Resolved::Unresolved`], see [`DegradedPolicy`]
//!
//! ## Modules
//!
//! - [`extract`]: The declaration walk
//! - [`resolve`]: Expression resolution
//! - [`format`]: Unit normalization and list joining
//! - [`names`]: Identifier conversion
//! - [`context`]: Per-pass tables
//! - [`output`]: The resulting mapping

pub mod context;
pub mod error;
pub mod extract;
pub mod format;
pub mod names;
pub mod options;
pub mod output;
pub mod resolve;
pub mod value;

use std::path::Path;

use lesstree::{FunctionRegistry, Rule};

pub use context::ResolutionContext;
pub use error::{Error, Result};
pub use extract::Extractor;
pub use names::to_host_identifier;
pub use options::{DegradedPolicy, Options};
pub use output::Variables;
pub use resolve::Resolver;
pub use value::{Resolved, Value};

/// Extracts `rules` with the built-in functions and default options.
pub fn import_less_vars(rules: &[Rule]) -> Result<Variables> {
    let registry = FunctionRegistry::with_builtins();
    Extractor::new(&registry).import_vars(rules)
}

/// Parses the file at `path`, loading its imports from disk, and extracts it.
pub fn import_less_file(path: impl AsRef<Path>) -> Result<Variables> {
    let sheet = lesstree::parse_file(path)?;
    import_less_vars(&sheet.rules)
}
