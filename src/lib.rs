//! Reads the variables of a LESS stylesheet as plain values.
//!
//! This crate bundles the two workspace crates:
//!
//! - [`lesstree`]: parsing, expression trees, evaluation and built-in functions
//! - [`lessvars`]: the extraction pass that turns declarations into values
//!
//! ```no_run
//! let vars = less_vars::import_less_file("styles/theme.less")?;
//! for (ident, value) in vars.iter() {
//!     println!("{ident} = {value:?}");
//! }
//! # Ok::<(), less_vars::Error>(())
//! ```

pub use lesstree;
pub use lessvars::*;

pub use lesstree::{FunctionRegistry, parse_file, parse_stylesheet};
