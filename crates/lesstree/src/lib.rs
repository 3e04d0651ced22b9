//! # lesstree - LESS expression trees
//!
//! The parsed form of a LESS stylesheet, as consumed by variable extraction.
//! This crate provides:
//!
//! - **Tree**: [`Rule`]s and expression [`Node`]s
//! - **Evaluation**: [`Node::eval`] under an [`EvalContext`] (math flags,
//!   function registry, variable lookup hook)
//! - **Functions**: a pluggable [`FunctionRegistry`] with the common LESS built-ins
//! - **Colors**: [`Color`] parsing, HSL manipulation and rendering
//! - **Parsing**: declarations, imports and value expressions from LESS source
//!
//! ## Quick Start
//!
//! ```rust
//! use lesstree::{parse_stylesheet, Node, Rule};
//!
//! let source = r#"
//!     @font-size: 19px;
//!     @brand: #d9534f;
//!
//!     .button {
//!         color: @brand;
//!     }
//! "#;
//!
//! let stylesheet = parse_stylesheet(source).expect("valid LESS");
//! assert_eq!(stylesheet.rules.len(), 3);
//!
//! let Rule::Declaration(decl) = &stylesheet.rules[0] else { panic!() };
//! assert_eq!(decl.name, "@font-size");
//! assert_eq!(decl.value, Node::dimension(19.0, "px"));
//! ```
//!
//! ## Not Yet Implemented
//!
//! - Mixins, guards and nested rulesets are kept as opaque [`Rule::Other`] text
//! - Variable interpolation (`@{name}`) and variable variables (`@@name`)
//!
//! ## Modules
//!
//! - [`node`]: Tree data structures
//! - [`eval`]: Node self-evaluation
//! - [`functions`]: Function registry and built-ins
//! - [`color`]: Color type
//! - [`parser`]: LESS parsing and import loading
//! - [`error`]: Error types

pub mod color;
pub mod error;
pub mod eval;
pub mod functions;
pub mod node;
pub mod parser;

pub use color::Color;
pub use error::TreeError;
pub use eval::{EmptyScope, EvalContext, EvalFlags, Scope};
pub use functions::FunctionRegistry;
pub use node::{
    Call, Declaration, Dimension, Import, List, Node, Operation, Operator, Quoted, Rule,
    Separator, Stylesheet, Unit,
};
pub use parser::{
    FsLoader, ImportLoader, MemoryLoader, NoImports, parse_file, parse_stylesheet,
    parse_stylesheet_with, parse_value,
};
