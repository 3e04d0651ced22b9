//! Expression resolution.
//!
//! [`Resolver::resolve_value`] handles list-shaped values and defers
//! everything else to [`Resolver::resolve_leaf`], which dispatches on the
//! node kind:
//!
//! | node | resolves to |
//! |---|---|
//! | variable | the variable table entry, or [`Resolved::Unresolved`] |
//! | color | its CSS text |
//! | operation | its arithmetic result, resolved again |
//! | call | the function result, resolved again |
//! | opaque | [`Resolved::Unsupported`] |
//! | keyword | its text |
//! | dimension | see [`normalize_dimension`] |
//! | quoted | its text, re-quoted when it contains a space |

use lesstree::{EvalContext, EvalFlags, FunctionRegistry, List, Node, Quoted, Separator};

use crate::context::ResolutionContext;
use crate::error::Result;
use crate::format::{join, normalize_dimension};
use crate::value::{Resolved, Value};

/// Resolves expression nodes against a [`ResolutionContext`].
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'r> {
    functions: &'r FunctionRegistry,
}

impl<'r> Resolver<'r> {
    pub fn new(functions: &'r FunctionRegistry) -> Self {
        Self { functions }
    }

    /// Resolves a possibly list-shaped value.
    ///
    /// A comma list's items are resolved as whole nodes. A space list of two
    /// or more terms contributes each term's bare value instead: a dimension
    /// gives its magnitude whatever the unit, a quoted string its unquoted
    /// text. Nested lists are flattened into the outer one. A single element
    /// is returned as is, more are joined.
    pub fn resolve_value(&self, node: &Node, ctx: &ResolutionContext) -> Result<Resolved> {
        match node {
            Node::List(list) if !list.items.is_empty() => {
                let mut elements = self.resolve_elements(list, ctx)?;
                if elements.len() == 1 {
                    return Ok(elements.remove(0));
                }
                let degraded = elements.iter().filter(|e| e.is_degraded()).count();
                if degraded > 0 {
                    log::debug!("joining `{}` with {} degraded element(s)", node, degraded);
                }
                Ok(Resolved::Value(join(&elements)))
            }
            _ => self.resolve_leaf(node, ctx),
        }
    }

    fn resolve_elements(&self, list: &List, ctx: &ResolutionContext) -> Result<Vec<Resolved>> {
        let bare_terms = list.separator == Separator::Space && list.items.len() > 1;
        let mut elements = Vec::with_capacity(list.items.len());
        for item in &list.items {
            match item {
                Node::List(nested) => elements.extend(self.resolve_elements(nested, ctx)?),
                other if bare_terms => elements.push(self.resolve_term(other, ctx)?),
                other => elements.push(self.resolve_value(other, ctx)?),
            }
        }
        Ok(elements)
    }

    /// Resolves one term of a space list to its bare value.
    fn resolve_term(&self, node: &Node, ctx: &ResolutionContext) -> Result<Resolved> {
        let resolved = match node {
            Node::Dimension(dim) => Resolved::from(dim.value),
            Node::Quoted(quoted) => Resolved::from(quoted.value.as_str()),
            Node::Keyword(text) => Resolved::from(text.as_str()),
            Node::Color(color) => Resolved::from(color.to_css()),
            other => self.resolve_value(other, ctx)?,
        };
        Ok(resolved)
    }

    /// Resolves a single node.
    pub fn resolve_leaf(&self, node: &Node, ctx: &ResolutionContext) -> Result<Resolved> {
        let resolved = match node {
            Node::Variable(name) => match ctx.value(name) {
                Some(resolved) => resolved.clone(),
                None => {
                    log::trace!("{} has no value yet", name);
                    Resolved::Unresolved(name.clone())
                }
            },
            Node::Color(color) => Resolved::from(color.to_css()),
            Node::Operation(_) => {
                let eval_ctx = EvalContext::new(self.functions, ctx).with_flags(EvalFlags::arithmetic());
                let result = node.eval(&eval_ctx)?;
                log::trace!("`{}` evaluated to `{}`", node, result);
                self.resolve_value(&result, ctx)?
            }
            Node::Call(_) => {
                // Arguments see the raw declaration nodes, so they re-evaluate
                // with math on instead of reusing already resolved values.
                let eval_ctx = EvalContext::new(self.functions, ctx).with_flags(EvalFlags {
                    math: true,
                    ..EvalFlags::default()
                });
                let result = node.eval(&eval_ctx)?;
                log::trace!("`{}` returned `{}`", node, result);
                self.resolve_value(&result, ctx)?
            }
            Node::Opaque(_) => Resolved::Unsupported(node.clone()),
            Node::Keyword(text) => Resolved::from(text.as_str()),
            Node::Dimension(dim) => Resolved::Value(normalize_dimension(dim)),
            Node::Quoted(quoted) => Resolved::Value(quoted_text(quoted)),
            Node::List(list) if list.items.is_empty() => Resolved::from(""),
            Node::List(_) => self.resolve_value(node, ctx)?,
        };
        Ok(resolved)
    }
}

fn quoted_text(quoted: &Quoted) -> Value {
    match quoted.quote {
        Some(quote) if quoted.value.contains(' ') => Value::String(format!("{quote}{}{quote}", quoted.value)),
        _ => Value::String(quoted.value.clone()),
    }
}
