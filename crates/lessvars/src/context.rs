//! The per-pass resolution context.

use std::collections::HashMap;

use indexmap::IndexMap;
use lesstree::{Node, Scope};

use crate::value::Resolved;

/// The two tables an extraction pass accumulates.
///
/// - the variable table: raw name → resolved value, in first-declaration order
/// - the node table: raw name → raw declaration value node
///
/// A redeclared name overwrites both entries. The node table doubles as the
/// variable-lookup hook for node evaluation.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    values: IndexMap<String, Resolved>,
    nodes: HashMap<String, Node>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a declaration in both tables.
    pub fn declare(&mut self, name: impl Into<String>, resolved: Resolved, node: Node) {
        let name = name.into();
        self.nodes.insert(name.clone(), node);
        self.values.insert(name, resolved);
    }

    /// The resolved value of `name`, if it has been declared.
    pub fn value(&self, name: &str) -> Option<&Resolved> {
        self.values.get(name)
    }

    /// The raw node `name` was declared with.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Resolved values in first-declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Resolved)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Scope for ResolutionContext {
    fn lookup(&self, name: &str) -> Option<&Node> {
        self.node(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redeclaration_overwrites_in_place() {
        let mut ctx = ResolutionContext::new();
        ctx.declare("@a", Resolved::from(1.0), Node::number(1.0));
        ctx.declare("@b", Resolved::from(2.0), Node::number(2.0));
        ctx.declare("@a", Resolved::from(3.0), Node::number(3.0));

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.value("@a"), Some(&Resolved::from(3.0)));
        assert_eq!(ctx.lookup("@a"), Some(&Node::number(3.0)));

        let order: Vec<&str> = ctx.values().map(|(name, _)| name).collect();
        assert_eq!(order, ["@a", "@b"]);
    }
}
