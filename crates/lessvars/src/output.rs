//! The host-identifier mapping an extraction pass produces.

use indexmap::IndexMap;

use crate::context::ResolutionContext;
use crate::error::{Error, Result};
use crate::names::to_host_identifier;
use crate::value::{Resolved, Value};

/// Resolved variables keyed by host identifier, in first-declaration order.
///
/// Two raw names can collapse to the same identifier (`@a-b` and `@aB`);
/// the later declaration wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Variables {
    entries: IndexMap<String, Resolved>,
}

impl Variables {
    /// Builds the mapping from a finished pass.
    pub fn from_context(ctx: &ResolutionContext) -> Self {
        let mut entries = IndexMap::with_capacity(ctx.len());
        for (name, resolved) in ctx.values() {
            entries.insert(to_host_identifier(name), resolved.clone());
        }
        Self { entries }
    }

    pub fn get(&self, ident: &str) -> Option<&Resolved> {
        self.entries.get(ident)
    }

    /// The native value for `ident`, skipping degraded outcomes.
    pub fn get_value(&self, ident: &str) -> Option<&Value> {
        self.get(ident).and_then(Resolved::value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resolved)> {
        self.entries.iter().map(|(ident, resolved)| (ident.as_str(), resolved))
    }

    /// Converts into plain values, failing on the first degraded entry.
    pub fn into_values(self) -> Result<IndexMap<String, Value>> {
        self.entries
            .into_iter()
            .map(|(ident, resolved)| match resolved {
                Resolved::Value(value) => Ok((ident, value)),
                Resolved::Unresolved(reference) => Err(Error::UnresolvedReference {
                    variable: ident,
                    reference,
                }),
                Resolved::Unsupported(node) => Err(Error::UnsupportedNode { variable: ident, node }),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Variables {
    type Item = (&'a String, &'a Resolved);
    type IntoIter = indexmap::map::Iter<'a, String, Resolved>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesstree::Node;

    #[test]
    fn test_identifiers_and_collisions() {
        let mut ctx = ResolutionContext::new();
        ctx.declare("@font-size", Resolved::from(19.0), Node::number(19.0));
        ctx.declare("@a-b", Resolved::from(1.0), Node::number(1.0));
        ctx.declare("@aB", Resolved::from(2.0), Node::number(2.0));

        let vars = Variables::from_context(&ctx);
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get_value("fontSize"), Some(&Value::Number(19.0)));
        assert_eq!(vars.get_value("aB"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_into_values_rejects_degraded() {
        let mut ctx = ResolutionContext::new();
        ctx.declare("@ok", Resolved::from("x"), Node::Keyword("x".into()));
        let values = Variables::from_context(&ctx).into_values().unwrap();
        assert_eq!(values["ok"], Value::from("x"));

        ctx.declare("@later", Resolved::Unresolved("@missing".into()), Node::Variable("@missing".into()));
        let err = Variables::from_context(&ctx).into_values().unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference { variable, .. } if variable == "later"));
    }
}
