//! The variable extraction walk.

use lesstree::{Declaration, FunctionRegistry, Rule};

use crate::context::ResolutionContext;
use crate::error::{Error, Result};
use crate::options::{DegradedPolicy, Options};
use crate::output::Variables;
use crate::resolve::Resolver;
use crate::value::Resolved;

/// Walks a rule sequence and materializes every variable declaration.
///
/// Imports are entered depth-first as they are encountered, so a file's
/// variables land in the tables exactly where its `@import` sits. A
/// declaration only sees what was declared before it in that order.
///
/// # Example
///
/// ```
/// use lesstree::{parse_stylesheet, FunctionRegistry};
/// use lessvars::{Extractor, Value};
///
/// let sheet = parse_stylesheet("@gutter: 30px; @half: (@gutter / 2);").unwrap();
/// let registry = FunctionRegistry::with_builtins();
/// let vars = Extractor::new(&registry).import_vars(&sheet.rules).unwrap();
///
/// assert_eq!(vars.get_value("half"), Some(&Value::Number(15.0)));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Extractor<'r> {
    resolver: Resolver<'r>,
    options: Options,
}

impl<'r> Extractor<'r> {
    pub fn new(functions: &'r FunctionRegistry) -> Self {
        Self {
            resolver: Resolver::new(functions),
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Runs a pass over `rules`, returning the variable and node tables.
    pub fn extract(&self, rules: &[Rule]) -> Result<ResolutionContext> {
        let mut ctx = ResolutionContext::new();
        self.extract_into(rules, &mut ctx)?;
        Ok(ctx)
    }

    /// Continues a pass, adding `rules` to an existing context.
    pub fn extract_into(&self, rules: &[Rule], ctx: &mut ResolutionContext) -> Result<()> {
        for rule in rules {
            match rule {
                Rule::Import(import) => {
                    log::trace!("entering import {}", import.filename);
                    self.extract_into(&import.root.rules, ctx)?;
                }
                Rule::Declaration(decl) if decl.variable => self.declare(decl, ctx)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Runs a pass and builds the host-identifier mapping.
    pub fn import_vars(&self, rules: &[Rule]) -> Result<Variables> {
        let ctx = self.extract(rules)?;
        Ok(Variables::from_context(&ctx))
    }

    fn declare(&self, decl: &Declaration, ctx: &mut ResolutionContext) -> Result<()> {
        let resolved = self.resolver.resolve_value(&decl.value, ctx)?;
        self.check_degraded(&decl.name, &resolved)?;

        log::debug!("{} = {:?}", decl.name, resolved);
        ctx.declare(decl.name.clone(), resolved, decl.value.clone());
        Ok(())
    }

    fn check_degraded(&self, name: &str, resolved: &Resolved) -> Result<()> {
        let error = match resolved {
            Resolved::Value(_) => return Ok(()),
            Resolved::Unresolved(reference) => Error::UnresolvedReference {
                variable: name.to_string(),
                reference: reference.clone(),
            },
            Resolved::Unsupported(node) => Error::UnsupportedNode {
                variable: name.to_string(),
                node: node.clone(),
            },
        };

        match self.options.degraded {
            DegradedPolicy::Keep => Ok(()),
            DegradedPolicy::Warn => {
                log::warn!("{}", error);
                Ok(())
            }
            DegradedPolicy::Fail => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesstree::{Import, Node, Stylesheet};

    fn declaration(name: &str, value: Node) -> Rule {
        Rule::Declaration(Declaration::variable(name, value))
    }

    #[test]
    fn test_import_is_walked_in_place() {
        let registry = FunctionRegistry::with_builtins();
        let rules = vec![
            declaration("@a", Node::number(1.0)),
            Rule::Import(Import {
                filename: "sub.less".into(),
                root: Stylesheet::new(vec![declaration("@b", Node::Variable("@a".into()))]),
            }),
            declaration("@c", Node::Variable("@b".into())),
        ];

        let ctx = Extractor::new(&registry).extract(&rules).unwrap();
        let names: Vec<&str> = ctx.values().map(|(name, _)| name).collect();
        assert_eq!(names, ["@a", "@b", "@c"]);
        assert_eq!(ctx.value("@c"), Some(&Resolved::from(1.0)));
    }

    #[test]
    fn test_non_variable_rules_are_ignored() {
        let registry = FunctionRegistry::with_builtins();
        let rules = vec![
            Rule::Other(".a { color: red; }".into()),
            Rule::Declaration(Declaration {
                name: "color".into(),
                value: Node::Keyword("red".into()),
                variable: false,
            }),
        ];
        assert!(Extractor::new(&registry).extract(&rules).unwrap().is_empty());
    }

    #[test]
    fn test_degraded_policies() {
        let registry = FunctionRegistry::with_builtins();
        let rules = vec![declaration("@a", Node::Variable("@b".into()))];

        let kept = Extractor::new(&registry).extract(&rules).unwrap();
        assert_eq!(kept.value("@a"), Some(&Resolved::Unresolved("@b".into())));

        let warned = Extractor::new(&registry)
            .with_options(Options::new().on_degraded(DegradedPolicy::Warn))
            .extract(&rules)
            .unwrap();
        assert_eq!(warned.len(), 1);

        let failed = Extractor::new(&registry)
            .with_options(Options::new().on_degraded(DegradedPolicy::Fail))
            .extract(&rules);
        assert!(matches!(
            failed,
            Err(Error::UnresolvedReference { variable, reference }) if variable == "@a" && reference == "@b"
        ));
    }
}
