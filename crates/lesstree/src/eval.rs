//! Self-evaluation of expression nodes.
//!
//! [`Node::eval`] reduces a node as far as the context allows: variables are
//! replaced by their (evaluated) declarations, calls by their results and,
//! when math is on, operations by their arithmetic result.
//!
//! ## Math mode
//!
//! Whether an operation is computed depends on [`EvalFlags`]:
//!
//! - `math`: arithmetic is always performed
//! - `in_parens`: the node is evaluated as if wrapped in parentheses
//! - `out_of_parens`: parenthesized operations are *not* forced on
//!
//! Operations that stay unevaluated are returned with evaluated operands.

use crate::color::Color;
use crate::error::TreeError;
use crate::functions::FunctionRegistry;
use crate::node::{Call, Dimension, List, Node, Operation, Operator};

/// Named switches controlling how operations evaluate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalFlags {
    pub math: bool,
    pub in_parens: bool,
    pub out_of_parens: bool,
}

impl EvalFlags {
    /// Arithmetic enabled, evaluated as if inside parentheses.
    pub fn arithmetic() -> Self {
        Self {
            math: true,
            in_parens: true,
            out_of_parens: false,
        }
    }

    /// Returns `true` if an operation (`parenthesized` or not) should compute.
    pub fn is_math_on(&self, parenthesized: bool) -> bool {
        self.math || self.in_parens || (parenthesized && !self.out_of_parens)
    }
}

/// Variable lookup hook: resolves a variable name to its declared node.
pub trait Scope {
    fn lookup(&self, name: &str) -> Option<&Node>;
}

/// A scope with no variables.
pub struct EmptyScope;

impl Scope for EmptyScope {
    fn lookup(&self, _name: &str) -> Option<&Node> {
        None
    }
}

/// Everything a node needs to evaluate itself.
#[derive(Clone)]
pub struct EvalContext<'a> {
    pub flags: EvalFlags,
    functions: &'a FunctionRegistry,
    scope: &'a dyn Scope,
    evaluating: Vec<String>,
}

impl<'a> EvalContext<'a> {
    pub fn new(functions: &'a FunctionRegistry, scope: &'a dyn Scope) -> Self {
        Self {
            flags: EvalFlags::default(),
            functions,
            scope,
            evaluating: Vec::new(),
        }
    }

    pub fn with_flags(mut self, flags: EvalFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn functions(&self) -> &'a FunctionRegistry {
        self.functions
    }

    pub fn lookup(&self, name: &str) -> Option<&'a Node> {
        self.scope.lookup(name)
    }
}

impl Node {
    /// Evaluates this node under `ctx`, producing a new node.
    pub fn eval(&self, ctx: &EvalContext<'_>) -> Result<Node, TreeError> {
        match self {
            Node::Variable(name) => eval_variable(name, ctx),
            Node::Operation(op) => eval_operation(op, ctx),
            Node::Call(call) => eval_call(call, ctx),
            Node::List(list) => {
                let items = list
                    .items
                    .iter()
                    .map(|item| item.eval(ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::List(List::new(items, list.separator)))
            }
            _ => Ok(self.clone()),
        }
    }
}

fn eval_variable(name: &str, ctx: &EvalContext<'_>) -> Result<Node, TreeError> {
    if ctx.evaluating.iter().any(|n| n == name) {
        return Err(TreeError::RecursiveVariable(name.to_string()));
    }
    let declared = ctx
        .lookup(name)
        .ok_or_else(|| TreeError::UndefinedVariable(name.to_string()))?;

    let mut inner = ctx.clone();
    inner.evaluating.push(name.to_string());
    declared.eval(&inner)
}

fn eval_operation(op: &Operation, ctx: &EvalContext<'_>) -> Result<Node, TreeError> {
    let lhs = op.lhs.eval(ctx)?;
    let rhs = op.rhs.eval(ctx)?;

    if !ctx.flags.is_math_on(op.parens) {
        return Ok(Node::Operation(Operation {
            op: op.op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            parens: op.parens,
        }));
    }

    operate(op.op, &lhs, &rhs)
}

/// Performs `lhs op rhs` on already evaluated operands.
pub fn operate(op: Operator, lhs: &Node, rhs: &Node) -> Result<Node, TreeError> {
    match (lhs, rhs) {
        (Node::Dimension(a), Node::Dimension(b)) => {
            let unit = if a.unit.is_empty() {
                b.unit.clone()
            } else {
                a.unit.clone()
            };
            Ok(Node::Dimension(Dimension::new(op.apply(a.value, b.value), unit)))
        }
        (Node::Color(a), Node::Color(b)) => Ok(Node::Color(a.zip_channels(b.rgb, |x, y| op.apply(x, y)))),
        (Node::Color(a), Node::Dimension(b)) => Ok(Node::Color(color_by_number(a, op, b.value))),
        (Node::Dimension(a), Node::Color(b)) if matches!(op, Operator::Add | Operator::Mul) => {
            Ok(Node::Color(color_by_number(b, op, a.value)))
        }
        _ => Err(TreeError::IncompatibleOperands {
            op: op.symbol(),
            lhs: lhs.kind().to_string(),
            rhs: rhs.kind().to_string(),
        }),
    }
}

fn color_by_number(color: &Color, op: Operator, n: f64) -> Color {
    color.zip_channels([n; 3], |x, y| op.apply(x, y))
}

/// Evaluates the arguments of `call` under `ctx` and invokes the function.
pub fn eval_call(call: &Call, ctx: &EvalContext<'_>) -> Result<Node, TreeError> {
    let args = call
        .args
        .iter()
        .map(|arg| arg.eval(ctx))
        .collect::<Result<Vec<_>, _>>()?;
    log::trace!("calling {}() with {} argument(s)", call.name, args.len());
    ctx.functions().call(&call.name, &args)
}
