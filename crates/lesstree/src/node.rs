//! Expression and rule nodes of a parsed LESS stylesheet.
//!
//! A stylesheet is a sequence of [`Rule`]s. Variable declarations carry an
//! expression tree made of [`Node`]s:
//!
//! ```less
//! @base: 10px;
//! @gutter: @base * 2;                  // Operation(Variable, Dimension)
//! @brand: lighten(#d9534f, 10%);       // Call(Color, Dimension)
//! @font: "Helvetica Neue", Arial;      // List(Quoted, Keyword)
//! ```

use std::fmt;

use crate::color::Color;

/// One node of a value expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Reference to another variable, name includes the `@` sigil.
    Variable(String),
    Color(Color),
    Operation(Operation),
    Call(Call),
    Dimension(Dimension),
    Quoted(Quoted),
    /// Bare identifier or anonymous text such as `bold` or `inherit`.
    Keyword(String),
    List(List),
    /// Something without a value, e.g. a detached ruleset. Holds the source text.
    Opaque(String),
}

impl Node {
    /// Short kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Variable(_) => "variable",
            Node::Color(_) => "color",
            Node::Operation(_) => "operation",
            Node::Call(_) => "call",
            Node::Dimension(_) => "dimension",
            Node::Quoted(_) => "string",
            Node::Keyword(_) => "keyword",
            Node::List(_) => "list",
            Node::Opaque(_) => "opaque node",
        }
    }

    pub fn number(value: f64) -> Self {
        Node::Dimension(Dimension::new(value, Unit::none()))
    }

    pub fn dimension(value: f64, unit: &str) -> Self {
        Node::Dimension(Dimension::new(value, Unit::simple(unit)))
    }
}

/// Arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    pub op: Operator,
    pub lhs: Box<Node>,
    pub rhs: Box<Node>,
    /// The operation was written inside parentheses.
    pub parens: bool,
}

impl Operation {
    pub fn new(op: Operator, lhs: Node, rhs: Node) -> Self {
        Self {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            parens: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Node>,
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Unit descriptor of a dimension: `px` is `[px]/[]`, `px/s` is `[px]/[s]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Unit {
    pub numerator: Vec<String>,
    pub denominator: Vec<String>,
}

impl Unit {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn simple(unit: &str) -> Self {
        if unit.is_empty() {
            return Self::none();
        }
        Self {
            numerator: vec![unit.to_string()],
            denominator: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.numerator.is_empty() && self.denominator.is_empty()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.numerator.join("*"))?;
        if !self.denominator.is_empty() {
            write!(f, "/{}", self.denominator.join("*"))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dimension {
    pub value: f64,
    pub unit: Unit,
}

impl Dimension {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Quoted {
    pub value: String,
    /// Quote character the string was written with; `None` when escaped.
    pub quote: Option<char>,
    /// Written as `~"..."`, printed without quotes.
    pub escaped: bool,
}

impl Quoted {
    pub fn new(value: impl Into<String>, quote: char) -> Self {
        Self {
            value: value.into(),
            quote: Some(quote),
            escaped: false,
        }
    }

    pub fn escaped(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: None,
            escaped: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Separator {
    Comma,
    Space,
}

#[derive(Clone, Debug, PartialEq)]
pub struct List {
    pub items: Vec<Node>,
    pub separator: Separator,
}

impl List {
    pub fn new(items: Vec<Node>, separator: Separator) -> Self {
        Self { items, separator }
    }
}

/// Formats a number the way CSS output does: no trailing `.0`, at most
/// eight fractional digits.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1e8).round() / 1e8;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Variable(name) => write!(f, "{}", name),
            Node::Color(color) => write!(f, "{}", color.to_css()),
            Node::Operation(op) => {
                if op.parens {
                    write!(f, "({} {} {})", op.lhs, op.op.symbol(), op.rhs)
                } else {
                    write!(f, "{} {} {}", op.lhs, op.op.symbol(), op.rhs)
                }
            }
            Node::Call(call) => {
                write!(f, "{}(", call.name)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Node::Dimension(dim) => write!(f, "{}{}", format_number(dim.value), dim.unit),
            Node::Quoted(q) => match q.quote {
                Some(quote) if !q.escaped => write!(f, "{quote}{}{quote}", q.value),
                _ => write!(f, "{}", q.value),
            },
            Node::Keyword(text) | Node::Opaque(text) => write!(f, "{}", text),
            Node::List(list) => {
                let sep = match list.separator {
                    Separator::Comma => ", ",
                    Separator::Space => " ",
                };
                for (i, item) in list.items.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", sep)?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

/// A top-level statement of a stylesheet.
#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    Declaration(Declaration),
    Import(Import),
    /// Rulesets, mixins and at-rules the variable walk doesn't look into.
    Other(String),
}

/// `name: value`. Variable declarations have `variable == true` and an
/// `@`-prefixed name.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: Node,
    pub variable: bool,
}

impl Declaration {
    pub fn variable(name: impl Into<String>, value: Node) -> Self {
        Self {
            name: name.into(),
            value,
            variable: true,
        }
    }
}

/// An `@import` whose target has been parsed into `root`.
#[derive(Clone, Debug, PartialEq)]
pub struct Import {
    pub filename: String,
    pub root: Stylesheet,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}
