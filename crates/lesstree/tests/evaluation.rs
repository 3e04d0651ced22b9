//! Integration tests for node evaluation and the built-in functions,
//! driven from parsed source.

use std::collections::HashMap;

use lesstree::{
    EmptyScope, EvalContext, EvalFlags, FunctionRegistry, Node, Rule, Scope, TreeError, parse_stylesheet,
    parse_value,
};

/// Declarations of a parsed stylesheet, usable as an evaluation scope.
struct Declared(HashMap<String, Node>);

impl Declared {
    fn parse(source: &str) -> Self {
        let sheet = parse_stylesheet(source).unwrap();
        let nodes = sheet
            .rules
            .into_iter()
            .filter_map(|rule| match rule {
                Rule::Declaration(decl) => Some((decl.name, decl.value)),
                _ => None,
            })
            .collect();
        Declared(nodes)
    }
}

impl Scope for Declared {
    fn lookup(&self, name: &str) -> Option<&Node> {
        self.0.get(name)
    }
}

fn eval_in(scope: &dyn Scope, text: &str) -> Result<Node, TreeError> {
    let registry = FunctionRegistry::with_builtins();
    let ctx = EvalContext::new(&registry, scope).with_flags(EvalFlags::arithmetic());
    parse_value(text).unwrap().eval(&ctx)
}

fn eval(text: &str) -> String {
    eval_in(&EmptyScope, text).unwrap().to_string()
}

// ============================================================================
// ARITHMETIC
// ============================================================================

#[test]
fn test_dimension_arithmetic() {
    assert_eq!(eval("10px + 5"), "15px");
    assert_eq!(eval("2 * 3em"), "6em");
    assert_eq!(eval("(1 + 2) * 3"), "9");
    assert_eq!(eval("10px / 4"), "2.5px");
}

#[test]
fn test_color_arithmetic() {
    assert_eq!(eval("#111111 + #222222"), "#333333");
    assert_eq!(eval("#888888 / 2"), "#444444");
}

#[test]
fn test_incompatible_operands() {
    let err = eval_in(&EmptyScope, "bold + 1").unwrap_err();
    assert!(matches!(err, TreeError::IncompatibleOperands { op: '+', .. }));
}

#[test]
fn test_math_off_keeps_operation() {
    let registry = FunctionRegistry::new();
    let ctx = EvalContext::new(&registry, &EmptyScope);
    let node = parse_value("1 + 2").unwrap();
    assert_eq!(node.eval(&ctx).unwrap(), node);
}

// ============================================================================
// VARIABLES
// ============================================================================

#[test]
fn test_variables_resolve_through_scope() {
    let scope = Declared::parse("@base: 8px; @double: @base * 2;");
    assert_eq!(eval_in(&scope, "@double + 1").unwrap(), Node::dimension(17.0, "px"));
}

#[test]
fn test_undefined_variable() {
    let err = eval_in(&EmptyScope, "@nope * 2").unwrap_err();
    assert!(matches!(err, TreeError::UndefinedVariable(name) if name == "@nope"));
}

#[test]
fn test_recursive_variable() {
    let scope = Declared::parse("@a: @b + 1; @b: @a;");
    let err = eval_in(&scope, "@a").unwrap_err();
    assert!(matches!(err, TreeError::RecursiveVariable(_)));
}

// ============================================================================
// FUNCTIONS
// ============================================================================

#[test]
fn test_math_functions() {
    assert_eq!(eval("ceil(18.5px)"), "19px");
    assert_eq!(eval("floor(2.7)"), "2");
    assert_eq!(eval("round(1.2345, 2)"), "1.23");
    assert_eq!(eval("percentage(0.25)"), "25%");
    assert_eq!(eval("max(1px, 4px, 2px)"), "4px");
    assert_eq!(eval("unit(5, px)"), "5px");
}

#[test]
fn test_color_functions() {
    assert_eq!(eval("lighten(#000, 10%)"), "#1a1a1a");
    assert_eq!(eval("darken(#fff, 20%)"), "#cccccc");
    assert_eq!(eval("rgb(217, 83, 79)"), "#d9534f");
    assert_eq!(eval("rgba(0, 0, 0, 0.5)"), "rgba(0, 0, 0, 0.5)");
    assert_eq!(eval("mix(#ff0000, #0000ff, 50%)"), "#800080");
    assert_eq!(eval("greyscale(#ff0000)"), "#808080");
}

#[test]
fn test_channel_functions() {
    assert_eq!(eval("red(#d9534f)"), "217");
    assert_eq!(eval("alpha(fade(#000, 25%))"), "0.25");
}

#[test]
fn test_string_functions() {
    assert_eq!(eval("e(\"a b\")"), "a b");
    assert_eq!(eval("escape('a=1')"), "a%3D1");
}

#[test]
fn test_function_names_are_case_insensitive() {
    assert_eq!(eval("CEIL(1.2)"), "2");
}

#[test]
fn test_unknown_function() {
    let err = eval_in(&EmptyScope, "nope(1)").unwrap_err();
    assert!(matches!(err, TreeError::UnknownFunction(name) if name == "nope"));
}

#[test]
fn test_invalid_argument() {
    let err = eval_in(&EmptyScope, "lighten(10px, 10%)").unwrap_err();
    assert!(matches!(err, TreeError::InvalidArgument { function, .. } if function == "lighten"));
}
