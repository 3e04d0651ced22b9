//! Integration tests for LESS value parsing.
//!
//! Covers the value grammar:
//! - Dimensions: plain numbers, units, percentages, signs
//! - Colors: hex forms and named keywords
//! - Strings: single, double and escaped quotes
//! - Operations, calls and lists

use lesstree::parser::units::parse_dimension;
use lesstree::{Color, Node, Operator, Quoted, Separator, parse_value};

// ============================================================================
// DIMENSIONS
// ============================================================================

#[test]
fn test_dimension_unitless() {
    assert_eq!(parse_value("19").unwrap(), Node::number(19.0));
}

#[test]
fn test_dimension_px() {
    assert_eq!(parse_value("19px").unwrap(), Node::dimension(19.0, "px"));
}

#[test]
fn test_dimension_percent() {
    assert_eq!(parse_value("19%").unwrap(), Node::dimension(19.0, "%"));
}

#[test]
fn test_dimension_fraction_without_leading_zero() {
    assert_eq!(parse_value(".5em").unwrap(), Node::dimension(0.5, "em"));
}

#[test]
fn test_dimension_negative() {
    assert_eq!(parse_value("-4px").unwrap(), Node::dimension(-4.0, "px"));
}

#[test]
fn test_parse_dimension_leaves_tail() {
    let (rest, dim) = parse_dimension("18.5px;").unwrap();
    assert_eq!(rest, ";");
    assert_eq!(dim.value, 18.5);
    assert_eq!(dim.unit.to_string(), "px");
}

// ============================================================================
// COLORS
// ============================================================================

#[test]
fn test_hex_colors() {
    let Node::Color(brand) = parse_value("#d9534f").unwrap() else {
        panic!("expected a color");
    };
    assert_eq!(brand.rgb, Color::rgb(217.0, 83.0, 79.0).rgb);

    let Node::Color(white) = parse_value("#FFF").unwrap() else {
        panic!("expected a color");
    };
    assert_eq!(white.rgb, [255.0, 255.0, 255.0]);
    assert_eq!(white.to_css(), "#FFF");
}

#[test]
fn test_named_color() {
    let Node::Color(color) = parse_value("rebeccapurple").unwrap() else {
        panic!("expected a color");
    };
    assert_eq!(color.to_css(), "rebeccapurple");
}

#[test]
fn test_hash_identifier_is_not_a_color() {
    assert_eq!(parse_value("#main").unwrap(), Node::Keyword("#main".into()));
}

// ============================================================================
// STRINGS AND KEYWORDS
// ============================================================================

#[test]
fn test_quoted_strings() {
    assert_eq!(parse_value("'a b'").unwrap(), Node::Quoted(Quoted::new("a b", '\'')));
    assert_eq!(parse_value("\"a\\\"b\"").unwrap(), Node::Quoted(Quoted::new("a\\\"b", '"')));
}

#[test]
fn test_escaped_string() {
    let node = parse_value("~\"progid:DXImageTransform\"").unwrap();
    assert_eq!(node, Node::Quoted(Quoted::escaped("progid:DXImageTransform")));
}

#[test]
fn test_keyword() {
    assert_eq!(parse_value("sans-serif").unwrap(), Node::Keyword("sans-serif".into()));
}

#[test]
fn test_url_is_kept_as_text() {
    assert_eq!(
        parse_value("url(../img/bg.png)").unwrap(),
        Node::Keyword("url(../img/bg.png)".into())
    );
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

#[test]
fn test_operation() {
    let Node::Operation(op) = parse_value("@a * 2").unwrap() else {
        panic!("expected an operation");
    };
    assert_eq!(op.op, Operator::Mul);
    assert_eq!(*op.lhs, Node::Variable("@a".into()));
    assert_eq!(*op.rhs, Node::number(2.0));
    assert!(!op.parens);
}

#[test]
fn test_nested_call() {
    let Node::Call(call) = parse_value("fade(darken(@brand, 10%), 50%)").unwrap() else {
        panic!("expected a call");
    };
    assert_eq!(call.name, "fade");
    assert!(matches!(&call.args[0], Node::Call(inner) if inner.name == "darken"));
    assert_eq!(call.args[1], Node::dimension(50.0, "%"));
}

#[test]
fn test_space_list() {
    let Node::List(list) = parse_value("1px solid #ccc").unwrap() else {
        panic!("expected a list");
    };
    assert_eq!(list.separator, Separator::Space);
    assert_eq!(list.items.len(), 3);
}

#[test]
fn test_comma_list() {
    let Node::List(list) = parse_value("'Helvetica Neue', Arial, sans-serif").unwrap() else {
        panic!("expected a list");
    };
    assert_eq!(list.separator, Separator::Comma);
    assert_eq!(list.items.len(), 3);
}

#[test]
fn test_display_round_trip() {
    let text = "10px 20px, 'a b'";
    assert_eq!(parse_value(text).unwrap().to_string(), text);
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_empty_value() {
    assert!(parse_value("   ").is_err());
}

#[test]
fn test_trailing_garbage() {
    assert!(parse_value("10px )").is_err());
}
