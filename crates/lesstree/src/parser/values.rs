//! Value expression parsing.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! value          = expression ("," expression)*          comma list
//! expression     = additive (WS additive)*                space list
//! additive       = multiplicative (("+" | "-") multiplicative)*
//! multiplicative = primary (("*" | "/") primary)*
//! primary        = "(" additive ")" | color | quoted | "~" quoted | variable
//!                | dimension | url(...) | call | keyword
//! ```
//!
//! A `-` only acts as an operator when it is surrounded by whitespace on both
//! sides or directly follows the left operand, so `10px -5px` stays a two
//! element list while `10px - 5px` and `10px-5px` are subtractions.

use crate::color::Color;
use crate::node::{Call, List, Node, Operation, Operator, Quoted, Separator};
use crate::parser::units::{parse_dimension, parse_hex_digits};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{escaped, is_not, tag, take_until, take_while, take_while1},
    character::complete::{char, multispace0, multispace1, none_of, one_of},
    combinator::{map, opt, recognize, value},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, terminated, tuple},
};

/// Parses an identifier (alphanumeric characters, dashes, and underscores).
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '-' || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '-' || c == '_'),
    ))(input)
}

/// Parses a variable name including its `@` sigil.
pub fn parse_variable_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        char('@'),
        take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_'),
    ))(input)
}

/// Parses a full comma/space separated value.
pub fn parse_value(input: &str) -> IResult<&str, Node> {
    let (input, items) = separated_list1_trimmed(input)?;
    Ok((input, collapse(items, Separator::Comma)))
}

fn separated_list1_trimmed(input: &str) -> IResult<&str, Vec<Node>> {
    let (mut input, first) = parse_expression(input)?;
    let mut items = vec![first];
    while let Ok((rest, item)) = preceded(tuple((multispace0, char(','), multispace0)), parse_expression)(input) {
        items.push(item);
        input = rest;
    }
    Ok((input, items))
}

/// Parses a space separated run of terms.
fn parse_expression(input: &str) -> IResult<&str, Node> {
    let (mut input, first) = parse_additive(input)?;
    let mut items = vec![first];
    while let Ok((rest, item)) = preceded(multispace1, parse_additive)(input) {
        items.push(item);
        input = rest;
    }
    Ok((input, collapse(items, Separator::Space)))
}

fn collapse(mut items: Vec<Node>, separator: Separator) -> Node {
    if items.len() == 1 {
        items.remove(0)
    } else {
        Node::List(List::new(items, separator))
    }
}

fn additive_operator(input: &str) -> IResult<&str, Operator> {
    alt((
        value(Operator::Add, delimited(multispace0, char('+'), multispace0)),
        value(Operator::Sub, delimited(multispace1, char('-'), multispace1)),
        value(Operator::Sub, terminated(char('-'), multispace0)),
    ))(input)
}

fn multiplicative_operator(input: &str) -> IResult<&str, Operator> {
    delimited(
        multispace0,
        alt((value(Operator::Mul, char('*')), value(Operator::Div, char('/')))),
        multispace0,
    )(input)
}

fn parse_additive(input: &str) -> IResult<&str, Node> {
    let (mut input, mut lhs) = parse_multiplicative(input)?;
    while let Ok((rest, (op, rhs))) = pair(additive_operator, parse_multiplicative)(input) {
        lhs = Node::Operation(Operation::new(op, lhs, rhs));
        input = rest;
    }
    Ok((input, lhs))
}

fn parse_multiplicative(input: &str) -> IResult<&str, Node> {
    let (mut input, mut lhs) = parse_primary(input)?;
    while let Ok((rest, (op, rhs))) = pair(multiplicative_operator, parse_primary)(input) {
        lhs = Node::Operation(Operation::new(op, lhs, rhs));
        input = rest;
    }
    Ok((input, lhs))
}

fn parse_primary(input: &str) -> IResult<&str, Node> {
    alt((
        parse_parens,
        map(parse_hex_digits, |digits| match Color::parse(&format!("#{}", digits)) {
            Ok(color) => Node::Color(color),
            Err(_) => Node::Keyword(format!("#{}", digits)),
        }),
        map(parse_quoted, Node::Quoted),
        map(preceded(char('~'), parse_quoted), |q| Node::Quoted(Quoted::escaped(q.value))),
        map(parse_variable_name, |name| Node::Variable(name.to_string())),
        map(parse_dimension, Node::Dimension),
        map(parse_url, |raw| Node::Keyword(raw.to_string())),
        parse_call,
        map(parse_ident, keyword),
        map(recognize(pair(char('#'), parse_ident)), |raw: &str| {
            Node::Keyword(raw.to_string())
        }),
    ))(input)
}

fn keyword(ident: &str) -> Node {
    match Color::from_keyword(ident) {
        Some(color) => Node::Color(color),
        None => Node::Keyword(ident.to_string()),
    }
}

fn parse_parens(input: &str) -> IResult<&str, Node> {
    let (input, inner) = delimited(
        pair(char('('), multispace0),
        parse_additive,
        pair(multispace0, char(')')),
    )(input)?;
    let node = match inner {
        Node::Operation(mut op) => {
            op.parens = true;
            Node::Operation(op)
        }
        other => other,
    };
    Ok((input, node))
}

/// Parses `"..."` or `'...'`, keeping backslash escapes verbatim.
pub fn parse_quoted(input: &str) -> IResult<&str, Quoted> {
    let (rest, quote) = one_of("\"'")(input)?;
    let (rest, text) = quoted_body(rest, quote)?;
    let (rest, _) = char(quote)(rest)?;
    Ok((rest, Quoted::new(text, quote)))
}

fn quoted_body(input: &str, quote: char) -> IResult<&str, &str> {
    let stop = if quote == '"' { "\"\\" } else { "'\\" };
    let (rest, body) = opt(escaped(is_not(stop), '\\', none_of("")))(input)?;
    Ok((rest, body.unwrap_or("")))
}

fn parse_url(input: &str) -> IResult<&str, &str> {
    recognize(tuple((tag("url("), take_until(")"), char(')'))))(input)
}

fn parse_call(input: &str) -> IResult<&str, Node> {
    let (input, name) = parse_ident(input)?;
    let (input, args) = delimited(
        pair(char('('), multispace0),
        separated_list0(tuple((multispace0, char(','), multispace0)), parse_expression),
        pair(multispace0, char(')')),
    )(input)?;
    Ok((input, Node::Call(Call::new(name, args))))
}
