//! LESS parsing.
//!
//! This module turns LESS source into a [`Stylesheet`] holding the
//! statements the variable walk cares about:
//!
//! - [`parse_stylesheet`]: Parses source without import support
//! - [`parse_stylesheet_with`]: Parses source, loading imports through a loader
//! - [`parse_file`]: Parses a file, loading imports relative to it
//! - [`parse_value`]: Parses a single value expression
//!
//! ## Submodules
//!
//! - [`imports`]: Import loaders (filesystem, in-memory)
//! - [`units`]: Numeric value and unit parsing
//! - [`values`]: Value expression grammar
//!
//! ## Recognized statements
//!
//! ```less
//! @import "theme";            // Rule::Import, parsed through the loader
//! @brand: #d9534f;            // Rule::Declaration
//! @detached: { color: red; }  // Rule::Declaration with an Opaque value
//! .button { color: @brand; }  // Rule::Other
//! ```
//!
//! Block (`/* */`) and line (`//`) comments are stripped first. Anything
//! that isn't an import or a variable declaration is kept verbatim as
//! [`Rule::Other`] without looking inside it.

pub mod imports;
pub mod units;
pub mod values;

use std::fs;
use std::path::Path;

pub use crate::parser::imports::{FsLoader, ImportLoader, MemoryLoader, NoImports};

use crate::TreeError;
use crate::node::{Declaration, Import, Node, Rule, Stylesheet};
use crate::parser::values::{parse_quoted, parse_variable_name};

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, multispace0},
    combinator::{map, opt},
    sequence::{delimited, preceded, terminated, tuple},
};

/// Parses a stylesheet. Any `@import` of a LESS file is an error.
pub fn parse_stylesheet(source: &str) -> Result<Stylesheet, TreeError> {
    parse_stylesheet_with(source, &mut NoImports)
}

/// Parses a stylesheet, resolving imports through `loader`.
pub fn parse_stylesheet_with(
    source: &str,
    loader: &mut dyn ImportLoader,
) -> Result<Stylesheet, TreeError> {
    StatementParser::new(loader).parse(source, None)
}

/// Reads and parses a file, loading imports relative to it.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Stylesheet, TreeError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let path = fs::canonicalize(path)?;
    let name = path.to_string_lossy().into_owned();

    let mut loader = FsLoader::new(path.parent().unwrap_or_else(|| Path::new(".")));
    let mut parser = StatementParser::new(&mut loader);
    parser.stack.push(name.clone());
    parser.parse(&source, Some(&name))
}

/// Parses a single value expression, e.g. `10px 20px` or `lighten(@a, 10%)`.
pub fn parse_value(text: &str) -> Result<Node, TreeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TreeError::InvalidSyntax("empty value".to_string()));
    }
    let (remaining, node) = values::parse_value(text).map_err(|e| TreeError::InvalidSyntax(e.to_string()))?;

    if !remaining.trim().is_empty() {
        return Err(TreeError::InvalidSyntax(format!(
            "Unexpected tokens at end of value: {}",
            remaining.trim()
        )));
    }
    Ok(node)
}

struct StatementParser<'l> {
    loader: &'l mut dyn ImportLoader,
    /// Files currently being parsed, outermost first.
    stack: Vec<String>,
}

impl<'l> StatementParser<'l> {
    fn new(loader: &'l mut dyn ImportLoader) -> Self {
        Self {
            loader,
            stack: Vec::new(),
        }
    }

    fn parse(&mut self, source: &str, file: Option<&str>) -> Result<Stylesheet, TreeError> {
        let clean = strip_comments(source);
        let mut rest = clean.as_str();
        let mut rules = Vec::new();

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }

            if let Ok((after, (options, target))) = import_statement(rest) {
                let is_css = options.is_some_and(|o| o.contains("css")) || target.ends_with(".css");
                if is_css {
                    let consumed = &rest[..rest.len() - after.len()];
                    rules.push(Rule::Other(consumed.trim().to_string()));
                } else {
                    rules.push(self.import(&target, file)?);
                }
                rest = after;
                continue;
            }

            if let Ok((after, name)) = declaration_head(rest) {
                let (after, value) = declaration_value(name, after)?;
                rules.push(Rule::Declaration(Declaration::variable(name, value)));
                rest = after;
                continue;
            }

            let end = statement_end(rest);
            rules.push(Rule::Other(rest[..end].trim().to_string()));
            rest = &rest[end..];
        }

        Ok(Stylesheet::new(rules))
    }

    fn import(&mut self, path: &str, from: Option<&str>) -> Result<Rule, TreeError> {
        let (resolved, source) = self.loader.load(path, from)?;
        if self.stack.contains(&resolved) {
            return Err(TreeError::ImportCycle(resolved));
        }

        log::trace!("importing {} from {}", resolved, from.unwrap_or("<root>"));
        self.stack.push(resolved.clone());
        let root = self.parse(&source, Some(&resolved));
        self.stack.pop();

        Ok(Rule::Import(Import {
            filename: resolved,
            root: root?,
        }))
    }
}

/// `@import (options) "path";` or `@import url("path");`
fn import_statement(input: &str) -> IResult<&str, (Option<&str>, String)> {
    let (input, _) = tag("@import")(input)?;
    let (input, options) = opt(preceded(
        multispace0,
        delimited(char('('), take_until(")"), char(')')),
    ))(input)?;
    let (input, target) = preceded(
        multispace0,
        alt((
            map(parse_quoted, |q| q.value),
            map(
                delimited(tag("url("), take_until(")"), char(')')),
                |raw: &str| raw.trim().trim_matches(|c| c == '"' || c == '\'').to_string(),
            ),
        )),
    )(input)?;
    let (input, _) = tuple((multispace0, opt(char(';'))))(input)?;
    Ok((input, (options, target)))
}

/// `@name:` at the start of a statement.
fn declaration_head(input: &str) -> IResult<&str, &str> {
    terminated(parse_variable_name, tuple((multispace0, char(':'))))(input)
}

fn declaration_value<'a>(name: &str, input: &'a str) -> Result<(&'a str, Node), TreeError> {
    let input = input.trim_start();

    // Detached ruleset: `@name: { ... }`
    if input.starts_with('{') {
        let end = statement_end(input);
        let after = &input[end..];
        let after = opt_semicolon(after);
        return Ok((after, Node::Opaque(input[..end].trim().to_string())));
    }

    let end = statement_end(input);
    let text = input[..end].trim_end().trim_end_matches(';');
    if text.trim().is_empty() {
        return Err(TreeError::InvalidSyntax(format!("missing value for {}", name)));
    }
    let value = parse_value(text).map_err(|e| match e {
        TreeError::InvalidSyntax(message) => TreeError::InvalidSyntax(format!("{} in {}", message, name)),
        other => other,
    })?;
    Ok((&input[end..], value))
}

fn opt_semicolon(input: &str) -> &str {
    let trimmed = input.trim_start();
    trimmed.strip_prefix(';').unwrap_or(input)
}

/// Byte offset just past the end of the statement starting at `input`.
///
/// A statement ends at the first `;` outside quotes and brackets, or at the
/// `}` closing its top-level block.
fn statement_end(input: &str) -> usize {
    let mut depth = 0i32;
    let mut quote = None;
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            if c == '\\' {
                chars.next();
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' => depth -= 1,
            '}' => {
                depth -= 1;
                if depth <= 0 {
                    return i + 1;
                }
            }
            ';' if depth <= 0 => return i + 1,
            _ => {}
        }
    }
    input.len()
}

/// Removes `/* */` and `//` comments, leaving strings and `url()` intact.
fn strip_comments(source: &str) -> String {
    let mut clean = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote = None;
    let mut in_url = false;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            clean.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    clean.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            ')' => in_url = false,
            '(' if clean.ends_with("url") => in_url = true,
            '/' if !in_url && chars.peek() == Some(&'*') => {
                chars.next();
                while let Some(inner) = chars.next() {
                    if inner == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        break;
                    }
                }
                clean.push(' ');
                continue;
            }
            '/' if !in_url && chars.peek() == Some(&'/') => {
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        clean.push('\n');
                        break;
                    }
                }
                continue;
            }
            _ => {}
        }
        clean.push(c);
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments_keeps_strings_and_urls() {
        let src = "@a: \"//not\"; /* gone */ @b: url(http://x.y/z.png); // tail\n@c: 1;";
        let clean = strip_comments(src);
        assert!(clean.contains("\"//not\""));
        assert!(clean.contains("url(http://x.y/z.png)"));
        assert!(!clean.contains("gone"));
        assert!(!clean.contains("tail"));
        assert!(clean.contains("@c: 1;"));
    }

    #[test]
    fn test_statement_end() {
        assert_eq!(statement_end("a; b"), 2);
        assert_eq!(statement_end(".x { a: 1; b: 2; } .y {}"), 18);
        assert_eq!(statement_end("@a: \"x;y\";"), 10);
        assert_eq!(statement_end("no end"), 6);
    }

    #[test]
    fn test_import_statement_forms() {
        let (_, (options, target)) = import_statement("@import \"theme\";").unwrap();
        assert_eq!((options, target.as_str()), (None, "theme"));

        let (_, (options, target)) = import_statement("@import (reference) 'mixins.less';").unwrap();
        assert_eq!((options, target.as_str()), (Some("reference"), "mixins.less"));

        let (_, (_, target)) = import_statement("@import url(\"base.less\");").unwrap();
        assert_eq!(target, "base.less");
    }

    #[test]
    fn test_missing_value_is_an_error() {
        assert!(matches!(
            parse_stylesheet("@color: ;"),
            Err(TreeError::InvalidSyntax(msg)) if msg.contains("@color")
        ));
    }
}
