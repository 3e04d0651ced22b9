use crate::node::{Dimension, Unit};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1, one_of},
    combinator::{map, map_res, opt, recognize},
    sequence::{pair, tuple},
};

/// Parse a floating point or integer number, with an optional sign.
///
/// Accepts `10`, `-5`, `+2`, `1.5` and `.5`.
pub fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse the unit suffix (e.g., px, %, em, deg).
fn parse_unit_suffix(input: &str) -> IResult<&str, Unit> {
    alt((
        map(char('%'), |_| Unit::simple("%")),
        map(take_while1(|c: char| c.is_ascii_alphabetic()), Unit::simple),
    ))(input)
}

/// Parse a single dimension (e.g., "10", "19px", "50%", "1.5em").
pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    let (input, value) = parse_number(input)?;
    let (input, unit) = opt(parse_unit_suffix)(input)?;

    Ok((input, Dimension::new(value, unit.unwrap_or_default())))
}

/// Parse hex digits after a `#`.
pub fn parse_hex_digits(input: &str) -> IResult<&str, &str> {
    let (rest, _) = char('#')(input)?;
    let (rest, digits) = take_while1(|c: char| c.is_ascii_hexdigit())(rest)?;
    // `#fff-dark` is an identifier, not a color
    let continues_ident = rest
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if !matches!(digits.len(), 3 | 4 | 6 | 8) || continues_ident {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::HexDigit,
        )));
    }
    Ok((rest, digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_forms() {
        let (rest, d) = parse_dimension("19px;").unwrap();
        assert_eq!(rest, ";");
        assert_eq!(d, Dimension::new(19.0, Unit::simple("px")));

        let (_, d) = parse_dimension("-.5em").unwrap();
        assert_eq!(d, Dimension::new(-0.5, Unit::simple("em")));

        let (_, d) = parse_dimension("50%").unwrap();
        assert_eq!(d.unit.numerator, vec!["%".to_string()]);

        let (_, d) = parse_dimension("3").unwrap();
        assert!(d.unit.is_empty());
    }

    #[test]
    fn test_hex_digits() {
        assert_eq!(parse_hex_digits("#d9534f;").unwrap(), (";", "d9534f"));
        assert!(parse_hex_digits("#abcd1").is_err());
        assert!(parse_hex_digits("#fff-dark").is_err());
    }
}
