//! Unit normalization and list joining.
//!
//! - [`normalize_dimension`]: `19px` → `19`, `19%` → `"19%"`, `19` → `19`
//! - [`join`]: `[10, 20]` → `"10px 20px"`, `["a b", "c d"]` → `"a b, c d"`
//!
//! Bare magnitudes inside a joined list are pixel lengths, so a non-zero
//! finite number gets a `px` suffix while joining. Zero and text are
//! emitted unchanged.

use lesstree::Dimension;

use crate::value::{Resolved, Value};

/// Converts a dimension into its native form.
///
/// Pixels and unitless numbers become bare numbers, percentages become text.
/// Any other unit keeps only its magnitude.
pub fn normalize_dimension(dim: &Dimension) -> Value {
    let unit = &dim.unit;
    if unit.denominator.is_empty() {
        match unit.numerator.first().map(String::as_str) {
            Some("px") | None => return Value::Number(dim.value),
            Some("%") => return Value::String(format!("{}%", dim.value)),
            Some(_) => {}
        }
    }
    Value::Number(dim.value)
}

/// Joins resolved list elements into one string.
///
/// Elements are separated by `", "` when every element is a string and by a
/// single space otherwise. An unresolved element renders empty, an
/// unsupported node as its CSS text.
pub fn join(elements: &[Resolved]) -> Value {
    let separator = if elements.iter().all(Resolved::is_string) {
        ", "
    } else {
        " "
    };

    let parts: Vec<String> = elements.iter().map(render_element).collect();
    Value::String(parts.join(separator))
}

fn render_element(element: &Resolved) -> String {
    match element {
        Resolved::Value(Value::Number(n)) if n.is_finite() && *n != 0.0 => format!("{}px", n),
        Resolved::Value(value) => value.to_string(),
        Resolved::Unresolved(_) => String::new(),
        Resolved::Unsupported(node) => node.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesstree::{Node, Unit};

    fn dim(value: f64, unit: &str) -> Dimension {
        Dimension::new(value, Unit::simple(unit))
    }

    #[test]
    fn test_normalize_units() {
        assert_eq!(normalize_dimension(&dim(19.0, "px")), Value::Number(19.0));
        assert_eq!(normalize_dimension(&dim(19.0, "%")), Value::from("19%"));
        assert_eq!(normalize_dimension(&dim(19.0, "")), Value::Number(19.0));
        assert_eq!(normalize_dimension(&dim(1.5, "em")), Value::Number(1.5));
    }

    #[test]
    fn test_normalize_compound_unit_keeps_magnitude() {
        let speed = Dimension::new(
            3.0,
            Unit {
                numerator: vec!["px".into()],
                denominator: vec!["s".into()],
            },
        );
        assert_eq!(normalize_dimension(&speed), Value::Number(3.0));
    }

    #[test]
    fn test_join_numbers_gets_px() {
        let elements = [Resolved::from(10.0), Resolved::from(20.0)];
        assert_eq!(join(&elements), Value::from("10px 20px"));
    }

    #[test]
    fn test_join_zero_stays_bare() {
        let elements = [Resolved::from(0.0), Resolved::from(5.5)];
        assert_eq!(join(&elements), Value::from("0 5.5px"));
    }

    #[test]
    fn test_join_all_strings_uses_comma() {
        let elements = [Resolved::from("'a b'"), Resolved::from("'c d'")];
        assert_eq!(join(&elements), Value::from("'a b', 'c d'"));
    }

    #[test]
    fn test_join_mixed_uses_space() {
        let elements = [Resolved::from(1.0), Resolved::from("solid"), Resolved::from("#ccc")];
        assert_eq!(join(&elements), Value::from("1px solid #ccc"));
    }

    #[test]
    fn test_join_degraded_elements() {
        let elements = [
            Resolved::Unresolved("@later".into()),
            Resolved::from(10.0),
            Resolved::Unsupported(Node::Opaque("{ a: b }".into())),
        ];
        assert_eq!(join(&elements), Value::from(" 10px { a: b }"));
    }

    #[test]
    fn test_join_infinite_number_stays_bare() {
        let elements = [Resolved::from(f64::INFINITY), Resolved::from(1.0)];
        assert_eq!(join(&elements), Value::from("inf 1px"));
    }
}
