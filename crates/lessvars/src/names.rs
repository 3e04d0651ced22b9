//! Variable name → host identifier conversion.

/// Converts a LESS variable name into a camelCase identifier.
///
/// Every hyphen followed by a character becomes that character uppercased,
/// then the leading sigil is dropped.
///
/// ```
/// use lessvars::to_host_identifier;
///
/// assert_eq!(to_host_identifier("@font-size"), "fontSize");
/// assert_eq!(to_host_identifier("@my-really-long-name"), "myReallyLongName");
/// ```
pub fn to_host_identifier(name: &str) -> String {
    let mut camel = String::with_capacity(name.len());
    let mut chars = name.chars();
    while let Some(c) = chars.next() {
        if c != '-' {
            camel.push(c);
            continue;
        }
        match chars.next() {
            Some(next) => camel.extend(next.to_uppercase()),
            None => camel.push('-'),
        }
    }

    let mut rest = camel.chars();
    rest.next();
    rest.as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(to_host_identifier("@fontsize"), "fontsize");
    }

    #[test]
    fn test_digits_and_underscores() {
        assert_eq!(to_host_identifier("@grid-12-col"), "grid12Col");
        assert_eq!(to_host_identifier("@z_index"), "z_index");
    }

    #[test]
    fn test_double_and_trailing_hyphens() {
        assert_eq!(to_host_identifier("@a--b"), "a-b");
        assert_eq!(to_host_identifier("@trailing-"), "trailing-");
    }

    #[test]
    fn test_empty_and_sigil_only() {
        assert_eq!(to_host_identifier(""), "");
        assert_eq!(to_host_identifier("@"), "");
    }
}
