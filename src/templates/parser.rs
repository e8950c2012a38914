//! Placeholder scanner for template patterns.
//!
//! # Syntax
//!
//! ```text
//! pattern     := (literal | placeholder | escape)*
//! placeholder := "{" name "}"        name is one or more chars other than "{" and "}"
//! escape      := "{{" | "}}"         render as a single literal brace
//! ```
//!
//! Anything that does not form a placeholder (a lone `}`, an empty `{}`, an
//! unterminated `{name`) is kept as literal text, so scanning never fails.

use std::iter::Peekable;
use std::str::Chars;

/// A piece of a scanned pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Split a pattern into literal text and placeholders
pub fn parse_pattern(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '{' => match read_placeholder(&mut chars) {
                Ok(name) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name));
                }
                Err(raw) => {
                    literal.push('{');
                    literal.push_str(&raw);
                }
            },
            _ => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

/// Read a placeholder name after an opening brace
///
/// Returns the consumed text as `Err` when the braces do not form a valid
/// placeholder, so the caller can keep it as literal text.
fn read_placeholder(chars: &mut Peekable<Chars>) -> Result<String, String> {
    let mut name = String::new();

    while let Some(&ch) = chars.peek() {
        match ch {
            '}' => {
                chars.next();
                if name.is_empty() {
                    return Err("}".to_string());
                }
                return Ok(name);
            }
            // A new opening brace restarts scanning; leave it for the caller
            '{' => return Err(name),
            _ => {
                name.push(ch);
                chars.next();
            }
        }
    }

    Err(name)
}

/// Placeholder names in order of first appearance, without duplicates
pub fn placeholder_names(segments: &[Segment]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for segment in segments {
        if let Segment::Placeholder(name) = segment
            && !names.contains(name)
        {
            names.push(name.clone());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    fn ph(s: &str) -> Segment {
        Segment::Placeholder(s.to_string())
    }

    #[test]
    fn test_parse_two_placeholders() {
        let segments = parse_pattern("Setor {setor}. Protocolo {protocolo}.");
        assert_eq!(
            segments,
            vec![lit("Setor "), ph("setor"), lit(". Protocolo "), ph("protocolo"), lit(".")]
        );
    }

    #[test]
    fn test_parse_no_placeholders() {
        let text = "Aguardo as informações solicitadas.";
        assert_eq!(parse_pattern(text), vec![lit(text)]);
    }

    #[test]
    fn test_parse_adjacent_placeholders() {
        assert_eq!(parse_pattern("{a}{b}"), vec![ph("a"), ph("b")]);
    }

    #[test]
    fn test_parse_escaped_braces() {
        assert_eq!(parse_pattern("{{literal}} {x}"), vec![lit("{literal} "), ph("x")]);
    }

    #[test]
    fn test_parse_empty_braces_are_literal() {
        assert_eq!(parse_pattern("a {} b"), vec![lit("a {} b")]);
    }

    #[test]
    fn test_parse_unterminated_is_literal() {
        assert_eq!(parse_pattern("prazo {dias"), vec![lit("prazo {dias")]);
    }

    #[test]
    fn test_parse_lone_closing_brace_is_literal() {
        assert_eq!(parse_pattern("fim } aqui"), vec![lit("fim } aqui")]);
    }

    #[test]
    fn test_parse_nested_open_restarts() {
        assert_eq!(parse_pattern("{a{b}"), vec![lit("{a"), ph("b")]);
    }

    #[test]
    fn test_placeholder_names_deduplicated_in_order() {
        let segments = parse_pattern("{caso} {status} {caso}");
        assert_eq!(placeholder_names(&segments), vec!["caso", "status"]);
    }
}
