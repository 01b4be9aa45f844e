//! Depth-zero delimiter search.
//!
//! Finds where a type or expression ends: the first stop byte outside any
//! bracket pair, the first closing bracket that was never opened, or the end
//! of input. Strings, templates and comments are skipped whole.

use ts_lexer::{literal_at, LiteralKind};

use super::util::is_compound_eq;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Brackets {
    /// `<` and `>` nest, except the `>` of `=>`.
    Type,
    /// `<` and `>` are comparison operators.
    Value,
}

/// Offset of the first byte at or after `from` that sits at depth zero and
/// satisfies `stop`, or of the first unmatched closing bracket, or
/// `bytes.len()`.
pub(super) fn find_delimiter_by(
    bytes: &[u8],
    from: usize,
    brackets: Brackets,
    mut stop: impl FnMut(&[u8], usize) -> bool,
) -> usize {
    let mut depth = 0i32;
    let mut i = from;
    while i < bytes.len() {
        if depth == 0 && stop(bytes, i) {
            return i;
        }
        if let Some(end) = skippable_literal_end(bytes, i) {
            i = end;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b'<' if brackets == Brackets::Type => depth += 1,
            b'>' if brackets == Brackets::Type && !(i > 0 && bytes[i - 1] == b'=') => {
                depth -= 1;
                if depth < 0 {
                    return i;
                }
            }
            b')' | b']' | b'}' => {
                depth -= 1;
                if depth < 0 {
                    return i;
                }
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

/// [`find_delimiter_by`] with a plain set of stop bytes. A `=` stop never
/// matches inside `=>`, `==`, `!=`, `<=` or `>=`.
pub(super) fn find_delimiter(bytes: &[u8], from: usize, brackets: Brackets, stops: &[u8]) -> usize {
    find_delimiter_by(bytes, from, brackets, |bytes, i| {
        stops.contains(&bytes[i]) && !is_compound_eq(bytes, i)
    })
}

/// End of a string, template or comment starting at `i`. Regex literals are
/// not skipped: inside a type a `/` is never a regex.
fn skippable_literal_end(bytes: &[u8], i: usize) -> Option<usize> {
    if !matches!(bytes[i], b'\'' | b'"' | b'`' | b'/') {
        return None;
    }
    literal_at(bytes, i)
        .filter(|lit| lit.kind != LiteralKind::Regex)
        .map(|lit| lit.span.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_at(src: &str, brackets: Brackets, stops: &[u8]) -> usize {
        find_delimiter(src.as_bytes(), 0, brackets, stops)
    }

    #[test]
    fn stops_at_depth_zero_only() {
        let src = " Map<string, number>, next";
        assert_eq!(stop_at(src, Brackets::Type, b","), 20);
    }

    #[test]
    fn arrow_does_not_close_angle_or_stop_on_eq() {
        let src = " (a: T) => U = x";
        assert_eq!(stop_at(src, Brackets::Type, b"="), 13);
        let src = " <T>(a: T) => T>";
        assert_eq!(stop_at(src, Brackets::Type, b""), 15);
    }

    #[test]
    fn unmatched_close_ends_the_scan() {
        assert_eq!(stop_at(" string) {", Brackets::Type, b";"), 7);
        assert_eq!(stop_at(" a > b;", Brackets::Value, b";"), 6);
    }

    #[test]
    fn literals_are_skipped() {
        let src = " 'a;b' | \"c,d\" /* e; */;";
        assert_eq!(stop_at(src, Brackets::Type, b";,"), src.len() - 1);
    }

    #[test]
    fn runs_to_end_without_delimiter() {
        assert_eq!(stop_at(" string", Brackets::Type, b";"), 7);
    }
}
