//! `<...>` generic parameter and argument lists.
//!
//! A `<` directly after a name opens a generic list when its contents look
//! like types and the list is followed by `(`, `{`, `extends` or
//! `implements`. Comparisons such as `i<n;` fail one of those checks.

use ts_lexer::literal_at;
use ts_syntax::ConstructKind;

use super::dispatch::{HandlerResult, Match};
use super::util::{comment_out, is_ident_byte, keyword_at, skip_space};

pub(super) fn detect(bytes: &[u8], from: usize, limit: usize) -> Option<Match> {
    (from.max(1)..limit)
        .filter(|&i| {
            bytes[i] == b'<' && is_ident_byte(bytes[i - 1]) && !matches!(bytes.get(i + 1), Some(b'<' | b'='))
        })
        .find_map(|open| {
            let close = list_close(bytes, open)?;
            let next = skip_space(bytes, close + 1);
            let followed = matches!(bytes.get(next), Some(b'(' | b'{'))
                || keyword_at(bytes, next, "extends")
                || keyword_at(bytes, next, "implements");
            followed.then_some(Match {
                kind: ConstructKind::GenericArgumentList,
                start: open,
                end: close + 1,
            })
        })
}

/// The `>` closing the list opened at `open`, if everything in between can
/// appear in a type.
fn list_close(bytes: &[u8], open: usize) -> Option<usize> {
    let (mut angle, mut round, mut square, mut curly) = (0i32, 0i32, 0i32, 0i32);
    let mut i = open;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'<' => angle += 1,
            b'>' if bytes[i - 1] == b'=' => {}
            b'>' => {
                angle -= 1;
                if angle == 0 {
                    return (round == 0 && square == 0 && curly == 0).then_some(i);
                }
            }
            b'(' => round += 1,
            b')' => {
                round -= 1;
                if round < 0 {
                    return None;
                }
            }
            b'[' => square += 1,
            b']' => {
                square -= 1;
                if square < 0 {
                    return None;
                }
            }
            b'{' => curly += 1,
            b'}' => {
                curly -= 1;
                if curly < 0 {
                    return None;
                }
            }
            // String literal types.
            b'\'' | b'"' => {
                i = literal_at(bytes, i)?.span.end;
                continue;
            }
            b'=' if bytes.get(i + 1) == Some(&b'=') || matches!(bytes[i - 1], b'=' | b'!') => return None,
            b'&' | b'|' if bytes.get(i + 1) == Some(&b) => return None,
            b';' if curly == 0 => return None,
            b if is_ident_byte(b)
                || b.is_ascii_whitespace()
                || matches!(b, b',' | b'.' | b'?' | b':' | b';' | b'=' | b'&' | b'|' | b'-') => {}
            _ => return None,
        }
        i += 1;
    }
    None
}

pub(super) fn handle(source: &str, found: Match) -> HandlerResult {
    HandlerResult {
        text: comment_out(&source[found.start..found.end]),
        consumed_end: found.end,
    }
}
