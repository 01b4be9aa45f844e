//! `expr as Type` casts.

use ts_syntax::ConstructKind;

use super::delimiter::{find_delimiter_by, Brackets};
use super::dispatch::{HandlerResult, Match};
use super::util::{
    comment_out, enclosing_open, is_ident_start, keyword_at, line_break_ends, prev_non_space, skip_space,
    trim_end, word_before,
};

/// Matches ` as` with the leading space, so the erased comment sits flush
/// against the operand.
pub(super) fn detect(bytes: &[u8], from: usize, limit: usize) -> Option<Match> {
    (from..limit)
        .filter(|&i| matches!(bytes[i], b' ' | b'\t'))
        .find(|&i| is_cast(bytes, i))
        .map(|i| Match {
            kind: ConstructKind::CastExpression,
            start: i,
            end: i + 3,
        })
}

fn is_cast(bytes: &[u8], space: usize) -> bool {
    let kw = space + 1;
    if !keyword_at(bytes, kw, "as") || !bytes.get(kw + 2).is_some_and(|b| b.is_ascii_whitespace()) {
        return false;
    }
    let next = skip_space(bytes, kw + 2);
    if !bytes
        .get(next)
        .is_some_and(|&b| is_ident_start(b) || matches!(b, b'{' | b'[' | b'(' | b'\'' | b'"'))
    {
        return false;
    }
    let Some(prev) = prev_non_space(bytes, space) else {
        return false;
    };
    // `import * as ns`, `export * as ns`, and `let as = ...`.
    if bytes[prev] == b'*' || matches!(word_before(bytes, prev + 1), b"let" | b"const" | b"var") {
        return false;
    }
    // `import { a as b }` and `export { a as b }` rename bindings.
    !enclosing_open(bytes, space).is_some_and(|open| {
        bytes[open] == b'{'
            && prev_non_space(bytes, open)
                .is_some_and(|p| matches!(word_before(bytes, p + 1), b"import" | b"export" | b"type"))
    })
}

/// The type runs to a depth-zero `;` or `,`, an unmatched closing bracket,
/// or a line break that completes it.
pub(super) fn handle(source: &str, found: Match) -> HandlerResult {
    let bytes = source.as_bytes();
    let type_start = found.end;
    let stop = find_delimiter_by(bytes, type_start, Brackets::Type, |bytes, i| match bytes[i] {
        b';' | b',' => true,
        b'\n' => line_break_ends(bytes, type_start, i),
        _ => false,
    });
    let end = trim_end(bytes, found.start, stop);
    HandlerResult {
        text: comment_out(&source[found.start..end]),
        consumed_end: end,
    }
}
