//! Whole-statement declarations: `interface` and `declare`.

use tracing::warn;

use super::delimiter::{find_delimiter, find_delimiter_by, Brackets};
use super::dispatch::{HandlerResult, Match};
use super::util::{
    at_statement_start, comment_out, is_ident_start, keyword_at, line_break_ends, skip_inline_space,
    trim_end,
};
use ts_syntax::ConstructKind;

/// If a statement declaring `keyword` starts at `i` (optionally behind
/// `export`), the offset right after the keyword.
pub(super) fn declaration_at(bytes: &[u8], i: usize, keyword: &str) -> Option<usize> {
    if !at_statement_start(bytes, i) {
        return None;
    }
    let at = if keyword_at(bytes, i, "export") {
        let next = skip_inline_space(bytes, i + "export".len());
        if next == i + "export".len() {
            return None;
        }
        next
    } else {
        i
    };
    keyword_at(bytes, at, keyword).then_some(at + keyword.len())
}

/// `keyword` followed by a space and a name.
fn named_declaration(bytes: &[u8], i: usize, keyword: &str) -> Option<usize> {
    let after = declaration_at(bytes, i, keyword)?;
    let name = skip_inline_space(bytes, after);
    (name > after && bytes.get(name).is_some_and(|&b| is_ident_start(b))).then_some(after)
}

pub(super) fn detect_interface(bytes: &[u8], from: usize, limit: usize) -> Option<Match> {
    (from..limit)
        .filter(|&i| matches!(bytes[i], b'e' | b'i'))
        .find_map(|i| {
            named_declaration(bytes, i, "interface").map(|end| Match {
                kind: ConstructKind::InterfaceDeclaration,
                start: i,
                end,
            })
        })
}

/// The whole declaration through the `}` closing its body.
pub(super) fn handle_interface(source: &str, found: Match) -> HandlerResult {
    let bytes = source.as_bytes();
    let open = find_delimiter(bytes, found.end, Brackets::Type, b"{;");
    let end = match bytes.get(open) {
        Some(b'{') => block_end(bytes, open, found),
        Some(b';') => open + 1,
        _ => trim_end(bytes, found.start, open),
    };
    HandlerResult {
        text: comment_out(&source[found.start..end]),
        consumed_end: end,
    }
}

pub(super) fn detect_ambient(bytes: &[u8], from: usize, limit: usize) -> Option<Match> {
    (from..limit)
        .filter(|&i| matches!(bytes[i], b'e' | b'd'))
        .find_map(|i| {
            named_declaration(bytes, i, "declare").map(|end| Match {
                kind: ConstructKind::AmbientDeclaration,
                start: i,
                end,
            })
        })
}

/// Through a depth-zero `;`, a balanced `{...}` body, or the line break
/// ending the statement.
pub(super) fn handle_ambient(source: &str, found: Match) -> HandlerResult {
    let bytes = source.as_bytes();
    let body_start = found.end;
    let stop = find_delimiter_by(bytes, body_start, Brackets::Type, |bytes, i| match bytes[i] {
        b';' | b'{' => true,
        b'\n' => line_break_ends(bytes, body_start, i),
        _ => false,
    });
    let end = match bytes.get(stop) {
        Some(b'{') => block_end(bytes, stop, found),
        Some(b';') => stop + 1,
        _ => trim_end(bytes, found.start, stop),
    };
    HandlerResult {
        text: comment_out(&source[found.start..end]),
        consumed_end: end,
    }
}

/// Offset after the `}` matching the `{` at `open`.
fn block_end(bytes: &[u8], open: usize, found: Match) -> usize {
    let close = find_delimiter(bytes, open + 1, Brackets::Type, b"");
    if close >= bytes.len() {
        warn!(kind = %found.kind, offset = found.start, "declaration body is never closed");
        return bytes.len();
    }
    close + 1
}
