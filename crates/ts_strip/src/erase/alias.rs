//! `type Name<Params> = ...` statements.

use ts_syntax::ConstructKind;

use super::declaration::declaration_at;
use super::delimiter::{find_delimiter, find_delimiter_by, Brackets};
use super::dispatch::{HandlerResult, Match};
use super::util::{comment_out, is_compound_eq, line_break_ends, scan_ident, skip_inline_space, skip_space, trim_end};

pub(super) fn detect(bytes: &[u8], from: usize, limit: usize) -> Option<Match> {
    (from..limit)
        .filter(|&i| matches!(bytes[i], b'e' | b't'))
        .find_map(|i| alias_at(bytes, i))
}

/// Matches through the `=`.
fn alias_at(bytes: &[u8], i: usize) -> Option<Match> {
    let after = declaration_at(bytes, i, "type")?;
    let name = skip_inline_space(bytes, after);
    let name_end = scan_ident(bytes, name);
    if name == after || name_end == name {
        return None;
    }
    let mut eq = skip_space(bytes, name_end);
    if bytes.get(eq) == Some(&b'<') {
        let close = find_delimiter(bytes, eq + 1, Brackets::Type, b"");
        if bytes.get(close) != Some(&b'>') {
            return None;
        }
        eq = skip_space(bytes, close + 1);
    }
    (bytes.get(eq) == Some(&b'=') && !is_compound_eq(bytes, eq)).then_some(Match {
        kind: ConstructKind::TypeAliasStatement,
        start: i,
        end: eq + 1,
    })
}

/// The statement ends at a depth-zero `;` (kept in the comment), at a line
/// break that completes the type, or at an unmatched closing bracket.
pub(super) fn handle(source: &str, found: Match) -> HandlerResult {
    let bytes = source.as_bytes();
    let type_start = found.end;
    let stop = find_delimiter_by(bytes, type_start, Brackets::Type, |bytes, i| match bytes[i] {
        b';' => true,
        b'\n' => line_break_ends(bytes, type_start, i),
        _ => false,
    });
    let end = if bytes.get(stop) == Some(&b';') {
        stop + 1
    } else {
        trim_end(bytes, found.start, stop)
    };
    HandlerResult {
        text: comment_out(&source[found.start..end]),
        consumed_end: end,
    }
}
