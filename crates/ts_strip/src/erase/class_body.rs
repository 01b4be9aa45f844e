//! Field declarations at the top of a class body.
//!
//! The walk starts at the body's `{` and erases field annotations, `?`/`!`
//! markers, TypeScript-only modifiers, index signatures and `declare` or
//! `abstract` members. Field initializers go through a nested erase run.
//! The walk stops at the first constructor, method or accessor; the rest of
//! the body is left to the regular rules.

use tracing::trace;
use ts_lexer::literal_at;
use ts_syntax::{ConstructKind, StripSyntax};

use super::delimiter::{find_delimiter, find_delimiter_by, Brackets};
use super::dispatch::{self, HandlerResult, Match, StripError};
use super::util::{
    comment_out, enclosing_open, ident_before, is_compound_eq, is_ident_byte, is_ident_start, keyword_at,
    line_break_ends, prev_code, scan_ident, skip_inline_space, skip_space, skip_trivia, trim_end,
};

/// Modifiers that only exist in TypeScript.
const TS_MODIFIERS: &[&str] = &["public", "private", "protected", "readonly", "override"];

/// Matches at a class body's `{`, at the space before an `implements`
/// clause so the clause can be erased too, or at an `abstract` in front of
/// `class`.
pub(super) fn detect(bytes: &[u8], from: usize, limit: usize) -> Option<Match> {
    (from..limit).find_map(|i| match bytes[i] {
        b'a' if keyword_at(bytes, i, "abstract") => {
            let next = skip_inline_space(bytes, i + "abstract".len());
            (next > i + "abstract".len() && keyword_at(bytes, next, "class")).then_some(Match {
                kind: ConstructKind::ClassMemberBlock,
                start: i,
                end: next,
            })
        }
        b'{' => class_keyword_before(bytes, i).map(|_| Match {
            kind: ConstructKind::ClassMemberBlock,
            start: i,
            end: i + 1,
        }),
        b' ' | b'\t' if keyword_at(bytes, i + 1, "implements") => {
            let brace = find_delimiter(bytes, i + 1, Brackets::Type, b"{;");
            (bytes.get(brace) == Some(&b'{') && class_keyword_before(bytes, brace).is_some()).then_some(Match {
                kind: ConstructKind::ClassMemberBlock,
                start: i,
                end: brace + 1,
            })
        }
        _ => None,
    })
}

/// Offset of the `class` keyword whose header ends at the `{` at `brace`.
/// The header may only hold names, `.`, `,` and bracketed groups.
fn class_keyword_before(bytes: &[u8], brace: usize) -> Option<usize> {
    let mut k = brace;
    loop {
        let p = prev_code(bytes, k)?;
        match bytes[p] {
            b if is_ident_byte(b) => {
                let s = ident_before(bytes, p + 1);
                if s > p {
                    return None;
                }
                if keyword_at(bytes, s, "class") {
                    return Some(s);
                }
                k = s;
            }
            b'.' | b',' => k = p,
            b')' => k = enclosing_open(bytes, p)?,
            b'>' if p > 0 && bytes[p - 1] != b'=' => k = angle_open(bytes, p)?,
            _ => return None,
        }
    }
}

/// The `<` matching the `>` at `close`.
fn angle_open(bytes: &[u8], close: usize) -> Option<usize> {
    let mut depth = 0i32;
    for k in (0..close).rev() {
        match bytes[k] {
            b'>' if k == 0 || bytes[k - 1] != b'=' => depth += 1,
            b'<' if depth == 0 => return Some(k),
            b'<' => depth -= 1,
            b';' | b'{' | b'}' => return None,
            _ => {}
        }
    }
    None
}

pub(super) fn handle(source: &str, found: Match, syntax: &StripSyntax) -> Result<HandlerResult, StripError> {
    let bytes = source.as_bytes();
    if bytes[found.start] == b'a' {
        return Ok(HandlerResult {
            text: comment_out(&source[found.start..found.end]),
            consumed_end: found.end,
        });
    }
    let brace = found.end - 1;
    let mut text = String::new();
    if found.start < brace {
        let end = trim_end(bytes, found.start, brace);
        text.push_str(&comment_out(&source[found.start..end]));
        text.push_str(&source[end..brace]);
    }
    let (members, consumed_end) = walk_members(source, brace, syntax)?;
    text.push_str(&members);
    Ok(HandlerResult { text, consumed_end })
}

enum Member {
    /// Replacement text for a field and the offset after it.
    Field(String, usize),
    /// Erased modifiers in front of a member the walk does not handle, and
    /// the offset of that member.
    Stop(String, usize),
}

fn walk_members(source: &str, brace: usize, syntax: &StripSyntax) -> Result<(String, usize), StripError> {
    let bytes = source.as_bytes();
    let mut text = String::from("{");
    let mut i = brace + 1;
    loop {
        let t = skip_trivia(bytes, i);
        text.push_str(&source[i..t]);
        i = t;
        match bytes.get(i) {
            None | Some(b'}') => break,
            Some(b';') => {
                text.push(';');
                i += 1;
                continue;
            }
            _ => {}
        }
        match member_at(source, i, syntax)? {
            Member::Field(field, end) => {
                text.push_str(&field);
                i = end;
            }
            Member::Stop(prefix, end) => {
                trace!(offset = end, "class member walk stopped");
                text.push_str(&prefix);
                i = end;
                break;
            }
        }
    }
    Ok((text, i))
}

fn member_at(source: &str, start: usize, syntax: &StripSyntax) -> Result<Member, StripError> {
    let bytes = source.as_bytes();
    let mut text = String::new();
    let mut k = start;

    // A modifier is a word followed by another name on the same line.
    loop {
        let word_end = scan_ident(bytes, k);
        if word_end == k {
            break;
        }
        let next = skip_inline_space(bytes, word_end);
        let names_follow = next > word_end
            && bytes
                .get(next)
                .is_some_and(|&b| is_ident_start(b) || matches!(b, b'#' | b'[' | b'\'' | b'"' | b'*'));
        if !names_follow {
            break;
        }
        match &source[k..word_end] {
            "declare" | "abstract" => return Ok(erase_whole(source, start)),
            word if TS_MODIFIERS.contains(&word) => text.push_str(&comment_out(&source[k..next])),
            "static" | "accessor" => text.push_str(&source[k..next]),
            // get, set, async
            _ => return Ok(Member::Stop(text, k)),
        }
        k = next;
    }

    let name_end = match bytes.get(k) {
        Some(b'#') => scan_ident(bytes, k + 1),
        Some(b'\'' | b'"') => literal_at(bytes, k).map_or(k, |lit| lit.span.end),
        Some(b'[') if is_index_signature(bytes, k) => return Ok(erase_whole(source, start)),
        Some(b'[') => {
            let close = find_delimiter(bytes, k + 1, Brackets::Value, b"");
            if bytes.get(close) == Some(&b']') {
                close + 1
            } else {
                k
            }
        }
        _ => scan_ident(bytes, k),
    };
    if name_end <= k + usize::from(bytes[k] == b'#') || &source[k..name_end] == "constructor" {
        return Ok(Member::Stop(text, k));
    }

    let after_name = skip_trivia(bytes, name_end);
    let (marker, after_marker) =
        if matches!(bytes.get(after_name), Some(b'?' | b'!')) && bytes.get(after_name + 1) != Some(&b'=') {
            (Some(after_name), skip_trivia(bytes, after_name + 1))
        } else {
            (None, after_name)
        };
    if matches!(bytes.get(after_marker), Some(b'(' | b'<' | b'{')) {
        return Ok(Member::Stop(text, k));
    }

    text.push_str(&source[k..name_end]);
    let mut end = name_end;
    if bytes.get(after_marker) == Some(&b':') {
        let erase_from = marker.unwrap_or(after_marker);
        let type_start = after_marker + 1;
        let stop = find_delimiter_by(bytes, type_start, Brackets::Type, |bytes, i| match bytes[i] {
            b';' => true,
            b'=' => !is_compound_eq(bytes, i),
            b'\n' => line_break_ends(bytes, type_start, i),
            _ => false,
        });
        let type_end = trim_end(bytes, erase_from, stop);
        text.push_str(&source[name_end..erase_from]);
        text.push_str(&comment_out(&source[erase_from..type_end]));
        end = type_end;
    } else if let Some(m) = marker {
        text.push_str(&source[name_end..m]);
        text.push_str(&comment_out(&source[m..m + 1]));
        end = m + 1;
    }

    let eq = skip_trivia(bytes, end);
    if bytes.get(eq) == Some(&b'=') && !is_compound_eq(bytes, eq) {
        let init_start = eq + 1;
        let stop = find_delimiter_by(bytes, init_start, Brackets::Value, |bytes, i| match bytes[i] {
            b';' => true,
            b'\n' => line_break_ends(bytes, init_start, i),
            _ => false,
        });
        let init_end = trim_end(bytes, init_start, stop);
        text.push_str(&source[end..init_start]);
        text.push_str(&dispatch::run(&source[init_start..init_end], syntax)?);
        end = init_end;
    }

    Ok(Member::Field(text, end))
}

/// `[name: Key]: Value`
fn is_index_signature(bytes: &[u8], open: usize) -> bool {
    let name = skip_space(bytes, open + 1);
    let name_end = scan_ident(bytes, name);
    name_end > name && bytes.get(skip_space(bytes, name_end)) == Some(&b':')
}

/// A member with no runtime counterpart, through its `;` or the line break
/// ending it.
fn erase_whole(source: &str, start: usize) -> Member {
    let bytes = source.as_bytes();
    let stop = find_delimiter_by(bytes, start, Brackets::Type, |bytes, i| match bytes[i] {
        b';' => true,
        b'\n' => line_break_ends(bytes, start, i),
        _ => false,
    });
    let end = if bytes.get(stop) == Some(&b';') {
        stop + 1
    } else {
        trim_end(bytes, start, stop)
    };
    Member::Field(comment_out(&source[start..end]), end)
}
