//! Shared byte-level helpers for the construct rules.
//!
//! Every delimiter the eraser looks at is ASCII, so offsets produced here are
//! always valid `str` boundaries.

use ts_lexer::{literal_at, LiteralKind};

pub(super) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

pub(super) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

/// Skip spaces and tabs.
pub(super) fn skip_inline_space(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && matches!(bytes[i], b' ' | b'\t') {
        i += 1;
    }
    i
}

/// Skip all whitespace, line breaks included.
pub(super) fn skip_space(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Skip whitespace and comments.
pub(super) fn skip_trivia(bytes: &[u8], mut i: usize) -> usize {
    loop {
        i = skip_space(bytes, i);
        match literal_at(bytes, i) {
            Some(lit) if matches!(lit.kind, LiteralKind::LineComment | LiteralKind::BlockComment) => {
                i = lit.span.end;
            }
            _ => return i,
        }
    }
}

/// End of the identifier starting at `i`; `i` itself when there is none.
pub(super) fn scan_ident(bytes: &[u8], mut i: usize) -> usize {
    if i >= bytes.len() || !is_ident_start(bytes[i]) {
        return i;
    }
    while i < bytes.len() && is_ident_byte(bytes[i]) {
        i += 1;
    }
    i
}

/// Start of the identifier that ends right before `end`; `end` when there is none.
pub(super) fn ident_before(bytes: &[u8], end: usize) -> usize {
    let mut start = end;
    while start > 0 && is_ident_byte(bytes[start - 1]) {
        start -= 1;
    }
    // Numbers are not names.
    while start < end && !is_ident_start(bytes[start]) {
        start += 1;
    }
    start
}

/// Whether `word` sits at `i` as a whole word that is not a property access.
pub(super) fn keyword_at(bytes: &[u8], i: usize, word: &str) -> bool {
    let end = i + word.len();
    bytes.get(i..end) == Some(word.as_bytes())
        && (i == 0 || !(is_ident_byte(bytes[i - 1]) || bytes[i - 1] == b'.'))
        && !bytes.get(end).is_some_and(|&b| is_ident_byte(b))
}

/// The word ending right before `end`, if any.
pub(super) fn word_before(bytes: &[u8], end: usize) -> &[u8] {
    &bytes[ident_before(bytes, end)..end]
}

/// Index of the last non-whitespace byte before `i`.
pub(super) fn prev_non_space(bytes: &[u8], i: usize) -> Option<usize> {
    bytes[..i].iter().rposition(|b| !b.is_ascii_whitespace())
}

/// Index of the last byte before `i` that is neither whitespace nor part of a
/// block comment.
pub(super) fn prev_code(bytes: &[u8], i: usize) -> Option<usize> {
    let mut k = i;
    loop {
        let p = prev_non_space(bytes, k)?;
        if bytes[p] == b'/' && p > 0 && bytes[p - 1] == b'*' {
            k = comment_start(bytes, p - 1)?;
            continue;
        }
        return Some(p);
    }
}

/// Opening `/*` of the block comment whose closing `*` is at `star`.
pub(super) fn comment_start(bytes: &[u8], star: usize) -> Option<usize> {
    (0..star)
        .rev()
        .find(|&p| bytes[p] == b'/' && bytes[p + 1] == b'*')
}

/// `end` moved back over trailing whitespace, never before `start`.
pub(super) fn trim_end(bytes: &[u8], start: usize, mut end: usize) -> usize {
    while end > start && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    end
}

/// Wrap erased text in a block comment. A `*/` inside the text would close
/// the comment early, so it is broken up.
pub(super) fn comment_out(text: &str) -> String {
    format!("/*{}*/", text.replace("*/", "* /"))
}

/// Whether a statement can begin at `i`: start of input, start of a line, or
/// right after `;`, `{`, `}` or a block comment.
pub(super) fn at_statement_start(bytes: &[u8], i: usize) -> bool {
    let mut k = i;
    while k > 0 && matches!(bytes[k - 1], b' ' | b'\t') {
        k -= 1;
    }
    if k == 0 {
        return true;
    }
    match bytes[k - 1] {
        b'\n' | b'\r' | b';' | b'{' | b'}' => true,
        b'/' => k >= 2 && bytes[k - 2] == b'*',
        _ => false,
    }
}

/// Unmatched opening bracket before `i`, scanning backwards through the
/// current statement. Block comments are skipped; a depth-zero `;` ends the
/// search.
pub(super) fn enclosing_open(bytes: &[u8], i: usize) -> Option<usize> {
    let mut depth = 0i32;
    let mut k = i;
    while k > 0 {
        k -= 1;
        match bytes[k] {
            b'/' if k > 0 && bytes[k - 1] == b'*' => k = comment_start(bytes, k - 1)?,
            b')' | b']' | b'}' => depth += 1,
            b'(' | b'[' | b'{' => {
                if depth == 0 {
                    return Some(k);
                }
                depth -= 1;
            }
            b';' if depth == 0 => return None,
            _ => {}
        }
    }
    None
}

/// Whether a `=` at `i` belongs to `=>`, `==`, `!=`, `<=` or `>=`.
pub(super) fn is_compound_eq(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'='
        && (matches!(bytes.get(i + 1), Some(b'=' | b'>'))
            || (i > 0 && matches!(bytes[i - 1], b'=' | b'!' | b'<' | b'>')))
}

/// Whether the line break at `nl` ends the type or expression that began at
/// `start`.
///
/// It does unless the text so far is empty or ends with an operator, or the
/// next line carries on with something other than a name, `(`, `[`, `}`, a
/// comment or a blank line.
pub(super) fn line_break_ends(bytes: &[u8], start: usize, nl: usize) -> bool {
    let Some(last) = bytes[start..nl]
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map(|p| start + p)
    else {
        return false;
    };
    match bytes[last] {
        b'|' | b'&' | b',' | b':' | b'?' | b'=' | b'(' | b'[' | b'{' | b'<' | b'+' | b'-'
        | b'*' | b'/' | b'%' | b'.' => return false,
        b'>' if last > 0 && bytes[last - 1] == b'=' => return false,
        _ => {}
    }
    let next = skip_inline_space(bytes, nl + 1);
    match bytes.get(next) {
        None => true,
        Some(&b) => {
            matches!(b, b'\n' | b'\r' | b'(' | b'[' | b'}' | b'/' | b'#' | b'@') || is_ident_start(b)
        }
    }
}
