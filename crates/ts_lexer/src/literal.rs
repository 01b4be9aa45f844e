//! Literal classification: comments, quoted strings, template literals and
//! regex literals.
//!
//! All delimiters are ASCII, so the scanners work on bytes and every offset
//! they return is a valid `str` boundary.
//!
//! Known limitations:
//! - Template literals run to the next unescaped backtick. `${...}`
//!   interpolations are not parsed, so a backtick inside an interpolation
//!   ends the literal early.
//! - Regex literals are heuristic. A `/` starts one only when the next byte is
//!   not `/`, `*`, whitespace or a digit, the previous significant byte does
//!   not end an operand (identifier, `)`, `]`), and a closing `/` follows on
//!   the same line. `a/b/c` style division is therefore not mistaken for a
//!   regex, but `if (ok) /re/.test(s)` is missed.

use serde::Serialize;
use ts_syntax::{ConstructKind, Span};

/// Keywords after which a `/` starts an expression, not a division.
const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "case", "do", "else", "in", "of", "new", "delete", "void",
    "throw", "yield", "await",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    LineComment,
    BlockComment,
    String,
    Template,
    Regex,
}

impl LiteralKind {
    pub fn construct_kind(self) -> ConstructKind {
        match self {
            LiteralKind::LineComment => ConstructKind::SingleLineComment,
            LiteralKind::BlockComment => ConstructKind::MultiLineComment,
            LiteralKind::String => ConstructKind::StringLiteral,
            LiteralKind::Template => ConstructKind::TemplateLiteral,
            LiteralKind::Regex => ConstructKind::RegexLiteral,
        }
    }

    pub fn from_construct(kind: ConstructKind) -> Option<Self> {
        match kind {
            ConstructKind::SingleLineComment => Some(LiteralKind::LineComment),
            ConstructKind::MultiLineComment => Some(LiteralKind::BlockComment),
            ConstructKind::StringLiteral => Some(LiteralKind::String),
            ConstructKind::TemplateLiteral => Some(LiteralKind::Template),
            ConstructKind::RegexLiteral => Some(LiteralKind::Regex),
            _ => None,
        }
    }

    /// Whether `b` can open a literal of this kind.
    fn opens_with(self, b: u8) -> bool {
        match self {
            LiteralKind::LineComment | LiteralKind::BlockComment | LiteralKind::Regex => b == b'/',
            LiteralKind::String => b == b'\'' || b == b'"',
            LiteralKind::Template => b == b'`',
        }
    }
}

/// A literal found in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub span: Span,
    /// `false` when the closing delimiter was missing and the literal runs to
    /// the end of the input.
    pub terminated: bool,
}

/// Classify a literal whose opening delimiter is exactly at `i`.
pub fn literal_at(bytes: &[u8], i: usize) -> Option<Literal> {
    match *bytes.get(i)? {
        b'/' => match bytes.get(i + 1) {
            Some(b'/') => Some(line_comment(bytes, i)),
            Some(b'*') => Some(block_comment(bytes, i)),
            _ => regex(bytes, i),
        },
        b'\'' | b'"' => Some(quoted(bytes, i, LiteralKind::String)),
        b'`' => Some(quoted(bytes, i, LiteralKind::Template)),
        _ => None,
    }
}

/// Find the first literal of `kind` starting in `[from, limit)`.
pub fn find_literal(bytes: &[u8], from: usize, limit: usize, kind: LiteralKind) -> Option<Literal> {
    let limit = limit.min(bytes.len());
    (from..limit)
        .filter(|&i| kind.opens_with(bytes[i]))
        .find_map(|i| literal_at(bytes, i).filter(|lit| lit.kind == kind))
}

fn line_comment(bytes: &[u8], i: usize) -> Literal {
    let end = bytes[i..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| i + p);
    Literal {
        kind: LiteralKind::LineComment,
        span: Span::new(i, end),
        terminated: true,
    }
}

fn block_comment(bytes: &[u8], i: usize) -> Literal {
    let mut j = i + 2;
    while j + 1 < bytes.len() {
        if bytes[j] == b'*' && bytes[j + 1] == b'/' {
            return Literal {
                kind: LiteralKind::BlockComment,
                span: Span::new(i, j + 2),
                terminated: true,
            };
        }
        j += 1;
    }
    Literal {
        kind: LiteralKind::BlockComment,
        span: Span::new(i, bytes.len()),
        terminated: false,
    }
}

/// Strings and template literals: run to the next unescaped copy of the
/// opening delimiter.
fn quoted(bytes: &[u8], i: usize, kind: LiteralKind) -> Literal {
    let quote = bytes[i];
    let mut j = i + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b if b == quote => {
                return Literal {
                    kind,
                    span: Span::new(i, j + 1),
                    terminated: true,
                };
            }
            _ => j += 1,
        }
    }
    Literal {
        kind,
        span: Span::new(i, bytes.len()),
        terminated: false,
    }
}

fn regex(bytes: &[u8], i: usize) -> Option<Literal> {
    let first = *bytes.get(i + 1)?;
    if first.is_ascii_whitespace() || first.is_ascii_digit() || first == b'/' || first == b'*' {
        return None;
    }
    if ends_operand(bytes, i) {
        return None;
    }

    let mut j = i + 1;
    let mut in_class = false;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => {
                j += 2;
                continue;
            }
            b'\n' | b'\r' => return None,
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => {
                j += 1;
                while j < bytes.len() && bytes[j].is_ascii_alphabetic() {
                    j += 1;
                }
                return Some(Literal {
                    kind: LiteralKind::Regex,
                    span: Span::new(i, j),
                    terminated: true,
                });
            }
            _ => {}
        }
        j += 1;
    }
    None
}

/// Whether the code before `i` ends an operand, which makes a `/` at `i` a
/// division operator.
fn ends_operand(bytes: &[u8], i: usize) -> bool {
    let Some(prev) = bytes[..i].iter().rposition(|b| !b.is_ascii_whitespace()) else {
        return false;
    };
    match bytes[prev] {
        b')' | b']' => true,
        b if is_word_byte(b) => {
            let start = bytes[..=prev]
                .iter()
                .rposition(|&b| !is_word_byte(b))
                .map_or(0, |p| p + 1);
            let word = std::str::from_utf8(&bytes[start..=prev]).unwrap_or_default();
            !REGEX_PREFIX_KEYWORDS.contains(&word)
        }
        _ => false,
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}
