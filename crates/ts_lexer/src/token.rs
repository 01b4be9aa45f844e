//! Character-group tokenizer.
//!
//! Every byte belongs to a [`CharGroup`]. Runs of the same group form one
//! token, except brackets and separators which are always single-byte
//! tokens. Spaces and tabs only separate tokens; newlines are kept since
//! they can end statements. Literals come from [`crate::literal`] and are
//! always a single token.

use serde::Serialize;
use ts_syntax::Span;

use crate::literal::{literal_at, LiteralKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bracket {
    Round,
    Square,
    Curly,
    Angle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CharGroup {
    Whitespace,
    Newline,
    Quote,
    Operator,
    Separator,
    Open(Bracket),
    Close(Bracket),
    /// Identifiers, numbers, member chains (`arr.length`) and anything else.
    Word,
}

pub fn char_group(b: u8) -> CharGroup {
    match b {
        b' ' | b'\t' => CharGroup::Whitespace,
        b'\r' | b'\n' => CharGroup::Newline,
        b'\'' | b'"' | b'`' => CharGroup::Quote,
        b'+' | b'-' | b'*' | b'/' | b'%' | b'&' | b'|' | b'!' | b'^' | b'~' => CharGroup::Operator,
        b'?' | b':' | b'=' | b',' | b';' => CharGroup::Separator,
        b'(' => CharGroup::Open(Bracket::Round),
        b'[' => CharGroup::Open(Bracket::Square),
        b'{' => CharGroup::Open(Bracket::Curly),
        b'<' => CharGroup::Open(Bracket::Angle),
        b')' => CharGroup::Close(Bracket::Round),
        b']' => CharGroup::Close(Bracket::Square),
        b'}' => CharGroup::Close(Bracket::Curly),
        b'>' => CharGroup::Close(Bracket::Angle),
        _ => CharGroup::Word,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Newline,
    Word,
    Operator,
    Separator,
    Open(Bracket),
    Close(Bracket),
    Literal(LiteralKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

/// Split `source` into tokens.
pub fn tokenize(source: &str) -> Vec<Token> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if let Some(lit) = literal_at(bytes, i) {
            tokens.push(Token {
                kind: TokenKind::Literal(lit.kind),
                span: lit.span,
                text: lit.span.slice(source).to_string(),
            });
            i = lit.span.end;
            continue;
        }

        let group = char_group(bytes[i]);
        let start = i;
        i += 1;

        let kind = match group {
            CharGroup::Whitespace => continue,
            CharGroup::Open(b) => TokenKind::Open(b),
            CharGroup::Close(b) => TokenKind::Close(b),
            // Quotes always open a literal, so this only covers a stray byte.
            CharGroup::Separator | CharGroup::Quote => TokenKind::Separator,
            CharGroup::Newline | CharGroup::Operator | CharGroup::Word => {
                while i < bytes.len()
                    && char_group(bytes[i]) == group
                    && literal_at(bytes, i).is_none()
                {
                    i += 1;
                }
                match group {
                    CharGroup::Newline => TokenKind::Newline,
                    CharGroup::Operator => TokenKind::Operator,
                    _ => TokenKind::Word,
                }
            }
        };

        tokens.push(Token {
            kind,
            span: Span::new(start, i),
            text: source[start..i].to_string(),
        });
    }

    tokens
}

/// Index of the token closing the bracket group opened at `open`, or
/// `tokens.len()` when the group never closes.
///
/// The `>` of an arrow (`=` directly followed by `>`) does not close a group.
pub fn find_bracket_end(tokens: &[Token], open: usize) -> usize {
    let mut depth = 0i32;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::Open(_) => depth += 1,
            TokenKind::Close(Bracket::Angle) if is_arrow_head(tokens, idx) => {}
            TokenKind::Close(_) => {
                depth -= 1;
                if depth <= 0 {
                    return idx;
                }
            }
            _ => {}
        }
    }
    tokens.len()
}

fn is_arrow_head(tokens: &[Token], idx: usize) -> bool {
    idx > 0 && {
        let prev = &tokens[idx - 1];
        prev.text == "=" && prev.span.end == tokens[idx].span.start
    }
}
