//! Lexical layer for typestrip.
//!
//! Two pieces share the same literal rules:
//!
//! - [`literal`] recognises comments, strings, template literals and regex
//!   literals at a byte offset. The eraser uses it to keep type rules from
//!   firing inside non-code text.
//! - [`token`] groups the rest of the source by character class into a flat
//!   token stream (brackets, separators, operators, words, newlines).

pub mod literal;
pub mod token;

pub use literal::{find_literal, literal_at, Literal, LiteralKind};
pub use token::{char_group, find_bracket_end, tokenize, Bracket, CharGroup, Token, TokenKind};
