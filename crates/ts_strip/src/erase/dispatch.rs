//! The rule dispatcher.
//!
//! Every rule pairs a detector with a handler. Each round asks all enabled
//! detectors for their earliest match at or after the scan cursor, hands
//! the earliest one to its handler and splices the handler's text over
//! `[match.start, consumed_end)`. The cursor then moves to the end of the
//! inserted text, so replacement text is never scanned again.
//!
//! Literal rules are registered first. A comment, string, template or regex
//! that starts where a type rule would also match wins the tie, and once a
//! literal is copied through the cursor is past it, so type rules never see
//! its contents.

use thiserror::Error;
use tracing::{debug, trace, warn};
use ts_lexer::{find_literal, literal_at, LiteralKind};
use ts_syntax::{ConstructKind, StripSyntax};

use super::{alias, annotation, cast, class_body, declaration, generic, return_type};

/// Rule registration order. Ties on the start offset go to the earlier entry.
pub const PRIORITY: [ConstructKind; 13] = [
    ConstructKind::SingleLineComment,
    ConstructKind::MultiLineComment,
    ConstructKind::StringLiteral,
    ConstructKind::TemplateLiteral,
    ConstructKind::RegexLiteral,
    ConstructKind::AmbientDeclaration,
    ConstructKind::TypeAliasStatement,
    ConstructKind::InterfaceDeclaration,
    ConstructKind::ClassMemberBlock,
    ConstructKind::GenericArgumentList,
    ConstructKind::FunctionReturnType,
    ConstructKind::AnnotatedDeclaration,
    ConstructKind::CastExpression,
];

/// A detector hit. `end` is the end of the triggering text, not of the
/// construct: handlers decide how far the construct really goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub kind: ConstructKind,
    pub start: usize,
    pub end: usize,
}

/// Replacement for `[match.start, consumed_end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResult {
    pub text: String,
    pub consumed_end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StripError {
    /// A handler result would leave the cursor where it was, which would
    /// loop forever.
    #[error("{kind} handler at byte {offset} made no progress")]
    NoProgress { kind: ConstructKind, offset: usize },
}

pub(super) fn run(source: &str, syntax: &StripSyntax) -> Result<String, StripError> {
    let mut buffer = source.to_string();
    let mut cursor = 0;

    while let Some(found) = next_match(buffer.as_bytes(), cursor, syntax) {
        let result = handle(&buffer, found, syntax)?;
        let next = advance(cursor, found, &result, buffer.len())?;

        if buffer[found.start..result.consumed_end] == result.text {
            trace!(kind = %found.kind, start = found.start, end = result.consumed_end, "kept");
        } else {
            debug!(
                kind = %found.kind,
                start = found.start,
                end = result.consumed_end,
                text = %result.text,
                "erased"
            );
            buffer.replace_range(found.start..result.consumed_end, &result.text);
        }
        cursor = next;
    }

    Ok(buffer)
}

/// Cursor position after splicing `result` over `found`. A result that
/// reaches outside the buffer, ends before its match, or would leave the
/// cursor where it was is rejected.
fn advance(cursor: usize, found: Match, result: &HandlerResult, len: usize) -> Result<usize, StripError> {
    let next = found.start + result.text.len();
    if result.consumed_end < found.start || result.consumed_end > len || next <= cursor {
        return Err(StripError::NoProgress {
            kind: found.kind,
            offset: found.start,
        });
    }
    Ok(next)
}

/// Earliest match at or after `cursor` across all enabled rules.
pub(super) fn next_match(bytes: &[u8], cursor: usize, syntax: &StripSyntax) -> Option<Match> {
    let mut best: Option<Match> = None;
    for kind in PRIORITY {
        if !syntax.enables(kind) {
            continue;
        }
        // Only a strictly earlier start can beat the current best.
        let limit = best.map_or(bytes.len(), |m| m.start);
        if let Some(found) = detect(kind, bytes, cursor, limit) {
            best = Some(found);
        }
    }
    best
}

/// Run the detector for `kind` over starts in `[from, limit)`.
fn detect(kind: ConstructKind, bytes: &[u8], from: usize, limit: usize) -> Option<Match> {
    if from >= limit {
        return None;
    }
    if let Some(literal) = LiteralKind::from_construct(kind) {
        return find_literal(bytes, from, limit, literal).map(|lit| Match {
            kind,
            start: lit.span.start,
            end: lit.span.end,
        });
    }
    match kind {
        ConstructKind::AmbientDeclaration => declaration::detect_ambient(bytes, from, limit),
        ConstructKind::TypeAliasStatement => alias::detect(bytes, from, limit),
        ConstructKind::InterfaceDeclaration => declaration::detect_interface(bytes, from, limit),
        ConstructKind::ClassMemberBlock => class_body::detect(bytes, from, limit),
        ConstructKind::GenericArgumentList => generic::detect(bytes, from, limit),
        ConstructKind::FunctionReturnType => return_type::detect(bytes, from, limit),
        ConstructKind::AnnotatedDeclaration => annotation::detect(bytes, from, limit),
        ConstructKind::CastExpression => cast::detect(bytes, from, limit),
        _ => None,
    }
}

fn handle(source: &str, found: Match, syntax: &StripSyntax) -> Result<HandlerResult, StripError> {
    let result = match found.kind {
        ConstructKind::AmbientDeclaration => declaration::handle_ambient(source, found),
        ConstructKind::TypeAliasStatement => alias::handle(source, found),
        ConstructKind::InterfaceDeclaration => declaration::handle_interface(source, found),
        ConstructKind::ClassMemberBlock => class_body::handle(source, found, syntax)?,
        ConstructKind::GenericArgumentList => generic::handle(source, found),
        ConstructKind::FunctionReturnType => return_type::handle(source, found),
        ConstructKind::AnnotatedDeclaration => annotation::handle(source, found),
        ConstructKind::CastExpression => cast::handle(source, found),
        _ => copy_literal(source, found),
    };
    Ok(result)
}

/// Literals are copied through unchanged.
fn copy_literal(source: &str, found: Match) -> HandlerResult {
    if let Some(lit) = literal_at(source.as_bytes(), found.start) {
        if !lit.terminated {
            warn!(
                kind = %found.kind,
                offset = found.start,
                "unterminated literal runs to the end of the input"
            );
        }
    }
    HandlerResult {
        text: source[found.start..found.end].to_string(),
        consumed_end: found.end,
    }
}
