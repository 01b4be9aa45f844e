//! Shared vocabulary for typestrip.
//!
//! - Byte spans over the source text
//! - The kinds of construct the eraser recognises (literals and type syntax)
//! - Feature flags selecting which type constructs get erased

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is past end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The text covered by this span.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Everything the eraser can match in the source.
///
/// The first five kinds are literals: they are copied through verbatim so
/// their contents never trigger a type rule. The rest are typed constructs
/// that get turned into block comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstructKind {
    SingleLineComment,
    MultiLineComment,
    StringLiteral,
    TemplateLiteral,
    RegexLiteral,
    /// `declare ...` statements.
    AmbientDeclaration,
    /// `type Name = ...` statements.
    TypeAliasStatement,
    /// `interface Name { ... }` declarations.
    InterfaceDeclaration,
    /// Field annotations at the top of a class body.
    ClassMemberBlock,
    /// `<...>` on declarations and calls.
    GenericArgumentList,
    /// `): Type` before a function body.
    FunctionReturnType,
    /// `name: Type` in declarations and parameter lists.
    AnnotatedDeclaration,
    /// `expr as Type`.
    CastExpression,
}

impl ConstructKind {
    /// Literal kinds are never erased and cannot be switched off.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            ConstructKind::SingleLineComment
                | ConstructKind::MultiLineComment
                | ConstructKind::StringLiteral
                | ConstructKind::TemplateLiteral
                | ConstructKind::RegexLiteral
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ConstructKind::SingleLineComment => "single-line comment",
            ConstructKind::MultiLineComment => "multi-line comment",
            ConstructKind::StringLiteral => "string literal",
            ConstructKind::TemplateLiteral => "template literal",
            ConstructKind::RegexLiteral => "regex literal",
            ConstructKind::AmbientDeclaration => "ambient declaration",
            ConstructKind::TypeAliasStatement => "type alias",
            ConstructKind::InterfaceDeclaration => "interface declaration",
            ConstructKind::ClassMemberBlock => "class member block",
            ConstructKind::GenericArgumentList => "generic argument list",
            ConstructKind::FunctionReturnType => "function return type",
            ConstructKind::AnnotatedDeclaration => "annotated declaration",
            ConstructKind::CastExpression => "cast expression",
        }
    }
}

impl std::fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Feature flags controlling which type constructs are erased.
///
/// Missing keys in a config file fall back to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StripSyntax {
    pub type_aliases: bool,
    pub interfaces: bool,
    pub ambient: bool,
    pub casts: bool,
    pub annotations: bool,
    pub return_types: bool,
    pub generics: bool,
    pub class_members: bool,
}

impl StripSyntax {
    /// Whether rules of `kind` take part in a run.
    pub fn enables(&self, kind: ConstructKind) -> bool {
        match kind {
            ConstructKind::AmbientDeclaration => self.ambient,
            ConstructKind::TypeAliasStatement => self.type_aliases,
            ConstructKind::InterfaceDeclaration => self.interfaces,
            ConstructKind::ClassMemberBlock => self.class_members,
            ConstructKind::GenericArgumentList => self.generics,
            ConstructKind::FunctionReturnType => self.return_types,
            ConstructKind::AnnotatedDeclaration => self.annotations,
            ConstructKind::CastExpression => self.casts,
            _ => true,
        }
    }
}

impl Default for StripSyntax {
    fn default() -> Self {
        Self {
            type_aliases: true,
            interfaces: true,
            ambient: true,
            casts: true,
            annotations: true,
            return_types: true,
            generics: true,
            class_members: true,
        }
    }
}
