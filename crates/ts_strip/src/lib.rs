//! Type erasure for TypeScript source.
//!
//! Rewrites TypeScript into JavaScript by turning type syntax into block
//! comments, so the output keeps every line and column of the input:
//!
//! - Type aliases, interfaces and `declare` statements
//! - Annotations on variables, parameters and return types
//! - Generic parameter and argument lists
//! - `as` casts
//! - Class field annotations and TypeScript-only modifiers
//!
//! This is a text-level pass, not a parser. [`check_javascript`] parses the
//! result with SWC to catch anything the heuristics got wrong.

pub mod check;
pub mod erase;

pub use check::{check_javascript, InvalidOutput};
pub use erase::{strip_types, StripError};
