//! Parse erased output as plain ECMAScript.
//!
//! Erasure is heuristic, so this is the way to find out whether a run left
//! any TypeScript behind (or broke the JavaScript around it).

use anyhow::Result;
use swc_common::{comments::SingleThreadedComments, sync::Lrc, FileName, SourceMap, Spanned};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{EsSyntax, Syntax};
use thiserror::Error;
use tracing::debug;

/// The first syntax error found in erased output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}:{column}: {message}")]
pub struct InvalidOutput {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Parse `source` as an ES module.
///
/// Fails with [`InvalidOutput`] (reachable through `downcast_ref`) on the
/// first syntax error, recovered errors included.
pub fn check_javascript(source: &str, filename: &str) -> Result<()> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );
    let comments = SingleThreadedComments::default();

    let syntax = Syntax::Es(EsSyntax {
        jsx: filename.ends_with(".jsx"),
        ..Default::default()
    });

    let mut recovered = vec![];
    let parsed = swc_ecma_parser::parse_file_as_module(
        &source_file,
        syntax,
        EsVersion::latest(),
        Some(&comments),
        &mut recovered,
    );

    let error = match parsed {
        Err(e) => e,
        Ok(module) => match recovered.into_iter().next() {
            Some(e) => e,
            None => {
                debug!(file = filename, items = module.body.len(), "output parses");
                return Ok(());
            }
        },
    };

    let loc = source_map.lookup_char_pos(error.span().lo);
    Err(InvalidOutput {
        file: filename.to_string(),
        line: loc.line,
        column: loc.col_display + 1,
        message: error.kind().msg().into_owned(),
    }
    .into())
}
