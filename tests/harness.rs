//! Golden-file test harness for typestrip.
//!
//! Discovers `.input.ts` files under `tests/fixtures/`, erases their types
//! and compares the result against the matching `.expected.js` file. Every
//! output must also parse as JavaScript.
//!
//! Set `TS_UPDATE_FIXTURES=1` to overwrite expected files with actual output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ts_strip::{check_javascript, strip_types};
use ts_syntax::StripSyntax;
use walkdir::WalkDir;

fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR is crates/ts_test/, the fixtures live at the workspace root.
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
}

fn collect_input_files(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let depth = if recursive { usize::MAX } else { 1 };
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".input.ts"))
        })
        .collect();
    files.sort();
    files
}

fn test_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn run_pipeline(source: &str) -> Result<String> {
    Ok(strip_types(source, &StripSyntax::default())?)
}

#[test]
fn golden_file_tests() {
    let fixtures = fixtures_dir();
    let input_files = collect_input_files(&fixtures, false);

    assert!(
        !input_files.is_empty(),
        "No test fixtures found in {}",
        fixtures.display()
    );

    let update_mode = std::env::var("TS_UPDATE_FIXTURES").is_ok();
    let mut failures = Vec::new();

    for input_path in &input_files {
        let name = test_name(input_path);
        let expected_path = input_path.with_file_name(name.replace(".input.ts", ".expected.js"));

        let result = std::fs::read_to_string(input_path)
            .context("failed to read input")
            .and_then(|source| run_pipeline(&source));
        let actual = match result {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{name}: {e:#}"));
                continue;
            }
        };

        if let Err(e) = check_javascript(&actual, &name.replace(".input.ts", ".js")) {
            failures.push(format!("{name}: output is not valid JavaScript: {e}"));
        }

        if update_mode {
            if let Err(e) = std::fs::write(&expected_path, &actual) {
                failures.push(format!("{name}: failed to write expected: {e}"));
            }
            continue;
        }

        let expected = match std::fs::read_to_string(&expected_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!(
                    "{name}: cannot read expected file {}: {e}",
                    expected_path.display()
                ));
                continue;
            }
        };
        if actual != expected {
            failures.push(format!(
                "{name}: output mismatch\n--- expected ---\n{expected}\n--- actual ---\n{actual}"
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} golden test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}

#[test]
fn roundtrip_tests() {
    let fixtures = fixtures_dir().join("roundtrip");
    let input_files = collect_input_files(&fixtures, true);

    assert!(
        !input_files.is_empty(),
        "No roundtrip fixtures found in {}",
        fixtures.display()
    );

    let mut failures = Vec::new();

    for input_path in &input_files {
        let name = test_name(input_path);

        let source = match std::fs::read_to_string(input_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{name}: failed to read: {e}"));
                continue;
            }
        };

        let output = match run_pipeline(&source) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{name}: erasure failed: {e:#}"));
                continue;
            }
        };

        if output.lines().count() != source.lines().count() {
            failures.push(format!("{name}: line count changed"));
        }

        match run_pipeline(&output) {
            Ok(again) if again == output => {}
            Ok(_) => failures.push(format!("{name}: second run changed the output")),
            Err(e) => failures.push(format!("{name}: second run failed: {e:#}")),
        }

        if let Err(e) = check_javascript(&output, &format!("{name}.js")) {
            failures.push(format!(
                "{name}: output is not valid JavaScript: {e}\n--- output ---\n{}",
                output.trim()
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} roundtrip test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}
