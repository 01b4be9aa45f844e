//! `name: Type` annotations on variables and parameters.
//!
//! A colon is an annotation when it follows a name (or a destructuring
//! pattern) that is declared by `var`/`let`/`const` or that sits directly in
//! a parenthesised list. Anything else (object literals, ternaries, labels,
//! `case x:`) is left alone.

use ts_syntax::ConstructKind;

use super::delimiter::{find_delimiter_by, Brackets};
use super::dispatch::{HandlerResult, Match};
use super::util::{
    comment_out, comment_start, enclosing_open, ident_before, is_compound_eq, is_ident_byte, line_break_ends,
    prev_non_space, scan_ident, skip_inline_space, skip_space, trim_end, word_before,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// Declared by `var`, `let` or `const`. A line break can end the type.
    Variable,
    /// Inside `( ... )`.
    Parameter,
}

pub(super) fn detect(bytes: &[u8], from: usize, limit: usize) -> Option<Match> {
    (from..limit)
        .filter(|&i| is_single_colon(bytes, i))
        .find_map(|colon| {
            let (start, _) = annotation_at(bytes, colon)?;
            (start >= from).then_some(Match {
                kind: ConstructKind::AnnotatedDeclaration,
                start,
                end: colon + 1,
            })
        })
}

fn is_single_colon(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b':' && bytes.get(i + 1) != Some(&b':') && (i == 0 || bytes[i - 1] != b':')
}

/// Start of the erased text (the `?`/`!` marker or the colon) and the
/// declaration context, when the colon at `colon` is an annotation.
fn annotation_at(bytes: &[u8], colon: usize) -> Option<(usize, Context)> {
    let mut start = colon;
    let mut p = prev_non_space(bytes, colon)?;
    if matches!(bytes[p], b'?' | b'!') {
        start = p;
        p = prev_non_space(bytes, p)?;
    }

    let name_start = match bytes[p] {
        b'}' | b']' => enclosing_open(bytes, p)?,
        _ => {
            let s = ident_before(bytes, p + 1);
            if s == p + 1 {
                return None;
            }
            s
        }
    };
    let mut before = name_start;
    if before >= 3 && &bytes[before - 3..before] == b"..." {
        before -= 3;
    }

    let prev = prev_non_space(bytes, before)?;
    match bytes[prev] {
        b'(' => Some((start, Context::Parameter)),
        b',' => match enclosing_open(bytes, prev) {
            Some(open) if bytes[open] == b'(' => Some((start, Context::Parameter)),
            _ => in_declarator_list(bytes, prev).then_some((start, Context::Variable)),
        },
        _ => matches!(word_before(bytes, prev + 1), b"var" | b"let" | b"const")
            .then_some((start, Context::Variable)),
    }
}

/// Whether the comma at `comma` separates the declarators of a `var`, `let`
/// or `const` statement. Walks back over the earlier declarators without
/// leaving the current bracket level or statement.
fn in_declarator_list(bytes: &[u8], comma: usize) -> bool {
    let mut depth = 0i32;
    let mut k = comma;
    while k > 0 {
        k -= 1;
        match bytes[k] {
            b'/' if k > 0 && bytes[k - 1] == b'*' => match comment_start(bytes, k - 1) {
                Some(start) => k = start,
                None => return false,
            },
            b')' | b']' | b'}' => depth += 1,
            b'(' | b'[' | b'{' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            b';' if depth == 0 => return false,
            b if depth == 0 && is_ident_byte(b) => {
                let mut word = k;
                while word > 0 && is_ident_byte(bytes[word - 1]) {
                    word -= 1;
                }
                if matches!(&bytes[word..=k], b"var" | b"let" | b"const") {
                    return word == 0 || bytes[word - 1] != b'.';
                }
                k = word;
            }
            _ => {}
        }
    }
    false
}

/// Erase the annotation, then keep going through a comma-separated list
/// while each following item is another annotated name.
pub(super) fn handle(source: &str, found: Match) -> HandlerResult {
    let bytes = source.as_bytes();
    let mut colon = found.end - 1;
    let context = annotation_at(bytes, colon).map_or(Context::Parameter, |(_, c)| c);

    let mut text = String::new();
    let mut copied = found.start;
    let mut erase_from = found.start;
    loop {
        let type_start = colon + 1;
        let stop = find_delimiter_by(bytes, type_start, Brackets::Type, |bytes, i| match bytes[i] {
            b',' | b';' => true,
            b'=' => !is_compound_eq(bytes, i),
            b'\n' => context == Context::Variable && line_break_ends(bytes, type_start, i),
            _ => false,
        });
        let end = trim_end(bytes, erase_from, stop);
        text.push_str(&source[copied..erase_from]);
        text.push_str(&comment_out(&source[erase_from..end]));
        copied = end;

        if bytes.get(stop) != Some(&b',') {
            break;
        }
        match next_annotated_item(bytes, stop + 1) {
            Some((marker, next_colon)) => {
                erase_from = marker;
                colon = next_colon;
            }
            None => break,
        }
    }

    HandlerResult {
        text,
        consumed_end: copied,
    }
}

/// `[...]name [?]:` right after a list comma.
fn next_annotated_item(bytes: &[u8], i: usize) -> Option<(usize, usize)> {
    let mut j = skip_space(bytes, i);
    if bytes[j..].starts_with(b"...") {
        j += 3;
    }
    let name_end = scan_ident(bytes, j);
    if name_end == j {
        return None;
    }
    let marker = skip_inline_space(bytes, name_end);
    let colon = if bytes.get(marker) == Some(&b'?') {
        skip_inline_space(bytes, marker + 1)
    } else {
        marker
    };
    (bytes.get(colon) == Some(&b':') && is_single_colon(bytes, colon)).then_some((marker, colon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn erase(src: &str) -> String {
        let found = detect(src.as_bytes(), 0, src.len()).expect("annotation");
        let result = handle(src, found);
        format!("{}{}{}", &src[..found.start], result.text, &src[result.consumed_end..])
    }

    #[test]
    fn variable_annotation() {
        assert_eq!(
            erase("const diffMap: StringMap<Partial<Diff<T>>> = {};"),
            "const diffMap/*: StringMap<Partial<Diff<T>>>*/ = {};"
        );
        assert_eq!(erase("let count: number;"), "let count/*: number*/;");
    }

    #[test]
    fn variable_annotation_ends_at_line_break() {
        assert_eq!(erase("let a: string\nrun();"), "let a/*: string*/\nrun();");
    }

    #[test]
    fn later_declarator_without_earlier_annotation() {
        assert_eq!(erase("let a = 1, b: number = 2;"), "let a = 1, b/*: number*/ = 2;");
        assert_eq!(
            erase("const x = f(1, 2),\n  y: string = 's';"),
            "const x = f(1, 2),\n  y/*: string*/ = 's';"
        );
        assert_eq!(
            erase("function g() {\n  var m = {}, n: Set<T>;\n}"),
            "function g() {\n  var m = {}, n/*: Set<T>*/;\n}"
        );
    }

    #[test]
    fn parameter_list_continues_across_commas() {
        assert_eq!(
            erase("(onRender: RenderFunction<A>, options: ComponentOptions= {})"),
            "(onRender/*: RenderFunction<A>*/, options/*: ComponentOptions*/= {})"
        );
        assert_eq!(
            erase("f(a: number, b?: string, ...rest: T[]) {}"),
            "f(a/*: number*/, b/*?: string*/, ...rest/*: T[]*/) {}"
        );
    }

    #[test]
    fn function_typed_parameter() {
        assert_eq!(
            erase("(N: number, map: (v: undefined, i: number) => T)"),
            "(N/*: number*/, map/*: (v: undefined, i: number) => T*/)"
        );
    }

    #[test]
    fn destructured_parameter() {
        assert_eq!(
            erase("function f({ a, b }: Props) {}"),
            "function f({ a, b }/*: Props*/) {}"
        );
    }

    #[test]
    fn not_annotations() {
        for src in [
            "const o = { a: 1 };",
            "x = c ? a : b;",
            "f(c ? a : b);",
            "switch (x) { case a: break; }",
            "label: for (;;) {}",
            "f({ a: 1 }, { b: 2 });",
            "a::b",
            "let o = { a: 1, b: 2 };",
            "x.let = 1, b: 2",
        ] {
            assert_eq!(detect(src.as_bytes(), 0, src.len()), None, "{src}");
        }
    }
}
