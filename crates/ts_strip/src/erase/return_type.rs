//! `(...): Type` return annotations on functions, methods and arrows.

use ts_syntax::ConstructKind;

use super::delimiter::{find_delimiter, find_delimiter_by, Brackets};
use super::dispatch::{HandlerResult, Match};
use super::util::{
    comment_out, comment_start, enclosing_open, line_break_ends, prev_code, skip_space, trim_end, word_before,
};

/// Words that take a parenthesised expression which is never a parameter list.
const CONTROL_KEYWORDS: &[&[u8]] = &[b"if", b"while", b"for", b"switch", b"catch", b"with", b"case"];

pub(super) fn detect(bytes: &[u8], from: usize, limit: usize) -> Option<Match> {
    (from..limit)
        .filter(|&i| bytes[i] == b':' && bytes.get(i + 1) != Some(&b':'))
        .find(|&colon| type_end(bytes, colon).is_some())
        .map(|colon| Match {
            kind: ConstructKind::FunctionReturnType,
            start: colon,
            end: colon + 1,
        })
}

/// End of the return type after the colon at `colon`, trimmed, when the
/// colon follows a parameter list and the type runs up to a body `{` or an
/// arrow.
fn type_end(bytes: &[u8], colon: usize) -> Option<usize> {
    let close = trim_end(bytes, 0, colon);
    if close == 0 || bytes[close - 1] != b')' {
        return None;
    }
    let open = enclosing_open(bytes, close - 1)?;
    if bytes[open] != b'(' {
        return None;
    }
    if let Some(p) = prev_code(bytes, open) {
        // `c ? (a) : b`
        if bytes[p] == b'?' || CONTROL_KEYWORDS.contains(&word_before(bytes, p + 1)) {
            return None;
        }
    }
    // `c ? f(a) : b`
    if in_ternary_branch(bytes, open) {
        return None;
    }

    let mut k = skip_space(bytes, colon + 1);
    // Object and function types may hold the stop bytes themselves.
    if let Some(&opened @ (b'{' | b'(')) = bytes.get(k) {
        let group_close = find_delimiter(bytes, k + 1, Brackets::Type, b"");
        if group_close >= bytes.len() {
            return None;
        }
        k = group_close + 1;
        if opened == b'(' {
            let arrow = skip_space(bytes, k);
            if bytes[arrow..].starts_with(b"=>") {
                k = arrow + 2;
            }
        }
    }
    let stop = find_delimiter_by(bytes, k, Brackets::Type, |bytes, i| match bytes[i] {
        b'{' | b';' => true,
        b'=' => bytes.get(i + 1) == Some(&b'>'),
        b'\n' => line_break_ends(bytes, colon + 1, i),
        _ => false,
    });
    if !matches!(bytes.get(stop), Some(b'{' | b'=')) {
        return None;
    }
    let end = trim_end(bytes, colon + 1, stop);
    (end > colon + 1).then_some(end)
}

/// Whether a depth-zero `?` precedes `open` on its line, making the call at
/// `open` the middle branch of a conditional. `?.` and `??` do not count.
fn in_ternary_branch(bytes: &[u8], open: usize) -> bool {
    let mut depth = 0i32;
    let mut k = open;
    while k > 0 {
        k -= 1;
        match bytes[k] {
            b'/' if k > 0 && bytes[k - 1] == b'*' => match comment_start(bytes, k - 1) {
                Some(start) => k = start,
                None => return false,
            },
            b'\n' | b';' if depth == 0 => return false,
            b')' | b']' | b'}' => depth += 1,
            b'(' | b'[' | b'{' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            b'?' if depth == 0 => {
                let chained = matches!(bytes.get(k + 1), Some(b'.' | b'?')) || (k > 0 && bytes[k - 1] == b'?');
                if !chained {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

pub(super) fn handle(source: &str, found: Match) -> HandlerResult {
    let end = type_end(source.as_bytes(), found.start).unwrap_or(found.end);
    HandlerResult {
        text: comment_out(&source[found.start..end]),
        consumed_end: end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn erase(src: &str) -> String {
        let found = detect(src.as_bytes(), 0, src.len()).expect("return type");
        let result = handle(src, found);
        format!("{}{}{}", &src[..found.start], result.text, &src[result.consumed_end..])
    }

    #[test]
    fn function_return_type() {
        assert_eq!(
            erase("function f(a, b): ComponentFunction<A> {}"),
            "function f(a, b)/*: ComponentFunction<A>*/ {}"
        );
    }

    #[test]
    fn arrow_return_type() {
        assert_eq!(
            erase("const f = (a): Promise<void> => a;"),
            "const f = (a)/*: Promise<void>*/ => a;"
        );
    }

    #[test]
    fn object_and_function_return_types() {
        assert_eq!(
            erase("function f(): { a: number; b: string } {}"),
            "function f()/*: { a: number; b: string }*/ {}"
        );
        assert_eq!(
            erase("function f(): (x: number) => void {}"),
            "function f()/*: (x: number) => void*/ {}"
        );
    }

    #[test]
    fn return_type_across_lines() {
        assert_eq!(
            erase("function f():\n  Promise<void> {}"),
            "function f()/*:\n  Promise<void>*/ {}"
        );
        assert_eq!(erase("function f(): Foo\n{}"), "function f()/*: Foo*/\n{}");
        assert_eq!(
            erase("const g = a ?? function (x): T { return x?.y; };"),
            "const g = a ?? function (x)/*: T*/ { return x?.y; };"
        );
    }

    #[test]
    fn method_after_erased_generic() {
        assert_eq!(
            erase("make/*<A>*/(a/*: A*/): B<A> {"),
            "make/*<A>*/(a/*: A*/)/*: B<A>*/ {"
        );
    }

    #[test]
    fn not_return_types() {
        for src in [
            "x = c ? (a) : b;",
            "switch (k) { case (1): { run(); } }",
            "if (a) : b",
            "x = c ? f(a) : {};",
            "f(a): ;",
            "const v = ok ? f(a) : b\nif (v) { run() }\n",
            "const v = ok ? f(a) : b\nfunction next() {}",
            "const v = ok ? f(a) : b\nconst g = () => 1",
            "const w = ok ? f(a) : x ? { a: 1 } : y;",
        ] {
            assert_eq!(detect(src.as_bytes(), 0, src.len()), None, "{src}");
        }
    }
}
