//! Source transform applied to every synced `.ts` file.

use std::sync::LazyLock;

use regex::Regex;

const HEADER_FIRST_LINE: &str = "// This file is auto-generated from ";
const HEADER_SECOND_LINE: &str = "// Do not edit manually - changes will be overwritten";

static RELATIVE_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(from\s*)(['"])((?:\.\./)+)([^'"]*)(['"])"#).expect("valid regex")
});

/// Header prepended to every generated file.
pub fn generated_header(file_name: &str) -> String {
    format!(
        "{}{}\n{}\n\n",
        HEADER_FIRST_LINE, file_name, HEADER_SECOND_LINE
    )
}

/// Turns an application source file into a declaration-only file for this package.
///
/// Function, method and assigned-arrow bodies become `;`, leading `../` runs in
/// relative import specifiers collapse to `./`, and the generated-file header is
/// prepended (replacing one already present).
pub fn transform_type_source(content: &str, file_name: &str) -> String {
    let body = strip_generated_header(content);
    let stripped = strip_function_bodies(body);
    let rewritten = rewrite_relative_imports(&stripped);
    let mut out = generated_header(file_name);
    out.push_str(&rewritten);
    out
}

fn strip_generated_header(content: &str) -> &str {
    let Some(rest) = content.strip_prefix(HEADER_FIRST_LINE) else {
        return content;
    };
    let Some((_, rest)) = rest.split_once('\n') else {
        return content;
    };
    match rest.strip_prefix(HEADER_SECOND_LINE) {
        Some(rest) => rest.trim_start_matches(['\r', '\n']),
        None => content,
    }
}

/// `'../../config'` becomes `'./config'`. Specifiers already starting with `./` and
/// package imports are left alone.
pub fn rewrite_relative_imports(content: &str) -> String {
    RELATIVE_IMPORT
        .replace_all(content, "${1}${2}./${4}${5}")
        .into_owned()
}

/// Replaces every function-like block body with `;`.
///
/// A `{` opens a body when the statement text before it ends with a parameter list
/// (optionally followed by `: ReturnType`), or with `=>` in an assignment. Strings,
/// template literals and comments are skipped while scanning. An unbalanced body is
/// kept as is.
pub fn strip_function_bodies(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len());
    let mut copied = 0;
    let mut stmt_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line_comment(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i),
            b'"' | b'\'' | b'`' => i = skip_string(bytes, i),
            b'{' => {
                let prefix = &source[stmt_start..i];
                if opens_body(prefix) {
                    if let Some(close) = matching_brace(bytes, i) {
                        out.push_str(source[copied..i].trim_end());
                        out.push(';');
                        i = close + 1;
                        // drop a `;` that directly followed the body
                        if bytes.get(i) == Some(&b';') {
                            i += 1;
                        }
                        copied = i;
                        stmt_start = i;
                        continue;
                    }
                }
                i += 1;
                stmt_start = i;
            }
            b'}' | b';' => {
                i += 1;
                stmt_start = i;
            }
            _ => i += 1,
        }
    }

    out.push_str(&source[copied..]);
    out
}

const DECLARATION_KEYWORDS: [&str; 6] =
    ["interface", "type", "enum", "class", "namespace", "module"];
const MODIFIERS: [&str; 4] = ["export", "default", "declare", "abstract"];

fn opens_body(prefix: &str) -> bool {
    let text = strip_comments(prefix);
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    let first_word = text
        .split_whitespace()
        .find(|w| !MODIFIERS.contains(w))
        .unwrap_or("");
    if DECLARATION_KEYWORDS.contains(&first_word) {
        return false;
    }

    if let Some(head) = text.strip_suffix("=>") {
        // `const f = () => {` is a body, `cb: () => { ok: boolean }` is a type
        return head.contains('=');
    }

    let Some(paren) = text.rfind(')') else {
        return false;
    };
    let tail = text[paren + 1..].trim();
    if tail.is_empty() {
        return true;
    }
    match tail.strip_prefix(':') {
        Some(return_type) => {
            let return_type = return_type.trim();
            !return_type.is_empty() && !return_type.contains('=')
        }
        None => false,
    }
}

fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        let end = match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => skip_line_comment(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => skip_block_comment(bytes, i),
            _ => {
                i += 1;
                continue;
            }
        };
        out.push_str(&text[copied..i]);
        out.push(' ');
        i = end;
        copied = end;
    }
    out.push_str(&text[copied..]);
    out
}

fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line_comment(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i);
                continue;
            }
            b'"' | b'\'' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index just past the newline ending the comment.
fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| start + p + 1)
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map_or(bytes.len(), |p| start + 2 + p + 2)
}

/// Index just past the closing quote.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            b'\n' if quote != b'`' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interfaces_are_kept() {
        let src = "export interface Position {\n  x: number;\n  y: number;\n}\n";
        assert_eq!(strip_function_bodies(src), src);
    }

    #[test]
    fn test_function_body_stripped() {
        let src = "export function isValid(id: string): boolean {\n  return /^[a-z]+$/.test(id);\n}\n";
        assert_eq!(
            strip_function_bodies(src),
            "export function isValid(id: string): boolean;\n"
        );
    }

    #[test]
    fn test_nested_braces_and_strings() {
        let src = "function f() {\n  const s = \"}\";\n  if (x) { y(); }\n}\nexport type A = { a: string };\n";
        assert_eq!(
            strip_function_bodies(src),
            "function f();\nexport type A = { a: string };\n"
        );
    }

    #[test]
    fn test_class_methods_stripped_class_kept() {
        let src = "export class Store {\n  get(path: string): unknown {\n    return null;\n  }\n}\n";
        assert_eq!(
            strip_function_bodies(src),
            "export class Store {\n  get(path: string): unknown;\n}\n"
        );
    }

    #[test]
    fn test_arrow_assignment_vs_function_type() {
        let src = "export const load = async () => {\n  await x();\n};\ninterface Api {\n  cb: () => { ok: boolean };\n}\n";
        assert_eq!(
            strip_function_bodies(src),
            "export const load = async () =>;\ninterface Api {\n  cb: () => { ok: boolean };\n}\n"
        );
    }

    #[test]
    fn test_unbalanced_body_kept() {
        let src = "function broken() {\n  return 1;\n";
        assert_eq!(strip_function_bodies(src), src);
    }

    #[test]
    fn test_rewrite_relative_imports() {
        let src = "import { A } from '../../config';\nimport { B } from \"./local\";\nimport x from 'lodash';\n";
        assert_eq!(
            rewrite_relative_imports(src),
            "import { A } from './config';\nimport { B } from \"./local\";\nimport x from 'lodash';\n"
        );
    }

    #[test]
    fn test_transform_adds_single_header() {
        let once = transform_type_source("export type Id = string;\n", "types.ts");
        assert!(once.starts_with("// This file is auto-generated from types.ts\n"));

        let twice = transform_type_source(&once, "types.ts");
        assert_eq!(twice, once);
    }
}
