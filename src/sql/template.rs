//! Rewrites `:name` placeholders in API SQL into positional `?` parameters.
//! Placeholders inside string literals, quoted identifiers and comments are left alone.

use serde_json::Value;
use std::ops::Range;

/// SQL text plus the values to bind, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

fn is_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Byte ranges of every `:name` placeholder (colon included), in occurrence order.
fn scan_placeholders(sql: &str) -> Vec<Range<usize>> {
    let bytes = sql.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut i = 0;
    while i < len {
        match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') => {
                i += 1;
                while i < len {
                    if bytes[i] == quote {
                        if i + 1 < len && bytes[i + 1] == quote {
                            i += 2;
                            continue;
                        }
                        break;
                    }
                    i += 1;
                }
                i += 1;
            }
            b'[' => {
                while i < len && bytes[i] != b']' {
                    i += 1;
                }
                i += 1;
            }
            b'-' if i + 1 < len && bytes[i + 1] == b'-' => {
                while i < len && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if i + 1 < len && bytes[i + 1] == b'*' => {
                i += 2;
                while i + 1 < len && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 2;
            }
            b':' => {
                let start = i;
                let mut j = i + 1;
                while j < len && is_ident(bytes[j]) {
                    j += 1;
                }
                let glued = start > 0 && is_ident(bytes[start - 1]);
                if j > start + 1 && !glued {
                    out.push(start..j);
                }
                i = j.max(start + 1);
            }
            _ => i += 1,
        }
    }
    out
}

/// Names of all placeholders in `sql`, in occurrence order, repeats included.
pub fn placeholder_names(sql: &str) -> Vec<&str> {
    scan_placeholders(sql)
        .into_iter()
        .map(|r| &sql[r.start + 1..r.end])
        .collect()
}

/// Replace each placeholder named in `declared` with `?` and bind `lookup(name)` for it.
/// Undeclared placeholders stay in the text (SQLite binds them as NULL).
pub fn bind_named<F>(sql: &str, declared: &[String], mut lookup: F) -> QueryBuf
where
    F: FnMut(&str) -> Value,
{
    let mut out = String::with_capacity(sql.len());
    let mut params = Vec::new();
    let mut last = 0;
    for range in scan_placeholders(sql) {
        let name = &sql[range.start + 1..range.end];
        if !declared.iter().any(|d| d == name) {
            continue;
        }
        out.push_str(&sql[last..range.start]);
        out.push('?');
        params.push(lookup(name));
        last = range.end;
    }
    out.push_str(&sql[last..]);
    QueryBuf { sql: out, params }
}
