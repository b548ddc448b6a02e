//! `{name}` placeholder substitution.

use std::fmt::{Display, Write};

use rustc_hash::FxHashMap;

/// Replace every `{name}` in `text` whose `name` is a key of `values`.
///
/// Substitution is a single left-to-right pass: inserted text is never
/// rescanned. Unknown placeholders and unmatched braces are left as written.
pub fn substitute<V: Display>(text: &str, values: &FxHashMap<String, V>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let name = &after[..close];
                match values.get(name) {
                    Some(value) => {
                        // Writing to a String cannot fail.
                        let _ = write!(out, "{value}");
                    }
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
