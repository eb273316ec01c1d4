//! Escaping of raw text for the filter-graph grammar.
//!
//! Two strategies are available. [`Quoting::Escape`] backslash-escapes each
//! structurally significant character in place. [`Quoting::Quote`] wraps the
//! whole value in single quotes so separators inside it are taken literally;
//! an embedded quote is closed, escaped and reopened (`'\''`).
//!
//! Escaping never inspects its input for earlier escaping. A value must go
//! through [`escape`] exactly once. A filter placed inside a graph gets a
//! second, graph-level pass over its whole argument part with
//! [`escape_graph_args`], since ffmpeg's graph parser unescapes once before
//! handing the arguments to the option parser.

use serde::{Deserialize, Serialize};

/// Characters with structural meaning inside a filter graph.
pub const SPECIAL_CHARS: &[char] = &['\\', '\'', ':', ',', ';', '[', ']'];

/// Characters the graph parser consumes before the option parser runs.
pub const GRAPH_SPECIAL_CHARS: &[char] = &['\\', '\'', '[', ']', ',', ';'];

/// Whitespace ffmpeg's tokenizer strips from both ends of an unprotected value.
const WHITESPACE: &[char] = &[' ', '\n', '\t', '\r'];

/// How a text value is protected from the filter-graph parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quoting {
    /// Backslash-escape special characters; untouched when there are none.
    #[default]
    Escape,
    /// Always wrap the value in single quotes.
    Quote,
}

/// Whether `raw` contains any character that needs protection.
pub fn needs_escaping(raw: &str) -> bool {
    raw.contains(SPECIAL_CHARS) || raw.starts_with(WHITESPACE) || raw.ends_with(WHITESPACE)
}

/// Protects `raw` according to `quoting`.
pub fn escape(raw: &str, quoting: Quoting) -> String {
    match quoting {
        Quoting::Escape => escape_chars(raw),
        Quoting::Quote => quote(raw),
    }
}

/// Applies the graph-level escaping to the argument part of a rendered
/// filter, so the graph parser hands `args` back unchanged to the option
/// parser.
pub fn escape_graph_args(args: &str) -> String {
    escape_with(args, GRAPH_SPECIAL_CHARS)
}

fn escape_chars(raw: &str) -> String {
    if !needs_escaping(raw) {
        return raw.to_string();
    }
    escape_with(raw, SPECIAL_CHARS)
}

/// Backslash-escapes every char in `specials`, plus leading and trailing
/// whitespace.
fn escape_with(raw: &str, specials: &[char]) -> String {
    let body_start = raw.len() - raw.trim_start_matches(WHITESPACE).len();
    let body_end = raw.trim_end_matches(WHITESPACE).len().max(body_start);

    let mut out = String::with_capacity(raw.len() + 8);
    for (i, c) in raw.char_indices() {
        let at_edge = i < body_start || i >= body_end;
        if specials.contains(&c) || at_edge {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for c in raw.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}

/// Reverses [`escape`] the way ffmpeg's tokenizer reads a value.
///
/// Outside quotes a backslash takes the next character literally; a single
/// quote toggles literal mode and is itself dropped. Unprotected whitespace
/// at either end is stripped.
pub fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut in_quotes = false;
    let mut chars = escaped.trim_start_matches(WHITESPACE).chars();
    // Length of `out` up to the last escaped or quoted char.
    let mut protected = 0;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '\'' {
                in_quotes = false;
            } else {
                out.push(c);
                protected = out.len();
            }
            continue;
        }
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                    protected = out.len();
                }
            }
            '\'' => in_quotes = true,
            _ => out.push(c),
        }
    }

    let end = out.trim_end_matches(WHITESPACE).len().max(protected);
    out.truncate(end);
    out
}

/// Splits `input` on `separator` where it is neither quoted nor escaped.
///
/// The pieces keep their escapes and quotes; run [`unescape`] on them to
/// recover raw values.
pub fn split_unescaped(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !in_quotes => escaped = true,
            '\'' => in_quotes = !in_quotes,
            c if c == separator && !in_quotes => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);

    parts
}

/// Byte offset of the first unquoted, unescaped `target`, if any.
pub fn find_unescaped(input: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !in_quotes => escaped = true,
            '\'' => in_quotes = !in_quotes,
            c if c == target && !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}
