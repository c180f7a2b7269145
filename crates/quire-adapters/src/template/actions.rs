//! Action scanning for Go-style templates.
//!
//! `gtmpl` does not terminate on an action that is never closed, so every
//! text and HTML template goes through [`scan`] before it is parsed. The HTML
//! dialect also uses the scan to route each printing action through the
//! `html` escaper, so template logic sees raw values and only the output is
//! escaped.

use std::borrow::Cow;

/// Name the HTML dialect registers its escaper under.
pub(crate) const ESCAPER: &str = "html";

/// One `{{ ... }}` action.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Action<'a> {
    /// Byte offset of the opening `{{`.
    pub start: usize,
    /// Byte offset just past the closing `}}`.
    pub end: usize,
    /// Text between the delimiters, trim markers included.
    pub body: &'a str,
}

/// Find every action in `text`.
///
/// Fails on an unclosed action, comment or quoted string, naming the line
/// the action starts on.
pub(crate) fn scan<'a>(name: &str, text: &'a str) -> Result<Vec<Action<'a>>, String> {
    let bytes = text.as_bytes();
    let mut actions = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find("{{") {
        let start = pos + offset;
        let fail = |what: &str| {
            let line = text[..start].matches('\n').count() + 1;
            format!("template: {name}:{line}: {what}")
        };

        let mut i = start + 2;
        let close = loop {
            match bytes.get(i).copied() {
                None => return Err(fail("unclosed action")),
                Some(b'}') if bytes.get(i + 1) == Some(&b'}') => break i,
                Some(b'/') if bytes.get(i + 1) == Some(&b'*') => {
                    i = text[i + 2..]
                        .find("*/")
                        .map(|at| i + 2 + at + 2)
                        .ok_or_else(|| fail("unclosed comment"))?;
                }
                Some(quote @ (b'"' | b'\'')) => {
                    i = skip_quoted(bytes, i, quote)
                        .ok_or_else(|| fail("unterminated quoted string"))?;
                }
                Some(b'`') => {
                    i = text[i + 1..]
                        .find('`')
                        .map(|at| i + 1 + at + 1)
                        .ok_or_else(|| fail("unterminated raw quoted string"))?;
                }
                Some(_) => i += 1,
            }
        };

        actions.push(Action {
            start,
            end: close + 2,
            body: &text[start + 2..close],
        });
        pos = close + 2;
    }

    Ok(actions)
}

/// Offset just past the quote closing the one at `open`.
fn skip_quoted(bytes: &[u8], open: usize, quote: u8) -> Option<usize> {
    let mut i = open + 1;
    loop {
        match *bytes.get(i)? {
            b'\\' => i += 2,
            b'\n' => return None,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
}

/// Rewrite `text` so every action that prints a value pipes it through
/// [`ESCAPER`]. Control actions, comments and declarations are left alone.
pub(crate) fn escape_output<'a>(name: &str, text: &'a str) -> Result<Cow<'a, str>, String> {
    let actions = scan(name, text)?;
    if !actions.iter().any(|action| prints(trim_markers(action.body).1)) {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len() + actions.len() * 8);
    let mut last = 0;
    for action in &actions {
        out.push_str(&text[last..action.start]);
        let (left, inner, right) = trim_markers(action.body);
        if prints(inner) {
            out.push_str(&format!("{{{{{left}{} | {ESCAPER} {right}}}}}", inner.trim_end()));
        } else {
            out.push_str(&text[action.start..action.end]);
        }
        last = action.end;
    }
    out.push_str(&text[last..]);
    Ok(Cow::Owned(out))
}

/// Split `{{- ` and ` -}}` trim markers off an action body.
fn trim_markers(body: &str) -> (&str, &str, &str) {
    let (left, rest) = match body.strip_prefix('-') {
        Some(rest) if rest.starts_with(char::is_whitespace) => ("-", rest),
        _ => ("", body),
    };
    match rest.strip_suffix('-') {
        Some(inner) if inner.ends_with(char::is_whitespace) => (left, inner, "-"),
        _ => (left, rest, ""),
    }
}

/// Whether an action body produces output.
fn prints(inner: &str) -> bool {
    const CONTROL: [&str; 10] = [
        "if", "else", "end", "range", "with", "define", "template", "block", "break", "continue",
    ];

    let inner = inner.trim();
    if inner.is_empty() || inner.starts_with("/*") {
        return false;
    }

    let (first, rest) = inner
        .split_once(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or((inner, ""));
    if CONTROL.contains(&first) {
        return false;
    }

    // `$x := ...` and `$x = ...` only assign.
    let rest = rest.trim_start();
    let assigns = rest.starts_with(":=") || (rest.starts_with('=') && !rest.starts_with("=="));
    !(first.starts_with('$') && assigns)
}

/// Escape text for HTML element content and quoted attributes.
pub(crate) fn html_escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
