//! HTML escaping for interpolated weather text

/// Escape text for an element body or a quoted attribute value
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Remove every `<...>` tag, keeping the text between tags
///
/// A `<` with no closing `>` is kept as text.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}

/// Render `*`-separated text as an unordered list
///
/// Newlines become spaces and each `*` starts a new item. Item text is
/// stripped of markup and escaped, so the only tags in the output are the
/// list's own.
pub fn bullet_list(text: &str) -> String {
    let flattened = text.replace('\n', " ");
    let items: Vec<String> = flattened
        .split('*')
        .map(|item| escape(&strip_tags(item)))
        .collect();
    format!("<ul><li>{}</li></ul>", items.join("</li><li>"))
}
