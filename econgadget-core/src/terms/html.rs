//! Lightweight HTML scanning for table markup.
//!
//! This is not a parser. It locates elements by tag name (case-insensitive),
//! balances nested elements of the same tag, and tolerates a missing close tag
//! by running the element to the end of the enclosing slice. Byte offsets are
//! stable between the original text and its ASCII-lowercased copy, so matching
//! happens on the lowercase copy and slicing on the original.

/// Byte ranges of one element inside the slice it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    /// Offset of `<tag`.
    pub start: usize,
    /// Offset just past the `>` of the opening tag.
    pub open_end: usize,
    /// Offset of the matching `</tag`, or the slice end if unclosed.
    pub inner_end: usize,
    /// Offset just past the closing tag.
    pub end: usize,
}

impl Element {
    /// The opening tag text, e.g. `<a href="..." title="...">`.
    pub fn open_tag<'a>(&self, s: &'a str) -> &'a str {
        &s[self.start..self.open_end]
    }

    /// Everything between the opening and closing tags.
    pub fn inner<'a>(&self, s: &'a str) -> &'a str {
        &s[self.open_end..self.inner_end]
    }

    /// The whole element including its tags.
    pub fn outer<'a>(&self, s: &'a str) -> &'a str {
        &s[self.start..self.end]
    }
}

fn is_name_boundary(b: Option<&u8>) -> bool {
    match b {
        None => true,
        Some(c) => c.is_ascii_whitespace() || *c == b'>' || *c == b'/',
    }
}

/// Find the next `<tag` at or after `from` in an already-lowercased string.
fn find_open(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = format!("<{tag}");
    let bytes = lc.as_bytes();
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(&pat) {
        let at = pos + rel;
        if is_name_boundary(bytes.get(at + pat.len())) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// Find the next `</tag` at or after `from` in an already-lowercased string.
fn find_close(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = format!("</{tag}");
    let bytes = lc.as_bytes();
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(&pat) {
        let at = pos + rel;
        if is_name_boundary(bytes.get(at + pat.len())) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// End of the tag starting at `at` (one past its `>`), or the slice end.
fn tag_end(s: &str, at: usize) -> usize {
    s[at..].find('>').map(|i| at + i + 1).unwrap_or(s.len())
}

/// Next element named `tag` starting at or after `from`, balancing nested
/// elements with the same name.
pub fn next_element(s: &str, tag: &str, from: usize) -> Option<Element> {
    let lc = s.to_ascii_lowercase();
    next_element_lc(s, &lc, tag, from)
}

fn next_element_lc(s: &str, lc: &str, tag: &str, from: usize) -> Option<Element> {
    let start = find_open(lc, tag, from)?;
    let open_end = tag_end(s, start);

    // Self-closing: <span ... />
    if s[..open_end].ends_with("/>") {
        return Some(Element {
            start,
            open_end,
            inner_end: open_end,
            end: open_end,
        });
    }

    let mut depth = 1usize;
    let mut pos = open_end;
    loop {
        let next_open = find_open(lc, tag, pos);
        let next_close = find_close(lc, tag, pos);
        match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => {
                depth += 1;
                pos = tag_end(s, o);
            }
            (_, Some(c)) => {
                depth -= 1;
                if depth == 0 {
                    return Some(Element {
                        start,
                        open_end,
                        inner_end: c,
                        end: tag_end(s, c),
                    });
                }
                pos = tag_end(s, c);
            }
            (_, None) => {
                return Some(Element {
                    start,
                    open_end,
                    inner_end: s.len(),
                    end: s.len(),
                });
            }
        }
    }
}

/// Consecutive, non-overlapping elements whose name is any of `tags`, in
/// document order. Elements nested inside a returned element are not listed
/// separately.
pub fn elements(s: &str, tags: &[&str]) -> Vec<Element> {
    let lc = s.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0usize;
    loop {
        let next = tags
            .iter()
            .filter_map(|t| find_open(&lc, t, pos).map(|at| (at, *t)))
            .min_by_key(|(at, _)| *at);
        let Some((_, tag)) = next else { break };
        let Some(el) = next_element_lc(s, &lc, tag, pos) else {
            break;
        };
        pos = el.end.max(el.start + 1);
        out.push(el);
    }
    out
}

/// Every opening tag named `tag`, at any nesting depth, in document order.
pub fn open_tags<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = s.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(at) = find_open(&lc, tag, pos) {
        let end = tag_end(s, at);
        out.push(&s[at..end]);
        pos = end;
    }
    out
}

/// Read an attribute from an opening tag. Names match case-insensitively;
/// values may be double-quoted, single-quoted or bare. Entities are decoded.
pub fn attr(open_tag: &str, name: &str) -> Option<String> {
    let body = open_tag
        .strip_prefix('<')?
        .trim_end_matches('>')
        .trim_end_matches('/');
    let bytes = body.as_bytes();
    // Skip the tag name.
    let mut i = bytes
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .unwrap_or(bytes.len());

    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'='
        {
            i += 1;
        }
        let attr_name = &body[name_start..i];
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match bytes.get(i) {
                Some(q @ (b'"' | b'\'')) => {
                    let quote = *q as char;
                    let v_start = i + 1;
                    let v_end = body[v_start..]
                        .find(quote)
                        .map(|r| v_start + r)
                        .unwrap_or(body.len());
                    i = (v_end + 1).min(body.len());
                    Some(&body[v_start..v_end])
                }
                Some(_) => {
                    let v_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    Some(&body[v_start..i])
                }
                None => Some(""),
            }
        } else {
            None
        };

        if attr_name.eq_ignore_ascii_case(name) {
            return Some(decode_entities(value.unwrap_or("")));
        }
        if attr_name.is_empty() && value.is_none() {
            i += 1;
        }
    }
    None
}

/// True if the opening tag's `class` attribute lists `class`.
pub fn has_class(open_tag: &str, class: &str) -> bool {
    attr(open_tag, "class")
        .map(|v| v.split_ascii_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Decode the named entities that show up in encyclopedia markup plus
/// numeric references. Unknown entities are left as-is.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let semi = tail.find(';').filter(|&i| i <= 10);
        let decoded = semi.and_then(|i| decode_entity(&tail[1..i]).map(|c| (c, i)));
        match decoded {
            Some((c, i)) => {
                out.push(c);
                rest = &tail[i + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "ndash" => Some('–'),
        "mdash" => Some('—'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Visible text of a fragment: tags removed, entities decoded, whitespace
/// normalized.
pub fn text_content(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&decode_entities(&out))
}
