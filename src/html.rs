//! Minimal HTML helpers for walking the schedule page. The source markup is
//! machine-generated and regular enough that substring scanning beats a full
//! DOM parse; everything is case-insensitive on tag names.

/// ASCII-lowercase copy, leaving non-ASCII untouched.
fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Find the next `<open ...> ... </close>` block at or after `from`.
/// Returns byte offsets `(start_of_open_tag, end_after_close_tag)`.
pub fn next_tag_block_ci(s: &str, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open_lc = to_lower(open);
    let close_lc = to_lower(close);
    let start = lc.get(from..)?.find(&open_lc)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&close_lc)?;
    let end = open_end + end_rel + close.len();
    Some((start, end))
}

/// Drop every `<...>` tag and collapse whitespace.
pub fn strip_tags(s: &str) -> String {
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
    normalize_ws(&out)
}

/// Text content of the element whose opening tag contains `marker`:
/// the characters between that tag's `>` and the next `<`.
pub fn text_after_marker(s: &str, marker: &str) -> Option<String> {
    let at = s.find(marker)?;
    let open_end = s[at..].find('>')? + at + 1;
    let text_end = s[open_end..].find('<')? + open_end;
    Some(normalize_ws(&s[open_end..text_end]))
}

/// The path segment following `prefix` in the first matching href.
/// `href_segment(row, "/nba/team/_/name/")` on a row linking
/// `/nba/team/_/name/lal/los-angeles-lakers` yields `"lal"`.
pub fn href_segment(s: &str, prefix: &str) -> Option<String> {
    let at = s.find(prefix)? + prefix.len();
    let rest = &s[at..];
    let end = rest
        .find(|c: char| c == '/' || c == '"' || c == '\'' || c == '?')
        .unwrap_or(rest.len());
    let segment = &rest[..end];
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}
