/// Case-insensitive ASCII substring search returning a byte offset.
///
/// Offsets are safe to slice with because every needle starts and ends on
/// ASCII; `to_lowercase` is avoided since it can shift byte offsets for
/// some Unicode text.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < from + n.len() {
        return None;
    }
    (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

fn rfind_ci(haystack: &str, needle: &str, before: usize) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    let end = before.min(h.len());
    if n.is_empty() || end < n.len() {
        return None;
    }
    (0..=end - n.len()).rev().find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Extract the document title from raw HTML
///
/// Scans for the first <title> element. Falls back to the og:title meta
/// property when the title tag is missing or empty.
pub fn extract_title(html: &str) -> Option<String> {
    if let Some(start) = find_ci(html, "<title", 0) {
        if let Some(open_end) = find_ci(html, ">", start) {
            let content_start = open_end + 1;
            if let Some(close) = find_ci(html, "</title", content_start) {
                let title = html[content_start..close].trim();
                if !title.is_empty() {
                    return Some(decode_entities(title));
                }
            }
        }
    }

    extract_og_title(html)
}

fn extract_og_title(html: &str) -> Option<String> {
    let property_pos = find_ci(html, "property=\"og:title\"", 0)?;
    let tag_start = rfind_ci(html, "<meta", property_pos)?;
    let tag_end = find_ci(html, ">", tag_start)?;
    let tag = &html[tag_start..tag_end];

    let content_pos = find_ci(tag, "content=\"", 0)?;
    let value_start = content_pos + "content=\"".len();
    let value_end = find_ci(tag, "\"", value_start)?;
    let title = tag[value_start..value_end].trim();
    if title.is_empty() {
        None
    } else {
        Some(decode_entities(title))
    }
}

/// Decode the handful of HTML entities that commonly appear in titles
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
}

/// Convert HTML content to plain text
pub fn html_to_text(html: &str) -> String {
    html2text::from_read(html.as_bytes(), 80).unwrap_or_else(|_| html.to_string())
}
