//! Teaser extraction for documents without a description

/// Appended where the excerpt is cut
pub const ELLIPSIS: char = '…';

/// Short excerpt of a converted body
///
/// The excerpt is the text before the first line break, with an ellipsis
/// appended. A sentence-ending `.`, `!` or `?` right before the break is
/// replaced by the ellipsis. Bodies without a line break are a single
/// paragraph and are returned unchanged.
///
/// # Examples
/// ```
/// use gemini_gateway::teaser::teaser;
///
/// assert_eq!(teaser("hello world"), "hello world");
/// assert_eq!(teaser("Hello there!\nMore text"), "Hello there…");
/// assert_eq!(teaser("Hello there\nMore text"), "Hello there…");
/// ```
#[must_use]
pub fn teaser(body: &str) -> String {
    let Some(cut) = body.find(['\r', '\n']) else {
        return body.to_string();
    };

    let head = &body[..cut];
    let head = head
        .strip_suffix(['.', '!', '?'])
        .unwrap_or(head);

    let mut excerpt = String::with_capacity(head.len() + ELLIPSIS.len_utf8());
    excerpt.push_str(head);
    excerpt.push(ELLIPSIS);
    excerpt
}
