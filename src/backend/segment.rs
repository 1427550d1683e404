use std::borrow::Cow;

/// Phrase the review page prints after every review.
pub const BLOCK_DELIMITER: &str = "Did you find this helpful?";

/// Rewrites `\r\n` and lone `\r` line endings as `\n`.
pub fn normalize_newlines(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Splits raw scraped text into review blocks.
///
/// Every fragment between delimiters is trimmed and empty fragments are dropped,
/// so the result only holds blocks with content, in input order.
/// A delimiter phrase quoted inside a review body will split that review.
pub fn segment_blocks(raw: &str) -> Vec<&str> {
    raw.split(BLOCK_DELIMITER)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}
