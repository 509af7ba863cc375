//! Middle-out truncation for oversized extracted text
//!
//! Document openings carry letterheads and parties, endings carry totals
//! and signatures; the middle is the safest part to drop.

/// Marker inserted where text was removed
pub const TRUNCATION_MARKER: &str = "\n\n[... Text gekürzt ...]\n\n";

/// Bound `text` to at most `max_chars` characters of original content
///
/// Keeps the first and last `max_chars / 2` characters and joins them with
/// [`TRUNCATION_MARKER`]. Counts characters, not bytes, so multi-byte
/// umlauts never split. Text within the limit is returned unchanged.
pub fn truncate_middle(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }

    let half = max_chars / 2;
    let head: String = text.chars().take(half).collect();
    let tail: String = text.chars().skip(total - half).collect();

    format!("{head}{TRUNCATION_MARKER}{tail}")
}
