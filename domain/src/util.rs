//! Text helpers for log lines.

/// Marker appended by [`preview`] when text was cut.
pub const ELLIPSIS: &str = "...";

/// First `max_chars` characters of `text` on a single line.
///
/// Line breaks are folded into spaces so a multi-line question or answer
/// stays on one log line. Counting is by `char`, so Thai combining vowels and
/// tone marks count individually but are never split from their bytes.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.trim().chars().map(|c| if c.is_control() { ' ' } else { c });
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_unchanged() {
        assert_eq!(preview("ยอดขายเดือนนี้", 50), "ยอดขายเดือนนี้");
    }

    #[test]
    fn test_long_thai_text_is_cut_on_char_boundary() {
        // "ต้นทุน" is 6 chars (ต ้ น ท ุ น), 18 bytes
        assert_eq!(preview("ต้นทุนสูงขึ้น", 6), "ต้นทุน...");
    }

    #[test]
    fn test_exact_length_has_no_ellipsis() {
        assert_eq!(preview("Sales", 5), "Sales");
        assert_eq!(preview("Sales!", 5), "Sales...");
    }

    #[test]
    fn test_newlines_fold_into_spaces() {
        assert_eq!(preview("  Month,Sales\nJan,5000\n", 40), "Month,Sales Jan,5000");
    }

    #[test]
    fn test_empty() {
        assert_eq!(preview("   ", 10), "");
    }
}
