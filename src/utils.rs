use unicode_width::UnicodeWidthStr;

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Byte length of the character just before `cursor`, 0 at the start.
/// Cursor positions are byte offsets that always sit on char boundaries.
pub fn prev_char_len(text: &str, cursor: usize) -> usize {
    let clamped = cursor.min(text.len());
    text[..clamped]
        .chars()
        .next_back()
        .map(|c| c.len_utf8())
        .unwrap_or(0)
}

/// Byte length of the character at `cursor`, 0 at the end.
pub fn next_char_len(text: &str, cursor: usize) -> usize {
    let clamped = cursor.min(text.len());
    text[clamped..]
        .chars()
        .next()
        .map(|c| c.len_utf8())
        .unwrap_or(0)
}

/// Terminal columns occupied by the text left of the cursor, for placing
/// the terminal cursor inside an input widget. Wide characters count as
/// two columns.
pub fn cursor_display_width(text: &str, cursor: usize) -> u16 {
    let clamped = cursor.min(text.len());
    text[..clamped].width() as u16
}
