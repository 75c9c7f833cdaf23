/// Case-folded form of a display name, used for name lookups.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn format_completion(done: usize, total: usize, percent: u32) -> String {
    format!("{done}/{total} ({percent}%)")
}

/// Shortens `text` to at most `max_chars` characters, ending with an ellipsis.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let mut shortened = text
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    shortened.push('…');
    shortened
}
