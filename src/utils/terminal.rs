//! Display helpers for stored text
//!
//! Response messages, categories and history entries are user-controlled: they
//! are typed into the menu, posted to the API or edited in the JSON document. A
//! message carrying escape sequences could clear the screen or recolor the
//! terminal, so every terminal surface passes stored text through
//! [`strip_ansi_codes`] before printing it.

/// Remove ANSI CSI sequences and stray control characters
///
/// Tabs and line breaks survive; bell, backspace and `ESC [ ... <letter>`
/// sequences do not.
///
/// ```
/// use quickreply::utils::terminal::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[31mSenha bloqueada\x1b[0m"), "Senha bloqueada");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // CSI ends at the first ASCII letter
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }
        result.push(ch);
    }

    result
}

/// Sanitized and truncated, for one-line listings
pub fn display_snippet(text: &str, max_chars: usize) -> String {
    truncate_chars(&strip_ansi_codes(text), max_chars)
}

/// Truncate to at most `max_chars` characters, appending "..." when cut
///
/// Counts characters rather than bytes so multibyte text is never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
