//! Common utility functions shared across the codebase.

/// Checks if the text contains at least one Chinese (CJK ideograph) character.
///
/// This is the gate that decides whether an expression carries translatable
/// content at all: pure-ASCII strings and variable-only expressions are never
/// extracted.
///
/// # Examples
///
/// ```
/// use zhlift::utils::has_chinese;
///
/// assert!(has_chinese("你好"));
/// assert!(has_chinese("hello 世界"));
/// assert!(!has_chinese("hello"));
/// assert!(!has_chinese("123"));
/// assert!(!has_chinese(""));
/// ```
pub fn has_chinese(text: &str) -> bool {
    text.chars().any(is_chinese_char)
}

fn is_chinese_char(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}' | '\u{f900}'..='\u{faff}')
}
