//! 文本处理工具
//! 百分号解码、日志截断、波斯文字检测

/// 百分号解码（非法UTF-8替换为U+FFFD，不报错）
pub fn percent_decode(input: &str) -> String {
    let bytes = urlencoding::decode_binary(input.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// 按字符截断，用于日志输出
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// 是否主要为波斯文字：含阿拉伯字母区字符（或ZWNJ/ZWJ）且不含拉丁字母
pub fn is_persian_like(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }

    let mut has_persian_char = false;
    let mut has_latin_char = false;
    for c in text.chars() {
        if ('\u{0600}'..='\u{06FF}').contains(&c) || c == '\u{200C}' || c == '\u{200D}' {
            has_persian_char = true;
        } else if c.is_ascii_alphabetic() {
            has_latin_char = true;
        }
    }

    has_persian_char && !has_latin_char
}
