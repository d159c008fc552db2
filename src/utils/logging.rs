//! 日志工具模块

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_unchanged() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
    }

    #[test]
    fn test_long_text_gets_ellipsis() {
        assert_eq!(truncate_text("abcdef", 3), "abc...");
    }
}
