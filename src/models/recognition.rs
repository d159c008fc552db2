//! 单份文档的识别结果
//!
//! `pages` 与解析出的页码序列严格等长：识别失败的页占位
//! [`OCR_FAILED_SENTINEL`]，识别成功但没有文字的页占位
//! [`NO_TEXT_SENTINEL`]，下游据此区分"跑过但没认出字"和"没跑成"。

/// 页面识别成功但未检出任何文字时的占位文本
pub const NO_TEXT_SENTINEL: &str = "[NO TEXT DETECTED]";

/// 页面识别过程出错时的占位文本
pub const OCR_FAILED_SENTINEL: &str = "[OCR FAILED]";

/// 一份文档的逐页识别文本与合并转写
#[derive(Debug, Clone)]
pub struct RecognitionResult {
    /// 按页顺序的逐页文本，每个解析页一条，失败页为占位文本
    pub pages: Vec<String>,
    /// 带页分隔标记的合并转写
    pub combined_text: String,
}

impl RecognitionResult {
    /// 由逐页文本构建结果，合并转写按处理顺序编号
    pub fn from_pages(pages: Vec<String>) -> Self {
        let combined_text = pages
            .iter()
            .enumerate()
            .map(|(i, text)| format!("--- PAGE {} ---\n{}", i + 1, text))
            .collect::<Vec<_>>()
            .join("\n\n");

        Self {
            pages,
            combined_text,
        }
    }

    /// 是否存在至少一页可用文本（既非失败占位也非空文本占位）
    pub fn has_usable_text(&self) -> bool {
        self.pages
            .iter()
            .any(|p| p != NO_TEXT_SENTINEL && p != OCR_FAILED_SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_text_keeps_page_order_with_markers() {
        let result =
            RecognitionResult::from_pages(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(
            result.combined_text,
            "--- PAGE 1 ---\nfirst\n\n--- PAGE 2 ---\nsecond"
        );
    }

    #[test]
    fn test_all_sentinel_pages_have_no_usable_text() {
        let result = RecognitionResult::from_pages(vec![
            NO_TEXT_SENTINEL.to_string(),
            OCR_FAILED_SENTINEL.to_string(),
        ]);
        assert!(!result.has_usable_text());
    }

    #[test]
    fn test_one_real_page_is_enough() {
        let result = RecognitionResult::from_pages(vec![
            OCR_FAILED_SENTINEL.to_string(),
            "Answer 1: ...".to_string(),
        ]);
        assert!(result.has_usable_text());
    }

    #[test]
    fn test_empty_document_has_no_usable_text() {
        let result = RecognitionResult::from_pages(Vec::new());
        assert!(!result.has_usable_text());
        assert_eq!(result.combined_text, "");
    }
}
