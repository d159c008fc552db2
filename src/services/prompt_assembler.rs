//! 评卷请求拼装 - 业务能力层
//!
//! 固定顺序拼接：评分指令模板 → 考卷识别转写 → 题卷参考文本。
//! 每份文档现拼现用，不做任何缓存。

/// 评分指令模板，描述期望的结构化输出 schema 与给分策略
pub const GRADING_PROMPT_TEMPLATE: &str = r#"
You are given raw OCR text from an exam paper.

Your task:
1. Clean the OCR text to make it readable.
2. Identify each question and the student's answer.
3. Extract the answers into structured JSON in this format:
{
  "answers": [
    {
      "number": "1.a",
      "question": "Question text here",
      "text": "Student's answer text here",
      "marks": based on the max score of question,
      "remark": "Reason for deduction or comment"
    }
  ]
}
4. For evaluation:
   - Award marks based on correctness and completeness.
   - Provide remarks if marks are deducted.

Return **only valid JSON** without additional text.

Here is the OCR text:
"#;

/// 题卷开头的样板头长度（字符数）
///
/// 启发式跳过，不是结构化解析；题卷模板变了要跟着调。
const QUESTION_PAPER_HEADER_OFFSET: usize = 470;

/// 拼装一次评卷请求的完整文本
pub fn assemble(transcript: &str, question_paper: &str) -> String {
    let trimmed: String = question_paper
        .chars()
        .skip(QUESTION_PAPER_HEADER_OFFSET)
        .collect();

    format!(
        "{}{}\n\n=========================================================\nHere is the question paper:\n{}\n",
        GRADING_PROMPT_TEMPLATE, transcript, trimmed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let prompt = assemble("TRANSCRIPT-BODY", "");
        let template_pos = prompt.find("raw OCR text").unwrap();
        let transcript_pos = prompt.find("TRANSCRIPT-BODY").unwrap();
        let paper_pos = prompt.find("Here is the question paper:").unwrap();
        assert!(template_pos < transcript_pos);
        assert!(transcript_pos < paper_pos);
    }

    #[test]
    fn test_question_paper_header_is_trimmed() {
        let header = "H".repeat(QUESTION_PAPER_HEADER_OFFSET);
        let paper = format!("{}Q1. Define DevOps.", header);
        let prompt = assemble("", &paper);
        assert!(prompt.contains("Q1. Define DevOps."));
        assert!(!prompt.contains("HH"));
    }

    #[test]
    fn test_short_question_paper_trims_to_empty() {
        let prompt = assemble("body", "too short");
        assert!(!prompt.contains("too short"));
    }
}
