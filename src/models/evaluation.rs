//! 结构化评卷结果
//!
//! 模型返回的 JSON 按此 schema 解析；多余字段忽略，缺失的
//! `remark` 按 `None` 处理。

use serde::{Deserialize, Serialize};

/// 一份考卷的完整评卷结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// 按题目顺序的作答条目
    pub answers: Vec<AnswerEntry>,
}

/// 单道题目的评卷条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerEntry {
    /// 题号标签，如 "1.a"
    pub number: String,
    /// 识别出的题目文本
    pub question: String,
    /// 识别出的学生作答文本
    pub text: String,
    /// 给分（模型可能给出小数）
    pub marks: f64,
    /// 扣分理由或备注
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}
