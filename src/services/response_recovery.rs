//! 模型输出恢复 - 业务能力层
//!
//! 模型的输出没有"一定是裸 JSON"的契约，可能裹着说明文字或
//! 代码栅栏。恢复分两级：剥掉栅栏后严格解析；失败再从首个 `{`
//! 到最后一个 `}` 的块里抢救一次。两级都失败即不可恢复，
//! 以类型化结果上报，绝不抛错。

use std::sync::OnceLock;

use regex::Regex;

use crate::models::EvaluationRecord;

/// 恢复结果
#[derive(Debug)]
pub enum RecoveryOutcome {
    /// 剥栅栏后严格解析成功
    Parsed(EvaluationRecord),
    /// 严格解析失败，从大括号块中抢救成功
    Salvaged(EvaluationRecord),
    /// 两级都失败，该文档评卷作废
    Unrecoverable,
}

/// 从模型原始输出中恢复结构化评卷结果
pub fn recover(raw: &str) -> RecoveryOutcome {
    let cleaned = strip_code_fences(raw);

    if let Ok(record) = serde_json::from_str::<EvaluationRecord>(&cleaned) {
        return RecoveryOutcome::Parsed(record);
    }

    if let Some(block) = first_brace_block(&cleaned) {
        if let Ok(record) = serde_json::from_str::<EvaluationRecord>(block) {
            return RecoveryOutcome::Salvaged(record);
        }
    }

    RecoveryOutcome::Unrecoverable
}

fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// 首个 `{` 到最后一个 `}` 之间的子串
fn first_brace_block(text: &str) -> Option<&str> {
    static BRACE_BLOCK: OnceLock<Regex> = OnceLock::new();
    let re = BRACE_BLOCK.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("固定的正则字面量"));
    re.find(text).map(|m| m.as_str())
}
