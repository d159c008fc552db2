//! 评卷流水线的类型化错误
//!
//! 大部分流程错误通过 `anyhow` 携带上下文向上传播；
//! 这里只定义调用方需要按类型区分的错误。

use thiserror::Error;

/// 页码选择表达式解析错误
///
/// 超出页数范围的页码会被静默丢弃（宽松输入策略），
/// 但非数字的 token 属于格式错误，直接失败，不做部分恢复。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageRangeError {
    /// 表达式中出现无法解析为页码的 token
    #[error("无法解析页码 token: '{token}'")]
    MalformedToken { token: String },
}
