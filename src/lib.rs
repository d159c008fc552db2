//! # Evaluate Answer Script
//!
//! 扫描考卷自动评阅：OCR 识别 + 生成式模型评分
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有原生资源，只暴露能力
//! - `PageRenderer` - pdfium 页面渲染能力
//! - `RecognitionEngine` - tesseract / ocrs 双后端文字识别能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单份考卷的一个环节
//! - `DocumentRecognizer` - 后台整卷识别能力
//! - `QuestionPaperLoader` - 题卷文本抽取能力
//! - `EvaluationClient` - 评分模型调用能力
//! - `response_recovery` - 结构化输出恢复能力
//! - `ResultStore` - 结果落盘能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份考卷"的完整评卷流程
//! - `ScriptCtx` - 上下文封装（roll + subject + 派生路径）
//! - `EvaluationFlow` - 流程编排（识别 → 拼装 → 评分 → 恢复 → 落盘）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 按考号展开科目任务，管理并发和统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::PageRangeError;
pub use infrastructure::{PageRenderer, RecognitionEngine};
pub use models::{AnswerEntry, EvaluationRecord, RecognitionResult};
pub use orchestrator::App;
pub use services::{DocumentRecognizer, EvaluationClient, RecoveryOutcome, ResultStore};
pub use workflow::{EvalOutcome, EvaluationFlow, ScriptCtx, SkipReason};
