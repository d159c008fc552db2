//! 评卷流程 - 流程层
//!
//! 核心职责：定义"一份考卷"的完整评卷流程
//!
//! 流程顺序：
//! 1. 提交后台 OCR 识别（立即拿到句柄）
//! 2. 识别期间加载题卷参考文本
//! 3. 拼装评分请求 → 调用模型 → 恢复结构化结果 → 落盘
//!
//! 识别无可用文本、模型返回为空、输出不可恢复，都只跳过
//! 本科目并带明确原因返回，绝不打断兄弟科目。

use std::fmt::Display;
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::subject_full_name;
use crate::services::{
    prompt_assembler, response_recovery, DocumentRecognizer, EvaluationClient,
    QuestionPaperLoader, RecoveryOutcome, ResultStore,
};
use crate::utils::logging::truncate_text;
use crate::workflow::script_ctx::ScriptCtx;

/// 单份考卷的评卷结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalOutcome {
    /// 评卷完成，结果已落盘
    Completed,
    /// 评卷中止，带中止原因；不产生结果文件
    Skipped(SkipReason),
}

/// 评卷中止原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 整份文档没有识别出可用文本
    NoUsableText,
    /// 模型调用失败或返回为空
    EmptyModelResponse,
    /// 模型输出无法恢复为结构化结果
    UnrecoverableResponse,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoUsableText => write!(f, "OCR 未得到可用文本"),
            SkipReason::EmptyModelResponse => write!(f, "模型调用失败或返回为空"),
            SkipReason::UnrecoverableResponse => write!(f, "模型输出无法恢复为结构化结果"),
        }
    }
}

/// 评卷流程
///
/// - 编排单份考卷的完整评卷流程
/// - 自己持有全套服务实例（识别引擎、模型客户端都是任务本地的）
/// - 不做并发调度，那是编排层的事
pub struct EvaluationFlow {
    recognizer: DocumentRecognizer,
    paper_loader: QuestionPaperLoader,
    client: EvaluationClient,
    store: ResultStore,
    verbose_logging: bool,
}

impl EvaluationFlow {
    /// 创建新的评卷流程
    pub fn new(config: &Config) -> Self {
        Self {
            recognizer: DocumentRecognizer::new(config),
            paper_loader: QuestionPaperLoader::new(config),
            client: EvaluationClient::new(config),
            store: ResultStore::new(config),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 评阅一份考卷
    ///
    /// 硬性错误（考卷/题卷缺失等）向上传播到本任务的 future；
    /// 可预期的中止以 [`EvalOutcome::Skipped`] 返回。
    pub async fn run(&self, ctx: &ScriptCtx) -> Result<EvalOutcome> {
        let started = Instant::now();

        info!(
            "[{}] 📚 开始评卷，科目: {}",
            ctx,
            subject_full_name(&ctx.subject)
        );

        // ========== 阶段 1: 后台 OCR ==========
        info!("[{}] 🔍 已提交后台识别: {}", ctx, ctx.script_path.display());
        let recognition = self.recognizer.spawn(ctx.script_path.clone());

        // 识别在阻塞线程池上跑，这里顺路把题卷读了
        let question_paper = self
            .paper_loader
            .load(&ctx.subject, &ctx.question_paper_path)
            .await?;

        let result = recognition.wait().await?;

        if self.verbose_logging {
            for (i, page) in result.pages.iter().enumerate() {
                debug!("[{}] 第 {} 页: {}", ctx, i + 1, truncate_text(page, 60));
            }
        }

        if !result.has_usable_text() {
            warn!("[{}] ⚠️ OCR 未得到可用文本，跳过模型调用", ctx);
            return Ok(EvalOutcome::Skipped(SkipReason::NoUsableText));
        }
        info!("[{}] ✓ OCR 完成，共 {} 页", ctx, result.pages.len());

        // ========== 阶段 2: 模型评分 ==========
        let prompt = prompt_assembler::assemble(&result.combined_text, &question_paper);

        info!("[{}] 📤 正在提交评分请求...", ctx);
        let raw_response = self.client.submit(&prompt).await;

        if raw_response.is_empty() {
            warn!("[{}] ⚠️ 模型调用失败或返回为空，跳过该科目", ctx);
            return Ok(EvalOutcome::Skipped(SkipReason::EmptyModelResponse));
        }

        // ========== 阶段 3: 恢复 + 落盘 ==========
        let record = match response_recovery::recover(&raw_response) {
            RecoveryOutcome::Parsed(record) => record,
            RecoveryOutcome::Salvaged(record) => {
                info!("[{}] 模型输出带有多余包装，已从大括号块中恢复", ctx);
                record
            }
            RecoveryOutcome::Unrecoverable => {
                warn!("[{}] ❌ 无法从模型输出恢复结构化结果", ctx);
                if self.verbose_logging {
                    debug!("[{}] 原始输出: {}", ctx, truncate_text(&raw_response, 200));
                }
                return Ok(EvalOutcome::Skipped(SkipReason::UnrecoverableResponse));
            }
        };

        let path = self.store.write(&ctx.roll, &ctx.subject, &record).await?;
        info!(
            "[{}] ✅ 评卷结果已保存: {} ({} 道题)",
            ctx,
            path.display(),
            record.answers.len()
        );
        info!("[{}] ⏱ 用时 {:.2} 秒", ctx, started.elapsed().as_secs_f64());

        Ok(EvalOutcome::Completed)
    }
}
