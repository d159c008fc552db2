//! 评卷批次处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责按考号批量评卷和并发控制。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：输出启动信息、检查材料目录
//! 2. **按考号展开**：每个考号 × 配置的全部科目
//! 3. **并发控制**：使用 Semaphore 限制同时评卷的科目数量
//! 4. **失败隔离**：单个科目失败只记日志，绝不打断兄弟任务
//! 5. **全局统计**：无论成败，每个考号的总耗时都会上报
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单份考卷的细节
//! - **无共享可变状态**：每个科目任务持有自己的流程实例
//! - **向下委托**：委托 workflow::EvaluationFlow 评阅单份考卷

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::workflow::{EvalOutcome, EvaluationFlow, ScriptCtx};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        if !Path::new(&config.material_dir).exists() {
            warn!("⚠️ 材料目录不存在: {}", config.material_dir);
        }

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        if self.config.rolls.is_empty() || self.config.subjects.is_empty() {
            warn!("⚠️ 考号或科目列表为空，程序结束");
            return Ok(());
        }

        let mut overall = RunStats::default();

        for roll in &self.config.rolls {
            let stats = self.process_roll(roll).await?;
            overall.completed += stats.completed;
            overall.skipped += stats.skipped;
            overall.failed += stats.failed;
            overall.total += stats.total;
        }

        print_final_stats(&overall);

        Ok(())
    }

    /// 评阅一个考号的全部科目
    ///
    /// 每个科目一个任务，Semaphore 限并发；等全部任务收尾后
    /// 才上报本考号的统计与耗时，任何单科失败都不会提前退出。
    async fn process_roll(&self, roll: &str) -> Result<RollStats> {
        let roll_started = Instant::now();
        log_roll_start(roll, &self.config);

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_subjects));
        let mut handles = Vec::new();

        for subject in &self.config.subjects {
            let permit = semaphore.clone().acquire_owned().await?;

            let ctx = ScriptCtx::new(&self.config.material_dir, roll, subject);
            // 流程实例（含识别引擎、模型客户端）为任务私有，任务间零共享
            let flow = EvaluationFlow::new(&self.config);

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let outcome = flow.run(&ctx).await;
                (ctx, outcome)
            });
            handles.push(handle);
        }

        let mut stats = RollStats {
            total: self.config.subjects.len(),
            ..Default::default()
        };

        // 等待本考号所有任务完成（成功或失败）
        for join_result in join_all(handles).await {
            match join_result {
                Ok((_, Ok(EvalOutcome::Completed))) => {
                    stats.completed += 1;
                }
                Ok((ctx, Ok(EvalOutcome::Skipped(reason)))) => {
                    stats.skipped += 1;
                    warn!("[{}] ⏭ 已跳过: {}", ctx, reason);
                }
                Ok((ctx, Err(e))) => {
                    stats.failed += 1;
                    error!("[{}] ❌ 评卷失败: {:#}", ctx, e);
                }
                Err(e) => {
                    stats.failed += 1;
                    error!("评卷任务意外终止: {}", e);
                }
            }
        }

        log_roll_complete(roll, &stats, roll_started.elapsed());

        Ok(stats)
    }
}

/// 单个考号的评卷统计
#[derive(Debug, Default)]
pub struct RollStats {
    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

/// 整次运行的汇总统计
#[derive(Debug, Default)]
struct RunStats {
    completed: usize,
    skipped: usize,
    failed: usize,
    total: usize,
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 扫描考卷自动评阅");
    info!("📊 最大并发科目数: {}", config.max_concurrent_subjects);
    info!(
        "🔠 识别策略: {} (语言: {})",
        config.ocr_strategy,
        config.ocr_languages.join(",")
    );
    info!("🤖 评分模型: {}", config.llm_model_name);
    info!("{}", "=".repeat(60));
}

fn log_roll_start(roll: &str, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始评阅考号 {}", roll);
    info!("📄 科目: {}", config.subjects.join(", "));
    info!("{}", "=".repeat(60));
}

fn log_roll_complete(roll: &str, stats: &RollStats, elapsed: Duration) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 考号 {} 完成: 成功 {}/{}，跳过 {}，失败 {}",
        roll, stats.completed, stats.total, stats.skipped, stats.failed
    );
    info!("🕒 考号 {} 总耗时: {:.2} 秒", roll, elapsed.as_secs_f64());
    info!("{}", "─".repeat(60));
}

fn print_final_stats(stats: &RunStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部评阅完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.completed, stats.total);
    info!("⏭ 跳过: {}", stats.skipped);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
}
