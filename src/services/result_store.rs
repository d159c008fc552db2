//! 评卷结果存储 - 业务能力层
//!
//! 只负责"按 (roll, subject) 落盘一份结构化结果"能力。
//! 路径确定性派生，重复评卷直接覆盖（幂等，不追加）。

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::models::EvaluationRecord;

/// 评卷结果存储
pub struct ResultStore {
    results_dir: PathBuf,
}

impl ResultStore {
    /// 创建新的结果存储
    pub fn new(config: &Config) -> Self {
        Self {
            results_dir: PathBuf::from(&config.results_dir),
        }
    }

    /// 使用自定义输出目录创建
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: dir.into(),
        }
    }

    /// (roll, subject) 对应的结果文件路径
    pub fn result_path(&self, roll: &str, subject: &str) -> PathBuf {
        self.results_dir
            .join(roll)
            .join(format!("{}-result.json", subject))
    }

    /// 写入评卷结果，必要时创建中间目录；同路径旧结果被覆盖
    pub async fn write(
        &self,
        roll: &str,
        subject: &str,
        record: &EvaluationRecord,
    ) -> Result<PathBuf> {
        let roll_dir = self.results_dir.join(roll);
        tokio::fs::create_dir_all(&roll_dir)
            .await
            .with_context(|| format!("创建结果目录失败: {}", roll_dir.display()))?;

        let path = self.result_path(roll, subject);
        let json = serde_json::to_string_pretty(record).context("序列化评卷结果失败")?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("写入结果文件失败: {}", path.display()))?;

        debug!("结果已写入 {}", path.display());
        Ok(path)
    }
}
