//! 题卷加载服务 - 业务能力层
//!
//! 只负责"读出某科目题卷文本"能力：题卷是电子版 PDF，
//! 直接抽取文本层即可，不走 OCR。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::config::Config;

/// 题卷加载服务
///
/// 每个科目任务独立读自己的题卷文件，无共享缓存。
/// 抽取出的全文会转储到每科目一个的诊断文件，
/// 并发任务各写各的路径，互不覆盖。
pub struct QuestionPaperLoader {
    dump_dir: PathBuf,
}

impl QuestionPaperLoader {
    /// 创建新的题卷加载服务
    pub fn new(config: &Config) -> Self {
        Self {
            dump_dir: PathBuf::from(&config.question_paper_dump_dir),
        }
    }

    /// 抽取题卷全文并写出诊断转储
    pub async fn load(&self, subject: &str, paper_path: &Path) -> Result<String> {
        if !paper_path.exists() {
            anyhow::bail!("题卷文件不存在: {}", paper_path.display());
        }

        // pdf 解析是同步重活，挪到阻塞线程池
        let path = paper_path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text(&path)
                .map_err(|e| anyhow::anyhow!("提取题卷文本失败 ({}): {}", path.display(), e))
        })
        .await
        .context("题卷提取任务意外终止")??;

        debug!("[{}] 题卷全文 {} 字符", subject, text.chars().count());

        if let Err(e) = self.dump(subject, &text).await {
            // 转储只是诊断用途，失败不拦评卷
            warn!("[{}] 题卷转储写入失败: {:#}", subject, e);
        }

        Ok(text)
    }

    async fn dump(&self, subject: &str, text: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dump_dir)
            .await
            .with_context(|| format!("创建转储目录失败: {}", self.dump_dir.display()))?;

        let dump_path = self.dump_dir.join(format!("{}.txt", subject));
        tokio::fs::write(&dump_path, text)
            .await
            .with_context(|| format!("写入转储文件失败: {}", dump_path.display()))?;

        Ok(())
    }
}
