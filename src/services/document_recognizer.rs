//! 文档识别服务 - 业务能力层
//!
//! 只负责"把一份考卷变成逐页文本"能力，不关心流程：
//! 解析页码范围 → 逐页渲染 → 识别 → 归一化。
//! 单页出错记占位文本继续，坏页绝不拖垮整份文档。
//!
//! 识别跑在阻塞线程池的单个后台任务上：`spawn()` 立即返回句柄，
//! 调用方稍后在句柄上取结果，期间可以继续做别的事。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::Config;
use crate::infrastructure::{PageRenderer, RecognitionEngine};
use crate::models::page_range::resolve_page_range;
use crate::models::recognition::{RecognitionResult, OCR_FAILED_SENTINEL};

/// 文档识别服务
///
/// 职责：
/// - 提交单份文档的后台识别任务
/// - 引擎实例每个任务各建一份，不跨任务共享
/// - 不出现 roll / subject，不关心评卷流程
pub struct DocumentRecognizer {
    config: Config,
}

impl DocumentRecognizer {
    /// 创建新的文档识别服务
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// 提交一份文档的识别任务
    ///
    /// 立即返回句柄，识别在阻塞线程池上进行
    /// （pdfium 与两种识别后端都是同步代码）。
    pub fn spawn(&self, script_path: PathBuf) -> RecognitionHandle {
        let config = self.config.clone();
        let handle =
            tokio::task::spawn_blocking(move || recognize_document(&config, &script_path));
        RecognitionHandle { handle }
    }
}

/// 识别任务句柄
///
/// 提交立即返回，`wait()` 阻塞到任务完成。没有取消能力，
/// 卡死的识别任务会一直占着句柄等待方。
pub struct RecognitionHandle {
    handle: JoinHandle<Result<RecognitionResult>>,
}

impl RecognitionHandle {
    /// 等待识别完成并取回结果
    pub async fn wait(self) -> Result<RecognitionResult> {
        self.handle.await.context("识别后台任务意外终止")?
    }
}

fn recognize_document(config: &Config, script_path: &Path) -> Result<RecognitionResult> {
    let renderer = PageRenderer::open(script_path, config.render_zoom)?;
    let page_count = renderer.page_count()?;
    let pages = resolve_page_range(&config.ocr_page_range, page_count)?;

    info!(
        "开始识别 {} ({} 页，共 {} 页)",
        script_path.display(),
        pages.len(),
        page_count
    );

    // 引擎由本任务独占；neural 后端在第一页真正用到时才加载模型
    let mut engine = RecognitionEngine::from_config(config);

    let texts = recognize_pages(&pages, |page_number| {
        let image = renderer.render_page(page_number)?;
        engine.recognize(&image)
    });

    Ok(RecognitionResult::from_pages(texts))
}

/// 逐页执行识别闭包，隔离单页失败
///
/// 输出与 `pages` 严格等长：某页出错时在对应位置记
/// [`OCR_FAILED_SENTINEL`] 并继续，页顺序始终保持。
pub fn recognize_pages<F>(pages: &[u16], mut recognize_page: F) -> Vec<String>
where
    F: FnMut(u16) -> Result<String>,
{
    pages
        .iter()
        .map(|&page_number| match recognize_page(page_number) {
            Ok(text) => text,
            Err(e) => {
                error!("第 {} 页识别失败: {:#}", page_number, e);
                OCR_FAILED_SENTINEL.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recognition::NO_TEXT_SENTINEL;

    #[test]
    fn test_output_length_matches_page_range_even_with_failures() {
        let pages = vec![1, 2, 3, 4];
        let texts = recognize_pages(&pages, |_| anyhow::bail!("识别进程崩溃"));
        assert_eq!(texts.len(), pages.len());
        assert!(texts.iter().all(|t| t == OCR_FAILED_SENTINEL));
    }

    #[test]
    fn test_failed_page_does_not_affect_neighbors() {
        let pages = vec![1, 2, 3];
        let texts = recognize_pages(&pages, |n| {
            if n == 2 {
                anyhow::bail!("第 2 页渲染失败")
            }
            Ok(format!("page {} text", n))
        });
        assert_eq!(texts[0], "page 1 text");
        assert_eq!(texts[1], OCR_FAILED_SENTINEL);
        assert_eq!(texts[2], "page 3 text");
    }

    #[test]
    fn test_sentinel_pages_flow_through_unchanged() {
        let pages = vec![1];
        let texts = recognize_pages(&pages, |_| Ok(NO_TEXT_SENTINEL.to_string()));
        assert_eq!(texts, vec![NO_TEXT_SENTINEL.to_string()]);
    }

    #[test]
    fn test_empty_range_yields_empty_result() {
        let texts = recognize_pages(&[], |_| Ok("unreachable".to_string()));
        assert!(texts.is_empty());
    }
}
