//! 页面渲染器 - 基础设施层
//!
//! 持有 pdfium 绑定，只暴露"取页数"和"渲染某页"两个能力。
//! 每次调用都重新渲染，不做任何缓存；pdfium 不是 async-safe 的，
//! 调用方必须在阻塞线程池里使用本模块。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::DynamicImage;
use pdfium_render::prelude::*;

/// 页面渲染器
///
/// 职责：
/// - 持有 pdfium 绑定与文档路径
/// - 暴露 page_count() / render_page() 能力
/// - 不认识 roll / subject，不处理识别流程
pub struct PageRenderer {
    pdfium: Pdfium,
    pdf_path: PathBuf,
    zoom: f32,
}

impl PageRenderer {
    /// 打开一份考卷文档
    ///
    /// 文件不存在时直接报错（该文档的硬性失败，不影响其他文档）。
    pub fn open(pdf_path: &Path, zoom: f32) -> Result<Self> {
        if !pdf_path.exists() {
            anyhow::bail!("考卷文件不存在: {}", pdf_path.display());
        }

        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .context("加载 pdfium 动态库失败")?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
            pdf_path: pdf_path.to_path_buf(),
            zoom,
        })
    }

    /// 文档总页数
    pub fn page_count(&self) -> Result<u16> {
        Ok(self.load_document()?.pages().len())
    }

    /// 把 1 起始的页码渲染为内存中的光栅图像
    ///
    /// 放大倍数来自构造参数（默认 2 倍），输出像素尺寸相应放大。
    pub fn render_page(&self, page_number: u16) -> Result<DynamicImage> {
        let document = self.load_document()?;
        let page = document
            .pages()
            .get(page_number - 1)
            .with_context(|| format!("载入第 {} 页失败", page_number))?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(self.zoom);
        let bitmap = page
            .render_with_config(&render_config)
            .with_context(|| format!("渲染第 {} 页失败", page_number))?;

        Ok(bitmap.as_image())
    }

    fn load_document(&self) -> Result<PdfDocument<'_>> {
        self.pdfium
            .load_pdf_from_file(&self.pdf_path, None)
            .with_context(|| format!("打开 PDF 失败: {}", self.pdf_path.display()))
    }
}
