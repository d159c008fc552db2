//! 文字识别引擎 - 基础设施层
//!
//! 两种识别策略：
//! - *traditional*：本地 tesseract，引擎模式（OEM）与页面分割模式（PSM）可配置
//! - *neural*：ocrs 神经网络模型，首次使用时加载，同一文档内复用
//!
//! 引擎实例由单个文档任务独占，绝不跨并发任务共享；
//! 重复初始化是为隔离付出的可接受代价。

use std::io::Cursor;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use image::DynamicImage;
use ocrs::{ImageSource, OcrEngineParams};
use rten::Model;
use tesseract::{OcrEngineMode, Tesseract};
use tracing::{info, warn};

use crate::config::Config;
use crate::models::recognition::NO_TEXT_SENTINEL;
use crate::models::tesseract_lang_pack;

/// 识别策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionStrategy {
    /// 本地 tesseract
    Traditional,
    /// ocrs 神经网络模型
    Neural,
}

impl RecognitionStrategy {
    /// 从配置字符串解析策略，接受两套同义写法
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "traditional" | "tesseract" => Self::Traditional,
            "neural" | "easyocr" => Self::Neural,
            other => {
                warn!("未知的识别策略 '{}', 回退为 neural", other);
                Self::Neural
            }
        }
    }
}

/// 文字识别引擎
pub enum RecognitionEngine {
    Traditional(TraditionalOcr),
    Neural(NeuralOcr),
}

impl RecognitionEngine {
    /// 按配置选择识别策略并构建引擎
    pub fn from_config(config: &Config) -> Self {
        match RecognitionStrategy::parse(&config.ocr_strategy) {
            RecognitionStrategy::Traditional => Self::Traditional(TraditionalOcr::new(config)),
            RecognitionStrategy::Neural => Self::Neural(NeuralOcr::new(config)),
        }
    }

    /// 识别一页图像并归一化输出
    ///
    /// 归一化：统一换行符、去首尾空白；空结果替换为
    /// [`NO_TEXT_SENTINEL`]，让下游能区分"认出空白"和"没跑成"。
    pub fn recognize(&mut self, image: &DynamicImage) -> Result<String> {
        let raw = match self {
            Self::Traditional(engine) => engine.recognize(image)?,
            Self::Neural(engine) => engine.recognize(image)?,
        };
        Ok(normalize_text(&raw))
    }
}

fn normalize_text(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").trim().to_string();
    if text.is_empty() {
        NO_TEXT_SENTINEL.to_string()
    } else {
        text
    }
}

/// tesseract 识别后端
///
/// 每页新建一个 tesseract 句柄：识别过程本身无会话状态，
/// 句柄创建成本远低于页面渲染。
pub struct TraditionalOcr {
    /// tesseract 语言包名，多语言以 `+` 连接
    lang: String,
    oem: u32,
    psm: u32,
}

impl TraditionalOcr {
    fn new(config: &Config) -> Self {
        let lang = config
            .ocr_languages
            .iter()
            .map(|code| tesseract_lang_pack(code))
            .collect::<Vec<_>>()
            .join("+");
        Self {
            lang,
            oem: config.tesseract_oem,
            psm: config.tesseract_psm,
        }
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .context("页面图像编码为 PNG 失败")?;

        let mut tess = Tesseract::new_with_oem(None, Some(self.lang.as_str()), engine_mode(self.oem))
            .with_context(|| format!("初始化 tesseract 失败 (语言: {})", self.lang))?
            .set_variable("tessedit_pageseg_mode", &self.psm.to_string())
            .context("设置页面分割模式失败")?
            .set_image_from_mem(&png)
            .context("载入页面图像失败")?;

        tess.get_text().context("tesseract 识别失败")
    }
}

fn engine_mode(oem: u32) -> OcrEngineMode {
    match oem {
        0 => OcrEngineMode::TesseractOnly,
        1 => OcrEngineMode::LstmOnly,
        2 => OcrEngineMode::TesseractLstmCombined,
        _ => OcrEngineMode::Default,
    }
}

/// ocrs 神经网络识别后端
///
/// 模型在首次识别时加载，之后同一文档的所有页复用同一实例。
pub struct NeuralOcr {
    detection_model_path: PathBuf,
    recognition_model_path: PathBuf,
    languages: Vec<String>,
    use_gpu: bool,
    engine: Option<ocrs::OcrEngine>,
}

impl NeuralOcr {
    fn new(config: &Config) -> Self {
        Self {
            detection_model_path: PathBuf::from(&config.detection_model_path),
            recognition_model_path: PathBuf::from(&config.recognition_model_path),
            languages: config.ocr_languages.clone(),
            use_gpu: config.ocr_use_gpu,
            engine: None,
        }
    }

    fn ensure_engine(&mut self) -> Result<&ocrs::OcrEngine> {
        if self.engine.is_none() {
            if self.languages.iter().any(|l| l != "en") {
                warn!(
                    "内置识别模型仅覆盖英文，忽略其余语言请求: {:?}",
                    self.languages
                );
            }
            if self.use_gpu {
                info!("已请求加速器，当前构建只支持 CPU 推理");
            }
            info!("正在初始化神经网络识别模型...");

            let detection_model = Model::load_file(&self.detection_model_path).with_context(|| {
                format!(
                    "加载文字检测模型失败: {}",
                    self.detection_model_path.display()
                )
            })?;
            let recognition_model =
                Model::load_file(&self.recognition_model_path).with_context(|| {
                    format!(
                        "加载文字识别模型失败: {}",
                        self.recognition_model_path.display()
                    )
                })?;

            let engine = ocrs::OcrEngine::new(OcrEngineParams {
                detection_model: Some(detection_model),
                recognition_model: Some(recognition_model),
                ..Default::default()
            })
            .map_err(|e| anyhow!("初始化 ocrs 引擎失败: {}", e))?;

            self.engine = Some(engine);
        }

        self.engine
            .as_ref()
            .ok_or_else(|| anyhow!("识别引擎未初始化"))
    }

    fn recognize(&mut self, image: &DynamicImage) -> Result<String> {
        let engine = self.ensure_engine()?;

        let rgb = image.to_rgb8();
        let source = ImageSource::from_bytes(rgb.as_raw(), rgb.dimensions())
            .map_err(|e| anyhow!("构建识别输入失败: {}", e))?;
        let input = engine
            .prepare_input(source)
            .map_err(|e| anyhow!("预处理页面图像失败: {}", e))?;

        engine
            .get_text(&input)
            .map_err(|e| anyhow!("神经网络识别失败: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_aliases() {
        assert_eq!(
            RecognitionStrategy::parse("tesseract"),
            RecognitionStrategy::Traditional
        );
        assert_eq!(
            RecognitionStrategy::parse("Traditional"),
            RecognitionStrategy::Traditional
        );
        assert_eq!(
            RecognitionStrategy::parse("easyocr"),
            RecognitionStrategy::Neural
        );
        assert_eq!(
            RecognitionStrategy::parse("neural"),
            RecognitionStrategy::Neural
        );
    }

    #[test]
    fn test_unknown_strategy_falls_back_to_neural() {
        assert_eq!(
            RecognitionStrategy::parse("quantum"),
            RecognitionStrategy::Neural
        );
    }

    #[test]
    fn test_normalize_trims_and_unifies_line_endings() {
        assert_eq!(normalize_text("  a\r\nb \n"), "a\nb");
    }

    #[test]
    fn test_normalize_replaces_empty_with_sentinel() {
        assert_eq!(normalize_text("   \r\n "), NO_TEXT_SENTINEL);
        assert_eq!(normalize_text(""), NO_TEXT_SENTINEL);
    }
}
