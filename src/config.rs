/// 程序配置
///
/// 除 `LLM_API_KEY` 外全部带默认值；rolls / subjects 等列表字段
/// 用逗号分隔的环境变量覆盖。
#[derive(Clone, Debug)]
pub struct Config {
    /// 待评卷的考号列表
    pub rolls: Vec<String>,
    /// 每个考号下的科目列表
    pub subjects: Vec<String>,
    /// 考卷与题卷所在目录
    pub material_dir: String,
    /// 评卷结果输出目录
    pub results_dir: String,
    /// 题卷文本诊断转储目录（每科目一个文件）
    pub question_paper_dump_dir: String,
    /// 同时处理的科目数量
    pub max_concurrent_subjects: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- OCR 配置 ---
    /// 识别策略："neural"（easyocr 同义）或 "traditional"（tesseract 同义）
    pub ocr_strategy: String,
    /// 识别语言代码列表
    pub ocr_languages: Vec<String>,
    /// 神经网络识别是否请求加速器
    pub ocr_use_gpu: bool,
    /// 页码选择表达式
    pub ocr_page_range: String,
    /// 页面渲染放大倍数
    pub render_zoom: f32,
    /// tesseract 引擎模式（OEM）
    pub tesseract_oem: u32,
    /// tesseract 页面分割模式（PSM）
    pub tesseract_psm: u32,
    /// ocrs 文字检测模型路径
    pub detection_model_path: String,
    /// ocrs 文字识别模型路径
    pub recognition_model_path: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rolls: vec!["f9".to_string()],
            subjects: vec![
                "devops".to_string(),
                "dmkd".to_string(),
                "nws".to_string(),
                "spm".to_string(),
                "sqat".to_string(),
                "ssic".to_string(),
            ],
            material_dir: "test-material".to_string(),
            results_dir: "results".to_string(),
            question_paper_dump_dir: "question_paper".to_string(),
            max_concurrent_subjects: 6,
            verbose_logging: false,
            ocr_strategy: "neural".to_string(),
            ocr_languages: vec!["en".to_string()],
            ocr_use_gpu: true,
            ocr_page_range: "all".to_string(),
            render_zoom: 2.0,
            tesseract_oem: 1,
            tesseract_psm: 3,
            detection_model_path: "models/text-detection.rten".to_string(),
            recognition_model_path: "models/text-recognition.rten".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            rolls: env_list("ROLLS").unwrap_or(default.rolls),
            subjects: env_list("SUBJECTS").unwrap_or(default.subjects),
            material_dir: std::env::var("MATERIAL_DIR").unwrap_or(default.material_dir),
            results_dir: std::env::var("RESULTS_DIR").unwrap_or(default.results_dir),
            question_paper_dump_dir: std::env::var("QUESTION_PAPER_DUMP_DIR")
                .unwrap_or(default.question_paper_dump_dir),
            max_concurrent_subjects: std::env::var("MAX_CONCURRENT_SUBJECTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_concurrent_subjects),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            ocr_strategy: std::env::var("OCR_STRATEGY").unwrap_or(default.ocr_strategy),
            ocr_languages: env_list("OCR_LANGUAGES").unwrap_or(default.ocr_languages),
            ocr_use_gpu: std::env::var("OCR_USE_GPU")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.ocr_use_gpu),
            ocr_page_range: std::env::var("OCR_PAGE_RANGE").unwrap_or(default.ocr_page_range),
            render_zoom: std::env::var("RENDER_ZOOM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.render_zoom),
            tesseract_oem: std::env::var("TESSERACT_OEM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.tesseract_oem),
            tesseract_psm: std::env::var("TESSERACT_PSM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.tesseract_psm),
            detection_model_path: std::env::var("OCRS_DETECTION_MODEL")
                .unwrap_or(default.detection_model_path),
            recognition_model_path: std::env::var("OCRS_RECOGNITION_MODEL")
                .unwrap_or(default.recognition_model_path),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}

fn env_list(name: &str) -> Option<Vec<String>> {
    let raw = std::env::var(name).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
