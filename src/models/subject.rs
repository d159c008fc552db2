//! 科目与语言的静态查找表

use phf::phf_map;

/// 科目代码 → 全称（仅用于日志展示）
static SUBJECT_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "devops" => "DevOps",
    "dmkd" => "Data Mining & Knowledge Discovery",
    "nws" => "Network & Web Security",
    "spm" => "Software Project Management",
    "sqat" => "Software Quality Assurance & Testing",
    "ssic" => "Software Security & Information Coding",
};

/// 短语言代码 → tesseract 语言包名
static TESSERACT_LANG_PACKS: phf::Map<&'static str, &'static str> = phf_map! {
    "en" => "eng",
    "hi" => "hin",
    "fr" => "fra",
    "de" => "deu",
    "es" => "spa",
    "ta" => "tam",
    "zh" => "chi_sim",
};

/// 获取科目全称，未登记的代码原样返回
pub fn subject_full_name(code: &str) -> &str {
    SUBJECT_NAMES.get(code).copied().unwrap_or(code)
}

/// 把短语言代码映射为 tesseract 语言包名，未登记的原样返回
pub fn tesseract_lang_pack(code: &str) -> &str {
    TESSERACT_LANG_PACKS.get(code).copied().unwrap_or(code)
}
