//! 考卷处理上下文
//!
//! 封装"我正在评哪个考号的哪个科目"这一信息

use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 考卷处理上下文
///
/// 两个路径按固定命名约定从 (roll, subject) 派生：
/// 考卷在 `<material_dir>/<roll>/<subject>.pdf`，
/// 题卷在 `<material_dir>/qps/<subject>_qp.pdf`。
#[derive(Debug, Clone)]
pub struct ScriptCtx {
    /// 考号
    pub roll: String,

    /// 科目代码
    pub subject: String,

    /// 考卷扫描件路径
    pub script_path: PathBuf,

    /// 题卷参考文件路径
    pub question_paper_path: PathBuf,
}

impl ScriptCtx {
    /// 按命名约定创建考卷上下文
    pub fn new(material_dir: &str, roll: &str, subject: &str) -> Self {
        let base = Path::new(material_dir);
        Self {
            script_path: base.join(roll).join(format!("{}.pdf", subject)),
            question_paper_path: base.join("qps").join(format!("{}_qp.pdf", subject)),
            roll: roll.to_string(),
            subject: subject.to_string(),
        }
    }
}

impl Display for ScriptCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.roll, self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_naming_convention() {
        let ctx = ScriptCtx::new("test-material", "f9", "devops");
        assert_eq!(
            ctx.script_path,
            Path::new("test-material/f9/devops.pdf")
        );
        assert_eq!(
            ctx.question_paper_path,
            Path::new("test-material/qps/devops_qp.pdf")
        );
        assert_eq!(ctx.to_string(), "f9-devops");
    }
}
