use super::problem::ProblemId;
use serde::{Deserialize, Serialize};

/// 组卷方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssembleMode {
    /// 按栏高自动分栏分页
    #[default]
    Auto,
    /// 先全部放在第一页左栏，再按 placements 手动摆放
    Manual,
}

/// 手动摆放指令，对应一次拖放
///
/// 不写 `column` 等于拖到整页上（自动选最矮的栏）；不写 `index` 则追加到栏尾。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub problem_id: ProblemId,
    pub page: usize,
    #[serde(default)]
    pub column: Option<usize>,
    #[serde(default)]
    pub index: Option<usize>,
}

/// 组卷计划文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperPlan {
    pub name: String,
    /// 不写时使用配置里的 `default_columns`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u8>,
    #[serde(default)]
    pub mode: AssembleMode,
    #[serde(default)]
    pub problem_ids: Vec<ProblemId>,
    #[serde(default)]
    pub placements: Vec<Placement>,
}
