use super::difficulty::Difficulty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 题目标识（对排版引擎不透明）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemId(pub String);

impl ProblemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProblemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProblemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 题库中的一道题
///
/// 本地题库只有 `description` / `formula`，接口题库额外带 `content`（HTML）和 `tags`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(rename = "type", default)]
    pub problem_type: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Problem {
    /// 创建只有题干和公式的题目，其余字段取默认值
    pub fn new(
        id: impl Into<ProblemId>,
        title: impl Into<String>,
        description: impl Into<String>,
        formula: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            formula: formula.into(),
            difficulty: Difficulty::default(),
            problem_type: String::new(),
            source: String::new(),
            domain: String::new(),
            content: None,
            tags: Vec::new(),
        }
    }
}

/// 一个题库文件（TOML）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemBank {
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub problems: Vec<Problem>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl ProblemBank {
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}
