//! 警告写入服务
//!
//! 只负责把无法解析的题目追加到 warn.txt

use anyhow::Result;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 警告写入服务
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 创建新的警告写入服务
    pub fn new() -> Self {
        Self {
            warn_file_path: "warn.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.warn_file_path
    }

    /// 写入一条警告
    ///
    /// # 参数
    /// - `paper_name`: 试卷名称
    /// - `problem_id`: 题目ID
    /// - `reason`: 原因
    pub async fn write(&self, paper_name: &str, problem_id: &str, reason: &str) -> Result<()> {
        debug!("写入警告: 试卷 {} | 题目 {} | {}", paper_name, problem_id, reason);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)
            .await?;

        let warn_msg = format!("试卷 {} | 题目 {} | {}\n", paper_name, problem_id, reason);
        file.write_all(warn_msg.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}
