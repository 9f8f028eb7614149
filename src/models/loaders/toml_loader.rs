use crate::models::plan::PaperPlan;
use crate::models::problem::ProblemBank;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载一个题库
pub async fn load_problem_bank(toml_file_path: &Path) -> Result<ProblemBank> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let bank: ProblemBank = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    Ok(bank.with_file_path(toml_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有题库文件
///
/// 单个文件解析失败只记录警告，不影响其它文件。返回顺序按文件名排序，保证题库顺序稳定。
pub async fn load_all_problem_banks(folder_path: &str) -> Result<Vec<ProblemBank>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    if toml_files.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到 TOML 文件", folder_path);
        return Ok(Vec::new());
    }

    let results = join_all(toml_files.iter().map(|path| load_problem_bank(path))).await;

    let mut banks = Vec::new();
    for (path, result) in toml_files.iter().zip(results) {
        match result {
            Ok(bank) => {
                tracing::info!(
                    "成功加载题库 {} ({} 道题)",
                    path.file_name().unwrap_or_default().to_string_lossy(),
                    bank.problems.len()
                );
                banks.push(bank);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(banks)
}

/// 加载组卷计划
pub async fn load_paper_plan(toml_file_path: &Path) -> Result<PaperPlan> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取组卷计划: {}", toml_file_path.display()))?;

    let plan: PaperPlan = toml::from_str(&content)
        .with_context(|| format!("无法解析组卷计划: {}", toml_file_path.display()))?;

    tracing::info!(
        "组卷计划 {}: {} 道题, 栏数 {}, 模式 {:?}",
        plan.name,
        plan.problem_ids.len(),
        plan.columns.map_or_else(|| "默认".to_string(), |c| c.to_string()),
        plan.mode
    );

    Ok(plan)
}
