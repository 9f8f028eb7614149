/// 试卷提交服务
///
/// 把排版结果展开为完整题目列表并提交组卷接口
use crate::catalog::Catalog;
use crate::clients::PaperClient;
use crate::config::Config;
use crate::error::{AppError, CatalogError};
use crate::layout::PageLayout;
use crate::models::{Problem, ProblemId};
use crate::services::warn_writer::WarnWriter;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// 提交给组卷接口的数据
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperSubmission {
    pub name: String,
    pub created_at: DateTime<Local>,
    /// 按 `flatten()` 顺序排列的完整题目
    pub problems: Vec<Problem>,
    pub pages: Vec<SubmittedPage>,
}

/// 每页的分栏信息
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedPage {
    pub page_id: u32,
    pub columns: u8,
    pub problem_ids: Vec<ProblemId>,
    pub lanes: Vec<Vec<ProblemId>>,
}

impl PaperSubmission {
    /// 由排版状态构建提交数据，任意一道题不在题库中即失败
    pub fn build<C: Catalog + ?Sized>(
        name: impl Into<String>,
        layout: &PageLayout,
        catalog: &C,
    ) -> Result<Self, CatalogError> {
        let problems = layout.resolve(catalog)?;
        let pages = layout
            .pages()
            .iter()
            .map(|page| SubmittedPage {
                page_id: page.id,
                columns: page.columns(),
                problem_ids: page.problem_ids().to_vec(),
                lanes: page
                    .lanes()
                    .into_iter()
                    .map(|lane| lane.into_iter().cloned().collect())
                    .collect(),
            })
            .collect();

        Ok(Self {
            name: name.into(),
            created_at: Local::now(),
            problems,
            pages,
        })
    }
}

/// 试卷提交服务
pub struct PaperService {
    client: PaperClient,
    warn_writer: WarnWriter,
}

impl PaperService {
    /// 创建新的试卷提交服务
    pub fn new(config: &Config) -> Self {
        Self {
            client: PaperClient::new(config),
            warn_writer: WarnWriter::with_path(config.warn_file.clone()),
        }
    }

    /// 构建提交数据；题库中找不到的题目逐一写入 warn 文件后返回错误
    pub async fn prepare<C: Catalog + ?Sized>(
        &self,
        name: &str,
        layout: &PageLayout,
        catalog: &C,
    ) -> Result<PaperSubmission> {
        let missing: Vec<ProblemId> = layout
            .flatten()
            .into_iter()
            .filter(|id| catalog.lookup(id).is_none())
            .collect();

        if let Some(first) = missing.first() {
            for id in &missing {
                warn!("[{}] ⚠️ 题目 {} 不在题库中", name, id);
                self.warn_writer
                    .write(name, id.as_str(), "题库中找不到该题目")
                    .await
                    .with_context(|| format!("无法写入警告文件: {}", self.warn_writer.path()))?;
            }
            return Err(AppError::problem_not_found(first.clone()))
                .with_context(|| format!("试卷 {} 有 {} 道题无法解析", name, missing.len()));
        }

        Ok(PaperSubmission::build(name, layout, catalog)?)
    }

    /// 提交整张试卷
    pub async fn submit<C: Catalog + ?Sized>(
        &self,
        name: &str,
        layout: &PageLayout,
        catalog: &C,
    ) -> Result<Value> {
        let submission = self.prepare(name, layout, catalog).await?;

        info!("[{}] 📋 提交试卷: {} 页, {} 道题", name, submission.pages.len(), submission.problems.len());

        let result = self
            .client
            .generate_paper(&submission)
            .await
            .with_context(|| format!("试卷 {} 提交失败", name))?;

        info!("[{}] ✓ 试卷提交成功", name);
        Ok(result)
    }
}
