use crate::catalog::{Catalog, InMemoryCatalog};
use crate::config::Config;
use crate::error::{AppError, CatalogError};
use crate::layout::{build_print_plan, PageLayout, PrintPlan};
use crate::models::{load_all_problem_banks, load_paper_plan, AssembleMode, PaperPlan};
use crate::services::PaperService;
use crate::utils::logging;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)
            .with_context(|| format!("无法写入日志文件: {}", config.output_log_file))?;

        logging::log_startup(&config.plan_file, &config.catalog_folder);

        Ok(Self { config })
    }

    /// 运行应用主逻辑：加载题库与组卷计划，排版，输出打印预览数据，按需提交
    pub async fn run(&self) -> Result<PrintPlan> {
        info!("\n📁 正在加载题库...");
        let banks = load_all_problem_banks(&self.config.catalog_folder).await?;
        let bank_count = banks.len();
        let catalog = InMemoryCatalog::from_banks(banks);
        if catalog.is_empty() {
            return Err(CatalogError::EmptyCatalog.into());
        }
        logging::log_catalog_loaded(bank_count, catalog.len());

        let plan = load_paper_plan(Path::new(&self.config.plan_file)).await?;
        let layout = assemble_layout(&plan, &catalog, &self.config);
        logging::log_layout_summary(&layout);

        let print_plan = build_print_plan(&layout, &catalog);
        let json = serde_json::to_string_pretty(&print_plan)?;
        tokio::fs::write(&self.config.output_plan_file, json)
            .await
            .map_err(|e| AppError::file_write_failed(&self.config.output_plan_file, e))?;

        if self.config.submit_paper {
            PaperService::new(&self.config)
                .submit(&plan.name, &layout, &catalog)
                .await?;
        }

        logging::print_final_stats(
            layout.page_count(),
            print_plan.total_problems,
            &self.config.output_plan_file,
            self.config.submit_paper,
        );

        Ok(print_plan)
    }
}

/// 按组卷计划排版
///
/// 自动模式按栏高分栏分页；手动模式先把选题全部放在第一页左栏，再依次执行 placements。
/// placements 指向尚不存在的页时会补足空白页。
pub fn assemble_layout<C: Catalog + ?Sized>(
    plan: &PaperPlan,
    catalog: &C,
    config: &Config,
) -> PageLayout {
    for id in &plan.problem_ids {
        if catalog.lookup(id).is_none() {
            warn!("⚠️ 组卷计划中的题目 {} 不在题库中", id);
        }
    }

    let columns = plan.columns.unwrap_or(config.default_columns);
    match plan.mode {
        AssembleMode::Auto => PageLayout::auto_assemble(
            plan.problem_ids.iter().cloned(),
            columns,
            config.lane_capacity,
            catalog,
        ),
        AssembleMode::Manual => {
            let mut layout = PageLayout::seeded(plan.problem_ids.iter().cloned(), columns);
            for placement in &plan.placements {
                while layout.page_count() <= placement.page {
                    layout.add_page();
                }
                let id = placement.problem_id.clone();
                match placement.column {
                    Some(column) => layout.insert_at_column(
                        placement.page,
                        column,
                        placement.index.unwrap_or(usize::MAX),
                        id,
                    ),
                    None => layout.append_auto(placement.page, id, catalog),
                };
            }
            layout.select_page(0);
            layout
        }
    }
}
