use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::layout::PageLayout;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；否则 `verbose` 时输出 debug 级别。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), default_level))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n组卷排版日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(plan_file: &str, catalog_folder: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 试卷排版");
    info!("📁 题库目录: {}", catalog_folder);
    info!("📋 组卷计划: {}", plan_file);
    info!("{}", "=".repeat(60));
}

/// 记录题库加载信息
pub fn log_catalog_loaded(banks: usize, problems: usize) {
    info!("✓ 加载 {} 个题库, 共 {} 道题", banks, problems);
}

/// 逐页输出排版概要
pub fn log_layout_summary(layout: &PageLayout) {
    info!("\n{}", "─".repeat(60));
    for (index, page) in layout.pages().iter().enumerate() {
        let lanes: Vec<String> = page
            .lanes()
            .iter()
            .map(|lane| {
                let ids: Vec<&str> = lane.iter().map(|id| id.as_str()).collect();
                truncate_text(&ids.join(","), 40)
            })
            .collect();
        info!(
            "📄 第 {} 页 (#{}, {} 栏): {}",
            index + 1,
            page.id,
            page.columns(),
            lanes.join(" | ")
        );
    }
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(pages: usize, problems: usize, output_file: &str, submitted: bool) {
    info!("\n{}", "=".repeat(60));
    info!("📊 排版完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 页数: {}", pages);
    info!("📝 题数: {}", problems);
    info!("📤 已提交: {}", if submitted { "是" } else { "否" });
    info!("{}", "=".repeat(60));
    info!("\n打印预览数据已保存至: {}", output_file);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
