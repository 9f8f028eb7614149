//! # Paper Layout
//!
//! 组卷排版：把选好的题目摆放到多页、每页一到两栏的 A4 试卷上
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models / Catalog）
//! - `models/` - 题目、难度、组卷计划，以及 TOML 加载
//! - `catalog/` - 只读题库，排版引擎只通过 `Catalog::lookup` 查询
//!
//! ### ② 排版层（Layout）
//! - `layout/` - 纯内存、同步的排版引擎，不做任何 I/O
//! - `PageLayout` - 插入、移动、删除、调整栏数、增删页、展开
//! - `drag` - 指针拖放与列表拖放两种事件的适配
//! - `print_plan` - 输出给打印预览的分页分栏结果
//!
//! ### ③ 服务层（Services / Clients）
//! - `PaperService` - 构建提交数据并提交组卷接口
//! - `PaperClient` - 组卷 HTTP 客户端
//! - `WarnWriter` - 写 warn.txt
//!
//! ### ④ 编排层
//! - `app` - 加载题库和组卷计划，排版、输出、提交
//!
//! ## 模块结构

pub mod app;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::{assemble_layout, App};
pub use catalog::{Catalog, InMemoryCatalog};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use layout::{build_print_plan, Page, PageLayout, PrintPlan};
pub use models::{Problem, ProblemId};
