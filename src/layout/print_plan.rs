use crate::catalog::Catalog;
use crate::layout::engine::PageLayout;
use crate::layout::height::{estimate_height_of, lane_heights};
use crate::models::ProblemId;
use serde::Serialize;
use std::collections::HashMap;

/// 打印预览所需的分页分栏结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintPlan {
    pub total_problems: usize,
    pub pages: Vec<PrintPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintPage {
    pub page_id: u32,
    pub columns: u8,
    pub lanes: Vec<PrintLane>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintLane {
    pub height: f64,
    pub items: Vec<PrintItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintItem {
    /// 题号，从 1 开始，按 `flatten()` 顺序编号
    pub number: usize,
    pub problem_id: ProblemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub height: f64,
}

pub fn build_print_plan<C: Catalog + ?Sized>(layout: &PageLayout, catalog: &C) -> PrintPlan {
    let flat = layout.flatten();
    let numbers: HashMap<&ProblemId, usize> =
        flat.iter().enumerate().map(|(i, id)| (id, i + 1)).collect();

    let pages = layout
        .pages()
        .iter()
        .map(|page| {
            let heights = lane_heights(page, catalog, None);
            let lanes = page
                .lanes()
                .into_iter()
                .zip(heights)
                .map(|(items, height)| PrintLane {
                    height,
                    items: items
                        .into_iter()
                        .map(|id| PrintItem {
                            number: numbers.get(id).copied().unwrap_or_default(),
                            problem_id: id.clone(),
                            title: catalog.lookup(id).map(|p| p.title.clone()),
                            height: estimate_height_of(catalog, id),
                        })
                        .collect(),
                })
                .collect();
            PrintPage {
                page_id: page.id,
                columns: page.columns(),
                lanes,
            }
        })
        .collect();

    PrintPlan {
        total_problems: flat.len(),
        pages,
    }
}
