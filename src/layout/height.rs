//! 题目高度估算与最短栏选择
//!
//! 高度只是渲染高度的粗略代理：
//! `1 + ceil(题干字数 / 60) * 0.5 + ceil(公式字数 / 80) * 0.5`。

use crate::catalog::Catalog;
use crate::layout::page::Page;
use crate::models::{Problem, ProblemId};
use once_cell::sync::Lazy;
use phf::phf_map;
use regex::{Captures, Regex};
use std::borrow::Cow;

const DESCRIPTION_CHARS_PER_LINE: usize = 60;
const FORMULA_CHARS_PER_LINE: usize = 80;
const LINE_WEIGHT: f64 = 0.5;
const BASE_HEIGHT: f64 = 1.0;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(nbsp|lt|gt|amp|quot|#39);").expect("valid entity regex"));

/// 题库 HTML 中常见的实体，每个按一个字符计
static ENTITIES: phf::Map<&'static str, &'static str> = phf_map! {
    "nbsp" => " ",
    "lt" => "<",
    "gt" => ">",
    "amp" => "&",
    "quot" => "\"",
    "#39" => "'",
};

/// 估算单道题的高度
pub fn estimate_height(problem: &Problem) -> f64 {
    let description = measured_description(problem);
    let desc_lines = description.chars().count().div_ceil(DESCRIPTION_CHARS_PER_LINE);
    let formula_lines = problem.formula.chars().count().div_ceil(FORMULA_CHARS_PER_LINE);

    BASE_HEIGHT + desc_lines as f64 * LINE_WEIGHT + formula_lines as f64 * LINE_WEIGHT
}

/// 按ID估算高度，题库中找不到的题目按空题计算
pub fn estimate_height_of<C: Catalog + ?Sized>(catalog: &C, id: &ProblemId) -> f64 {
    catalog.lookup(id).map_or(BASE_HEIGHT, estimate_height)
}

/// 接口题库没有 description 时，用去掉标签后的 content 计算
fn measured_description(problem: &Problem) -> Cow<'_, str> {
    if !problem.description.is_empty() {
        return Cow::Borrowed(&problem.description);
    }
    match problem.content.as_deref() {
        Some(content) => Cow::Owned(html_to_text(content)),
        None => Cow::Borrowed(""),
    }
}

/// 去掉标签后再解码实体，`&lt;b&gt;` 这类转义文本不会被当成标签删掉
fn html_to_text(html: &str) -> String {
    let text = TAG_RE.replace_all(html, "");
    ENTITY_RE
        .replace_all(&text, |caps: &Captures| {
            ENTITIES.get(&caps[1]).copied().unwrap_or_default()
        })
        .into_owned()
}

/// 计算页面每一栏的总高度，`exclude` 指定的题目（正在拖动的题）不计入
pub fn lane_heights<C: Catalog + ?Sized>(
    page: &Page,
    catalog: &C,
    exclude: Option<&ProblemId>,
) -> Vec<f64> {
    let mut heights = vec![0.0; page.columns() as usize];
    for id in page.problem_ids() {
        if Some(id) == exclude {
            continue;
        }
        let lane = page.lane_of(id).unwrap_or(0).min(heights.len() - 1);
        heights[lane] += estimate_height_of(catalog, id);
    }
    heights
}

/// 返回最矮一栏的下标，高度相同时取编号小的
pub fn pick_shortest_lane_index(heights: &[f64]) -> usize {
    heights
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// 放到整页（而不是具体某栏）时选择的目标栏
pub fn choose_target_column<C: Catalog + ?Sized>(
    page: &Page,
    catalog: &C,
    exclude: Option<&ProblemId>,
) -> usize {
    pick_shortest_lane_index(&lane_heights(page, catalog, exclude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    #[test]
    fn height_formula_counts_chars() {
        // 61 字题干 → 2 行，80 字公式 → 1 行
        let p = Problem::new("A", "", "字".repeat(61), "x".repeat(80));
        assert!((estimate_height(&p) - 2.5).abs() < 1e-9);

        let empty = Problem::new("B", "", "", "");
        assert!((estimate_height(&empty) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn content_is_measured_without_tags() {
        let mut p = Problem::new("A", "", "", "");
        p.content = Some(format!("<p><span>{}</span></p>", "a".repeat(60)));
        assert!((estimate_height(&p) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn entities_count_as_one_char() {
        let mut p = Problem::new("A", "", "", "");
        p.content = Some(format!("<p>{}&lt;&nbsp;</p>", "a".repeat(58)));
        assert!((estimate_height(&p) - 1.5).abs() < 1e-9);

        p.content = Some(format!("<p>{}&lt;b&gt;&amp;</p>", "a".repeat(57)));
        assert_eq!(measured_description(&p).chars().count(), 61);
        assert!((estimate_height(&p) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn shortest_lane_is_picked() {
        assert_eq!(pick_shortest_lane_index(&[3.0, 1.5]), 1);
        assert_eq!(pick_shortest_lane_index(&[2.0, 2.0]), 0);
        assert_eq!(pick_shortest_lane_index(&[]), 0);
    }

    #[test]
    fn lane_heights_skip_excluded_problem() {
        let catalog = InMemoryCatalog::new([
            Problem::new("A", "", "a".repeat(120), ""),
            Problem::new("B", "", "", ""),
        ]);
        let page = Page::seeded(1, 2, ["A".into(), "B".into()]);
        assert_eq!(lane_heights(&page, &catalog, None), vec![3.0, 0.0]);
        assert_eq!(lane_heights(&page, &catalog, Some(&"A".into())), vec![1.0, 0.0]);
        assert_eq!(choose_target_column(&page, &catalog, None), 1);
    }
}
