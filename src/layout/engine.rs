use crate::catalog::Catalog;
use crate::config::MAX_COLUMNS;
use crate::error::CatalogError;
use crate::layout::height::{estimate_height_of, lane_heights, pick_shortest_lane_index};
use crate::layout::page::Page;
use crate::models::{Problem, ProblemId};
use serde::Serialize;
use tracing::{debug, warn};

/// 多页双栏排版状态
///
/// 所有操作都是同步的内存修改。页码越界时操作不生效并返回 `false`，
/// 栏号和栏内位置越界时会被夹紧到合法范围。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pages: Vec<Page>,
    current: usize,
    next_page_id: u32,
}

impl PageLayout {
    /// 创建只有一张空白页的排版
    pub fn new(columns: u8) -> Self {
        Self::seeded(std::iter::empty(), columns)
    }

    /// 用初始选题创建排版：一页，全部在第 0 栏
    pub fn seeded(initial: impl IntoIterator<Item = ProblemId>, columns: u8) -> Self {
        Self {
            pages: vec![Page::seeded(1, columns, initial)],
            current: 0,
            next_page_id: 2,
        }
    }

    /// 自动组卷：逐题放入最后一页最矮的栏，放不下时另起一页
    ///
    /// 目标栏为空时总会放入，即使单题高度超过 `lane_capacity`。
    pub fn auto_assemble<C: Catalog + ?Sized>(
        ids: impl IntoIterator<Item = ProblemId>,
        columns: u8,
        lane_capacity: f64,
        catalog: &C,
    ) -> Self {
        let mut layout = Self::new(columns);

        for id in ids {
            if layout.contains(&id) {
                debug!("自动组卷跳过重复题目 {}", id);
                continue;
            }
            let height = estimate_height_of(catalog, &id);
            let mut page_index = layout.pages.len() - 1;
            let page = &layout.pages[page_index];
            let heights = lane_heights(page, catalog, None);
            let mut lane = pick_shortest_lane_index(&heights);

            if !page.lane_items(lane).is_empty() && heights[lane] + height > lane_capacity {
                page_index = layout.add_page();
                lane = 0;
            }
            layout.insert_at_column(page_index, lane, usize::MAX, id);
        }

        layout.current = 0;
        layout
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.current]
    }

    /// 切换当前页，越界时夹紧
    pub fn select_page(&mut self, index: usize) {
        self.current = index.min(self.pages.len() - 1);
    }

    pub fn contains(&self, id: &ProblemId) -> bool {
        self.pages.iter().any(|p| p.contains(id))
    }

    /// 查找题目位置：(页, 栏, 栏内位置)
    pub fn locate(&self, id: &ProblemId) -> Option<(usize, usize, usize)> {
        self.pages.iter().enumerate().find_map(|(i, page)| {
            page.position_in_lane(id)
                .map(|(lane, index)| (i, lane, index))
        })
    }

    fn page_mut(&mut self, index: usize, op: &str) -> Option<&mut Page> {
        let count = self.pages.len();
        let page = self.pages.get_mut(index);
        if page.is_none() {
            warn!("{}: 页码 {} 超出范围 (共 {} 页)，忽略", op, index, count);
        }
        page
    }

    /// 把题目放到指定页指定栏的指定位置
    ///
    /// 题目已在排版中（任意页）时先移除再插入，因此重复调用只会移动不会复制。
    pub fn insert_at_column(
        &mut self,
        page_index: usize,
        column: usize,
        index_in_column: usize,
        id: ProblemId,
    ) -> bool {
        if page_index >= self.pages.len() {
            warn!("insert_at_column: 页码 {} 超出范围，忽略", page_index);
            return false;
        }
        for (i, page) in self.pages.iter_mut().enumerate() {
            if i != page_index {
                page.remove(&id);
            }
        }
        debug!(
            "放置题目 {} → 第 {} 页 第 {} 栏 第 {} 位",
            id, page_index, column, index_in_column
        );
        self.pages[page_index].insert_at_column(column, index_in_column, id);
        true
    }

    /// 放到整页：自动选最矮的栏并追加到栏尾
    pub fn append_auto<C: Catalog + ?Sized>(
        &mut self,
        page_index: usize,
        id: ProblemId,
        catalog: &C,
    ) -> bool {
        let Some(page) = self.pages.get(page_index) else {
            warn!("append_auto: 页码 {} 超出范围，忽略", page_index);
            return false;
        };
        let column = pick_shortest_lane_index(&lane_heights(page, catalog, Some(&id)));
        self.insert_at_column(page_index, column, usize::MAX, id)
    }

    /// 从指定页移除题目，不存在时不做任何事
    pub fn remove_from_page(&mut self, page_index: usize, id: &ProblemId) -> bool {
        self.page_mut(page_index, "remove_from_page")
            .is_some_and(|page| page.remove(id))
    }

    /// 从所有页移除题目
    pub fn remove_problem(&mut self, id: &ProblemId) -> bool {
        self.pages
            .iter_mut()
            .fold(false, |removed, page| page.remove(id) || removed)
    }

    /// 调整栏数（夹紧到 1..=2）
    ///
    /// 减少栏数时，失效栏中的题目按规范顺序逐个放入剩余栏中最矮的一栏。
    pub fn set_columns<C: Catalog + ?Sized>(
        &mut self,
        page_index: usize,
        delta: i32,
        catalog: &C,
    ) -> bool {
        let Some(page) = self.page_mut(page_index, "set_columns") else {
            return false;
        };
        let old = page.columns();
        let new = (i32::from(old) + delta).clamp(1, i32::from(MAX_COLUMNS)) as u8;
        if new == old {
            return false;
        }
        page.set_column_count(new);

        if new < old {
            let orphans = page.orphans();
            let mut heights = vec![0.0; new as usize];
            for id in page.problem_ids() {
                if let Some(lane) = page.lane_of(id).filter(|&l| l < new as usize) {
                    heights[lane] += estimate_height_of(catalog, id);
                }
            }
            for id in &orphans {
                let lane = pick_shortest_lane_index(&heights);
                heights[lane] += estimate_height_of(catalog, id);
                page.assign_lane(id, lane);
            }
            debug!("第 {} 页由 {} 栏改为 {} 栏，重排 {} 道题", page_index, old, new, orphans.len());
        }
        true
    }

    /// 追加空白页，栏数与当前页一致，并切换到新页；返回新页下标
    pub fn add_page(&mut self) -> usize {
        let columns = self.current_page().columns();
        self.pages.push(Page::new(self.next_page_id, columns));
        self.next_page_id += 1;
        self.current = self.pages.len() - 1;
        self.current
    }

    /// 删除一页；只剩一页时不允许删除
    pub fn remove_page(&mut self, index: usize) -> bool {
        if self.pages.len() <= 1 {
            debug!("只剩一页，不能删除");
            return false;
        }
        if index >= self.pages.len() {
            warn!("remove_page: 页码 {} 超出范围，忽略", index);
            return false;
        }
        self.pages.remove(index);
        if index < self.current {
            self.current -= 1;
        }
        self.current = self.current.min(self.pages.len() - 1);
        true
    }

    /// 按页序、页内规范顺序展开所有题目
    pub fn flatten(&self) -> Vec<ProblemId> {
        self.pages
            .iter()
            .flat_map(|p| p.problem_ids().iter().cloned())
            .collect()
    }

    /// 展开并解析为完整题目
    pub fn resolve<C: Catalog + ?Sized>(&self, catalog: &C) -> Result<Vec<Problem>, CatalogError> {
        catalog.resolve(&self.flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    fn ids(items: &[&str]) -> Vec<ProblemId> {
        items.iter().map(|s| ProblemId::from(*s)).collect()
    }

    fn lane(layout: &PageLayout, page: usize, lane: usize) -> Vec<String> {
        layout.pages()[page]
            .lane_items(lane)
            .into_iter()
            .map(|p| p.to_string())
            .collect()
    }

    /// 左栏 A,B，右栏 C
    fn two_lane_layout() -> PageLayout {
        let mut layout = PageLayout::seeded(ids(&["A", "B"]), 2);
        layout.insert_at_column(0, 1, 0, "C".into());
        layout
    }

    #[test]
    fn reinsert_moves_without_duplicating() {
        let mut layout = two_lane_layout();
        assert!(layout.insert_at_column(0, 1, 0, "A".into()));
        assert_eq!(lane(&layout, 0, 0), vec!["B"]);
        assert_eq!(lane(&layout, 0, 1), vec!["A", "C"]);
        assert_eq!(layout.flatten(), ids(&["B", "A", "C"]));
    }

    #[test]
    fn empty_right_lane_appends() {
        let mut layout = PageLayout::seeded(ids(&["D004", "D004-2"]), 2);
        layout.insert_at_column(0, 1, 0, "D004-3".into());
        assert_eq!(layout.flatten(), ids(&["D004", "D004-2", "D004-3"]));
        assert_eq!(layout.pages()[0].lane_of(&"D004-3".into()), Some(1));
    }

    #[test]
    fn move_across_pages_keeps_single_copy() {
        let mut layout = two_lane_layout();
        let second = layout.add_page();
        layout.insert_at_column(second, 0, 0, "B".into());
        assert_eq!(layout.flatten(), ids(&["A", "C", "B"]));
        assert_eq!(layout.locate(&"B".into()), Some((1, 0, 0)));
    }

    #[test]
    fn invalid_page_is_noop() {
        let mut layout = two_lane_layout();
        let before = layout.clone();
        assert!(!layout.insert_at_column(7, 0, 0, "Z".into()));
        assert!(!layout.remove_from_page(7, &"A".into()));
        assert_eq!(layout, before);
    }

    #[test]
    fn remove_from_page_is_noop_when_absent() {
        let mut layout = two_lane_layout();
        assert!(layout.remove_from_page(0, &"B".into()));
        assert!(!layout.remove_from_page(0, &"B".into()));
        assert_eq!(layout.flatten(), ids(&["A", "C"]));
    }

    #[test]
    fn append_auto_picks_shortest_lane() {
        let catalog = InMemoryCatalog::new([
            Problem::new("A", "", "a".repeat(240), ""),
            Problem::new("B", "", "", ""),
            Problem::new("N", "", "", ""),
        ]);
        let mut layout = PageLayout::seeded(ids(&["A"]), 2);
        layout.insert_at_column(0, 1, 0, "B".into());
        layout.append_auto(0, "N".into(), &catalog);
        assert_eq!(lane(&layout, 0, 1), vec!["B", "N"]);
    }

    #[test]
    fn shrinking_columns_reflows_orphans() {
        let catalog = InMemoryCatalog::new([
            Problem::new("A", "", "", ""),
            Problem::new("C", "", "", ""),
        ]);
        let mut layout = two_lane_layout();
        assert!(layout.set_columns(0, -1, &catalog));
        let page = &layout.pages()[0];
        assert_eq!(page.columns(), 1);
        assert!(page.problem_ids().iter().all(|id| page.lane_of(id) == Some(0)));
        assert_eq!(lane(&layout, 0, 0), vec!["A", "B", "C"]);

        assert!(!layout.set_columns(0, -1, &catalog));
        assert!(layout.set_columns(0, 5, &catalog));
        assert_eq!(layout.pages()[0].columns(), 2);
    }

    #[test]
    fn last_page_cannot_be_removed() {
        let mut layout = PageLayout::new(2);
        assert!(!layout.remove_page(0));
        assert_eq!(layout.page_count(), 1);
    }

    #[test]
    fn removing_current_page_clamps_selection() {
        let mut layout = PageLayout::new(1);
        layout.add_page();
        let third = layout.add_page();
        assert_eq!(layout.current_page_index(), third);
        assert_eq!(layout.current_page().columns(), 1);

        assert!(layout.remove_page(third));
        assert_eq!(layout.current_page_index(), 1);
        assert!(layout.remove_page(0));
        assert_eq!(layout.current_page_index(), 0);
        assert_eq!(layout.pages()[0].id, 2);
    }

    #[test]
    fn flatten_is_stable() {
        let layout = two_lane_layout();
        assert_eq!(layout.flatten(), layout.flatten());
    }

    #[test]
    fn auto_assemble_opens_new_page_when_full() {
        let catalog = InMemoryCatalog::new(
            (1..=5).map(|i| Problem::new(format!("P{i}"), "", "", "")),
        );
        // 每题高 1.0，每栏容量 2.0，两栏一页放 4 题
        let layout = PageLayout::auto_assemble(
            ids(&["P1", "P2", "P3", "P4", "P5", "P1"]),
            2,
            2.0,
            &catalog,
        );
        assert_eq!(layout.page_count(), 2);
        assert_eq!(lane(&layout, 0, 0), vec!["P1", "P3"]);
        assert_eq!(lane(&layout, 0, 1), vec!["P2", "P4"]);
        assert_eq!(lane(&layout, 1, 0), vec!["P5"]);
        assert_eq!(layout.current_page_index(), 0);
        assert_eq!(layout.flatten().len(), 5);
    }
}
