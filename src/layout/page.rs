use crate::config::MAX_COLUMNS;
use crate::models::ProblemId;
use serde::Serialize;
use std::collections::BTreeMap;

/// 一页试卷
///
/// `problem_ids` 是本页的规范顺序（先左栏后右栏、自上而下），提交和打印都按它展开。
/// 栏内成员不单独存储，而是用 `lane_of` 过滤 `problem_ids` 得到。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub id: u32,
    columns: u8,
    problem_ids: Vec<ProblemId>,
    lane_of: BTreeMap<ProblemId, usize>,
}

impl Page {
    pub fn new(id: u32, columns: u8) -> Self {
        Self {
            id,
            columns: columns.clamp(1, MAX_COLUMNS),
            problem_ids: Vec::new(),
            lane_of: BTreeMap::new(),
        }
    }

    /// 用初始选题创建页面，全部放在第 0 栏，重复的题目只保留第一次
    pub fn seeded(id: u32, columns: u8, ids: impl IntoIterator<Item = ProblemId>) -> Self {
        let mut page = Self::new(id, columns);
        for pid in ids {
            if page.lane_of.contains_key(&pid) {
                continue;
            }
            page.lane_of.insert(pid.clone(), 0);
            page.problem_ids.push(pid);
        }
        page
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn problem_ids(&self) -> &[ProblemId] {
        &self.problem_ids
    }

    pub fn len(&self) -> usize {
        self.problem_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problem_ids.is_empty()
    }

    pub fn contains(&self, id: &ProblemId) -> bool {
        self.lane_of.contains_key(id)
    }

    /// 题目所在栏；不在本页时返回 None
    pub fn lane_of(&self, id: &ProblemId) -> Option<usize> {
        self.contains(id).then(|| self.lane(id))
    }

    fn lane(&self, id: &ProblemId) -> usize {
        self.lane_of.get(id).copied().unwrap_or(0)
    }

    /// 按规范顺序取出某一栏的题目
    pub fn lane_items(&self, lane: usize) -> Vec<&ProblemId> {
        self.problem_ids
            .iter()
            .filter(|id| self.lane(id) == lane)
            .collect()
    }

    /// 所有栏，长度等于 `columns`
    pub fn lanes(&self) -> Vec<Vec<&ProblemId>> {
        (0..self.columns as usize).map(|l| self.lane_items(l)).collect()
    }

    /// 题目在所在栏中的位置
    pub fn position_in_lane(&self, id: &ProblemId) -> Option<(usize, usize)> {
        let lane = self.lane_of(id)?;
        let index = self.lane_items(lane).iter().position(|p| *p == id)?;
        Some((lane, index))
    }

    pub(crate) fn remove(&mut self, id: &ProblemId) -> bool {
        if self.lane_of.remove(id).is_none() {
            return false;
        }
        self.problem_ids.retain(|p| p != id);
        true
    }

    /// 把题目放到 `column` 栏的第 `index_in_column` 位
    ///
    /// 目标栏非空时插在该位置现有题目之前，越界则紧跟在栏内最后一题之后。
    /// 目标栏为空时插在所有更低编号栏的最后一题之后，没有则放在最前面。
    pub(crate) fn insert_at_column(&mut self, column: usize, index_in_column: usize, id: ProblemId) {
        let column = column.min(self.columns as usize - 1);
        self.remove(&id);

        let lane_positions: Vec<usize> = self
            .problem_ids
            .iter()
            .enumerate()
            .filter(|(_, p)| self.lane(p) == column)
            .map(|(i, _)| i)
            .collect();

        let at = match (lane_positions.get(index_in_column), lane_positions.last()) {
            (Some(&pos), _) => pos,
            (None, Some(&last)) => last + 1,
            (None, None) => self
                .problem_ids
                .iter()
                .rposition(|p| self.lane(p) < column)
                .map_or(0, |i| i + 1),
        };

        self.problem_ids.insert(at, id.clone());
        self.lane_of.insert(id, column);
    }

    pub(crate) fn set_column_count(&mut self, columns: u8) {
        self.columns = columns.clamp(1, MAX_COLUMNS);
    }

    /// 栏号已失效的题目（缩减栏数之后）
    pub(crate) fn orphans(&self) -> Vec<ProblemId> {
        let columns = self.columns as usize;
        self.problem_ids
            .iter()
            .filter(|id| self.lane(id) >= columns)
            .cloned()
            .collect()
    }

    pub(crate) fn assign_lane(&mut self, id: &ProblemId, lane: usize) {
        if let Some(slot) = self.lane_of.get_mut(id) {
            *slot = lane.min(self.columns as usize - 1);
        }
    }
}
