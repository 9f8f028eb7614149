//! 只读题库
//!
//! 排版引擎只通过 [`Catalog`] 查询题目，不持有题目内容。

use crate::error::CatalogError;
use crate::models::{Problem, ProblemBank, ProblemId};
use std::collections::HashMap;
use tracing::debug;

/// 题库查询接口
pub trait Catalog {
    fn lookup(&self, id: &ProblemId) -> Option<&Problem>;

    /// 将题目ID列表解析为完整题目，缺失任意一道即失败
    fn resolve(&self, ids: &[ProblemId]) -> Result<Vec<Problem>, CatalogError> {
        ids.iter()
            .map(|id| {
                self.lookup(id)
                    .cloned()
                    .ok_or_else(|| CatalogError::ProblemNotFound(id.clone()))
            })
            .collect()
    }
}

/// 内存题库，保持加载顺序，ID 重复时保留第一次出现的题目
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    problems: Vec<Problem>,
    index: HashMap<ProblemId, usize>,
}

impl InMemoryCatalog {
    pub fn new(problems: impl IntoIterator<Item = Problem>) -> Self {
        let mut catalog = Self::default();
        for problem in problems {
            catalog.insert(problem);
        }
        catalog
    }

    pub fn from_banks(banks: impl IntoIterator<Item = ProblemBank>) -> Self {
        Self::new(banks.into_iter().flat_map(|bank| bank.problems))
    }

    /// 加入一道题，返回是否为新题
    pub fn insert(&mut self, problem: Problem) -> bool {
        if self.index.contains_key(&problem.id) {
            debug!("题库中已存在题目 {}，忽略重复项", problem.id);
            return false;
        }
        self.index.insert(problem.id.clone(), self.problems.len());
        self.problems.push(problem);
        true
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }
}

impl Catalog for InMemoryCatalog {
    fn lookup(&self, id: &ProblemId) -> Option<&Problem> {
        self.index.get(id).map(|&i| &self.problems[i])
    }
}
