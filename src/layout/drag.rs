//! 拖放适配层
//!
//! 两种拖放实现都只负责把事件翻译成 [`PageLayout`] 上的操作：
//!
//! - 指针拖放：每个栏位都是放置目标，拖动过程中实时计算插入指示线；
//!   HTML5 拖放的载荷是 JSON 字符串，解析失败时静默忽略。
//! - 列表拖放：每栏一个 droppable（`page-{p}-lane-{c}`），按
//!   `source.index` / `destination.index` 描述移动。
//!
//! 同一个逻辑移动（把题目从 A 栏第 i 位移到 B 栏第 j 位）在两种实现下得到相同的状态。
//! 指针拖放的栏内位置按“不含被拖动题目”计数，与列表拖放的 `destination.index` 一致。

use crate::catalog::Catalog;
use crate::error::LayoutError;
use crate::layout::engine::PageLayout;
use crate::layout::height::choose_target_column;
use crate::models::ProblemId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

// ========== 指针拖放 ==========

/// 指针落点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// 某一栏的某个位置
    Slot {
        page: usize,
        column: usize,
        index: usize,
    },
    /// 某一栏（追加到栏尾）
    Lane { page: usize, column: usize },
    /// 整页容器（自动选最矮的栏）
    Page { page: usize },
    /// 不在任何放置区域
    Nowhere,
}

/// 插入指示线位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsertionIndicator {
    pub page: usize,
    pub column: usize,
    pub index: usize,
}

/// 计算拖动经过 `target` 时的插入位置；没有合法落点时返回 None
pub fn preview_drop<C: Catalog + ?Sized>(
    layout: &PageLayout,
    catalog: &C,
    dragged: &ProblemId,
    target: DropTarget,
) -> Option<InsertionIndicator> {
    let (page_index, column, index) = match target {
        DropTarget::Slot {
            page,
            column,
            index,
        } => (page, Some(column), Some(index)),
        DropTarget::Lane { page, column } => (page, Some(column), None),
        DropTarget::Page { page } => (page, None, None),
        DropTarget::Nowhere => return None,
    };
    let page = layout.page(page_index)?;

    let column = match column {
        Some(c) => c.min(page.columns() as usize - 1),
        None => choose_target_column(page, catalog, Some(dragged)),
    };
    let lane_len = page
        .lane_items(column)
        .into_iter()
        .filter(|id| *id != dragged)
        .count();
    let index = index.map_or(lane_len, |i| i.min(lane_len));

    Some(InsertionIndicator {
        page: page_index,
        column,
        index,
    })
}

/// 指针松开：按插入指示线放置题目
pub fn apply_pointer_drop<C: Catalog + ?Sized>(
    layout: &mut PageLayout,
    catalog: &C,
    dragged: &ProblemId,
    target: DropTarget,
) -> bool {
    match preview_drop(layout, catalog, dragged, target) {
        Some(at) => layout.insert_at_column(at.page, at.column, at.index, dragged.clone()),
        None => {
            debug!("题目 {} 没有落在放置区域，忽略", dragged);
            false
        }
    }
}

/// HTML5 拖放载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub problem_id: ProblemId,
    /// 拖动开始时题目所在的页，来自题库列表时为空
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_page: Option<usize>,
}

impl DragPayload {
    pub fn parse(raw: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(raw).map_err(|source| LayoutError::InvalidPayload { source })
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// 处理带 JSON 载荷的放置事件，载荷无法解析时不修改状态
pub fn apply_payload_drop<C: Catalog + ?Sized>(
    layout: &mut PageLayout,
    catalog: &C,
    raw_payload: &str,
    target: DropTarget,
) -> bool {
    match DragPayload::parse(raw_payload) {
        Ok(payload) => {
            let actual_page = layout.locate(&payload.problem_id).map(|(page, _, _)| page);
            if payload.from_page != actual_page {
                debug!(
                    "载荷来源页 {:?} 与题目 {} 实际所在页 {:?} 不一致，按实际位置移动",
                    payload.from_page, payload.problem_id, actual_page
                );
            }
            apply_pointer_drop(layout, catalog, &payload.problem_id, target)
        }
        Err(e) => {
            debug!("忽略无效的拖放载荷: {}", e);
            false
        }
    }
}

// ========== 列表拖放 ==========

/// 题库列表的 droppable 标识
pub const CATALOG_DROPPABLE: &str = "catalog";

/// 列表拖放的放置区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Droppable {
    Catalog,
    Lane { page: usize, column: usize },
}

impl Droppable {
    pub fn lane_id(page: usize, column: usize) -> String {
        format!("page-{}-lane-{}", page, column)
    }
}

impl FromStr for Droppable {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == CATALOG_DROPPABLE {
            return Ok(Droppable::Catalog);
        }
        let unknown = || LayoutError::UnknownDroppable(s.to_string());
        let rest = s.strip_prefix("page-").ok_or_else(unknown)?;
        let (page, column) = rest.split_once("-lane-").ok_or_else(unknown)?;
        Ok(Droppable::Lane {
            page: page.parse().map_err(|_| unknown())?,
            column: column.parse().map_err(|_| unknown())?,
        })
    }
}

/// 拖放位置：droppable 标识 + 列表内下标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggableLocation {
    pub droppable_id: String,
    pub index: usize,
}

/// 列表拖放结束事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub draggable_id: ProblemId,
    pub source: DraggableLocation,
    #[serde(default)]
    pub destination: Option<DraggableLocation>,
}

/// 把列表拖放结束事件翻译为排版操作
///
/// 拖回题库列表等于从排版中移除；没有目标、原地放下或无法识别目标时不做任何事。
pub fn apply_drag_end(layout: &mut PageLayout, event: &DragEnd) -> bool {
    let Some(destination) = &event.destination else {
        return false;
    };
    if destination == &event.source {
        return false;
    }

    match destination.droppable_id.parse::<Droppable>() {
        Ok(Droppable::Catalog) => layout.remove_problem(&event.draggable_id),
        Ok(Droppable::Lane { page, column }) => layout.insert_at_column(
            page,
            column,
            destination.index,
            event.draggable_id.clone(),
        ),
        Err(e) => {
            debug!("忽略拖放结束事件: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::models::Problem;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new([
            Problem::new("A", "", "a".repeat(300), ""),
            Problem::new("B", "", "", ""),
            Problem::new("C", "", "", ""),
            Problem::new("D", "", "", ""),
        ])
    }

    /// 左栏 A,B，右栏 C,D
    fn layout() -> PageLayout {
        let mut layout = PageLayout::seeded(["A".into(), "B".into()], 2);
        layout.insert_at_column(0, 1, 0, "C".into());
        layout.insert_at_column(0, 1, 1, "D".into());
        layout
    }

    fn drag_end(id: &str, from: (usize, usize, usize), to: (usize, usize, usize)) -> DragEnd {
        DragEnd {
            draggable_id: id.into(),
            source: DraggableLocation {
                droppable_id: Droppable::lane_id(from.0, from.1),
                index: from.2,
            },
            destination: Some(DraggableLocation {
                droppable_id: Droppable::lane_id(to.0, to.1),
                index: to.2,
            }),
        }
    }

    #[test]
    fn pointer_and_list_moves_are_equivalent() {
        let catalog = catalog();
        let moves = [
            ("A", (0, 0, 0), (0, 1, 1)),
            ("B", (0, 0, 1), (0, 0, 0)),
            ("D", (0, 1, 1), (0, 0, 5)),
            ("C", (0, 1, 0), (0, 1, 1)),
        ];
        for (id, from, to) in moves {
            let mut by_pointer = layout();
            let mut by_list = layout();
            apply_pointer_drop(
                &mut by_pointer,
                &catalog,
                &id.into(),
                DropTarget::Slot {
                    page: to.0,
                    column: to.1,
                    index: to.2,
                },
            );
            apply_drag_end(&mut by_list, &drag_end(id, from, to));
            assert_eq!(by_pointer, by_list, "move {id} {from:?} -> {to:?}");
        }
    }

    #[test]
    fn page_drop_previews_shortest_lane() {
        let catalog = catalog();
        let layout = layout();
        // 左栏有 A（很高），右栏只有两道短题
        let at = preview_drop(&layout, &catalog, &"N".into(), DropTarget::Page { page: 0 });
        assert_eq!(
            at,
            Some(InsertionIndicator {
                page: 0,
                column: 1,
                index: 2
            })
        );
    }

    #[test]
    fn preview_excludes_dragged_item() {
        let catalog = catalog();
        let layout = layout();
        let at = preview_drop(
            &layout,
            &catalog,
            &"C".into(),
            DropTarget::Lane { page: 0, column: 1 },
        );
        assert_eq!(at.map(|a| a.index), Some(1));
        assert_eq!(
            preview_drop(&layout, &catalog, &"C".into(), DropTarget::Nowhere),
            None
        );
        assert_eq!(
            preview_drop(&layout, &catalog, &"C".into(), DropTarget::Page { page: 3 }),
            None
        );
    }

    #[test]
    fn malformed_payload_leaves_state_unchanged() {
        let catalog = catalog();
        let mut layout = layout();
        let before = layout.clone();
        assert!(!apply_payload_drop(
            &mut layout,
            &catalog,
            "{not json",
            DropTarget::Page { page: 0 }
        ));
        assert_eq!(layout, before);

        let payload = DragPayload {
            problem_id: "N".into(),
            from_page: None,
        }
        .encode();
        assert!(apply_payload_drop(
            &mut layout,
            &catalog,
            &payload,
            DropTarget::Slot {
                page: 0,
                column: 0,
                index: 0
            }
        ));
        assert_eq!(layout.flatten()[0].as_str(), "N");
    }

    #[test]
    fn payload_carries_source_page() {
        let payload = DragPayload::parse(r#"{"problemId":"C","fromPage":0}"#).unwrap();
        assert_eq!(payload.from_page, Some(0));
        assert_eq!(DragPayload::parse(&payload.encode()).unwrap(), payload);

        let from_catalog = DragPayload::parse(r#"{"problemId":"N"}"#).unwrap();
        assert_eq!(from_catalog.from_page, None);
        assert!(!from_catalog.encode().contains("fromPage"));

        // 来源页与实际位置不一致时仍按实际位置移动
        let catalog = catalog();
        let mut layout = layout();
        layout.add_page();
        let stale = r#"{"problemId":"C","fromPage":1}"#;
        assert!(apply_payload_drop(
            &mut layout,
            &catalog,
            stale,
            DropTarget::Slot {
                page: 1,
                column: 0,
                index: 0
            }
        ));
        assert_eq!(layout.locate(&"C".into()), Some((1, 0, 0)));
        assert_eq!(layout.pages()[0].lane_items(1), vec![&ProblemId::from("D")]);
    }

    #[test]
    fn drag_end_without_destination_or_to_catalog() {
        let mut layout = layout();
        let mut event = drag_end("B", (0, 0, 1), (0, 0, 1));
        assert!(!apply_drag_end(&mut layout, &event));

        event.destination = None;
        assert!(!apply_drag_end(&mut layout, &event));

        event.destination = Some(DraggableLocation {
            droppable_id: CATALOG_DROPPABLE.to_string(),
            index: 0,
        });
        assert!(apply_drag_end(&mut layout, &event));
        assert!(!layout.contains(&"B".into()));

        event.destination = Some(DraggableLocation {
            droppable_id: "sidebar".to_string(),
            index: 0,
        });
        assert!(!apply_drag_end(&mut layout, &event));
    }

    #[test]
    fn droppable_ids_round_trip() {
        assert_eq!(
            Droppable::lane_id(3, 1).parse::<Droppable>().unwrap(),
            Droppable::Lane { page: 3, column: 1 }
        );
        assert!("page-x-lane-1".parse::<Droppable>().is_err());
    }

    #[test]
    fn drag_end_deserializes_from_json() {
        let event: DragEnd = serde_json::from_str(
            r#"{"draggableId":"A","source":{"droppableId":"page-0-lane-0","index":0},"destination":null}"#,
        )
        .unwrap();
        assert_eq!(event.draggable_id.as_str(), "A");
        assert!(event.destination.is_none());
    }
}
