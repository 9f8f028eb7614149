//! 试卷排版引擎
//!
//! - `page` / `engine`：页面、栏与题目顺序的纯内存状态
//! - `height`：题目高度估算与最短栏选择
//! - `drag`：两种拖放事件到排版操作的翻译
//! - `print_plan`：输出给打印预览的分页分栏结果

pub mod drag;
pub mod engine;
pub mod height;
pub mod page;
pub mod print_plan;

pub use drag::{
    apply_drag_end, apply_payload_drop, apply_pointer_drop, preview_drop, DragEnd, DragPayload,
    DraggableLocation, DropTarget, Droppable, InsertionIndicator,
};
pub use engine::PageLayout;
pub use height::{choose_target_column, estimate_height, lane_heights, pick_shortest_lane_index};
pub use page::Page;
pub use print_plan::{build_print_plan, PrintPlan};
