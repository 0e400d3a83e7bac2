//! 渲染边界
//!
//! 核心只产出一帧的描述（文档 + 行盒 + 几何），绘制由边界另一侧的
//! 宿主视图完成。几何与排布都算完之前不会有帧交给渲染器。

use crate::layout::{ComposedDocument, DocumentLayout};
use crate::panel::placement::PanelGeometry;
use crate::theme::Theme;

/// 一帧完整的面板内容
#[derive(Debug, Clone)]
pub struct PanelFrame {
    pub document: ComposedDocument,
    pub layout: DocumentLayout,
    pub geometry: PanelGeometry,
    /// 可向前翻页（当前页 > 0）
    pub can_page_up: bool,
    /// 可向后翻页（非最后一页）
    pub can_page_down: bool,
    /// 状态提示帧（无候选、无编码串）
    pub is_status: bool,
}

/// 面板渲染能力
pub trait PanelRenderer {
    /// 上屏一帧
    fn render(&mut self, frame: &PanelFrame, theme: &Theme);
    /// 从屏幕撤下面板
    fn withdraw(&mut self);
}
