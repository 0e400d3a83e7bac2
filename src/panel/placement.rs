//! 面板几何求解
//!
//! 内容尺寸一律在逻辑横排空间计算，纵排只在出口处换轴并附带
//! 旋转变换，四边夹紧因此与朝向无关。屏幕坐标 y 向下。

use tracing::trace;

use crate::geometry::{Point, Rect, Size};
use crate::theme::{Theme, CARET_GAP};

/// 屏占比上限（长边方向）
const SCREEN_FILL_RATIO: f32 = 0.95;

/// 求解输入
#[derive(Debug, Clone, Copy)]
pub struct PlacementInput<'a> {
    /// 文档内容自然尺寸（逻辑横排空间）
    pub content: Size,
    /// 光标锚点矩形
    pub caret: Rect,
    /// 所在屏幕矩形
    pub screen: Rect,
    /// 编码串渲染块尺寸（非空编码串时首个候选要避开它）
    pub preedit_block: Option<Size>,
    pub theme: &'a Theme,
}

/// 求解输出：面板矩形 + 渲染边界要应用的旋转
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    pub rect: Rect,
    /// 纵排 -90°，否则 0°
    pub rotation_degrees: f32,
    /// 旋转枢轴原点（纵排为 (0, 面板宽)）
    pub rotation_origin: Point,
}

/// 文本限宽：纵排取屏高的 1/4、横排取屏宽的 1/3，按字号比例微调，
/// 再扣除边距。
pub fn max_text_width(theme: &Theme, screen: Rect) -> f32 {
    let font_scale = theme.font_size / 12.0;
    let ratio_base = if theme.vertical { 1.0 / 4.0 } else { 1.0 / 3.0 };
    let ratio = (ratio_base + font_scale / 12.0).min(1.0);
    if theme.vertical {
        screen.height * ratio - theme.edge_inset.height * 2.0
    } else {
        screen.width * ratio - theme.edge_inset.width * 2.0
    }
}

/// 求一个贴着光标、尽量完整落在屏幕内的面板矩形
///
/// `max_height` 是纵排尺寸记忆：跨 update 持有，面板隐藏时由调用方清零。
/// 除它之外输出只由输入决定。
pub fn solve(input: &PlacementInput<'_>, max_height: &mut f32) -> PanelGeometry {
    let theme = input.theme;
    let caret = input.caret;
    let screen = input.screen;
    let inset = theme.edge_inset;
    let mut content = input.content;

    // 尺寸记忆：纵排且内容会越过屏幕右缘时，取当前内容与记忆值中
    // 较大者，避免窄内容引起的宽度抖动
    if theme.memorize_size
        && theme.vertical
        && caret.left() + content.width.max(*max_height) + inset.width * 2.0 > screen.right()
    {
        let clamped = content.width.max(*max_height);
        content.width = clamped;
        *max_height = clamped;
    }

    let mut rect;
    if theme.vertical {
        // 换轴：面板宽高分别来自内容高宽
        let width = (SCREEN_FILL_RATIO * screen.width).min(content.height + inset.height * 2.0);
        let height = (SCREEN_FILL_RATIO * screen.height).min(content.width + inset.width * 2.0)
            + theme.paging_offset;

        // 光标在下半屏放上方、上半屏放下方，贴边打字时不来回跳
        let y = if caret.mid_y() >= screen.mid_y() {
            caret.top() - CARET_GAP - height + theme.paging_offset
        } else {
            caret.bottom() + CARET_GAP
        };
        // 面板右缘贴光标左侧，首列候选紧邻光标
        let mut x = caret.left() - width - CARET_GAP;
        if let Some(preedit) = input.preedit_block {
            // 避开编码串占位，首个候选仍与光标对齐
            x += preedit.height + inset.width;
        }
        rect = Rect::new(x, y, width, height);
    } else {
        let width = (SCREEN_FILL_RATIO * screen.width).min(content.width + inset.width * 2.0)
            + theme.paging_offset;
        let height = (SCREEN_FILL_RATIO * screen.height).min(content.height + inset.height * 2.0);
        rect = Rect::new(caret.left() - theme.paging_offset, caret.bottom() + CARET_GAP, width, height);
    }

    // 四边夹紧，两遍检查，与朝向无关
    if rect.right() > screen.right() {
        rect.x = screen.right() - rect.width;
    }
    if rect.left() < screen.left() {
        rect.x = screen.left();
    }
    if rect.bottom() > screen.bottom() {
        if theme.vertical {
            rect.y = screen.bottom() - rect.height;
        } else {
            // 横排改挂到光标上方
            rect.y = caret.top() - CARET_GAP - rect.height;
        }
    }
    if rect.top() < screen.top() {
        rect.y = screen.top();
    }
    if rect.bottom() > screen.bottom() {
        rect.y = screen.bottom() - rect.height;
    }

    let geometry = if theme.vertical {
        PanelGeometry {
            rect,
            rotation_degrees: -90.0,
            rotation_origin: Point::new(0.0, rect.width),
        }
    } else {
        PanelGeometry { rect, rotation_degrees: 0.0, rotation_origin: Point::default() }
    };
    trace!(rect = ?geometry.rect, rotation = geometry.rotation_degrees, "solved panel geometry");
    geometry
}
