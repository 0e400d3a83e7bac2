//! 事件系统 - 面板指针/滚动输入与回传命令

use crate::geometry::Point;

/// 滚动事件阶段
///
/// 触控板手势带显式阶段标记；普通滚轮没有阶段（`Wheel`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// 手势开始
    Began,
    /// 手势进行中
    Changed,
    /// 手势显式结束
    Ended,
    /// 惯性阶段（首个惯性事件视同手势结束）
    Momentum,
    /// 无阶段标记的滚轮脉冲
    Wheel,
}

/// 面板接收的原始输入事件
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// 指针按下（内容本地坐标）
    PointerDown { pos: Point },
    /// 指针抬起
    PointerUp { pos: Point },
    /// 指针进入面板
    HoverEnter,
    /// 指针离开面板
    HoverExit,
    /// 指针在面板内移动
    HoverMove { pos: Point },
    /// 滚动/轨迹板手势
    Scroll { delta_x: f32, delta_y: f32, phase: ScrollPhase, time_ms: u64 },
}

/// 回传给合成引擎的离散命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 选定候选
    SelectCandidate(usize),
    /// 翻页
    Page { up: bool },
    /// 移动编码串光标
    MoveCaret { forward: bool },
}
