//! 输入解释器
//!
//! 把原始指针/滚动事件对着当前命中区域累积成离散命令。
//! 按下/抬起必须落在同一目标才成立（翻页、选定皆如此），拖过去
//! 再松开不算；悬停只触发高亮刷新，绝不发命令。

use tracing::trace;

use crate::event::{Command, InputEvent, ScrollPhase};
use crate::geometry::{Point, Rect};

/// 滚动累计超过该值才翻页（严格大于）
const SCROLL_THRESHOLD: f32 = 10.0;
/// 滚轮间隔超过该值视为新手势（毫秒）
const WHEEL_IDLE_MS: u64 = 1000;

/// 当前面板的命中区域
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    /// 候选下标 -> 矩形
    pub candidates: Vec<(usize, Rect)>,
    /// 编码串逐字符矩形
    pub preedit_chars: Vec<Rect>,
    /// 向前翻页热区
    pub page_up: Option<Rect>,
    /// 向后翻页热区
    pub page_down: Option<Rect>,
}

/// 一次命中测试的结果
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitTarget {
    pub candidate: Option<usize>,
    pub preedit_offset: Option<usize>,
    pub paging_up: Option<bool>,
}

impl HitMap {
    pub fn hit(&self, pos: Point) -> HitTarget {
        let candidate = self
            .candidates
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(&pos))
            .map(|(i, _)| *i);
        let preedit_offset = self
            .preedit_chars
            .iter()
            .position(|rect| rect.contains(&pos));
        let paging_up = if self.page_up.map_or(false, |r| r.contains(&pos)) {
            Some(true)
        } else if self.page_down.map_or(false, |r| r.contains(&pos)) {
            Some(false)
        } else {
            None
        };
        HitTarget { candidate, preedit_offset, paging_up }
    }
}

/// 解释器所需的面板当前状态
#[derive(Debug, Clone, Copy)]
pub struct InterpretContext {
    /// 候选个数
    pub candidate_count: usize,
    /// 已提交的高亮下标
    pub highlighted: usize,
    /// 当前绘制出的悬停高亮下标
    pub cursor_index: usize,
    /// 编码串光标位置（字符）
    pub caret_pos: usize,
    /// 编码串长度（字符）
    pub preedit_len: usize,
    /// 纵排模式
    pub vertical: bool,
}

/// 解释结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// 无动作
    None,
    /// 回传命令给合成引擎
    Command(Command),
    /// 只刷新高亮到指定下标，不发命令
    HoverHighlight(usize),
}

/// 滚动手势累加器
#[derive(Debug, Clone, Copy, Default)]
struct GestureAccumulator {
    dx: f32,
    dy: f32,
    /// 上一个无阶段滚轮事件的时间
    last_wheel_ms: u64,
}

impl GestureAccumulator {
    fn reset(&mut self) {
        self.dx = 0.0;
        self.dy = 0.0;
    }
}

/// 指针/滚动输入状态机
#[derive(Debug, Default)]
pub struct Interpreter {
    /// 按下时命中的候选
    pressed_index: Option<usize>,
    /// 按下时命中的翻页方向
    pressed_paging: Option<bool>,
    /// 悬停跟踪开关（进入面板后才跟踪移动）
    tracking: bool,
    scroll: GestureAccumulator,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 消费一个事件，产出至多一个命令或一次高亮刷新
    pub fn interpret(
        &mut self,
        event: &InputEvent,
        hit_map: &HitMap,
        ctx: &InterpretContext,
    ) -> InputOutcome {
        let outcome = match event {
            InputEvent::PointerDown { pos } => {
                let target = hit_map.hit(*pos);
                self.pressed_paging = target.paging_up;
                self.pressed_index =
                    target.candidate.filter(|i| *i < ctx.candidate_count);
                InputOutcome::None
            }
            InputEvent::PointerUp { pos } => self.release(*pos, hit_map, ctx),
            InputEvent::HoverEnter => {
                self.tracking = true;
                InputOutcome::None
            }
            InputEvent::HoverExit => {
                self.tracking = false;
                self.pressed_paging = None;
                // 悬停高亮和已提交高亮不一致时恢复原样
                if ctx.cursor_index != ctx.highlighted {
                    InputOutcome::HoverHighlight(ctx.highlighted)
                } else {
                    InputOutcome::None
                }
            }
            InputEvent::HoverMove { pos } => {
                if !self.tracking {
                    return InputOutcome::None;
                }
                match hit_map.hit(*pos).candidate {
                    Some(i) if i != ctx.cursor_index && i < ctx.candidate_count => {
                        InputOutcome::HoverHighlight(i)
                    }
                    _ => InputOutcome::None,
                }
            }
            InputEvent::Scroll { delta_x, delta_y, phase, time_ms } => {
                self.scroll_event(*delta_x, *delta_y, *phase, *time_ms, ctx)
            }
        };
        if let InputOutcome::Command(cmd) = outcome {
            trace!(?cmd, "input command");
        }
        outcome
    }

    /// 指针抬起：翻页 > 光标移动 > 选定，只发第一个成立的命令
    fn release(&mut self, pos: Point, hit_map: &HitMap, ctx: &InterpretContext) -> InputOutcome {
        let target = hit_map.hit(pos);
        let pressed_index = self.pressed_index.take();
        let pressed_paging = self.pressed_paging.take();

        // 翻页要求按下与抬起方向一致
        if let (Some(up), Some(pressed)) = (target.paging_up, pressed_paging) {
            if up == pressed {
                return InputOutcome::Command(Command::Page { up });
            }
        }

        // 点在编码串上且偏离当前光标：光标追向点击处
        if let Some(offset) = target.preedit_offset {
            if offset < ctx.preedit_len && offset != ctx.caret_pos {
                return InputOutcome::Command(Command::MoveCaret {
                    forward: offset < ctx.caret_pos,
                });
            }
        }

        // 经典点击确认：按下与抬起须同一候选
        if let (Some(i), Some(pressed)) = (target.candidate, pressed_index) {
            if i == pressed && i < ctx.candidate_count {
                return InputOutcome::Command(Command::SelectCandidate(i));
            }
        }

        InputOutcome::None
    }

    fn scroll_event(
        &mut self,
        delta_x: f32,
        delta_y: f32,
        phase: ScrollPhase,
        time_ms: u64,
        ctx: &InterpretContext,
    ) -> InputOutcome {
        match phase {
            ScrollPhase::Began => {
                self.scroll.reset();
                InputOutcome::None
            }
            ScrollPhase::Changed => {
                self.scroll.dx += delta_x;
                self.scroll.dy += delta_y;
                InputOutcome::None
            }
            // 显式结束或进入惯性都按手势结束结算
            ScrollPhase::Ended | ScrollPhase::Momentum => {
                let (dx, dy) = (self.scroll.dx, self.scroll.dy);
                self.scroll.reset();
                if dx.abs() > dy.abs() && dx.abs() > SCROLL_THRESHOLD {
                    // 纵排模式下水平滚动的翻页方向翻转
                    InputOutcome::Command(Command::Page { up: (dx < 0.0) == ctx.vertical })
                } else if dx.abs() < dy.abs() && dy.abs() > SCROLL_THRESHOLD {
                    InputOutcome::Command(Command::Page { up: dy > 0.0 })
                } else {
                    InputOutcome::None
                }
            }
            // 普通滚轮没有结束信号：同号累计，过阈值立即翻页
            ScrollPhase::Wheel => {
                if time_ms.saturating_sub(self.scroll.last_wheel_ms) > WHEEL_IDLE_MS {
                    self.scroll.reset();
                }
                self.scroll.last_wheel_ms = time_ms;
                if (self.scroll.dy >= 0.0 && delta_y > 0.0)
                    || (self.scroll.dy <= 0.0 && delta_y < 0.0)
                {
                    self.scroll.dy += delta_y;
                } else {
                    // 方向反转：重新累计
                    self.scroll.reset();
                }
                if self.scroll.dy.abs() > SCROLL_THRESHOLD {
                    let up = self.scroll.dy > 0.0;
                    self.scroll.reset();
                    InputOutcome::Command(Command::Page { up })
                } else {
                    InputOutcome::None
                }
            }
        }
    }
}
