//! 面板生命周期控制器
//!
//! 持有唯一一份合成状态，串起 合成 → 排布 → 几何求解 → 渲染 的
//! 单向流程，并管理 显示候选 / 显示状态提示 / 隐藏 三态之间的
//! 切换与状态提示的自动隐藏计时。

use std::ops::Range;

use tracing::{debug, warn};

use crate::event::{Command, InputEvent};
use crate::geometry::Rect;
use crate::input::{HitMap, InputOutcome, Interpreter, InterpretContext};
use crate::layout::{self, ComposedDocument, StyledRun, StyleTag};
use crate::panel::frame::{PanelFrame, PanelRenderer};
use crate::panel::placement::{self, PlacementInput};
use crate::panel::task::TaskSlot;
use crate::text::TextMeasurer;
use crate::theme::{StatusMessageType, Theme, ThemeConfig, STATUS_DURATION_MS};

/// 合成引擎推过来的一次完整状态
///
/// 由控制器独占持有，权威更新时整体替换，其他组件只读。
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionState {
    /// 编码串
    pub preedit: String,
    /// 编码串中被选中的字符区间
    pub sel_range: Range<usize>,
    /// 编码串光标位置（字符）
    pub caret_pos: usize,
    /// 候选项
    pub candidates: Vec<String>,
    /// 注释（与候选等长）
    pub comments: Vec<String>,
    /// 标签（全局一套或逐候选一项）
    pub labels: Vec<String>,
    /// 当前高亮（从 0 开始）
    pub highlighted: usize,
    /// 当前页
    pub page: usize,
    /// 当前是否最后一页
    pub last_page: bool,
}

impl Default for CompositionState {
    fn default() -> Self {
        Self {
            preedit: String::new(),
            sel_range: 0..0,
            caret_pos: 0,
            candidates: Vec::new(),
            comments: Vec::new(),
            labels: Vec::new(),
            highlighted: 0,
            page: 0,
            last_page: true,
        }
    }
}

/// 面板生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelLifecycleState {
    #[default]
    Hidden,
    ShowingCandidates,
    ShowingStatus,
}

/// 候选面板控制器
pub struct CandidatePanel<M: TextMeasurer, R: PanelRenderer> {
    measurer: M,
    renderer: R,

    theme: Theme,
    dark_theme: Option<Theme>,
    dark_mode: bool,

    state: CompositionState,
    lifecycle: PanelLifecycleState,
    /// 待显示的状态提示
    status_message: String,
    /// 状态提示自动隐藏任务
    hide_task: TaskSlot,
    /// 当前绘制出的高亮（悬停刷新会让它偏离已提交高亮）
    cursor_index: usize,
    /// 纵排尺寸记忆，隐藏时清零
    max_height: f32,

    caret: Rect,
    screen: Rect,

    hit_map: HitMap,
    interpreter: Interpreter,
}

impl<M: TextMeasurer, R: PanelRenderer> CandidatePanel<M, R> {
    pub fn new(measurer: M, renderer: R) -> Self {
        Self {
            measurer,
            renderer,
            theme: Theme::default(),
            dark_theme: None,
            dark_mode: false,
            state: CompositionState::default(),
            lifecycle: PanelLifecycleState::Hidden,
            status_message: String::new(),
            hide_task: TaskSlot::new(),
            cursor_index: 0,
            max_height: 0.0,
            caret: Rect::default(),
            screen: Rect::default(),
            hit_map: HitMap::default(),
            interpreter: Interpreter::new(),
        }
    }

    /// 装载外部解析好的主题配置（亮/暗各一份）
    pub fn load_theme(&mut self, config: &ThemeConfig, dark: bool) {
        let theme = Theme::from_config(config);
        if dark {
            self.dark_theme = Some(theme);
        } else {
            self.theme = theme;
        }
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.dark_mode = dark;
    }

    fn current_theme(&self) -> &Theme {
        if self.dark_mode {
            self.dark_theme.as_ref().unwrap_or(&self.theme)
        } else {
            &self.theme
        }
    }

    pub fn linear(&self) -> bool { self.current_theme().linear }
    pub fn vertical(&self) -> bool { self.current_theme().vertical }
    pub fn inline_preedit(&self) -> bool { self.current_theme().inline_preedit }
    pub fn inline_candidate(&self) -> bool { self.current_theme().inline_candidate }

    pub fn lifecycle(&self) -> PanelLifecycleState { self.lifecycle }
    pub fn max_height(&self) -> f32 { self.max_height }
    pub fn cursor_index(&self) -> usize { self.cursor_index }
    pub fn hit_map(&self) -> &HitMap { &self.hit_map }

    /// 宿主视图（渲染器）访问口
    pub fn renderer(&self) -> &R { &self.renderer }
    pub fn renderer_mut(&mut self) -> &mut R { &mut self.renderer }

    /// 光标锚点矩形，每个周期由宿主刷新
    pub fn set_caret(&mut self, caret: Rect) {
        self.caret = caret;
    }

    /// 所在屏幕矩形，每个周期由宿主刷新
    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = screen;
    }

    /// 处理一次来自合成引擎的状态更新
    ///
    /// `authoritative` 为真时传入状态整体替换存量；悬停刷新复用同一
    /// 入口，传入存量状态 + 替换过的高亮下标且 `authoritative` 为假。
    pub fn update(&mut self, incoming: &CompositionState, authoritative: bool, now_ms: u64) {
        if authoritative {
            self.state = incoming.clone();
        }
        self.cursor_index = incoming.highlighted;

        if incoming.candidates.is_empty() && incoming.preedit.is_empty() {
            // 空更新：转状态提示或者隐藏
            if !self.status_message.is_empty() {
                let message = std::mem::take(&mut self.status_message);
                self.show_status(&message, now_ms);
            } else if !self.hide_task.is_armed() {
                self.hide();
            }
            // 提示计时还在走的话什么都不做，等它自然到期
            return;
        }

        self.status_message.clear();
        self.hide_task.cancel();

        let mut shown = incoming.clone();
        if shown.comments.len() != shown.candidates.len() {
            // 调用方契约破损：对齐长度，缺的画成空注释
            warn!(
                candidates = shown.candidates.len(),
                comments = shown.comments.len(),
                "comments length mismatch, padding"
            );
            let len = shown.candidates.len();
            shown.comments.resize(len, String::new());
        }

        self.render_candidates(&shown);
        self.lifecycle = PanelLifecycleState::ShowingCandidates;
    }

    /// 按显示策略换算状态提示文本，存着等下一次空 update 浮现
    pub fn update_status(&mut self, long_form: &str, short_form: &str) {
        self.status_message = match self.current_theme().status_message_type {
            StatusMessageType::Mix => {
                if short_form.is_empty() { long_form.to_string() } else { short_form.to_string() }
            }
            StatusMessageType::Long => long_form.to_string(),
            StatusMessageType::Short => {
                if !short_form.is_empty() {
                    short_form.to_string()
                } else {
                    long_form.chars().next().map(|c| c.to_string()).unwrap_or_default()
                }
            }
        };
    }

    /// 撤下面板并清掉尺寸记忆
    pub fn hide(&mut self) {
        self.hide_task.cancel();
        self.renderer.withdraw();
        self.max_height = 0.0;
        self.hit_map = HitMap::default();
        self.lifecycle = PanelLifecycleState::Hidden;
        debug!("panel hidden");
    }

    /// 宿主空闲驱动：状态提示到期则隐藏（无条件）
    pub fn tick(&mut self, now_ms: u64) {
        if self.hide_task.fire_due(now_ms) {
            self.hide();
        }
    }

    /// 处理一个指针/滚动事件；产出的命令交回宿主转发给合成引擎
    pub fn handle_event(&mut self, event: &InputEvent, now_ms: u64) -> Option<Command> {
        let ctx = InterpretContext {
            candidate_count: self.state.candidates.len(),
            highlighted: self.state.highlighted,
            cursor_index: self.cursor_index,
            caret_pos: self.state.caret_pos,
            preedit_len: self.state.preedit.chars().count(),
            vertical: self.current_theme().vertical,
        };
        match self.interpreter.interpret(event, &self.hit_map, &ctx) {
            InputOutcome::None => None,
            InputOutcome::Command(command) => Some(command),
            InputOutcome::HoverHighlight(index) => {
                // 只刷高亮，不动已提交状态
                if self.lifecycle == PanelLifecycleState::ShowingCandidates {
                    let mut hover = self.state.clone();
                    hover.highlighted = index;
                    self.update(&hover, false, now_ms);
                }
                None
            }
        }
    }

    fn render_candidates(&mut self, state: &CompositionState) {
        let theme = self.current_theme().clone();
        let max_width = placement::max_text_width(&theme, self.screen);

        let document = layout::compose(state, &theme, &self.measurer);
        let doc_layout = layout::flow(&document, &theme, &self.measurer, max_width);
        let preedit_block = if state.preedit.is_empty() {
            None
        } else {
            Some(self.measurer.block_size(&state.preedit, theme.font_size, max_width))
        };

        let geometry = placement::solve(
            &PlacementInput {
                content: doc_layout.size,
                caret: self.caret,
                screen: self.screen,
                preedit_block,
                theme: &theme,
            },
            &mut self.max_height,
        );

        let can_page_up = state.page > 0;
        let can_page_down = !state.last_page;
        self.hit_map = build_hit_map(&doc_layout, &theme, can_page_up, can_page_down);

        let frame = PanelFrame {
            document,
            layout: doc_layout,
            geometry,
            can_page_up,
            can_page_down,
            is_status: false,
        };
        self.renderer.render(&frame, &theme);
    }

    fn show_status(&mut self, message: &str, now_ms: u64) {
        // 先取消旧计时，避免陈旧的隐藏打掉新内容
        self.hide_task.cancel();
        let theme = self.current_theme().clone();
        let max_width = placement::max_text_width(&theme, self.screen);

        let mut document = ComposedDocument::default();
        document.runs.push(StyledRun::new(message, StyleTag::Candidate));
        let doc_layout = layout::flow(&document, &theme, &self.measurer, max_width);

        let geometry = placement::solve(
            &PlacementInput {
                content: doc_layout.size,
                caret: self.caret,
                screen: self.screen,
                preedit_block: None,
                theme: &theme,
            },
            &mut self.max_height,
        );

        self.hit_map = HitMap::default();
        let frame = PanelFrame {
            document,
            layout: doc_layout,
            geometry,
            can_page_up: false,
            can_page_down: false,
            is_status: true,
        };
        self.renderer.render(&frame, &theme);
        self.lifecycle = PanelLifecycleState::ShowingStatus;
        self.hide_task.schedule(now_ms + STATUS_DURATION_MS);
        debug!(status = message, "status shown");
    }
}

/// 把内容本地的行盒矩形平移到面板内容坐标，并补上翻页热区
fn build_hit_map(
    doc_layout: &layout::DocumentLayout,
    theme: &Theme,
    can_page_up: bool,
    can_page_down: bool,
) -> HitMap {
    let dx = theme.edge_inset.width + theme.paging_offset;
    let dy = theme.edge_inset.height;
    let shift = |r: &Rect| Rect::new(r.x + dx, r.y + dy, r.width, r.height);

    let mut map = HitMap {
        candidates: doc_layout.candidate_rects.iter().map(|(i, r)| (*i, shift(r))).collect(),
        preedit_chars: doc_layout.preedit_rects.iter().map(shift).collect(),
        page_up: None,
        page_down: None,
    };

    if theme.paging_offset > 0.0 {
        let strip_height = doc_layout.size.height + theme.edge_inset.height * 2.0;
        let half = strip_height / 2.0;
        if can_page_up {
            map.page_up = Some(Rect::new(0.0, 0.0, theme.paging_offset, half));
        }
        if can_page_down {
            map.page_down = Some(Rect::new(0.0, half, theme.paging_offset, half));
        }
    }
    map
}
