//! IME Candidate Panel - 输入法候选面板引擎
//! 合成引擎推来的候选流在这里变成贴着光标的浮动面板：
//! 模板排版、屏幕几何求解、指针/滚动输入解释、显示生命周期。

mod color;
mod geometry;
pub mod text;
pub mod theme;

pub use color::Color;
pub use geometry::{Point, Rect, Size};
pub use text::{FontMeasurer, MeasureError, MonoMeasurer, TextMeasurer};
pub use theme::{StatusMessageType, Theme, ThemeConfig};

// 事件与命令
pub mod event;

// 输入解释器
pub mod input;

// 排版
pub mod layout;

// 面板几何与生命周期
pub mod panel;

pub use event::{Command, InputEvent, ScrollPhase};
pub use panel::{CandidatePanel, CompositionState, PanelFrame, PanelLifecycleState, PanelRenderer};

// 单元测试
#[cfg(test)]
mod tests;
