//! 单元测试模块
//! 覆盖合成、行盒排布、几何求解、输入解释、生命周期等功能

pub mod placement_tests;
pub mod theme_tests;

use crate::panel::{PanelFrame, PanelRenderer};
use crate::theme::Theme;

/// 录制渲染器：把每一帧存下来供断言
#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<PanelFrame>,
    pub withdrawn: usize,
}

impl PanelRenderer for RecordingRenderer {
    fn render(&mut self, frame: &PanelFrame, _theme: &Theme) {
        self.frames.push(frame.clone());
    }

    fn withdraw(&mut self) {
        self.withdrawn += 1;
    }
}
