//! 排版模块：把候选状态 + 主题合成为带样式的文本段序列，
//! 再按限宽排成行盒，产出命中区域与内容尺寸。

mod composer;
mod document;
mod flow;

pub use composer::compose;
pub use document::{CandidateSpan, ComposedDocument, StyleTag, StyledRun};
pub use flow::{flow, DocumentLayout};
