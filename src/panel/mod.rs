//! 面板模块：几何求解、渲染边界、生命周期控制

mod controller;
mod frame;
mod placement;
mod task;

pub use controller::{CandidatePanel, CompositionState, PanelLifecycleState};
pub use frame::{PanelFrame, PanelRenderer};
pub use placement::{max_text_width, solve, PanelGeometry, PlacementInput};
pub use task::TaskSlot;
