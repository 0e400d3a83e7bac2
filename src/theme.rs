//! 面板主题
//!
//! `ThemeConfig` 是外部配置加载器反序列化出来的原始形式（颜色为十六进制字符串），
//! `Theme` 是布局/排版/摆放各阶段真正消费的解析结果。

use serde::Deserialize;

use crate::color::Color;
use crate::geometry::Size;
use crate::layout::StyleTag;

/// 光标与面板之间的固定间距
pub const CARET_GAP: f32 = 5.0;
/// 状态提示自动隐藏时长（毫秒）
pub const STATUS_DURATION_MS: u64 = 1200;
/// 默认候选项模板
pub const DEFAULT_CANDIDATE_FORMAT: &str = "[label]. [candidate] [comment]";

/// 状态提示显示策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusMessageType {
    /// 优先短格式，缺省退回长格式
    #[default]
    Mix,
    /// 总是长格式
    Long,
    /// 优先短格式，否则取长格式首字符
    Short,
}

impl StatusMessageType {
    fn parse(s: &str) -> Self {
        match s {
            "long" => Self::Long,
            "short" => Self::Short,
            _ => Self::Mix,
        }
    }
}

/// 主题配置（外部解析好的 JSON/YAML 映射成的结构）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default)]
    pub linear: bool,
    #[serde(default)]
    pub vertical: bool,
    #[serde(default)]
    pub inline_preedit: bool,
    #[serde(default)]
    pub inline_candidate: bool,
    #[serde(default)]
    pub translucency: bool,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    #[serde(default)]
    pub memorize_size: bool,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// 0 表示跟随 fontSize
    #[serde(default)]
    pub label_font_size: f32,
    #[serde(default)]
    pub comment_font_size: f32,
    #[serde(default = "default_format")]
    pub candidate_format: String,
    #[serde(default = "default_inset_width")]
    pub edge_inset_width: f32,
    #[serde(default = "default_inset_height")]
    pub edge_inset_height: f32,
    #[serde(default)]
    pub line_spacing: f32,
    #[serde(default)]
    pub preedit_spacing: f32,
    #[serde(default)]
    pub paging_offset: f32,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
    #[serde(default = "default_status_type")]
    pub status_message_type: String,

    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_back_color")]
    pub back_color: String,
    #[serde(default = "default_hilited_text_color")]
    pub highlighted_text_color: String,
    #[serde(default = "default_hilited_back_color")]
    pub highlighted_back_color: String,
    #[serde(default = "default_label_color")]
    pub label_color: String,
    #[serde(default = "default_hilited_text_color")]
    pub highlighted_label_color: String,
    #[serde(default = "default_comment_color")]
    pub comment_color: String,
    #[serde(default = "default_hilited_text_color")]
    pub highlighted_comment_color: String,
    #[serde(default = "default_text_color")]
    pub preedit_color: String,
    #[serde(default = "default_hilited_text_color")]
    pub highlighted_preedit_color: String,
    #[serde(default = "default_border_color")]
    pub border_color: String,
}

fn default_alpha() -> f32 { 1.0 }
fn default_font_size() -> f32 { 15.0 }
fn default_format() -> String { DEFAULT_CANDIDATE_FORMAT.to_string() }
fn default_inset_width() -> f32 { 8.0 }
fn default_inset_height() -> f32 { 6.0 }
fn default_corner_radius() -> f32 { 6.0 }
fn default_status_type() -> String { "mix".to_string() }
fn default_text_color() -> String { "#000000".to_string() }
fn default_back_color() -> String { "#FFFFFF".to_string() }
fn default_hilited_text_color() -> String { "#FFFFFF".to_string() }
fn default_hilited_back_color() -> String { "#0A60FF".to_string() }
fn default_label_color() -> String { "#888888".to_string() }
fn default_comment_color() -> String { "#888888".to_string() }
fn default_border_color() -> String { "#00000000".to_string() }

impl Default for ThemeConfig {
    fn default() -> Self {
        // serde 的字段默认值即配置缺省值
        serde_json::from_str("{}").unwrap()
    }
}

/// 文本段样式：颜色 + 字号
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStyle {
    pub color: Color,
    pub font_size: f32,
}

/// 解析后的运行时主题
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub linear: bool,
    pub vertical: bool,
    pub inline_preedit: bool,
    pub inline_candidate: bool,
    pub translucency: bool,
    pub alpha: f32,
    pub memorize_size: bool,
    pub font_size: f32,
    pub label_font_size: f32,
    pub comment_font_size: f32,
    pub candidate_format: String,
    pub edge_inset: Size,
    pub line_spacing: f32,
    pub preedit_spacing: f32,
    pub paging_offset: f32,
    pub corner_radius: f32,
    pub status_message_type: StatusMessageType,

    pub text_color: Color,
    pub back_color: Color,
    pub highlighted_text_color: Color,
    pub highlighted_back_color: Color,
    pub label_color: Color,
    pub highlighted_label_color: Color,
    pub comment_color: Color,
    pub highlighted_comment_color: Color,
    pub preedit_color: Color,
    pub highlighted_preedit_color: Color,
    pub border_color: Color,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let color = |s: &str, fallback: Color| Color::from_hex_str(s).unwrap_or(fallback);
        let font_size = if config.font_size > 0.0 { config.font_size } else { default_font_size() };
        let sub_size = |s: f32| if s > 0.0 { s } else { font_size };
        Self {
            linear: config.linear,
            vertical: config.vertical,
            inline_preedit: config.inline_preedit,
            inline_candidate: config.inline_candidate,
            translucency: config.translucency,
            alpha: config.alpha.clamp(0.0, 1.0),
            memorize_size: config.memorize_size,
            font_size,
            label_font_size: sub_size(config.label_font_size),
            comment_font_size: sub_size(config.comment_font_size),
            candidate_format: if config.candidate_format.is_empty() {
                DEFAULT_CANDIDATE_FORMAT.to_string()
            } else {
                config.candidate_format.clone()
            },
            edge_inset: Size::new(config.edge_inset_width, config.edge_inset_height),
            line_spacing: config.line_spacing,
            preedit_spacing: config.preedit_spacing,
            paging_offset: config.paging_offset,
            corner_radius: config.corner_radius,
            status_message_type: StatusMessageType::parse(&config.status_message_type),
            text_color: color(&config.text_color, Color::BLACK),
            back_color: color(&config.back_color, Color::WHITE),
            highlighted_text_color: color(&config.highlighted_text_color, Color::WHITE),
            highlighted_back_color: color(&config.highlighted_back_color, Color::rgb(10, 96, 255)),
            label_color: color(&config.label_color, Color::rgb(136, 136, 136)),
            highlighted_label_color: color(&config.highlighted_label_color, Color::WHITE),
            comment_color: color(&config.comment_color, Color::rgb(136, 136, 136)),
            highlighted_comment_color: color(&config.highlighted_comment_color, Color::WHITE),
            preedit_color: color(&config.preedit_color, Color::BLACK),
            highlighted_preedit_color: color(&config.highlighted_preedit_color, Color::WHITE),
            border_color: color(&config.border_color, Color::TRANSPARENT),
        }
    }

    /// 各类文本段对应的颜色与字号
    pub fn run_style(&self, tag: StyleTag) -> RunStyle {
        match tag {
            StyleTag::Preedit => RunStyle { color: self.preedit_color, font_size: self.font_size },
            StyleTag::PreeditHighlighted => {
                RunStyle { color: self.highlighted_preedit_color, font_size: self.font_size }
            }
            StyleTag::Candidate => RunStyle { color: self.text_color, font_size: self.font_size },
            StyleTag::CandidateHighlighted => {
                RunStyle { color: self.highlighted_text_color, font_size: self.font_size }
            }
            StyleTag::Label => RunStyle { color: self.label_color, font_size: self.label_font_size },
            StyleTag::LabelHighlighted => {
                RunStyle { color: self.highlighted_label_color, font_size: self.label_font_size }
            }
            StyleTag::Comment => {
                RunStyle { color: self.comment_color, font_size: self.comment_font_size }
            }
            StyleTag::CommentHighlighted => {
                RunStyle { color: self.highlighted_comment_color, font_size: self.comment_font_size }
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}
