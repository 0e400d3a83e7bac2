//! 文本测量模块 - 支持系统字体、Emoji 回退和无字体环境
//!
//! 面板核心只测量不绘制；绘制在渲染边界另一侧完成。

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use fontdue::{Font, FontSettings};
use once_cell::sync::Lazy;
use unicode_width::UnicodeWidthStr;

use crate::geometry::Size;

/// 行盒高度相对字号的比例
const LINE_HEIGHT_FACTOR: f32 = 1.5;

/// 字体加载错误
#[derive(Debug, thiserror::Error)]
pub enum MeasureError {
    #[error("failed to read font file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse font: {0}")]
    Font(String),
    #[error("no usable system font found")]
    NoSystemFont,
}

/// 文本测量能力
pub trait TextMeasurer {
    /// 单行文本的排版尺寸（不换行）
    fn line_size(&self, text: &str, font_size: f32) -> Size;

    /// 限宽逐字换行后的整段尺寸
    fn block_size(&self, text: &str, font_size: f32, max_width: f32) -> Size {
        if max_width <= 0.0 || text.is_empty() {
            return self.line_size(text, font_size);
        }
        let line_height = font_size * LINE_HEIGHT_FACTOR;
        let mut lines = 1u32;
        let mut current = 0.0f32;
        let mut widest = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                widest = widest.max(current);
                lines += 1;
                current = 0.0;
                continue;
            }
            let w = self.line_size(ch.encode_utf8(&mut [0u8; 4]), font_size).width;
            if current + w > max_width && current > 0.0 {
                widest = widest.max(current);
                lines += 1;
                current = w;
            } else {
                current += w;
            }
        }
        widest = widest.max(current);
        Size::new(widest, lines as f32 * line_height)
    }
}

/// 主字体路径（中文优先，macOS）
static MAIN_FONT_PATHS: [&str; 4] = [
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/STHeiti Light.ttc",
];

/// Emoji 字体路径
static EMOJI_FONT_PATHS: [&str; 2] = [
    "/System/Library/Fonts/Apple Color Emoji.ttc",
    "/System/Library/Fonts/AppleColorEmoji.ttf",
];

/// 系统主字体数据，只探测一次
static SYSTEM_FONT_DATA: Lazy<Option<Vec<u8>>> = Lazy::new(|| {
    MAIN_FONT_PATHS
        .iter()
        .find(|p| Path::new(p).exists())
        .and_then(|p| std::fs::read(p).ok())
});

/// fontdue 字体测量器 - 多字体回退（中文 + Emoji）
pub struct FontMeasurer {
    main_font: Font,
    emoji_font: Option<Font>,
    /// 字宽缓存 (char, size_u32) -> advance
    /// 使用 Mutex 实现内部可变性，因为测量方法是 &self
    cache: Mutex<HashMap<(char, u32), f32>>,
}

impl FontMeasurer {
    /// 从字体数据创建
    pub fn from_bytes(font_data: &[u8]) -> Result<Self, MeasureError> {
        let settings = FontSettings { scale: 40.0, ..Default::default() };
        let font = Font::from_bytes(font_data, settings).map_err(|e| MeasureError::Font(e.to_string()))?;
        Ok(Self { main_font: font, emoji_font: None, cache: Mutex::new(HashMap::new()) })
    }

    /// 从文件路径加载字体
    pub fn from_file(path: &str) -> Result<Self, MeasureError> {
        let font_data = std::fs::read(path)?;
        Self::from_bytes(&font_data)
    }

    /// 加载系统字体（macOS）- 包含 Emoji 回退
    pub fn load_system_font() -> Result<Self, MeasureError> {
        let data = SYSTEM_FONT_DATA.as_ref().ok_or(MeasureError::NoSystemFont)?;
        let mut measurer = Self::from_bytes(data)?;

        for path in &EMOJI_FONT_PATHS {
            if Path::new(path).exists() {
                if let Ok(data) = std::fs::read(path) {
                    let settings = FontSettings { scale: 40.0, ..Default::default() };
                    if let Ok(font) = Font::from_bytes(data.as_slice(), settings) {
                        measurer.emoji_font = Some(font);
                        break;
                    }
                }
            }
        }

        Ok(measurer)
    }

    /// 判断字符是否为 Emoji
    fn is_emoji(ch: char) -> bool {
        let code = ch as u32;
        matches!(code,
            0x1F300..=0x1F9FF |  // Misc Symbols, Emoticons, etc.
            0x2600..=0x26FF |    // Misc Symbols
            0x2700..=0x27BF |    // Dingbats
            0xFE00..=0xFE0F |    // Variation Selectors
            0x1FA00..=0x1FAFF |  // Chess, Extended-A
            0x2B50 | 0x2B55
        )
    }

    fn advance(&self, ch: char, font_size: f32) -> f32 {
        let size_key = (font_size * 10.0) as u32;
        {
            let cache = self.cache.lock().unwrap();
            if let Some(&w) = cache.get(&(ch, size_key)) {
                return w;
            }
        }
        let font = if Self::is_emoji(ch) {
            self.emoji_font.as_ref().unwrap_or(&self.main_font)
        } else {
            &self.main_font
        };
        let advance = font.metrics(ch, font_size).advance_width;
        self.cache.lock().unwrap().insert((ch, size_key), advance);
        advance
    }
}

impl TextMeasurer for FontMeasurer {
    fn line_size(&self, text: &str, font_size: f32) -> Size {
        let width = text.chars().filter(|c| *c != '\n').map(|c| self.advance(c, font_size)).sum();
        Size::new(width, font_size * LINE_HEIGHT_FACTOR)
    }
}

/// 等宽测量器 - 无字体环境与测试用
///
/// 按显示宽度计数：窄字符半个字号，CJK 宽字符一个字号。
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoMeasurer;

impl TextMeasurer for MonoMeasurer {
    fn line_size(&self, text: &str, font_size: f32) -> Size {
        let cells: usize = text
            .split('\n')
            .map(UnicodeWidthStr::width)
            .sum();
        Size::new(cells as f32 * font_size * 0.5, font_size * LINE_HEIGHT_FACTOR)
    }
}
