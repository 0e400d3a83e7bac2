//! 主题配置解析单元测试

use crate::color::Color;
use crate::theme::{StatusMessageType, Theme, ThemeConfig, DEFAULT_CANDIDATE_FORMAT};

/// camelCase JSON 反序列化 + 颜色解析
#[test]
fn test_config_from_json() {
    let config: ThemeConfig = serde_json::from_str(
        r##"{
            "vertical": true,
            "fontSize": 21,
            "highlightedBackColor": "#FF3300",
            "borderColor": "#00000080",
            "statusMessageType": "short",
            "candidateFormat": "[label] [candidate]",
            "pagingOffset": 12
        }"##,
    )
    .unwrap();
    let theme = Theme::from_config(&config);

    assert!(theme.vertical);
    assert!(!theme.linear);
    assert_eq!(theme.font_size, 21.0);
    // 未指定的子字号跟随主字号
    assert_eq!(theme.label_font_size, 21.0);
    assert_eq!(theme.comment_font_size, 21.0);
    assert_eq!(theme.highlighted_back_color, Color::rgb(255, 51, 0));
    assert_eq!(theme.border_color, Color::new(0, 0, 0, 128));
    assert_eq!(theme.status_message_type, StatusMessageType::Short);
    assert_eq!(theme.candidate_format, "[label] [candidate]");
    assert_eq!(theme.paging_offset, 12.0);
}

/// 空配置拿到全部缺省值
#[test]
fn test_config_defaults() {
    let theme = Theme::default();
    assert_eq!(theme.candidate_format, DEFAULT_CANDIDATE_FORMAT);
    assert_eq!(theme.status_message_type, StatusMessageType::Mix);
    assert_eq!(theme.alpha, 1.0);
    assert_eq!(theme.font_size, 15.0);
    assert!(!theme.vertical);
    assert!(!theme.memorize_size);
    assert_eq!(theme.back_color, Color::WHITE);
    assert_eq!(theme.text_color, Color::BLACK);
}

/// 非法颜色串回退到缺省色而不是报错
#[test]
fn test_bad_color_falls_back() {
    let mut config = ThemeConfig::default();
    config.text_color = "not-a-color".to_string();
    let theme = Theme::from_config(&config);
    assert_eq!(theme.text_color, Color::BLACK);
}

/// 未知状态策略串按 mix 处理
#[test]
fn test_unknown_status_type() {
    let mut config = ThemeConfig::default();
    config.status_message_type = "whatever".to_string();
    let theme = Theme::from_config(&config);
    assert_eq!(theme.status_message_type, StatusMessageType::Mix);
}

/// 十六进制颜色解析
#[test]
fn test_color_hex_parsing() {
    assert_eq!(Color::from_hex_str("#FFFFFF"), Some(Color::WHITE));
    assert_eq!(Color::from_hex_str("000000"), Some(Color::BLACK));
    assert_eq!(Color::from_hex_str("#11223344"), Some(Color::new(0x11, 0x22, 0x33, 0x44)));
    assert_eq!(Color::from_hex_str("#FFF"), None);
    assert_eq!(Color::from_hex_str("#GGGGGG"), None);
}
