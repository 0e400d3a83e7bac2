//! 几何求解单元测试

use crate::geometry::{Point, Rect, Size};
use crate::panel::{max_text_width, solve, PlacementInput};
use crate::theme::{Theme, ThemeConfig, CARET_GAP};

fn theme_with(f: impl FnOnce(&mut ThemeConfig)) -> Theme {
    let mut config = ThemeConfig::default();
    f(&mut config);
    Theme::from_config(&config)
}

fn solve_once(content: Size, caret: Rect, screen: Rect, theme: &Theme) -> crate::panel::PanelGeometry {
    let mut max_height = 0.0;
    solve(
        &PlacementInput { content, caret, screen, preedit_block: None, theme },
        &mut max_height,
    )
}

/// 横排限宽吃屏宽、纵排限宽吃屏高
#[test]
fn test_max_text_width_axis() {
    let screen = Rect::new(0.0, 0.0, 1200.0, 600.0);
    // fontSize 15: ratio = 1/3 + (15/12)/12
    let horizontal = theme_with(|_| {});
    let expected_h = 1200.0 * (1.0 / 3.0 + 1.25 / 12.0) - 16.0;
    assert!((max_text_width(&horizontal, screen) - expected_h).abs() < 0.01);

    let vertical = theme_with(|c| c.vertical = true);
    let expected_v = 600.0 * (1.0 / 4.0 + 1.25 / 12.0) - 12.0;
    assert!((max_text_width(&vertical, screen) - expected_v).abs() < 0.01);
}

/// 交换朝向后限宽改由另一条屏幕边决定
#[test]
fn test_orientation_cap_symmetry() {
    let horizontal = theme_with(|_| {});
    let vertical = theme_with(|c| c.vertical = true);
    // 横排只看屏宽，屏高无关
    assert_eq!(
        max_text_width(&horizontal, Rect::new(0.0, 0.0, 1200.0, 600.0)),
        max_text_width(&horizontal, Rect::new(0.0, 0.0, 1200.0, 2000.0))
    );
    // 纵排只看屏高，屏宽无关
    assert_eq!(
        max_text_width(&vertical, Rect::new(0.0, 0.0, 1200.0, 600.0)),
        max_text_width(&vertical, Rect::new(0.0, 0.0, 2000.0, 600.0))
    );
    // 两个朝向在各自的边上吃到不同的屏占比
    assert!(
        max_text_width(&horizontal, Rect::new(0.0, 0.0, 1200.0, 1200.0))
            > max_text_width(&vertical, Rect::new(0.0, 0.0, 1200.0, 1200.0))
    );
}

/// 常规情形面板整体落在屏幕内
#[test]
fn test_containment() {
    let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
    let theme = Theme::default();
    let caret_positions = [
        Rect::new(100.0, 100.0, 2.0, 20.0),
        Rect::new(1430.0, 100.0, 2.0, 20.0),  // 贴右缘
        Rect::new(5.0, 880.0, 2.0, 20.0),     // 贴下缘
        Rect::new(1430.0, 880.0, 2.0, 20.0),  // 右下角
    ];
    for caret in caret_positions {
        let geometry = solve_once(Size::new(300.0, 120.0), caret, screen, &theme);
        let rect = geometry.rect;
        assert!(rect.left() >= screen.left(), "left {:?}", rect);
        assert!(rect.right() <= screen.right(), "right {:?}", rect);
        assert!(rect.top() >= screen.top(), "top {:?}", rect);
        assert!(rect.bottom() <= screen.bottom(), "bottom {:?}", rect);
    }
}

/// 默认挂在光标下方；下缘放不下时改挂上方
#[test]
fn test_horizontal_flip_above_caret() {
    let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
    let theme = Theme::default();
    let content = Size::new(300.0, 120.0);

    let caret = Rect::new(200.0, 100.0, 2.0, 20.0);
    let below = solve_once(content, caret, screen, &theme);
    assert_eq!(below.rect.top(), caret.bottom() + CARET_GAP);

    let caret = Rect::new(200.0, 860.0, 2.0, 20.0);
    let above = solve_once(content, caret, screen, &theme);
    assert_eq!(above.rect.bottom(), caret.top() - CARET_GAP);
}

/// 纵排按光标所在半屏决定挂上方还是下方
#[test]
fn test_vertical_half_screen_flip() {
    let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
    let theme = theme_with(|c| c.vertical = true);
    let content = Size::new(200.0, 100.0);

    // 上半屏：面板在光标下方
    let caret = Rect::new(700.0, 100.0, 2.0, 20.0);
    let geometry = solve_once(content, caret, screen, &theme);
    assert_eq!(geometry.rect.top(), caret.bottom() + CARET_GAP);

    // 下半屏：面板在光标上方
    let caret = Rect::new(700.0, 800.0, 2.0, 20.0);
    let geometry = solve_once(content, caret, screen, &theme);
    assert_eq!(geometry.rect.bottom(), caret.top() - CARET_GAP);
}

/// 纵排面板宽高来自内容高宽（换轴）
#[test]
fn test_vertical_axis_swap() {
    let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
    let theme = theme_with(|c| c.vertical = true);
    let content = Size::new(200.0, 100.0);
    let caret = Rect::new(700.0, 100.0, 2.0, 20.0);
    let geometry = solve_once(content, caret, screen, &theme);
    assert_eq!(geometry.rect.width, content.height + theme.edge_inset.height * 2.0);
    assert_eq!(geometry.rect.height, content.width + theme.edge_inset.width * 2.0);
}

/// 纵排输出 -90° 旋转，枢轴在 (0, 面板宽)
#[test]
fn test_rotation_transform() {
    let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
    let caret = Rect::new(700.0, 100.0, 2.0, 20.0);
    let content = Size::new(200.0, 100.0);

    let horizontal = solve_once(content, caret, screen, &Theme::default());
    assert_eq!(horizontal.rotation_degrees, 0.0);
    assert_eq!(horizontal.rotation_origin, Point::default());

    let vertical = solve_once(content, caret, screen, &theme_with(|c| c.vertical = true));
    assert_eq!(vertical.rotation_degrees, -90.0);
    assert_eq!(vertical.rotation_origin, Point::new(0.0, vertical.rect.width));
}

/// 非空编码串把纵排面板向右让出编码块的位置
#[test]
fn test_vertical_preedit_shift() {
    let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
    let theme = theme_with(|c| c.vertical = true);
    let content = Size::new(200.0, 100.0);
    let caret = Rect::new(700.0, 100.0, 2.0, 20.0);

    let mut max_height = 0.0;
    let plain = solve(
        &PlacementInput { content, caret, screen, preedit_block: None, theme: &theme },
        &mut max_height,
    );
    let with_preedit = solve(
        &PlacementInput {
            content,
            caret,
            screen,
            preedit_block: Some(Size::new(80.0, 22.5)),
            theme: &theme,
        },
        &mut max_height,
    );
    assert_eq!(
        with_preedit.rect.left(),
        plain.rect.left() + 22.5 + theme.edge_inset.width
    );
}

/// 尺寸记忆：窄内容沿用记忆宽度，记忆值只增不减
#[test]
fn test_memorize_size() {
    let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
    let theme = theme_with(|c| {
        c.vertical = true;
        c.memorize_size = true;
    });
    // 贴右缘的光标让内容必然越过屏幕边
    let caret = Rect::new(1400.0, 100.0, 2.0, 20.0);
    let mut max_height = 0.0;

    let wide = solve(
        &PlacementInput { content: Size::new(300.0, 100.0), caret, screen, preedit_block: None, theme: &theme },
        &mut max_height,
    );
    assert_eq!(max_height, 300.0);

    let narrow = solve(
        &PlacementInput { content: Size::new(200.0, 100.0), caret, screen, preedit_block: None, theme: &theme },
        &mut max_height,
    );
    // 窄内容被夹到记忆宽度，面板高度不回缩
    assert_eq!(max_height, 300.0);
    assert_eq!(narrow.rect.height, wide.rect.height);
}

/// 关掉尺寸记忆时求解是纯函数
#[test]
fn test_solve_is_pure() {
    let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
    let theme = Theme::default();
    let caret = Rect::new(300.0, 400.0, 2.0, 20.0);
    let a = solve_once(Size::new(250.0, 90.0), caret, screen, &theme);
    let b = solve_once(Size::new(250.0, 90.0), caret, screen, &theme);
    assert_eq!(a, b);
}

/// 两遍夹紧：上下都放不下时钉在屏幕上缘
#[test]
fn test_two_pass_clamp_pins_top() {
    let screen = Rect::new(0.0, 0.0, 800.0, 600.0);
    let theme = Theme::default();
    // 光标在屏中，内容几乎占满屏高：挂下方下缘溢出，
    // 改挂上方又越过上缘，最终钉在上缘
    let caret = Rect::new(100.0, 300.0, 2.0, 18.0);
    let geometry = solve_once(Size::new(300.0, 560.0), caret, screen, &theme);
    assert_eq!(geometry.rect.top(), screen.top());
    assert!(geometry.rect.bottom() <= screen.bottom());
}
