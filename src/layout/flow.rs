//! 行盒排布
//!
//! 把合成文档在限宽下排成行，得到内容尺寸、每个候选的矩形和编码串
//! 逐字符矩形。坐标是内容本地坐标（未加边距、未旋转），命中测试与
//! 几何求解都消费这一结果。

use crate::geometry::{Rect, Size};
use crate::layout::document::ComposedDocument;
use crate::text::TextMeasurer;
use crate::theme::Theme;

/// 排布结果
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    /// 内容自然尺寸（逻辑横排空间）
    pub size: Size,
    /// 每个候选区间的包围矩形
    pub candidate_rects: Vec<(usize, Rect)>,
    /// 编码串逐字符矩形（光标命中用）
    pub preedit_rects: Vec<Rect>,
}

/// 按限宽排布文档
pub fn flow(
    doc: &ComposedDocument,
    theme: &Theme,
    measurer: &dyn TextMeasurer,
    max_width: f32,
) -> DocumentLayout {
    let mut char_rects: Vec<Rect> = Vec::with_capacity(doc.char_len());
    let mut x = 0.0f32;
    let mut y = 0.0f32;
    let mut line_h = 0.0f32;
    let mut content_width = 0.0f32;
    let mut char_pos = 0usize;

    // 续行缩进：候选区间内取其 head_indent，其余为 0
    let indent_for = |pos: usize| -> f32 {
        doc.candidates
            .iter()
            .find(|span| span.range.contains(&pos))
            .map(|span| span.head_indent)
            .unwrap_or(0.0)
    };

    for run in &doc.runs {
        let style = theme.run_style(run.tag);

        // 整段禁止折行：放不下就整段移到下一行
        if run.no_break && x > 0.0 {
            let run_w = measurer.line_size(&run.text, style.font_size).width;
            if x + run_w > max_width {
                x = indent_for(char_pos);
                y += line_h + theme.line_spacing;
                line_h = 0.0;
            }
        }

        for ch in run.text.chars() {
            if ch == '\n' {
                // 换行符占一个字符位但没有矩形宽度
                let nl_h = line_h.max(measurer.line_size("", style.font_size).height);
                char_rects.push(Rect::new(x, y, 0.0, nl_h));
                char_pos += 1;
                x = 0.0;
                y += nl_h + theme.line_spacing;
                line_h = 0.0;
                continue;
            }

            let s = measurer.line_size(ch.encode_utf8(&mut [0u8; 4]), style.font_size);
            if !run.no_break && x > 0.0 && x + s.width > max_width {
                x = indent_for(char_pos);
                y += line_h + theme.line_spacing;
                line_h = 0.0;
            }
            char_rects.push(Rect::new(x, y, s.width, s.height));
            x += s.width;
            line_h = line_h.max(s.height);
            content_width = content_width.max(x);
            char_pos += 1;
        }
    }

    let content_height = y + line_h;

    let union = |rects: &[Rect]| -> Rect {
        let mut iter = rects.iter().filter(|r| r.width > 0.0 || r.height > 0.0);
        let first = match iter.next() {
            Some(r) => *r,
            None => return Rect::default(),
        };
        let mut min_x = first.left();
        let mut min_y = first.top();
        let mut max_x = first.right();
        let mut max_y = first.bottom();
        for r in iter {
            min_x = min_x.min(r.left());
            min_y = min_y.min(r.top());
            max_x = max_x.max(r.right());
            max_y = max_y.max(r.bottom());
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    };

    let candidate_rects = doc
        .candidates
        .iter()
        .map(|span| {
            let rects = &char_rects[span.range.start.min(char_rects.len())
                ..span.range.end.min(char_rects.len())];
            (span.index, union(rects))
        })
        .collect();

    let preedit_rects = char_rects
        [doc.preedit_range.start.min(char_rects.len())..doc.preedit_range.end.min(char_rects.len())]
        .to_vec();

    DocumentLayout {
        size: Size::new(content_width, content_height),
        candidate_rects,
        preedit_rects,
    }
}
