//! 候选文档合成器
//!
//! 把候选状态套进主题模板，产出样式段序列。模板先切成字面量 / 占位符
//! 两类 token，候选文本作为数据插入，绝不会被再次扫描替换。

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::layout::document::{CandidateSpan, ComposedDocument, StyleTag, StyledRun};
use crate::panel::CompositionState;
use crate::text::TextMeasurer;
use crate::theme::Theme;

/// 整行字符数不超过该值时整行禁止折行
const NO_BREAK_LINE_CHARS: usize = 10;
/// 候选文本字符数不超过该值时该段禁止折行
const NO_BREAK_CANDIDATE_CHARS: usize = 5;

/// 模板 token
#[derive(Debug, Clone, PartialEq)]
enum FormatToken {
    Literal(String),
    Label,
    Candidate,
    Comment,
}

/// 把候选模板切成 token 序列
fn parse_format(format: &str) -> Vec<FormatToken> {
    const PLACEHOLDERS: [(&str, FormatToken); 3] = [
        ("[label]", FormatToken::Label),
        ("[candidate]", FormatToken::Candidate),
        ("[comment]", FormatToken::Comment),
    ];
    let mut tokens = Vec::new();
    let mut rest = format;
    'outer: while !rest.is_empty() {
        // 找最靠前的占位符
        let mut first: Option<(usize, &str, FormatToken)> = None;
        for (pat, token) in PLACEHOLDERS {
            if let Some(at) = rest.find(pat) {
                if first.as_ref().map_or(true, |(best, _, _)| at < *best) {
                    first = Some((at, pat, token));
                }
            }
        }
        match first {
            Some((at, pat, token)) => {
                if at > 0 {
                    tokens.push(FormatToken::Literal(rest[..at].to_string()));
                }
                tokens.push(token);
                rest = &rest[at + pat.len()..];
            }
            None => {
                tokens.push(FormatToken::Literal(rest.to_string()));
                break 'outer;
            }
        }
    }
    tokens
}

/// 解析候选 `i` 的标签文本
///
/// 多个标签按下标取；单个标签串按字符索引（A B C ...）；
/// 都取不到时退回 1 起始的十进制序号。
fn resolve_label(labels: &[String], i: usize) -> String {
    if labels.len() > 1 && i < labels.len() {
        labels[i].clone()
    } else if labels.len() == 1 {
        match labels[0].chars().nth(i) {
            Some(ch) => ch.to_string(),
            None => (i + 1).to_string(),
        }
    } else {
        (i + 1).to_string()
    }
}

/// 合成候选文档
///
/// 空候选且空编码串时不应走到这里（由生命周期控制器先行分流），
/// 此时返回空文档。
pub fn compose(
    state: &CompositionState,
    theme: &Theme,
    measurer: &dyn TextMeasurer,
) -> ComposedDocument {
    let mut doc = ComposedDocument::default();
    let mut pos = 0usize;

    fn push(doc: &mut ComposedDocument, pos: &mut usize, run: StyledRun) {
        if run.text.is_empty() {
            return;
        }
        *pos += run.char_len();
        doc.runs.push(run);
    }

    // 编码串：按选中区间拆成 普通 / 高亮 / 普通 三段
    if !state.preedit.is_empty() {
        let chars: Vec<char> = state.preedit.chars().collect();
        let sel_start = state.sel_range.start.min(chars.len());
        let sel_end = state.sel_range.end.clamp(sel_start, chars.len());

        let slice = |a: usize, b: usize| chars[a..b].iter().collect::<String>();
        push(&mut doc, &mut pos, StyledRun::new(slice(0, sel_start), StyleTag::Preedit));
        push(
            &mut doc,
            &mut pos,
            StyledRun::new(slice(sel_start, sel_end), StyleTag::PreeditHighlighted),
        );
        push(&mut doc, &mut pos, StyledRun::new(slice(sel_end, chars.len()), StyleTag::Preedit));

        doc.preedit_range = 0..chars.len();
        doc.highlighted_preedit_range = sel_start..sel_end;

        // 段落结束；有候选时另起一行
        if !state.candidates.is_empty() {
            push(&mut doc, &mut pos, StyledRun::new("\n", StyleTag::Preedit));
        }
    }

    let tokens = parse_format(&theme.candidate_format);
    let has_label = tokens.contains(&FormatToken::Label);

    let separator = if theme.linear { "  " } else { "\n" };
    doc.separator_width = if theme.linear {
        measurer.line_size(separator, theme.font_size).width
    } else {
        0.0
    };

    for (i, candidate) in state.candidates.iter().enumerate() {
        let highlighted = i == state.highlighted;
        let candidate_tag = if highlighted { StyleTag::CandidateHighlighted } else { StyleTag::Candidate };
        let label_tag = if highlighted { StyleTag::LabelHighlighted } else { StyleTag::Label };
        let comment_tag = if highlighted { StyleTag::CommentHighlighted } else { StyleTag::Comment };

        if i > 0 {
            let mut sep = StyledRun::new(separator, candidate_tag);
            sep.vertical_form = theme.vertical;
            push(&mut doc, &mut pos, sep);
        }

        let line_start = pos;
        let run_start = doc.runs.len();
        let label = if has_label { resolve_label(&state.labels, i) } else { String::new() };
        let candidate_text: String = candidate.nfc().collect();
        let comment_text: String = state
            .comments
            .get(i)
            .map(|c| c.nfc().collect())
            .unwrap_or_default();

        for token in &tokens {
            match token {
                // 模板字面量沿用标签样式
                FormatToken::Literal(text) => {
                    push(&mut doc, &mut pos, StyledRun::new(text.clone(), label_tag));
                }
                FormatToken::Label => {
                    push(&mut doc, &mut pos, StyledRun::new(label.clone(), label_tag));
                }
                FormatToken::Candidate => {
                    let mut run = StyledRun::new(candidate_text.clone(), candidate_tag);
                    run.no_break = run.char_len() <= NO_BREAK_CANDIDATE_CHARS;
                    push(&mut doc, &mut pos, run);
                }
                FormatToken::Comment => {
                    push(&mut doc, &mut pos, StyledRun::new(comment_text.clone(), comment_tag));
                }
            }
        }

        // 短行整体禁止折行
        if pos - line_start <= NO_BREAK_LINE_CHARS {
            for run in &mut doc.runs[run_start..] {
                run.no_break = true;
            }
        }

        // 标签列宽：模板中第一个候选/注释占位符之前的部分（标签已替换）
        let head_indent = if !theme.linear {
            let mut width = 0.0f32;
            for token in &tokens {
                match token {
                    FormatToken::Candidate | FormatToken::Comment => break,
                    FormatToken::Literal(text) => {
                        width += measurer.line_size(text, theme.label_font_size).width;
                    }
                    FormatToken::Label => {
                        width += measurer.line_size(&label, theme.label_font_size).width;
                    }
                }
            }
            width
        } else {
            0.0
        };

        // 候选行自然尺寸（线性模式的逐项动画以此驱动）
        let mut line_size = crate::geometry::Size::default();
        for run in &doc.runs[run_start..] {
            let style = theme.run_style(run.tag);
            let s = measurer.line_size(&run.text, style.font_size);
            line_size.width += s.width;
            line_size.height = line_size.height.max(s.height);
        }

        doc.candidates.push(CandidateSpan {
            index: i,
            range: line_start..pos,
            size: line_size,
            head_indent,
        });
    }

    debug!(
        runs = doc.runs.len(),
        candidates = doc.candidates.len(),
        chars = pos,
        "composed candidate document"
    );
    doc
}
