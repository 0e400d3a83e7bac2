//! 合成文档：一次 update 产出一份，不可变

use std::ops::Range;

use crate::geometry::Size;

/// 文本段样式标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTag {
    Preedit,
    PreeditHighlighted,
    Candidate,
    CandidateHighlighted,
    Label,
    LabelHighlighted,
    Comment,
    CommentHighlighted,
}

impl StyleTag {
    pub fn is_highlighted(&self) -> bool {
        matches!(
            self,
            StyleTag::PreeditHighlighted
                | StyleTag::CandidateHighlighted
                | StyleTag::LabelHighlighted
                | StyleTag::CommentHighlighted
        )
    }
}

/// 连续的一段同样式文本
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub tag: StyleTag,
    /// 段内禁止折行（短词整体换行）
    pub no_break: bool,
    /// 纵排字形标记（仅分隔符在纵排模式携带）
    pub vertical_form: bool,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, tag: StyleTag) -> Self {
        Self { text: text.into(), tag, no_break: false, vertical_form: false }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// 单个候选项在文档中的位置信息
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSpan {
    pub index: usize,
    /// 文档字符区间
    pub range: Range<usize>,
    /// 候选行的自然尺寸
    pub size: Size,
    /// 非线性模式下标签列的悬挂缩进宽度
    pub head_indent: f32,
}

/// 合成结果：样式段序列 + 候选区间 + 编码区间
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComposedDocument {
    pub runs: Vec<StyledRun>,
    pub candidates: Vec<CandidateSpan>,
    /// 编码串（preedit）在文档中的字符区间，空则 0..0
    pub preedit_range: Range<usize>,
    /// 编码串中被选中的子区间
    pub highlighted_preedit_range: Range<usize>,
    /// 候选分隔符的渲染宽度
    pub separator_width: f32,
}

impl ComposedDocument {
    /// 拼接出的纯文本
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn char_len(&self) -> usize {
        self.runs.iter().map(|r| r.char_len()).sum()
    }

    /// 被高亮样式覆盖的候选下标（应当恰好 0 或 1 个）
    pub fn highlighted_candidate(&self) -> Option<usize> {
        self.candidates
            .iter()
            .find(|span| {
                self.runs_in(span.range.clone()).any(|r| {
                    r.tag == StyleTag::CandidateHighlighted && !r.text.is_empty()
                })
            })
            .map(|span| span.index)
    }

    /// 迭代与字符区间相交的段
    pub fn runs_in(&self, range: Range<usize>) -> impl Iterator<Item = &StyledRun> + '_ {
        let mut pos = 0usize;
        self.runs.iter().filter(move |r| {
            let start = pos;
            pos += r.char_len();
            start < range.end && pos > range.start
        })
    }
}
