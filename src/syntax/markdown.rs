//! Markdownトークナイザ
//!
//! 行単位の分類器（設定エディタ向け）と、全文パスを重ねる拡張版
//! （コマンドエディタ向け）の2種類を提供する
//!
//! 行分類は「最初に一致した規則が勝つ」方式で、1行につき1分類のみ。
//! `# ` で始まる行は見出しではなくドキュメント区切りのコメント扱いになる。

use regex::Regex;

use super::{line_ranges, SpanSet, StyleClass};

/// 行分類ルール（シンプル版）
#[derive(Debug)]
pub(crate) struct MarkdownRules {
    h1: Regex,
    heading: Regex,
    fence: Regex,
}

impl MarkdownRules {
    pub(crate) fn new() -> Self {
        Self {
            // `#` 1つ + 空白 → コメント（区切り・タイトル扱い）
            h1: Regex::new(r"^#\s").expect("markdown h1 pattern"),
            // `##`〜`######` + 空白 → 見出しキーワード
            heading: Regex::new(r"^#{2,6}\s").expect("markdown heading pattern"),
            // 行頭のトリプルバッククォート → フェンスマーカー
            fence: Regex::new("^```").expect("markdown fence pattern"),
        }
    }

    /// 行単位の分類。どの規則にも一致しない行は無スタイルで通過する
    pub(crate) fn annotate(&self, escaped: &str, spans: &mut SpanSet) {
        for (start, end) in line_ranges(escaped) {
            let line = &escaped[start..end];
            let class = if self.h1.is_match(line) {
                Some(StyleClass::Comment)
            } else if self.heading.is_match(line) {
                Some(StyleClass::Keyword)
            } else if self.fence.is_match(line) {
                Some(StyleClass::Code)
            } else {
                None
            };

            if let Some(class) = class {
                spans.try_insert(start, end, class);
            }
        }
    }
}

/// 全文パスを重ねる拡張ルール（コマンドエディタ向け）
///
/// パスの適用順は固定：見出しレベル1 → 見出しレベル2〜6 → インラインコード
/// → フェンス付きコードブロック → 太字 → 斜体 → リストマーカー。
/// 先に注釈された範囲と重なる一致は後段パスでは採用されないため、
/// 順序がそのまま優先順位になる。
#[derive(Debug)]
pub(crate) struct MarkdownRichRules {
    h1_line: Regex,
    heading_line: Regex,
    inline_code: Regex,
    fence_block: Regex,
    bold: Regex,
    italic: Regex,
    list_marker: Regex,
}

impl MarkdownRichRules {
    pub(crate) fn new() -> Self {
        Self {
            h1_line: Regex::new(r"(?m)^#[ \t].*$").expect("markdown rich h1 pattern"),
            heading_line: Regex::new(r"(?m)^#{2,6}[ \t].*$").expect("markdown rich heading pattern"),
            inline_code: Regex::new("`[^`\n]+`").expect("markdown inline code pattern"),
            fence_block: Regex::new(r"(?s)```.*?```").expect("markdown fence block pattern"),
            bold: Regex::new(r"\*\*[^*\n]+\*\*").expect("markdown bold pattern"),
            italic: Regex::new(r"\*[^*\n]+\*").expect("markdown italic pattern"),
            list_marker: Regex::new(r"(?m)^[ \t]*(?:[-*+]|\d+\.)[ \t]").expect("markdown list pattern"),
        }
    }

    pub(crate) fn annotate(&self, escaped: &str, spans: &mut SpanSet) {
        let passes: [(&Regex, StyleClass); 7] = [
            (&self.h1_line, StyleClass::Comment),
            (&self.heading_line, StyleClass::Keyword),
            (&self.inline_code, StyleClass::Code),
            (&self.fence_block, StyleClass::Code),
            (&self.bold, StyleClass::Bold),
            (&self.italic, StyleClass::Italic),
            (&self.list_marker, StyleClass::List),
        ];

        for (pattern, class) in passes {
            for found in pattern.find_iter(escaped) {
                spans.try_insert(found.start(), found.end(), class);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::{Highlighter, Language, StyleClass};

    fn classes_of(marked: &crate::syntax::MarkedText) -> Vec<StyleClass> {
        marked.spans().iter().map(|span| span.class).collect()
    }

    #[test]
    fn test_h1_is_comment_not_heading() {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight("# Title", Language::Markdown);
        assert_eq!(classes_of(&marked), vec![StyleClass::Comment]);
    }

    #[test]
    fn test_h2_to_h6_are_keywords() {
        let highlighter = Highlighter::new();
        for prefix in ["##", "###", "####", "#####", "######"] {
            let marked = highlighter.highlight(&format!("{} Title", prefix), Language::Markdown);
            assert_eq!(classes_of(&marked), vec![StyleClass::Keyword], "{}", prefix);
        }
    }

    #[test]
    fn test_hash_without_space_is_unstyled() {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight("#hashtag", Language::Markdown);
        assert!(marked.spans().is_empty());
    }

    #[test]
    fn test_seven_hashes_is_unstyled() {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight("####### too deep", Language::Markdown);
        assert!(marked.spans().is_empty());
    }

    #[test]
    fn test_fence_line_is_code() {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight("```rust", Language::Markdown);
        assert_eq!(classes_of(&marked), vec![StyleClass::Code]);
    }

    #[test]
    fn test_one_classification_per_line() {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight("# one\n## two\nplain\n```\n", Language::Markdown);
        assert_eq!(
            classes_of(&marked),
            vec![StyleClass::Comment, StyleClass::Keyword, StyleClass::Code]
        );
    }

    #[test]
    fn test_rich_inline_code_and_emphasis() {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight_rich_markdown("run `ls -la` with **force** or *care*");
        assert_eq!(
            classes_of(&marked),
            vec![StyleClass::Code, StyleClass::Bold, StyleClass::Italic]
        );
    }

    #[test]
    fn test_rich_bold_wins_over_italic() {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight_rich_markdown("**strong**");
        // 太字パスが先に走るため、斜体パスは同じ範囲を再注釈できない
        assert_eq!(classes_of(&marked), vec![StyleClass::Bold]);
    }

    #[test]
    fn test_rich_list_markers() {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight_rich_markdown("- first\n2. second\n");
        assert_eq!(classes_of(&marked), vec![StyleClass::List, StyleClass::List]);
    }

    #[test]
    fn test_rich_list_inside_fence_stays_code() {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight_rich_markdown("```\n- not a list\n```");
        // フェンスブロックが先に注釈されるため、内部のリストマーカーは再注釈されない
        assert_eq!(classes_of(&marked), vec![StyleClass::Code]);
    }

    #[test]
    fn test_rich_headings_keep_line_semantics() {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight_rich_markdown("# top\n## sub\n");
        assert_eq!(
            classes_of(&marked),
            vec![StyleClass::Comment, StyleClass::Keyword]
        );
    }
}
