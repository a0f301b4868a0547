//! エスケープ層とHTML出力の性質テスト
//!
//! 任意の入力に対して注入安全性の不変条件が保たれることを公開APIで確認する

use kasane::escape::{escape, unescape};
use kasane::{Highlighter, Language};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

fn arbitrary_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<char>(), 0..64)
        .prop_map(|chars| chars.into_iter().collect::<String>())
}

/// マークアップ風の文字を多く含むテキスト
fn markup_heavy_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just('<'),
            Just('>'),
            Just('&'),
            Just('"'),
            Just('\''),
            Just('#'),
            Just('`'),
            Just('*'),
            Just(':'),
            Just('\n'),
            proptest::char::range('a', 'z'),
        ],
        0..64,
    )
    .prop_map(|chars| chars.into_iter().collect::<String>())
}

fn language_strategy() -> impl Strategy<Value = Language> {
    prop_oneof![
        Just(Language::Markdown),
        Just(Language::Yaml),
        Just(Language::Json),
        Just(Language::Plain),
    ]
}

/// ハイライタが生成する固定タグを取り除く
fn strip_generated_tags(html: &str) -> String {
    let mut stripped = html.to_string();
    for class in [
        "hl-comment",
        "hl-keyword",
        "hl-string",
        "hl-code",
        "hl-bold",
        "hl-italic",
        "hl-list",
    ] {
        stripped = stripped.replace(&format!("<span class=\"{class}\">"), "");
    }
    stripped.replace("</span>", "")
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn escape_output_has_no_markup_characters(input in arbitrary_text()) {
        let escaped = escape(&input);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));

        // & はエンティティの開始としてのみ現れる
        let mut rest = escaped.as_str();
        while let Some(pos) = rest.find('&') {
            let tail = &rest[pos..];
            prop_assert!(
                tail.starts_with("&amp;")
                    || tail.starts_with("&lt;")
                    || tail.starts_with("&gt;")
                    || tail.starts_with("&quot;")
                    || tail.starts_with("&#39;")
            );
            rest = &tail[1..];
        }
    }

    #[test]
    fn unescape_inverts_escape(input in arbitrary_text()) {
        prop_assert_eq!(unescape(&escape(&input)), input);
    }

    #[test]
    fn html_output_contains_only_generated_tags(
        input in markup_heavy_text(),
        language in language_strategy()
    ) {
        let highlighter = Highlighter::new();
        let html = highlighter.highlight(&input, language).to_html();

        let stripped = strip_generated_tags(&html);
        prop_assert!(!stripped.contains('<'), "leaked markup in {:?}", stripped);
        prop_assert!(!stripped.contains('>'), "leaked markup in {:?}", stripped);
    }

    #[test]
    fn marked_text_is_projection_of_escaped_input(
        input in markup_heavy_text(),
        language in language_strategy()
    ) {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight(&input, language);

        // テキスト部はエスケープ結果そのもの
        let escaped = escape(&input);
        prop_assert_eq!(marked.text(), escaped.as_str());

        // 注釈は整列・非重複・範囲内・文字境界
        let mut previous_end = 0;
        for span in marked.spans() {
            prop_assert!(span.start < span.end);
            prop_assert!(span.start >= previous_end);
            prop_assert!(span.end <= marked.text().len());
            prop_assert!(marked.text().is_char_boundary(span.start));
            prop_assert!(marked.text().is_char_boundary(span.end));
            previous_end = span.end;
        }

        // 区間列の連結で全文が復元できる
        let joined: String = marked
            .segments()
            .iter()
            .map(|(segment, _)| *segment)
            .collect();
        prop_assert_eq!(joined, marked.text());
    }

    #[test]
    fn rich_markdown_holds_same_invariants(input in markup_heavy_text()) {
        let highlighter = Highlighter::new();
        let marked = highlighter.highlight_rich_markdown(&input);

        let stripped = strip_generated_tags(&marked.to_html());
        prop_assert!(!stripped.contains('<'));
        prop_assert!(!stripped.contains('>'));

        let mut previous_end = 0;
        for span in marked.spans() {
            prop_assert!(span.start >= previous_end);
            previous_end = span.end;
        }
    }
}
