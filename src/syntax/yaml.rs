//! YAMLトークナイザ
//!
//! 行単位のパス。コメント行全体、`key:` キーワード、引用符付き値、
//! 行末コメントを分類する。どのパターンにも一致しない行は無スタイル。

use regex::Regex;

use super::{line_ranges, SpanSet, StyleClass};
use crate::escape::{APOS, QUOT};

/// YAML行分類ルール
#[derive(Debug)]
pub(crate) struct YamlRules {
    entry: Regex,
}

impl YamlRules {
    pub(crate) fn new() -> Self {
        Self {
            // ^(インデント)(キー)(コロン)(残り)
            entry: Regex::new(r"^([ \t]*)([^\s][^:]*)(:)(.*)$").expect("yaml entry pattern"),
        }
    }

    pub(crate) fn annotate(&self, escaped: &str, spans: &mut SpanSet) {
        for (start, end) in line_ranges(escaped) {
            let line = &escaped[start..end];

            // トリム後に # で始まる行は行全体をコメントに
            if line.trim_start().starts_with('#') {
                spans.try_insert(start, end, StyleClass::Comment);
                continue;
            }

            let Some(caps) = self.entry.captures(line) else {
                continue;
            };

            // `key:` をキーワードに（キー本体からコロンまで）
            let key = caps.get(2).expect("yaml key group");
            let colon = caps.get(3).expect("yaml colon group");
            spans.try_insert(start + key.start(), start + colon.end(), StyleClass::Keyword);

            let rest = caps.get(4).expect("yaml rest group");
            annotate_value(start + rest.start(), rest.as_str(), spans);
        }
    }
}

/// `key:` 以降の値部分を分類する
///
/// 全体が引用符で囲まれていれば文字列、そうでなければ
/// 空白 + `#` 以降を行末コメントとして扱う。それ以外は無スタイル。
fn annotate_value(rest_start: usize, rest: &str, spans: &mut SpanSet) {
    let trimmed = rest.trim();
    if trimmed.is_empty() {
        return;
    }

    let leading = rest.len() - rest.trim_start().len();
    let value_start = rest_start + leading;
    let value_end = value_start + trimmed.len();

    if is_fully_quoted(trimmed) {
        spans.try_insert(value_start, value_end, StyleClass::String);
        return;
    }

    // 空白に続く # から行末までをコメントに
    if let Some(pos) = rest.find(" #") {
        let comment_start = rest_start + pos + 1;
        spans.try_insert(comment_start, rest_start + rest.len(), StyleClass::Comment);
    }
}

/// 値全体が単一の引用符ペアで囲まれているか（エスケープ済み表現で判定）
fn is_fully_quoted(value: &str) -> bool {
    let double = value.starts_with(QUOT) && value.ends_with(QUOT) && value.len() >= QUOT.len() * 2;
    let single = value.starts_with(APOS) && value.ends_with(APOS) && value.len() >= APOS.len() * 2;
    double || single
}
