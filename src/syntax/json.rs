//! JSONトークナイザ
//!
//! エスケープ済み全文に対する2段のパス。パターンは引用符そのものではなく
//! エンティティ表現（`&quot;`）に一致させる。
//!
//! パス1が `"key": "value"` ペアを一括で注釈し、パス2が残りの
//! `"key":`（値が数値・真偽値・null・オブジェクト・配列のキー）を拾う。
//! この順序は必須。逆にするとパス1対象のキーが二重に注釈されてしまうが、
//! 注釈集合の重複拒否により順序通りなら一度しか注釈されない。

use regex::Regex;

use super::{SpanSet, StyleClass};

/// 引用符付き文字列のパターン（エスケープ済み表現）
///
/// 内容部は `&quot;` 以外のエンティティと通常文字のみを許す。
/// これにより非貪欲マッチが隣のキーまで跨ることはない。
const QUOTED: &str = r"&quot;(?:[^&\n]|&amp;|&lt;|&gt;|&#39;)*&quot;";

/// JSONハイライトルール
#[derive(Debug)]
pub(crate) struct JsonRules {
    pair: Regex,
    bare_key: Regex,
}

impl JsonRules {
    pub(crate) fn new() -> Self {
        Self {
            // "key": "value" — キーと引用符付き値の組
            pair: Regex::new(&format!(r"({QUOTED})(\s*:\s*)({QUOTED})"))
                .expect("json pair pattern"),
            // "key": — コロンが続くキー単体
            bare_key: Regex::new(&format!(r"({QUOTED})(\s*:)")).expect("json key pattern"),
        }
    }

    pub(crate) fn annotate(&self, escaped: &str, spans: &mut SpanSet) {
        // パス1：キー + 引用符付き値
        for caps in self.pair.captures_iter(escaped) {
            let key = caps.get(1).expect("json pair key group");
            let value = caps.get(3).expect("json pair value group");
            spans.try_insert(key.start(), key.end(), StyleClass::Keyword);
            spans.try_insert(value.start(), value.end(), StyleClass::String);
        }

        // パス2：残りのキー（パス1で注釈済みの範囲は重複拒否で素通り）
        for caps in self.bare_key.captures_iter(escaped) {
            let key = caps.get(1).expect("json bare key group");
            spans.try_insert(key.start(), key.end(), StyleClass::Keyword);
        }
    }
}
