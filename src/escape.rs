//! エスケープ層
//!
//! 生テキストをHTMLエンティティ安全な形式へ変換する
//! トークナイザは必ずエスケープ済みテキストに対してのみ動作する（注入安全性の要）

/// `"` のエンティティ表現（トークナイザのパターンはこちらを対象にする）
pub const QUOT: &str = "&quot;";

/// `'` のエンティティ表現
pub const APOS: &str = "&#39;";

/// HTMLとして意味を持つ5文字をエンティティへ置換する
///
/// 左から右への単一パス。`&` を最初に処理する順序と等価であり、
/// 既に置換したエンティティが再エスケープされることはない。
/// 一方向変換であり、同じ文字列へ二度適用してはならない
/// （ハイライトパイプラインは読み込み直後に一度だけ適用する）。
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str(QUOT),
            '\'' => escaped.push_str(APOS),
            other => escaped.push(other),
        }
    }
    escaped
}

/// エスケープの逆変換
///
/// 端末描画用。ハイライトのスパン境界はエスケープ済みテキスト上で
/// 確定しているため、表示直前に区間単位で元の文字へ戻す。
pub fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let (replacement, consumed) = if rest.starts_with("&amp;") {
            ("&", "&amp;".len())
        } else if rest.starts_with("&lt;") {
            ("<", "&lt;".len())
        } else if rest.starts_with("&gt;") {
            (">", "&gt;".len())
        } else if rest.starts_with(QUOT) {
            ("\"", QUOT.len())
        } else if rest.starts_with(APOS) {
            ("'", APOS.len())
        } else {
            ("&", 1)
        };

        result.push_str(replacement);
        rest = &rest[consumed..];
    }

    result.push_str(rest);
    result
}
