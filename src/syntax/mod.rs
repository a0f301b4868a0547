//! シンタックスハイライトモジュール
//!
//! 言語別トークナイザの統合モジュール
//! 各トークナイザはエスケープ済みテキスト上の `(範囲, スタイル)` 注釈を
//! 順序付きパスで生成する純粋関数であり、決して失敗しない

pub mod json;
pub mod markdown;
pub mod yaml;

use crate::escape::escape;

/// 対象言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Markdown,
    Yaml,
    Json,
    /// 不明な言語タグのフォールバック（エスケープのみ、スタイルなし）
    Plain,
}

impl Language {
    /// 言語タグ文字列から判定（不明なタグはエラーにせず Plain へ）
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Language::Markdown,
            "yaml" | "yml" => Language::Yaml,
            "json" => Language::Json,
            _ => Language::Plain,
        }
    }

    /// ファイル拡張子から判定
    pub fn from_extension(extension: &str) -> Self {
        Self::from_tag(extension)
    }

    /// 言語タグ文字列
    pub fn tag(self) -> &'static str {
        match self {
            Language::Markdown => "markdown",
            Language::Yaml => "yaml",
            Language::Json => "json",
            Language::Plain => "plain",
        }
    }
}

/// スタイル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    /// コメント（Markdownの `# ` 行は見出しではなく区切りコメント扱い）
    Comment,
    /// キーワード（見出し、YAML/JSONのキー）
    Keyword,
    /// 文字列値
    String,
    /// コード（インラインコード、フェンス付きコードブロック）
    Code,
    /// 強調（太字）
    Bold,
    /// 強調（斜体）
    Italic,
    /// リストマーカー
    List,
}

impl StyleClass {
    /// HTML出力時のclass属性値
    pub fn css_class(self) -> &'static str {
        match self {
            StyleClass::Comment => "hl-comment",
            StyleClass::Keyword => "hl-keyword",
            StyleClass::String => "hl-string",
            StyleClass::Code => "hl-code",
            StyleClass::Bold => "hl-bold",
            StyleClass::Italic => "hl-italic",
            StyleClass::List => "hl-list",
        }
    }
}

/// スタイル注釈（エスケープ済みテキストへのバイト範囲）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedSpan {
    pub start: usize,
    pub end: usize,
    pub class: StyleClass,
}

/// パス実行中の注釈集合
///
/// 後段のパスは既存の注釈と重なる範囲を注釈できない。
/// 元実装の正規表現ネガティブ先読みに代わる重複防止機構であり、
/// パスの適用順序がそのまま優先順位になる。
#[derive(Debug, Default)]
pub(crate) struct SpanSet {
    spans: Vec<MarkedSpan>,
}

impl SpanSet {
    pub(crate) fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// 注釈を追加する。既存の注釈と重なる場合は何もせず false を返す
    pub(crate) fn try_insert(&mut self, start: usize, end: usize, class: StyleClass) -> bool {
        if start >= end {
            return false;
        }
        let overlaps = self
            .spans
            .iter()
            .any(|span| start < span.end && span.start < end);
        if overlaps {
            return false;
        }
        self.spans.push(MarkedSpan { start, end, class });
        true
    }

    /// 開始位置順に整列した注釈列へ変換
    pub(crate) fn into_sorted(mut self) -> Vec<MarkedSpan> {
        self.spans.sort_by_key(|span| span.start);
        self.spans
    }
}

/// ハイライト結果
///
/// エスケープ済みテキストと、その上の整列済み・非重複スタイル注釈。
/// `(生テキスト, 言語)` からの純粋な射影であり、独立したライフサイクルを持たない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedText {
    text: String,
    spans: Vec<MarkedSpan>,
}

impl MarkedText {
    fn new(text: String, spans: Vec<MarkedSpan>) -> Self {
        Self { text, spans }
    }

    /// エスケープ済みテキスト
    pub fn text(&self) -> &str {
        &self.text
    }

    /// スタイル注釈（開始位置順、非重複）
    pub fn spans(&self) -> &[MarkedSpan] {
        &self.spans
    }

    /// テキストを注釈境界で分割した区間列
    ///
    /// 各区間は `(エスケープ済み部分文字列, スタイル)`。注釈のない区間は `None`。
    pub fn segments(&self) -> Vec<(&str, Option<StyleClass>)> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for span in &self.spans {
            if span.start > cursor {
                segments.push((&self.text[cursor..span.start], None));
            }
            segments.push((&self.text[span.start..span.end], Some(span.class)));
            cursor = span.end;
        }

        if cursor < self.text.len() {
            segments.push((&self.text[cursor..], None));
        }

        segments
    }

    /// span タグ形式のHTMLマークアップへ変換
    ///
    /// テキスト部は全てエスケープ済みであり、このメソッドが挿入する
    /// 固定のタグ以外に生のマークアップが現れることはない。
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(self.text.len());
        for (segment, class) in self.segments() {
            match class {
                Some(class) => {
                    html.push_str("<span class=\"");
                    html.push_str(class.css_class());
                    html.push_str("\">");
                    html.push_str(segment);
                    html.push_str("</span>");
                }
                None => html.push_str(segment),
            }
        }
        html
    }
}

/// 言語別ハイライタ
///
/// 正規表現は構築時に一度だけコンパイルする。
/// `highlight` はエスケープを必ず一度だけ適用してから各言語のパスを流す。
#[derive(Debug)]
pub struct Highlighter {
    markdown: markdown::MarkdownRules,
    markdown_rich: markdown::MarkdownRichRules,
    yaml: yaml::YamlRules,
    json: json::JsonRules,
}

impl Highlighter {
    /// 全言語のルールをコンパイルして作成
    pub fn new() -> Self {
        Self {
            markdown: markdown::MarkdownRules::new(),
            markdown_rich: markdown::MarkdownRichRules::new(),
            yaml: yaml::YamlRules::new(),
            json: json::JsonRules::new(),
        }
    }

    /// 生テキストをエスケープしてハイライトする
    ///
    /// トークナイザは失敗しない。認識できない構文は無スタイルのまま通過し、
    /// 空入力は空出力になる。
    pub fn highlight(&self, raw: &str, language: Language) -> MarkedText {
        let escaped = escape(raw);
        let mut spans = SpanSet::new();

        match language {
            Language::Markdown => self.markdown.annotate(&escaped, &mut spans),
            Language::Yaml => self.yaml.annotate(&escaped, &mut spans),
            Language::Json => self.json.annotate(&escaped, &mut spans),
            Language::Plain => {}
        }

        MarkedText::new(escaped, spans.into_sorted())
    }

    /// コマンドエディタ向けの拡張Markdownハイライト
    ///
    /// 行分類に加えてインラインコード・フェンス・太字・斜体・リストの
    /// 全文パスを固定順で重ねる
    pub fn highlight_rich_markdown(&self, raw: &str) -> MarkedText {
        let escaped = escape(raw);
        let mut spans = SpanSet::new();
        self.markdown_rich.annotate(&escaped, &mut spans);
        MarkedText::new(escaped, spans.into_sorted())
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// 行ごとの `(開始バイト, 終了バイト)` を列挙（終端の改行は範囲に含めない）
pub(crate) fn line_ranges(text: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0;

    for line in text.split_inclusive('\n') {
        let end = start + line.len();
        let content_end = if line.ends_with('\n') { end - 1 } else { end };
        ranges.push((start, content_end));
        start = end;
    }

    ranges
}
