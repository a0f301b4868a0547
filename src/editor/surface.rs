//! 二層構造エディタサーフェス
//!
//! 完全に操作可能な入力レイヤと、その背後に重ねるハイライト描画レイヤを
//! 同期させる。生テキストの所有、変更ごとの再ハイライト、タブ挿入の
//! カーソル復元、スクロール同期を担う。
//!
//! このコンポーネントはI/Oを行わず、失敗しない。

use crate::syntax::{Highlighter, Language, MarkedText};

/// スクロール位置
///
/// 入力レイヤが権威を持ち、ハイライトレイヤはスクロールイベントごとに
/// 値を複製するだけの従属側になる
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub top: usize,
    pub left: usize,
}

/// 入力レイヤ
///
/// ネイティブ入力コントロールに相当する最小のテキスト制御。
/// カーソル・選択範囲・スクロールは基本的にこのレイヤ自身が管理し、
/// サーフェスが触るのはタブ挿入操作のときだけ。
#[derive(Debug, Clone)]
pub struct InputLayer {
    content: String,
    cursor: usize,
    selection_anchor: Option<usize>,
    scroll: ScrollOffset,
}

impl InputLayer {
    fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            cursor: 0,
            selection_anchor: None,
            scroll: ScrollOffset::default(),
        }
    }

    /// 現在の内容
    pub fn content(&self) -> &str {
        &self.content
    }

    /// カーソル位置（文字インデックス）
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 内容の文字数
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// カーソルを移動（選択は解除）
    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.char_count());
        self.selection_anchor = None;
    }

    /// 選択範囲を設定（anchor から cursor まで）
    pub fn select_range(&mut self, anchor: usize, cursor: usize) {
        let count = self.char_count();
        self.selection_anchor = Some(anchor.min(count));
        self.cursor = cursor.min(count);
    }

    /// 選択範囲 `(開始, 終了)` を取得。選択なしの場合はカーソル位置で縮退
    pub fn selection(&self) -> (usize, usize) {
        match self.selection_anchor {
            Some(anchor) if anchor <= self.cursor => (anchor, self.cursor),
            Some(anchor) => (self.cursor, anchor),
            None => (self.cursor, self.cursor),
        }
    }

    /// 文字列を挿入（選択範囲があれば置換）。カーソルは挿入末尾へ
    fn insert_str(&mut self, text: &str) {
        let (start, end) = self.selection();
        let start_byte = self.byte_index(start);
        let end_byte = self.byte_index(end);
        self.content.replace_range(start_byte..end_byte, text);
        self.cursor = start + text.chars().count();
        self.selection_anchor = None;
    }

    fn insert_char(&mut self, ch: char) {
        let mut buffer = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buffer));
    }

    /// カーソル直前の1文字（または選択範囲）を削除
    fn backspace(&mut self) -> bool {
        let (start, end) = self.selection();
        if start != end {
            self.insert_str("");
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        let start_byte = self.byte_index(self.cursor - 1);
        let end_byte = self.byte_index(self.cursor);
        self.content.replace_range(start_byte..end_byte, "");
        self.cursor -= 1;
        true
    }

    /// カーソル位置の1文字（または選択範囲）を削除
    fn delete_forward(&mut self) -> bool {
        let (start, end) = self.selection();
        if start != end {
            self.insert_str("");
            return true;
        }
        if self.cursor >= self.char_count() {
            return false;
        }
        let start_byte = self.byte_index(self.cursor);
        let end_byte = self.byte_index(self.cursor + 1);
        self.content.replace_range(start_byte..end_byte, "");
        true
    }

    /// 内容全体を置換する
    ///
    /// ホストによる値の差し替えに相当し、カーソルは末尾へリセットされる。
    /// 通常のタイピングはこの経路を通らない。
    fn replace_content(&mut self, new_text: &str) {
        self.content.clear();
        self.content.push_str(new_text);
        self.cursor = self.char_count();
        self.selection_anchor = None;
    }

    /// カーソルの行・列（いずれも0ベース、文字単位）
    pub fn cursor_line_column(&self) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for (index, ch) in self.content.chars().enumerate() {
            if index == self.cursor {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    /// 左へ1文字移動
    pub fn move_left(&mut self) {
        let (start, end) = self.selection();
        if start != end {
            self.set_cursor(start);
        } else if self.cursor > 0 {
            self.set_cursor(self.cursor - 1);
        }
    }

    /// 右へ1文字移動
    pub fn move_right(&mut self) {
        let (start, end) = self.selection();
        if start != end {
            self.set_cursor(end);
        } else {
            self.set_cursor(self.cursor + 1);
        }
    }

    /// 上の行の同じ列へ移動（列は行長で切り詰め）
    pub fn move_up(&mut self) {
        let (line, column) = self.cursor_line_column();
        if line == 0 {
            return;
        }
        self.move_to_line_column(line - 1, column);
    }

    /// 下の行の同じ列へ移動
    pub fn move_down(&mut self) {
        let (line, column) = self.cursor_line_column();
        self.move_to_line_column(line + 1, column);
    }

    /// 行頭へ移動
    pub fn move_line_start(&mut self) {
        let (line, _) = self.cursor_line_column();
        self.move_to_line_column(line, 0);
    }

    /// 行末へ移動
    pub fn move_line_end(&mut self) {
        let (line, _) = self.cursor_line_column();
        self.move_to_line_column(line, usize::MAX);
    }

    fn move_to_line_column(&mut self, target_line: usize, target_column: usize) {
        let lines: Vec<&str> = self.content.split('\n').collect();
        let Some(line_text) = lines.get(target_line) else {
            return;
        };

        let mut position = 0;
        for line in lines.iter().take(target_line) {
            position += line.chars().count() + 1; // +1 は改行
        }
        position += target_column.min(line_text.chars().count());
        self.set_cursor(position);
    }

    /// スクロール位置
    pub fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    /// スクロール位置を設定（入力レイヤが権威）
    pub fn scroll_to(&mut self, top: usize, left: usize) {
        self.scroll = ScrollOffset { top, left };
    }

    /// 文字インデックスをバイトインデックスへ変換
    fn byte_index(&self, char_pos: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_pos)
            .map(|(index, _)| index)
            .unwrap_or(self.content.len())
    }
}

/// 二層構造エディタサーフェス
///
/// 生テキストを所有し、変更のたびに `エスケープ → トークナイズ` で
/// マーク済みテキストを再計算する。ハイライトレイヤのスクロールは
/// 入力レイヤのスクロールイベントでのみ更新され、独立にスクロール
/// することはない。
#[derive(Debug)]
pub struct EditorSurface {
    input: InputLayer,
    highlight_scroll: ScrollOffset,
    marked: MarkedText,
    language: Language,
    rich_markdown: bool,
    highlighter: Highlighter,
    pending_cursor: Option<usize>,
}

impl EditorSurface {
    /// 内容と言語からサーフェスを作成
    pub fn new(content: impl Into<String>, language: Language) -> Self {
        let highlighter = Highlighter::new();
        let input = InputLayer::new(content);
        let marked = highlighter.highlight(input.content(), language);

        Self {
            input,
            highlight_scroll: ScrollOffset::default(),
            marked,
            language,
            rich_markdown: false,
            highlighter,
            pending_cursor: None,
        }
    }

    /// 拡張Markdownハイライトを有効化（コマンドエディタ向け）
    pub fn with_rich_markdown(mut self, enabled: bool) -> Self {
        self.set_rich_markdown(enabled);
        self
    }

    /// 拡張Markdownハイライトの切り替え
    pub fn set_rich_markdown(&mut self, enabled: bool) {
        self.rich_markdown = enabled;
        self.refresh();
    }

    /// 現在の生テキスト
    pub fn content(&self) -> &str {
        self.input.content()
    }

    /// 言語
    pub fn language(&self) -> Language {
        self.language
    }

    /// ハイライト済みテキスト（現在内容の射影）
    pub fn marked(&self) -> &MarkedText {
        &self.marked
    }

    /// 入力レイヤ（読み取り専用）
    pub fn input(&self) -> &InputLayer {
        &self.input
    }

    /// ハイライトレイヤのスクロール位置
    pub fn highlight_scroll(&self) -> ScrollOffset {
        self.highlight_scroll
    }

    /// 内容全体を置き換える
    ///
    /// カーソルは入力レイヤの置換セマンティクスに従い末尾へ移る。
    /// 通常のタイピングは `insert_char` などの編集操作を使う。
    pub fn on_content_change(&mut self, new_text: &str) {
        self.input.replace_content(new_text);
        self.refresh();
    }

    /// 1文字挿入（選択範囲があれば置換）
    pub fn insert_char(&mut self, ch: char) {
        self.input.insert_char(ch);
        self.refresh();
    }

    /// 文字列挿入（ペースト相当）
    pub fn insert_str(&mut self, text: &str) {
        self.input.insert_str(text);
        self.refresh();
    }

    /// 後退削除
    pub fn backspace(&mut self) -> bool {
        let changed = self.input.backspace();
        if changed {
            self.refresh();
        }
        changed
    }

    /// 前方削除
    pub fn delete_forward(&mut self) -> bool {
        let changed = self.input.delete_forward();
        if changed {
            self.refresh();
        }
        changed
    }

    /// カーソル移動などレイヤ内操作のための可変アクセス
    ///
    /// 内容を変更する操作はサーフェスの編集メソッドを使うこと
    /// （再ハイライトが走らないため）
    pub fn input_mut(&mut self) -> &mut InputLayer {
        &mut self.input
    }

    /// タブ挿入
    ///
    /// 選択範囲をタブ1文字で置換し、カーソル復元位置
    /// `選択開始 + 1` を記録する。内容の置換でカーソルは一旦末尾へ
    /// 移るため、ホストは描画コミット後に `commit_pending_cursor` を
    /// 呼んで復元しなければならない。これを忘れるとタブ入力のたびに
    /// カーソルが文末へ飛ぶ。
    pub fn insert_tab(&mut self) {
        let (start, end) = self.input.selection();
        let start_byte = self.input.byte_index(start);
        let end_byte = self.input.byte_index(end);

        let mut new_text = String::with_capacity(self.input.content().len() + 1);
        new_text.push_str(&self.input.content()[..start_byte]);
        new_text.push('\t');
        new_text.push_str(&self.input.content()[end_byte..]);

        self.on_content_change(&new_text);
        self.pending_cursor = Some(start + 1);
    }

    /// 復元待ちのカーソル位置を取り出す（取り出すと消える）
    pub fn take_pending_cursor(&mut self) -> Option<usize> {
        self.pending_cursor.take()
    }

    /// 復元待ちのカーソル位置を入力レイヤへ適用する
    ///
    /// 描画コミット後（次のフレーム先頭）に呼ぶこと
    pub fn commit_pending_cursor(&mut self) {
        if let Some(position) = self.pending_cursor.take() {
            self.input.set_cursor(position);
        }
    }

    /// スクロールイベント処理
    ///
    /// 入力レイヤの現在値をハイライトレイヤへ複製する。
    /// ハイライトレイヤが独立にスクロールする経路は存在しない。
    pub fn on_scroll(&mut self) {
        self.highlight_scroll = self.input.scroll();
    }

    /// 入力レイヤのスクロールを更新し、ハイライトレイヤへ同期する
    pub fn scroll_input_to(&mut self, top: usize, left: usize) {
        self.input.scroll_to(top, left);
        self.on_scroll();
    }

    fn refresh(&mut self) {
        self.marked = if self.rich_markdown && self.language == Language::Markdown {
            self.highlighter.highlight_rich_markdown(self.input.content())
        } else {
            self.highlighter.highlight(self.input.content(), self.language)
        };
    }
}
