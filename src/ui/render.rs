//! エディタビュー描画
//!
//! マーク済みテキストを端末のスタイル付き行へ変換して描画する。
//! スパン境界はエスケープ済みテキスト上で確定しているため、
//! 表示直前に区間単位でエンティティを元の文字へ戻す。
//!
//! 描画はハイライトレイヤのスクロール値だけを参照する。入力レイヤとの
//! 同期はサーフェスの責務であり、ビューが独自にスクロールすることはない。

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::editor::surface::EditorSurface;
use crate::escape::unescape;
use crate::syntax::MarkedText;
use crate::ui::theme::{ComponentType, Theme};

/// タブの表示幅（スペース換算）
const TAB_DISPLAY_WIDTH: usize = 4;

/// ビュー構成
///
/// 汎用設定エディタとコマンドエディタの2変種をオプションで表現する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorViewOptions {
    /// 行番号ガターを表示するか
    pub line_numbers: bool,
    /// 内容量に応じて高さを自動調整するか
    pub auto_height: bool,
}

impl EditorViewOptions {
    /// 汎用設定ファイルエディタ
    pub fn config() -> Self {
        Self {
            line_numbers: false,
            auto_height: false,
        }
    }

    /// コマンドエディタ（行番号 + 自動高さ）
    pub fn command() -> Self {
        Self {
            line_numbers: true,
            auto_height: true,
        }
    }
}

/// エディタビュー描画器
#[derive(Debug)]
pub struct EditorView {
    options: EditorViewOptions,
}

impl EditorView {
    pub fn new(options: EditorViewOptions) -> Self {
        Self { options }
    }

    /// 構成を取得
    pub fn options(&self) -> EditorViewOptions {
        self.options
    }

    /// 自動高さ時の希望行数（ステータス行を除く、上限でクランプ）
    pub fn desired_height(&self, surface: &EditorSurface, max_height: u16) -> u16 {
        if !self.options.auto_height {
            return max_height;
        }
        let lines = surface.content().split('\n').count() as u16;
        lines.clamp(1, max_height)
    }

    /// エディタ本体を描画し、カーソルの画面座標を返す
    ///
    /// カーソルがスクロール範囲外にある場合は `None`
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        surface: &EditorSurface,
        theme: &Theme,
    ) -> Option<(u16, u16)> {
        let scroll = surface.highlight_scroll();
        let gutter_width = self.gutter_width(surface);

        if self.options.line_numbers && gutter_width < area.width {
            let gutter_area = Rect::new(area.x, area.y, gutter_width, area.height);
            let total_lines = surface.content().split('\n').count();
            let numbers: Vec<Line> = (scroll.top + 1..=total_lines)
                .take(area.height as usize)
                .map(|number| {
                    Line::from(format!("{:>width$} ", number, width = gutter_width as usize - 1))
                })
                .collect();
            let gutter = Paragraph::new(numbers).style(theme.style(&ComponentType::LineNumber));
            frame.render_widget(gutter, gutter_area);
        }

        let text_area = Rect::new(
            area.x + gutter_width,
            area.y,
            area.width.saturating_sub(gutter_width),
            area.height,
        );

        let lines = prepare_lines(surface.marked(), theme);
        let paragraph = Paragraph::new(lines)
            .style(theme.style(&ComponentType::TextArea))
            .scroll((scroll.top as u16, scroll.left as u16));
        frame.render_widget(paragraph, text_area);

        self.cursor_screen_position(surface, text_area)
    }

    /// カーソルの画面座標を計算
    fn cursor_screen_position(
        &self,
        surface: &EditorSurface,
        text_area: Rect,
    ) -> Option<(u16, u16)> {
        let scroll = surface.highlight_scroll();
        let (line, _) = surface.input().cursor_line_column();

        if line < scroll.top {
            return None;
        }
        let screen_line = line - scroll.top;
        if screen_line >= text_area.height as usize {
            return None;
        }

        let column_width = cursor_display_column(surface);
        if column_width < scroll.left {
            return None;
        }
        let screen_column = column_width - scroll.left;
        if screen_column >= text_area.width as usize {
            return None;
        }

        Some((
            text_area.x + screen_column as u16,
            text_area.y + screen_line as u16,
        ))
    }

    fn gutter_width(&self, surface: &EditorSurface) -> u16 {
        if !self.options.line_numbers {
            return 0;
        }
        let total_lines = surface.content().split('\n').count();
        let digits = total_lines.to_string().len() as u16;
        digits + 1
    }
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new(EditorViewOptions::config())
    }
}

/// マーク済みテキストをスタイル付きの行リストへ変換
///
/// 各区間のエンティティを戻し、タブをスペース展開してからスパン化する
pub fn prepare_lines(marked: &MarkedText, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for (segment, class) in marked.segments() {
        let style = class.map(|class| theme.style_for_class(class));
        let display = unescape(segment).replace('\t', &" ".repeat(TAB_DISPLAY_WIDTH));

        let mut pieces = display.split('\n').peekable();
        while let Some(piece) = pieces.next() {
            if !piece.is_empty() {
                current.push(match style {
                    Some(style) => Span::styled(piece.to_string(), style),
                    None => Span::raw(piece.to_string()),
                });
            }
            if pieces.peek().is_some() {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
        }
    }

    lines.push(Line::from(current));
    lines
}

/// カーソルの表示列（タブ展開と全角幅を考慮）
fn cursor_display_column(surface: &EditorSurface) -> usize {
    let (line, column) = surface.input().cursor_line_column();
    let Some(line_text) = surface.content().split('\n').nth(line) else {
        return 0;
    };

    line_text
        .chars()
        .take(column)
        .map(|ch| {
            if ch == '\t' {
                TAB_DISPLAY_WIDTH
            } else {
                ch.width().unwrap_or(0)
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::surface::EditorSurface;
    use crate::syntax::{Highlighter, Language};

    #[test]
    fn test_prepare_lines_splits_on_newlines() {
        let marked = Highlighter::new().highlight("# a\nplain\n", Language::Markdown);
        let lines = prepare_lines(&marked, &Theme::dark());
        // 末尾改行の後の空行を含めて3行
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_prepare_lines_restores_entities_for_display() {
        let marked = Highlighter::new().highlight("a < b", Language::Plain);
        let lines = prepare_lines(&marked, &Theme::dark());
        let rendered: String = lines[0].spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(rendered, "a < b");
    }

    #[test]
    fn test_prepare_lines_expands_tabs() {
        let marked = Highlighter::new().highlight("a\tb", Language::Plain);
        let lines = prepare_lines(&marked, &Theme::dark());
        let rendered: String = lines[0].spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(rendered, "a    b");
    }

    #[test]
    fn test_styled_segment_gets_theme_style() {
        let theme = Theme::dark();
        let marked = Highlighter::new().highlight("## head", Language::Markdown);
        let lines = prepare_lines(&marked, &theme);
        assert_eq!(lines[0].spans.len(), 1);
        assert_eq!(
            lines[0].spans[0].style.fg,
            theme.style(&ComponentType::SyntaxKeyword).fg
        );
    }

    #[test]
    fn test_desired_height_follows_content() {
        let surface = EditorSurface::new("a\nb\nc", Language::Plain);
        let view = EditorView::new(EditorViewOptions::command());
        assert_eq!(view.desired_height(&surface, 20), 3);
        assert_eq!(view.desired_height(&surface, 2), 2);

        let fixed = EditorView::new(EditorViewOptions::config());
        assert_eq!(fixed.desired_height(&surface, 20), 20);
    }

    #[test]
    fn test_cursor_display_column_counts_tabs_and_wide_chars() {
        let mut surface = EditorSurface::new("\tあx", Language::Plain);
        surface.input_mut().set_cursor(2);
        assert_eq!(cursor_display_column(&surface), TAB_DISPLAY_WIDTH + 2);
    }

    #[test]
    fn test_variant_options() {
        assert!(!EditorViewOptions::config().line_numbers);
        assert!(EditorViewOptions::command().line_numbers);
        assert!(EditorViewOptions::command().auto_height);
    }
}
