//! メインアプリケーション構造体
//!
//! エディタシェル・ドキュメントストア・端末描画を統合し、
//! アプリケーションのライフサイクルを管理する。
//! 保存はこの層で同期実行され、結果だけがシェルへ戻る。

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode as CrosstermKeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::editor::{EditorShell, SessionStatus};
use crate::error::{KasaneError, Result, UiError};
use crate::host::{DocumentStore, FileDocumentStore};
use crate::input::{EditorAction, Key, Keymap};
use crate::ui::{ComponentType, EditorView, EditorViewOptions, Theme};

/// 直近の描画で確定したテキスト領域の寸法
///
/// カーソル追従スクロールの計算に使う。初回描画前は既定の端末サイズ
#[derive(Debug, Clone, Copy)]
struct Viewport {
    height: usize,
    width: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            height: 24,
            width: 80,
        }
    }
}

/// メインアプリケーション構造体
///
/// 全てのコンポーネントを統合し、イベントループを駆動する
pub struct App {
    shell: EditorShell,
    store: Box<dyn DocumentStore>,
    path: String,
    theme: Theme,
    view: EditorView,
    keymap: Keymap,
    viewport: Viewport,
    running: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("path", &self.path)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl App {
    /// ファイルを開いて汎用設定エディタとして起動する
    pub fn new(path: &str) -> Result<Self> {
        Self::with_store(path, Box::new(FileDocumentStore::new()), false)
    }

    /// コマンドエディタ変種として起動する
    ///
    /// 拡張Markdownハイライト・行番号・Escでの破棄が有効になる
    pub fn new_command_editor(path: &str) -> Result<Self> {
        Self::with_store(path, Box::new(FileDocumentStore::new()), true)
    }

    /// ストア差し替え付きのコンストラクタ
    pub fn with_store(
        path: &str,
        store: Box<dyn DocumentStore>,
        command_mode: bool,
    ) -> Result<Self> {
        let document = store
            .load(path)
            .map_err(|error| KasaneError::Application(format!("{error:#}")))?;

        let shell = EditorShell::new(document.content, document.language)
            .with_rich_markdown(command_mode);

        let (view, keymap) = if command_mode {
            (
                EditorView::new(EditorViewOptions::command()),
                Keymap::command_editor(),
            )
        } else {
            (
                EditorView::new(EditorViewOptions::config()),
                Keymap::standard(),
            )
        };

        Ok(Self {
            shell,
            store,
            path: path.to_string(),
            theme: Theme::dark(),
            view,
            keymap,
            viewport: Viewport::default(),
            running: true,
        })
    }

    /// アプリケーションが実行中かどうかを確認
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// アプリケーションを終了状態にする
    pub fn shutdown(&mut self) {
        self.running = false;
    }

    /// エディタシェル（テスト・組み込み用）
    pub fn shell(&self) -> &EditorShell {
        &self.shell
    }

    /// メインイベントループを実行
    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal =
            Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        while self.running {
            terminal
                .draw(|frame| self.draw(frame))
                .map_err(|err| terminal_error("render", err))?;
            // 描画コミット後にタブ挿入のカーソル復元を適用する
            self.shell.commit_pending_cursor();

            if event::poll(Duration::from_millis(16))
                .map_err(|err| terminal_error("event poll", err))?
            {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) => self.handle_key_event(key_event),
                    Event::Paste(text) => {
                        self.shell.insert_str(&text);
                        self.ensure_cursor_visible();
                    }
                    Event::Resize(_, _) => {}
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
                }
            }
        }

        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        if area.height < 2 {
            return;
        }

        let available = area.height - 1;
        let editor_height = self
            .view
            .desired_height(self.shell.surface(), available)
            .min(available);
        let editor_area = Rect::new(area.x, area.y, area.width, editor_height);
        let status_area = Rect::new(area.x, area.y + editor_height, area.width, 1);

        self.viewport = Viewport {
            height: editor_area.height as usize,
            width: editor_area.width as usize,
        };

        if let Some((x, y)) = self
            .view
            .render(frame, editor_area, self.shell.surface(), &self.theme)
        {
            frame.set_cursor_position(Position::new(x, y));
        }

        self.draw_status_line(frame, status_area);
    }

    fn draw_status_line(&self, frame: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![Span::raw(format!(
            " {}{}",
            self.path,
            if self.shell.is_dirty() { " *" } else { "" }
        ))];

        match self.shell.status() {
            SessionStatus::Saving => {
                spans.push(Span::styled(
                    "  saving...",
                    self.theme.style(&ComponentType::Saving),
                ));
            }
            SessionStatus::SaveFailed => {
                if let Some(message) = self.shell.save_error() {
                    spans.push(Span::styled(
                        format!("  save failed: {message}"),
                        self.theme.style(&ComponentType::Error),
                    ));
                }
            }
            SessionStatus::Clean | SessionStatus::Dirty => {}
        }

        let status = Paragraph::new(Line::from(spans))
            .style(self.theme.style(&ComponentType::StatusLine));
        frame.render_widget(status, area);
    }

    /// キーイベントを処理する
    ///
    /// キーマップで解決できたらアクションを実行し、解決できない
    /// 修飾なし文字はそのまま挿入する
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        if event.kind == KeyEventKind::Release {
            return;
        }

        let key = Key::from(event);
        if let Some(action) = self.keymap.resolve(&key) {
            self.handle_action(action);
            return;
        }

        // 通常の文字入力（大文字・記号は元のイベントから取る）
        if let CrosstermKeyCode::Char(ch) = event.code {
            if !key.modifiers.ctrl && !key.modifiers.alt {
                self.shell.insert_char(ch);
                self.ensure_cursor_visible();
            }
        }
    }

    /// エディタアクションを実行する
    pub fn handle_action(&mut self, action: EditorAction) {
        match action {
            EditorAction::Save => self.save(),
            EditorAction::Discard => self.discard(),
            EditorAction::Quit => self.shutdown(),
            EditorAction::InsertTab => self.shell.insert_tab(),
            EditorAction::InsertNewline => self.shell.insert_char('\n'),
            EditorAction::Backspace => self.shell.backspace(),
            EditorAction::Delete => self.shell.delete_forward(),
            EditorAction::MoveUp => self.shell.surface_mut().input_mut().move_up(),
            EditorAction::MoveDown => self.shell.surface_mut().input_mut().move_down(),
            EditorAction::MoveLeft => self.shell.surface_mut().input_mut().move_left(),
            EditorAction::MoveRight => self.shell.surface_mut().input_mut().move_right(),
            EditorAction::MoveLineStart => self.shell.surface_mut().input_mut().move_line_start(),
            EditorAction::MoveLineEnd => self.shell.surface_mut().input_mut().move_line_end(),
        }
        self.ensure_cursor_visible();
    }

    /// 保存を実行する
    ///
    /// シェルが保存開始を認めた場合のみストアへ書き出し、結果を返す。
    /// 失敗はステータスラインのインラインエラーになり、内容は保持される。
    fn save(&mut self) {
        let Some(pending) = self.shell.request_save() else {
            return;
        };

        let result = self
            .store
            .save(&self.path, &pending.content)
            .map_err(|error| format!("{error:#}"));

        if let Err(message) = &result {
            log::error!("save failed for {}: {}", self.path, message);
        }

        self.shell.finish_save(result);
    }

    /// 編集を破棄してベースラインへ戻す（コマンドエディタ変種）
    fn discard(&mut self) {
        let baseline = self.shell.baseline().to_string();
        self.shell.discard();
        self.shell.replace_content(&baseline);
    }

    /// カーソルが見える位置までスクロールする
    ///
    /// 入力レイヤのスクロールを動かし、ハイライトレイヤは同期で追従する
    fn ensure_cursor_visible(&mut self) {
        let (line, column) = self.shell.surface().input().cursor_line_column();
        let scroll = self.shell.surface().input().scroll();
        let height = self.viewport.height.max(1);
        let width = self.viewport.width.max(1);

        let mut top = scroll.top;
        let mut left = scroll.left;

        if line < top {
            top = line;
        } else if line >= top + height {
            top = line - height + 1;
        }

        if column < left {
            left = column;
        } else if column >= left + width {
            left = column - width + 1;
        }

        if top != scroll.top || left != scroll.left {
            self.shell.surface_mut().scroll_input_to(top, left);
        }
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)
        .map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen)
        .map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> KasaneError {
    KasaneError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
