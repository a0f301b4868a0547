//! エディタシェル
//!
//! 二層構造サーフェスとホスト提供の保存処理を橋渡しし、
//! ダーティ・保存中・エラーの各状態を外へ公開する。
//! 失敗はすべてこの境界で堰き止め、サーフェスやトークナイザへは
//! 決して伝播させない。

use crate::editor::session::{EditSession, SessionStatus};
use crate::editor::surface::EditorSurface;
use crate::syntax::Language;

/// 変更通知コールバック（キーストローク・ペースト・タブ挿入ごと）
pub type ChangeListener = Box<dyn FnMut(&str)>;

/// 保存・破棄アクション通知コールバック
pub type ActionListener = Box<dyn FnMut()>;

/// 開始が認められた保存要求
///
/// ホストはこの内容を永続化し、結果を `finish_save` で返す
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub content: String,
}

/// エディタシェル
///
/// 保存は常に1件のみ進行し、進行中の `request_save` は無視される。
/// 保存失敗時も内容は入力されたまま保持され、ユーザは編集の継続と
/// 即時リトライのどちらも選べる。
pub struct EditorShell {
    surface: EditorSurface,
    session: EditSession,
    in_flight: Option<String>,
    on_change: Option<ChangeListener>,
    on_save: Option<ActionListener>,
    on_discard: Option<ActionListener>,
}

impl EditorShell {
    /// ドキュメント内容と言語からシェルを作成
    ///
    /// ベースラインはこの時点の内容で確定する（セッション開始スナップショット）
    pub fn new(content: impl Into<String>, language: Language) -> Self {
        let content = content.into();
        let session = EditSession::new(content.clone());
        let surface = EditorSurface::new(content, language);

        Self {
            surface,
            session,
            in_flight: None,
            on_change: None,
            on_save: None,
            on_discard: None,
        }
    }

    /// 拡張Markdownハイライトを有効化（コマンドエディタ変種）
    pub fn with_rich_markdown(mut self, enabled: bool) -> Self {
        self.surface.set_rich_markdown(enabled);
        self
    }

    /// 変更通知コールバックを設定
    pub fn with_on_change(mut self, listener: ChangeListener) -> Self {
        self.on_change = Some(listener);
        self
    }

    /// 保存アクション通知コールバックを設定
    pub fn with_on_save(mut self, listener: ActionListener) -> Self {
        self.on_save = Some(listener);
        self
    }

    /// 破棄アクション通知コールバックを設定（コマンドエディタ変種）
    pub fn with_on_discard(mut self, listener: ActionListener) -> Self {
        self.on_discard = Some(listener);
        self
    }

    /// サーフェス（読み取り専用）
    pub fn surface(&self) -> &EditorSurface {
        &self.surface
    }

    /// セッション状態
    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    /// ダーティ判定
    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty(self.surface.content())
    }

    /// ベースラインテキスト
    pub fn baseline(&self) -> &str {
        self.session.baseline()
    }

    /// インライン表示用の保存エラーメッセージ
    pub fn save_error(&self) -> Option<&str> {
        self.session.last_error()
    }

    // --- 編集操作（サーフェスへ委譲し、セッション更新と変更通知を行う） ---

    /// 内容全体の置換
    pub fn replace_content(&mut self, new_text: &str) {
        self.surface.on_content_change(new_text);
        self.after_edit();
    }

    /// 1文字挿入
    pub fn insert_char(&mut self, ch: char) {
        self.surface.insert_char(ch);
        self.after_edit();
    }

    /// 文字列挿入（ペースト）
    pub fn insert_str(&mut self, text: &str) {
        self.surface.insert_str(text);
        self.after_edit();
    }

    /// 後退削除
    pub fn backspace(&mut self) {
        if self.surface.backspace() {
            self.after_edit();
        }
    }

    /// 前方削除
    pub fn delete_forward(&mut self) {
        if self.surface.delete_forward() {
            self.after_edit();
        }
    }

    /// タブ挿入（カーソル復元は描画後の `commit_pending_cursor` で）
    pub fn insert_tab(&mut self) {
        self.surface.insert_tab();
        self.after_edit();
    }

    /// 描画コミット後のカーソル復元
    pub fn commit_pending_cursor(&mut self) {
        self.surface.commit_pending_cursor();
    }

    /// カーソル移動等のための入力レイヤアクセス
    pub fn surface_mut(&mut self) -> &mut EditorSurface {
        &mut self.surface
    }

    fn after_edit(&mut self) {
        self.session.note_edit(self.surface.content());
        if let Some(listener) = &mut self.on_change {
            listener(self.surface.content());
        }
    }

    // --- 保存配線 ---

    /// 保存を要求する
    ///
    /// 開始できる場合のみ `Saving` へ遷移し、保存すべき内容を返す。
    /// 保存進行中・変更なしの場合は `None`（無視、キューイングしない）。
    pub fn request_save(&mut self) -> Option<PendingSave> {
        if !self.session.begin_save() {
            return None;
        }

        let content = self.surface.content().to_string();
        self.in_flight = Some(content.clone());

        if let Some(listener) = &mut self.on_save {
            listener();
        }

        Some(PendingSave { content })
    }

    /// 保存結果を反映する
    ///
    /// 成功時はベースラインを保存済みテキストへ前進させ、失敗時は
    /// エラーメッセージを保持する。どちらの場合も編集内容には触れない。
    pub fn finish_save(&mut self, result: Result<(), String>) {
        let Some(saved) = self.in_flight.take() else {
            // 対応する要求のない完了通知は破棄する
            return;
        };

        match result {
            Ok(()) => self.session.complete_save(saved, self.surface.content()),
            Err(message) => self.session.fail_save(message),
        }
    }

    /// 編集の破棄
    ///
    /// ホストのコールバックを呼ぶだけで、シェル自身の状態は変更しない
    /// （破棄後の後始末はホストの責務）
    pub fn discard(&mut self) {
        if let Some(listener) = &mut self.on_discard {
            listener();
        }
    }
}
