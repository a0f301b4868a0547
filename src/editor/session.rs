//! 編集セッション管理
//!
//! セッション開始時に基準テキスト（ベースライン）を一度だけ取得し、
//! 現在テキストとの構造的比較でダーティ状態を導出する。
//! 保存の進行状態は4値の状態機械で管理する。

/// セッション状態
///
/// 遷移規則：
/// * `Clean` → 編集 → `Dirty`
/// * `Dirty` → 保存開始 → `Saving`（進行中の再保存要求は無視）
/// * `Saving` → 成功 → `Clean`（ベースラインを保存済みテキストへ前進）
/// * `Saving` → 失敗 → `SaveFailed`（内容は保持、エラーをインライン表示）
/// * `SaveFailed` → 編集 → `Dirty`、または即時リトライ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Clean,
    Dirty,
    Saving,
    SaveFailed,
}

/// 編集セッション
///
/// ベースラインはセッション生成時のスナップショットであり、
/// 保存成功時にのみ前進する。コンポーネントのライフサイクルに
/// 依存せず、明示的な値として保持する。
#[derive(Debug, Clone)]
pub struct EditSession {
    baseline: String,
    status: SessionStatus,
    last_error: Option<String>,
}

impl EditSession {
    /// 現在の内容をベースラインとしてセッションを開始
    pub fn new(baseline: impl Into<String>) -> Self {
        Self {
            baseline: baseline.into(),
            status: SessionStatus::Clean,
            last_error: None,
        }
    }

    /// ベースラインテキスト
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// セッション状態
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// 直近の保存エラーメッセージ
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// ダーティ判定（ベースラインとの構造的不一致、毎回再計算）
    pub fn is_dirty(&self, current: &str) -> bool {
        current != self.baseline
    }

    /// 編集発生を通知して状態を再導出する
    ///
    /// 保存中はステータスを動かさない（完了時に再評価される）
    pub fn note_edit(&mut self, current: &str) {
        if self.status == SessionStatus::Saving {
            return;
        }
        if self.status == SessionStatus::SaveFailed {
            self.last_error = None;
        }
        self.status = if self.is_dirty(current) {
            SessionStatus::Dirty
        } else {
            SessionStatus::Clean
        };
    }

    /// 保存を開始できるなら `Saving` へ遷移して true を返す
    ///
    /// 進行中（`Saving`）および保存すべき変更がない（`Clean`）場合は false。
    /// 同時保存は常に1件のみで、キューイングは行わない。
    pub fn begin_save(&mut self) -> bool {
        match self.status {
            SessionStatus::Dirty | SessionStatus::SaveFailed => {
                self.status = SessionStatus::Saving;
                true
            }
            SessionStatus::Clean | SessionStatus::Saving => false,
        }
    }

    /// 保存成功。ベースラインを保存済みテキストへ前進させる
    ///
    /// 保存中にユーザが編集を続けた場合に備え、現在テキストと
    /// 新ベースラインを比較して `Clean` / `Dirty` を決める。
    pub fn complete_save(&mut self, saved: String, current: &str) {
        self.baseline = saved;
        self.last_error = None;
        self.status = if self.is_dirty(current) {
            SessionStatus::Dirty
        } else {
            SessionStatus::Clean
        };
    }

    /// 保存失敗。内容とベースラインはそのまま、エラーを保持する
    pub fn fail_save(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.status = SessionStatus::SaveFailed;
    }
}
