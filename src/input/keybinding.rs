//! キーバインドシステム
//!
//! crosstermのキーイベントを内部表現へ正規化し、エディタアクションへ
//! 割り当てる。保存のアクセラレータ（Ctrl+S）はここで解決されるため、
//! ホスト側のデフォルト動作が割り込むことはない。

use crossterm::event::{
    KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers,
};
use std::collections::HashMap;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Esc,
    Unknown,
}

impl Key {
    /// 修飾なしのキー
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    fn ctrl(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers {
                ctrl: true,
                alt: false,
                shift: false,
            },
            code: KeyCode::Char(ch),
        }
    }

    /// 保存アクセラレータ
    pub fn ctrl_s() -> Self {
        Self::ctrl('s')
    }

    /// 終了
    pub fn ctrl_q() -> Self {
        Self::ctrl('q')
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
            shift: event.modifiers.contains(CrosstermModifiers::SHIFT),
        };

        let code = match event.code {
            CrosstermKeyCode::Char(ch) => KeyCode::Char(ch.to_ascii_lowercase()),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Self { modifiers, code }
    }
}

/// エディタアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// 保存（アクセラレータ + S と同等）
    Save,
    /// 編集の破棄（コマンドエディタ変種のみ割り当てられる）
    Discard,
    /// 終了
    Quit,
    /// タブ挿入
    InsertTab,
    /// 改行挿入
    InsertNewline,
    /// 後退削除
    Backspace,
    /// 前方削除
    Delete,
    /// カーソル移動
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MoveLineStart,
    MoveLineEnd,
}

/// キーマップ
///
/// バインドはデータであり、ホストは自由に付け替えられる
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<Key, EditorAction>,
}

impl Keymap {
    /// 空のキーマップ
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// 既定のバインド一式
    pub fn standard() -> Self {
        let mut keymap = Self::empty();
        keymap.bind(Key::ctrl_s(), EditorAction::Save);
        keymap.bind(Key::ctrl_q(), EditorAction::Quit);
        keymap.bind(Key::plain(KeyCode::Tab), EditorAction::InsertTab);
        keymap.bind(Key::plain(KeyCode::Enter), EditorAction::InsertNewline);
        keymap.bind(Key::plain(KeyCode::Backspace), EditorAction::Backspace);
        keymap.bind(Key::plain(KeyCode::Delete), EditorAction::Delete);
        keymap.bind(Key::plain(KeyCode::Up), EditorAction::MoveUp);
        keymap.bind(Key::plain(KeyCode::Down), EditorAction::MoveDown);
        keymap.bind(Key::plain(KeyCode::Left), EditorAction::MoveLeft);
        keymap.bind(Key::plain(KeyCode::Right), EditorAction::MoveRight);
        keymap.bind(Key::plain(KeyCode::Home), EditorAction::MoveLineStart);
        keymap.bind(Key::plain(KeyCode::End), EditorAction::MoveLineEnd);
        keymap
    }

    /// コマンドエディタ変種：Esc に破棄を割り当てる
    pub fn command_editor() -> Self {
        let mut keymap = Self::standard();
        keymap.bind(Key::plain(KeyCode::Esc), EditorAction::Discard);
        keymap
    }

    /// バインドを追加・上書き
    pub fn bind(&mut self, key: Key, action: EditorAction) {
        self.bindings.insert(key, action);
    }

    /// キーに対応するアクションを引く
    pub fn resolve(&self, key: &Key) -> Option<EditorAction> {
        self.bindings.get(key).copied()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_s_resolves_to_save() {
        let keymap = Keymap::standard();
        assert_eq!(keymap.resolve(&Key::ctrl_s()), Some(EditorAction::Save));
    }

    #[test]
    fn test_tab_resolves_to_insert_tab() {
        let keymap = Keymap::standard();
        assert_eq!(
            keymap.resolve(&Key::plain(KeyCode::Tab)),
            Some(EditorAction::InsertTab)
        );
    }

    #[test]
    fn test_standard_keymap_has_no_discard() {
        // 破棄はコマンドエディタ変種だけの操作
        assert_eq!(Keymap::standard().resolve(&Key::plain(KeyCode::Esc)), None);
        assert_eq!(
            Keymap::command_editor().resolve(&Key::plain(KeyCode::Esc)),
            Some(EditorAction::Discard)
        );
    }

    #[test]
    fn test_crossterm_conversion_normalizes_case() {
        let event = KeyEvent::new(CrosstermKeyCode::Char('S'), CrosstermModifiers::CONTROL);
        let key = Key::from(event);
        assert_eq!(key.code, KeyCode::Char('s'));
        assert!(key.modifiers.ctrl);
    }

    #[test]
    fn test_rebinding_is_allowed() {
        let mut keymap = Keymap::standard();
        keymap.bind(Key::ctrl_q(), EditorAction::Save);
        assert_eq!(keymap.resolve(&Key::ctrl_q()), Some(EditorAction::Save));
    }
}
