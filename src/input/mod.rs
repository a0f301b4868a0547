//! 入力処理モジュール
//!
//! キー入力の内部表現とエディタアクションへの割り当て

pub mod keybinding;

pub use keybinding::{EditorAction, Key, KeyCode, KeyModifiers, Keymap};
