//! kasane - 二層構造シンタックスハイライトエディタ
//!
//! 透明な入力レイヤとハイライト済み描画レイヤを重ねるエディタウィジェットの実装

// コアモジュール
pub mod app;
pub mod error;
pub mod logging;

// ハイライト層
pub mod escape;
pub mod syntax;

// 編集層
pub mod editor;

// ホスト境界
pub mod host;

// ロジック層
pub mod input;

// 表示層
pub mod ui;

// 公開API
pub use app::App;
pub use editor::{EditSession, EditorShell, EditorSurface, ScrollOffset, SessionStatus};
pub use error::{KasaneError, Result};
pub use escape::escape;
pub use host::{Document, DocumentStore, FileDocumentStore};
pub use syntax::{Highlighter, Language, MarkedSpan, MarkedText, StyleClass};
