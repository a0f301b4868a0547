//! 表示層モジュール
//!
//! テーマ管理とマーク済みテキストの端末描画

pub mod render;
pub mod theme;

pub use render::{EditorView, EditorViewOptions};
pub use theme::{ColorScheme, ComponentType, Theme};
