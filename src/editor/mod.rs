//! エディタモジュール
//!
//! 二層構造サーフェスと編集セッション、保存配線の統合モジュール

pub mod session;
pub mod shell;
pub mod surface;

// 公開API
pub use session::{EditSession, SessionStatus};
pub use shell::{EditorShell, PendingSave};
pub use surface::{EditorSurface, InputLayer, ScrollOffset};
