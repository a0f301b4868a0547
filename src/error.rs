//! エラーハンドリングシステム
//!
//! kasane 全体で使用される統一されたエラー型を定義
//! トークナイザと編集サーフェスは決して失敗しない設計のため、
//! エラーはホスト境界（ドキュメント入出力）とUI初期化に限られる

use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug)]
pub enum KasaneError {
    /// ドキュメント操作エラー
    #[error("Document operation failed")]
    Document(#[from] DocumentError),

    /// UI操作エラー
    #[error("UI operation failed")]
    Ui(#[from] UiError),

    /// 入力処理エラー
    #[error("Input processing failed")]
    Input(#[from] InputError),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// ドキュメント操作固有のエラー
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Document not found: {path}")]
    NotFound { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

/// UI操作固有のエラー
#[derive(Error, Debug)]
pub enum UiError {
    #[error("Terminal initialization failed")]
    TerminalInit,

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 入力処理固有のエラー
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Unknown key sequence: {sequence}")]
    UnknownKeySequence { sequence: String },

    #[error("Invalid argument: {arg}")]
    InvalidArgument { arg: String },
}

// std::io::Error から KasaneError への変換
impl From<std::io::Error> for KasaneError {
    fn from(error: std::io::Error) -> Self {
        KasaneError::Document(DocumentError::Io {
            message: error.to_string(),
        })
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, KasaneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: KasaneError = io_error.into();

        match error {
            KasaneError::Document(DocumentError::Io { message }) => {
                assert!(message.contains("missing"));
            }
            _ => panic!("Expected Document::Io error"),
        }
    }

    #[test]
    fn test_error_messages_are_english() {
        let error = KasaneError::Document(DocumentError::NotFound {
            path: "config.yaml".to_string(),
        });
        assert!(error.to_string().contains("Document operation failed"));
    }
}
