//! ホスト境界
//!
//! ドキュメントの読み込みと永続化はホスト側の責務であり、
//! エディタは `DocumentStore` の狭い契約だけを消費する。
//! 同梱のファイルストアはスタンドアロン実行用の実装。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::syntax::Language;

/// 編集対象ドキュメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: String,
    pub content: String,
    pub language: Language,
}

/// ドキュメントストアの契約
///
/// 失敗は人間可読なメッセージを持つエラーとして返す。
/// トランスポート・認証・永続化形式はすべて実装側の責務。
pub trait DocumentStore {
    /// 初期テキストと言語タグを供給する
    fn load(&self, path: &str) -> Result<Document>;

    /// 編集済み内容を永続化する
    fn save(&mut self, path: &str, content: &str) -> Result<()>;
}

/// ファイルシステム実装
///
/// チルダ展開、拡張子からの言語判定、UTF-8テキストの読み書きを行う
#[derive(Debug, Default)]
pub struct FileDocumentStore;

impl FileDocumentStore {
    pub fn new() -> Self {
        Self
    }

    fn resolve(&self, path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).into_owned())
    }
}

impl DocumentStore for FileDocumentStore {
    fn load(&self, path: &str) -> Result<Document> {
        let resolved = self.resolve(path);
        log::debug!("loading document from {}", resolved.display());

        if !resolved.exists() {
            bail!("file not found: {}", resolved.display());
        }
        if resolved.is_dir() {
            bail!("not a file: {}", resolved.display());
        }

        let content = fs::read_to_string(&resolved)
            .with_context(|| format!("failed to read {}", resolved.display()))?;
        let language = language_for_path(&resolved);

        log::info!(
            "loaded {} ({} bytes, language: {})",
            resolved.display(),
            content.len(),
            language.tag()
        );

        Ok(Document {
            path: path.to_string(),
            content,
            language,
        })
    }

    fn save(&mut self, path: &str, content: &str) -> Result<()> {
        let resolved = self.resolve(path);
        log::debug!("saving document to {}", resolved.display());

        if let Some(parent) = resolved.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        // 一時ファイルに書き込んでからアトミックに移動
        let temp_path = resolved.with_extension("kasane.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &resolved)
            .with_context(|| format!("failed to replace {}", resolved.display()))?;

        log::info!("saved {} ({} bytes)", resolved.display(), content.len());
        Ok(())
    }
}

/// 拡張子から言語を判定（不明なら Plain）
fn language_for_path(path: &Path) -> Language {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(Language::from_extension)
        .unwrap_or(Language::Plain)
}
