//! エディタシェルの統合テスト
//!
//! 編集セッションの開始から保存完了までの一連の流れを公開APIで検証する

use kasane::{EditorShell, Language, ScrollOffset, SessionStatus, StyleClass};

/// 典型的な編集セッション：開く → 編集 → 保存
#[test]
fn test_open_edit_save_scenario() {
    let mut shell = EditorShell::new("# Hello\n\nWorld", Language::Markdown);

    // 開いた直後：クリーン、1行目がハイライトされている
    assert_eq!(shell.status(), SessionStatus::Clean);
    assert!(!shell.is_dirty());
    let spans = shell.surface().marked().spans().to_vec();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].class, StyleClass::Comment);

    // 末尾に1文字タイプ：ダーティ化し、ハイライトが追従する
    let end = shell.surface().input().char_count();
    shell.surface_mut().input_mut().set_cursor(end);
    shell.insert_char('!');

    assert_eq!(shell.surface().content(), "# Hello\n\nWorld!");
    assert_eq!(shell.status(), SessionStatus::Dirty);
    assert!(shell
        .surface()
        .marked()
        .text()
        .ends_with("World!"));

    // 保存：内容のスナップショットが渡り、成功でクリーンへ戻る
    let pending = shell.request_save().expect("dirty shell should save");
    assert_eq!(pending.content, "# Hello\n\nWorld!");
    assert_eq!(shell.status(), SessionStatus::Saving);

    shell.finish_save(Ok(()));
    assert_eq!(shell.status(), SessionStatus::Clean);
    assert_eq!(shell.baseline(), "# Hello\n\nWorld!");
}

#[test]
fn test_tab_insertion_keeps_cursor_after_render() {
    let mut shell = EditorShell::new("fn main\nbody", Language::Plain);
    shell.surface_mut().input_mut().set_cursor(2);

    shell.insert_tab();
    assert_eq!(shell.surface().content(), "fn\t main\nbody");

    // 描画コミット後の復元でタブの直後へ
    shell.commit_pending_cursor();
    assert_eq!(shell.surface().input().cursor(), 3);
    assert_eq!(shell.status(), SessionStatus::Dirty);
}

#[test]
fn test_tab_over_selection_restores_to_selection_start() {
    let mut shell = EditorShell::new("abcdef", Language::Plain);
    shell.surface_mut().input_mut().select_range(1, 4);

    shell.insert_tab();
    assert_eq!(shell.surface().content(), "a\tef");

    shell.commit_pending_cursor();
    assert_eq!(shell.surface().input().cursor(), 2);
}

#[test]
fn test_scroll_sync_follows_input_layer_only() {
    let mut shell = EditorShell::new("x\n".repeat(200), Language::Plain);

    shell.surface_mut().scroll_input_to(120, 4);
    assert_eq!(
        shell.surface().highlight_scroll(),
        ScrollOffset { top: 120, left: 4 }
    );

    // 入力レイヤだけ動かしても、同期イベントなしではハイライト側は不動
    shell.surface_mut().input_mut().scroll_to(5, 0);
    assert_eq!(
        shell.surface().highlight_scroll(),
        ScrollOffset { top: 120, left: 4 }
    );

    shell.surface_mut().on_scroll();
    assert_eq!(
        shell.surface().highlight_scroll(),
        ScrollOffset { top: 5, left: 0 }
    );
}

#[test]
fn test_save_failure_keeps_edits_and_allows_retry() {
    let mut shell = EditorShell::new("v1", Language::Plain);
    shell.replace_content("v2");

    shell.request_save().expect("first save should start");
    shell.finish_save(Err("permission denied".to_string()));

    assert_eq!(shell.status(), SessionStatus::SaveFailed);
    assert_eq!(shell.save_error(), Some("permission denied"));
    assert_eq!(shell.surface().content(), "v2");
    assert_eq!(shell.baseline(), "v1");

    // さらに編集してもエラーではなくダーティへ戻る
    shell.insert_char('!');
    assert_eq!(shell.status(), SessionStatus::Dirty);
    assert!(shell.save_error().is_none());

    let retry = shell.request_save().expect("retry should start");
    assert_eq!(retry.content, "v2!");
    shell.finish_save(Ok(()));
    assert_eq!(shell.status(), SessionStatus::Clean);
}

#[test]
fn test_only_one_save_in_flight() {
    let mut shell = EditorShell::new("a", Language::Plain);
    shell.replace_content("b");

    assert!(shell.request_save().is_some());
    // 進行中の保存がある間、後続の要求は開始されない
    assert!(shell.request_save().is_none());
    assert!(shell.request_save().is_none());

    shell.finish_save(Ok(()));
    assert_eq!(shell.status(), SessionStatus::Clean);
    // クリーンに戻った後も、変更がなければ保存は始まらない
    assert!(shell.request_save().is_none());
}

#[test]
fn test_revert_to_baseline_clears_dirty() {
    let mut shell = EditorShell::new("same", Language::Plain);
    shell.replace_content("changed");
    assert!(shell.is_dirty());

    // ベースラインと同じ内容へ戻せばクリーン（内容比較によるダーティ判定）
    shell.replace_content("same");
    assert!(!shell.is_dirty());
    assert_eq!(shell.status(), SessionStatus::Clean);
}

#[test]
fn test_highlight_recomputes_on_every_change() {
    let mut shell = EditorShell::new("plain", Language::Yaml);
    assert!(shell.surface().marked().spans().is_empty());

    shell.replace_content("key: \"value\"");
    let classes: Vec<StyleClass> = shell
        .surface()
        .marked()
        .spans()
        .iter()
        .map(|span| span.class)
        .collect();
    assert_eq!(classes, vec![StyleClass::Keyword, StyleClass::String]);

    shell.backspace();
    // 閉じ引用符が消えると文字列注釈は消える
    let classes: Vec<StyleClass> = shell
        .surface()
        .marked()
        .spans()
        .iter()
        .map(|span| span.class)
        .collect();
    assert_eq!(classes, vec![StyleClass::Keyword]);
}
