//! テーマシステム
//!
//! スタイル分類と画面部品ごとのカラー設定を管理

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

use crate::syntax::StyleClass;

/// UIコンポーネントの種類
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// テキストエリア
    TextArea,
    /// 行番号
    LineNumber,
    /// ステータスライン
    StatusLine,
    /// エラーメッセージ
    Error,
    /// 保存中表示
    Saving,
    /// シンタックスハイライト - コメント
    SyntaxComment,
    /// シンタックスハイライト - キーワード
    SyntaxKeyword,
    /// シンタックスハイライト - 文字列
    SyntaxString,
    /// シンタックスハイライト - コード
    SyntaxCode,
    /// シンタックスハイライト - 太字
    SyntaxBold,
    /// シンタックスハイライト - 斜体
    SyntaxItalic,
    /// シンタックスハイライト - リストマーカー
    SyntaxList,
}

/// カラー設定
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// 前景色
    pub foreground: Color,
    /// 背景色
    pub background: Color,
    /// 修飾子（太字、斜体など）
    pub modifiers: Modifier,
}

impl ColorScheme {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
            modifiers: Modifier::empty(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers = modifier;
        self
    }

    pub fn to_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.background)
            .add_modifier(self.modifiers)
    }
}

/// テーマ設定
#[derive(Debug, Clone)]
pub struct Theme {
    /// テーマ名
    pub name: String,
    /// コンポーネント別のカラー設定
    colors: HashMap<ComponentType, ColorScheme>,
}

impl Theme {
    /// ダークテーマ（既定）
    pub fn dark() -> Self {
        let mut theme = Self {
            name: "dark".to_string(),
            colors: HashMap::new(),
        };

        theme.set_color(
            ComponentType::TextArea,
            ColorScheme::new(Color::White, Color::Black),
        );
        theme.set_color(
            ComponentType::LineNumber,
            ColorScheme::new(Color::DarkGray, Color::Black),
        );
        theme.set_color(
            ComponentType::StatusLine,
            ColorScheme::new(Color::Black, Color::Gray),
        );
        theme.set_color(
            ComponentType::Error,
            ColorScheme::new(Color::LightRed, Color::Black).with_modifier(Modifier::BOLD),
        );
        theme.set_color(
            ComponentType::Saving,
            ColorScheme::new(Color::LightYellow, Color::Black),
        );

        // シンタックスハイライト
        theme.set_color(
            ComponentType::SyntaxComment,
            ColorScheme::new(Color::DarkGray, Color::Black).with_modifier(Modifier::ITALIC),
        );
        theme.set_color(
            ComponentType::SyntaxKeyword,
            ColorScheme::new(Color::LightBlue, Color::Black).with_modifier(Modifier::BOLD),
        );
        theme.set_color(
            ComponentType::SyntaxString,
            ColorScheme::new(Color::LightGreen, Color::Black),
        );
        theme.set_color(
            ComponentType::SyntaxCode,
            ColorScheme::new(Color::LightMagenta, Color::Black),
        );
        theme.set_color(
            ComponentType::SyntaxBold,
            ColorScheme::new(Color::White, Color::Black).with_modifier(Modifier::BOLD),
        );
        theme.set_color(
            ComponentType::SyntaxItalic,
            ColorScheme::new(Color::White, Color::Black).with_modifier(Modifier::ITALIC),
        );
        theme.set_color(
            ComponentType::SyntaxList,
            ColorScheme::new(Color::LightCyan, Color::Black),
        );

        theme
    }

    /// ライトテーマ
    pub fn light() -> Self {
        let mut theme = Self {
            name: "light".to_string(),
            colors: HashMap::new(),
        };

        theme.set_color(
            ComponentType::TextArea,
            ColorScheme::new(Color::Black, Color::White),
        );
        theme.set_color(
            ComponentType::LineNumber,
            ColorScheme::new(Color::DarkGray, Color::White),
        );
        theme.set_color(
            ComponentType::StatusLine,
            ColorScheme::new(Color::White, Color::Blue),
        );
        theme.set_color(
            ComponentType::Error,
            ColorScheme::new(Color::Red, Color::White).with_modifier(Modifier::BOLD),
        );
        theme.set_color(
            ComponentType::Saving,
            ColorScheme::new(Color::Yellow, Color::White),
        );

        theme.set_color(
            ComponentType::SyntaxComment,
            ColorScheme::new(Color::Gray, Color::White).with_modifier(Modifier::ITALIC),
        );
        theme.set_color(
            ComponentType::SyntaxKeyword,
            ColorScheme::new(Color::Blue, Color::White).with_modifier(Modifier::BOLD),
        );
        theme.set_color(
            ComponentType::SyntaxString,
            ColorScheme::new(Color::Green, Color::White),
        );
        theme.set_color(
            ComponentType::SyntaxCode,
            ColorScheme::new(Color::Magenta, Color::White),
        );
        theme.set_color(
            ComponentType::SyntaxBold,
            ColorScheme::new(Color::Black, Color::White).with_modifier(Modifier::BOLD),
        );
        theme.set_color(
            ComponentType::SyntaxItalic,
            ColorScheme::new(Color::Black, Color::White).with_modifier(Modifier::ITALIC),
        );
        theme.set_color(
            ComponentType::SyntaxList,
            ColorScheme::new(Color::Cyan, Color::White),
        );

        theme
    }

    /// カラー設定を追加
    pub fn set_color(&mut self, component: ComponentType, color_scheme: ColorScheme) {
        self.colors.insert(component, color_scheme);
    }

    /// 特定のコンポーネントのスタイルを取得
    pub fn style(&self, component: &ComponentType) -> Style {
        self.colors
            .get(component)
            .map(|scheme| scheme.to_style())
            .unwrap_or_default()
    }

    /// スタイル分類に対応するスタイルを取得
    pub fn style_for_class(&self, class: StyleClass) -> Style {
        let component = match class {
            StyleClass::Comment => ComponentType::SyntaxComment,
            StyleClass::Keyword => ComponentType::SyntaxKeyword,
            StyleClass::String => ComponentType::SyntaxString,
            StyleClass::Code => ComponentType::SyntaxCode,
            StyleClass::Bold => ComponentType::SyntaxBold,
            StyleClass::Italic => ComponentType::SyntaxItalic,
            StyleClass::List => ComponentType::SyntaxList,
        };
        self.style(&component)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_styles() {
        let theme = Theme::dark();
        let keyword = theme.style(&ComponentType::SyntaxKeyword);
        assert_eq!(keyword.fg, Some(Color::LightBlue));
        assert!(keyword.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_every_style_class_has_a_style() {
        let theme = Theme::dark();
        for class in [
            StyleClass::Comment,
            StyleClass::Keyword,
            StyleClass::String,
            StyleClass::Code,
            StyleClass::Bold,
            StyleClass::Italic,
            StyleClass::List,
        ] {
            let style = theme.style_for_class(class);
            assert!(style.fg.is_some(), "{:?}", class);
        }
    }

    #[test]
    fn test_color_override() {
        let mut theme = Theme::dark();
        theme.set_color(
            ComponentType::SyntaxString,
            ColorScheme::new(Color::Red, Color::Black),
        );
        assert_eq!(
            theme.style_for_class(StyleClass::String).fg,
            Some(Color::Red)
        );
    }
}
