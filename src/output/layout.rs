//! Page Layout
//!
//! 抽出結果をページ上の行に配置する処理。
//! 折り返しと改ページの計算のみを行い、PDFの生成はpdfモジュールが担当します。

use crate::api::PageLayout;
use crate::output::metrics::Helvetica;

/// ページ上に配置された1行
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedLine {
    /// 描画する文字列
    pub text: String,
    /// ページ上端からベースラインまでの距離（mm）
    pub y: f64,
}

/// 配置済みのドキュメント
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DocumentLayout {
    /// 1ページ目の見出し
    pub title: PlacedLine,
    /// 各ページの本文行
    pub pages: Vec<Vec<PlacedLine>>,
}

impl DocumentLayout {
    /// ページ数
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// 文字列を指定幅に収まるよう折り返す
///
/// - 改行文字で段落に分割
/// - 段落内は空白で単語に分割し、行に詰められるだけ詰める
/// - 1単語が幅を超える場合は文字単位で分割
/// - 空の段落は空行1行になる
pub(crate) fn wrap_text(text: &str, max_width: f64, font_size: f64, font: &Helvetica) -> Vec<String> {
    let space_width = font.char_width(' ', font_size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut current = String::new();
        let mut current_width = 0.0;
        let mut has_content = false;

        for word in paragraph.split(' ') {
            let word_width = font.text_width(word, font_size);
            let sep_width = if has_content { space_width } else { 0.0 };

            if has_content && current_width + sep_width + word_width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
                has_content = false;
            }

            if word_width > max_width {
                for ch in word.chars() {
                    let ch_width = font.char_width(ch, font_size);
                    if has_content && current_width + ch_width > max_width {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    current.push(ch);
                    current_width += ch_width;
                    has_content = true;
                }
                continue;
            }

            if has_content {
                current.push(' ');
                current_width += space_width;
            }
            current.push_str(word);
            current_width += word_width;
            has_content = true;
        }

        lines.push(current);
    }

    lines
}

/// 全項目を折り返し、ページに配置する
///
/// 各項目の行ブロックを描画する前に、ブロック全体がページ下端
/// （ページ高さ − 余白）に収まるかを判定し、収まらない場合は
/// 改ページしてから描画します。ページ先頭でも収まらない長い項目は、
/// 1行ずつ次のページへ続けて描画されます。
pub(crate) fn paginate(items: &[String], layout: &PageLayout) -> DocumentLayout {
    let font = Helvetica;
    let content_width = layout.content_width();
    let bottom = layout.bottom_limit();

    let title = PlacedLine {
        text: layout.title.clone(),
        y: layout.margin,
    };

    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = layout.margin + layout.title_gap;

    for item in items {
        let lines = wrap_text(item, content_width, layout.body_font_size, &font);
        let block_height = lines.len() as f64 * layout.line_height;

        if y + block_height > bottom && !current_page(&pages).is_empty() {
            pages.push(Vec::new());
            y = layout.margin;
        }

        for text in lines {
            if y + layout.line_height > bottom && !current_page(&pages).is_empty() {
                pages.push(Vec::new());
                y = layout.margin;
            }
            current_page_mut(&mut pages).push(PlacedLine { text, y });
            y += layout.line_height;
        }
    }

    DocumentLayout { title, pages }
}

fn current_page(pages: &[Vec<PlacedLine>]) -> &[PlacedLine] {
    pages.last().map(Vec::as_slice).unwrap_or(&[])
}

fn current_page_mut(pages: &mut Vec<Vec<PlacedLine>>) -> &mut Vec<PlacedLine> {
    if pages.is_empty() {
        pages.push(Vec::new());
    }
    let last = pages.len() - 1;
    &mut pages[last]
}
