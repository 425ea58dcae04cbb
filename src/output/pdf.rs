//! PDF Encoder
//!
//! layoutモジュールで配置した行を、lopdfでPDFドキュメントに書き出します。
//! フォントはPDF標準14フォント（Helvetica / Helvetica-Bold）を埋め込みなしで使用します。

use encoding_rs::WINDOWS_1252;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::Write;

use crate::api::PageLayout;
use crate::error::XlsxColumnError;
use crate::output::layout::{paginate, DocumentLayout, PlacedLine};
use crate::output::metrics::MM_PER_PT;

/// 本文フォントのリソース名
const BODY_FONT: &str = "F1";

/// 見出しフォントのリソース名
const TITLE_FONT: &str = "F2";

/// PDF形式のエンコーダー
pub struct PdfEncoder;

impl PdfEncoder {
    pub fn render<W: Write>(
        &self,
        items: &[String],
        layout: &PageLayout,
        writer: &mut W,
    ) -> Result<(), XlsxColumnError> {
        let doc_layout = paginate(items, layout);
        log::debug!(
            "laid out {} item(s) on {} page(s)",
            items.len(),
            doc_layout.page_count()
        );

        let mut doc = build_document(&doc_layout, layout)?;
        doc.save_to(&mut *writer)
            .map_err(|e| XlsxColumnError::Pdf(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }
}

/// 配置済みのページからPDFドキュメントを構築
fn build_document(
    doc_layout: &DocumentLayout,
    layout: &PageLayout,
) -> Result<Document, XlsxColumnError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let body_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let title_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            BODY_FONT => body_font_id,
            TITLE_FONT => title_font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(doc_layout.page_count());
    for (index, lines) in doc_layout.pages.iter().enumerate() {
        let mut operations = Vec::new();

        if index == 0 {
            push_line(
                &mut operations,
                TITLE_FONT,
                layout.title_font_size,
                &doc_layout.title,
                layout,
            );
        }
        for line in lines {
            push_line(&mut operations, BODY_FONT, layout.body_font_size, line, layout);
        }

        let content = Content { operations }
            .encode()
            .map_err(|e| XlsxColumnError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => Object::Integer(kids.len() as i64),
        "Kids" => kids,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(mm_to_pt(layout.page_width) as f32),
            Object::Real(mm_to_pt(layout.page_height) as f32),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

/// 1行分のテキスト描画命令を追加
///
/// 配置はページ上端からの距離（mm）、PDFの座標系は左下原点のポイント単位。
fn push_line(
    operations: &mut Vec<Operation>,
    font: &str,
    font_size: f64,
    line: &PlacedLine,
    layout: &PageLayout,
) {
    if line.text.is_empty() {
        return;
    }

    let x = mm_to_pt(layout.margin) as f32;
    let y = mm_to_pt(layout.page_height - line.y) as f32;

    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), Object::Real(font_size as f32)],
    ));
    operations.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
    operations.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_win_ansi(&line.text))],
    ));
    operations.push(Operation::new("ET", vec![]));
}

fn mm_to_pt(mm: f64) -> f64 {
    mm / MM_PER_PT
}

/// WinAnsiEncodingに変換
///
/// 表現できない文字は`?`に置き換えます。
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];

    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch as u8);
            continue;
        }
        let (bytes, _, had_errors) = WINDOWS_1252.encode(ch.encode_utf8(&mut buf));
        match bytes.as_ref() {
            [byte] if !had_errors => out.push(*byte),
            _ => out.push(b'?'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(items: &[String], layout: &PageLayout) -> Vec<u8> {
        let mut out = Vec::new();
        PdfEncoder.render(items, layout, &mut out).unwrap();
        out
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Ann"), b"Ann".to_vec());
        assert_eq!(encode_win_ansi("Zoë"), vec![b'Z', b'o', 0xEB]);
        assert_eq!(encode_win_ansi("€"), vec![0x80]);
        assert_eq!(encode_win_ansi("名前"), b"??".to_vec());
    }

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
        assert!((mm_to_pt(210.0) - 595.2756).abs() < 1e-3);
    }

    #[test]
    fn test_render_single_page_document() {
        let layout = PageLayout::default();
        let bytes = render(&["30".to_string(), "25".to_string()], &layout);

        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&bytes, b"(Extracted Data)"));
        assert!(contains(&bytes, b"/Helvetica-Bold"));
        assert!(contains(&bytes, b"(30)"));
        assert!(contains(&bytes, b"(25)"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_page_count_matches_layout() {
        let layout = PageLayout::default();
        let items: Vec<String> = (0..100).map(|i| format!("item {}", i)).collect();
        let bytes = render(&items, &layout);

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), paginate(&items, &layout).page_count());
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_render_custom_title() {
        let layout = PageLayout {
            title: "Customer names".to_string(),
            ..PageLayout::default()
        };
        let bytes = render(&["Ann".to_string()], &layout);
        assert!(contains(&bytes, b"(Customer names)"));
    }
}
