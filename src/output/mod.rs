//! Output Format Module
//!
//! Strategy Patternによるエクスポート形式の抽象化を提供するモジュール。

mod layout;
mod metrics;
mod pdf;
mod text;

use crate::api::{ExportFormat, PageLayout};
use crate::error::XlsxColumnError;
use std::io::Write;

pub use pdf::PdfEncoder;
pub use text::TextEncoder;

/// エクスポーター（Strategy Pattern）
///
/// 各エクスポート形式（テキスト, PDF）をenumとして表現します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exporter {
    Text,
    Pdf,
}

impl Exporter {
    /// エクスポート形式からエクスポーターを生成
    pub fn from_format(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Text => Exporter::Text,
            ExportFormat::Pdf => Exporter::Pdf,
        }
    }

    /// 抽出結果を指定された形式で出力する
    ///
    /// # 引数
    ///
    /// * `items` - 抽出結果（空でないことは呼び出し側で確認済み）
    /// * `layout` - PDFのページレイアウト（テキスト形式では未使用）
    /// * `writer` - 出力先のライター
    pub fn render<W: Write>(
        &self,
        items: &[String],
        layout: &PageLayout,
        writer: &mut W,
    ) -> Result<(), XlsxColumnError> {
        match self {
            Exporter::Text => TextEncoder.render(items, writer),
            Exporter::Pdf => PdfEncoder.render(items, layout, writer),
        }
    }
}

/// エクスポートの成果物
///
/// ファイル名とMIMEタイプは形式ごとに固定です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// 保存時のファイル名
    pub file_name: &'static str,
    /// MIMEタイプ
    pub mime_type: &'static str,
    /// ファイルの内容
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// 形式を指定して成果物を生成
    pub(crate) fn new(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format.file_name(),
            mime_type: format.mime_type(),
            bytes,
        }
    }
}
