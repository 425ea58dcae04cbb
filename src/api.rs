//! Public API Types
//!
//! 公開APIで使用する列挙型と設定型を定義するモジュール。

use serde::{Deserialize, Serialize};

/// テキスト形式でエクスポートする際のファイル名
pub const TEXT_FILE_NAME: &str = "extracted_data.txt";

/// PDF形式でエクスポートする際のファイル名
pub const PDF_FILE_NAME: &str = "extracted_data.pdf";

/// 抽出結果が空の場合に一覧へ表示するプレースホルダー
pub const EMPTY_COLUMN_PLACEHOLDER: &str = "No data found in this column.";

/// エクスポート形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ExportFormat {
    /// 改行区切りのプレーンテキスト
    ///
    /// ```text
    /// Ann
    /// Bo
    /// ```
    Text,

    /// タイトル付き、折り返し・改ページ済みのPDFドキュメント
    Pdf,
}

impl ExportFormat {
    /// 成果物の固定ファイル名
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Text => TEXT_FILE_NAME,
            ExportFormat::Pdf => PDF_FILE_NAME,
        }
    }

    /// 成果物のMIMEタイプ
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// 日付セルのテキスト化形式
///
/// 抽出時に日付セルをどのような文字列にするかを指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// シリアル値をそのまま数値として出力（デフォルト）
    ///
    /// 例: `45658`
    #[default]
    Serial,

    /// ISO 8601形式
    ///
    /// 時刻部分がない場合は`YYYY-MM-DD`、ある場合は`YYYY-MM-DDTHH:MM:SS`。
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxcolumn::{ExtractorBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), xlsxcolumn::XlsxColumnError> {
    /// let extractor = ExtractorBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

/// PDFのページレイアウト
///
/// 長さの単位はすべてミリメートル、フォントサイズはポイントです。
/// JSONから読み込めます。省略したフィールドはデフォルト値になります。
///
/// ```json
/// { "margin": 20.0, "title": "Customer names" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// ページ幅（A4: 210mm）
    pub page_width: f64,
    /// ページ高さ（A4: 297mm）
    pub page_height: f64,
    /// 上下左右共通の余白
    pub margin: f64,
    /// 本文1行あたりの送り幅
    pub line_height: f64,
    /// 1ページ目の先頭に描画する見出し
    pub title: String,
    /// 見出しのフォントサイズ（太字）
    pub title_font_size: f64,
    /// 本文のフォントサイズ
    pub body_font_size: f64,
    /// 見出しのベースラインから本文1行目までの距離
    pub title_gap: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 15.0,
            line_height: 7.0,
            title: "Extracted Data".to_string(),
            title_font_size: 18.0,
            body_font_size: 12.0,
            title_gap: 10.0,
        }
    }
}

impl PageLayout {
    /// 本文の描画幅（ページ幅 − 2 × 余白）
    pub fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    /// ベースラインがこの位置を超える行は次のページへ送る
    pub fn bottom_limit(&self) -> f64 {
        self.page_height - self.margin
    }

    /// JSON文字列からレイアウトを読み込む
    pub fn from_json(json: &str) -> Result<Self, crate::XlsxColumnError> {
        Ok(serde_json::from_str(json)?)
    }
}
