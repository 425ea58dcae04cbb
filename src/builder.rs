//! Builder Module
//!
//! Fluent Builder APIを提供し、`Extractor`インスタンスを段階的に構築する。

use crate::api::{DateFormat, ExportFormat, PageLayout};
use crate::column;
use crate::error::XlsxColumnError;
use crate::formatter::CellFormatter;
use crate::output::{Artifact, Exporter};
use crate::parser::WorkbookParser;
use crate::security::SecurityConfig;
use crate::types::{Sheet, Workbook};
use chrono::format::{Item, StrftimeItems};
use log::debug;
use std::io::{Read, Write};

/// 抽出処理の設定を保持する内部構造体
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExtractionConfig {
    /// 日付形式
    pub date_format: DateFormat,

    /// 入力サイズの上限と受け付ける拡張子
    pub security: SecurityConfig,

    /// PDFのページレイアウト
    pub page_layout: PageLayout,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            date_format: DateFormat::Serial,
            security: SecurityConfig::default(),
            page_layout: PageLayout::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Extractor`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcolumn::{ExtractorBuilder, DateFormat};
///
/// # fn main() -> Result<(), xlsxcolumn::XlsxColumnError> {
/// let extractor = ExtractorBuilder::new()
///     .with_date_format(DateFormat::Iso8601)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtractorBuilder {
    /// 内部設定（構築中）
    config: ExtractionConfig,
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 日付形式: シリアル値
    /// - 受け付ける拡張子: `.xlsx`
    /// - 入力サイズ上限: 2GB
    /// - ページレイアウト: A4、余白15mm、行送り7mm
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// 日付セルのテキスト化形式を指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxcolumn::{ExtractorBuilder, DateFormat};
    ///
    /// let builder = ExtractorBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()));
    /// ```
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// 受け付けるファイル名の拡張子を指定する
    ///
    /// 比較は大文字・小文字を区別する接尾辞比較です。
    /// 先頭の`.`を含めて指定してください（例: `.xlsx`）。
    pub fn with_accepted_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.security.accepted_extension = extension.into();
        self
    }

    /// 入力ファイルサイズの上限（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// PDFのページレイアウトを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxcolumn::{ExtractorBuilder, PageLayout};
    ///
    /// let layout = PageLayout {
    ///     title: "Customer names".to_string(),
    ///     ..PageLayout::default()
    /// };
    /// let builder = ExtractorBuilder::new().with_page_layout(layout);
    /// ```
    pub fn with_page_layout(mut self, layout: PageLayout) -> Self {
        self.config.page_layout = layout;
        self
    }

    /// 設定を検証し、`Extractor`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxColumnError::Config(String)`: 設定の検証に失敗した場合
    ///   * カスタム日付形式が空、または不正な書式指定子を含む
    ///   * 拡張子が空、または`.`で始まらない
    ///   * 入力サイズ上限が0
    ///   * ページレイアウトの寸法が不正
    pub fn build(self) -> Result<Extractor, XlsxColumnError> {
        // 1. カスタム日付形式の検証
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            let invalid = format_str.is_empty()
                || StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error));
            if invalid {
                return Err(XlsxColumnError::Config(format!(
                    "Invalid date format string: '{}'",
                    format_str
                )));
            }
        }

        // 2. 拡張子の検証
        let extension = &self.config.security.accepted_extension;
        if extension.len() < 2 || !extension.starts_with('.') {
            return Err(XlsxColumnError::Config(format!(
                "Invalid accepted extension: '{}' (expected e.g. '.xlsx')",
                extension
            )));
        }

        // 3. 入力サイズ上限の検証
        if self.config.security.max_input_file_size == 0 {
            return Err(XlsxColumnError::Config(
                "Maximum input size must be greater than 0".to_string(),
            ));
        }

        // 4. ページレイアウトの検証
        validate_layout(&self.config.page_layout)?;

        Ok(Extractor::new(self.config))
    }
}

/// ページレイアウトの寸法を検証
fn validate_layout(layout: &PageLayout) -> Result<(), XlsxColumnError> {
    let positive = [
        ("page_width", layout.page_width),
        ("page_height", layout.page_height),
        ("line_height", layout.line_height),
        ("title_font_size", layout.title_font_size),
        ("body_font_size", layout.body_font_size),
    ];
    for (name, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(XlsxColumnError::Config(format!(
                "Invalid page layout: {} must be positive (got {})",
                name, value
            )));
        }
    }

    let non_negative = [("margin", layout.margin), ("title_gap", layout.title_gap)];
    for (name, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(XlsxColumnError::Config(format!(
                "Invalid page layout: {} must not be negative (got {})",
                name, value
            )));
        }
    }

    if layout.content_width() <= 0.0 {
        return Err(XlsxColumnError::Config(format!(
            "Invalid page layout: margins ({} mm) leave no room on a {} mm wide page",
            layout.margin, layout.page_width
        )));
    }

    // 見出しと本文1行が1ページ目に収まること
    let first_line_bottom = layout.margin + layout.title_gap + layout.line_height;
    if first_line_bottom > layout.bottom_limit() {
        return Err(XlsxColumnError::Config(format!(
            "Invalid page layout: page height {} mm cannot hold the title and one line",
            layout.page_height
        )));
    }

    Ok(())
}

/// 抽出処理のファサード
///
/// 解析、列の解決、抽出、エクスポートの各処理を、`ExtractorBuilder`で
/// 構築された設定に基づいて実行します。状態は持たないため、
/// 画面操作の流れは`Session`が管理します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcolumn::{ExportFormat, ExtractorBuilder};
/// use std::fs::File;
///
/// # fn main() -> Result<(), xlsxcolumn::XlsxColumnError> {
/// let extractor = ExtractorBuilder::new().build()?;
/// let workbook = extractor.decode_reader(File::open("people.xlsx")?)?;
///
/// let headers = extractor.header_row(&workbook.first_sheet);
/// if let Some(column) = extractor.resolve(&headers, "Age") {
///     let ages = extractor.extract(&workbook.first_sheet, column);
///     let artifact = extractor.export(&ages, ExportFormat::Text)?;
///     std::fs::write(artifact.file_name, &artifact.bytes)?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    /// 抽出設定
    config: ExtractionConfig,

    /// セルフォーマッター
    formatter: CellFormatter,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl Extractor {
    pub(crate) fn new(config: ExtractionConfig) -> Self {
        Self {
            formatter: CellFormatter::new(config.date_format.clone()),
            config,
        }
    }

    /// ファイル名の拡張子を検証する
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 受け付ける拡張子で終わる場合
    /// * `Err(XlsxColumnError::InvalidFileType)` - それ以外
    pub fn validate_file_name(&self, file_name: &str) -> Result<(), XlsxColumnError> {
        self.config.security.validate_file_name(file_name)
    }

    /// バイト列を解析し、先頭シートを取り出す
    ///
    /// シート全体を解析できた場合のみ結果を返します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Workbook)` - 解析に成功した場合（行が0件の場合も含む）
    /// * `Err(XlsxColumnError::Parse)` - 形式を認識できない、または破損している場合
    /// * `Err(XlsxColumnError::SecurityViolation)` - 入力サイズが上限を超えた場合
    pub fn decode(&self, bytes: Vec<u8>) -> Result<Workbook, XlsxColumnError> {
        let parser = WorkbookParser::open(bytes, &self.config.security)?;
        parser.into_workbook()
    }

    /// リーダーから全体を読み込んで解析する
    pub fn decode_reader<R: Read>(&self, mut input: R) -> Result<Workbook, XlsxColumnError> {
        let mut buffer = Vec::new();
        input.read_to_end(&mut buffer)?;
        self.decode(buffer)
    }

    /// 0行目をテキスト化したヘッダー行を返す
    pub fn header_row(&self, sheet: &Sheet) -> Vec<String> {
        column::header_row(sheet, &self.formatter)
    }

    /// ヘッダー名から列インデックスを求める
    ///
    /// 完全一致で最初に見つかった列を返します。前後の空白は除去しません。
    pub fn resolve(&self, headers: &[String], target: &str) -> Option<usize> {
        column::resolve_column(headers, target)
    }

    /// 指定した列の欠損していない値を、行の順序どおりに取り出す
    pub fn extract(&self, sheet: &Sheet, column: usize) -> Vec<String> {
        column::extract_column(sheet, column, &self.formatter)
    }

    /// 抽出結果を指定した形式でライターに書き出す
    ///
    /// # 戻り値
    ///
    /// * `Err(XlsxColumnError::NothingToExport)` - 抽出結果が空の場合
    pub fn export_to<W: Write>(
        &self,
        items: &[String],
        format: ExportFormat,
        writer: &mut W,
    ) -> Result<(), XlsxColumnError> {
        if items.is_empty() {
            return Err(XlsxColumnError::NothingToExport);
        }

        Exporter::from_format(format).render(items, &self.config.page_layout, writer)
    }

    /// 抽出結果を成果物（ファイル名・MIMEタイプ・内容）に変換する
    pub fn export(
        &self,
        items: &[String],
        format: ExportFormat,
    ) -> Result<Artifact, XlsxColumnError> {
        let mut bytes = Vec::new();
        self.export_to(items, format, &mut bytes)?;

        debug!(
            "exported {} item(s) as {} ({} bytes)",
            items.len(),
            format.file_name(),
            bytes.len()
        );

        Ok(Artifact::new(format, bytes))
    }

    /// 受け付けるファイル名の拡張子
    pub fn accepted_extension(&self) -> &str {
        &self.config.security.accepted_extension
    }

    /// PDFのページレイアウト
    pub fn page_layout(&self) -> &PageLayout {
        &self.config.page_layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn date(serial: f64) -> CellValue {
        CellValue::DateTime {
            serial,
            is_1904: false,
        }
    }

    fn sheet() -> Sheet {
        Sheet::new(
            "People",
            vec![
                vec![CellValue::Text("Name".to_string()), CellValue::Text("Joined".to_string())],
                vec![CellValue::Text("Ann".to_string()), date(45658.0)],
                vec![CellValue::Text("Bo".to_string()), date(45658.5)],
            ],
        )
    }

    #[test]
    fn test_extractor_builder_new() {
        let builder = ExtractorBuilder::new();
        assert_eq!(builder.config.date_format, DateFormat::Serial);
        assert_eq!(builder.config.security.accepted_extension, ".xlsx");
        assert_eq!(builder.config.page_layout, PageLayout::default());
    }

    #[test]
    fn test_with_date_format() {
        let builder = ExtractorBuilder::new()
            .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()));
        assert!(matches!(
            builder.config.date_format,
            DateFormat::Custom(ref s) if s == "%Y年%m月%d日"
        ));
    }

    #[test]
    fn test_build_success() {
        assert!(ExtractorBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_with_invalid_custom_date_format() {
        for format in ["", "%Q", "%Y-%"] {
            let result = ExtractorBuilder::new()
                .with_date_format(DateFormat::Custom(format.to_string()))
                .build();
            match result {
                Err(XlsxColumnError::Config(msg)) => {
                    assert!(msg.contains("Invalid date format"));
                }
                _ => panic!("Expected Config error for {:?}", format),
            }
        }
    }

    #[test]
    fn test_build_with_valid_custom_date_format() {
        let result = ExtractorBuilder::new()
            .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()))
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_with_invalid_extension() {
        for extension in ["", ".", "xlsx"] {
            let result = ExtractorBuilder::new()
                .with_accepted_extension(extension)
                .build();
            assert!(
                matches!(result, Err(XlsxColumnError::Config(_))),
                "extension {:?} should be rejected",
                extension
            );
        }
    }

    #[test]
    fn test_build_with_zero_max_input_size() {
        let result = ExtractorBuilder::new().with_max_input_size(0).build();
        assert!(matches!(result, Err(XlsxColumnError::Config(_))));
    }

    #[test]
    fn test_build_with_invalid_layout() {
        let cases = [
            PageLayout {
                margin: 105.0,
                ..PageLayout::default()
            },
            PageLayout {
                line_height: 0.0,
                ..PageLayout::default()
            },
            PageLayout {
                body_font_size: f64::NAN,
                ..PageLayout::default()
            },
            PageLayout {
                page_height: 40.0,
                ..PageLayout::default()
            },
            PageLayout {
                title_gap: -1.0,
                ..PageLayout::default()
            },
        ];

        for layout in cases {
            let result = ExtractorBuilder::new().with_page_layout(layout.clone()).build();
            match result {
                Err(XlsxColumnError::Config(msg)) => assert!(msg.contains("page layout")),
                _ => panic!("Expected Config error for {:?}", layout),
            }
        }
    }

    #[test]
    fn test_builder_method_chaining() {
        let extractor = ExtractorBuilder::new()
            .with_date_format(DateFormat::Iso8601)
            .with_accepted_extension(".ods")
            .with_max_input_size(1024)
            .with_page_layout(PageLayout {
                title: "Names".to_string(),
                ..PageLayout::default()
            })
            .build()
            .unwrap();

        assert_eq!(extractor.accepted_extension(), ".ods");
        assert_eq!(extractor.page_layout().title, "Names");
        assert!(extractor.validate_file_name("sheet.ods").is_ok());
        assert!(extractor.validate_file_name("sheet.xlsx").is_err());
    }

    #[test]
    fn test_extract_uses_configured_date_format() {
        let serial = ExtractorBuilder::new().build().unwrap();
        assert_eq!(serial.extract(&sheet(), 1), vec!["45658", "45658.5"]);

        let iso = ExtractorBuilder::new()
            .with_date_format(DateFormat::Iso8601)
            .build()
            .unwrap();
        assert_eq!(
            iso.extract(&sheet(), 1),
            vec!["2025-01-01", "2025-01-01T12:00:00"]
        );
    }

    #[test]
    fn test_export_refuses_empty_list() {
        let extractor = Extractor::default();
        for format in [ExportFormat::Text, ExportFormat::Pdf] {
            assert!(matches!(
                extractor.export(&[], format),
                Err(XlsxColumnError::NothingToExport)
            ));
        }
    }

    #[test]
    fn test_export_text_artifact() {
        let extractor = Extractor::default();
        let items = vec!["30".to_string(), "25".to_string()];
        let artifact = extractor.export(&items, ExportFormat::Text).unwrap();

        assert_eq!(artifact.file_name, "extracted_data.txt");
        assert_eq!(artifact.mime_type, "text/plain");
        assert_eq!(artifact.bytes, b"30\n25".to_vec());
    }

    #[test]
    fn test_decode_reader_with_invalid_input() {
        let extractor = Extractor::default();
        let result = extractor.decode_reader(std::io::Cursor::new(Vec::<u8>::new()));
        assert!(result.is_err());
    }
}
