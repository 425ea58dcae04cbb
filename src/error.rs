//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::borrow::Cow;

use thiserror::Error;

/// 拡張子が不正な場合にユーザーへ表示するメッセージ
pub const MSG_INVALID_FILE: &str = "Please upload a valid Excel file (.xlsx).";

/// シートにデータが存在しない場合のメッセージ
pub const MSG_EMPTY_SHEET: &str = "No data found in the Excel file.";

/// 解析・処理に失敗した場合のメッセージ
pub const MSG_PROCESSING_FAILED: &str = "An error occurred while processing the Excel file.";

/// ファイルまたは列が未選択の場合のメッセージ
pub const MSG_MISSING_SELECTION: &str = "Please select a file and a column.";

/// エクスポート対象が空の場合のメッセージ
pub const MSG_NOTHING_TO_EXPORT: &str = "No data to download.";

/// エラーの分類
///
/// どのエラーも、それを引き起こしたユーザー操作の境界で回復されます。
/// 分類は、呼び出し側が通知の出し方を決めるために使用します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 入力検証エラー（拡張子不正、選択不足など）
    InputValidation,
    /// スプレッドシートのバイト列を解析できない
    Format,
    /// 操作の結果が空（行なし、エクスポート対象なし）
    EmptyResult,
    /// 設定やドキュメント生成など内部処理のエラー
    Internal,
}

/// xlsxcolumnクレート全体で使用するエラー型
///
/// ファイルの読み込み、解析、列の抽出、エクスポート中に発生する
/// すべてのエラーを統一的に扱います。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcolumn::XlsxColumnError;
/// use std::fs::File;
///
/// fn read_excel_file(path: &str) -> Result<(), XlsxColumnError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxColumnError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// calamineがファイル形式を認識できない、またはファイルが破損している
    /// 場合に発生します。部分的な解析結果は返しません。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// ファイル名の拡張子が受け付け対象ではない
    ///
    /// 拡張子のチェックは大文字・小文字を区別する接尾辞比較です。
    /// 内容の検証ではありません。
    #[error("Invalid file type: '{file_name}' does not end with '{expected}'")]
    InvalidFileType {
        /// 指定されたファイル名
        file_name: String,
        /// 受け付ける拡張子
        expected: String,
    },

    /// 抽出時にファイルまたは列が選択されていない
    #[error("No file or column selected")]
    MissingSelection,

    /// 選択された列名がヘッダー行に存在しない
    #[error("Column '{0}' not found in header row")]
    ColumnNotFound(String),

    /// 先頭シートに行が存在しない
    #[error("Sheet '{0}' contains no rows")]
    EmptySheet(String),

    /// 抽出結果が空のためエクスポートできない
    #[error("Extracted list is empty")]
    NothingToExport,

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtractorBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxcolumn::{ExtractorBuilder, XlsxColumnError};
    ///
    /// let result = ExtractorBuilder::new()
    ///     .with_accepted_extension("xlsx")  // 先頭の`.`がない
    ///     .build();
    ///
    /// match result {
    ///     Err(XlsxColumnError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON設定ファイルの読み込みエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PDFドキュメントの生成に失敗したエラー
    #[error("PDF encoding error: {0}")]
    Pdf(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限を超えた場合などに発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl XlsxColumnError {
    /// エラーの分類を返す
    pub fn category(&self) -> ErrorCategory {
        match self {
            XlsxColumnError::InvalidFileType { .. }
            | XlsxColumnError::MissingSelection
            | XlsxColumnError::ColumnNotFound(_) => ErrorCategory::InputValidation,
            XlsxColumnError::Io(_)
            | XlsxColumnError::Parse(_)
            | XlsxColumnError::SecurityViolation(_) => ErrorCategory::Format,
            XlsxColumnError::EmptySheet(_) | XlsxColumnError::NothingToExport => {
                ErrorCategory::EmptyResult
            }
            XlsxColumnError::Config(_) | XlsxColumnError::Json(_) | XlsxColumnError::Pdf(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// ユーザーに表示する通知メッセージを返す
    ///
    /// 詳細はログに出力し、ユーザーには固定の文言のみを見せます。
    /// 受け付ける拡張子を`.xlsx`以外に変更した場合のみ、拡張子の通知に
    /// その拡張子を埋め込みます。
    pub fn user_message(&self) -> Cow<'static, str> {
        let message = match self {
            XlsxColumnError::InvalidFileType { expected, .. } if expected != ".xlsx" => {
                return Cow::Owned(format!("Please upload a valid Excel file ({}).", expected));
            }
            XlsxColumnError::InvalidFileType { .. } => MSG_INVALID_FILE,
            XlsxColumnError::MissingSelection | XlsxColumnError::ColumnNotFound(_) => {
                MSG_MISSING_SELECTION
            }
            XlsxColumnError::EmptySheet(_) => MSG_EMPTY_SHEET,
            XlsxColumnError::NothingToExport => MSG_NOTHING_TO_EXPORT,
            _ => MSG_PROCESSING_FAILED,
        };
        Cow::Borrowed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: XlsxColumnError = io_err.into();

        match error {
            XlsxColumnError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: XlsxColumnError = parse_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse spreadsheet"));
        assert!(error_msg.contains("Corrupted file"));
        assert_eq!(error.category(), ErrorCategory::Format);
        assert_eq!(error.user_message(), MSG_PROCESSING_FAILED);
    }

    #[test]
    fn test_invalid_file_type_display() {
        let error = XlsxColumnError::InvalidFileType {
            file_name: "report.csv".to_string(),
            expected: ".xlsx".to_string(),
        };

        let error_msg = error.to_string();
        assert!(error_msg.contains("report.csv"));
        assert!(error_msg.contains(".xlsx"));
        assert_eq!(error.category(), ErrorCategory::InputValidation);
        assert_eq!(error.user_message(), MSG_INVALID_FILE);
    }

    #[test]
    fn test_invalid_file_type_names_custom_extension() {
        let error = XlsxColumnError::InvalidFileType {
            file_name: "report.xlsx".to_string(),
            expected: ".xlsm".to_string(),
        };
        assert_eq!(error.user_message(), "Please upload a valid Excel file (.xlsm).");
    }

    #[test]
    fn test_empty_result_messages() {
        let empty_sheet = XlsxColumnError::EmptySheet("Sheet1".to_string());
        assert_eq!(empty_sheet.category(), ErrorCategory::EmptyResult);
        assert_eq!(empty_sheet.user_message(), MSG_EMPTY_SHEET);

        let nothing = XlsxColumnError::NothingToExport;
        assert_eq!(nothing.category(), ErrorCategory::EmptyResult);
        assert_eq!(nothing.user_message(), "No data to download.");
    }

    #[test]
    fn test_selection_errors_share_notice() {
        assert_eq!(
            XlsxColumnError::MissingSelection.user_message(),
            XlsxColumnError::ColumnNotFound("Age".to_string()).user_message()
        );
        assert!(XlsxColumnError::ColumnNotFound("Age".to_string())
            .to_string()
            .contains("'Age'"));
    }

    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), XlsxColumnError> {
            let _file = std::fs::File::open("nonexistent_file.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(XlsxColumnError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let error: XlsxColumnError = json_err.into();
        assert!(error.to_string().starts_with("JSON error"));
        assert_eq!(error.category(), ErrorCategory::Internal);
    }

    #[test]
    fn test_config_error_display() {
        let error = XlsxColumnError::Config("Invalid margin".to_string());
        assert!(error.to_string().starts_with("Configuration error"));
        assert_eq!(error.user_message(), MSG_PROCESSING_FAILED);
    }
}
